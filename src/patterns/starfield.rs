//! Stars flying toward the viewer.
//!
//! Stars live in a unit cube in front of the camera and are projected onto the grid
//! around a vanishing point, which follows the mouse when there is one.

use crate::config::Quality;
use crate::patterns::{FrameContext, Pattern};
use crate::rendering::cell::Cell;
use crate::rendering::display::Size;
use crate::rendering::renderer::Renderer;
use crate::seeds::Seeds;
use rand::Rng;
use rand::rngs::StdRng;

/// Depth units per second.
const SPEED: f64 = 0.35;
const NEAR: f64 = 0.02;
/// One star per this many cells at full density.
const CELLS_PER_STAR: f64 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Star {
    x: f64,
    y: f64,
    z: f64,
}

pub struct Starfield {
    stars: Vec<Star>,
    density: f64,
    rng: StdRng,
}

impl Starfield {
    pub fn new(size: Size, quality: Quality, seeds: &Seeds) -> Self {
        let mut starfield = Self {
            stars: Vec::new(),
            density: quality.density(),
            rng: seeds.rng_for("starfield"),
        };
        starfield.on_resize(size);
        // spread initial depths so the first frames are not empty
        for star in starfield.stars.iter_mut() {
            star.z = starfield.rng.gen_range(NEAR..1.0);
        }
        starfield
    }

    fn target_count(&self, size: Size) -> usize {
        (size.area() as f64 * self.density / CELLS_PER_STAR).ceil() as usize
    }

    fn spawn(rng: &mut StdRng) -> Star {
        Star {
            x: rng.gen_range(-1.0..1.0),
            y: rng.gen_range(-1.0..1.0),
            z: 1.0,
        }
    }

    fn glyph(z: f64) -> (char, bool) {
        match z {
            z if z < 0.2 => ('@', true),
            z if z < 0.45 => ('*', false),
            z if z < 0.7 => ('+', false),
            _ => ('.', false),
        }
    }
}

impl Pattern for Starfield {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn on_resize(&mut self, size: Size) {
        let target = self.target_count(size);
        if target < self.stars.len() {
            self.stars.truncate(target);
        } else {
            let rng = &mut self.rng;
            let missing = target - self.stars.len();
            self.stars.extend((0..missing).map(|_| Self::spawn(rng)));
        }
    }

    fn tick(&mut self, renderer: &mut dyn Renderer, ctx: &FrameContext) {
        let size = renderer.size();
        let half_w = size.width() as f64 / 2.0;
        let half_h = size.height() as f64 / 2.0;
        let (cx, cy) = ctx
            .mouse
            .position
            .map(|(x, y)| (x as f64, y as f64))
            .unwrap_or((half_w, half_h));

        for star in self.stars.iter_mut() {
            star.z -= SPEED * ctx.time.dt;
            if star.z <= NEAR {
                *star = Self::spawn(&mut self.rng);
            }

            let sx = cx + star.x / star.z * half_w;
            let sy = cy + star.y / star.z * half_h;
            let (x, y) = (sx.round() as i64, sy.round() as i64);
            if size.position(x, y).is_none() {
                // left the screen; start over in the distance
                *star = Self::spawn(&mut self.rng);
                continue;
            }

            let brightness = 1.0 - star.z;
            let (c, bold) = Self::glyph(star.z);
            let mut cell = Cell::new(c).with_color(ctx.theme.color_at(brightness));
            if bold {
                cell = cell.with_bold(true);
            }
            renderer.set_cell(x, y, cell).ok();
        }
    }
}
