//! A particle fountain that reacts to clicks and drags.

use crate::config::Quality;
use crate::patterns::{FrameContext, Pattern};
use crate::rendering::cell::Cell;
use crate::rendering::display::Size;
use crate::rendering::renderer::Renderer;
use crate::seeds::Seeds;
use rand::Rng;
use rand::rngs::StdRng;

/// Cells per second squared, downwards.
const GRAVITY: f64 = 28.0;
/// Fountain particles per second at full density.
const EMIT_RATE: f64 = 90.0;
const BURST: usize = 40;
const PER_DRAG_CELL: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    life: f64,
    max_life: f64,
}

impl Particle {
    fn remaining(&self) -> f64 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

pub struct Particles {
    particles: Vec<Particle>,
    capacity: usize,
    density: f64,
    /// Fractional particles carried over between ticks.
    emit_debt: f64,
    rng: StdRng,
}

impl Particles {
    pub fn new(size: Size, quality: Quality, seeds: &Seeds) -> Self {
        let mut particles = Self {
            particles: Vec::new(),
            capacity: 0,
            density: quality.density(),
            emit_debt: 0.0,
            rng: seeds.rng_for("particles"),
        };
        particles.on_resize(size);
        particles
    }

    fn spawn(&mut self, x: f64, y: f64, speed: f64, upward: bool) {
        if self.particles.len() >= self.capacity {
            return;
        }
        let angle: f64 = if upward {
            self.rng.gen_range(-2.6..-0.55)
        } else {
            self.rng.gen_range(0.0..std::f64::consts::TAU)
        };
        let speed = speed * self.rng.gen_range(0.5..1.0);
        let max_life = self.rng.gen_range(1.0..2.5);
        self.particles.push(Particle {
            x,
            y,
            vx: angle.cos() * speed * 2.0,
            vy: angle.sin() * speed,
            life: max_life,
            max_life,
        });
    }

    fn glyph(remaining: f64) -> char {
        match remaining {
            r if r > 0.75 => '@',
            r if r > 0.5 => 'o',
            r if r > 0.25 => '*',
            _ => '.',
        }
    }
}

impl Pattern for Particles {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn on_resize(&mut self, size: Size) {
        self.capacity = ((size.area() as f64 * self.density / 3.0) as usize).max(16);
        self.particles.truncate(self.capacity);
    }

    fn tick(&mut self, renderer: &mut dyn Renderer, ctx: &FrameContext) {
        let size = renderer.size();
        let dt = ctx.time.dt;
        let (width, height) = (size.width() as f64, size.height() as f64);

        // fountain at the bottom center
        self.emit_debt += EMIT_RATE * self.density * dt;
        while self.emit_debt >= 1.0 {
            self.emit_debt -= 1.0;
            self.spawn(width / 2.0, height - 1.0, height.max(4.0) * 1.4, true);
        }

        if ctx.mouse.pressed {
            if let Some((x, y)) = ctx.mouse.position {
                for _ in 0..BURST {
                    self.spawn(x as f64, y as f64, 14.0, false);
                }
            }
        }
        for &(x, y) in &ctx.mouse.drag_path {
            for _ in 0..PER_DRAG_CELL {
                self.spawn(x as f64, y as f64, 8.0, false);
            }
        }

        for p in self.particles.iter_mut() {
            p.vy += GRAVITY * dt;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0 && p.y < height + 1.0);

        for p in &self.particles {
            let remaining = p.remaining();
            let cell = Cell::new(Self::glyph(remaining)).with_color(ctx.theme.color_at(remaining));
            // particles leaving through the sides are simply not drawn
            renderer.set_cell(p.x.round() as i64, p.y.round() as i64, cell).ok();
        }
    }
}
