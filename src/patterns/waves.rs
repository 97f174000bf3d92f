//! Layered sine waves with mouse ripples.

use crate::config::Quality;
use crate::patterns::{FrameContext, Pattern, ramp_char};
use crate::rendering::cell::Cell;
use crate::rendering::renderer::Renderer;

/// Ripples older than this (seconds) are dropped.
const RIPPLE_LIFETIME: f64 = 4.0;
const MAX_RIPPLES: usize = 8;
/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Ripple {
    x: f64,
    y: f64,
    born: f64,
}

/// One sine component of the field.
#[derive(Clone, Copy, Debug)]
struct Octave {
    kx: f64,
    ky: f64,
    speed: f64,
    amplitude: f64,
}

const OCTAVES: [Octave; 3] = [
    Octave {
        kx: 0.12,
        ky: 0.35,
        speed: 1.1,
        amplitude: 1.0,
    },
    Octave {
        kx: -0.07,
        ky: 0.22,
        speed: 0.7,
        amplitude: 0.6,
    },
    Octave {
        kx: 0.31,
        ky: -0.11,
        speed: 1.9,
        amplitude: 0.3,
    },
];

pub struct Waves {
    octaves: usize,
    ripples: Vec<Ripple>,
}

impl Waves {
    pub fn new(quality: Quality) -> Self {
        Self {
            octaves: match quality {
                Quality::Low => 1,
                Quality::Medium => 2,
                Quality::High => 3,
            },
            ripples: Vec::new(),
        }
    }

    /// Field value at `(x, y)` and time `t`, normalized to `[0, 1]`.
    fn sample(&self, x: f64, y: f64, t: f64) -> f64 {
        let octaves = &OCTAVES[..self.octaves];
        let total: f64 = octaves.iter().map(|o| o.amplitude).sum();
        let mut value: f64 = octaves
            .iter()
            .map(|o| o.amplitude * (x * o.kx + y * o.ky + t * o.speed).sin())
            .sum::<f64>()
            / total;

        for ripple in &self.ripples {
            let age = t - ripple.born;
            let dx = x - ripple.x;
            let dy = (y - ripple.y) * CELL_ASPECT;
            let dist = (dx * dx + dy * dy).sqrt();
            let front = age * 18.0;
            // only the ring around the expanding front contributes
            let falloff = (-(dist - front).powi(2) / 20.0).exp() * (1.0 - age / RIPPLE_LIFETIME);
            value += (dist * 0.8 - age * 6.0).sin() * falloff;
        }

        ((value + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

impl Pattern for Waves {
    fn name(&self) -> &'static str {
        "waves"
    }

    fn tick(&mut self, renderer: &mut dyn Renderer, ctx: &FrameContext) {
        let t = ctx.time.elapsed;
        self.ripples.retain(|r| t - r.born < RIPPLE_LIFETIME);
        if ctx.mouse.pressed {
            if let Some((x, y)) = ctx.mouse.position {
                if self.ripples.len() == MAX_RIPPLES {
                    self.ripples.remove(0);
                }
                self.ripples.push(Ripple {
                    x: x as f64,
                    y: y as f64,
                    born: t,
                });
            }
        }

        let size = renderer.size();
        for y in 0..size.height() {
            for x in 0..size.width() {
                let intensity = self.sample(x as f64, y as f64, t);
                let c = ramp_char(intensity);
                if c == ' ' {
                    continue;
                }
                let cell = Cell::new(c).with_color(ctx.theme.color_at(intensity));
                renderer.set_cell(x as i64, y as i64, cell).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mouse::MouseInfo;
    use crate::patterns::testing;
    use crate::rendering::display::Size;

    #[test]
    fn test_sample_is_normalized() {
        let mut waves = Waves::new(Quality::High);
        waves.ripples.push(Ripple {
            x: 5.0,
            y: 5.0,
            born: 0.0,
        });
        for y in 0..20 {
            for x in 0..40 {
                let v = waves.sample(x as f64, y as f64, 0.4);
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_fills_the_grid_and_moves() {
        let mut waves = Waves::new(Quality::Medium);
        let size = Size::new(30, 10);
        let buffer = testing::run(&mut waves, size, 3, &MouseInfo::default());
        assert!(testing::non_blank(&buffer) > size.area() / 2);
        assert!(!buffer.changes().is_empty());
    }

    #[test]
    fn test_click_spawns_ripple_and_ripples_expire() {
        let mut waves = Waves::new(Quality::Low);
        let click = MouseInfo {
            position: Some((3, 3)),
            pressed: true,
            ..MouseInfo::default()
        };
        testing::run(&mut waves, Size::new(8, 8), 1, &click);
        assert_eq!(waves.ripples.len(), 1);

        for _ in 0..MAX_RIPPLES + 2 {
            testing::run(&mut waves, Size::new(8, 8), 1, &click);
        }
        assert_eq!(waves.ripples.len(), MAX_RIPPLES);

        let mut buffer = crate::rendering::buffer::DoubleBuffer::new(Size::new(8, 8));
        let theme = crate::theme::Theme::default();
        let ctx = FrameContext {
            time: testing::update(1000, 1.0),
            theme: &theme,
            quality: Quality::Low,
            mouse: &MouseInfo::default(),
        };
        waves.tick(&mut buffer, &ctx);
        assert!(waves.ripples.is_empty());
    }
}
