//! Animated patterns.
//!
//! A [`Pattern`] is a small simulation that, once per tick, writes cells into the
//! current frame through a [`Renderer`]. Patterns know nothing about the previous
//! frame or about diffing; they just draw everything they want visible this tick onto
//! a blank grid.
//!
//! | name        | what it draws                                             |
//! |-------------|-----------------------------------------------------------|
//! | `waves`     | layered sine fields; clicks start ripples                 |
//! | `starfield` | stars flying at the viewer; the mouse moves the center    |
//! | `matrix`    | falling glyph streams                                     |
//! | `particles` | a fountain; clicks and drags spawn bursts                 |

use crate::components::mouse::MouseInfo;
use crate::components::pacing::UpdateInfo;
use crate::config::Quality;
use crate::error::{Error, Result};
use crate::rendering::display::Size;
use crate::rendering::renderer::Renderer;
use crate::seeds::Seeds;
use crate::theme::Theme;

pub mod matrix;
pub mod particles;
pub mod starfield;
pub mod waves;

/// Names accepted by [`by_name`], in cycling order. The first one is the default.
pub const PATTERN_NAMES: &[&str] = &["waves", "starfield", "matrix", "particles"];

/// Characters from sparse to dense, indexed by intensity.
const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Everything a pattern may look at during a tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    pub time: UpdateInfo,
    pub theme: &'a Theme,
    pub quality: Quality,
    pub mouse: &'a MouseInfo,
}

/// An animated pattern.
pub trait Pattern {
    /// The name this pattern is selected by.
    fn name(&self) -> &'static str;

    /// Called when the grid size changes. The renderer already has the new size.
    fn on_resize(&mut self, size: Size) {
        let _ = size;
    }

    /// Advances the simulation by `ctx.time.dt` and draws the result.
    fn tick(&mut self, renderer: &mut dyn Renderer, ctx: &FrameContext);
}

/// Builds the pattern called `name` for a grid of `size`.
pub fn by_name(name: &str, size: Size, quality: Quality, seeds: &Seeds) -> Result<Box<dyn Pattern>> {
    let pattern: Box<dyn Pattern> = match name.to_ascii_lowercase().as_str() {
        "waves" => Box::new(waves::Waves::new(quality)),
        "starfield" => Box::new(starfield::Starfield::new(size, quality, seeds)),
        "matrix" => Box::new(matrix::MatrixRain::new(size, quality, seeds)),
        "particles" => Box::new(particles::Particles::new(size, quality, seeds)),
        _ => return Err(Error::UnknownPattern(name.to_string())),
    };
    Ok(pattern)
}

/// The pattern after `name` in [`PATTERN_NAMES`], wrapping around.
pub fn next_name(name: &str) -> &'static str {
    let idx = PATTERN_NAMES.iter().position(|n| *n == name).unwrap_or(0);
    PATTERN_NAMES[(idx + 1) % PATTERN_NAMES.len()]
}

/// Density character for an intensity in `[0, 1]` (clamped).
pub fn ramp_char(intensity: f64) -> char {
    let t = if intensity.is_nan() { 0.0 } else { intensity.clamp(0.0, 1.0) };
    let idx = (t * (RAMP.len() - 1) as f64).round() as usize;
    RAMP[idx]
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for driving patterns in tests.

    use super::*;
    use crate::rendering::buffer::DoubleBuffer;

    pub fn update(tick: u64, dt: f64) -> UpdateInfo {
        UpdateInfo {
            elapsed: tick as f64 * dt,
            dt,
            tick,
        }
    }

    /// Runs `ticks` ticks on a fresh buffer, swapping in between, and returns the
    /// buffer holding the last frame in `current`.
    pub fn run(pattern: &mut dyn Pattern, size: Size, ticks: u64, mouse: &MouseInfo) -> DoubleBuffer {
        let mut buffer = DoubleBuffer::new(size);
        let theme = Theme::default();
        for tick in 0..ticks {
            if tick > 0 {
                buffer.swap();
            }
            let ctx = FrameContext {
                time: update(tick, 1.0 / 30.0),
                theme: &theme,
                quality: Quality::High,
                mouse,
            };
            pattern.tick(&mut buffer, &ctx);
        }
        buffer
    }

    pub fn non_blank(buffer: &DoubleBuffer) -> usize {
        let size = buffer.size();
        (0..size.height() as i64)
            .flat_map(|y| (0..size.width() as i64).map(move |x| (x, y)))
            .filter(|&(x, y)| buffer.get_cell(x, y).is_some_and(|c| !c.is_blank()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_builds() {
        let seeds = Seeds::new(1);
        for name in PATTERN_NAMES {
            let pattern = by_name(name, Size::new(20, 10), Quality::Low, &seeds).unwrap();
            assert_eq!(pattern.name(), *name);
        }
        assert!(matches!(
            by_name("lava", Size::new(1, 1), Quality::Low, &seeds),
            Err(Error::UnknownPattern(_))
        ));
    }

    #[test]
    fn test_next_name_cycles() {
        let mut name = PATTERN_NAMES[0];
        for _ in 0..PATTERN_NAMES.len() {
            name = next_name(name);
        }
        assert_eq!(name, PATTERN_NAMES[0]);
    }

    #[test]
    fn test_ramp() {
        assert_eq!(ramp_char(0.0), ' ');
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(5.0), '@');
        assert_eq!(ramp_char(f64::NAN), ' ');
    }

    #[test]
    fn test_patterns_survive_degenerate_sizes() {
        let seeds = Seeds::new(5);
        let mouse = MouseInfo {
            position: Some((-3, 500)),
            left_down: true,
            pressed: true,
            drag_path: [(0, 0), (-1, -1)].into_iter().collect(),
        };
        for name in PATTERN_NAMES {
            for size in [Size::new(0, 0), Size::new(1, 1), Size::new(0, 7), Size::new(3, 0)] {
                let mut pattern = by_name(name, size, Quality::High, &seeds).unwrap();
                testing::run(pattern.as_mut(), size, 5, &mouse);
            }
        }
    }

    #[test]
    fn test_patterns_follow_resizes() {
        let seeds = Seeds::new(8);
        let mouse = MouseInfo::default();
        for name in PATTERN_NAMES {
            let mut pattern = by_name(name, Size::new(40, 20), Quality::Medium, &seeds).unwrap();
            testing::run(pattern.as_mut(), Size::new(40, 20), 3, &mouse);
            pattern.on_resize(Size::new(10, 4));
            let buffer = testing::run(pattern.as_mut(), Size::new(10, 4), 3, &mouse);
            assert_eq!(buffer.size(), Size::new(10, 4));
        }
    }
}
