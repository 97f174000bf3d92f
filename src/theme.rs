//! Color themes.
//!
//! A [`Theme`] maps an intensity in `[0, 1]` to a color by interpolating along a small
//! gradient of stops. Patterns compute intensities; themes decide what they look like.

use crate::error::{Error, Result};
use crate::rendering::color::Color;

/// A named gradient plus the background it is drawn on.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    name: &'static str,
    stops: &'static [Color],
    background: Color,
}

const OCEAN: &[Color] = &[
    Color::new(2, 12, 40),
    Color::new(0, 70, 140),
    Color::new(0, 160, 200),
    Color::new(150, 235, 255),
];

const MATRIX: &[Color] = &[
    Color::new(0, 20, 0),
    Color::new(0, 110, 20),
    Color::new(40, 220, 70),
    Color::new(200, 255, 200),
];

const FIRE: &[Color] = &[
    Color::new(30, 0, 0),
    Color::new(170, 20, 0),
    Color::new(255, 120, 0),
    Color::new(255, 230, 120),
];

const SUNSET: &[Color] = &[
    Color::new(40, 10, 70),
    Color::new(170, 40, 120),
    Color::new(250, 110, 80),
    Color::new(255, 210, 120),
];

const MONO: &[Color] = &[Color::new(30, 30, 30), Color::new(240, 240, 240)];

/// All built-in themes, in cycling order.
pub const THEMES: &[Theme] = &[
    Theme::new("ocean", OCEAN, Color::new(0, 4, 16)),
    Theme::new("matrix", MATRIX, Color::BLACK),
    Theme::new("fire", FIRE, Color::new(8, 0, 0)),
    Theme::new("sunset", SUNSET, Color::new(16, 4, 24)),
    Theme::new("mono", MONO, Color::BLACK),
];

impl Theme {
    const fn new(name: &'static str, stops: &'static [Color], background: Color) -> Self {
        Self {
            name,
            stops,
            background,
        }
    }

    /// Looks up a built-in theme, ignoring case.
    pub fn by_name(name: &str) -> Result<Theme> {
        THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }

    /// The theme after this one in [`THEMES`], wrapping around.
    pub fn next(&self) -> Theme {
        let idx = THEMES.iter().position(|t| t.name == self.name).unwrap_or(0);
        THEMES[(idx + 1) % THEMES.len()].clone()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Maps `intensity` to a color. Input is clamped to `[0, 1]`; NaN counts as 0.
    ///
    /// ```rust
    /// use asciiwave::theme::Theme;
    ///
    /// let mono = Theme::by_name("mono").unwrap();
    /// assert_eq!(mono.color_at(0.0), mono.color_at(-1.0));
    /// assert_eq!(mono.color_at(1.0).r, 240);
    /// ```
    pub fn color_at(&self, intensity: f64) -> Color {
        let t = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        match self.stops {
            [] => Color::WHITE,
            [only] => *only,
            stops => {
                let segments = (stops.len() - 1) as f64;
                let scaled = t * segments;
                let idx = (scaled.floor() as usize).min(stops.len() - 2);
                stops[idx].lerp(stops[idx + 1], scaled - idx as f64)
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_hit_first_and_last_stop() {
        for theme in THEMES {
            assert_eq!(theme.color_at(0.0), theme.stops[0]);
            assert_eq!(theme.color_at(1.0), *theme.stops.last().unwrap());
            assert_eq!(theme.color_at(2.0), theme.color_at(1.0));
            assert_eq!(theme.color_at(f64::NAN), theme.color_at(0.0));
        }
    }

    #[test]
    fn test_interior_stops_are_hit_exactly() {
        let ocean = Theme::by_name("ocean").unwrap();
        assert_eq!(ocean.color_at(1.0 / 3.0), OCEAN[1]);
        assert_eq!(ocean.color_at(2.0 / 3.0), OCEAN[2]);
    }

    #[test]
    fn test_midpoint_of_two_stops() {
        let mono = Theme::by_name("MONO").unwrap();
        assert_eq!(mono.color_at(0.5), Color::new(135, 135, 135));
    }

    #[test]
    fn test_lookup_and_cycle() {
        assert!(matches!(
            Theme::by_name("plaid"),
            Err(Error::UnknownTheme(name)) if name == "plaid"
        ));
        let mut theme = Theme::default();
        for _ in 0..THEMES.len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::default());
    }
}
