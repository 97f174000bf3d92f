//! Cell representation for terminal rendering.
//!
//! A [`Cell`] is the content of one terminal character position: a character and
//! its optional foreground color, background color and boldness.
//!
//! Every styling field is an `Option`. An absent field means "use the terminal
//! writer's default", and is deliberately distinct from any explicit value, so
//! `bold: None` and `bold: Some(false)` are different cells.

use crate::rendering::color::Color;

/// A single character cell of the grid.
///
/// # Defaults
///
/// [`Cell::blank()`] (also the `Default`) is a space with no styling at all. Every
/// grid position starts out blank.
///
/// # Example
///
/// ```rust
/// use asciiwave::rendering::cell::Cell;
/// use asciiwave::rendering::color::Color;
///
/// let red_block = Cell::new('█').with_color(Color::new(255, 0, 0));
/// let heading = Cell::new('X')
///     .with_color(Color::new(0, 0, 255))
///     .with_bg_color(Color::new(255, 255, 0))
///     .with_bold(true);
///
/// assert_ne!(red_block, heading);
/// assert_ne!(Cell::new('a'), Cell::new('a').with_bold(false));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character to be displayed.
    pub c: char,
    /// The foreground color, if any.
    pub color: Option<Color>,
    /// The background color, if any.
    pub bg_color: Option<Color>,
    /// Explicit boldness, if any.
    pub bold: Option<bool>,
}

impl Cell {
    /// Creates an unstyled cell with the given character.
    pub const fn new(c: char) -> Self {
        Self {
            c,
            color: None,
            bg_color: None,
            bold: None,
        }
    }

    /// The blank cell every grid position holds after creation or clearing.
    pub const fn blank() -> Self {
        Self::new(' ')
    }

    /// Returns `true` if this cell is exactly [`Cell::blank()`].
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    pub fn with_color(self, color: Color) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    pub fn with_bg_color(self, bg_color: Color) -> Self {
        Self {
            bg_color: Some(bg_color),
            ..self
        }
    }

    pub fn with_bold(self, bold: bool) -> Self {
        Self {
            bold: Some(bold),
            ..self
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}
