//! 2D grid snapshots.
//!
//! A [`Display`] is one frame generation: a rectangular grid with a fixed [`Size`],
//! stored row-major in a single `Vec`. It is generic over its element type, but the
//! double buffer only ever stores [`Cell`]s in it.
//!
//! Every access takes signed coordinates and is bounds-checked against both axes,
//! so a coordinate like `(width, 0)` never aliases `(0, 1)`.
//!
//! [`Cell`]: crate::rendering::cell::Cell

use crate::error::GridError;
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Dimensions of a grid in cells.
///
/// Each dimension is at most [`Size::MAX_DIMENSION`], so every `Size` can be allocated
/// without the area overflowing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    width: u16,
    height: u16,
}

impl Size {
    /// Largest accepted value for either dimension. Terminal cursor addressing is `u16`.
    pub const MAX_DIMENSION: i64 = u16::MAX as i64;

    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn width(&self) -> usize {
        self.width as usize
    }

    pub const fn height(&self) -> usize {
        self.height as usize
    }

    /// Builds a size from untrusted signed dimensions.
    ///
    /// ```rust
    /// use asciiwave::error::GridError;
    /// use asciiwave::rendering::display::Size;
    ///
    /// assert_eq!(Size::checked(80, 24), Ok(Size::new(80, 24)));
    /// assert_eq!(Size::checked(0, 0), Ok(Size::new(0, 0)));
    /// assert_eq!(
    ///     Size::checked(-1, 24),
    ///     Err(GridError::InvalidSize { width: -1, height: 24 })
    /// );
    /// ```
    pub fn checked(width: i64, height: i64) -> Result<Self, GridError> {
        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Self::new(w, h)),
            _ => Err(GridError::InvalidSize { width, height }),
        }
    }

    /// Number of cells in a grid of this size.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Converts signed coordinates into an in-bounds position, or `None`.
    #[inline]
    pub fn position(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width() && y < self.height()).then_some((x, y))
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// A 2D grid of values with a fixed size.
///
/// # Example
///
/// ```rust
/// use asciiwave::rendering::cell::Cell;
/// use asciiwave::rendering::display::{Display, Size};
///
/// let mut display = Display::new(Size::new(10, 5), Cell::blank());
/// assert!(display.set(2, 3, Cell::new('X')).is_ok());
/// assert_eq!(display.get(2, 3), Some(&Cell::new('X')));
/// assert_eq!(display.get(10, 0), None);
/// assert!(display.set(-1, 0, Cell::new('X')).is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Display<T> {
    size: Size,
    default: T,
    cells: Vec<T>,
}

impl<T: Debug> Debug for Display<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Display {{ width: {}, height: {}, cells: {:?} }}",
            self.size.width(),
            self.size.height(),
            self.cells
        )
    }
}

impl<T: Clone> Display<T> {
    /// Creates a display of the given size with every position set to `default`.
    pub fn new(size: Size, default: T) -> Self {
        Self {
            size,
            cells: vec![default.clone(); size.area()],
            default,
        }
    }

    /// Resets every position to the default value.
    pub fn clear(&mut self) {
        self.fill(self.default.clone());
    }

    /// Sets every position to `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Display<T> {
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        self.size
            .position(x, y)
            .map(|(x, y)| y * self.size.width() + x)
    }

    /// Gets the value at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: i64, y: i64) -> Option<&T> {
        self.index_of(x, y).map(|idx| &self.cells[idx])
    }

    /// Gets a mutable reference to the value at `(x, y)`, or `None` if out of bounds.
    pub fn get_mut(&mut self, x: i64, y: i64) -> Option<&mut T> {
        let idx = self.index_of(x, y)?;
        Some(&mut self.cells[idx])
    }

    /// Writes `value` at `(x, y)`. Out-of-bounds writes leave the display untouched.
    pub fn set(&mut self, x: i64, y: i64, value: T) -> Result<(), GridError> {
        let slot = self.get_mut(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        *slot = value;
        Ok(())
    }

    /// All values in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterates over `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.size.width();
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| (idx % width, idx / width, value))
    }
}
