//! The double buffer and its diffing.
//!
//! [`DoubleBuffer`] owns exactly two [`Display<Cell>`] generations:
//!
//! *   `current`: the frame being built this tick. Patterns write into it through
//!     [`Renderer::set_cell`].
//! *   `previous`: the frame that was last handed to the terminal.
//!
//! [`DoubleBuffer::changes`] compares the two and returns every cell that differs, in
//! row-major order. [`DoubleBuffer::swap`] then moves `current` into `previous` and
//! installs a freshly allocated blank `current`, so nothing written two frames ago can
//! leak into the next diff.
//!
//! A frame therefore looks like this:
//!
//! ```rust
//! use asciiwave::rendering::buffer::DoubleBuffer;
//! use asciiwave::rendering::cell::Cell;
//! use asciiwave::rendering::display::Size;
//!
//! let mut buffer = DoubleBuffer::new(Size::new(80, 24));
//!
//! buffer.clear();
//! buffer.set_cell(3, 1, Cell::new('*')).ok();
//! let changes = buffer.changes();
//! assert_eq!(changes.len(), 1);
//! // ... hand `changes` to the terminal writer ...
//! buffer.swap();
//! ```

use crate::error::GridError;
use crate::rendering::cell::Cell;
use crate::rendering::display::{Display, Size};
use crate::rendering::renderer::Renderer;

/// One entry of a change-list: the cell now expected at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    pub x: usize,
    pub y: usize,
    pub cell: Cell,
}

impl Change {
    pub fn new(x: usize, y: usize, cell: Cell) -> Self {
        Self { x, y, cell }
    }
}

/// Two grid generations and the diff between them.
#[derive(Debug)]
pub struct DoubleBuffer {
    size: Size,
    current: Display<Cell>,
    previous: Display<Cell>,
    /// Out-of-bounds writes since the last swap or resize.
    rejected_writes: usize,
}

impl DoubleBuffer {
    /// Creates a buffer pair of the given size, both generations blank.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            current: Display::new(size, Cell::blank()),
            previous: Display::new(size, Cell::blank()),
            rejected_writes: 0,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Reallocates both generations at `size`, every cell blank.
    ///
    /// This always reallocates, even if `size` is unchanged, so it also serves as the
    /// "forget history and repaint everything" primitive. Both generations are built
    /// before any field changes.
    pub fn resize(&mut self, size: Size) {
        let current = Display::new(size, Cell::blank());
        let previous = Display::new(size, Cell::blank());
        self.size = size;
        self.current = current;
        self.previous = previous;
        self.rejected_writes = 0;
    }

    /// Validates signed dimensions, then [`resize`](Self::resize)s.
    ///
    /// On [`GridError::InvalidSize`] both generations are left exactly as they were.
    pub fn try_resize(&mut self, width: i64, height: i64) -> Result<(), GridError> {
        let size = Size::checked(width, height)?;
        self.resize(size);
        Ok(())
    }

    /// Resets every cell of the current generation to blank. The previous generation
    /// is untouched, so the next diff still reflects what is on screen.
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Writes `cell` into the current generation.
    ///
    /// Out-of-bounds coordinates are rejected with [`GridError::OutOfBounds`] and
    /// leave every cell untouched.
    pub fn set_cell(&mut self, x: i64, y: i64, cell: Cell) -> Result<(), GridError> {
        let res = self.current.set(x, y, cell);
        if res.is_err() {
            self.rejected_writes += 1;
        }
        res
    }

    /// Reads from the current generation, `None` if out of bounds.
    pub fn get_cell(&self, x: i64, y: i64) -> Option<&Cell> {
        self.current.get(x, y)
    }

    /// Reads from the previous generation, `None` if out of bounds.
    pub fn previous_cell(&self, x: i64, y: i64) -> Option<&Cell> {
        self.previous.get(x, y)
    }

    /// Every coordinate whose current cell differs from its previous cell, row-major.
    ///
    /// This is a pure query: calling it repeatedly without writes or a swap returns
    /// the same list.
    pub fn changes(&self) -> Vec<Change> {
        let width = self.size.width();
        self.current
            .as_slice()
            .iter()
            .zip(self.previous.as_slice())
            .enumerate()
            .filter(|(_, (now, before))| now != before)
            .map(|(idx, (now, _))| Change::new(idx % width, idx / width, *now))
            .collect()
    }

    /// Promotes the current generation to previous and installs a fresh blank current.
    pub fn swap(&mut self) {
        let fresh = Display::new(self.size, Cell::blank());
        self.previous = std::mem::replace(&mut self.current, fresh);
        self.rejected_writes = 0;
    }

    /// Number of out-of-bounds writes since the last swap or resize.
    pub fn rejected_writes(&self) -> usize {
        self.rejected_writes
    }
}

impl Renderer for DoubleBuffer {
    fn set_cell(&mut self, x: i64, y: i64, cell: Cell) -> Result<(), GridError> {
        DoubleBuffer::set_cell(self, x, y, cell)
    }

    fn size(&self) -> Size {
        self.size
    }
}
