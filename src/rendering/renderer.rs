//! The `Renderer` trait and the terminal writer.
//!
//! *   [`Renderer`]: the only view of the current frame that patterns get. It lets them
//!     write cells and query the grid size, nothing else.
//! *   [`TerminalWriter`]: turns a change-list from
//!     [`DoubleBuffer::changes`](crate::rendering::buffer::DoubleBuffer::changes) into
//!     `crossterm` commands. It moves the cursor only when the next change is not right
//!     after the last printed cell, and only emits color or attribute changes when they
//!     actually differ from what the terminal currently has.
//! *   [`FrameBuf`]: a sink that buffers everything until an explicit flush, so one
//!     frame becomes one write to the terminal.

use crate::error::GridError;
use crate::rendering::buffer::Change;
use crate::rendering::cell::Cell;
use crate::rendering::color::Color;
use crate::rendering::display::Size;
use crossterm::queue;
use crossterm::style::{self, Attribute, Colors, SetAttribute, SetColors};
use std::io;
use std::io::{Stdout, Write, stdout};

/// Write access to the frame currently being built.
pub trait Renderer {
    /// Writes a cell at the given coordinates.
    ///
    /// Coordinates are signed so that callers can hand in whatever their math produced.
    /// Anything outside the grid is rejected with [`GridError::OutOfBounds`] and
    /// changes nothing.
    fn set_cell(&mut self, x: i64, y: i64, cell: Cell) -> Result<(), GridError>;

    /// The current grid size.
    fn size(&self) -> Size;
}

/// Writes change-lists to a terminal (or any other [`Write`] sink).
pub struct TerminalWriter<W: Write> {
    sink: W,
    /// Background used for cells without an explicit background.
    default_bg_color: Color,
    /// Where the terminal cursor is after the last print, if known.
    cursor: Option<(usize, usize)>,
    last_fg: Option<style::Color>,
    last_bg: Option<style::Color>,
    bold: bool,
    needs_clear: bool,
}

impl<W: Write> TerminalWriter<W> {
    /// Creates a writer. The first write clears the screen.
    pub fn new(sink: W, default_bg_color: Color) -> Self {
        Self {
            sink,
            default_bg_color,
            cursor: None,
            last_fg: None,
            last_bg: None,
            bold: false,
            needs_clear: true,
        }
    }

    /// Changes the background used for unstyled cells.
    ///
    /// Blank cells already on screen still carry the old background, so this
    /// invalidates the screen. The caller must also reset its buffer history.
    pub fn set_default_bg_color(&mut self, color: Color) {
        if color != self.default_bg_color {
            self.default_bg_color = color;
            self.invalidate();
        }
    }

    /// Forgets everything known about the terminal state; the next write starts by
    /// clearing the screen.
    pub fn invalidate(&mut self) {
        self.needs_clear = true;
        self.cursor = None;
        self.last_fg = None;
        self.last_bg = None;
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        let bg = style::Color::from(self.default_bg_color);
        queue!(
            self.sink,
            SetAttribute(Attribute::NormalIntensity),
            SetColors(Colors {
                foreground: Some(style::Color::Reset),
                background: Some(bg),
            }),
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )?;
        self.bold = false;
        self.last_fg = Some(style::Color::Reset);
        self.last_bg = Some(bg);
        self.cursor = None;
        self.needs_clear = false;
        Ok(())
    }

    /// Writes a row-major change-list and flushes the sink.
    pub fn write_changes(&mut self, changes: &[Change]) -> io::Result<()> {
        if self.needs_clear {
            self.clear_screen()?;
        }

        for change in changes {
            // Positions beyond u16 cannot be addressed; the grid size forbids them anyway.
            let (Ok(col), Ok(row)) = (u16::try_from(change.x), u16::try_from(change.y)) else {
                continue;
            };
            if self.cursor != Some((change.x, change.y)) {
                queue!(self.sink, crossterm::cursor::MoveTo(col, row))?;
            }
            self.apply_style(&change.cell)?;
            queue!(self.sink, style::Print(change.cell.c))?;
            self.cursor = Some((change.x + 1, change.y));
        }

        self.sink.flush()
    }

    fn apply_style(&mut self, cell: &Cell) -> io::Result<()> {
        let bold = cell.bold.unwrap_or(false);
        if bold != self.bold {
            let attribute = if bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(self.sink, SetAttribute(attribute))?;
            self.bold = bold;
        }

        let fg = cell.color.map_or(style::Color::Reset, style::Color::from);
        let bg = style::Color::from(cell.bg_color.unwrap_or(self.default_bg_color));
        let colors = Colors {
            foreground: (self.last_fg != Some(fg)).then_some(fg),
            background: (self.last_bg != Some(bg)).then_some(bg),
        };
        if colors.foreground.is_some() || colors.background.is_some() {
            queue!(self.sink, SetColors(colors))?;
            self.last_fg = Some(fg);
            self.last_bg = Some(bg);
        }
        Ok(())
    }
}

/// Buffered sink that _only_ writes through on an explicit flush.
///
/// One frame's worth of escape sequences goes out in a single write.
pub struct FrameBuf<W: Write = Stdout> {
    buf: Vec<u8>,
    inner: W,
}

impl FrameBuf<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> FrameBuf<W> {
    pub fn new(inner: W) -> Self {
        Self {
            buf: Vec::with_capacity(16 * 1024),
            inner,
        }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<W: Write> Write for FrameBuf<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.write_all(&self.buf)?;
        self.inner.flush()?;
        self.buf.clear();
        Ok(())
    }
}
