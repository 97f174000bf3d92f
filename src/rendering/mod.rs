//! Frame buffers and terminal output.
//!
//! **Sub-modules:**
//!
//! *   [`color`]: the [`Color`](color::Color) type.
//! *   [`cell`]: [`Cell`](cell::Cell), the unit of diffing.
//! *   [`display`]: [`Display`](display::Display), one grid generation, and its [`Size`](display::Size).
//! *   [`buffer`]: [`DoubleBuffer`](buffer::DoubleBuffer), which owns two generations and diffs them.
//! *   [`renderer`]: the [`Renderer`](renderer::Renderer) trait patterns draw through, and the
//!     [`TerminalWriter`](renderer::TerminalWriter) that turns diffs into escape sequences.
//!
//! **Per tick:**
//!
//! 1.  `DoubleBuffer::clear()` blanks the current generation.
//! 2.  Patterns call `Renderer::set_cell()`.
//! 3.  `DoubleBuffer::changes()` lists every cell that differs from the previous generation.
//! 4.  `TerminalWriter::write_changes()` writes just those cells.
//! 5.  `DoubleBuffer::swap()` makes the current generation the previous one.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod display;
pub mod renderer;
