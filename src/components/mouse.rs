//! Mouse tracking.
//!
//! The [`MouseTracker`] consumes raw `crossterm` mouse events as they arrive and, once
//! per tick, hands out a [`MouseInfo`] snapshot for the patterns.

use crate::util::Line;
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use smallvec::SmallVec;

/// Interpolated cursor positions covered by a drag during one tick.
pub type DragPath = SmallVec<[(i64, i64); 32]>;

/// What the mouse did since the last tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MouseInfo {
    /// Last known cursor position, if the mouse has been seen at all.
    pub position: Option<(i64, i64)>,
    /// Is the left button currently held?
    pub left_down: bool,
    /// Was the left button pressed since the last tick? Sticky for the whole tick,
    /// even if it was released again.
    pub pressed: bool,
    /// Every cell the cursor crossed while the left button was held, in order,
    /// with gaps between reported events filled in.
    pub drag_path: DragPath,
}

/// Accumulates mouse events between ticks.
#[derive(Debug, Default)]
pub struct MouseTracker {
    position: Option<(i64, i64)>,
    left_down: bool,
    pressed: bool,
    drag_path: DragPath,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds an event. Non-mouse events are ignored.
    pub fn on_event(&mut self, event: &Event) {
        let Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) = event
        else {
            return;
        };
        let pos = (*column as i64, *row as i64);

        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.left_down = true;
                self.pressed = true;
                self.drag_path.push(pos);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.left_down = false;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let from = self.drag_path.last().copied().or(self.position).unwrap_or(pos);
                // skip the start, it was pushed by the previous event
                let skip = usize::from(!self.drag_path.is_empty());
                self.drag_path.extend(Line::new(from, pos).skip(skip));
                self.left_down = true;
            }
            _ => {}
        }
        self.position = Some(pos);
    }

    /// Returns everything seen since the last call and starts a new tick.
    pub fn take_frame(&mut self) -> MouseInfo {
        MouseInfo {
            position: self.position,
            left_down: self.left_down,
            pressed: std::mem::take(&mut self.pressed),
            drag_path: std::mem::take(&mut self.drag_path),
        }
    }
}
