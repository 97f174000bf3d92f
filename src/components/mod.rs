//! Input handling and frame pacing used by the render loop.
//!
//! *   [`keyboard`]: maps key presses to [`Command`](keyboard::Command)s.
//! *   [`mouse`]: tracks cursor, button and drag state between ticks.
//! *   [`pacing`]: keeps the loop at its target frame rate.

pub mod keyboard;
pub mod mouse;
pub mod pacing;
