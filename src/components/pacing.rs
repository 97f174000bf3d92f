//! Frame pacing.
//!
//! The [`FramePacer`] turns a target FPS into a fixed frame interval and sleeps away
//! whatever is left of it after a tick. Oversleep from the previous frame is subtracted
//! from the next sleep. A tick that overruns its interval is not made up for; the next
//! tick simply sees a larger `dt`.

use std::time::{Duration, Instant};

/// Timing of one tick, as handed to patterns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateInfo {
    /// Seconds since the render loop started.
    pub elapsed: f64,
    /// Seconds since the previous tick started.
    pub dt: f64,
    /// Number of ticks before this one.
    pub tick: u64,
}

/// Keeps the render loop at a target frame rate.
#[derive(Debug)]
pub struct FramePacer {
    fps: u32,
    started: Instant,
    frame_start: Instant,
    last_frame_start: Instant,
    /// How much longer the last sleep took than requested.
    last_overhead: Duration,
    tick: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        Self {
            fps: fps.max(1),
            started: now,
            frame_start: now,
            last_frame_start: now,
            last_overhead: Duration::ZERO,
            tick: 0,
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.max(1);
    }

    /// Length of one frame at the current target.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }

    /// Timing information for the tick that is about to run.
    pub fn update_info(&self) -> UpdateInfo {
        UpdateInfo {
            elapsed: self.frame_start.duration_since(self.started).as_secs_f64(),
            dt: self
                .frame_start
                .duration_since(self.last_frame_start)
                .as_secs_f64(),
            tick: self.tick,
        }
    }

    /// Time left in the current frame, minus last frame's oversleep. Zero on overrun.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval()
            .saturating_sub(now.duration_since(self.frame_start))
            .saturating_sub(self.last_overhead)
    }

    /// Returns `true` if the current tick has already used up its whole interval.
    pub fn overran(&self, now: Instant) -> bool {
        now.duration_since(self.frame_start) > self.interval()
    }

    /// Sleeps until the next frame is due and starts it.
    pub fn wait(&mut self) {
        let before = Instant::now();
        let remaining = self.remaining(before);
        std::thread::sleep(remaining);
        let after = Instant::now();
        self.last_overhead = after.duration_since(before).saturating_sub(remaining);
        self.advance(after);
    }

    /// Starts the next frame at `now` without sleeping.
    pub fn advance(&mut self, now: Instant) {
        self.last_frame_start = self.frame_start;
        self.frame_start = now;
        self.tick += 1;
    }
}
