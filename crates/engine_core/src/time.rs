//! Frame timing for the game loop.

use std::time::{Duration, Instant};

/// Longest frame delta handed to gameplay. Stalls (window drags, debugger
/// breaks) are clamped so pacing timers don't jump ahead.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Measures the time between frames.
#[derive(Debug)]
pub struct Time {
    /// Time when the loop started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Clamped duration of the last frame.
    delta: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta = now.saturating_duration_since(self.last_frame).min(MAX_FRAME_DELTA);
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Delta time of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Total wall time since start in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.last_frame.duration_since(self.start_time).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
