//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Fixed-period pacing with drift correction.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(Duration::from_millis(40));
///
/// loop {
///     render();
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    next_frame: Instant,
    frame_duration: Duration,
}

impl FrameScheduler {
    pub const fn new(frame_duration: Duration) -> Self {
        Self {
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Mark a frame as done at `now` and return timing for the next one.
    ///
    /// Falling more than two frames behind skips the backlog instead of
    /// catching up in a burst. A deadline more than one frame ahead of
    /// `now` means the clock went backwards, and pacing restarts from `now`.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        let behind = now
            .checked_duration_since(self.next_frame)
            .is_some_and(|lag| lag > max_drift);
        let ahead = self
            .next_frame
            .checked_duration_since(now)
            .is_some_and(|lead| lead > self.frame_duration);
        if behind || ahead {
            self.next_frame = now;
        }

        self.next_frame += self.frame_duration;

        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_millis(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }
}
