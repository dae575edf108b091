use embassy_time::Duration;

use crate::color::{Rgb, blend_colors};
use crate::math8::progress8;

/// Blends two values of type `T` using a progress value (0-255)
pub type ValueBlender<T> = fn(T, T, u8) -> T;

/// Linear fade between two values in a fixed number of discrete steps.
///
/// Step `i` of `n` yields the blend at `i / n`, so the target itself is
/// never produced by [`SteppedTransition::next_value`]; callers settle on
/// [`SteppedTransition::target`] once the steps run out.
#[derive(Debug, Clone)]
pub struct SteppedTransition<T: Copy> {
    /// Blender function
    blend: ValueBlender<T>,
    /// Value at the start of transition
    source: T,
    /// Value reached after the last step
    target: T,
    /// Number of intermediate steps
    steps: u32,
    /// Index of the next step to produce
    step: u32,
    /// Total transition duration
    duration: Duration,
}

impl<T: Copy> SteppedTransition<T> {
    /// Create a new stepped transition
    pub const fn new(
        source: T,
        target: T,
        steps: u32,
        duration: Duration,
        blend: ValueBlender<T>,
    ) -> Self {
        Self {
            blend,
            source,
            target,
            steps,
            step: 0,
            duration,
        }
    }

    /// Time each intermediate value stays visible
    pub fn step_duration(&self) -> Duration {
        if self.steps == 0 {
            return Duration::from_millis(0);
        }
        self.duration / self.steps
    }

    /// Final value of the transition
    pub const fn target(&self) -> T {
        self.target
    }

    /// Check if every intermediate step has been produced
    pub const fn is_finished(&self) -> bool {
        self.step >= self.steps
    }

    /// Produce the next intermediate value, or `None` once finished.
    pub fn next_value(&mut self) -> Option<T> {
        if self.is_finished() {
            return None;
        }
        let elapsed = self.step_duration() * self.step;
        let progress = progress8(elapsed, self.duration);
        self.step += 1;
        Some((self.blend)(self.source, self.target, progress))
    }
}

impl SteppedTransition<Rgb> {
    /// Create a new rgb transition
    pub const fn new_rgb(source: Rgb, target: Rgb, steps: u32, duration: Duration) -> Self {
        Self::new(source, target, steps, duration, blend_colors)
    }
}
