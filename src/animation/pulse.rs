use embassy_time::Duration;

use super::{Animation, Step, fill};
use crate::color::{Rgb, scale_percent};

/// Intensity envelope over a base color.
///
/// The level climbs from 0 to 100 in `step` increments and then falls
/// back, visiting both ends twice. Each level maps to an intensity of
/// `floor + (100 - floor) * level / 100` percent.
#[derive(Debug, Clone)]
pub struct PulseAnimation {
    base: Rgb,
    /// Lowest intensity, percent
    floor: u8,
    /// Level increment per frame
    step: u8,
    interval: Duration,
    /// Position within the up-then-down sequence
    index: u16,
}

impl PulseAnimation {
    pub const fn new(base: Rgb, floor: u8, step: u8, interval: Duration) -> Self {
        Self {
            base,
            floor,
            step,
            interval,
            index: 0,
        }
    }

    /// Fast full-depth pulse
    pub const fn pulse(base: Rgb) -> Self {
        Self::new(base, 0, 5, Duration::from_millis(30))
    }

    /// Slow pulse that keeps 30% intensity at the bottom
    pub const fn breathing(base: Rgb) -> Self {
        Self::new(base, 30, 2, Duration::from_millis(50))
    }

    /// Levels per half of the envelope, both ends included
    fn half_len(&self) -> u16 {
        100 / u16::from(self.step.max(1)) + 1
    }

    fn level(&self) -> u16 {
        let half = self.half_len();
        let step = u16::from(self.step.max(1));
        if self.index < half {
            self.index * step
        } else {
            100 - (self.index - half) * step
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn intensity(&self) -> u8 {
        let floor = u16::from(self.floor.min(100));
        (floor + (100 - floor) * self.level() / 100) as u8
    }
}

impl Animation for PulseAnimation {
    fn render(&mut self, leds: &mut [Rgb]) -> Step {
        fill(leds, scale_percent(self.base, self.intensity()));
        self.index = (self.index + 1) % (self.half_len() * 2);
        Step::Hold(self.interval)
    }
}
