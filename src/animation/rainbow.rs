use embassy_time::Duration;

use super::{Animation, Step};
use crate::color::{Rgb, wheel};

const TICK: Duration = Duration::from_millis(50);
const HUE_STEP: u8 = 2;

/// Color wheel spread evenly over the strip, rotating every tick.
#[derive(Debug, Clone, Default)]
pub struct RainbowAnimation {
    /// Wheel offset, wraps at 256
    offset: u8,
}

impl RainbowAnimation {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }
}

impl Animation for RainbowAnimation {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, leds: &mut [Rgb]) -> Step {
        let count = leds.len().max(1);
        for (i, led) in leds.iter_mut().enumerate() {
            let spread = i * 256 / count;
            let pos = (spread + usize::from(self.offset)) % 256;
            *led = wheel(pos as u8);
        }
        self.offset = self.offset.wrapping_add(HUE_STEP);
        Step::Hold(TICK)
    }
}
