use embassy_time::Duration;

use super::{Animation, Step, fill};
use crate::color::{BLACK, Rgb, WHITE, rgb_from_u32};

const FLASHES: usize = 4;
const FLASH_DURATION: Duration = Duration::from_millis(100);
const BURST_DURATION: Duration = Duration::from_millis(200);
const BURST: [Rgb; 4] = [
    rgb_from_u32(0xFF_00_00),
    rgb_from_u32(0x00_FF_00),
    rgb_from_u32(0x00_00_FF),
    rgb_from_u32(0xFF_FF_00),
];

/// White strobe, a short burst of primaries, then the base color.
#[derive(Debug, Clone)]
pub struct FlashBurstAnimation {
    settle: Rgb,
    frame: usize,
}

impl FlashBurstAnimation {
    pub const fn new(settle: Rgb) -> Self {
        Self { settle, frame: 0 }
    }
}

impl Animation for FlashBurstAnimation {
    fn render(&mut self, leds: &mut [Rgb]) -> Step {
        let frame = self.frame;
        self.frame += 1;

        if frame < FLASHES * 2 {
            let color = if frame.is_multiple_of(2) { WHITE } else { BLACK };
            fill(leds, color);
            return Step::Hold(FLASH_DURATION);
        }

        match BURST.get(frame - FLASHES * 2) {
            Some(&color) => {
                fill(leds, color);
                Step::Hold(BURST_DURATION)
            }
            None => {
                fill(leds, self.settle);
                Step::Settled
            }
        }
    }
}
