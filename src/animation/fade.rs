use embassy_time::Duration;

use super::{Animation, Step, fill};
use crate::{color::Rgb, transition::SteppedTransition};

const FADE_STEPS: u32 = 30;
const FADE_DURATION: Duration = Duration::from_millis(1000);

/// Linear fade from the shown color to a target, then hold the target.
#[derive(Debug, Clone)]
pub struct FadeAnimation {
    color: SteppedTransition<Rgb>,
}

impl FadeAnimation {
    pub const fn new(from: Rgb, to: Rgb) -> Self {
        Self {
            color: SteppedTransition::new_rgb(from, to, FADE_STEPS, FADE_DURATION),
        }
    }
}

impl Animation for FadeAnimation {
    fn render(&mut self, leds: &mut [Rgb]) -> Step {
        match self.color.next_value() {
            Some(color) => {
                fill(leds, color);
                Step::Hold(self.color.step_duration())
            }
            None => {
                fill(leds, self.color.target());
                Step::Settled
            }
        }
    }
}
