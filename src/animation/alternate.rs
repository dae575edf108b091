use embassy_time::Duration;

use super::{Animation, Step, fill};
use crate::color::Rgb;

/// Pale lavender paired with the base color
const SECONDARY: Rgb = Rgb {
    r: 200,
    g: 200,
    b: 255,
};
const INTERVAL: Duration = Duration::from_millis(800);

#[derive(Debug, Clone)]
pub struct AlternateAnimation {
    colors: [Rgb; 2],
    index: usize,
}

impl AlternateAnimation {
    pub const fn new(base: Rgb) -> Self {
        Self {
            colors: [base, SECONDARY],
            index: 0,
        }
    }
}

impl Animation for AlternateAnimation {
    fn render(&mut self, leds: &mut [Rgb]) -> Step {
        fill(leds, self.colors[self.index]);
        self.index = (self.index + 1) % self.colors.len();
        Step::Hold(INTERVAL)
    }
}
