//! LED animations with compile-time known variants
//!
//! All animations are stored in an enum to avoid boxing.
//! Each animation implements the `Animation` trait and renders one frame
//! per call, reporting how long the frame should stay on the strip.

mod alternate;
mod fade;
mod flash_burst;
mod pulse;
mod rainbow;

pub use alternate::AlternateAnimation;
use embassy_time::Duration;
pub use fade::FadeAnimation;
pub use flash_burst::FlashBurstAnimation;
pub use pulse::PulseAnimation;
pub use rainbow::RainbowAnimation;

use crate::color::Rgb;

const ANIMATION_NAME_TRANSITION: &str = "transition";
const ANIMATION_NAME_ALTERNATE: &str = "alternate";
const ANIMATION_NAME_RAINBOW: &str = "rainbow";
const ANIMATION_NAME_FLASH_BURST: &str = "flash_burst";
const ANIMATION_NAME_PULSE: &str = "pulse";
const ANIMATION_NAME_BREATHING: &str = "breathing";

/// Outcome of rendering one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep the frame up for the given time, then render again
    Hold(Duration),
    /// The frame is the terminal state; the animation is over
    Settled,
}

pub trait Animation {
    /// Render the next frame into `leds`
    fn render(&mut self, leds: &mut [Rgb]) -> Step;
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone)]
pub enum AnimationSlot {
    /// Stepped linear fade to a target color
    Transition(FadeAnimation),
    /// Two colors toggling on a fixed interval
    Alternate(AlternateAnimation),
    /// Hue wheel spread across the strip and rotating
    Rainbow(RainbowAnimation),
    /// White flashes, a color burst, then the base color
    FlashBurst(FlashBurstAnimation),
    /// Intensity ramp from dark to full and back
    Pulse(PulseAnimation),
    /// Slow intensity ramp that never goes fully dark
    Breathing(PulseAnimation),
}

/// Known animation ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationId {
    Transition,
    Alternate,
    Rainbow,
    FlashBurst,
    Pulse,
    Breathing,
}

impl AnimationId {
    pub const ALL: [Self; 6] = [
        Self::Transition,
        Self::Alternate,
        Self::Rainbow,
        Self::FlashBurst,
        Self::Pulse,
        Self::Breathing,
    ];

    /// Build the animation for a mood.
    ///
    /// `from` is the color the strip currently shows and only matters
    /// for the transition.
    pub fn to_slot(self, color: Rgb, from: Rgb) -> AnimationSlot {
        match self {
            Self::Transition => AnimationSlot::Transition(FadeAnimation::new(from, color)),
            Self::Alternate => AnimationSlot::Alternate(AlternateAnimation::new(color)),
            Self::Rainbow => AnimationSlot::Rainbow(RainbowAnimation::new()),
            Self::FlashBurst => AnimationSlot::FlashBurst(FlashBurstAnimation::new(color)),
            Self::Pulse => AnimationSlot::Pulse(PulseAnimation::pulse(color)),
            Self::Breathing => AnimationSlot::Breathing(PulseAnimation::breathing(color)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transition => ANIMATION_NAME_TRANSITION,
            Self::Alternate => ANIMATION_NAME_ALTERNATE,
            Self::Rainbow => ANIMATION_NAME_RAINBOW,
            Self::FlashBurst => ANIMATION_NAME_FLASH_BURST,
            Self::Pulse => ANIMATION_NAME_PULSE,
            Self::Breathing => ANIMATION_NAME_BREATHING,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ANIMATION_NAME_TRANSITION => Some(Self::Transition),
            ANIMATION_NAME_ALTERNATE => Some(Self::Alternate),
            ANIMATION_NAME_RAINBOW => Some(Self::Rainbow),
            ANIMATION_NAME_FLASH_BURST => Some(Self::FlashBurst),
            ANIMATION_NAME_PULSE => Some(Self::Pulse),
            ANIMATION_NAME_BREATHING => Some(Self::Breathing),
            _ => None,
        }
    }
}

impl AnimationSlot {
    /// Render the current animation
    pub fn render(&mut self, leds: &mut [Rgb]) -> Step {
        match self {
            Self::Transition(animation) => animation.render(leds),
            Self::Alternate(animation) => animation.render(leds),
            Self::Rainbow(animation) => animation.render(leds),
            Self::FlashBurst(animation) => animation.render(leds),
            Self::Pulse(animation) | Self::Breathing(animation) => animation.render(leds),
        }
    }

    /// Get the animation ID for external observation
    pub fn id(&self) -> AnimationId {
        match self {
            Self::Transition(_) => AnimationId::Transition,
            Self::Alternate(_) => AnimationId::Alternate,
            Self::Rainbow(_) => AnimationId::Rainbow,
            Self::FlashBurst(_) => AnimationId::FlashBurst,
            Self::Pulse(_) => AnimationId::Pulse,
            Self::Breathing(_) => AnimationId::Breathing,
        }
    }
}

/// Paint every cell with the same color
pub(crate) fn fill(leds: &mut [Rgb], color: Rgb) {
    leds.fill(color);
}
