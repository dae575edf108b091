//! Emotion label to LED behavior table

use crate::{
    animation::AnimationId,
    color::{Rgb, rgb_from_u32},
};

/// Label every unknown or empty input resolves to
pub const FALLBACK_MOOD: &str = "neutral";

/// One row of the emotion table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mood {
    pub name: &'static str,
    pub color: Rgb,
    /// Animation played instead of the default fade
    pub animation: Option<AnimationId>,
}

impl Mood {
    const fn fade(name: &'static str, color: u32) -> Self {
        Self {
            name,
            color: rgb_from_u32(color),
            animation: None,
        }
    }

    const fn animated(name: &'static str, color: u32, animation: AnimationId) -> Self {
        Self {
            name,
            color: rgb_from_u32(color),
            animation: Some(animation),
        }
    }

    /// Animation that plays when this mood is selected
    pub fn effective_animation(&self) -> AnimationId {
        self.animation.unwrap_or(AnimationId::Transition)
    }
}

const STANDARD_MOODS: [Mood; 14] = [
    Mood::fade("joy", 0xFF_FF_00),
    Mood::fade("excitement", 0xFF_A5_00),
    Mood::fade("sadness", 0x00_64_FF),
    Mood::fade("anger", 0xFF_00_00),
    Mood::fade("fear", 0x80_00_80),
    Mood::animated("surprise", 0xFF_FF_FF, AnimationId::FlashBurst),
    Mood::fade(FALLBACK_MOOD, 0xB4_B4_B4),
    Mood::animated("calm", 0x00_FF_B4, AnimationId::Breathing),
    Mood::animated("focus", 0x00_78_FF, AnimationId::Alternate),
    Mood::animated("energy", 0xFF_32_00, AnimationId::Pulse),
    Mood::animated("party", 0xFF_00_FF, AnimationId::Rainbow),
    Mood::fade("creative", 0x00_FF_FF),
    Mood::fade("sleepy", 0x32_32_96),
    Mood::fade("love", 0xFF_69_B4),
];

/// Mood table, fixed once built.
#[derive(Clone, Debug)]
pub struct EmotionProfile {
    moods: Vec<Mood>,
    fallback: Mood,
}

impl Default for EmotionProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl EmotionProfile {
    /// The built-in fourteen moods
    pub fn standard() -> Self {
        Self {
            moods: STANDARD_MOODS.to_vec(),
            fallback: STANDARD_MOODS[6],
        }
    }

    /// Build a custom table; `fallback` answers unknown labels.
    pub fn new(moods: Vec<Mood>, fallback: Mood) -> Self {
        Self { moods, fallback }
    }

    /// Find a mood by label, ignoring case and surrounding whitespace
    pub fn get(&self, label: &str) -> Option<&Mood> {
        let label = label.trim();
        self.moods
            .iter()
            .find(|mood| mood.name.eq_ignore_ascii_case(label))
    }

    /// Resolve a label, falling back for unknown input
    pub fn lookup(&self, label: &str) -> &Mood {
        self.get(label).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &Mood {
        &self.fallback
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mood> {
        self.moods.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.moods.iter().map(|mood| mood.name).collect()
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}
