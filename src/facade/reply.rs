//! Typed JSON replies
//!
//! Every reply serializes with a `status` of `success` or `error`; the
//! success payload's fields sit next to it.

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    color::to_triple,
    device::Availability,
    emotion::EmotionProfile,
    sensor::SensorReading,
};

/// Why a request failed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent a malformed payload
    #[default]
    InvalidInput,
    /// The hardware write failed
    Device,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Reply<T> {
    Success(T),
    Error {
        message: String,
        #[serde(skip)]
        kind: ErrorKind,
    },
}

impl<T> Reply<T> {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            kind: ErrorKind::InvalidInput,
        }
    }

    pub fn device(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            kind: ErrorKind::Device,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::Error { kind, .. } => Some(*kind),
        }
    }

    /// Payload of a successful reply
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Error { .. } => None,
        }
    }

    /// Error message of a failed reply
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { message, .. } => Some(message),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrightnessSet {
    pub brightness: u8,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmotionSet {
    /// Label as sent
    pub emotion: String,
    /// Table entry it resolved to
    pub resolved: &'static str,
    pub color: [u8; 3],
    pub animation: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnimationStarted {
    pub animation: &'static str,
    pub color: [u8; 3],
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColorSet {
    pub color: [u8; 3],
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MessageShown {
    pub message: String,
    pub display_message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensorData {
    pub sensor_data: SensorReading,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusReport {
    pub system_status: SystemStatus,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmotionList {
    pub emotions: EmotionTable,
    pub message: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HardwareFlags {
    pub led: bool,
    pub oled: bool,
    pub sensors: bool,
}

impl From<Availability> for HardwareFlags {
    fn from(availability: Availability) -> Self {
        Self {
            led: availability.led,
            oled: availability.oled,
            sensors: availability.dht,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Health {
    pub timestamp: DateTime<Local>,
    pub device: &'static str,
    pub hardware: HardwareFlags,
}

/// Diagnostics snapshot
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemStatus {
    pub led_available: bool,
    pub oled_available: bool,
    pub dht_available: bool,
    pub led_state: bool,
    pub led_brightness_percent: u8,
    pub current_color: [u8; 3],
    pub animation: Option<&'static str>,
    pub current_message: String,
    pub bottom_status: Option<String>,
    pub last_sensor_read: Option<DateTime<Local>>,
    pub sensors: SensorReading,
    pub emotions_available: Vec<&'static str>,
    pub emotion_colors: EmotionTable,
}

/// Label to color map, serialized as a JSON object in table order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmotionTable(Vec<(&'static str, [u8; 3])>);

impl EmotionTable {
    pub fn get(&self, label: &str) -> Option<[u8; 3]> {
        self.0
            .iter()
            .find(|(name, _)| *name == label)
            .map(|&(_, color)| color)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&EmotionProfile> for EmotionTable {
    fn from(profile: &EmotionProfile) -> Self {
        Self(
            profile
                .iter()
                .map(|mood| (mood.name, to_triple(mood.color)))
                .collect(),
        )
    }
}

impl Serialize for EmotionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, color) in &self.0 {
            map.serialize_entry(name, color)?;
        }
        map.end()
    }
}
