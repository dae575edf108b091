pub mod animation;
pub mod color;
pub mod config;
pub mod controller;
pub mod device;
pub mod display;
pub mod emotion;
pub mod error;
pub mod facade;
pub mod frame_scheduler;
pub mod http;
pub mod math8;
pub mod mock;
pub mod sensor;
pub mod transition;

pub use animation::{AnimationId, AnimationSlot};
pub use color::Rgb;
pub use config::Config;
pub use controller::{AnimationController, LedSnapshot};
pub use device::{
    Availability, Climate, ClimateSensor, DeviceKind, Devices, DisplayDriver, LedDriver,
};
pub use display::{DisplayRenderer, DisplayState, Frame};
pub use emotion::{EmotionProfile, Mood};
pub use error::DeviceError;
pub use facade::{HardwareFacade, Reply};
pub use frame_scheduler::FrameScheduler;
pub use sensor::{SensorReading, SensorSampler};

pub use embassy_time::{Duration, Instant};

pub(crate) fn std_duration(duration: Duration) -> std::time::Duration {
    std::time::Duration::from_micros(duration.as_micros())
}
