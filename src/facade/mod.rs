//! Request-facing operations over the LED, OLED and sensor components
//!
//! Every operation returns a [`Reply`]; nothing here panics or surfaces
//! a device error as anything other than an error reply.

mod reply;
pub mod request;

use std::sync::Arc;

use chrono::Local;
use embassy_time::Duration;
use log::info;
use serde_json::Value;

pub use reply::{
    AnimationStarted, BrightnessSet, ColorSet, EmotionList, EmotionSet, EmotionTable, ErrorKind, HardwareFlags,
    Health, MessageShown, Notice, Reply, SensorData, StatusReport, SystemStatus,
};

use crate::{
    color::{Rgb, to_triple},
    config::Config,
    controller::AnimationController,
    device::{Availability, Devices},
    display::{DisplayRenderer, STARTUP_MESSAGE, STARTUP_STATUS, STARTUP_STATUS_DURATION},
    emotion::EmotionProfile,
    sensor::SensorSampler,
};

const LED_STATUS_DURATION: Duration = Duration::from_secs(3);
const BRIGHTNESS_STATUS_DURATION: Duration = Duration::from_secs(2);
const EMOTION_STATUS_DURATION: Duration = Duration::from_secs(3);
const MESSAGE_STATUS_DURATION: Duration = Duration::from_secs(2);
const COLOR_STATUS_DURATION: Duration = Duration::from_secs(2);
const ANIMATION_STATUS_DURATION: Duration = Duration::from_secs(3);

/// Colors flashed by the startup self-test
const STARTUP_COLORS: [Rgb; 4] = [
    Rgb { r: 255, g: 0, b: 0 },
    Rgb { r: 0, g: 255, b: 0 },
    Rgb { r: 0, g: 0, b: 255 },
    Rgb {
        r: 255,
        g: 255,
        b: 255,
    },
];
const STARTUP_COLOR_HOLD: Duration = Duration::from_millis(300);

/// Handles to the loops started by [`HardwareFacade::start_background`]
pub struct BackgroundTasks {
    pub render: std::thread::JoinHandle<()>,
    pub sampler: tokio::task::JoinHandle<()>,
}

impl BackgroundTasks {
    /// Stop sampling. The render thread ends with the process.
    pub fn stop(&self) {
        self.sampler.abort();
    }
}

pub struct HardwareFacade {
    leds: AnimationController,
    display: Arc<DisplayRenderer>,
    sensors: Arc<SensorSampler>,
    availability: Availability,
}

impl HardwareFacade {
    /// Wire the components over the detected devices
    pub fn new(devices: Devices, config: &Config) -> Self {
        let availability = devices.availability();
        let sensors = Arc::new(SensorSampler::new(devices.sensor));
        let display = Arc::new(DisplayRenderer::new(devices.panel, sensors.subscribe()));
        let leds =
            AnimationController::new(devices.strip, EmotionProfile::standard(), config.brightness);
        Self::from_parts(leds, display, sensors, availability)
    }

    pub fn from_parts(
        leds: AnimationController,
        display: Arc<DisplayRenderer>,
        sensors: Arc<SensorSampler>,
        availability: Availability,
    ) -> Self {
        Self {
            leds,
            display,
            sensors,
            availability,
        }
    }

    pub fn leds(&self) -> &AnimationController {
        &self.leds
    }

    pub fn display(&self) -> &DisplayRenderer {
        &self.display
    }

    pub fn sensors(&self) -> &SensorSampler {
        &self.sensors
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Start the render thread and the sensor sampler.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_background(
        &self,
        sensor_interval: std::time::Duration,
    ) -> std::io::Result<BackgroundTasks> {
        let display = Arc::clone(&self.display);
        let render = std::thread::Builder::new()
            .name("oled-render".to_string())
            .spawn(move || display.run())?;

        let sensors = Arc::clone(&self.sensors);
        let sampler = tokio::spawn(async move { sensors.run(sensor_interval).await });

        Ok(BackgroundTasks { render, sampler })
    }

    /// Greeting on the OLED and, with a physical strip, an RGBW self-test
    pub async fn startup(&self) {
        info!("Running startup sequence");
        self.display.set_message(STARTUP_MESSAGE);
        self.display
            .set_status(STARTUP_STATUS, STARTUP_STATUS_DURATION);

        if self.leds.kind().is_physical() {
            self.leds
                .play_sequence(&STARTUP_COLORS, STARTUP_COLOR_HOLD)
                .await;
        } else {
            info!("[demo] LED color test skipped");
        }
        info!("Startup complete");
    }

    pub async fn shutdown(&self) {
        self.leds.shutdown().await;
    }

    pub async fn led_on(&self) -> Reply<Notice> {
        let ok = self.leds.turn_on().await;
        self.display.set_status("LED turned on", LED_STATUS_DURATION);
        if ok {
            Reply::Success(Notice::new("LED turned on successfully"))
        } else {
            Reply::device("LED strip write failed")
        }
    }

    pub async fn led_off(&self) -> Reply<Notice> {
        let ok = self.leds.turn_off().await;
        self.display
            .set_status("LED turned off", LED_STATUS_DURATION);
        if ok {
            Reply::Success(Notice::new("LED turned off successfully"))
        } else {
            Reply::device("LED strip write failed")
        }
    }

    pub async fn set_brightness(&self, body: &Value) -> Reply<BrightnessSet> {
        let requested = match request::brightness(body) {
            Ok(value) => value,
            Err(message) => return Reply::invalid(message),
        };
        let brightness = self.leds.set_brightness(requested).await;
        self.display.set_status(
            format!("Brightness {brightness}%"),
            BRIGHTNESS_STATUS_DURATION,
        );
        Reply::Success(BrightnessSet {
            brightness,
            message: format!("Brightness set to {brightness}%"),
        })
    }

    pub async fn set_emotion(&self, body: &Value) -> Reply<EmotionSet> {
        let label = match request::emotion(body) {
            Ok(label) => label,
            Err(message) => return Reply::invalid(message),
        };
        let mood = self.leds.set_mood(&label).await;
        self.display
            .set_status(format!("Emotion: {label}"), EMOTION_STATUS_DURATION);
        Reply::Success(EmotionSet {
            message: format!("Emotion lighting set to {label}"),
            emotion: label,
            resolved: mood.name,
            color: to_triple(mood.color),
            animation: mood.effective_animation().as_str(),
        })
    }

    /// Start a behavior by name; without a color it runs over the current one
    pub async fn start_animation(&self, body: &Value) -> Reply<AnimationStarted> {
        let (id, color) = match request::animation(body) {
            Ok(parsed) => parsed,
            Err(message) => return Reply::invalid(message),
        };
        let color = match color {
            Some(color) => color,
            None => self.leds.snapshot().await.color,
        };
        self.leds.run_animation(id, color).await;
        self.display.set_status(
            format!("Animation: {}", id.as_str()),
            ANIMATION_STATUS_DURATION,
        );
        Reply::Success(AnimationStarted {
            animation: id.as_str(),
            color: to_triple(color),
            message: format!("Animation {} started", id.as_str()),
        })
    }

    pub async fn set_color(&self, body: &Value) -> Reply<ColorSet> {
        let color = match request::color(body) {
            Ok(color) => color,
            Err(message) => return Reply::invalid(message),
        };
        let ok = self.leds.set_color_all(color).await;
        self.display
            .set_status("Color updated", COLOR_STATUS_DURATION);
        if !ok {
            return Reply::device("LED strip write failed");
        }
        Reply::Success(ColorSet {
            color: to_triple(color),
            message: format!("Color set to ({}, {}, {})", color.r, color.g, color.b),
        })
    }

    pub fn display_message(&self, body: &Value) -> Reply<MessageShown> {
        let message = match request::message(body) {
            Ok(message) => message,
            Err(message) => return Reply::invalid(message),
        };
        self.display.set_message(message.clone());
        self.display
            .set_status("Message updated", MESSAGE_STATUS_DURATION);
        Reply::Success(MessageShown {
            message,
            display_message: "Message displayed successfully",
        })
    }

    pub fn clear_display(&self) -> Reply<Notice> {
        if self.display.clear() {
            Reply::Success(Notice::new("Display cleared successfully"))
        } else {
            Reply::device("OLED write failed")
        }
    }

    /// Take a fresh sample; failures come back as a fallback reading
    pub async fn read_sensors(&self) -> Reply<SensorData> {
        Reply::Success(SensorData {
            sensor_data: self.sensors.sample().await,
            message: "Sensor data read successfully",
        })
    }

    pub async fn status(&self) -> SystemStatus {
        let leds = self.leds.snapshot().await;
        let display = self.display.snapshot();
        let profile = self.leds.profile();
        SystemStatus {
            led_available: self.availability.led,
            oled_available: self.availability.oled,
            dht_available: self.availability.dht,
            led_state: leds.on,
            led_brightness_percent: leds.brightness,
            current_color: to_triple(leds.color),
            animation: leds.animation.map(|id| id.as_str()),
            current_message: display.message,
            bottom_status: display.status,
            last_sensor_read: self.sensors.last_read(),
            sensors: self.sensors.latest(),
            emotions_available: profile.names(),
            emotion_colors: EmotionTable::from(profile),
        }
    }

    pub async fn system_status(&self) -> Reply<StatusReport> {
        Reply::Success(StatusReport {
            system_status: self.status().await,
            message: "System status retrieved successfully",
        })
    }

    pub fn emotions(&self) -> Reply<EmotionList> {
        Reply::Success(EmotionList {
            emotions: EmotionTable::from(self.leds.profile()),
            message: "Emotions list retrieved successfully",
        })
    }

    pub fn health(&self) -> Health {
        Health {
            timestamp: Local::now(),
            device: "Raspberry Pi",
            hardware: self.availability.into(),
        }
    }
}
