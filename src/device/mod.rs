//! Output and sensor capabilities
//!
//! Each peripheral is a trait with a physical and a simulated variant.
//! [`Devices::detect`] picks the variants once at startup; nothing else
//! in the crate branches on whether hardware is present.

mod iio;
#[cfg(feature = "hardware")]
mod linux;
mod simulated;

use log::{info, warn};
use serde::Serialize;

pub use iio::IioClimateSensor;
#[cfg(feature = "hardware")]
pub use linux::{Ssd1306Panel, SpiStrip};
pub use simulated::{SimulatedPanel, SimulatedSensor, SimulatedStrip, jittered_climate};

use crate::{color::Rgb, config::Config, display::Frame, error::DeviceError};

/// Which variant backs a capability
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceKind {
    Physical,
    Simulated,
}

impl DeviceKind {
    pub const fn is_physical(self) -> bool {
        matches!(self, Self::Physical)
    }
}

/// A strip of addressable color cells.
///
/// Brightness is a device property: the driver applies it to every
/// frame it writes, including the one currently shown.
pub trait LedDriver: Send {
    /// Number of cells on the strip
    fn led_count(&self) -> usize;

    /// Write colors to the strip
    fn write(&mut self, colors: &[Rgb]) -> Result<(), DeviceError>;

    /// Set the global intensity (0-255) and reapply it
    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError>;

    fn kind(&self) -> DeviceKind;
}

/// A small monochrome pixel display
pub trait DisplayDriver: Send {
    /// Push a composed frame to the panel
    fn show(&mut self, frame: &Frame) -> Result<(), DeviceError>;

    fn kind(&self) -> DeviceKind;
}

/// Temperature and humidity source
pub trait ClimateSensor: Send {
    fn read(&mut self) -> Result<Climate, DeviceError>;

    fn kind(&self) -> DeviceKind;
}

/// One raw climate measurement
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Climate {
    pub temperature_c: f32,
    pub humidity: f32,
}

/// Which capabilities are backed by real hardware
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub led: bool,
    pub oled: bool,
    pub dht: bool,
}

/// The peripheral set chosen at startup
pub struct Devices {
    pub strip: Box<dyn LedDriver>,
    pub panel: Box<dyn DisplayDriver>,
    pub sensor: Box<dyn ClimateSensor>,
}

impl Devices {
    /// Simulated variants for every capability
    pub fn simulated(led_count: usize) -> Self {
        Self {
            strip: Box::new(SimulatedStrip::new(led_count)),
            panel: Box::new(SimulatedPanel::new()),
            sensor: Box::new(SimulatedSensor::new()),
        }
    }

    /// Try each physical device and fall back to simulation per capability.
    pub fn detect(config: &Config) -> Self {
        if config.simulate {
            info!("Hardware detection skipped, running fully simulated");
            return Self::simulated(config.led_count);
        }

        let sensor: Box<dyn ClimateSensor> = match IioClimateSensor::detect(&config.sensor_dir) {
            Some(sensor) => {
                info!("DHT22 found at {}", config.sensor_dir.display());
                Box::new(sensor)
            }
            None => {
                info!("DHT22 not found, simulating climate readings");
                Box::new(SimulatedSensor::new())
            }
        };

        Self {
            strip: detect_strip(config),
            panel: detect_panel(config),
            sensor,
        }
    }

    pub fn availability(&self) -> Availability {
        Availability {
            led: self.strip.kind().is_physical(),
            oled: self.panel.kind().is_physical(),
            dht: self.sensor.kind().is_physical(),
        }
    }
}

#[cfg(feature = "hardware")]
fn detect_strip(config: &Config) -> Box<dyn LedDriver> {
    match SpiStrip::open(&config.spi_device, config.led_count) {
        Ok(strip) => {
            info!("LED strip initialized on {}", config.spi_device.display());
            Box::new(strip)
        }
        Err(err) => {
            warn!("LED strip init failed: {err}, simulating");
            Box::new(SimulatedStrip::new(config.led_count))
        }
    }
}

#[cfg(not(feature = "hardware"))]
fn detect_strip(config: &Config) -> Box<dyn LedDriver> {
    warn!("Built without hardware support, simulating LED strip");
    Box::new(SimulatedStrip::new(config.led_count))
}

#[cfg(feature = "hardware")]
fn detect_panel(config: &Config) -> Box<dyn DisplayDriver> {
    match Ssd1306Panel::open(&config.i2c_device) {
        Ok(panel) => {
            info!("OLED initialized on {}", config.i2c_device.display());
            Box::new(panel)
        }
        Err(err) => {
            warn!("OLED init failed: {err}, simulating");
            Box::new(SimulatedPanel::new())
        }
    }
}

#[cfg(not(feature = "hardware"))]
fn detect_panel(_config: &Config) -> Box<dyn DisplayDriver> {
    warn!("Built without hardware support, simulating OLED");
    Box::new(SimulatedPanel::new())
}
