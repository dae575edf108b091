//! Log-only stand-ins used when no hardware is detected

use log::{debug, trace};
use rand::Rng;

use super::{Climate, ClimateSensor, DeviceKind, DisplayDriver, LedDriver};
use crate::{color::Rgb, display::Frame, error::DeviceError};

const BASELINE_TEMPERATURE_C: f32 = 24.0;
const BASELINE_HUMIDITY: f32 = 52.0;
const TEMPERATURE_JITTER: f32 = 1.0;
const HUMIDITY_JITTER: f32 = 5.0;

/// A plausible indoor reading with a little noise, rounded to 0.1.
pub fn jittered_climate() -> Climate {
    let mut rng = rand::thread_rng();
    Climate {
        temperature_c: round_tenth(
            BASELINE_TEMPERATURE_C + rng.gen_range(-TEMPERATURE_JITTER..=TEMPERATURE_JITTER),
        ),
        humidity: round_tenth(
            BASELINE_HUMIDITY + rng.gen_range(-HUMIDITY_JITTER..=HUMIDITY_JITTER),
        ),
    }
}

pub(crate) fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Strip that only logs what it would show.
///
/// Animations write at up to 33 Hz, so a line is emitted only when the
/// frame actually changes.
#[derive(Debug)]
pub struct SimulatedStrip {
    led_count: usize,
    last: Vec<Rgb>,
    brightness: u8,
}

impl SimulatedStrip {
    pub fn new(led_count: usize) -> Self {
        Self {
            led_count,
            last: Vec::new(),
            brightness: 255,
        }
    }
}

impl LedDriver for SimulatedStrip {
    fn led_count(&self) -> usize {
        self.led_count
    }

    fn write(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        if colors == self.last.as_slice() {
            return Ok(());
        }
        match colors.first() {
            Some(first) if colors.iter().all(|color| color == first) => {
                debug!("[demo] strip -> ({}, {}, {})", first.r, first.g, first.b);
            }
            Some(_) => trace!("[demo] strip -> {} mixed cells", colors.len()),
            None => {}
        }
        self.last.clear();
        self.last.extend_from_slice(colors);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError> {
        if level != self.brightness {
            debug!("[demo] strip brightness -> {level}/255");
            self.brightness = level;
        }
        Ok(())
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Simulated
    }
}

/// Panel that renders to a single log line per change.
#[derive(Debug, Default)]
pub struct SimulatedPanel {
    last_line: String,
}

impl SimulatedPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayDriver for SimulatedPanel {
    fn show(&mut self, frame: &Frame) -> Result<(), DeviceError> {
        let line = frame.summary();
        if line != self.last_line {
            debug!("[oled] {line}");
            self.last_line = line;
        }
        Ok(())
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Simulated
    }
}

/// Sensor that always answers with [`jittered_climate`]
#[derive(Debug, Default)]
pub struct SimulatedSensor;

impl SimulatedSensor {
    pub fn new() -> Self {
        Self
    }
}

impl ClimateSensor for SimulatedSensor {
    fn read(&mut self) -> Result<Climate, DeviceError> {
        Ok(jittered_climate())
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Simulated
    }
}
