//! DHT22 through the kernel `dht11` IIO driver
//!
//! The driver exposes milli-degrees and milli-percent as text files
//! under `/sys/bus/iio/devices/iio:deviceN`. Reads fail with `EIO`
//! whenever the sensor misses its timing window, which is common.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{Climate, ClimateSensor, DeviceKind, simulated::round_tenth};
use crate::error::DeviceError;

const TEMPERATURE_FILE: &str = "in_temp_input";
const HUMIDITY_FILE: &str = "in_humidityrelative_input";

#[derive(Debug, Clone)]
pub struct IioClimateSensor {
    dir: PathBuf,
}

impl IioClimateSensor {
    /// Use `dir` if both channel files exist
    pub fn detect(dir: &Path) -> Option<Self> {
        let present =
            dir.join(TEMPERATURE_FILE).is_file() && dir.join(HUMIDITY_FILE).is_file();
        present.then(|| Self {
            dir: dir.to_path_buf(),
        })
    }

    fn read_milli(&self, file: &'static str) -> Result<f32, DeviceError> {
        let raw = fs::read_to_string(self.dir.join(file))?;
        let milli: i32 = raw
            .trim()
            .parse()
            .map_err(|_| DeviceError::InvalidReading {
                source_name: file,
                value: raw.trim().to_string(),
            })?;
        #[allow(clippy::cast_precision_loss)]
        let value = milli as f32 / 1000.0;
        Ok(round_tenth(value))
    }
}

impl ClimateSensor for IioClimateSensor {
    fn read(&mut self) -> Result<Climate, DeviceError> {
        Ok(Climate {
            temperature_c: self.read_milli(TEMPERATURE_FILE)?,
            humidity: self.read_milli(HUMIDITY_FILE)?,
        })
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Physical
    }
}
