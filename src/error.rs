//! Error types for the desk hardware.

use std::fmt::Debug;

/// Errors raised by a physical output or sensor.
///
/// None of these reach an HTTP caller directly; the controller and
/// loops log them and keep running.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// An I/O error on a device node.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The SPI or I2C bus rejected a transfer.
    #[error("Bus error: {0}")]
    Bus(String),

    /// The display controller failed to initialise or flush.
    #[error("Display error: {0}")]
    Display(String),

    /// The sensor answered with something that is not a reading.
    #[error("Invalid sensor value {value:?} from {source_name}")]
    InvalidReading {
        /// Sysfs attribute or channel name.
        source_name: &'static str,
        /// Raw value as read.
        value: String,
    },

    /// The device was switched into a failing state, used by test doubles.
    #[error("{0} unavailable")]
    Unavailable(&'static str),
}

impl DeviceError {
    /// Wrap a bus driver error that only offers `Debug`.
    pub fn bus(error: impl Debug) -> Self {
        Self::Bus(format!("{error:?}"))
    }

    /// Wrap a display driver error that only offers `Debug`.
    pub fn display(error: impl Debug) -> Self {
        Self::Display(format!("{error:?}"))
    }
}
