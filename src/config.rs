//! Runtime configuration and fixed timings

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use embassy_time::Duration;

/// Cells on the strip
pub const LED_COUNT: usize = 16;

/// Initial brightness, the device level 200 expressed as a percentage
pub const DEFAULT_BRIGHTNESS_PERCENT: u8 = 78;

/// OLED render period
pub const RENDER_TICK: Duration = Duration::from_millis(40);

/// Idle footer phrases advance at most this often
pub const QUOTE_INTERVAL: Duration = Duration::from_secs(60);

/// Blank space between the two copies of a scrolling message, in pixels
pub const SCROLL_GAP: i32 = 30;

/// Upper bound on waiting for a cancelled animation to exit
pub const ANIMATION_STOP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(1);

pub const DEFAULT_SENSOR_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "0.0.0.0:5001";
pub const DEFAULT_SPI_DEVICE: &str = "/dev/spidev0.0";
pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";
pub const DEFAULT_SENSOR_DIR: &str = "/sys/bus/iio/devices/iio:device0";

#[derive(Debug, Clone, Parser)]
#[command(name = "desk-buddy", version, about = "Desk companion LED, OLED and sensor server")]
pub struct Config {
    /// Address the HTTP API listens on
    #[arg(long, env = "DESK_BUDDY_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Number of cells on the LED strip
    #[arg(long, env = "DESK_BUDDY_LED_COUNT", default_value_t = LED_COUNT)]
    pub led_count: usize,

    /// spidev node driving the WS2812 data line
    #[arg(long, env = "DESK_BUDDY_SPI_DEVICE", default_value = DEFAULT_SPI_DEVICE)]
    pub spi_device: PathBuf,

    /// i2c-dev node the OLED sits on
    #[arg(long, env = "DESK_BUDDY_I2C_DEVICE", default_value = DEFAULT_I2C_DEVICE)]
    pub i2c_device: PathBuf,

    /// IIO directory of the DHT22
    #[arg(long, env = "DESK_BUDDY_SENSOR_DIR", default_value = DEFAULT_SENSOR_DIR)]
    pub sensor_dir: PathBuf,

    /// Skip the hardware detection and simulate every device
    #[arg(long, env = "DESK_BUDDY_SIMULATE")]
    pub simulate: bool,

    /// Seconds between climate samples
    #[arg(long, env = "DESK_BUDDY_SENSOR_INTERVAL", default_value_t = DEFAULT_SENSOR_INTERVAL_SECS)]
    pub sensor_interval_secs: u64,

    /// Initial LED brightness in percent
    #[arg(
        long,
        env = "DESK_BUDDY_BRIGHTNESS",
        default_value_t = DEFAULT_BRIGHTNESS_PERCENT,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub brightness: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 5001)),
            led_count: LED_COUNT,
            spi_device: PathBuf::from(DEFAULT_SPI_DEVICE),
            i2c_device: PathBuf::from(DEFAULT_I2C_DEVICE),
            sensor_dir: PathBuf::from(DEFAULT_SENSOR_DIR),
            simulate: false,
            sensor_interval_secs: DEFAULT_SENSOR_INTERVAL_SECS,
            brightness: DEFAULT_BRIGHTNESS_PERCENT,
        }
    }
}

impl Config {
    pub fn sensor_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sensor_interval_secs.max(1))
    }
}
