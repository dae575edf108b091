//! Physical backends: WS2812 over spidev and SSD1306-class OLED over i2c-dev

use std::path::Path;

use embedded_graphics::prelude::*;
use linux_embedded_hal::{
    I2cdev, SpidevBus,
    spidev::{SpiModeFlags, SpidevOptions},
};
use smart_leds::SmartLedsWrite;
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};
use ws2812_spi::Ws2812;

use super::{DeviceKind, DisplayDriver, LedDriver};
use crate::{
    color::{Rgb, dim},
    display::Frame,
    error::DeviceError,
};

/// WS2812 bit timing needs a bus clock between 2 and 3.8 MHz.
const SPI_SPEED_HZ: u32 = 3_000_000;

/// WS2812 strip on a spidev node, MOSI wired to the data line.
///
/// The chips have no global brightness register, so the level is
/// applied in software and the last frame is kept for re-sending.
pub struct SpiStrip {
    driver: Ws2812<SpidevBus>,
    led_count: usize,
    level: u8,
    last: Vec<Rgb>,
}

impl SpiStrip {
    pub fn open(path: &Path, led_count: usize) -> Result<Self, DeviceError> {
        let mut bus = SpidevBus::open(path).map_err(DeviceError::bus)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        bus.configure(&options)?;

        let mut strip = Self {
            driver: Ws2812::new(bus),
            led_count,
            level: 255,
            last: vec![Rgb::default(); led_count],
        };
        strip.flush()?;
        Ok(strip)
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        let level = self.level;
        let dimmed = self.last.iter().map(|&color| dim(color, level));
        self.driver.write(dimmed).map_err(DeviceError::bus)
    }
}

impl LedDriver for SpiStrip {
    fn led_count(&self) -> usize {
        self.led_count
    }

    fn write(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        self.last.clear();
        self.last.extend_from_slice(colors);
        self.flush()
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError> {
        self.level = level;
        self.flush()
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Physical
    }
}

type Panel =
    Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// 128x64 OLED at the default 0x3C address.
///
/// SH1106 modules accept the SSD1306 command set for this use.
pub struct Ssd1306Panel {
    display: Panel,
}

impl Ssd1306Panel {
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        let i2c = I2cdev::new(path).map_err(DeviceError::bus)?;
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(DeviceError::display)?;
        display.clear_buffer();
        display.flush().map_err(DeviceError::display)?;
        Ok(Self { display })
    }
}

impl DisplayDriver for Ssd1306Panel {
    fn show(&mut self, frame: &Frame) -> Result<(), DeviceError> {
        self.display.clear_buffer();
        self.display
            .draw_iter(frame.bitmap.lit_pixels())
            .map_err(DeviceError::display)?;
        self.display.flush().map_err(DeviceError::display)
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Physical
    }
}
