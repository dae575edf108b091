use core::fmt::Write;

use chrono::{NaiveTime, Timelike};
use embassy_time::{Duration, Instant};
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        iso_8859_1::{FONT_5X8, FONT_6X10, FONT_9X15_BOLD},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text, renderer::TextRenderer},
};

use super::{
    footer::{Footer, FooterMode, IDLE_PHRASES, QuoteRotation},
    frame::{Bitmap, CenterLayout, Frame, WIDTH},
};
use crate::{
    config::{QUOTE_INTERVAL, SCROLL_GAP},
    sensor::SensorReading,
};

pub const STARTUP_MESSAGE: &str = "Hello! Smart Desk Buddy is Active";
pub const STARTUP_STATUS: &str = "System ready";
pub const STARTUP_STATUS_DURATION: Duration = Duration::from_secs(5);
pub const CLEARED_STATUS: &str = "Display cleared";
pub const CLEARED_STATUS_DURATION: Duration = Duration::from_secs(3);

const HEADER_FONT: &MonoFont<'static> = &FONT_6X10;
const CENTER_FONT: &MonoFont<'static> = &FONT_9X15_BOLD;
const FOOTER_FONT: &MonoFont<'static> = &FONT_5X8;

const HEADER_Y: i32 = 0;
const CENTER_Y: i32 = 25;
const FOOTER_Y: i32 = 52;

#[allow(clippy::cast_possible_wrap)]
const PANEL_WIDTH: i32 = WIDTH as i32;

/// Rendered width of `text` in pixels
#[allow(clippy::cast_possible_wrap)]
pub fn text_width(text: &str, font: &MonoFont<'_>) -> i32 {
    MonoTextStyle::new(font, BinaryColor::On)
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width as i32
}

/// Width of a center message as it will be drawn
pub fn message_width(text: &str) -> i32 {
    text_width(text, CENTER_FONT)
}

fn draw_text(bitmap: &mut Bitmap, text: &str, x: i32, y: i32, font: &MonoFont<'_>) {
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let Ok(_) = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(bitmap);
}

const CLIMATE_PLACEHOLDER: &str = "--°C --%";

/// Header climate label, truncated to whole units.
///
/// Values are clamped to what a DHT22 can report; a missing or
/// non-finite value shows the placeholder.
#[allow(clippy::cast_possible_truncation)]
pub fn climate_label(reading: &SensorReading) -> heapless::String<24> {
    let mut label = heapless::String::new();
    let written = match (reading.temperature_c, reading.humidity) {
        (Some(temperature), Some(humidity)) if temperature.is_finite() && humidity.is_finite() => {
            write!(
                label,
                "{}°C {}%",
                temperature.clamp(-40.0, 80.0) as i32,
                humidity.clamp(0.0, 100.0) as i32
            )
        }
        _ => Err(core::fmt::Error),
    };
    if written.is_err() {
        label.clear();
        let _ = label.push_str(CLIMATE_PLACEHOLDER);
    }
    label
}

/// Everything the OLED shows, minus the sensor reading.
///
/// Pure state: every time-dependent call takes the clock explicitly.
#[derive(Clone, Debug)]
pub struct DisplayState {
    message: String,
    scroll_x: i32,
    footer: Footer,
}

impl DisplayState {
    /// Startup message with the startup status active
    pub fn new(now: Instant) -> Self {
        let mut footer = Footer::new(QuoteRotation::new(&IDLE_PHRASES, QUOTE_INTERVAL));
        footer.set_status(STARTUP_STATUS, STARTUP_STATUS_DURATION, now);
        Self {
            message: STARTUP_MESSAGE.to_string(),
            scroll_x: 0,
            footer,
        }
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = text.into();
        self.scroll_x = 0;
    }

    pub fn set_status(&mut self, text: impl Into<String>, duration: Duration, now: Instant) {
        self.footer.set_status(text, duration, now);
    }

    pub fn clear(&mut self, now: Instant) {
        self.message.clear();
        self.scroll_x = 0;
        self.footer
            .set_status(CLEARED_STATUS, CLEARED_STATUS_DURATION, now);
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn scroll_offset(&self) -> i32 {
        self.scroll_x
    }

    pub fn active_status(&self, now: Instant) -> Option<&str> {
        self.footer.active_status(now)
    }

    pub fn footer_mode(&self) -> &FooterMode {
        self.footer.mode()
    }

    /// Compose one frame and advance the scroll position.
    pub fn compose(&mut self, now: Instant, clock: NaiveTime, reading: &SensorReading) -> Frame {
        let mut frame = Frame::blank();

        let _ = write!(frame.clock, "{:02}:{:02}", clock.hour(), clock.minute());
        frame.climate = climate_label(reading);
        draw_text(&mut frame.bitmap, &frame.clock, 0, HEADER_Y, HEADER_FONT);
        let climate_x = PANEL_WIDTH - text_width(&frame.climate, HEADER_FONT);
        draw_text(&mut frame.bitmap, &frame.climate, climate_x, HEADER_Y, HEADER_FONT);

        frame.center = self.draw_center(&mut frame.bitmap);
        frame.message.clone_from(&self.message);

        frame.footer = self.footer.text(now);
        let footer_x = (PANEL_WIDTH - text_width(&frame.footer, FOOTER_FONT)) / 2;
        draw_text(&mut frame.bitmap, &frame.footer, footer_x, FOOTER_Y, FOOTER_FONT);

        frame
    }

    fn draw_center(&mut self, bitmap: &mut Bitmap) -> CenterLayout {
        if self.message.is_empty() {
            return CenterLayout::Empty;
        }

        let width = message_width(&self.message);
        if width <= PANEL_WIDTH {
            let x = (PANEL_WIDTH - width) / 2;
            draw_text(bitmap, &self.message, x, CENTER_Y, CENTER_FONT);
            return CenterLayout::Static { x };
        }

        let offset = self.scroll_x;
        let period = width + SCROLL_GAP;
        draw_text(bitmap, &self.message, offset, CENTER_Y, CENTER_FONT);
        draw_text(bitmap, &self.message, offset + period, CENTER_Y, CENTER_FONT);

        self.scroll_x -= 1;
        if self.scroll_x <= -period {
            self.scroll_x = 0;
        }
        CenterLayout::Scrolling { offset, width }
    }
}
