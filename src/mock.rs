//! Recording test doubles for the device traits.
//!
//! Each double is a cheap handle over shared state: keep a clone, hand
//! the other to the component under test, and inspect through the clone.
//!
//! ```
//! use desk_buddy::{LedDriver, Rgb, mock::MockStrip};
//!
//! let strip = MockStrip::new(4);
//! let mut driver = strip.clone();
//! driver.write(&[Rgb::new(1, 2, 3); 4]).unwrap();
//! assert_eq!(strip.cells(), vec![Rgb::new(1, 2, 3); 4]);
//! ```

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering},
};

use crate::{
    color::Rgb,
    device::{Climate, ClimateSensor, DeviceKind, DisplayDriver, LedDriver},
    display::Frame,
    error::DeviceError,
};

#[derive(Debug, Default)]
struct StripRecord {
    cells: Mutex<Vec<Rgb>>,
    brightness: AtomicU8,
    writes: AtomicUsize,
    writers: AtomicUsize,
    max_writers: AtomicUsize,
    failing: AtomicBool,
}

/// Strip that remembers the last frame and counts writers
#[derive(Clone, Debug)]
pub struct MockStrip {
    led_count: usize,
    kind: DeviceKind,
    record: Arc<StripRecord>,
}

impl MockStrip {
    pub fn new(led_count: usize) -> Self {
        let record = StripRecord {
            cells: Mutex::new(vec![Rgb::default(); led_count]),
            brightness: AtomicU8::new(255),
            ..StripRecord::default()
        };
        Self {
            led_count,
            kind: DeviceKind::Simulated,
            record: Arc::new(record),
        }
    }

    /// Report as a different device variant
    #[must_use]
    pub fn with_kind(mut self, kind: DeviceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Colors from the last successful write
    pub fn cells(&self) -> Vec<Rgb> {
        self.record
            .cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn brightness(&self) -> u8 {
        self.record.brightness.load(Ordering::SeqCst)
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.record.writes.load(Ordering::SeqCst)
    }

    /// Most writes ever in flight at the same time
    pub fn max_concurrent_writers(&self) -> usize {
        self.record.max_writers.load(Ordering::SeqCst)
    }

    /// Make every following write fail
    pub fn set_failing(&self, failing: bool) {
        self.record.failing.store(failing, Ordering::SeqCst);
    }
}

impl LedDriver for MockStrip {
    fn led_count(&self) -> usize {
        self.led_count
    }

    fn write(&mut self, colors: &[Rgb]) -> Result<(), DeviceError> {
        let record = &self.record;
        let writers = record.writers.fetch_add(1, Ordering::SeqCst) + 1;
        record.max_writers.fetch_max(writers, Ordering::SeqCst);

        let result = if record.failing.load(Ordering::SeqCst) {
            Err(DeviceError::Unavailable("LED strip"))
        } else {
            let mut cells = record.cells.lock().unwrap_or_else(PoisonError::into_inner);
            cells.clear();
            cells.extend_from_slice(colors);
            record.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        };

        record.writers.fetch_sub(1, Ordering::SeqCst);
        result
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DeviceError> {
        if self.record.failing.load(Ordering::SeqCst) {
            return Err(DeviceError::Unavailable("LED strip"));
        }
        self.record.brightness.store(level, Ordering::SeqCst);
        Ok(())
    }

    fn kind(&self) -> DeviceKind {
        self.kind
    }
}

#[derive(Debug, Default)]
struct PanelRecord {
    last: Mutex<Option<Frame>>,
    shown: AtomicUsize,
    failing: AtomicBool,
}

/// Panel that keeps the last frame shown
#[derive(Clone, Debug, Default)]
pub struct MockPanel {
    record: Arc<PanelRecord>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.record
            .last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn frames_shown(&self) -> usize {
        self.record.shown.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.record.failing.store(failing, Ordering::SeqCst);
    }
}

impl DisplayDriver for MockPanel {
    fn show(&mut self, frame: &Frame) -> Result<(), DeviceError> {
        if self.record.failing.load(Ordering::SeqCst) {
            return Err(DeviceError::Unavailable("OLED"));
        }
        *self
            .record
            .last
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(frame.clone());
        self.record.shown.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Simulated
    }
}

/// Sensor with a scripted answer
#[derive(Clone, Debug)]
pub struct MockSensor {
    answer: Option<Climate>,
}

impl MockSensor {
    /// Always reads `temperature_c` and `humidity`
    pub fn fixed(temperature_c: f32, humidity: f32) -> Self {
        Self {
            answer: Some(Climate {
                temperature_c,
                humidity,
            }),
        }
    }

    /// Every read fails
    pub fn failing() -> Self {
        Self { answer: None }
    }
}

impl ClimateSensor for MockSensor {
    fn read(&mut self) -> Result<Climate, DeviceError> {
        self.answer.ok_or(DeviceError::Unavailable("DHT22"))
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Physical
    }
}
