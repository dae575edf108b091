use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use chrono::{Local, NaiveTime};
use embassy_time::{Duration, Instant};
use log::{info, warn};
use tokio::sync::watch;

use super::{DisplayState, Frame};
use crate::{
    config::RENDER_TICK,
    device::{DeviceKind, DisplayDriver},
    frame_scheduler::FrameScheduler,
    sensor::SensorReading,
    std_duration,
};

/// Center message and footer status as last set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub message: String,
    pub status: Option<String>,
}

/// Owns the display state and the panel, and runs the render loop.
///
/// Request handlers only touch `state`; the panel is written by the
/// render loop and by [`DisplayRenderer::clear`].
pub struct DisplayRenderer {
    state: Mutex<DisplayState>,
    panel: Mutex<Box<dyn DisplayDriver>>,
    kind: DeviceKind,
    readings: watch::Receiver<SensorReading>,
    tick: Duration,
    panel_failing: AtomicBool,
}

impl DisplayRenderer {
    pub fn new(panel: Box<dyn DisplayDriver>, readings: watch::Receiver<SensorReading>) -> Self {
        Self {
            state: Mutex::new(DisplayState::new(Instant::now())),
            kind: panel.kind(),
            panel: Mutex::new(panel),
            readings,
            tick: RENDER_TICK,
            panel_failing: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut DisplayState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn set_message(&self, text: impl Into<String>) {
        let text = text.into();
        info!("[oled] center message -> {text}");
        self.with_state(|state| state.set_message(text));
    }

    pub fn set_status(&self, text: impl Into<String>, duration: Duration) {
        let text = text.into();
        info!("[oled] status -> {text} (for {}s)", duration.as_secs());
        let now = Instant::now();
        self.with_state(|state| state.set_status(text, duration, now));
    }

    /// Empty the screen and push a blank frame right away
    pub fn clear(&self) -> bool {
        let now = Instant::now();
        self.with_state(|state| state.clear(now));
        self.push(&Frame::blank())
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        let now = Instant::now();
        self.with_state(|state| DisplaySnapshot {
            message: state.message().to_string(),
            status: state.active_status(now).map(str::to_string),
        })
    }

    /// Compose one frame from the current state and show it.
    pub fn render_once(&self, now: Instant, clock: NaiveTime) -> Frame {
        let reading = self.readings.borrow().clone();
        let frame = self.with_state(|state| state.compose(now, clock, &reading));
        self.push(&frame);
        frame
    }

    fn push(&self, frame: &Frame) -> bool {
        let result = self
            .panel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show(frame);
        match result {
            Err(err) if !self.panel_failing.swap(true, Ordering::Relaxed) => {
                warn!("OLED write error: {err}");
                false
            }
            Err(_) => false,
            Ok(()) => {
                if self.panel_failing.swap(false, Ordering::Relaxed) {
                    info!("OLED write recovered");
                }
                true
            }
        }
    }

    /// Render forever at the fixed tick. Blocks the calling thread.
    pub fn run(&self) {
        let mut scheduler = FrameScheduler::new(self.tick);
        loop {
            self.render_once(Instant::now(), Local::now().time());
            let pacing = scheduler.tick(Instant::now());
            std::thread::sleep(std_duration(pacing.sleep_duration));
        }
    }
}
