//! LED state owner and animation task supervisor
//!
//! All commands go through one async mutex. Starting an animation
//! cancels the previous task and waits (bounded) for it to exit while
//! still holding the lock, so a mood change and a turn-off can never
//! interleave into two live animations or a lost turn-off.
//!
//! Animation tasks never take the controller lock. They share only the
//! strip handle, whose own mutex serializes every device write.

use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};

use embassy_time::Duration;
use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{
    animation::{AnimationId, AnimationSlot, Step},
    color::{BLACK, Rgb, percent_to_level},
    config::ANIMATION_STOP_TIMEOUT,
    device::{DeviceKind, LedDriver},
    emotion::{EmotionProfile, Mood},
    std_duration,
};

/// Shared, serialized access to the strip driver
#[derive(Clone)]
struct StripHandle {
    driver: Arc<Mutex<Box<dyn LedDriver>>>,
    led_count: usize,
    kind: DeviceKind,
    failing: Arc<AtomicBool>,
}

impl StripHandle {
    fn new(driver: Box<dyn LedDriver>) -> Self {
        Self {
            led_count: driver.led_count(),
            kind: driver.kind(),
            driver: Arc::new(Mutex::new(driver)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn LedDriver>> {
        self.driver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the first failure of a streak and the recovery after it
    fn report(&self, result: Result<(), crate::error::DeviceError>) -> bool {
        match result {
            Err(err) if !self.failing.swap(true, Ordering::Relaxed) => {
                warn!("LED write error: {err}");
                false
            }
            Err(_) => false,
            Ok(()) => {
                if self.failing.swap(false, Ordering::Relaxed) {
                    info!("LED write recovered");
                }
                true
            }
        }
    }

    fn fill(&self, color: Rgb) -> bool {
        let frame = vec![color; self.led_count];
        let result = self.lock().write(&frame);
        self.report(result)
    }

    /// Write unless `cancel` has fired. Returns `false` only when cancelled.
    fn write_unless_cancelled(&self, frame: &[Rgb], cancel: &CancellationToken) -> bool {
        let mut driver = self.lock();
        if cancel.is_cancelled() {
            return false;
        }
        let result = driver.write(frame);
        drop(driver);
        self.report(result);
        true
    }

    fn set_brightness(&self, level: u8) -> bool {
        let result = self.lock().set_brightness(level);
        self.report(result)
    }
}

/// Counts itself among the live animations until dropped
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(live: &Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(live))
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// One running animation
struct AnimationTask {
    id: u64,
    animation: AnimationId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

struct LedState {
    color: Rgb,
    on: bool,
    brightness: u8,
    active: Option<AnimationTask>,
}

/// Observable LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedSnapshot {
    pub on: bool,
    pub color: Rgb,
    /// Percent, 0-100
    pub brightness: u8,
    /// Animation still running, if any
    pub animation: Option<AnimationId>,
}

pub struct AnimationController {
    strip: StripHandle,
    profile: EmotionProfile,
    state: tokio::sync::Mutex<LedState>,
    live: Arc<AtomicUsize>,
    next_id: AtomicU64,
    stop_timeout: std::time::Duration,
}

impl AnimationController {
    /// Take ownership of the strip and apply the initial brightness.
    ///
    /// LEDs start off with white as the remembered color.
    pub fn new(driver: Box<dyn LedDriver>, profile: EmotionProfile, brightness: u8) -> Self {
        let brightness = brightness.min(100);
        let strip = StripHandle::new(driver);
        strip.set_brightness(percent_to_level(f64::from(brightness)));
        Self {
            strip,
            profile,
            state: tokio::sync::Mutex::new(LedState {
                color: Rgb::new(255, 255, 255),
                on: false,
                brightness,
                active: None,
            }),
            live: Arc::new(AtomicUsize::new(0)),
            next_id: AtomicU64::new(1),
            stop_timeout: ANIMATION_STOP_TIMEOUT,
        }
    }

    /// Override how long a cancelled animation may take to exit
    #[must_use]
    pub fn with_stop_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.stop_timeout = timeout;
        self
    }

    pub fn profile(&self) -> &EmotionProfile {
        &self.profile
    }

    pub fn kind(&self) -> DeviceKind {
        self.strip.kind
    }

    pub fn led_count(&self) -> usize {
        self.strip.led_count
    }

    /// Number of animation tasks that have not exited yet
    pub fn live_animations(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> LedSnapshot {
        let state = self.state.lock().await;
        LedSnapshot {
            on: state.on,
            color: state.color,
            brightness: state.brightness,
            animation: state
                .active
                .as_ref()
                .filter(|task| !task.handle.is_finished())
                .map(|task| task.animation),
        }
    }

    /// Stop any animation and show `color` on every cell.
    ///
    /// The color is remembered even when the write fails.
    pub async fn set_color_all(&self, color: Rgb) -> bool {
        let mut state = self.state.lock().await;
        self.stop_animation(&mut state).await;
        state.color = color;
        state.on = true;
        self.strip.fill(color)
    }

    /// Stop any animation and reapply the remembered color
    pub async fn turn_on(&self) -> bool {
        let mut state = self.state.lock().await;
        self.stop_animation(&mut state).await;
        state.on = true;
        self.strip.fill(state.color)
    }

    /// Stop any animation and blank the strip
    pub async fn turn_off(&self) -> bool {
        let mut state = self.state.lock().await;
        self.stop_animation(&mut state).await;
        state.on = false;
        self.strip.fill(BLACK)
    }

    /// Clamp to 0-100, store, and apply to the device.
    ///
    /// A running animation keeps running; the device dims its frames.
    pub async fn set_brightness(&self, percent: i64) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = percent.clamp(0, 100) as u8;
        let mut state = self.state.lock().await;
        state.brightness = percent;
        self.strip
            .set_brightness(percent_to_level(f64::from(percent)));
        percent
    }

    /// Resolve `label` and start its animation, or a fade to its color.
    pub async fn set_mood(&self, label: &str) -> Mood {
        let mood = *self.profile.lookup(label);
        debug!("mood {label:?} -> {}", mood.name);
        self.run_animation(mood.effective_animation(), mood.color)
            .await;
        mood
    }

    /// Replace whatever is running with animation `id` over `color`.
    ///
    /// Returns the task number of the new animation.
    pub async fn run_animation(&self, id: AnimationId, color: Rgb) -> u64 {
        let mut state = self.state.lock().await;
        self.stop_animation(&mut state).await;

        let from = if state.on { state.color } else { BLACK };
        state.color = color;
        state.on = true;

        let task = self.spawn(id.to_slot(color, from));
        let task_id = task.id;
        state.active = Some(task);
        task_id
    }

    /// Show each color for `hold`, then turn off
    pub async fn play_sequence(&self, colors: &[Rgb], hold: Duration) -> bool {
        let mut state = self.state.lock().await;
        self.stop_animation(&mut state).await;
        let mut ok = true;
        for &color in colors {
            ok &= self.strip.fill(color);
            tokio::time::sleep(std_duration(hold)).await;
        }
        state.on = false;
        let off = self.strip.fill(BLACK);
        ok && off
    }

    /// Best-effort cleanup at process exit
    pub async fn shutdown(&self) -> bool {
        info!("Turning LEDs off");
        self.turn_off().await
    }

    fn spawn(&self, slot: AnimationSlot) -> AnimationTask {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let animation = slot.id();
        let cancel = CancellationToken::new();
        let guard = LiveGuard::new(&self.live);
        let handle = tokio::spawn(drive(slot, self.strip.clone(), cancel.clone(), guard));
        debug!("animation #{id} ({}) started", animation.as_str());
        AnimationTask {
            id,
            animation,
            cancel,
            handle,
        }
    }

    async fn stop_animation(&self, state: &mut LedState) {
        let Some(task) = state.active.take() else {
            return;
        };
        task.cancel.cancel();

        let abort = task.handle.abort_handle();
        match tokio::time::timeout(self.stop_timeout, task.handle).await {
            Ok(Ok(())) => debug!("animation #{} stopped", task.id),
            Ok(Err(err)) => warn!("animation #{} ended abnormally: {err}", task.id),
            Err(_) => {
                warn!(
                    "animation #{} ({}) did not stop within {:?}, aborting",
                    task.id,
                    task.animation.as_str(),
                    self.stop_timeout
                );
                abort.abort();
            }
        }
    }
}

/// Animation body: render, write, hold, until settled or cancelled
async fn drive(
    mut slot: AnimationSlot,
    strip: StripHandle,
    cancel: CancellationToken,
    _live: LiveGuard,
) {
    let mut frame = vec![BLACK; strip.led_count];
    loop {
        let step = slot.render(&mut frame);
        if !strip.write_unless_cancelled(&frame, &cancel) {
            return;
        }
        match step {
            Step::Settled => return,
            Step::Hold(hold) => {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(std_duration(hold)) => {}
                }
            }
        }
    }
}
