use embassy_time::{Duration, Instant};

/// Shown in turn whenever no status is active
pub const IDLE_PHRASES: [&str; 6] = [
    "Smart Desk Buddy Active",
    "System operational",
    "Hardware ready",
    "Nexus AI Connected",
    "Monitoring sensors",
    "Awaiting commands",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FooterMode {
    /// Explicit status, shown until `expires_at` has passed
    Active { text: String, expires_at: Instant },
    /// Idle phrases
    Rotating,
}

/// Sequential idle phrases on their own slow clock.
///
/// The phrase only advances when `interval` has elapsed since the last
/// advance, however often it is asked for. A clock that reads earlier
/// than the last advance restarts the interval instead of advancing.
#[derive(Clone, Debug)]
pub struct QuoteRotation {
    phrases: &'static [&'static str],
    next_index: usize,
    current: Option<&'static str>,
    last_advance: Instant,
    interval: Duration,
}

impl QuoteRotation {
    pub const fn new(phrases: &'static [&'static str], interval: Duration) -> Self {
        Self {
            phrases,
            next_index: 0,
            current: None,
            last_advance: Instant::from_millis(0),
            interval,
        }
    }

    pub fn current(&mut self, now: Instant) -> &'static str {
        let due = match self.current {
            None => true,
            Some(_) => match now.checked_duration_since(self.last_advance) {
                Some(elapsed) => elapsed >= self.interval,
                None => {
                    self.last_advance = now;
                    false
                }
            },
        };
        if due {
            self.advance(now);
        }
        self.current.unwrap_or_default()
    }

    fn advance(&mut self, now: Instant) {
        if self.phrases.is_empty() {
            return;
        }
        self.current = Some(self.phrases[self.next_index]);
        self.next_index = (self.next_index + 1) % self.phrases.len();
        self.last_advance = now;
    }
}

/// Footer state machine: an active status or the idle rotation.
#[derive(Clone, Debug)]
pub struct Footer {
    mode: FooterMode,
    rotation: QuoteRotation,
}

impl Footer {
    pub const fn new(rotation: QuoteRotation) -> Self {
        Self {
            mode: FooterMode::Rotating,
            rotation,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, duration: Duration, now: Instant) {
        self.mode = FooterMode::Active {
            text: text.into(),
            expires_at: now + duration,
        };
    }

    /// Drop the active status once its expiry has passed
    pub fn sweep(&mut self, now: Instant) {
        if let FooterMode::Active { expires_at, .. } = &self.mode
            && now > *expires_at
        {
            self.mode = FooterMode::Rotating;
        }
    }

    /// Status text still in effect at `now`
    pub fn active_status(&self, now: Instant) -> Option<&str> {
        match &self.mode {
            FooterMode::Active { text, expires_at } if now <= *expires_at => Some(text),
            _ => None,
        }
    }

    /// Text to draw at `now`
    pub fn text(&mut self, now: Instant) -> String {
        self.sweep(now);
        match &self.mode {
            FooterMode::Active { text, .. } => text.clone(),
            FooterMode::Rotating => self.rotation.current(now).to_string(),
        }
    }

    pub fn mode(&self) -> &FooterMode {
        &self.mode
    }
}
