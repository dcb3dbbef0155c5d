//! Inactivity-based auto-save scheduling.
//!
//! At most one save is pending at any time. Every text change (and every
//! auto-save toggle) calls [`AutoSaveTimer::rearm`], which cancels the pending
//! deadline and arms a new one `delay` after `now`, but only while auto-save
//! is enabled and the document is non-empty. The event loop polls the timer
//! on each tick; [`AutoSaveTimer::poll`] reports a due save exactly once.
//!
//! Instants are supplied by the caller so the schedule is testable without
//! sleeping.

use std::time::{Duration, Instant};
use tracing::{trace, warn};

#[derive(Debug, Clone)]
pub struct AutoSaveTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoSaveTimer {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(30);

    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancel any pending save and, when `enabled` and the text is non-empty,
    /// schedule a new one at `now + delay`.
    pub fn rearm(&mut self, now: Instant, enabled: bool, text_is_empty: bool) {
        let had_pending = self.deadline.take().is_some();
        if enabled && !text_is_empty {
            match now.checked_add(self.delay) {
                Some(deadline) => {
                    self.deadline = Some(deadline);
                    trace!(target: "autosave", had_pending, delay_ms = self.delay.as_millis() as u64, "armed");
                }
                None => {
                    warn!(target: "autosave", delay_secs = self.delay.as_secs(), "delay_out_of_range_not_armed");
                }
            }
        } else if had_pending {
            trace!(target: "autosave", enabled, text_is_empty, "cancelled");
        }
    }

    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            trace!(target: "autosave", "cancelled");
        }
    }

    /// True once when the pending deadline has passed; disarms the timer.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                trace!(target: "autosave", "fired");
                true
            }
            _ => false,
        }
    }

    /// Disarm and report whether a save was still pending (used at shutdown).
    pub fn take_pending(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

impl Default for AutoSaveTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
