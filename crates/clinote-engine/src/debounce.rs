//! Trailing-edge debounce timer.
//!
//! The timer does not own a clock or a thread. Callers pass `now` in, which
//! keeps it usable from any event loop and deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Start or restart the quiet period from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Drop the pending firing. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire if the quiet period has elapsed. A burst fires at most once.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(700);

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = Debouncer::new(QUIET);
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(Instant::now() + QUIET * 10));
    }

    #[test]
    fn test_fires_once_after_quiet_period() {
        let start = Instant::now();
        let mut timer = Debouncer::new(QUIET);
        timer.schedule(start);
        assert!(!timer.fire_if_due(start + Duration::from_millis(699)));
        assert!(timer.fire_if_due(start + QUIET));
        assert!(!timer.fire_if_due(start + QUIET * 2));
    }

    #[test]
    fn test_reschedule_restarts_the_window() {
        let start = Instant::now();
        let mut timer = Debouncer::new(QUIET);
        timer.schedule(start);
        timer.schedule(start + Duration::from_millis(500));
        assert!(!timer.fire_if_due(start + QUIET));
        assert_eq!(timer.deadline(), Some(start + Duration::from_millis(1200)));
        assert!(timer.fire_if_due(start + Duration::from_millis(1200)));
    }

    #[test]
    fn test_cancel_drops_pending_fire() {
        let start = Instant::now();
        let mut timer = Debouncer::new(QUIET);
        timer.schedule(start);
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.fire_if_due(start + QUIET));
    }
}
