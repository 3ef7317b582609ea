//! Fixed-rate repaint scheduling driven by host timestamps.

use crate::settings::DEFAULT_REPAINT_FPS;

/// Decides when an overlay should repaint.
///
/// The host calls [`poll`](Self::poll) from its own event loop with a
/// monotonic millisecond clock; the timer answers whether a tick is due.
/// Missed ticks are dropped rather than replayed in a burst.
#[derive(Debug, Clone, PartialEq)]
pub struct RepaintTimer {
    interval_ms: f64,
    running: bool,
    next_due_ms: Option<f64>,
}

impl Default for RepaintTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REPAINT_FPS)
    }
}

impl RepaintTimer {
    /// A stopped timer ticking `fps` times per second once started.
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(fps.max(1)),
            running: false,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start ticking. The first poll afterwards is due immediately.
    /// Starting a running timer keeps its schedule.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.next_due_ms = None;
        }
    }

    /// Stop ticking. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_due_ms = None;
    }

    /// Whether a repaint is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if !self.running || !now_ms.is_finite() {
            return false;
        }
        match self.next_due_ms {
            Some(due) if now_ms < due => false,
            Some(due) if now_ms - due < self.interval_ms => {
                self.next_due_ms = Some(due + self.interval_ms);
                true
            }
            _ => {
                self.next_due_ms = Some(now_ms + self.interval_ms);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_ticks() {
        let mut timer = RepaintTimer::new(60);
        assert!(!timer.poll(0.0));
        assert!(!timer.poll(1000.0));
    }

    #[test]
    fn test_fixed_rate() {
        let mut timer = RepaintTimer::new(10);
        timer.start();
        assert!(timer.poll(0.0));
        assert!(!timer.poll(50.0));
        assert!(timer.poll(100.0));
        assert!(!timer.poll(150.0));
        assert!(timer.poll(210.0));
        // Schedule stays on the 100ms grid
        assert!(!timer.poll(299.0));
        assert!(timer.poll(300.0));
    }

    #[test]
    fn test_missed_ticks_are_dropped() {
        let mut timer = RepaintTimer::new(10);
        timer.start();
        assert!(timer.poll(0.0));
        assert!(timer.poll(1000.0));
        assert!(!timer.poll(1050.0));
        assert!(timer.poll(1100.0));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = RepaintTimer::default();
        timer.start();
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.poll(10.0));
    }

    #[test]
    fn test_restart_ticks_immediately() {
        let mut timer = RepaintTimer::new(1);
        timer.start();
        assert!(timer.poll(0.0));
        timer.stop();
        timer.start();
        assert!(timer.poll(1.0));
    }

    #[test]
    fn test_default_rate() {
        let timer = RepaintTimer::default();
        assert!((timer.interval_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }
}
