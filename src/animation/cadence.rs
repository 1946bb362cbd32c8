//! Wall-clock pacing for hosts that tick the driver in real time.

use std::time::Duration;

use crate::schema::TICK_INTERVAL;

/// Fixed-interval tick schedule without catch-up.
///
/// Timestamps are durations since an arbitrary host epoch (for example
/// `Instant::elapsed` natively or `performance.now()` in a browser), so the
/// schedule itself never reads a clock. Deadlines missed while the host was
/// busy are counted and dropped, never replayed.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    next_due: Option<Duration>,
    skipped: u64,
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

impl Cadence {
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "cadence interval must be non-zero");
        Self {
            interval,
            next_due: None,
            skipped: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of deadlines dropped because the host fell behind.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Report whether a tick is due at `now`, and if so schedule the next one.
    ///
    /// At most one tick is due per call however late the host is.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            self.next_due = Some(now.saturating_add(self.interval));
            return true;
        };
        if now < due {
            return false;
        }

        let interval = self.interval.as_nanos();
        let late = (now - due).as_nanos();
        let missed = u64::try_from(late / interval).unwrap_or(u64::MAX);
        if missed > 0 {
            log::warn!("Cadence fell behind by {missed} ticks; dropping them");
            self.skipped = self.skipped.saturating_add(missed);
        }
        // Next deadline stays on the original phase: the first one strictly after `now`.
        let phase = nanos_to_duration(late % interval);
        self.next_due = Some(now.saturating_add(self.interval - phase));
        true
    }

    /// [`Cadence::poll`] with a host timestamp in milliseconds (`performance.now()`).
    ///
    /// Negative or NaN timestamps count as zero; timestamps too large to
    /// represent never tick.
    pub fn poll_millis(&mut self, now_ms: f64) -> bool {
        match Duration::try_from_secs_f64(now_ms.max(0.0) / 1000.0) {
            Ok(now) => self.poll(now),
            Err(_) => false,
        }
    }

    /// Time remaining until the next tick is due at `now` (zero if already due).
    pub fn until_next(&self, now: Duration) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_sub(now),
            None => Duration::ZERO,
        }
    }

    /// Forget the schedule; the next poll is immediately due.
    pub fn restart(&mut self) {
        self.next_due = None;
        self.skipped = 0;
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    Duration::new(secs, (nanos % NANOS_PER_SEC) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_first_poll_is_due() {
        let mut cadence = Cadence::default();
        assert!(cadence.poll(ms(0)));
        assert_eq!(cadence.until_next(ms(10)), ms(40));
    }

    #[test]
    fn test_fixed_interval() {
        let mut cadence = Cadence::new(ms(50));
        assert!(cadence.poll(ms(0)));
        assert!(!cadence.poll(ms(49)));
        assert!(cadence.poll(ms(50)));
        assert!(!cadence.poll(ms(60)));
        assert!(cadence.poll(ms(101)));
        assert_eq!(cadence.skipped(), 0);
    }

    #[test]
    fn test_missed_deadlines_are_not_replayed() {
        let mut cadence = Cadence::new(ms(50));
        assert!(cadence.poll(ms(0)));

        // Host stalls for 230ms: deadlines at 50, 100, 150, 200 all passed.
        assert!(cadence.poll(ms(230)));
        assert_eq!(cadence.skipped(), 3);
        // Only one tick fires; the next stays on the original phase.
        assert!(!cadence.poll(ms(231)));
        assert!(cadence.poll(ms(250)));
    }

    #[test]
    fn test_restart() {
        let mut cadence = Cadence::new(ms(50));
        cadence.poll(ms(0));
        cadence.poll(ms(500));
        cadence.restart();
        assert_eq!(cadence.skipped(), 0);
        assert_eq!(cadence.until_next(ms(1)), Duration::ZERO);
        assert!(cadence.poll(ms(501)));
    }

    #[test]
    fn test_far_behind_with_tiny_interval() {
        let mut cadence = Cadence::new(Duration::from_nanos(1));
        assert!(cadence.poll(Duration::ZERO));

        // Due at 1ns; arrive u32::MAX + 1 intervals later.
        let now = Duration::from_nanos(1 + u32::MAX as u64);
        assert!(cadence.poll(now));
        assert_eq!(cadence.skipped(), u32::MAX as u64);
        assert!(!cadence.poll(now));
        assert!(cadence.poll(now + Duration::from_nanos(1)));
    }

    #[test]
    fn test_late_poll_keeps_phase_for_long_interval() {
        let mut cadence = Cadence::new(Duration::from_secs(3));
        assert!(cadence.poll(Duration::ZERO));
        assert!(cadence.poll(Duration::from_millis(7_500)));
        assert_eq!(cadence.skipped(), 1);
        assert_eq!(
            cadence.until_next(Duration::from_millis(7_500)),
            Duration::from_millis(1_500)
        );
    }

    #[test]
    fn test_poll_millis() {
        let mut cadence = Cadence::default();
        assert!(cadence.poll_millis(1_000.0));
        assert!(!cadence.poll_millis(1_020.0));
        assert!(cadence.poll_millis(1_050.0));

        assert!(!cadence.poll_millis(f64::INFINITY));
        assert!(!cadence.poll_millis(f64::MAX));
        assert!(!cadence.poll_millis(f64::NAN));
    }

    #[test]
    fn test_poll_millis_clamps_negative_to_zero() {
        let mut cadence = Cadence::default();
        assert!(cadence.poll_millis(-5.0));
        assert_eq!(cadence.until_next(Duration::ZERO), ms(50));
    }

    #[test]
    #[should_panic]
    fn test_zero_interval_panics() {
        let _ = Cadence::new(Duration::ZERO);
    }
}
