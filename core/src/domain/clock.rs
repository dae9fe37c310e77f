//! Time source for every timestamp the engine reads or writes.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Unix-time clock with microsecond resolution
pub trait Clock: Send + Sync {
    /// Microseconds since the Unix epoch
    fn now_micros(&self) -> i64;

    /// Whole seconds since the Unix epoch
    fn now(&self) -> i64 {
        self.now_micros().div_euclid(MICROS_PER_SECOND)
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> i64 {
        Utc::now().timestamp_micros()
    }
}

/// Clock that only moves when told to
///
/// Used to test expiry and revocation ordering deterministically.
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    /// Starts at `now` whole seconds
    pub fn new(now: i64) -> Self {
        Self {
            micros: AtomicI64::new(now.saturating_mul(MICROS_PER_SECOND)),
        }
    }

    pub fn set(&self, now: i64) {
        self.micros
            .store(now.saturating_mul(MICROS_PER_SECOND), Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.advance_micros(seconds.saturating_mul(MICROS_PER_SECOND));
    }

    pub fn advance_micros(&self, micros: i64) {
        self.micros.fetch_add(micros, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.micros.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new(1_000);
        assert_eq!(clock.now(), 1_000);
        clock.advance(3_601);
        assert_eq!(clock.now(), 4_601);
        clock.set(10);
        assert_eq!(clock.now(), 10);
    }

    #[test]
    fn test_sub_second_steps_keep_the_second() {
        let clock = ManualClock::new(1_000);
        clock.advance_micros(250);

        assert_eq!(clock.now(), 1_000);
        assert_eq!(clock.now_micros(), 1_000 * MICROS_PER_SECOND + 250);
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = Utc::now().timestamp();
        let now = SystemClock.now();
        assert!(now >= before && now <= before + 1);
        assert!(SystemClock.now_micros() / MICROS_PER_SECOND >= now);
    }
}
