//! Time source for order timestamps
//!
//! Timestamps are Unix nanoseconds as `i64`.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    fn now_nanos(&self) -> i64;
}

/// Wall-clock time via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let now = Utc::now();
        // Out of range only after year 2262
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
    }
}

/// Manually driven clock
///
/// Every read advances by `step` so successive events stay ordered.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self::with_step(start, 0)
    }

    pub fn with_step(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }

    pub fn set(&self, nanos: i64) {
        self.now.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: i64) {
        self.now.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2024() {
        assert!(SystemClock.now_nanos() > 1_704_067_200_000_000_000);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(1708123456789000000);
        assert_eq!(clock.now_nanos(), 1708123456789000000);

        clock.advance(10);
        assert_eq!(clock.now_nanos(), 1708123456789000010);

        clock.set(5);
        assert_eq!(clock.now_nanos(), 5);
    }

    #[test]
    fn test_manual_clock_step() {
        let clock = ManualClock::with_step(100, 1);
        assert_eq!(clock.now_nanos(), 100);
        assert_eq!(clock.now_nanos(), 101);
    }
}
