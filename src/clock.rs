//! Clock Module
//!
//! Millisecond time source used for expiry decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Clock Trait ==
/// Source of the current time as a Unix millisecond timestamp.
///
/// All expiry math runs on timestamps obtained here, so swapping the clock
/// is enough to simulate the passage of time without sleeping.
pub trait Clock {
    /// Returns the current Unix timestamp in milliseconds.
    fn now_ms(&self) -> u64;
}

// == System Clock ==
/// Wall-clock time from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

// == Manual Clock ==
/// A clock that only moves when told to.
///
/// Intended for tests and simulations: start it anywhere, then `advance`
/// it past an expiry instead of sleeping through a real TTL.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    // == Constructor ==
    /// Creates a manual clock positioned at the given Unix millisecond.
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(start_ms),
        }
    }

    /// Creates a manual clock positioned at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now_ms())
    }

    // == Advance ==
    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now_ms
            .fetch_add(delta.as_millis() as u64, Ordering::Release);
    }

    // == Set ==
    /// Jumps the clock to an absolute Unix millisecond.
    pub fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::Release);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Acquire)
    }
}
