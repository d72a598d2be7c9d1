//! Time source for `_now()`

use std::fmt::Debug;

/// Source of the request timestamp in Unix seconds
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> i64;
}

/// Wall clock in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Clock frozen at a fixed timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
