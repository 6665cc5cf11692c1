//! Wall clock backed by the operating system.

use chrono::{DateTime, Utc};
use freightline_application::Clock;

/// Clock reading the system time.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a system clock.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
