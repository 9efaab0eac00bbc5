use std::{
    sync::atomic::{AtomicI64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

/// Unit of the timestamps a [`Clock`] hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockResolution {
    Seconds,
    Milliseconds,
    #[default]
    Microseconds,
}

impl ClockResolution {
    fn now(&self) -> i64 {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let ticks = match self {
            ClockResolution::Seconds => elapsed.as_secs() as u128,
            ClockResolution::Milliseconds => elapsed.as_millis(),
            ClockResolution::Microseconds => elapsed.as_micros(),
        };
        i64::try_from(ticks).unwrap_or(i64::MAX)
    }
}

/// Write-timestamp source for a keyspace
///
/// Timestamps are strictly increasing: when the wall clock has not advanced
/// (or went backwards) since the last call, the previous value plus one is
/// returned instead.
#[derive(Debug)]
pub struct Clock {
    resolution: ClockResolution,
    last: AtomicI64,
}

impl Clock {
    pub fn new(resolution: ClockResolution) -> Self {
        Clock {
            resolution,
            last: AtomicI64::new(i64::MIN),
        }
    }

    pub fn resolution(&self) -> ClockResolution {
        self.resolution
    }

    /// Next timestamp
    pub fn create_clock(&self) -> i64 {
        let now = self.resolution.now();
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let next = if now > last { now } else { last.saturating_add(1) };
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }

    /// Make every later timestamp strictly greater than `timestamp`
    pub fn observe(&self, timestamp: i64) {
        self.last.fetch_max(timestamp, Ordering::AcqRel);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(ClockResolution::default())
    }
}
