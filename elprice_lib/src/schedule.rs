//! Hour-boundary arithmetic and cancellable sleeping.

use std::time::Duration;

use chrono::{DateTime, Local, Timelike};
use tokio_util::sync::CancellationToken;

pub const SECONDS_PER_HOUR: u32 = 3600;

/// Source of wall-clock time for the pipeline.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Seconds left until the next `HH:00:00`.
///
/// Exactly on the hour this is a full hour, never zero. Sub-second precision
/// is ignored, so `HH:59:59.9` still yields 1.
pub fn seconds_until_next_hour<T: Timelike>(now: &T) -> u32 {
    SECONDS_PER_HOUR - (now.minute() * 60 + now.second())
}

pub fn until_next_hour<T: Timelike>(now: &T) -> Duration {
    Duration::from_secs(u64::from(seconds_until_next_hour(now)))
}

/// Sleeps for `delay` unless `cancel` fires first.
///
/// Returns `true` when the full delay elapsed and `false` on cancellation.
pub async fn sleep_or_cancel(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}
