//! Time abstractions for testability.
//!
//! This module provides:
//! - [`Clock`] for reading wall-clock time (used for `user_local_time` stamps)
//! - [`Sleeper`] for the backoff wait between retry attempts
//! - ISO-8601 formatting helpers matching the service's date formats

use std::future::Future;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local, TimeZone};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use order_attribution::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Timer abstraction used to defer the next retry attempt.
///
/// The wait must suspend the current task without blocking the thread
/// it runs on. Tests substitute [`InstantSleeper`] or a recording sleeper.
pub trait Sleeper: Send + Sync {
    /// Suspends the calling task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by `tokio::time::sleep`.
///
/// Under a paused Tokio clock (`start_paused = true`) the wait advances
/// virtual time, which keeps timing tests deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

impl<S: Sleeper> Sleeper for &S {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        (**self).sleep(duration)
    }
}

/// Second-precision ISO-8601 format, e.g. `2019-06-17T12:08:10-04:00`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Millisecond-precision ISO-8601 format used for event timestamps,
/// e.g. `2019-06-17T12:08:10.123-04:00`.
pub const EVENT_ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Formats a date with [`ISO8601_FORMAT`].
#[must_use]
pub fn iso8601<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(ISO8601_FORMAT).to_string()
}

/// Formats a date with [`EVENT_ISO8601_FORMAT`].
#[must_use]
pub fn event_iso8601<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(EVENT_ISO8601_FORMAT).to_string()
}

/// Parses an event timestamp produced by [`event_iso8601`].
#[must_use]
pub fn parse_event_iso8601(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_str(value, EVENT_ISO8601_FORMAT).ok()
}

/// Converts a clock reading to the local time zone.
#[must_use]
pub fn local_time(clock: &impl Clock) -> DateTime<Local> {
    DateTime::<Local>::from(clock.now())
}
