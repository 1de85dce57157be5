//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::client::ClientOptions;
use crate::retry::RetryPolicy;

/// Default service base URL.
pub const BASE_URL: &str = ClientOptions::DEFAULT_BASE_URL;

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = ClientOptions::DEFAULT_USER_AGENT;

/// Default maximum number of report retries.
pub const RETRY_MAX_RETRIES: u32 = RetryPolicy::DEFAULT_MAX_RETRIES;

/// Default base retry interval in milliseconds.
pub const RETRY_BASE_INTERVAL_MS: u64 = 100;

/// Default per-call network timeout in seconds.
pub const TIMEOUT_SECS: u64 = 60;

/// Default base retry interval as Duration.
#[must_use]
pub const fn retry_base_interval() -> Duration {
    Duration::from_millis(RETRY_BASE_INTERVAL_MS)
}

/// Default per-call network timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
