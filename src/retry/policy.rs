//! Retry policy configuration.

use std::time::Duration;

/// Configuration for exponential backoff retry behavior.
///
/// The delay before the retry that follows attempt `n` (0-indexed) is
/// `base_interval × 2^n`. Configured once per logical request and never
/// mutated while retrying.
///
/// # Defaults
///
/// - `max_retries`: 3 (so at most 4 network calls)
/// - `base_interval`: 100 milliseconds
///
/// # Example
///
/// ```
/// use order_attribution::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
///
/// let custom = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_base_interval(Duration::from_millis(250));
/// assert_eq!(custom.max_retries, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt.
    ///
    /// A value of 0 disables retries.
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each later retry.
    pub base_interval: Duration,
}

impl RetryPolicy {
    /// Default maximum retries.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    /// Default base interval (100 milliseconds).
    pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(100);

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            base_interval: Self::DEFAULT_BASE_INTERVAL,
        }
    }

    /// Sets the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base interval.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    #[must_use]
    pub const fn with_base_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "base_interval must be positive");
        self.base_interval = interval;
        self
    }

    /// Computes the backoff after attempt `attempt` (0-indexed).
    ///
    /// Attempt 0 waits `base`, attempt 1 waits `2 × base`, attempt 2 waits
    /// `4 × base`, and so on. Saturates at [`Duration::MAX`].
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_interval.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Returns true if attempt number `next_attempt` is within budget.
    ///
    /// Attempt 0 is the initial call; attempts `1..=max_retries` are retries.
    #[must_use]
    pub const fn allows(&self, next_attempt: u32) -> bool {
        next_attempt <= self.max_retries
    }

    /// Total wall-clock time spent in backoff if every retry is used.
    #[must_use]
    pub fn total_backoff(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| self.delay_for_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}
