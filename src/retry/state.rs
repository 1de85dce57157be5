//! Per-request retry state machine.

use std::time::Duration;

use crate::transport::{Classification, Outcome};

use super::RetryPolicy;

/// What to do with the outcome of the latest attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Stop and hand the outcome to the caller.
    Deliver,
    /// Discard the outcome and attempt again after the delay.
    RetryAfter(Duration),
}

/// Attempt counter for one in-flight logical request.
///
/// [`attempt`](Self::attempt) is the index of the call in flight and picks
/// the backoff; [`calls`](Self::calls) counts completed network calls and
/// grows by one per [`decide`](Self::decide). Owned by exactly one
/// coordinator run; never shared between logical requests and never
/// persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    attempt: u32,
    calls: u32,
    finished: bool,
}

impl RetryState {
    /// Creates the state for a fresh logical request.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attempt: 0,
            calls: 0,
            finished: false,
        }
    }

    /// Index of the attempt currently in flight (0 = initial call).
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Number of network calls whose outcome has been decided.
    #[must_use]
    pub const fn calls(&self) -> u32 {
        self.calls
    }

    /// Returns true once a [`Decision::Deliver`] has been issued.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes the outcome of the current attempt and decides the next step.
    ///
    /// Counts the call, then, for a retryable outcome within budget,
    /// advances the attempt index by one and yields the backoff for the
    /// attempt that just failed. Once the state has
    /// delivered, every later call delivers again without advancing.
    pub fn decide(&mut self, outcome: &Outcome, policy: &RetryPolicy) -> Decision {
        if self.finished {
            return Decision::Deliver;
        }

        self.calls = self.calls.saturating_add(1);
        let next_attempt = self.attempt.saturating_add(1);
        let retry =
            outcome.classify() == Classification::Retryable && policy.allows(next_attempt);

        if !retry {
            self.finished = true;
            return Decision::Deliver;
        }

        let delay = policy.delay_for_attempt(self.attempt);
        self.attempt = next_attempt;
        Decision::RetryAfter(delay)
    }
}
