//! Retry coordinator: runs the retry state machine for one logical request.

use tokio::task::JoinHandle;

use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{Classification, HttpRequest, Outcome, Transport};

use super::{Decision, RetryPolicy, RetryState};

/// Drives repeated transport calls for one logical request.
///
/// Attempts are strictly sequential: attempt `n + 1` starts only after the
/// outcome of attempt `n` has been classified. Intermediate failures are
/// never surfaced; the caller sees exactly one [`Outcome`], either the
/// first terminal one or the last retryable one once the budget is spent.
/// Budget exhaustion is not a distinct outcome.
///
/// # Type Parameters
///
/// - `T`: The transport implementation
/// - `S`: The sleeper used for backoff waits (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use order_attribution::retry::{RetryCoordinator, RetryPolicy};
/// use order_attribution::transport::{HttpRequest, ScriptedStep, ScriptedTransport};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let transport = ScriptedTransport::new([
///     ScriptedStep::status(http::StatusCode::SERVICE_UNAVAILABLE),
///     ScriptedStep::ok(b"{}".to_vec()),
/// ]);
/// let coordinator = RetryCoordinator::new(&transport, RetryPolicy::default());
/// let request = HttpRequest::post(url::Url::parse("https://example.com/").unwrap());
///
/// let outcome = coordinator.execute(&request).await;
/// assert!(outcome.is_success());
/// assert_eq!(transport.calls(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RetryCoordinator<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl<T> RetryCoordinator<T, TokioSleeper> {
    /// Creates a coordinator that waits with [`TokioSleeper`].
    #[must_use]
    pub const fn new(transport: T, policy: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
            policy,
        }
    }
}

impl<T, S> RetryCoordinator<T, S> {
    /// Replaces the sleeper used for backoff waits.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> RetryCoordinator<T, S2> {
        RetryCoordinator {
            transport: self.transport,
            sleeper,
            policy: self.policy,
        }
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<T: Transport, S: Sleeper> RetryCoordinator<T, S> {
    /// Runs the retry chain for `request` and returns its single outcome.
    ///
    /// Each backoff wait suspends the task; the calling thread is never
    /// blocked.
    pub async fn execute(&self, request: &HttpRequest) -> Outcome {
        let mut state = RetryState::new();

        loop {
            tracing::debug!(
                attempt = state.attempt(),
                url = %request.url,
                "Sending request"
            );
            let outcome = Outcome::from(self.transport.send(request.clone()).await);

            match state.decide(&outcome, &self.policy) {
                Decision::Deliver => {
                    log_delivery(&outcome, state.calls());
                    return outcome;
                }
                Decision::RetryAfter(delay) => {
                    tracing::debug!(
                        next_attempt = state.attempt(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        status = ?outcome.status(),
                        "Retryable failure, backing off"
                    );
                    self.sleeper.sleep(delay).await;
                }
            }
        }
    }
}

impl<T, S> RetryCoordinator<T, S>
where
    T: Transport + 'static,
    S: Sleeper + 'static,
{
    /// Runs the retry chain on a spawned Tokio task and hands the outcome
    /// to `on_complete`.
    ///
    /// Returns immediately. `on_complete` is invoked exactly once, on the
    /// Tokio worker that finishes the chain; the returned handle resolves
    /// after it has run.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch<F>(self, request: HttpRequest, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        tokio::spawn(async move {
            let outcome = self.execute(&request).await;
            on_complete(outcome);
        })
    }
}

fn log_delivery(outcome: &Outcome, calls: u32) {
    match outcome {
        Outcome::Success(_) => tracing::debug!(calls, "Request succeeded"),
        Outcome::TransportFailure(e) => {
            tracing::warn!(calls, error = %e, "Request failed without a response, no retries left");
        }
        Outcome::HttpFailure { status, .. } if outcome.classify() == Classification::Retryable => {
            tracing::warn!(calls, %status, "Request failed, no retries left");
        }
        Outcome::HttpFailure { status, .. } => {
            tracing::debug!(calls, %status, "Request failed with terminal status");
        }
    }
}
