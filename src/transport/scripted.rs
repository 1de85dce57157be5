//! Deterministic in-memory transport.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use super::{HttpError, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Status(http::StatusCode, Vec<u8>),
    Timeout,
    Connection(String),
}

/// One scripted reply of a [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct ScriptedStep {
    reply: Reply,
    latency: Duration,
}

impl ScriptedStep {
    /// Replies with `status` and an empty body.
    #[must_use]
    pub const fn status(status: http::StatusCode) -> Self {
        Self::respond(status, Vec::new())
    }

    /// Replies with `status` and `body`.
    #[must_use]
    pub const fn respond(status: http::StatusCode, body: Vec<u8>) -> Self {
        Self {
            reply: Reply::Status(status, body),
            latency: Duration::ZERO,
        }
    }

    /// Replies `200 OK` with `body`.
    #[must_use]
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::respond(http::StatusCode::OK, body.into())
    }

    /// Fails with [`HttpError::Timeout`].
    #[must_use]
    pub const fn timeout() -> Self {
        Self {
            reply: Reply::Timeout,
            latency: Duration::ZERO,
        }
    }

    /// Fails with [`HttpError::Connection`] carrying `message`.
    #[must_use]
    pub fn connection_error(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Connection(message.into()),
            latency: Duration::ZERO,
        }
    }

    /// Delays the reply by `latency` (Tokio time, so a paused clock applies).
    #[must_use]
    pub const fn delayed(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn to_result(&self) -> Result<HttpResponse, HttpError> {
        match &self.reply {
            Reply::Status(status, body) => Ok(HttpResponse::with_status(*status, body.clone())),
            Reply::Timeout => Err(HttpError::Timeout),
            Reply::Connection(message) => Err(HttpError::connection(message.clone())),
        }
    }
}

/// A request observed by a [`ScriptedTransport`].
#[derive(Debug, Clone)]
struct RecordedCall {
    at: Instant,
    request: HttpRequest,
}

/// Transport that replays a fixed script of replies.
///
/// The n-th call receives the n-th step; once the script is exhausted
/// the last step repeats. An empty script fails every call with a
/// connection error. Every request is recorded together with the Tokio
/// instant at which it arrived, so backoff timing can be asserted under
/// a paused clock.
///
/// # Example
///
/// ```
/// use order_attribution::transport::{ScriptedStep, ScriptedTransport};
///
/// let transport = ScriptedTransport::new([
///     ScriptedStep::status(http::StatusCode::TOO_MANY_REQUESTS),
///     ScriptedStep::ok(br#"{"ok":true}"#.to_vec()),
/// ]);
/// assert_eq!(transport.calls(), 0);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Vec<ScriptedStep>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    /// Creates a transport replaying `steps` in order.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = ScriptedStep>) -> Self {
        Self {
            script: steps.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport that answers every call with `step`.
    #[must_use]
    pub fn always(step: ScriptedStep) -> Self {
        Self::new([step])
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.recorded().len()
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.recorded().iter().map(|c| c.request.clone()).collect()
    }

    /// Arrival instants of the calls received so far.
    #[must_use]
    pub fn call_instants(&self) -> Vec<Instant> {
        self.recorded().iter().map(|c| c.at).collect()
    }

    /// Gaps between consecutive calls.
    #[must_use]
    pub fn gaps(&self) -> Vec<Duration> {
        self.call_instants()
            .windows(2)
            .map(|pair| pair[1].duration_since(pair[0]))
            .collect()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_step(&self, request: HttpRequest) -> Option<ScriptedStep> {
        let mut calls = self.recorded();
        let index = calls.len();
        calls.push(RecordedCall {
            at: Instant::now(),
            request,
        });
        self.script
            .get(index)
            .or_else(|| self.script.last())
            .cloned()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let Some(step) = self.next_step(req) else {
            return Err(HttpError::connection("script is empty"));
        };

        if !step.latency.is_zero() {
            tokio::time::sleep(step.latency).await;
        }

        step.to_result()
    }
}
