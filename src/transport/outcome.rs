//! Result of a single network call and its retry classification.

use super::{HttpError, HttpResponse};

/// Tagged result of one network call.
///
/// Produced by converting the transport's `Result`; consumed by the
/// retry layer within one attempt.
#[derive(Debug)]
pub enum Outcome {
    /// A 2xx or 3xx response was received.
    Success(Vec<u8>),
    /// No response was received.
    TransportFailure(HttpError),
    /// A response with any other status was received.
    HttpFailure {
        /// Status code of the response
        status: http::StatusCode,
        /// Response body (possibly empty)
        body: Vec<u8>,
    },
}

/// Whether an [`Outcome`] ends the retry chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Deliver the outcome to the caller.
    Terminal,
    /// Attempt again if the retry budget allows.
    Retryable,
}

impl Outcome {
    /// Classifies the outcome for retry purposes.
    ///
    /// Transport failures, `429 Too Many Requests` and every `5xx` are
    /// retryable. Success and all other statuses are terminal.
    #[must_use]
    pub fn classify(&self) -> Classification {
        match self {
            Self::Success(_) => Classification::Terminal,
            Self::TransportFailure(_) => Classification::Retryable,
            Self::HttpFailure { status, .. } => {
                if status.is_server_error() || *status == http::StatusCode::TOO_MANY_REQUESTS {
                    Classification::Retryable
                } else {
                    Classification::Terminal
                }
            }
        }
    }

    /// Returns true for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the status code of an [`Outcome::HttpFailure`].
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::HttpFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<Result<HttpResponse, HttpError>> for Outcome {
    fn from(result: Result<HttpResponse, HttpError>) -> Self {
        match result {
            Ok(response) if response.is_success() || response.status.is_redirection() => {
                Self::Success(response.body)
            }
            Ok(response) => Self::HttpFailure {
                status: response.status,
                body: response.body,
            },
            Err(e) => Self::TransportFailure(e),
        }
    }
}
