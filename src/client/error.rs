//! Error types for client operations.

use thiserror::Error;

use crate::transport::{HttpError, Outcome};

/// Error returned by the track and report operations.
///
/// A report whose retry budget ran out yields the same error as a report
/// that failed on its first attempt.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No response was received.
    #[error("Request failed: {0}")]
    Transport(#[from] HttpError),

    /// The service answered with a non-2xx status.
    #[error("Service responded with status {status}")]
    Status {
        /// Status code of the final response
        status: http::StatusCode,
        /// Response body, if valid UTF-8 and non-empty
        body: Option<String>,
    },

    /// A header value could not be encoded.
    #[error("Invalid value for header '{name}': {reason}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The request parameters could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The endpoint URL could not be resolved against the base URL.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RequestError {
    /// Status code of the final response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Splits a final outcome into the success body or a [`RequestError`].
pub(crate) fn into_body(outcome: Outcome) -> Result<Vec<u8>, RequestError> {
    match outcome {
        Outcome::Success(body) => Ok(body),
        Outcome::TransportFailure(e) => Err(RequestError::Transport(e)),
        Outcome::HttpFailure { status, body } => Err(RequestError::Status {
            status,
            body: String::from_utf8(body).ok().filter(|s| !s.is_empty()),
        }),
    }
}
