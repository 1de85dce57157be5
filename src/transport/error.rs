//! Error types for transport-level failures.

use thiserror::Error;

/// Error raised when no HTTP response was obtained.
///
/// Describes what went wrong without dictating recovery strategy.
/// Status-code failures are not represented here; a response with any
/// status is a successful transport call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS handshake failures and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the transport's timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built for the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Creates a [`HttpError::Connection`] from a plain message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::Connection(message.into())
    }
}
