//! HTTP request/response types and the transport trait.

use std::future::Future;
use std::sync::Arc;

use super::HttpError;

/// One outgoing call: method, address, headers and optional body.
///
/// Immutable once handed to a transport; every retry re-sends an identical
/// clone. Headers use [`http::HeaderMap`], so names are case-insensitive.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: http::Method,
    /// Fully resolved endpoint address
    pub url: url::Url,
    /// Outgoing headers
    pub headers: http::HeaderMap,
    /// Encoded body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Shorthand for a `POST` to `url`; every service operation posts.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Attaches `body`, replacing any earlier one.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns the header value as a string, if present and visible ASCII.
    #[must_use]
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A received response, body read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status line code
    pub status: http::StatusCode,
    /// Headers as received
    pub headers: http::HeaderMap,
    /// Complete body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Assembles a response from its parts.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a response with the given status and body and no headers.
    #[must_use]
    pub fn with_status(status: http::StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, http::HeaderMap::new(), body.into())
    }

    /// True for 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Performs exactly one network call per invocation.
///
/// Implementations carry no retry logic and no classification beyond
/// "response received" (`Ok`, whatever the status) versus "no response"
/// (`Err`). Network problems never panic; they resolve through the
/// returned `Result`.
///
/// Implementations must not keep per-call state, so one transport can be
/// shared by any number of concurrent logical requests.
///
/// # Example
///
/// ```ignore
/// use order_attribution::transport::{HttpError, HttpRequest, HttpResponse, Transport};
///
/// struct AlwaysOk;
///
/// impl Transport for AlwaysOk {
///     async fn send(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::with_status(http::StatusCode::OK, b"{}".to_vec()))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Performs the call once.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response was received:
    /// [`HttpError::Connection`], [`HttpError::Timeout`] or
    /// [`HttpError::InvalidUrl`].
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(req)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        req: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, HttpError>> + Send {
        (**self).send(req)
    }
}
