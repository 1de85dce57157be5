//! Service client implementation.

use http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};

use crate::retry::RetryCoordinator;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{HttpRequest, Outcome, Transport};

use super::error::into_body;
use super::{ClientOptions, Endpoint, Redirect, RequestError};

/// Caller-supplied key/value parameters, sent as the JSON request body.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Client for the attribution service.
///
/// Selects fire-once or retried delivery per operation and attaches the
/// operation's headers and body. It has no retry logic of its own; the
/// report operation delegates to a fresh [`RetryCoordinator`] per call.
///
/// Every operation is a logical request with its own state, so one client
/// may run any number of operations concurrently.
///
/// # Type Parameters
///
/// - `T`: The transport implementation
/// - `S`: The sleeper for report backoff (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use order_attribution::client::{Client, ClientOptions};
/// use order_attribution::transport::ReqwestClient;
///
/// let client = Client::new(ReqwestClient::new(), ClientOptions::default());
/// assert_eq!(client.options().retry_policy.max_retries, 3);
/// ```
#[derive(Debug)]
pub struct Client<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    options: ClientOptions,
}

impl<T> Client<T, TokioSleeper> {
    /// Creates a client that waits between report retries with [`TokioSleeper`].
    #[must_use]
    pub const fn new(transport: T, options: ClientOptions) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
            options,
        }
    }
}

impl<T, S> Client<T, S> {
    /// Sets a custom sleeper for report retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Client<T, S2> {
        Client {
            transport: self.transport,
            sleeper,
            options: self.options,
        }
    }

    /// Returns the client options.
    #[must_use]
    pub const fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the POST request for `endpoint`.
    ///
    /// Always sets `User-Agent`. With parameters, the body is their JSON
    /// encoding and `Content-Type: application/json` is set.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the URL cannot be resolved, the user
    /// agent is not a valid header value, or the body cannot be encoded.
    pub fn build_request(
        &self,
        endpoint: Endpoint,
        parameters: Option<&Parameters>,
    ) -> Result<HttpRequest, RequestError> {
        let url = endpoint.url(&self.options.base_url)?;
        let user_agent = header_value("User-Agent", &self.options.user_agent)?;
        let mut request = HttpRequest::post(url).with_header(USER_AGENT, user_agent);

        if let Some(parameters) = parameters {
            let body = serde_json::to_vec(parameters)?;
            request = request
                .with_body(body)
                .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(request)
    }
}

impl<T: Transport, S: Sleeper> Client<T, S> {
    /// Looks up the deferred deep link for this install. Fire-once.
    ///
    /// Any failure (build error, transport error, non-2xx status, or an
    /// unexpected body) yields [`Redirect::none`].
    pub async fn fetch_redirect(&self, parameters: &Parameters) -> Redirect {
        let request = match self.build_request(Endpoint::DeferredDeeplink, Some(parameters)) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Could not build deferred deep link request");
                return Redirect::none();
            }
        };

        match into_body(self.send_once(request).await) {
            Ok(body) => {
                let redirect = Redirect::from_body(&body);
                tracing::debug!(found = redirect.is_found(), "Deferred deep link fetched");
                redirect
            }
            Err(e) => {
                tracing::debug!(error = %e, "Deferred deep link lookup failed");
                Redirect::none()
            }
        }
    }

    /// Sends order activity to the tracking endpoint. Fire-once.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the request cannot be built, no
    /// response is received, or the status is not 2xx.
    pub async fn track_order(&self, parameters: &Parameters) -> Result<(), RequestError> {
        let request = self.build_request(Endpoint::OrderActivity, Some(parameters))?;
        into_body(self.send_once(request).await)?;
        tracing::debug!("Order activity tracked");
        Ok(())
    }

    /// Reports an order, retrying transient failures with the configured
    /// [`RetryPolicy`](crate::retry::RetryPolicy).
    ///
    /// Adds `Authorization: Basic <credential>:`. Resolves once the whole
    /// retry chain has finished.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] carrying the outcome that ended the chain.
    /// Exhausting the retry budget is reported exactly like a single
    /// failed attempt.
    pub async fn report_order(
        &self,
        parameters: &Parameters,
        credential: &str,
    ) -> Result<(), RequestError> {
        let authorization = header_value("Authorization", &format!("Basic {credential}:"))?;
        let request = self
            .build_request(Endpoint::MobileOrder, Some(parameters))?
            .with_header(AUTHORIZATION, authorization);

        let coordinator = RetryCoordinator::new(&self.transport, self.options.retry_policy.clone())
            .with_sleeper(&self.sleeper);
        into_body(coordinator.execute(&request).await)?;
        tracing::info!("Order reported");
        Ok(())
    }

    async fn send_once(&self, request: HttpRequest) -> Outcome {
        tracing::debug!(url = %request.url, "Sending request");
        Outcome::from(self.transport.send(request).await)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, RequestError> {
    HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}
