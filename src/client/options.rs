//! Client construction options.

use url::Url;

use crate::retry::RetryPolicy;

/// Configures the service address, user agent, and report retry policy.
///
/// Passed to [`Client::new`](super::Client::new); each client carries its
/// own copy, so concurrent clients never share mutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Base URL every endpoint path is resolved against. Always ends with `/`.
    pub base_url: Url,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Retry policy for the report operation.
    pub retry_policy: RetryPolicy,
}

impl ClientOptions {
    /// Production service address.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.usebutton.com/";

    /// User agent sent when none is configured.
    pub const DEFAULT_USER_AGENT: &'static str =
        concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

    /// Creates options for `base_url` with the default user agent and
    /// retry policy.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Sets the base URL, appending a trailing `/` when missing so that
    /// endpoint paths extend it rather than replace its last segment.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the retry policy used by the report operation.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        let base_url =
            Url::parse(Self::DEFAULT_BASE_URL).expect("default base URL is a valid constant");
        Self::new(base_url)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
