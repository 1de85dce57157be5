//! Service endpoints.

use std::fmt;

use url::Url;

/// A logical service operation and its path below the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Deferred deep link lookup for a fresh install.
    DeferredDeeplink,
    /// Client-side order activity tracking.
    OrderActivity,
    /// Authenticated order reporting.
    MobileOrder,
}

impl Endpoint {
    /// Path of the endpoint relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::DeferredDeeplink => "v1/web/deferred-deeplink",
            Self::OrderActivity => "v1/activity/order",
            Self::MobileOrder => "v1/mobile-order",
        }
    }

    /// Resolves the endpoint against `base`.
    ///
    /// `base` is expected to end with `/` (see
    /// [`ClientOptions::with_base_url`](super::ClientOptions::with_base_url)).
    ///
    /// # Errors
    ///
    /// Returns the parse error if the joined URL is invalid.
    pub fn url(self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
