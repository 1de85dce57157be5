//! Deferred deep link response handling.

use serde_json::Value;
use url::Url;

/// Result of a deferred deep link lookup.
///
/// Both fields are `None` when nothing was found, when the call failed,
/// or when the response had an unexpected shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redirect {
    /// Where the app should route the user.
    pub destination: Option<Url>,
    /// Attribution token (`btn_ref`) to attach to later order calls.
    pub attribution_token: Option<String>,
}

impl Redirect {
    /// The "not found" result.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            destination: None,
            attribution_token: None,
        }
    }

    /// Returns true if a destination was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.destination.is_some()
    }

    /// Extracts a redirect from a success body shaped as
    /// `{"object": {"action": "<url>", "attribution": {"btn_ref": "<token>"}}}`.
    ///
    /// `action` and an `attribution` object are required; a missing or
    /// non-string `btn_ref` only drops the token. Never fails.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        parse(body).unwrap_or_else(Self::none)
    }
}

fn parse(body: &[u8]) -> Option<Redirect> {
    let json: Value = serde_json::from_slice(body).ok()?;
    let object = json.get("object")?.as_object()?;
    let action = object.get("action")?.as_str()?;
    let attribution = object.get("attribution")?.as_object()?;

    let destination = Url::parse(action).ok()?;
    let attribution_token = attribution
        .get("btn_ref")
        .and_then(Value::as_str)
        .map(ToString::to_string);

    Some(Redirect {
        destination: Some(destination),
        attribution_token,
    })
}
