//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why a usable configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    FileRead {
        /// Config file location
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML, or names an unknown key.
    #[error("Invalid config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// `init` could not write the template.
    #[error("Cannot write config template to '{}': {source}", path.display())]
    FileWrite {
        /// Target location
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selected command needs a value that was not supplied.
    #[error("{field} is required for this command. {hint}")]
    MissingRequired {
        /// Setting name, one of the [`field`] constants
        field: &'static str,
        /// Where the value can be supplied
        hint: &'static str,
    },

    /// The base URL does not parse or is not http(s).
    #[error("Base URL '{url}' rejected: {reason}")]
    InvalidUrl {
        /// Value as given
        url: String,
        reason: String,
    },

    /// An interval setting was zero.
    #[error("{field} must be greater than 0")]
    ZeroInterval {
        /// Setting name as written in the config file
        field: &'static str,
    },

    /// The user agent cannot be sent as a header value.
    #[error("User agent '{value}' is not a valid header value")]
    InvalidUserAgent {
        /// Value as given
        value: String,
    },
}

/// Names of settings that individual commands require.
pub mod field {
    /// Report credential, needed by `report`.
    pub const CREDENTIAL: &str = "credential";
    /// Application id, needed by `track` and `fetch-redirect`.
    pub const APPLICATION_ID: &str = "application_id";
}

impl ConfigError {
    #[must_use]
    pub(crate) const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
