//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Service configuration section
    #[serde(default)]
    pub service: ServiceSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Transport configuration
    #[serde(default)]
    pub transport: TransportSection,
}

/// Service configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceSection {
    /// Service base URL
    pub base_url: Option<String>,

    /// User-Agent header value
    pub user_agent: Option<String>,

    /// Application id for tracking and deep link calls
    pub application_id: Option<String>,

    /// Encoded credential for the report Authorization header
    pub credential: Option<String>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of report retries
    pub max_retries: Option<u32>,

    /// Base retry interval in milliseconds
    pub base_interval_ms: Option<u64>,
}

/// Transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Per-call network timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# order-attribution configuration file

[service]
# Service base URL (default: https://api.usebutton.com/)
# base_url = "https://api.usebutton.com/"

# User-Agent header value (default: order-attribution/<version>)
# user_agent = "my-shop/1.0"

# Application id, required by `track` and `fetch-redirect`
# application_id = "app-xxxxxxxxxxxxxxxx"

# Encoded credential, required by `report`.
# Sent as "Authorization: Basic <credential>:"
# credential = "..."

[retry]
# Maximum number of report retries (default: 3)
# Only 429 and 5xx responses and network failures are retried.
# max_retries = 3

# Base retry interval in milliseconds (default: 100)
# Waits are base, 2 x base, 4 x base, ...
# base_interval_ms = 100

[transport]
# Per-call network timeout in seconds (default: 60)
# timeout_secs = 60
"#
    .to_string()
}
