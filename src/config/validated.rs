//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::client::ClientOptions;
use crate::retry::RetryPolicy;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Service base URL
    pub base_url: Url,

    /// User-Agent header value
    pub user_agent: String,

    /// Application id (required by `track` and `fetch-redirect`)
    pub application_id: Option<String>,

    /// Encoded report credential (required by `report`)
    pub credential: Option<String>,

    /// Retry policy for the report operation
    pub retry_policy: RetryPolicy,

    /// Per-call network timeout
    pub timeout: Duration,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, user_agent: {}, application_id: {}, credential: {}, \
             retry: {}x/{}ms, timeout: {}s }}",
            self.base_url,
            self.user_agent,
            self.application_id.as_deref().unwrap_or("none"),
            if self.credential.is_some() { "set" } else { "none" },
            self.retry_policy.max_retries,
            self.retry_policy.base_interval.as_millis(),
            self.timeout.as_secs(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A field required by the selected command is missing
    /// - The base URL is invalid
    /// - The user agent is not a valid header value
    /// - The retry interval or timeout is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let base_url = Self::resolve_base_url(cli, toml)?;
        let user_agent = Self::resolve_user_agent(cli, toml)?;

        let application_id = cli
            .application_id
            .clone()
            .or_else(|| toml.and_then(|t| t.service.application_id.clone()));
        if application_id.is_none() && cli.command.needs_application_id() {
            return Err(ConfigError::missing(
                field::APPLICATION_ID,
                "Use --application-id or set service.application_id in config file",
            ));
        }

        let credential = cli
            .credential
            .clone()
            .or_else(|| toml.and_then(|t| t.service.credential.clone()));
        if credential.is_none() && cli.command.needs_credential() {
            return Err(ConfigError::missing(
                field::CREDENTIAL,
                "Use --credential or set service.credential in config file",
            ));
        }

        let retry_policy = Self::build_retry_policy(cli, toml)?;
        let timeout = Self::resolve_timeout(cli, toml)?;

        Ok(Self {
            base_url,
            user_agent,
            application_id,
            credential,
            retry_policy,
            timeout,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Client options derived from this configuration.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::new(self.base_url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_retry_policy(self.retry_policy.clone())
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.service.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_user_agent(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let user_agent = cli
            .user_agent
            .as_deref()
            .or_else(|| toml.and_then(|t| t.service.user_agent.as_deref()))
            .unwrap_or(defaults::USER_AGENT);

        if HeaderValue::from_str(user_agent).is_err() {
            return Err(ConfigError::InvalidUserAgent {
                value: user_agent.to_string(),
            });
        }

        Ok(user_agent.to_string())
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_retries = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_retries))
            .unwrap_or(defaults::RETRY_MAX_RETRIES);

        let base_interval_ms = cli
            .retry_interval_ms
            .or_else(|| retry.and_then(|r| r.base_interval_ms))
            .unwrap_or(defaults::RETRY_BASE_INTERVAL_MS);

        if base_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "retry.base_interval_ms",
            });
        }

        Ok(RetryPolicy::new()
            .with_max_retries(max_retries)
            .with_base_interval(Duration::from_millis(base_interval_ms)))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        let seconds = cli
            .timeout_secs
            .or_else(|| toml.and_then(|t| t.transport.timeout_secs))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "transport.timeout_secs",
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
