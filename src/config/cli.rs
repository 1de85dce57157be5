//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Order attribution client
///
/// Fetches deferred deep links and tracks or reports orders against the
/// attribution service. Reports are retried with exponential backoff.
#[derive(Debug, Parser)]
#[command(name = "order-attribution")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Service base URL
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// User-Agent header value
    #[arg(long = "user-agent", global = true)]
    pub user_agent: Option<String>,

    /// Application id sent with tracking and deep link calls
    #[arg(long = "application-id", global = true)]
    pub application_id: Option<String>,

    /// Encoded credential for the report Authorization header
    #[arg(long, global = true)]
    pub credential: Option<String>,

    /// Maximum number of report retries
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Base retry interval in milliseconds (doubled per retry)
    #[arg(long = "retry-interval-ms", global = true)]
    pub retry_interval_ms: Option<u64>,

    /// Per-call network timeout in seconds
    #[arg(long = "timeout-secs", global = true)]
    pub timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for order-attribution
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "order-attribution.toml")]
        output: PathBuf,
    },

    /// Look up the deferred deep link for an install
    FetchRedirect {
        /// Extra request parameter in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "param", value_name = "K=V", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Send order activity (single attempt)
    Track {
        /// Path to the order JSON file
        #[arg(long)]
        order: PathBuf,

        /// Attribution token from a previous deep link lookup
        #[arg(long = "btn-ref")]
        btn_ref: Option<String>,
    },

    /// Report an order (retried on transient failures)
    Report {
        /// Path to the order JSON file
        #[arg(long)]
        order: PathBuf,

        /// Attribution token from a previous deep link lookup
        #[arg(long = "btn-ref")]
        btn_ref: Option<String>,
    },
}

impl Command {
    /// Returns true if this command needs the report credential.
    #[must_use]
    pub const fn needs_credential(&self) -> bool {
        matches!(self, Self::Report { .. })
    }

    /// Returns true if this command needs the application id.
    #[must_use]
    pub const fn needs_application_id(&self) -> bool {
        matches!(self, Self::Track { .. } | Self::FetchRedirect { .. })
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected 'Key=Value', got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
