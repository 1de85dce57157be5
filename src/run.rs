//! Command execution.
//!
//! Builds the service client from validated configuration and runs the
//! selected subcommand against it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use order_attribution::client::{Client, Parameters, Redirect, RequestError};
use order_attribution::config::{Command, ValidatedConfig, field};
use order_attribution::order::Order;
use order_attribution::time::{Sleeper, SystemClock, local_time};
use order_attribution::transport::{ReqwestClient, Transport};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Failed to read the order file.
    #[error("Failed to read order file '{}': {source}", path.display())]
    OrderRead {
        /// Path to the order file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The order file is not a valid order.
    #[error("Failed to parse order file '{}': {source}", path.display())]
    OrderParse {
        /// Path to the order file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to encode the order for the request body.
    #[error("Failed to encode order: {0}")]
    Encode(#[source] serde_json::Error),

    /// A value the command needs was not configured.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The service request failed.
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),
}

/// Executes `command` against the configured service.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the order file
/// cannot be loaded, or the request fails.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<(), RunError> {
    let transport = ReqwestClient::with_timeout(config.timeout).map_err(RunError::ClientBuild)?;
    let client = Client::new(transport, config.client_options());

    run_command(&client, &config, command).await
}

/// Runs one subcommand with an already built client.
async fn run_command<T: Transport, S: Sleeper>(
    client: &Client<T, S>,
    config: &ValidatedConfig,
    command: Command,
) -> Result<(), RunError> {
    match command {
        Command::Init { .. } => Ok(()),
        Command::FetchRedirect { params } => {
            let application_id = required(config.application_id.as_deref(), field::APPLICATION_ID)?;
            let redirect = client
                .fetch_redirect(&redirect_parameters(application_id, params))
                .await;
            println!("{}", describe_redirect(&redirect));
            Ok(())
        }
        Command::Track { order, btn_ref } => {
            let application_id = required(config.application_id.as_deref(), field::APPLICATION_ID)?;
            let order = read_order(&order)?;
            let now = local_time(&SystemClock);
            let parameters = order.activity_parameters(application_id, btn_ref.as_deref(), &now);

            tracing::info!(order_id = %order.id, "Tracking order activity");
            client.track_order(&parameters).await?;
            Ok(())
        }
        Command::Report { order, btn_ref } => {
            let credential = required(config.credential.as_deref(), field::CREDENTIAL)?;
            let order = read_order(&order)?;
            let parameters = order
                .report_parameters(btn_ref.as_deref())
                .map_err(RunError::Encode)?;

            warn_on_malformed_email_hash(&order);

            let policy = &client.options().retry_policy;
            tracing::info!(
                order_id = %order.id,
                total = order.total(),
                max_retries = policy.max_retries,
                max_backoff_ms = u64::try_from(policy.total_backoff().as_millis()).unwrap_or(u64::MAX),
                "Reporting order"
            );
            client.report_order(&parameters, credential).await?;
            Ok(())
        }
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, RunError> {
    value.ok_or(RunError::MissingField(name))
}

/// Loads an order from a JSON file.
fn read_order(path: &Path) -> Result<Order, RunError> {
    let content = std::fs::read_to_string(path).map_err(|e| RunError::OrderRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| RunError::OrderParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Logs a warning when `customer.email_sha256` is set but is not a
/// SHA-256 hex digest. Returns true if it warned.
fn warn_on_malformed_email_hash(order: &Order) -> bool {
    let malformed =
        order.customer.email_sha256.is_some() && !order.customer.has_valid_email_hash();
    if malformed {
        tracing::warn!(
            order_id = %order.id,
            "customer.email_sha256 is not a SHA-256 hex digest; send the hash, not the address"
        );
    }
    malformed
}

/// Request body for a deferred deep link lookup.
///
/// `application_id` is always set; user-supplied pairs cannot override it.
fn redirect_parameters(application_id: &str, extra: Vec<(String, String)>) -> Parameters {
    let mut parameters: Parameters = extra
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::from(value)))
        .collect();
    parameters.insert(
        "application_id".to_string(),
        serde_json::Value::from(application_id),
    );
    parameters
}

fn describe_redirect(redirect: &Redirect) -> String {
    match (&redirect.destination, &redirect.attribution_token) {
        (Some(url), Some(token)) => format!("{url} (btn_ref: {token})"),
        (Some(url), None) => url.to_string(),
        (None, _) => "No deferred deep link".to_string(),
    }
}
