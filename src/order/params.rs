//! Request parameters built from an order.

use chrono::{DateTime, TimeZone};
use serde_json::Value;

use crate::client::Parameters;
use crate::time::event_iso8601;

use super::Order;

/// Value of the `source` field on activity calls.
const ACTIVITY_SOURCE: &str = "merchant-library";

impl Order {
    /// Body for the report operation: the serialized order plus `btn_ref`
    /// when an attribution token is known.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the order cannot be encoded.
    pub fn report_parameters(
        &self,
        attribution_token: Option<&str>,
    ) -> Result<Parameters, serde_json::Error> {
        let mut parameters: Parameters = serde_json::from_value(serde_json::to_value(self)?)?;
        if let Some(token) = attribution_token {
            parameters.insert("btn_ref".to_string(), Value::from(token));
        }
        Ok(parameters)
    }

    /// Body for the track operation.
    ///
    /// Carries the application id, the caller's local time with
    /// millisecond precision, the order id, total and currency, and
    /// `btn_ref` when an attribution token is known.
    #[must_use]
    pub fn activity_parameters<Tz>(
        &self,
        application_id: &str,
        attribution_token: Option<&str>,
        local_time: &DateTime<Tz>,
    ) -> Parameters
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let mut parameters = Parameters::new();
        parameters.insert("app_id".to_string(), Value::from(application_id));
        parameters.insert(
            "user_local_time".to_string(),
            Value::from(event_iso8601(local_time)),
        );
        if let Some(token) = attribution_token {
            parameters.insert("btn_ref".to_string(), Value::from(token));
        }
        parameters.insert("order_id".to_string(), Value::from(self.id.as_str()));
        parameters.insert("total".to_string(), Value::from(self.total()));
        parameters.insert(
            "currency".to_string(),
            Value::from(self.currency_code.as_str()),
        );
        parameters.insert("source".to_string(), Value::from(ACTIVITY_SOURCE));
        parameters
    }
}
