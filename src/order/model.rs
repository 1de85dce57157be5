//! Order, line item and customer models.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::time::iso8601;

fn default_currency() -> String {
    Order::DEFAULT_CURRENCY.to_string()
}

const fn default_quantity() -> u32 {
    1
}

/// An order placed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Merchant order identifier.
    #[serde(rename = "order_id")]
    pub id: String,

    /// Purchase date as ISO-8601 with second precision.
    pub purchase_date: String,

    /// Line items that make up the order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,

    /// ISO 4217 currency code.
    #[serde(rename = "currency", default = "default_currency")]
    pub currency_code: String,

    /// Customer-facing order id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_order_id: Option<String>,

    /// The transacting customer.
    #[serde(default, skip_serializing_if = "Customer::is_empty")]
    pub customer: Customer,
}

impl Order {
    /// Currency used when none is given.
    pub const DEFAULT_CURRENCY: &'static str = "USD";

    /// Creates an order in [`Order::DEFAULT_CURRENCY`].
    #[must_use]
    pub fn new<Tz>(id: impl Into<String>, purchase_date: &DateTime<Tz>, line_items: Vec<LineItem>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: id.into(),
            purchase_date: iso8601(purchase_date),
            line_items,
            currency_code: default_currency(),
            customer_order_id: None,
            customer: Customer::default(),
        }
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }

    /// Sets the customer-facing order id.
    #[must_use]
    pub fn with_customer_order_id(mut self, id: impl Into<String>) -> Self {
        self.customer_order_id = Some(id.into());
        self
    }

    /// Sets the customer.
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = customer;
        self
    }

    /// Sum of all line item totals, in the currency's smallest unit.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.line_items.iter().map(|item| item.total).sum()
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line item identifier, unique within the order.
    pub id: String,

    /// Total price in the currency's smallest unit (e.g. 3999 for $39.99).
    pub total: i64,

    /// Number of units.
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Universal product code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,

    /// Category path, most general first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,

    /// Extra key/value attributes.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl LineItem {
    /// Creates a single-unit line item.
    #[must_use]
    pub fn new(id: impl Into<String>, total: i64) -> Self {
        Self {
            id: id.into(),
            total,
            quantity: default_quantity(),
            description: None,
            sku: None,
            upc: None,
            category: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// Sets the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the SKU.
    #[must_use]
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The customer of an order.
///
/// `email_sha256` must be the SHA-256 of the lowercased email as a
/// 64-character hex string; hashing is left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer id in the merchant's system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// SHA-256 of the lowercased email, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sha256: Option<String>,

    /// Advertising identifier of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertising_id: Option<String>,
}

impl Customer {
    /// Returns true if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.id.is_none() && self.email_sha256.is_none() && self.advertising_id.is_none()
    }

    /// Returns true if `email_sha256` looks like a SHA-256 hex digest.
    #[must_use]
    pub fn has_valid_email_hash(&self) -> bool {
        self.email_sha256
            .as_deref()
            .is_some_and(|hash| hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit()))
    }
}
