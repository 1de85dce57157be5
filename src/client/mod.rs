//! Request client: the three service operations.
//!
//! - [`Client::fetch_redirect`]: fire-once, extracts a [`Redirect`]
//! - [`Client::track_order`]: fire-once
//! - [`Client::report_order`]: retried through a
//!   [`RetryCoordinator`](crate::retry::RetryCoordinator)
//!
//! Endpoint addresses are resolved against [`ClientOptions::base_url`];
//! there is no process-wide base URL.

mod api;
mod endpoint;
mod error;
mod options;
mod redirect;

#[cfg(test)]
mod api_tests;

pub use api::{Client, Parameters};
pub use endpoint::Endpoint;
pub use error::RequestError;
pub use options::ClientOptions;
pub use redirect::Redirect;
