//! Order attribution client
//!
//! A library for resolving deferred deep links and tracking or reporting
//! orders against an attribution service. Order reports are retried with
//! exponential backoff on transient failures.

pub mod client;
pub mod config;
pub mod order;
pub mod retry;
pub mod time;
pub mod transport;
