//! Order data shapes and their request parameters.
//!
//! - [`Order`], [`LineItem`], [`Customer`] serialize with the service's
//!   wire names
//! - [`Order::report_parameters`] and [`Order::activity_parameters`] build
//!   the bodies for [`Client::report_order`] and [`Client::track_order`]
//!
//! [`Client::report_order`]: crate::client::Client::report_order
//! [`Client::track_order`]: crate::client::Client::track_order

mod model;
mod params;


pub use model::{Customer, LineItem, Order};
