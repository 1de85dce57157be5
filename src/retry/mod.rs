//! Retry layer: drives repeated transport calls for one logical request.
//!
//! - [`RetryPolicy`] fixes the budget and the backoff base
//! - [`RetryState`] is the per-request state machine (attempt counter and
//!   retry decision)
//! - [`RetryCoordinator`] runs the state machine against a [`Transport`]
//!   and a [`Sleeper`]
//!
//! [`Transport`]: crate::transport::Transport
//! [`Sleeper`]: crate::time::Sleeper

mod coordinator;
mod policy;
mod state;


pub use coordinator::RetryCoordinator;
pub use policy::RetryPolicy;
pub use state::{Decision, RetryState};
