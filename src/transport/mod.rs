//! Transport layer: one network call per invocation.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting the network call ([`Transport`])
//! - Classifying the result of one call ([`Outcome`], [`Classification`])
//! - Production transport implementation ([`ReqwestClient`])
//! - Deterministic in-memory transport ([`ScriptedTransport`])

mod client;
mod error;
mod http;
mod outcome;
mod scripted;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use outcome::{Classification, Outcome};
pub use scripted::{ScriptedStep, ScriptedTransport};
