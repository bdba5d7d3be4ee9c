//! HTTP networking module
//!
//! Provides the outgoing HTTP client used by remote suggestion sources.

mod client;
mod request;

pub use client::HttpClient;
pub use request::{HttpRequest, HttpResponse};
