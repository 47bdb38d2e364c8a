//! Prediction proxy service
//!
//! A stateless forwarder between the console and the inference backend,
//! built on axum. It validates the method, relays the backend payload and
//! turns any failure into a JSON error body.

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod types;

pub use server::{start_server, ProxyConfig, ProxyState};
