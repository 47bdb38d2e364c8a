//! Axum router configuration for all endpoints

use axum::{
  middleware::from_fn_with_state,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{logs, predict, status};
use crate::server::middleware::journal_requests;
use crate::server::server::ProxyState;

/// Create the proxy router with shared state
pub fn create_router(state: ProxyState) -> Router {
  Router::new()
    // Status and version endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    // Journal
    .route("/logs", get(logs::get_logs))
    // Prediction forwarding; every other method is refused
    .route("/api/predict", post(predict::predict).fallback(predict::method_not_allowed))
    .layer(from_fn_with_state(state.clone(), journal_requests))
    .with_state(state)
}
