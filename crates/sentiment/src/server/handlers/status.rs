//! Status and version endpoint handlers

use axum::{http::StatusCode, response::Json};

use crate::server::types::VersionResponse;

/// GET /status - Health check endpoint
pub async fn status() -> StatusCode {
  StatusCode::OK
}

/// GET /version - Returns current proxy version
pub async fn version() -> Json<VersionResponse> {
  Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() })
}
