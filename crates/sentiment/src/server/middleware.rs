//! Request journaling middleware
//!
//! Every request gets an id; its method, path, status and duration are
//! written to the proxy journal once the response is ready.

use axum::{
  extract::{Request, State},
  middleware::Next,
  response::Response,
};
use bentley::journal::RequestContext;
use std::time::Instant;
use uuid::Uuid;

use crate::server::server::ProxyState;

pub async fn journal_requests(
  State(state): State<ProxyState>,
  request: Request,
  next: Next,
) -> Response {
  let request_id = Uuid::new_v4();
  let method = request.method().to_string();
  let path = request.uri().path().to_string();
  let started = Instant::now();

  let response = next.run(request).await;

  let status = response.status();
  let context = RequestContext {
    request_id: Some(request_id.to_string()),
    method: Some(method.clone()),
    path: Some(path.clone()),
    status_code: Some(status.as_u16()),
    duration_ms: Some(started.elapsed().as_secs_f64() * 1000.0),
  };

  let level = if status.is_server_error() { "error" } else { "info" };
  let message = format!("{method} {path} -> {}", status.as_u16());
  state.journal.with_context(level, &message, "http-request", context).await;

  response
}
