//! Request journal endpoint

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::Json,
};

use crate::server::server::ProxyState;
use crate::server::types::{ErrorResponse, LogsQuery, LogsResponse};

const DEFAULT_LIMIT: usize = 50;

/// GET /logs - Recent journal entries, oldest first
pub async fn get_logs(
  State(state): State<ProxyState>,
  Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>, (StatusCode, Json<ErrorResponse>)> {
  let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

  match state.journal.entries(Some(limit), query.level.as_deref()).await {
    Ok(logs) => Ok(Json(LogsResponse { logs })),
    Err(e) => Err((
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(ErrorResponse::new(format!("Failed to read logs: {e}"))),
    )),
  }
}
