//! Prediction forwarding handler

use axum::{
  body::Bytes,
  extract::{rejection::JsonRejection, Json, State},
  http::{header, StatusCode},
  response::{IntoResponse, Json as ResponseJson, Response},
};

use crate::server::server::ProxyState;
use crate::server::types::{ErrorResponse, PredictRequest};

type Failure = (StatusCode, ResponseJson<ErrorResponse>);

fn failure(status: StatusCode, message: impl Into<String>) -> Failure {
  (status, ResponseJson(ErrorResponse::new(message)))
}

/// POST /api/predict - Forward text to the backend and relay its payload verbatim
pub async fn predict(
  State(state): State<ProxyState>,
  payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Response, Failure> {
  let request = match payload {
    Ok(Json(request)) => request,
    Err(rejection) => {
      let message = rejection.body_text();
      state.journal.warn(&format!("Rejected prediction request: {message}"), "predict").await;
      return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, message));
    }
  };

  match forward(&state, &request.text).await {
    Ok(payload) => Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response()),
    Err(message) => {
      state.journal.error(&format!("Backend request failed: {message}"), "predict").await;
      Err(failure(StatusCode::INTERNAL_SERVER_ERROR, message))
    }
  }
}

/// Any other method on /api/predict
pub async fn method_not_allowed() -> Failure {
  failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Post `text` form-encoded to the backend's /predict; the body comes back untouched
async fn forward(state: &ProxyState, text: &str) -> Result<Bytes, String> {
  let url = format!("{}/predict", state.backend_url.trim_end_matches('/'));

  let response =
    state.http.post(&url).form(&[("text", text)]).send().await.map_err(|e| e.to_string())?;

  let status = response.status();
  if !status.is_success() {
    return Err(format!("Request failed with status code {}", status.as_u16()));
  }

  response.bytes().await.map_err(|e| e.to_string())
}
