//! HTTP client for the prediction proxy
//!
//! Issues exactly one request per submission and turns the outcome into a
//! [`PredictionRecord`] or an [`InferenceError`]. Payloads are trusted as-is
//! unless strict mode is enabled.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::InferenceError;
use crate::history::PredictionRecord;
use crate::server::types::{ErrorResponse, PredictRequest};

/// Shown when an error response carries no message of its own
const GENERIC_FAILURE: &str = "Request failed";

/// Something that can classify a piece of text
#[async_trait]
pub trait Predictor: Send + Sync {
  async fn predict(&self, text: &str) -> Result<PredictionRecord, InferenceError>;
}

/// Configuration for the prediction client
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Base URL of the proxy (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Reject payloads whose label and confidence disagree with the class scores
  pub strict: bool,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:3000".to_string(), strict: false }
  }
}

/// Client for `POST /api/predict` on the proxy
pub struct InferenceClient {
  client: Client,
  config: ClientConfig,
}

impl Default for InferenceClient {
  fn default() -> Self {
    Self::new()
  }
}

impl InferenceClient {
  /// Create a new client with default configuration
  pub fn new() -> Self {
    Self::with_config(ClientConfig::default())
  }

  /// Create a new client with custom configuration
  pub fn with_config(config: ClientConfig) -> Self {
    // Transport defaults apply; no timeout override
    Self { client: Client::new(), config }
  }

  /// Full URL of the prediction endpoint
  pub fn endpoint(&self) -> String {
    format!("{}/api/predict", self.config.base_url.trim_end_matches('/'))
  }

  fn check(&self, record: PredictionRecord) -> Result<PredictionRecord, InferenceError> {
    if self.config.strict && !record.is_consistent() {
      return Err(InferenceError::upstream(format!(
        "Inconsistent prediction: label '{}' with confidence {} does not match the top class score {}",
        record.label,
        record.confidence,
        record.max_probability()
      )));
    }
    Ok(record)
  }
}

/// Message carried by an error body, if it has one
fn error_message(body: &str) -> String {
  serde_json::from_str::<ErrorResponse>(body)
    .map(|response| response.error)
    .ok()
    .filter(|message| !message.is_empty())
    .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[async_trait]
impl Predictor for InferenceClient {
  async fn predict(&self, text: &str) -> Result<PredictionRecord, InferenceError> {
    if text.trim().is_empty() {
      return Err(InferenceError::validation("Please enter some text to analyze"));
    }

    let url = self.endpoint();
    tracing::debug!(%url, chars = text.chars().count(), "sending prediction request");

    let request = PredictRequest { text: text.to_string() };
    let response = self
      .client
      .post(&url)
      .json(&request)
      .send()
      .await
      .map_err(|e| InferenceError::transport(format!("{GENERIC_FAILURE}: {e}")))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| InferenceError::transport(format!("{GENERIC_FAILURE}: {e}")))?;

    if !status.is_success() {
      tracing::debug!(status = status.as_u16(), "prediction request failed");
      return Err(InferenceError::upstream(error_message(&body)));
    }

    let record: PredictionRecord = serde_json::from_str(&body)
      .map_err(|e| InferenceError::upstream(format!("Malformed prediction response: {e}")))?;

    self.check(record)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_endpoint_joins_base_url() {
    let client = InferenceClient::with_config(ClientConfig {
      base_url: "http://127.0.0.1:4000/".to_string(),
      strict: false,
    });
    assert_eq!(client.endpoint(), "http://127.0.0.1:4000/api/predict");
  }

  #[test]
  fn test_error_message_extraction() {
    assert_eq!(error_message(r#"{"error":"Method not allowed"}"#), "Method not allowed");
    assert_eq!(error_message(r#"{"error":""}"#), "Request failed");
    assert_eq!(error_message("<html>oops</html>"), "Request failed");
    assert_eq!(error_message(""), "Request failed");
  }

  #[tokio::test]
  async fn test_blank_text_is_rejected_without_a_request() {
    // Nothing listens on this port; a request would surface as a transport error
    let client = InferenceClient::with_config(ClientConfig {
      base_url: "http://127.0.0.1:9".to_string(),
      strict: false,
    });

    let result = client.predict("   ").await;
    assert!(matches!(result, Err(InferenceError::Validation { .. })));
  }

  #[test]
  fn test_strict_mode_rejects_inconsistent_records() {
    let lenient = InferenceClient::new();
    let strict = InferenceClient::with_config(ClientConfig { strict: true, ..Default::default() });
    let overridden = PredictionRecord::new("Fraud probe widens", "negative", 0.55, 0.1, 0.35, 0.55);

    assert!(lenient.check(overridden.clone()).is_ok());
    assert!(matches!(strict.check(overridden), Err(InferenceError::Upstream { .. })));

    let valid = PredictionRecord::new("Stocks rally", "positive", 0.92, 0.05, 0.03, 0.92);
    assert!(strict.check(valid).is_ok());
  }
}
