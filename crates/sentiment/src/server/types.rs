//! Wire types shared by the proxy and its clients

use serde::{Deserialize, Serialize};

/// Body of `POST /api/predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
  pub text: String,
}

/// Body of every proxy error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}

impl ErrorResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self { error: message.into() }
  }
}

/// Response for /version endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
  pub version: String,
}

/// Query for /logs endpoint
#[derive(Debug, Default, Deserialize)]
pub struct LogsQuery {
  /// Maximum number of entries, newest kept
  pub limit: Option<usize>,
  /// Level filter (info, warn, error, all)
  pub level: Option<String>,
}

/// Response for /logs endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LogsResponse {
  pub logs: Vec<LogEntry>,
}

/// Individual log entry (re-exported from bentley)
pub type LogEntry = bentley::journal::JournalEntry;
