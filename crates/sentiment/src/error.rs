//! Error taxonomy for inference and history persistence

use thiserror::Error;

/// Failure of a single prediction request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
  #[error("{message}")]
  Validation { message: String },

  #[error("{message}")]
  Transport { message: String },

  #[error("{message}")]
  Upstream { message: String },
}

impl InferenceError {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }

  pub fn transport(message: impl Into<String>) -> Self {
    Self::Transport { message: message.into() }
  }

  pub fn upstream(message: impl Into<String>) -> Self {
    Self::Upstream { message: message.into() }
  }

  /// The message shown to the user
  pub fn message(&self) -> &str {
    match self {
      Self::Validation { message } | Self::Transport { message } | Self::Upstream { message } => {
        message
      }
    }
  }
}

/// Failure reading or writing the history slot
#[derive(Error, Debug)]
pub enum PersistenceError {
  #[error("Failed to read history slot '{slot}': {source}")]
  Read { slot: String, source: std::io::Error },

  #[error("Failed to write history slot '{slot}': {source}")]
  Write { slot: String, source: std::io::Error },

  #[error("History slot '{slot}' is not valid JSON: {source}")]
  Parse { slot: String, source: serde_json::Error },

  #[error("Failed to serialize history: {0}")]
  Serialize(#[source] serde_json::Error),
}
