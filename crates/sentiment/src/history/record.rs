//! Prediction records as returned by the backend and stored in history

use serde::{Deserialize, Serialize};
use std::fmt;

// Scores are rounded to 4 decimals upstream, so exact equality is not guaranteed
const SCORE_TOLERANCE: f64 = 1e-6;

/// Predicted sentiment class
///
/// Unknown label strings are kept verbatim so stored history round-trips
/// unchanged and colour lookups can fall back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
  Neutral,
  Negative,
  Positive,
  Other(String),
}

impl Label {
  /// The three classes in backend score order
  pub const CLASSES: [Label; 3] = [Label::Neutral, Label::Negative, Label::Positive];

  pub fn as_str(&self) -> &str {
    match self {
      Label::Neutral => "neutral",
      Label::Negative => "negative",
      Label::Positive => "positive",
      Label::Other(other) => other,
    }
  }
}

impl From<String> for Label {
  fn from(value: String) -> Self {
    match value.as_str() {
      "neutral" => Label::Neutral,
      "negative" => Label::Negative,
      "positive" => Label::Positive,
      _ => Label::Other(value),
    }
  }
}

impl From<&str> for Label {
  fn from(value: &str) -> Self {
    Label::from(value.to_string())
  }
}

impl From<Label> for String {
  fn from(label: Label) -> Self {
    match label {
      Label::Other(other) => other,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One row of prediction history
///
/// Field names match both the backend payload and the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
  pub text: String,
  pub label: Label,
  pub confidence: f64,
  pub neutral_conf: f64,
  pub negative_conf: f64,
  pub positive_conf: f64,
}

impl PredictionRecord {
  pub fn new(
    text: impl Into<String>,
    label: impl Into<Label>,
    confidence: f64,
    neutral_conf: f64,
    negative_conf: f64,
    positive_conf: f64,
  ) -> Self {
    Self {
      text: text.into(),
      label: label.into(),
      confidence,
      neutral_conf,
      negative_conf,
      positive_conf,
    }
  }

  /// Per-class scores paired with their class, in backend order
  pub fn class_scores(&self) -> [(Label, f64); 3] {
    [
      (Label::Neutral, self.neutral_conf),
      (Label::Negative, self.negative_conf),
      (Label::Positive, self.positive_conf),
    ]
  }

  /// Highest of the three class scores
  pub fn max_probability(&self) -> f64 {
    self.neutral_conf.max(self.negative_conf).max(self.positive_conf)
  }

  /// Class with the highest score; ties resolve to the earlier class
  pub fn argmax_label(&self) -> Label {
    let mut best = (Label::Neutral, self.neutral_conf);
    for (label, score) in self.class_scores().into_iter().skip(1) {
      if score > best.1 {
        best = (label, score);
      }
    }
    best.0
  }

  /// Whether `confidence` is the top score and `label` names its class
  pub fn is_consistent(&self) -> bool {
    (self.max_probability() - self.confidence).abs() <= SCORE_TOLERANCE
      && self.argmax_label() == self.label
  }
}
