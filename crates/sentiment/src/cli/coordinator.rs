//! Interaction loop state
//!
//! The coordinator owns the history and its store. A submission moves it from
//! `Idle` to `Submitting`; settling the submission appends and persists on
//! success or records the error on failure, then returns to `Idle`. While a
//! submission is in flight every further submission is ignored.

use crate::cli::client::Predictor;
use crate::error::InferenceError;
use crate::history::projection::{
  self, label_color, ChartColor, MaxProbabilityProjection, MultiSeriesProjection,
};
use crate::history::store::HistoryStore;
use crate::history::{History, Label, PredictionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
  Idle,
  Submitting,
}

/// Why a submission was not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
  /// Another submission is still in flight
  Busy,
  /// The text was empty or whitespace
  EmptyText,
}

/// How a submission settled
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
  Succeeded,
  Failed(InferenceError),
  Ignored(Rejection),
}

/// An in-flight submission; must be handed back to [`ViewCoordinator::finish`]
#[derive(Debug)]
#[must_use = "a submission left unfinished keeps the coordinator busy"]
pub struct Submission {
  text: String,
}

impl Submission {
  pub fn text(&self) -> &str {
    &self.text
  }
}

/// One row of the history table
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
  pub text: String,
  pub label: Label,
  pub confidence: f64,
  pub color: ChartColor,
}

/// Everything the view renders, derived from one history snapshot
#[derive(Debug, Clone)]
pub struct ViewModel<'a> {
  pub history: &'a History,
  pub rows: Vec<TableRow>,
  pub trend: MultiSeriesProjection,
  pub max_probability: MaxProbabilityProjection,
  pub result: Option<&'a PredictionRecord>,
  pub error: Option<&'a str>,
  pub busy: bool,
}

pub struct ViewCoordinator {
  store: HistoryStore,
  history: History,
  state: ViewState,
  result: Option<PredictionRecord>,
  error: Option<String>,
}

impl ViewCoordinator {
  /// Load history from `store` and start idle
  pub fn new(store: HistoryStore) -> Self {
    let history = store.load();
    Self { store, history, state: ViewState::Idle, result: None, error: None }
  }

  pub fn state(&self) -> ViewState {
    self.state
  }

  pub fn history(&self) -> &History {
    &self.history
  }

  /// Latest successful prediction of this session
  pub fn result(&self) -> Option<&PredictionRecord> {
    self.result.as_ref()
  }

  /// Message of the latest failed submission
  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  /// Start a submission, clearing the previous result and error
  pub fn begin(&mut self, text: &str) -> Result<Submission, Rejection> {
    if self.state == ViewState::Submitting {
      return Err(Rejection::Busy);
    }
    if text.trim().is_empty() {
      return Err(Rejection::EmptyText);
    }

    self.state = ViewState::Submitting;
    self.result = None;
    self.error = None;
    Ok(Submission { text: text.to_string() })
  }

  /// Settle an in-flight submission
  pub fn finish(
    &mut self,
    submission: Submission,
    outcome: Result<PredictionRecord, InferenceError>,
  ) -> Outcome {
    self.state = ViewState::Idle;

    match outcome {
      Ok(record) => {
        let next = self.history.append(record.clone());
        self.store.persist(&next);
        self.history = next;
        self.result = Some(record);
        bentley::debug!("Stored prediction #{} for '{}'", self.history.len(), submission.text);
        Outcome::Succeeded
      }
      Err(e) => {
        bentley::debug!("Prediction for '{}' failed: {e}", submission.text);
        self.error = Some(e.message().to_string());
        Outcome::Failed(e)
      }
    }
  }

  /// Submit `text` through `predictor` and settle the result
  pub async fn submit<P: Predictor + ?Sized>(&mut self, predictor: &P, text: &str) -> Outcome {
    let submission = match self.begin(text) {
      Ok(submission) => submission,
      Err(rejection) => return Outcome::Ignored(rejection),
    };

    let outcome = predictor.predict(submission.text()).await;
    self.finish(submission, outcome)
  }

  /// Table rows and both projections from the current snapshot
  pub fn snapshot(&self) -> ViewModel<'_> {
    let rows = self
      .history
      .iter()
      .map(|record| TableRow {
        text: record.text.clone(),
        label: record.label.clone(),
        confidence: record.confidence,
        color: label_color(&record.label),
      })
      .collect();

    ViewModel {
      history: &self.history,
      rows,
      trend: projection::multi_series(&self.history),
      max_probability: projection::max_probability(&self.history),
      result: self.result.as_ref(),
      error: self.error.as_deref(),
      busy: self.state == ViewState::Submitting,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn positive() -> PredictionRecord {
    PredictionRecord::new("Stocks rally", "positive", 0.92, 0.05, 0.03, 0.92)
  }

  #[test]
  fn test_begin_moves_to_submitting_and_blocks_resubmission() {
    let mut coordinator = ViewCoordinator::new(HistoryStore::in_memory());

    let submission = coordinator.begin("Stocks rally").unwrap();
    assert_eq!(coordinator.state(), ViewState::Submitting);
    assert!(coordinator.snapshot().busy);
    assert_eq!(coordinator.begin("Second attempt").unwrap_err(), Rejection::Busy);

    assert_eq!(coordinator.finish(submission, Ok(positive())), Outcome::Succeeded);
    assert_eq!(coordinator.state(), ViewState::Idle);
    assert_eq!(coordinator.history().len(), 1);
  }

  #[test]
  fn test_empty_text_is_rejected() {
    let mut coordinator = ViewCoordinator::new(HistoryStore::in_memory());
    assert_eq!(coordinator.begin("").unwrap_err(), Rejection::EmptyText);
    assert_eq!(coordinator.begin(" \t").unwrap_err(), Rejection::EmptyText);
    assert_eq!(coordinator.state(), ViewState::Idle);
  }

  #[test]
  fn test_submission_keeps_surrounding_whitespace() {
    let mut coordinator = ViewCoordinator::new(HistoryStore::in_memory());
    let submission = coordinator.begin("  Stocks rally ").unwrap();
    assert_eq!(submission.text(), "  Stocks rally ");
    coordinator.finish(submission, Ok(positive()));
  }

  #[test]
  fn test_new_submission_clears_previous_result_and_error() {
    let mut coordinator = ViewCoordinator::new(HistoryStore::in_memory());

    let first = coordinator.begin("Stocks rally").unwrap();
    coordinator.finish(first, Err(InferenceError::upstream("boom")));
    assert_eq!(coordinator.error(), Some("boom"));

    let second = coordinator.begin("Stocks rally").unwrap();
    assert_eq!(coordinator.error(), None);
    coordinator.finish(second, Ok(positive()));
    assert_eq!(coordinator.result(), Some(&positive()));

    let _third = coordinator.begin("Again").unwrap();
    assert_eq!(coordinator.result(), None);
  }

  #[test]
  fn test_snapshot_views_share_one_history() {
    let mut coordinator = ViewCoordinator::new(HistoryStore::in_memory());
    for _ in 0..3 {
      let submission = coordinator.begin("Stocks rally").unwrap();
      coordinator.finish(submission, Ok(positive()));
    }

    let view = coordinator.snapshot();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.trend.len(), 3);
    assert_eq!(view.max_probability.len(), 3);
    assert_eq!(view.rows[2].color, projection::POSITIVE_COLOR);
    assert!(!view.busy);
  }
}
