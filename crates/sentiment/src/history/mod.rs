//! Prediction history: records, the append-only history value, its durable
//! store, and the chart projections derived from it.

pub mod projection;
pub mod record;
pub mod store;

use serde::{Deserialize, Serialize};

pub use record::{Label, PredictionRecord};

/// Ordered, append-only sequence of predictions
///
/// A record's position is its identity. Values are never edited in place:
/// [`History::append`] returns a new history and leaves the receiver as it was.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
  records: Vec<PredictionRecord>,
}

impl History {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_records(records: Vec<PredictionRecord>) -> Self {
    Self { records }
  }

  /// A new history with `record` added at the end
  pub fn append(&self, record: PredictionRecord) -> Self {
    let mut records = Vec::with_capacity(self.records.len() + 1);
    records.extend_from_slice(&self.records);
    records.push(record);
    Self { records }
  }

  pub fn records(&self) -> &[PredictionRecord] {
    &self.records
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
    self.records.iter()
  }

  pub fn get(&self, index: usize) -> Option<&PredictionRecord> {
    self.records.get(index)
  }

  pub fn last(&self) -> Option<&PredictionRecord> {
    self.records.last()
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }
}

impl<'a> IntoIterator for &'a History {
  type Item = &'a PredictionRecord;
  type IntoIter = std::slice::Iter<'a, PredictionRecord>;

  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}
