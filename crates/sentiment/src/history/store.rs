//! Durable storage for prediction history
//!
//! History lives in a single named slot holding a JSON array of records. The
//! slot is reached through [`HistoryBackend`], so the same store works over a
//! file on disk or an in-memory cell.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::PersistenceError;
use crate::history::History;

/// Name of the slot holding serialized history
pub const HISTORY_SLOT: &str = "sentiment_history";

/// A single key-value slot that can hold serialized history
pub trait HistoryBackend: Send + Sync {
  /// Human-readable slot name for messages
  fn slot(&self) -> String;

  /// Current slot contents, `None` when nothing was ever written
  fn read(&self) -> Result<Option<String>, PersistenceError>;

  /// Replace the slot contents
  fn write(&self, contents: &str) -> Result<(), PersistenceError>;
}

impl<B: HistoryBackend> HistoryBackend for std::sync::Arc<B> {
  fn slot(&self) -> String {
    (**self).slot()
  }

  fn read(&self) -> Result<Option<String>, PersistenceError> {
    (**self).read()
  }

  fn write(&self, contents: &str) -> Result<(), PersistenceError> {
    (**self).write(contents)
  }
}

/// Slot backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
  path: PathBuf,
}

impl FileBackend {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Sibling file the snapshot is staged in before it replaces the slot
  fn staging_path(&self) -> PathBuf {
    let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

impl HistoryBackend for FileBackend {
  fn slot(&self) -> String {
    self.path.display().to_string()
  }

  fn read(&self) -> Result<Option<String>, PersistenceError> {
    if !self.path.exists() {
      return Ok(None);
    }

    fs::read_to_string(&self.path)
      .map(Some)
      .map_err(|source| PersistenceError::Read { slot: self.slot(), source })
  }

  fn write(&self, contents: &str) -> Result<(), PersistenceError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)
        .map_err(|source| PersistenceError::Write { slot: self.slot(), source })?;
    }

    // Stage then rename, so an interrupted write never truncates the slot
    let staging = self.staging_path();
    let written = fs::write(&staging, contents).and_then(|()| fs::rename(&staging, &self.path));
    if written.is_err() {
      let _ = fs::remove_file(&staging);
    }

    written.map_err(|source| PersistenceError::Write { slot: self.slot(), source })
  }
}

/// Slot held in memory, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryBackend {
  contents: Mutex<Option<String>>,
}

impl MemoryBackend {
  pub fn new() -> Self {
    Self::default()
  }

  /// A slot pre-filled with raw contents
  pub fn with_contents(contents: impl Into<String>) -> Self {
    Self { contents: Mutex::new(Some(contents.into())) }
  }

  /// Raw slot contents
  pub fn contents(&self) -> Option<String> {
    self.contents.lock().map(|guard| guard.clone()).unwrap_or_default()
  }
}

impl HistoryBackend for MemoryBackend {
  fn slot(&self) -> String {
    format!("memory:{HISTORY_SLOT}")
  }

  fn read(&self) -> Result<Option<String>, PersistenceError> {
    Ok(self.contents())
  }

  fn write(&self, contents: &str) -> Result<(), PersistenceError> {
    if let Ok(mut guard) = self.contents.lock() {
      *guard = Some(contents.to_string());
    }
    Ok(())
  }
}

/// Loads and persists history through a backend
pub struct HistoryStore {
  backend: Box<dyn HistoryBackend>,
}

impl HistoryStore {
  pub fn new(backend: impl HistoryBackend + 'static) -> Self {
    Self { backend: Box::new(backend) }
  }

  /// Store over the JSON file at `path`
  pub fn file(path: impl Into<PathBuf>) -> Self {
    Self::new(FileBackend::new(path))
  }

  /// Store that keeps history for this process only
  pub fn in_memory() -> Self {
    Self::new(MemoryBackend::new())
  }

  pub fn slot(&self) -> String {
    self.backend.slot()
  }

  /// Read persisted history, falling back to an empty history on any failure
  pub fn load(&self) -> History {
    match self.try_load() {
      Ok(history) => {
        tracing::debug!(slot = %self.slot(), records = history.len(), "history loaded");
        history
      }
      Err(e) => {
        bentley::warn!("{e}; starting with an empty history");
        History::new()
      }
    }
  }

  /// Read persisted history, reporting read and parse failures
  pub fn try_load(&self) -> Result<History, PersistenceError> {
    let Some(contents) = self.backend.read()? else {
      return Ok(History::new());
    };

    if contents.trim().is_empty() {
      return Ok(History::new());
    }

    serde_json::from_str(&contents)
      .map_err(|source| PersistenceError::Parse { slot: self.slot(), source })
  }

  /// Write a snapshot of `history`, reporting failures
  pub fn save(&self, history: &History) -> Result<(), PersistenceError> {
    let contents = serde_json::to_string(history).map_err(PersistenceError::Serialize)?;
    self.backend.write(&contents)
  }

  /// Write a snapshot of `history`; failures are only warned about
  pub fn persist(&self, history: &History) {
    if let Err(e) = self.save(history) {
      bentley::warn!("{e}; the prediction is kept for this session only");
    }
  }
}

/// Location of the history file
///
/// `SENTIMENT_HISTORY_PATH` overrides the default `~/.sentiment/sentiment_history.json`.
pub fn default_history_path() -> PathBuf {
  if let Ok(custom) = std::env::var("SENTIMENT_HISTORY_PATH") {
    return PathBuf::from(custom);
  }

  dirs::home_dir()
    .unwrap_or_else(|| Path::new("/tmp").to_path_buf())
    .join(".sentiment")
    .join(format!("{HISTORY_SLOT}.json"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::history::PredictionRecord;
  use tempfile::TempDir;

  fn sample_history() -> History {
    History::new()
      .append(PredictionRecord::new("Stocks rally", "positive", 0.92, 0.05, 0.03, 0.92))
      .append(PredictionRecord::new("Firm goes bankrupt", "negative", 0.88, 0.07, 0.88, 0.05))
  }

  #[test]
  fn test_missing_slot_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = HistoryStore::file(temp.path().join("absent.json"));
    assert!(store.load().is_empty());
    assert!(store.try_load().unwrap().is_empty());
  }

  #[test]
  fn test_file_round_trip_preserves_order() {
    let temp = TempDir::new().unwrap();
    let store = HistoryStore::file(temp.path().join("nested/dir/history.json"));
    let history = sample_history();

    store.save(&history).unwrap();
    assert_eq!(store.load(), history);
  }

  #[test]
  fn test_save_replaces_the_slot_without_leaving_a_staging_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sentiment_history.json");
    let store = HistoryStore::file(&path);

    store.save(&History::new().append(sample_history().records()[0].clone())).unwrap();
    store.save(&sample_history()).unwrap();

    assert_eq!(store.load(), sample_history());
    let names: Vec<_> =
      fs::read_dir(temp.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names, vec![std::ffi::OsString::from("sentiment_history.json")]);
  }

  #[test]
  fn test_stale_staging_file_does_not_affect_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sentiment_history.json");
    let store = HistoryStore::file(&path);
    store.save(&sample_history()).unwrap();

    // Left behind by a write that never reached the rename
    fs::write(temp.path().join("sentiment_history.json.tmp"), "[{\"text\": \"Sto").unwrap();

    assert_eq!(store.load(), sample_history());
  }

  #[test]
  fn test_malformed_contents_load_empty() {
    let store = HistoryStore::new(MemoryBackend::with_contents("{not json"));
    assert!(store.load().is_empty());
    assert!(matches!(store.try_load(), Err(PersistenceError::Parse { .. })));
  }

  #[test]
  fn test_blank_contents_load_empty() {
    let store = HistoryStore::new(MemoryBackend::with_contents("   "));
    assert!(store.try_load().unwrap().is_empty());
  }

  #[test]
  fn test_persisted_layout_uses_backend_field_names() {
    let backend = std::sync::Arc::new(MemoryBackend::new());
    let store = HistoryStore::new(backend.clone());
    store.persist(&sample_history());

    let raw = backend.contents().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["text"], "Stocks rally");
    assert_eq!(first["label"], "positive");
    assert_eq!(first["neutral_conf"], 0.05);
    assert_eq!(first["negative_conf"], 0.03);
    assert_eq!(first["positive_conf"], 0.92);
    assert_eq!(first["confidence"], 0.92);
  }

  #[test]
  fn test_write_failure_is_reported_by_save_and_swallowed_by_persist() {
    let temp = TempDir::new().unwrap();
    let slot = temp.path().join("occupied");
    // A directory cannot be overwritten as a file
    fs::create_dir(&slot).unwrap();
    let store = HistoryStore::file(&slot);

    assert!(matches!(store.save(&sample_history()), Err(PersistenceError::Write { .. })));
    store.persist(&sample_history());
    assert!(!temp.path().join("occupied.tmp").exists());
  }
}
