//! Request journal for long-running services
//!
//! Entries are appended to a JSONL file and read back newest-last. Writes are
//! serialized through an async mutex so handlers can share one journal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Request metadata attached to an entry
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RequestContext {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,
}

/// A structured journal entry
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JournalEntry {
  pub timestamp: DateTime<Utc>,
  pub level: String,
  pub message: String,
  pub component: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<RequestContext>,
}

struct JournalInner {
  path: PathBuf,
  silent: bool,
}

impl JournalInner {
  fn open(path: &Path, silent: bool) -> std::io::Result<Self> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    // Create the file if missing, keep existing entries otherwise
    if !path.exists() {
      File::create(path)?;
    }

    Ok(Self { path: path.to_path_buf(), silent })
  }

  fn append(&self, entry: &JournalEntry) -> std::io::Result<()> {
    let line = serde_json::to_string(entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(file, "{line}")?;
    file.flush()
  }

  fn read(&self, limit: Option<usize>, level: Option<&str>) -> std::io::Result<Vec<JournalEntry>> {
    if !self.path.exists() {
      return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(&self.path)?);
    let mut entries = Vec::new();

    for line in reader.lines() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }

      // Malformed lines are skipped
      if let Ok(entry) = serde_json::from_str::<JournalEntry>(&line) {
        if level.is_none_or(|filter| filter == "all" || entry.level == filter) {
          entries.push(entry);
        }
      }
    }

    if let Some(limit) = limit {
      let skip = entries.len().saturating_sub(limit);
      entries.drain(..skip);
    }

    Ok(entries)
  }
}

/// Thread-safe JSONL journal
#[derive(Clone)]
pub struct Journal {
  inner: Arc<Mutex<JournalInner>>,
}

impl Journal {
  /// Open (or create) a journal at the given path, optionally without console echo
  pub fn open_with_silent<P: AsRef<Path>>(path: P, silent: bool) -> std::io::Result<Self> {
    let inner = JournalInner::open(path.as_ref(), silent)?;
    Ok(Self { inner: Arc::new(Mutex::new(inner)) })
  }

  /// Append an entry
  pub async fn record(
    &self,
    level: &str,
    message: &str,
    component: &str,
    context: Option<RequestContext>,
  ) -> std::io::Result<()> {
    let entry = JournalEntry {
      timestamp: Utc::now(),
      level: level.to_string(),
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    let guard = self.inner.lock().await;
    guard.append(&entry)?;

    if !guard.silent {
      match level {
        "warn" => crate::warn(message),
        "error" => crate::error(message),
        "debug" => crate::debug(message),
        _ => crate::info(message),
      }
    }

    Ok(())
  }

  /// Info entry (fire-and-forget)
  pub async fn info(&self, message: &str, component: &str) {
    let _ = self.record("info", message, component, None).await;
  }

  /// Warning entry (fire-and-forget)
  pub async fn warn(&self, message: &str, component: &str) {
    let _ = self.record("warn", message, component, None).await;
  }

  /// Error entry (fire-and-forget)
  pub async fn error(&self, message: &str, component: &str) {
    let _ = self.record("error", message, component, None).await;
  }

  /// Entry with request context (fire-and-forget)
  pub async fn with_context(
    &self,
    level: &str,
    message: &str,
    component: &str,
    context: RequestContext,
  ) {
    let _ = self.record(level, message, component, Some(context)).await;
  }

  /// The most recent `limit` entries matching `level` ("all" or None matches everything),
  /// oldest first
  pub async fn entries(
    &self,
    limit: Option<usize>,
    level: Option<&str>,
  ) -> std::io::Result<Vec<JournalEntry>> {
    let guard = self.inner.lock().await;
    guard.read(limit, level)
  }
}
