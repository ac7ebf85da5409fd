//! Label registry contract and JSON-file implementation.
//!
//! # Responsibility
//! - Persist the insertion-ordered vocabulary of note labels.
//!
//! # Invariants
//! - No duplicates: equality is exact (case-sensitive) after trimming.
//! - Insertion order is preserved; new labels go last.
//! - `add` writes only when the registry actually changes.

use crate::storage::{read_document, write_document, DocumentRead, StoreResult};
use log::{info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Repository interface for the label registry.
pub trait LabelRepository {
    /// Returns the stored labels in insertion order.
    fn load(&self) -> Vec<String>;

    /// Adds `label` to `current` and persists the result.
    ///
    /// Blank or already-present labels return `current` unchanged without
    /// touching storage.
    fn add(&self, label: &str, current: Vec<String>) -> StoreResult<Vec<String>>;
}

/// Label registry backed by one JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonLabelRepository {
    path: PathBuf,
}

impl JsonLabelRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LabelRepository for JsonLabelRepository {
    fn load(&self) -> Vec<String> {
        let entries = match read_document(&self.path) {
            DocumentRead::Parsed(Value::Array(entries)) => entries,
            DocumentRead::Parsed(_) | DocumentRead::Unparsable(_) => {
                warn!(
                    "event=labels_load module=repo status=fallback reason=invalid_document path={} detail=\"labels file is not a valid JSON list; returning empty labels\"",
                    self.path.display()
                );
                return Vec::new();
            }
            _ => return Vec::new(),
        };

        let mut labels: Vec<String> = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Value::String(label) if !contains(&labels, &label) => labels.push(label),
                Value::String(_) => {}
                other => warn!(
                    "event=labels_load module=repo status=skip path={} value={}",
                    self.path.display(),
                    other
                ),
            }
        }
        labels
    }

    fn add(&self, label: &str, mut current: Vec<String>) -> StoreResult<Vec<String>> {
        let label = label.trim();
        if label.is_empty() || contains(&current, label) {
            return Ok(current);
        }

        current.push(label.to_string());
        let document = Value::Array(current.iter().cloned().map(Value::String).collect());
        write_document(&self.path, &document)?;
        info!(
            "event=label_add module=repo status=ok count={}",
            current.len()
        );
        Ok(current)
    }
}

/// Returns whether `labels` already holds `label` (trimmed, exact match).
pub fn contains(labels: &[String], label: &str) -> bool {
    let label = label.trim();
    labels.iter().any(|existing| existing == label)
}
