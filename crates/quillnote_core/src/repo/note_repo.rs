//! Note store contract and JSON-file implementation.
//!
//! # Responsibility
//! - Load the full note collection for display.
//! - Append one record by rewriting the whole notes document.
//!
//! # Invariants
//! - Reads fail open: a missing, blank or unparsable document is an empty
//!   collection, never an error.
//! - Writes fail loud: any storage failure is returned to the caller.
//! - Append never mutates or drops existing entries, including ones this
//!   version cannot decode.

use crate::model::note::NoteRecord;
use crate::storage::{read_document, write_document, DocumentRead, StoreResult};
use log::{info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Repository interface for the append-only note collection.
pub trait NoteRepository {
    /// Returns every decodable note in stored order.
    fn load_all(&self) -> Vec<NoteRecord>;
    /// Appends one note at the end of the collection.
    fn append(&self, record: &NoteRecord) -> StoreResult<()>;
}

/// Note store backed by one JSON array document.
#[derive(Debug, Clone)]
pub struct JsonNoteRepository {
    path: PathBuf,
}

impl JsonNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Vec<Value> {
        match read_document(&self.path) {
            DocumentRead::Parsed(Value::Array(entries)) => entries,
            DocumentRead::Parsed(_) => {
                warn!(
                    "event=notes_load module=repo status=fallback reason=not_an_array path={}",
                    self.path.display()
                );
                Vec::new()
            }
            _ => Vec::new(),
        }
    }
}

impl NoteRepository for JsonNoteRepository {
    /// Entries that fail validation are skipped with a warning; the remaining
    /// records are still returned.
    fn load_all(&self) -> Vec<NoteRecord> {
        let entries = self.load_entries();
        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match NoteRecord::from_document(entry) {
                Ok(record) => records.push(record),
                Err(err) => warn!(
                    "event=notes_load module=repo status=skip index={} path={} error={}",
                    index,
                    self.path.display(),
                    err
                ),
            }
        }
        records
    }

    fn append(&self, record: &NoteRecord) -> StoreResult<()> {
        let mut entries = self.load_entries();
        entries.push(record.to_document());
        let count = entries.len();

        write_document(&self.path, &Value::Array(entries))?;
        info!(
            "event=note_append module=repo status=ok order={} count={}",
            record
                .order
                .map_or_else(|| "none".to_string(), |order| order.to_string()),
            count
        );
        Ok(())
    }
}
