//! Whole-document JSON read/write helpers.
//!
//! # Responsibility
//! - Read a document and report why it yielded nothing usable.
//! - Replace a document without ever leaving a half-written file behind.
//!
//! # Invariants
//! - `write_document` writes into a sibling temp file, syncs it, then renames
//!   it over the target. Readers see the old or the new document, never a mix.
//! - Output is pretty-printed with a four-space indent.

use super::{StoreError, StoreResult};
use log::{debug, error, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

const DOCUMENT_INDENT: &[u8] = b"    ";

/// Outcome of reading one JSON document.
#[derive(Debug)]
pub enum DocumentRead {
    /// The file does not exist.
    Missing,
    /// The file exists but holds only whitespace.
    Blank,
    /// The file exists but could not be read.
    Unreadable(io::Error),
    /// The file holds text that is not valid JSON.
    Unparsable(serde_json::Error),
    /// The file holds a JSON value.
    Parsed(Value),
}

impl DocumentRead {
    /// Returns the parsed value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Parsed(value) => Some(value),
            _ => None,
        }
    }

    /// Returns whether the document simply has no content yet.
    ///
    /// Missing and blank files both mean "nothing stored", as opposed to
    /// content that exists but cannot be understood.
    pub fn is_vacant(&self) -> bool {
        matches!(self, Self::Missing | Self::Blank)
    }
}

/// Reads and parses one JSON document.
///
/// Never fails: every problem is reported as a `DocumentRead` variant and
/// logged, so callers decide which default to fall back to.
pub fn read_document(path: &Path) -> DocumentRead {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(
                "event=document_read module=storage status=fallback reason=missing path={}",
                path.display()
            );
            return DocumentRead::Missing;
        }
        Err(err) => {
            warn!(
                "event=document_read module=storage status=fallback reason=unreadable path={} error={}",
                path.display(),
                err
            );
            return DocumentRead::Unreadable(err);
        }
    };

    if text.trim().is_empty() {
        debug!(
            "event=document_read module=storage status=fallback reason=blank path={}",
            path.display()
        );
        return DocumentRead::Blank;
    }

    match serde_json::from_str(&text) {
        Ok(value) => DocumentRead::Parsed(value),
        Err(err) => {
            warn!(
                "event=document_read module=storage status=fallback reason=unparsable path={} error={}",
                path.display(),
                err
            );
            DocumentRead::Unparsable(err)
        }
    }
}

/// Atomically replaces the document at `path` with `value`.
///
/// Creates the parent directory when needed.
///
/// # Errors
/// - `StoreError::Serialize` when `value` cannot be encoded.
/// - `StoreError::WriteFailed` for any filesystem failure.
pub fn write_document(path: &Path, value: &Value) -> StoreResult<()> {
    let started_at = Instant::now();
    let encoded = encode_pretty(value)?;

    match replace_file(path, &encoded) {
        Ok(()) => {
            debug!(
                "event=document_write module=storage status=ok path={} bytes={} duration_ms={}",
                path.display(),
                encoded.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=document_write module=storage status=error path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(StoreError::WriteFailed {
                path: path.to_path_buf(),
                source: err,
            })
        }
    }
}

fn encode_pretty(value: &Value) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(DOCUMENT_INDENT));
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
