//! JSON document storage and the shared store error taxonomy.
//!
//! # Responsibility
//! - Classify document reads so callers can fail open to empty defaults.
//! - Rewrite whole documents atomically (temp file + rename).
//! - Define the error type returned by every write-side store operation.
//!
//! # Invariants
//! - Read problems are never returned as errors; they are a `DocumentRead`
//!   variant the caller resolves to a default.
//! - Write problems are always returned; nothing on the write path is
//!   swallowed or retried.
//!
//! # See also
//! - `repo` for the per-document policies built on top of this module.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod document;

pub use document::{read_document, write_document, DocumentRead};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by store operations.
///
/// `WriteFailed`, `Serialize` and `UnmergeableSettings` are the write-side
/// failures; see [`StoreError::is_write_failure`].
#[derive(Debug)]
pub enum StoreError {
    /// A stored note failed required-field validation.
    MalformedRecord(String),
    /// The backing file could not be written (permissions, disk full, ...).
    WriteFailed { path: PathBuf, source: io::Error },
    /// A document could not be encoded as JSON.
    Serialize(serde_json::Error),
    /// The existing settings document cannot serve as a merge base.
    UnmergeableSettings { path: PathBuf, reason: String },
    /// The order counter reached `u64::MAX`.
    OrderExhausted,
}

impl StoreError {
    /// Returns whether this error means a write did not reach storage.
    pub fn is_write_failure(&self) -> bool {
        matches!(
            self,
            Self::WriteFailed { .. } | Self::Serialize(_) | Self::UnmergeableSettings { .. }
        )
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRecord(message) => write!(f, "malformed note record: {message}"),
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to encode document: {err}"),
            Self::UnmergeableSettings { path, reason } => write!(
                f,
                "refusing to overwrite settings `{}`: {reason}",
                path.display()
            ),
            Self::OrderExhausted => write!(f, "order counter exhausted"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WriteFailed { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::MalformedRecord(_) | Self::UnmergeableSettings { .. } | Self::OrderExhausted => {
                None
            }
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
