//! Data directory layout.
//!
//! # Responsibility
//! - Resolve the three persisted documents from one data directory.
//!
//! # Invariants
//! - The core reads no environment variables; callers choose the directory.

use crate::storage::{StoreError, StoreResult};
use std::fs;
use std::path::{Path, PathBuf};

pub const NOTES_FILE_NAME: &str = "notes.json";
pub const LABELS_FILE_NAME: &str = "labels.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Locations of the notes, labels and settings documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub notes: PathBuf,
    pub labels: PathBuf,
    pub settings: PathBuf,
}

impl StorePaths {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            notes: dir.join(NOTES_FILE_NAME),
            labels: dir.join(LABELS_FILE_NAME),
            settings: dir.join(SETTINGS_FILE_NAME),
        }
    }

    /// Creates every directory that holds one of the documents.
    ///
    /// # Errors
    /// - `StoreError::WriteFailed` when a directory cannot be created.
    pub fn ensure_dirs(&self) -> StoreResult<()> {
        for document in [&self.notes, &self.labels, &self.settings] {
            let Some(dir) = document.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
                continue;
            };
            fs::create_dir_all(dir).map_err(|source| StoreError::WriteFailed {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StorePaths;

    #[test]
    fn in_dir_uses_default_file_names() {
        let paths = StorePaths::in_dir("/var/data/quillnote");
        assert!(paths.notes.ends_with("quillnote/notes.json"));
        assert!(paths.labels.ends_with("quillnote/labels.json"));
        assert!(paths.settings.ends_with("quillnote/settings.json"));
    }

    #[test]
    fn ensure_dirs_creates_missing_directory() {
        let root = tempfile::tempdir().unwrap();
        let data_dir = root.path().join("a").join("b");
        StorePaths::in_dir(&data_dir).ensure_dirs().unwrap();
        assert!(data_dir.is_dir());
    }
}
