//! Core persistence and ordering logic for QuillNote.
//! This crate owns the note store, the label registry and the order counter.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use config::StorePaths;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{today, NoteRecord};
pub use model::settings::{allocate_next, Preferences, Settings};
pub use repo::label_repo::{JsonLabelRepository, LabelRepository};
pub use repo::note_repo::{JsonNoteRepository, NoteRepository};
pub use repo::settings_repo::{JsonSettingsRepository, SettingsRepository};
pub use service::note_service::{JsonNoteService, NoteService};
pub use service::sort::{sort_notes, SortDirection, SortKey};
pub use storage::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
