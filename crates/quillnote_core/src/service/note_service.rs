//! Note use-case service.
//!
//! # Responsibility
//! - Create notes: allocate an order number, persist it, append the record,
//!   register its label.
//! - Serve the full-collection read path, optionally sorted by a column.
//! - Pass UI preferences through to the settings store.
//!
//! # Invariants
//! - The counter is persisted before the note is appended. A crash between
//!   the two steps leaves a gap in order numbers, never a reused one.
//! - A new order is greater than both the stored counter and every order
//!   already present in the note store.
//! - Labels are trimmed; a blank label is stored as absent and not registered.

use crate::config::StorePaths;
use crate::model::note::{today, NoteRecord};
use crate::model::settings::{allocate_next, Preferences};
use crate::repo::label_repo::{JsonLabelRepository, LabelRepository};
use crate::repo::note_repo::{JsonNoteRepository, NoteRepository};
use crate::repo::settings_repo::{JsonSettingsRepository, SettingsRepository};
use crate::service::sort::{sort_notes, SortDirection, SortKey};
use crate::storage::StoreResult;
use chrono::NaiveDate;
use log::info;

/// Note service over the three JSON-file repositories.
pub type JsonNoteService =
    NoteService<JsonNoteRepository, JsonLabelRepository, JsonSettingsRepository>;

/// Note service facade over repository implementations.
pub struct NoteService<N, L, S> {
    notes: N,
    labels: L,
    settings: S,
}

impl JsonNoteService {
    /// Opens a service over the documents in `paths`.
    ///
    /// Nothing is read or created until the first operation.
    pub fn open(paths: &StorePaths) -> Self {
        Self::new(
            JsonNoteRepository::new(&paths.notes),
            JsonLabelRepository::new(&paths.labels),
            JsonSettingsRepository::new(&paths.settings),
        )
    }
}

impl<N, L, S> NoteService<N, L, S>
where
    N: NoteRepository,
    L: LabelRepository,
    S: SettingsRepository,
{
    pub fn new(notes: N, labels: L, settings: S) -> Self {
        Self {
            notes,
            labels,
            settings,
        }
    }

    /// Creates one note and returns its order number.
    ///
    /// `date` defaults to today (local calendar).
    ///
    /// # Errors
    /// - Any write failure from the settings, note or label store. If the
    ///   label write fails the note is already stored.
    pub fn create_and_persist_note(
        &self,
        content: impl Into<String>,
        label: Option<&str>,
        characters: Vec<String>,
        date: Option<NaiveDate>,
    ) -> StoreResult<u64> {
        let settings = self.settings.load();
        let highest_stored = self
            .notes
            .load_all()
            .iter()
            .filter_map(|note| note.order)
            .max()
            .unwrap_or(0);
        let order = allocate_next(settings.current_order.max(highest_stored))?;
        self.settings.save(order, &Preferences::new())?;

        let label = label.map(str::trim).filter(|label| !label.is_empty());
        let mut record = NoteRecord::new(content)
            .with_characters(characters)
            .with_date(date.unwrap_or_else(today))
            .with_order(order);
        if let Some(label) = label {
            record = record.with_label(label);
        }
        self.notes.append(&record)?;

        if let Some(label) = label {
            self.register_label(label)?;
        }

        info!(
            "event=note_create module=service status=ok order={} labelled={} characters={}",
            order,
            label.is_some(),
            record.character.len()
        );
        Ok(order)
    }

    /// Returns every stored note in creation order.
    pub fn list_all_notes(&self) -> Vec<NoteRecord> {
        self.notes.load_all()
    }

    /// Returns every stored note sorted by one column.
    pub fn sorted_notes(&self, key: SortKey, direction: SortDirection) -> Vec<NoteRecord> {
        let mut notes = self.notes.load_all();
        sort_notes(&mut notes, key, direction);
        notes
    }

    /// Adds `text` to the label registry and returns the updated list.
    pub fn register_label(&self, text: &str) -> StoreResult<Vec<String>> {
        let current = self.labels.load();
        self.labels.add(text, current)
    }

    /// Returns the registered labels in insertion order.
    pub fn list_labels(&self) -> Vec<String> {
        self.labels.load()
    }

    pub fn load_preferences(&self) -> Preferences {
        self.settings.load().preferences
    }

    /// Saves UI preferences without touching the order counter.
    pub fn save_preferences(&self, preferences: &Preferences) -> StoreResult<()> {
        self.settings.save_preferences(preferences)
    }
}
