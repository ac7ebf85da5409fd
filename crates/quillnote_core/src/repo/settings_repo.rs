//! Settings store: persisted order counter plus UI preferences.
//!
//! # Responsibility
//! - Load the counter and preferences, falling open to a fresh install.
//! - Save by read-modify-write so keys written by other views survive.
//!
//! # Invariants
//! - A missing or blank document loads as `current_order = 0` with empty
//!   preferences, and is an empty merge base on save.
//! - A document that exists but is not a JSON mapping is never overwritten;
//!   saves fail with `StoreError::UnmergeableSettings`.
//! - The persisted `current_order` never decreases.
//! - Keys not mentioned by a save are preserved verbatim.

use crate::model::settings::{Preferences, Settings, CURRENT_ORDER_KEY};
use crate::storage::{read_document, write_document, DocumentRead, StoreError, StoreResult};
use log::{info, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Repository interface for the settings document.
pub trait SettingsRepository {
    /// Loads the counter and preferences. Never fails.
    fn load(&self) -> Settings;

    /// Persists `current_order` and overlays `preferences` onto the stored
    /// document.
    ///
    /// A `current_order` lower than the stored one is clamped to the stored
    /// value.
    fn save(&self, current_order: u64, preferences: &Preferences) -> StoreResult<()>;

    /// Overlays `preferences` onto the stored document, keeping the stored
    /// counter.
    fn save_preferences(&self, preferences: &Preferences) -> StoreResult<()>;
}

/// Settings store backed by one JSON object document.
#[derive(Debug, Clone)]
pub struct JsonSettingsRepository {
    path: PathBuf,
}

impl JsonSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn merge_base(&self) -> StoreResult<Map<String, Value>> {
        let reason = match read_document(&self.path) {
            DocumentRead::Missing | DocumentRead::Blank => return Ok(Map::new()),
            DocumentRead::Parsed(Value::Object(entries)) => return Ok(entries),
            DocumentRead::Parsed(_) => "document is not a JSON object".to_string(),
            DocumentRead::Unparsable(err) => format!("document is not valid JSON: {err}"),
            DocumentRead::Unreadable(err) => format!("document could not be read: {err}"),
        };
        Err(StoreError::UnmergeableSettings {
            path: self.path.clone(),
            reason,
        })
    }

    fn write_merged(
        &self,
        requested_order: Option<u64>,
        preferences: &Preferences,
    ) -> StoreResult<u64> {
        let mut document = self.merge_base()?;
        let stored_order = document
            .get(CURRENT_ORDER_KEY)
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let effective_order = match requested_order {
            Some(requested) if requested < stored_order => {
                warn!(
                    "event=settings_save module=repo status=clamped requested_order={} stored_order={}",
                    requested, stored_order
                );
                stored_order
            }
            Some(requested) => requested,
            None => stored_order,
        };

        for (key, value) in preferences.iter() {
            document.insert(key.clone(), value.clone());
        }
        document.insert(CURRENT_ORDER_KEY.to_string(), Value::from(effective_order));

        write_document(&self.path, &Value::Object(document))?;
        Ok(effective_order)
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self) -> Settings {
        match read_document(&self.path) {
            DocumentRead::Parsed(value) => Settings::from_document(&value).unwrap_or_else(|| {
                warn!(
                    "event=settings_load module=repo status=fallback reason=not_an_object path={}",
                    self.path.display()
                );
                Settings::default()
            }),
            _ => Settings::default(),
        }
    }

    fn save(&self, current_order: u64, preferences: &Preferences) -> StoreResult<()> {
        let written = self.write_merged(Some(current_order), preferences)?;
        info!(
            "event=settings_save module=repo status=ok current_order={}",
            written
        );
        Ok(())
    }

    fn save_preferences(&self, preferences: &Preferences) -> StoreResult<()> {
        let written = self.write_merged(None, preferences)?;
        info!(
            "event=preferences_save module=repo status=ok keys={} current_order={}",
            preferences.len(),
            written
        );
        Ok(())
    }
}
