//! Order counter value and UI preference payload.
//!
//! # Responsibility
//! - Hold the persisted `current_order` together with opaque preferences.
//! - Allocate order numbers as a pure increment of an explicit value.
//!
//! # Invariants
//! - `Preferences` never carries the `current_order` key; the counter lives
//!   only in `Settings::current_order`.
//! - `allocate_next(n)` is always `> n`.

use crate::storage::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Settings document key holding the order counter.
pub const CURRENT_ORDER_KEY: &str = "current_order";
/// Preference key for the window geometry string (`WIDTHxHEIGHT+X+Y`).
pub const GEOMETRY_KEY: &str = "geometry";
/// Preference key for the per-column width mapping.
pub const COLUMN_WIDTHS_KEY: &str = "column_widths";
/// Geometry used when none has been saved yet.
pub const DEFAULT_GEOMETRY: &str = "800x600";

/// Opaque UI preferences stored next to the order counter.
///
/// The core does not interpret these values beyond the typed helpers below;
/// unknown keys pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Preferences {
    entries: Map<String, Value>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds preferences from a settings mapping, dropping `current_order`.
    pub fn from_map(mut entries: Map<String, Value>) -> Self {
        entries.shift_remove(CURRENT_ORDER_KEY);
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Sets one preference and returns the previous value.
    ///
    /// The reserved `current_order` key is ignored and returns `None`.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if key == CURRENT_ORDER_KEY {
            return None;
        }
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.entries
    }

    /// Saved window geometry, if it is a string.
    pub fn geometry(&self) -> Option<&str> {
        self.entries.get(GEOMETRY_KEY).and_then(Value::as_str)
    }

    /// Saved window geometry or [`DEFAULT_GEOMETRY`].
    pub fn geometry_or_default(&self) -> &str {
        self.geometry().unwrap_or(DEFAULT_GEOMETRY)
    }

    pub fn set_geometry(&mut self, geometry: impl Into<String>) {
        self.entries
            .insert(GEOMETRY_KEY.to_string(), Value::String(geometry.into()));
    }

    /// Saved column widths.
    ///
    /// Entries that are not positive integers are skipped, so a zero width
    /// never overrides the view's own default.
    pub fn column_widths(&self) -> BTreeMap<String, u32> {
        let Some(Value::Object(widths)) = self.entries.get(COLUMN_WIDTHS_KEY) else {
            return BTreeMap::new();
        };
        widths
            .iter()
            .filter_map(|(column, width)| {
                let width = u32::try_from(width.as_u64()?).ok()?;
                (width > 0).then(|| (column.clone(), width))
            })
            .collect()
    }

    /// Records the width of one column, keeping the other columns.
    pub fn set_column_width(&mut self, column: impl Into<String>, width: u32) {
        let slot = self
            .entries
            .entry(COLUMN_WIDTHS_KEY.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        if let Value::Object(widths) = slot {
            widths.insert(column.into(), Value::from(width));
        }
    }
}

impl From<Map<String, Value>> for Preferences {
    fn from(value: Map<String, Value>) -> Self {
        Self::from_map(value)
    }
}

impl From<Preferences> for Map<String, Value> {
    fn from(value: Preferences) -> Self {
        value.entries
    }
}

/// Decoded settings document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Highest order number handed out so far. `0` on a fresh install.
    pub current_order: u64,
    /// Everything else in the document, verbatim.
    pub preferences: Preferences,
}

impl Settings {
    /// Decodes a settings document.
    ///
    /// Returns `None` when `value` is not a JSON mapping. A missing or
    /// non-integer `current_order` decodes as `0`.
    pub fn from_document(value: &Value) -> Option<Self> {
        let entries = value.as_object()?;
        let current_order = entries
            .get(CURRENT_ORDER_KEY)
            .and_then(Value::as_u64)
            .unwrap_or(0);
        Some(Self {
            current_order,
            preferences: Preferences::from_map(entries.clone()),
        })
    }
}

/// Returns the order number that follows `current_order`.
///
/// Pure: nothing is reserved. The caller must persist the returned value
/// before treating it as allocated.
///
/// # Errors
/// - `StoreError::OrderExhausted` when `current_order == u64::MAX`.
pub fn allocate_next(current_order: u64) -> StoreResult<u64> {
    current_order
        .checked_add(1)
        .ok_or(StoreError::OrderExhausted)
}
