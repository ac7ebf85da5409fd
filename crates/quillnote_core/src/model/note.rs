//! Note record domain model.
//!
//! # Responsibility
//! - Define the immutable value persisted for every user-authored note.
//! - Map records to and from their JSON document shape.
//!
//! # Invariants
//! - `content` is required and stored exactly as given.
//! - A record round-trips unchanged through `to_document`/`from_document`.
//! - Decoding never fails on optional fields; only `content` is mandatory.

use crate::storage::{StoreError, StoreResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt::{Display, Formatter};

/// Calendar date format used in persisted documents (ISO-8601).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One persisted note.
///
/// Records are append-only: once stored, the core never updates or removes
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct NoteRecord {
    /// Note body. May be empty.
    pub content: String,
    /// Free-form category. Not checked against the label registry.
    pub label: Option<String>,
    /// Participant tags in selection order.
    pub character: Vec<String>,
    /// Calendar day the note belongs to.
    pub date: NaiveDate,
    /// Creation sequence number. `None` only for records written before
    /// ordering existed.
    pub order: Option<u64>,
}

impl NoteRecord {
    /// Creates a record dated today with no label, characters or order.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: None,
            character: Vec::new(),
            date: today(),
            order: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_characters<I, S>(mut self, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.character = characters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_order(mut self, order: u64) -> Self {
        self.order = Some(order);
        self
    }

    /// Encodes this record as its persisted JSON mapping.
    ///
    /// Keys: `content`, `label`, `character`, `date` (`YYYY-MM-DD`), `order`.
    /// Absent `label` and `order` are written as `null`.
    pub fn to_document(&self) -> Value {
        json!({
            "content": self.content,
            "label": self.label,
            "character": self.character,
            "date": self.date.format(DATE_FORMAT).to_string(),
            "order": self.order,
        })
    }

    /// Decodes a record from its persisted JSON mapping.
    ///
    /// Missing or `null` `label`/`order` decode as `None` and a missing
    /// `character` as an empty list. Legacy shapes are accepted: a single
    /// `character` string, a non-integer `order` (treated as absent) and a
    /// full date-time in `date` (only the calendar day is kept).
    ///
    /// **Date fallback:** a missing or unparsable `date` becomes *today*
    /// (local calendar). The decoded record then no longer matches the stored
    /// bytes for that field.
    ///
    /// # Errors
    /// - `StoreError::MalformedRecord` when the value is not a mapping or
    ///   `content` is missing or not text.
    pub fn from_document(value: &Value) -> StoreResult<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| StoreError::MalformedRecord("expected a JSON object".to_string()))?;

        let content = match fields.get("content") {
            Some(Value::String(content)) => content.clone(),
            Some(other) => {
                return Err(StoreError::MalformedRecord(format!(
                    "`content` must be text, got {}",
                    json_kind(other)
                )))
            }
            None => return Err(StoreError::MalformedRecord("missing `content`".to_string())),
        };

        let label = fields
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let character = match fields.get("character") {
            Some(Value::String(single)) if !single.is_empty() => vec![single.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        };

        let date = fields
            .get("date")
            .and_then(Value::as_str)
            .and_then(parse_calendar_date)
            .unwrap_or_else(today);

        let order = fields.get("order").and_then(Value::as_u64);

        Ok(Self {
            content,
            label,
            character,
            date,
            order,
        })
    }
}

impl Serialize for NoteRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl TryFrom<Value> for NoteRecord {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_document(&value)
    }
}

impl Display for NoteRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Note: {} Label: {} Character: {} Date: {}",
            self.content,
            self.label.as_deref().unwrap_or(""),
            self.character.join(", "),
            self.date.format(DATE_FORMAT)
        )
    }
}

/// Returns the current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses `YYYY-MM-DD`, or keeps the calendar day of an ISO-8601 date-time.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|dt| dt.date()))
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
