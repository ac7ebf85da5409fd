//! Column sorting for note table views.
//!
//! # Invariants
//! - Sorting is stable: notes with equal keys keep their stored order.
//! - Absent values (`label`, `order`) sort before present ones when
//!   ascending.

use crate::model::note::NoteRecord;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Note column a view can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Content,
    Label,
    Character,
    Date,
    Order,
}

impl SortKey {
    /// Every column in display order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Content,
        SortKey::Label,
        SortKey::Character,
        SortKey::Date,
        SortKey::Order,
    ];

    /// Column identifier, as used in the `column_widths` preference.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Label => "label",
            Self::Character => "character",
            Self::Date => "date",
            Self::Order => "order",
        }
    }

    fn compare(self, left: &NoteRecord, right: &NoteRecord) -> Ordering {
        match self {
            Self::Content => left.content.cmp(&right.content),
            Self::Label => left.label.cmp(&right.label),
            Self::Character => left.character.cmp(&right.character),
            Self::Date => left.date.cmp(&right.date),
            Self::Order => left.order.cmp(&right.order),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.column_name() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown sort column `{}`; expected content|label|character|date|order",
                    value.trim()
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sorts `notes` in place by one column.
pub fn sort_notes(notes: &mut [NoteRecord], key: SortKey, direction: SortDirection) {
    match direction {
        SortDirection::Ascending => notes.sort_by(|left, right| key.compare(left, right)),
        SortDirection::Descending => notes.sort_by(|left, right| key.compare(right, left)),
    }
}
