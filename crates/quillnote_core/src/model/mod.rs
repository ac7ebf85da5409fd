//! Domain values persisted by the core.
//!
//! # Responsibility
//! - Define the note record and the settings/counter payload.
//! - Keep (de)serialization next to the values; persistence lives in `repo`.
//!
//! # Invariants
//! - Model types perform no I/O.

pub mod note;
pub mod settings;
