//! Repository contracts and JSON-file implementations.
//!
//! # Responsibility
//! - Define use-case oriented persistence contracts for notes, labels and
//!   settings.
//! - Keep document layout and fail-open/fail-loud policy out of services.
//!
//! # Invariants
//! - Every `load*` method is infallible and falls open to an empty default.
//! - Every mutation returns `StoreResult` and surfaces write failures.

pub mod label_repo;
pub mod note_repo;
pub mod settings_repo;
