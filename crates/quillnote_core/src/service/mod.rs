//! Core use-case services.
//!
//! # Responsibility
//! - Compose repository calls into the operations offered to UI callers.
//! - Keep UI layers decoupled from document layout.

pub mod note_service;
pub mod sort;
