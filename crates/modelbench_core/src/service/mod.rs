//! Core use-case services.
//!
//! # Responsibility
//! - Hold view-facing state (selection, property draft) outside the store.
//! - Orchestrate store writes triggered by user actions.
//!
//! # Invariants
//! - Services never keep copies of element data beyond the editor draft.

pub mod property_editor;
pub mod selection;
pub mod workbench;
