//! Canonical graph state.
//!
//! # Responsibility
//! - Own the one mutable copy of diagram nodes and edges.
//! - Allocate identities and default placement per store instance.
//!
//! # Invariants
//! - Writes are validated before they are applied; a failed call leaves the
//!   store untouched.
//! - Edges never reference elements missing from the same store.

use crate::model::element::{EdgeId, ElementId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod graph_store;
pub mod id_gen;

pub use graph_store::GraphStore;
pub use id_gen::{Allocation, IdentityGenerator, StaggerLayout};

pub type StoreResult<T> = Result<T, StoreError>;

/// Which side of an edge a reference error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors from graph store writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Edge endpoint does not name an element in this store.
    UnknownEndpoint { endpoint: Endpoint, id: ElementId },
    /// Restored snapshot lists the same element id twice.
    DuplicateElement(ElementId),
    /// Restored snapshot lists the same edge id twice.
    DuplicateEdge(EdgeId),
    /// Restored id carries an ordinal too large to allocate past.
    OrdinalOutOfRange(String),
}

impl StoreError {
    /// Returns whether this is a dangling-reference failure.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::UnknownEndpoint { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEndpoint { endpoint, id } => {
                write!(f, "edge {endpoint} element not found: {id}")
            }
            Self::DuplicateElement(id) => write!(f, "duplicate element id: {id}"),
            Self::DuplicateEdge(id) => write!(f, "duplicate edge id: {id}"),
            Self::OrdinalOutOfRange(id) => write!(f, "id ordinal out of range: {id}"),
        }
    }
}

impl Error for StoreError {}
