//! Diagram domain model.
//!
//! # Responsibility
//! - Define canonical element/edge structures owned by the graph store.
//! - Define presentation helpers and the snapshot wire shape.
//!
//! # Invariants
//! - Every element is identified by a store-assigned `ElementId`.
//! - There is no deletion; elements and edges live as long as their store.

pub mod element;
pub mod palette;
pub mod snapshot;
