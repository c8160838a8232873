//! Derived read-only views over the graph store.
//!
//! Projections hold no state of their own and are recomputed on every call.

pub mod outline;

pub use outline::{project, Outline, OutlineGroup};
