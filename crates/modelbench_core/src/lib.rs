//! Core graph state for the ModelBench diagram workbench.
//! This crate is the single source of truth for diagram invariants.

pub mod collab;
pub mod logging;
pub mod model;
pub mod projection;
pub mod service;
pub mod store;

pub use collab::{
    deliver, JsonFileSink, LogSink, SaveReceipt, SimulationTrigger, SinkError, SinkResult,
    SnapshotSink,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::element::{
    Edge, EdgeId, EdgeMarker, Element, ElementId, ElementKind, ElementPatch, Position,
    UnknownKindError,
};
pub use model::palette::{color_for_label, kind_color, NEUTRAL_COLOR};
pub use model::snapshot::GraphSnapshot;
pub use projection::{project, Outline, OutlineGroup};
pub use service::property_editor::{Binding, BindingState, Draft, EditorError, PropertyEditor};
pub use service::selection::SelectionController;
pub use service::workbench::{Workbench, WorkbenchError, WorkbenchResult};
pub use store::{
    Endpoint, GraphStore, IdentityGenerator, StaggerLayout, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
