//! Element and edge domain model.
//!
//! # Responsibility
//! - Define the canonical node/edge records owned by the graph store.
//! - Define the partial update shape used by edit and drag paths.
//!
//! # Invariants
//! - `Element::id` and `Element::kind` never change after creation.
//! - `Edge` endpoints are only ever built from ids validated by the store.
//!
//! # See also
//! - store::graph_store

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque element identifier, unique within one graph store.
pub type ElementId = String;

/// Opaque edge identifier, unique within one graph store.
pub type EdgeId = String;

/// Closed set of diagram element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Structural block.
    Block,
    /// Textual requirement.
    Requirement,
    /// Interaction point on a block.
    Port,
    /// Behavioral step.
    Action,
}

impl ElementKind {
    /// Every kind in palette order.
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Block,
        ElementKind::Requirement,
        ElementKind::Port,
        ElementKind::Action,
    ];

    /// Stable display/wire name, also used as the id prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "Block",
            Self::Requirement => "Requirement",
            Self::Port => "Port",
            Self::Action => "Action",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a kind name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKindError(pub String);

impl Display for UnknownKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown element kind `{}`; expected Block|Requirement|Port|Action",
            self.0
        )
    }
}

impl Error for UnknownKindError {}

impl FromStr for ElementKind {
    type Err = UnknownKindError;

    /// Parses a kind name case-insensitively after trimming.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownKindError(trimmed.to_string()))
    }
}

/// Canvas coordinate in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Canonical diagram node.
///
/// Only the graph store constructs elements, so a caller never sees a
/// partially initialized one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Assigned once at creation.
    pub id: ElementId,
    /// Fixed at creation; there is no retyping operation.
    pub kind: ElementKind,
    pub label: String,
    pub description: String,
    pub position: Position,
}

/// Partial update for an element's mutable fields.
///
/// `None` means "leave untouched". There is deliberately no way to express a
/// change of `id` or `kind`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub position: Option<Position>,
}

impl ElementPatch {
    pub fn label(value: impl Into<String>) -> Self {
        Self::default().with_label(value)
    }

    pub fn position(value: Position) -> Self {
        Self::default().with_position(value)
    }

    pub fn with_label(mut self, value: impl Into<String>) -> Self {
        self.label = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn with_position(mut self, value: Position) -> Self {
        self.position = Some(value);
        self
    }

    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.description.is_none() && self.position.is_none()
    }

    pub(crate) fn apply_to(&self, element: &mut Element) {
        if let Some(label) = &self.label {
            element.label.clone_from(label);
        }
        if let Some(description) = &self.description {
            element.description.clone_from(description);
        }
        if let Some(position) = self.position {
            element.position = position;
        }
    }
}

/// Edge terminator decoration. Only the closed arrow exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EdgeMarker {
    #[default]
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

/// Directed connection between two elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: ElementId,
    pub target: ElementId,
    #[serde(rename = "markerEnd", default)]
    pub marker_end: EdgeMarker,
}

impl Edge {
    /// Returns whether both endpoints are the same element.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
