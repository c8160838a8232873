//! In-memory graph store.
//!
//! # Responsibility
//! - Provide create/connect/update entry points over nodes and edges.
//! - Expose read-only views for canvas, outline and snapshot consumers.
//!
//! # Invariants
//! - Node order is creation order; edges likewise.
//! - `revision` increases on every applied mutation and never on a no-op.
//! - Updates to unknown ids are silent no-ops, not errors.

use crate::model::element::{Edge, EdgeMarker, Element, ElementKind, ElementPatch, Position};
use crate::model::snapshot::GraphSnapshot;
use crate::store::id_gen::{
    trailing_ordinal, IdentityGenerator, StaggerLayout, MAX_RESTORED_ORDINAL,
};
use crate::store::{Endpoint, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Single source of truth for one diagram.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    ids: IdentityGenerator,
    layout: StaggerLayout,
    nodes: Vec<Element>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    revision: u64,
}

impl GraphStore {
    /// Creates an empty store with the default stagger layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store placing new elements with `layout`.
    pub fn with_layout(layout: StaggerLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Rebuilds a store from a previously captured snapshot.
    ///
    /// # Errors
    /// - `DuplicateElement` when two nodes share an id.
    /// - `DuplicateEdge` when two edges share an id.
    /// - `UnknownEndpoint` when an edge references a missing node.
    /// - `OrdinalOutOfRange` when an id ends in an ordinal above
    ///   `u64::MAX / 2`.
    ///
    /// Counters are advanced past every ordinal found in restored ids so new
    /// allocations never collide with them.
    pub fn restore(snapshot: GraphSnapshot, layout: StaggerLayout) -> StoreResult<Self> {
        let mut index = HashMap::with_capacity(snapshot.nodes.len());
        for (position, node) in snapshot.nodes.iter().enumerate() {
            if index.insert(node.id.clone(), position).is_some() {
                return Err(StoreError::DuplicateElement(node.id.clone()));
            }
        }
        let mut edge_ids = HashSet::with_capacity(snapshot.edges.len());
        for edge in &snapshot.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(StoreError::DuplicateEdge(edge.id.clone()));
            }
            ensure_indexed(&index, Endpoint::Source, &edge.source)?;
            ensure_indexed(&index, Endpoint::Target, &edge.target)?;
        }

        let element_floor = floor_for(
            snapshot.nodes.len(),
            snapshot.nodes.iter().map(|node| node.id.as_str()),
        )?;
        let edge_floor = floor_for(
            snapshot.edges.len(),
            snapshot.edges.iter().map(|edge| edge.id.as_str()),
        )?;
        let mut ids = IdentityGenerator::new();
        ids.reserve(element_floor, edge_floor);

        info!(
            "event=store_restore module=store status=ok nodes={} edges={}",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );

        Ok(Self {
            ids,
            layout,
            nodes: snapshot.nodes,
            index,
            edges: snapshot.edges,
            revision: 0,
        })
    }

    /// Creates one element of `kind` with default label/description/position.
    ///
    /// # Contract
    /// - Always succeeds.
    /// - Label is `"<kind> <ordinal>"`, description is empty.
    pub fn create_node(&mut self, kind: ElementKind) -> &Element {
        let allocation = self.ids.next(kind);
        let element = Element {
            id: allocation.id,
            kind,
            label: format!("{} {}", kind.as_str(), allocation.ordinal),
            description: String::new(),
            position: self.layout.position_for(allocation.ordinal),
        };
        debug!(
            "event=element_created module=store id={} kind={}",
            element.id, element.kind
        );

        let slot = self.nodes.len();
        self.index.insert(element.id.clone(), slot);
        self.nodes.push(element);
        self.revision += 1;
        &self.nodes[slot]
    }

    /// Connects two existing elements.
    ///
    /// Self-loops and parallel duplicates are accepted.
    ///
    /// # Errors
    /// - `UnknownEndpoint` for a missing source (checked first) or target.
    pub fn connect(&mut self, source: &str, target: &str) -> StoreResult<&Edge> {
        ensure_indexed(&self.index, Endpoint::Source, source)?;
        ensure_indexed(&self.index, Endpoint::Target, target)?;

        let edge = Edge {
            id: self.ids.next_edge(),
            source: source.to_string(),
            target: target.to_string(),
            marker_end: EdgeMarker::ArrowClosed,
        };
        debug!(
            "event=edge_created module=store id={} source={} target={}",
            edge.id, edge.source, edge.target
        );

        let slot = self.edges.len();
        self.edges.push(edge);
        self.revision += 1;
        Ok(&self.edges[slot])
    }

    /// Applies `patch` to the element with `id`.
    ///
    /// Returns `None`, leaving the store untouched, when `id` is unknown.
    pub fn update_node(&mut self, id: &str, patch: &ElementPatch) -> Option<&Element> {
        let Some(&slot) = self.index.get(id) else {
            debug!("event=element_update module=store status=noop reason=unknown_id");
            return None;
        };
        let element = &mut self.nodes[slot];
        patch.apply_to(element);
        self.revision += 1;
        Some(&self.nodes[slot])
    }

    /// Position-only update used by canvas drag handling.
    pub fn move_node(&mut self, id: &str, position: Position) -> Option<&Element> {
        self.update_node(id, &ElementPatch::position(position))
    }

    pub fn node(&self, id: &str) -> Option<&Element> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[Element] {
        &self.nodes
    }

    /// Edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Monotonic change counter for view invalidation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layout(&self) -> &StaggerLayout {
        &self.layout
    }

    /// Moves `revision` strictly past `previous` when this store replaces
    /// another one.
    pub(crate) fn continue_revision_from(&mut self, previous: u64) {
        self.revision = self.revision.max(previous.saturating_add(1));
    }

    /// Copies current state into a snapshot stamped with `at`.
    pub fn snapshot_at(&self, at: DateTime<Utc>) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes.clone(), self.edges.clone(), at)
    }

    /// Copies current state into a snapshot stamped with the current time.
    pub fn snapshot(&self) -> GraphSnapshot {
        self.snapshot_at(Utc::now())
    }
}

fn ensure_indexed(
    index: &HashMap<String, usize>,
    endpoint: Endpoint,
    id: &str,
) -> StoreResult<()> {
    if index.contains_key(id) {
        Ok(())
    } else {
        Err(StoreError::UnknownEndpoint {
            endpoint,
            id: id.to_string(),
        })
    }
}

fn floor_for<'a>(count: usize, ids: impl Iterator<Item = &'a str>) -> StoreResult<u64> {
    let mut floor = count as u64;
    for id in ids {
        let Some(ordinal) = trailing_ordinal(id) else {
            continue;
        };
        if ordinal > MAX_RESTORED_ORDINAL {
            return Err(StoreError::OrdinalOutOfRange(id.to_string()));
        }
        floor = floor.max(ordinal + 1);
    }
    Ok(floor)
}

#[cfg(test)]
mod tests {
    use super::GraphStore;
    use crate::model::element::{ElementKind, ElementPatch, Position};
    use crate::store::StaggerLayout;

    #[test]
    fn revision_tracks_applied_mutations_only() {
        let mut store = GraphStore::new();
        assert_eq!(store.revision(), 0);

        let id = store.create_node(ElementKind::Block).id.clone();
        assert_eq!(store.revision(), 1);

        assert!(store.update_node("missing", &ElementPatch::label("x")).is_none());
        assert_eq!(store.revision(), 1);

        store.connect(&id, &id).unwrap();
        assert_eq!(store.revision(), 2);

        assert!(store.connect(&id, "missing").is_err());
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn custom_layout_is_used_for_placement() {
        let layout = StaggerLayout {
            origin_x: 0.0,
            origin_y: 0.0,
            step_x: 10,
            wrap_width: 20,
            per_row: 2,
            row_height: 5.0,
        };
        let mut store = GraphStore::with_layout(layout);
        let positions = (0..3)
            .map(|_| store.create_node(ElementKind::Port).position)
            .collect::<Vec<_>>();
        assert_eq!(
            positions,
            vec![
                Position::new(0.0, 0.0),
                Position::new(10.0, 0.0),
                Position::new(0.0, 5.0),
            ]
        );
    }

    #[test]
    fn continued_revision_moves_strictly_forward() {
        let mut fresh = GraphStore::new();
        fresh.continue_revision_from(0);
        assert_eq!(fresh.revision(), 1);

        let mut busy = GraphStore::new();
        for _ in 0..5 {
            busy.create_node(ElementKind::Block);
        }
        busy.continue_revision_from(2);
        assert_eq!(busy.revision(), 5);
    }

    #[test]
    fn move_node_only_touches_position() {
        let mut store = GraphStore::new();
        let before = store.create_node(ElementKind::Action).clone();

        let moved = store
            .move_node(&before.id, Position::new(12.5, -3.0))
            .cloned()
            .unwrap();
        assert_eq!(moved.position, Position::new(12.5, -3.0));
        assert_eq!(moved.label, before.label);
        assert_eq!(moved.description, before.description);
        assert_eq!(moved.kind, before.kind);
    }
}
