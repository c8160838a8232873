//! Per-store identity allocation and default placement.
//!
//! # Invariants
//! - Counters start at zero for each generator and only ever increase.
//! - One element counter is shared by all kinds (`Block-0`, `Port-1`, ...).
//! - Edge ids come from an independent counter.

use crate::model::element::{EdgeId, ElementId, ElementKind, Position};

/// One element identity handed out by [`IdentityGenerator::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub id: ElementId,
    /// Counter value consumed by this allocation.
    pub ordinal: u64,
}

/// Monotonic id source owned by one graph store.
#[derive(Debug, Clone, Default)]
pub struct IdentityGenerator {
    element_counter: u64,
    edge_counter: u64,
}

impl IdentityGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `"<Kind>-<counter>"` and advances the counter.
    pub fn next(&mut self, kind: ElementKind) -> Allocation {
        let ordinal = self.element_counter;
        self.element_counter += 1;
        Allocation {
            id: format!("{}-{ordinal}", kind.as_str()),
            ordinal,
        }
    }

    pub fn next_edge(&mut self) -> EdgeId {
        let ordinal = self.edge_counter;
        self.edge_counter += 1;
        format!("edge-{ordinal}")
    }

    /// Counter value the next element allocation will use.
    pub fn peek(&self) -> u64 {
        self.element_counter
    }

    /// Moves both counters past already-used ids. Never moves backwards.
    pub(crate) fn reserve(&mut self, element_floor: u64, edge_floor: u64) {
        self.element_counter = self.element_counter.max(element_floor);
        self.edge_counter = self.edge_counter.max(edge_floor);
    }
}

/// Largest ordinal a restored id may carry.
///
/// Keeps counters far from `u64::MAX` so allocation never overflows.
pub(crate) const MAX_RESTORED_ORDINAL: u64 = u64::MAX / 2;

/// Parses the trailing `-<n>` ordinal of a generated id, if any.
pub(crate) fn trailing_ordinal(id: &str) -> Option<u64> {
    let (_, suffix) = id.rsplit_once('-')?;
    suffix.parse().ok()
}

/// Staggered grid rule for newly created elements.
///
/// `x = origin_x + (ordinal * step_x) mod wrap_width`,
/// `y = origin_y + floor(ordinal / per_row) * row_height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggerLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub step_x: u64,
    pub wrap_width: u64,
    pub per_row: u64,
    pub row_height: f64,
}

impl Default for StaggerLayout {
    fn default() -> Self {
        Self {
            origin_x: 250.0,
            origin_y: 100.0,
            step_x: 50,
            wrap_width: 400,
            per_row: 8,
            row_height: 100.0,
        }
    }
}

impl StaggerLayout {
    pub fn position_for(&self, ordinal: u64) -> Position {
        let column = if self.wrap_width == 0 {
            0
        } else {
            ordinal.saturating_mul(self.step_x) % self.wrap_width
        };
        let row = if self.per_row == 0 {
            0
        } else {
            ordinal / self.per_row
        };
        Position::new(
            self.origin_x + column as f64,
            self.origin_y + row as f64 * self.row_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{trailing_ordinal, IdentityGenerator, StaggerLayout};
    use crate::model::element::{ElementKind, Position};

    #[test]
    fn counter_is_shared_across_kinds() {
        let mut ids = IdentityGenerator::new();
        assert_eq!(ids.next(ElementKind::Block).id, "Block-0");
        assert_eq!(ids.next(ElementKind::Port).id, "Port-1");
        assert_eq!(ids.next(ElementKind::Block).id, "Block-2");
        assert_eq!(ids.peek(), 3);
    }

    #[test]
    fn edge_counter_is_independent() {
        let mut ids = IdentityGenerator::new();
        ids.next(ElementKind::Action);
        assert_eq!(ids.next_edge(), "edge-0");
        assert_eq!(ids.next_edge(), "edge-1");
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn reserve_never_moves_backwards() {
        let mut ids = IdentityGenerator::new();
        ids.reserve(5, 2);
        ids.reserve(1, 0);
        assert_eq!(ids.next(ElementKind::Block).id, "Block-5");
        assert_eq!(ids.next_edge(), "edge-2");
    }

    #[test]
    fn default_layout_staggers_and_wraps() {
        let layout = StaggerLayout::default();
        assert_eq!(layout.position_for(0), Position::new(250.0, 100.0));
        assert_eq!(layout.position_for(1), Position::new(300.0, 100.0));
        assert_eq!(layout.position_for(7), Position::new(600.0, 100.0));
        assert_eq!(layout.position_for(8), Position::new(250.0, 200.0));
        assert_eq!(layout.position_for(17), Position::new(300.0, 300.0));
    }

    #[test]
    fn trailing_ordinal_reads_generated_ids_only() {
        assert_eq!(trailing_ordinal("Requirement-12"), Some(12));
        assert_eq!(trailing_ordinal("edge-3"), Some(3));
        assert_eq!(trailing_ordinal("custom"), None);
        assert_eq!(trailing_ordinal("Block-x"), None);
    }
}
