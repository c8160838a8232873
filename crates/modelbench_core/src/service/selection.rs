//! Active element tracking.
//!
//! # Invariants
//! - At most one element is selected.
//! - Only the id is held; element data is always read back from the store.

use crate::model::element::{Element, ElementId};
use crate::store::GraphStore;

/// Holds the active element reference shared by canvas and outline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<ElementId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current selection unconditionally.
    ///
    /// Returns the previously selected id, if any.
    pub fn select(&mut self, element: &Element) -> Option<ElementId> {
        self.selected.replace(element.id.clone())
    }

    pub fn clear(&mut self) -> Option<ElementId> {
        self.selected.take()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_id() == Some(id)
    }

    /// Looks the selected element up in `store`.
    pub fn resolve<'s>(&self, store: &'s GraphStore) -> Option<&'s Element> {
        store.node(self.selected_id()?)
    }
}
