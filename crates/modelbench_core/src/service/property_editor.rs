//! Property editor draft binding.
//!
//! # Responsibility
//! - Buffer label/description edits for the selected element.
//! - Write the buffer back to the store only on explicit commit.
//!
//! # Invariants
//! - `bind` always replaces the previous draft, saved or not.
//! - Draft edits never touch the store.
//! - Commit writes label and description only; position is never part of it.

use crate::model::element::{Element, ElementId, ElementKind, ElementPatch};
use crate::store::GraphStore;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from property editor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// No element is bound, so there is nothing to commit.
    Unbound,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbound => write!(f, "property editor has no bound element"),
        }
    }
}

impl Error for EditorError {}

/// Editable fields of one element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub label: String,
    pub description: String,
}

impl Draft {
    fn from_element(element: &Element) -> Self {
        Self {
            label: element.label.clone(),
            description: element.description.clone(),
        }
    }

    fn matches(&self, element: &Element) -> bool {
        self.label == element.label && self.description == element.description
    }
}

/// Bound-state payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element_id: ElementId,
    /// Shown read-only next to the draft.
    pub kind: ElementKind,
    pub draft: Draft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BindingState {
    /// No selection; the panel is hidden.
    #[default]
    Unbound,
    Bound(Binding),
}

/// Two-state draft buffer behind the property panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyEditor {
    state: BindingState,
}

impl PropertyEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Bound` for `element`, seeding the draft from committed values.
    pub fn bind(&mut self, element: &Element) {
        if let BindingState::Bound(previous) = &self.state {
            debug!(
                "event=draft_replaced module=editor previous={} next={}",
                previous.element_id, element.id
            );
        }
        self.state = BindingState::Bound(Binding {
            element_id: element.id.clone(),
            kind: element.kind,
            draft: Draft::from_element(element),
        });
    }

    /// Returns to `Unbound`, dropping any draft.
    pub fn unbind(&mut self) {
        self.state = BindingState::Unbound;
    }

    pub fn state(&self) -> &BindingState {
        &self.state
    }

    pub fn binding(&self) -> Option<&Binding> {
        match &self.state {
            BindingState::Bound(binding) => Some(binding),
            BindingState::Unbound => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding().is_some()
    }

    pub fn bound_id(&self) -> Option<&str> {
        self.binding().map(|binding| binding.element_id.as_str())
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.binding().map(|binding| &binding.draft)
    }

    /// Edits the draft label. Returns `false` when unbound.
    pub fn set_label(&mut self, value: impl Into<String>) -> bool {
        match &mut self.state {
            BindingState::Bound(binding) => {
                binding.draft.label = value.into();
                true
            }
            BindingState::Unbound => false,
        }
    }

    /// Edits the draft description. Returns `false` when unbound.
    pub fn set_description(&mut self, value: impl Into<String>) -> bool {
        match &mut self.state {
            BindingState::Bound(binding) => {
                binding.draft.description = value.into();
                true
            }
            BindingState::Unbound => false,
        }
    }

    /// Returns whether the draft differs from the committed element.
    ///
    /// A bound element that no longer resolves counts as clean.
    pub fn is_dirty(&self, store: &GraphStore) -> bool {
        let Some(binding) = self.binding() else {
            return false;
        };
        store
            .node(&binding.element_id)
            .is_some_and(|element| !binding.draft.matches(element))
    }

    /// Writes the draft label and description to the store.
    ///
    /// Returns the updated element, or `Ok(None)` when the store no longer
    /// knows the bound id (store no-op semantics).
    ///
    /// # Errors
    /// - `Unbound` when no element is bound.
    pub fn commit<'s>(
        &self,
        store: &'s mut GraphStore,
    ) -> Result<Option<&'s Element>, EditorError> {
        let binding = self.binding().ok_or(EditorError::Unbound)?;
        let patch = ElementPatch::default()
            .with_label(binding.draft.label.clone())
            .with_description(binding.draft.description.clone());
        debug!("event=draft_commit module=editor id={}", binding.element_id);
        Ok(store.update_node(&binding.element_id, &patch))
    }
}

#[cfg(test)]
mod tests {
    use super::{BindingState, EditorError, PropertyEditor};
    use crate::model::element::{ElementKind, Position};
    use crate::store::GraphStore;

    #[test]
    fn unbound_editor_rejects_edits_and_commit() {
        let mut store = GraphStore::new();
        let mut editor = PropertyEditor::new();

        assert_eq!(editor.state(), &BindingState::Unbound);
        assert!(!editor.set_label("x"));
        assert!(!editor.set_description("y"));
        assert_eq!(editor.commit(&mut store).unwrap_err(), EditorError::Unbound);
    }

    #[test]
    fn commit_leaves_position_alone() {
        let mut store = GraphStore::new();
        let element = store.create_node(ElementKind::Block).clone();
        let mut editor = PropertyEditor::new();
        editor.bind(&element);

        store.move_node(&element.id, Position::new(1.0, 2.0));
        editor.set_label("Caliper");
        let committed = editor.commit(&mut store).unwrap().cloned().unwrap();

        assert_eq!(committed.label, "Caliper");
        assert_eq!(committed.position, Position::new(1.0, 2.0));
    }

    #[test]
    fn dirty_tracks_draft_against_committed_values() {
        let mut store = GraphStore::new();
        let element = store.create_node(ElementKind::Port).clone();
        let mut editor = PropertyEditor::new();
        editor.bind(&element);
        assert!(!editor.is_dirty(&store));

        editor.set_description("hydraulic line in");
        assert!(editor.is_dirty(&store));

        editor.commit(&mut store).unwrap();
        assert!(!editor.is_dirty(&store));
    }
}
