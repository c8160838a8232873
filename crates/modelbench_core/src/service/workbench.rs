//! Workbench session service.
//!
//! # Responsibility
//! - Compose store, selection, property editor and collaborators.
//! - Apply the synchronization rules between them for every user action.
//!
//! # Invariants
//! - Selecting an element always rebinds the editor to it.
//! - Clearing selection always unbinds the editor.
//! - Every write goes through `GraphStore`; views only read.

use crate::collab::{deliver, SaveReceipt, SimulationTrigger, SnapshotSink};
use crate::model::element::{Edge, Element, ElementKind, Position};
use crate::model::snapshot::GraphSnapshot;
use crate::projection::{project, Outline};
use crate::service::property_editor::{EditorError, PropertyEditor};
use crate::service::selection::SelectionController;
use crate::store::{GraphStore, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type WorkbenchResult<T> = Result<T, WorkbenchError>;

/// Errors surfaced by workbench actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkbenchError {
    Store(StoreError),
    Editor(EditorError),
    /// `save` was called with no snapshot sink attached.
    NoSink,
}

impl Display for WorkbenchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::NoSink => f.write_str("no snapshot sink attached"),
        }
    }
}

impl Error for WorkbenchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Editor(err) => Some(err),
            Self::NoSink => None,
        }
    }
}

impl From<StoreError> for WorkbenchError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<EditorError> for WorkbenchError {
    fn from(value: EditorError) -> Self {
        Self::Editor(value)
    }
}

/// One modeling session.
#[derive(Default)]
pub struct Workbench {
    store: GraphStore,
    selection: SelectionController,
    editor: PropertyEditor,
    sink: Option<Arc<dyn SnapshotSink>>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session over an existing store.
    pub fn with_store(store: GraphStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Installs the persistence collaborator used by `save`.
    ///
    /// Returns the sink it replaces, if any.
    pub fn attach_sink(&mut self, sink: Arc<dyn SnapshotSink>) -> Option<Arc<dyn SnapshotSink>> {
        debug!("event=sink_attach module=workbench sink={}", sink.sink_id());
        self.sink.replace(sink)
    }

    pub fn detach_sink(&mut self) -> Option<Arc<dyn SnapshotSink>> {
        self.sink.take()
    }

    pub fn sink_id(&self) -> Option<&str> {
        self.sink.as_deref().map(|sink| sink.sink_id())
    }

    /// Palette action: adds one element of `kind`.
    pub fn create_element(&mut self, kind: ElementKind) -> &Element {
        self.store.create_node(kind)
    }

    /// Canvas drag-to-connect.
    pub fn connect(&mut self, source: &str, target: &str) -> WorkbenchResult<&Edge> {
        self.store.connect(source, target).map_err(Into::into)
    }

    /// Canvas drag-end. Unknown ids are ignored.
    pub fn move_element(&mut self, id: &str, position: Position) -> Option<&Element> {
        self.store.move_node(id, position)
    }

    /// Canvas or outline click.
    ///
    /// Rebinds the property editor, discarding any uncommitted draft. An id
    /// the store does not know leaves selection and editor unchanged.
    pub fn select(&mut self, id: &str) -> Option<&Element> {
        let Some(element) = self.store.node(id) else {
            debug!("event=select module=workbench status=noop reason=unknown_id");
            return None;
        };
        self.selection.select(element);
        self.editor.bind(element);
        Some(element)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.editor.unbind();
    }

    /// Currently selected element, read through the store.
    pub fn selected(&self) -> Option<&Element> {
        self.selection.resolve(&self.store)
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn editor(&self) -> &PropertyEditor {
        &self.editor
    }

    /// Edits the draft label. Returns `false` when nothing is selected.
    pub fn edit_label(&mut self, value: impl Into<String>) -> bool {
        self.editor.set_label(value)
    }

    /// Edits the draft description. Returns `false` when nothing is selected.
    pub fn edit_description(&mut self, value: impl Into<String>) -> bool {
        self.editor.set_description(value)
    }

    /// Property panel "update" button.
    pub fn commit_properties(&mut self) -> WorkbenchResult<Option<&Element>> {
        self.editor.commit(&mut self.store).map_err(Into::into)
    }

    /// Outline tree, recomputed from current store state.
    pub fn outline(&self) -> Outline<'_> {
        project(self.store.nodes())
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        self.store.snapshot()
    }

    /// Toolbar "save": hands a fresh snapshot to the attached sink.
    ///
    /// A sink failure is reported through `SaveReceipt::delivered` and never
    /// touches session state.
    ///
    /// # Errors
    /// - `NoSink` when no sink is attached.
    pub fn save(&self) -> WorkbenchResult<SaveReceipt> {
        let sink = self.sink.as_deref().ok_or(WorkbenchError::NoSink)?;
        Ok(deliver(sink, &self.store.snapshot()))
    }

    /// Toolbar "run": starts the simulation collaborator on a snapshot.
    pub fn start_simulation(&self, trigger: &dyn SimulationTrigger) {
        let snapshot = self.store.snapshot();
        info!(
            "event=simulation_start module=workbench nodes={} edges={}",
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        trigger.start(&snapshot);
    }

    /// Toolbar "open": replaces the store with a restored snapshot.
    ///
    /// Selection is cleared because restored ids may not match the old ones.
    /// The revision keeps rising across the swap. On error the current store
    /// is kept.
    pub fn open(&mut self, snapshot: GraphSnapshot) -> WorkbenchResult<()> {
        let mut restored = GraphStore::restore(snapshot, *self.store.layout())?;
        restored.continue_revision_from(self.store.revision());
        self.store = restored;
        self.clear_selection();
        Ok(())
    }
}
