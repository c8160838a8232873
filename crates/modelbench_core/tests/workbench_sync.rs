use modelbench_core::{
    EditorError, ElementKind, GraphSnapshot, Position, SimulationTrigger, Workbench,
    WorkbenchError,
};
use std::cell::RefCell;

fn workbench_with_two_blocks() -> (Workbench, String, String) {
    let mut workbench = Workbench::new();
    let a = workbench.create_element(ElementKind::Block).id.clone();
    let b = workbench.create_element(ElementKind::Block).id.clone();
    (workbench, a, b)
}

#[test]
fn selecting_binds_editor_to_committed_values() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    let selected = workbench.select(&a).cloned().unwrap();
    let draft = workbench.editor().draft().unwrap();
    assert_eq!(draft.label, selected.label);
    assert_eq!(draft.description, selected.description);
    assert_eq!(workbench.editor().bound_id(), Some(a.as_str()));
    assert_eq!(workbench.editor().binding().unwrap().kind, ElementKind::Block);
}

#[test]
fn switching_selection_discards_uncommitted_draft() {
    let (mut workbench, a, b) = workbench_with_two_blocks();

    workbench.select(&a);
    assert!(workbench.edit_label("edited but not saved"));
    workbench.select(&b);

    assert_eq!(workbench.store().node(&a).unwrap().label, "Block 0");
    let draft = workbench.editor().draft().unwrap();
    assert_eq!(draft.label, "Block 1");
    assert_eq!(draft.description, "");

    workbench.select(&a);
    assert_eq!(workbench.editor().draft().unwrap().label, "Block 0");
}

#[test]
fn reselecting_same_element_also_resets_draft() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    workbench.select(&a);
    workbench.edit_description("scratch");
    workbench.select(&a);

    assert_eq!(workbench.editor().draft().unwrap().description, "");
}

#[test]
fn commit_writes_draft_without_touching_position() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    workbench.select(&a);
    workbench.move_element(&a, Position::new(40.0, 60.0));
    workbench.edit_label("Master cylinder");
    workbench.edit_description("Converts pedal force");

    let committed = workbench.commit_properties().unwrap().cloned().unwrap();
    assert_eq!(committed.label, "Master cylinder");
    assert_eq!(committed.description, "Converts pedal force");
    assert_eq!(committed.position, Position::new(40.0, 60.0));
    assert_eq!(workbench.selected().unwrap().label, "Master cylinder");
    assert_eq!(
        workbench.outline().resolve(&a).unwrap().label,
        "Master cylinder"
    );
}

#[test]
fn selection_reads_through_to_store_mutations() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    workbench.select(&a);
    workbench.move_element(&a, Position::new(-10.0, 5.0));

    assert_eq!(
        workbench.selected().unwrap().position,
        Position::new(-10.0, 5.0)
    );
}

#[test]
fn clearing_selection_unbinds_editor() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    workbench.select(&a);
    workbench.clear_selection();

    assert!(workbench.selected().is_none());
    assert!(!workbench.editor().is_bound());
    assert!(!workbench.edit_label("ignored"));
    assert_eq!(
        workbench.commit_properties().unwrap_err(),
        WorkbenchError::Editor(EditorError::Unbound)
    );
}

#[test]
fn selecting_unknown_id_keeps_current_selection() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    workbench.select(&a);
    workbench.edit_label("pending");
    assert!(workbench.select("Block-99").is_none());

    assert_eq!(workbench.selection().selected_id(), Some(a.as_str()));
    assert_eq!(workbench.editor().draft().unwrap().label, "pending");
}

#[test]
fn connect_errors_surface_as_store_errors() {
    let (mut workbench, a, _) = workbench_with_two_blocks();

    let err = workbench.connect(&a, "Port-7").unwrap_err();
    assert!(matches!(err, WorkbenchError::Store(ref inner) if inner.is_reference_error()));
    assert_eq!(workbench.store().edge_count(), 0);
}

#[test]
fn open_replaces_store_and_clears_selection() {
    let (mut workbench, a, b) = workbench_with_two_blocks();
    workbench.connect(&a, &b).unwrap();
    let saved = workbench.snapshot();

    let mut other = Workbench::new();
    let port = other.create_element(ElementKind::Port).id.clone();
    other.select(&port);
    other.open(saved).unwrap();

    assert!(other.selected().is_none());
    assert!(!other.editor().is_bound());
    assert_eq!(other.store().node_count(), 2);
    assert_eq!(other.store().edge_count(), 1);
}

#[test]
fn open_advances_revision_past_previous_session() {
    let mut source = Workbench::new();
    source.create_element(ElementKind::Requirement);
    let saved = source.snapshot();

    let mut empty = Workbench::new();
    let before = empty.store().revision();
    empty.open(saved).unwrap();
    assert!(empty.store().revision() > before);

    let (mut busy, _, _) = workbench_with_two_blocks();
    let before = busy.store().revision();
    busy.open(source.snapshot()).unwrap();
    assert!(busy.store().revision() > before);
    assert_eq!(busy.store().node_count(), 1);
}

#[test]
fn open_with_invalid_snapshot_keeps_current_store() {
    let (mut workbench, a, _) = workbench_with_two_blocks();
    let mut broken = workbench.snapshot();
    broken.edges.push(modelbench_core::Edge {
        id: "edge-0".to_string(),
        source: a.clone(),
        target: "missing".to_string(),
        marker_end: Default::default(),
    });

    assert!(workbench.open(broken).is_err());
    assert_eq!(workbench.store().node_count(), 2);
}

struct RecordingTrigger {
    seen: RefCell<Vec<usize>>,
}

impl SimulationTrigger for RecordingTrigger {
    fn start(&self, snapshot: &GraphSnapshot) {
        self.seen.borrow_mut().push(snapshot.nodes.len());
    }
}

#[test]
fn simulation_trigger_receives_current_snapshot() {
    let (workbench, _, _) = workbench_with_two_blocks();
    let trigger = RecordingTrigger {
        seen: RefCell::new(Vec::new()),
    };

    workbench.start_simulation(&trigger);
    assert_eq!(*trigger.seen.borrow(), vec![2]);
}
