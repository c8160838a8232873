//! FFI use-case API for UI-host calls.
//!
//! # Responsibility
//! - Expose workbench actions to the UI host via FRB.
//! - Flatten core results into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - All calls share one process-wide workbench session.
//! - Element data crossing the boundary is a copy; the session stays the
//!   single source of truth.

use modelbench_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, kind_color,
    ping as ping_inner, Element, ElementKind, JsonFileSink, Position, Workbench,
};
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const SNAPSHOT_FILE_NAME: &str = "modelbench_snapshot.json";
static SNAPSHOT_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Lazy<Mutex<Workbench>> = Lazy::new(|| Mutex::new(new_session()));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Element view handed to canvas, outline and property panel widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementItem {
    pub id: String,
    /// Kind name (`Block|Requirement|Port|Action`).
    pub kind: String,
    pub label: String,
    pub description: String,
    pub x: f64,
    pub y: f64,
    /// Fill color for the kind.
    pub color: String,
}

/// Edge view handed to the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeItem {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// One kind folder in the outline tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineGroupItem {
    pub label: String,
    pub entries: Vec<ElementItem>,
}

/// Property panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPanelState {
    /// `false` means no selection; the panel is hidden.
    pub visible: bool,
    pub element_id: Option<String>,
    pub kind: Option<String>,
    pub draft_label: String,
    pub draft_description: String,
    pub dirty: bool,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbenchActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Element affected by the action, if any.
    pub element: Option<ElementItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl WorkbenchActionResponse {
    fn success(message: impl Into<String>, element: Option<ElementItem>) -> Self {
        Self {
            ok: true,
            element,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            element: None,
            message: message.into(),
        }
    }
}

/// Response for connect attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectResponse {
    pub ok: bool,
    pub edge: Option<EdgeItem>,
    pub message: String,
}

/// Palette action: creates one element.
///
/// # FFI contract
/// - `kind` is parsed case-insensitively; unknown kinds fail without change.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_create_element(kind: String) -> WorkbenchActionResponse {
    let kind = match kind.parse::<ElementKind>() {
        Ok(kind) => kind,
        Err(err) => {
            return WorkbenchActionResponse::failure(format!(
                "workbench_create_element failed: {err}"
            ))
        }
    };
    with_session(|session| {
        let element = session.create_element(kind);
        WorkbenchActionResponse::success("Element created.", Some(to_element_item(element)))
    })
    .unwrap_or_else(WorkbenchActionResponse::failure)
}

/// Canvas drag-to-connect.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_connect(source_id: String, target_id: String) -> ConnectResponse {
    let outcome = with_session(|session| {
        session
            .connect(source_id.trim(), target_id.trim())
            .map(|edge| EdgeItem {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .map_err(|err| format!("workbench_connect failed: {err}"))
    });
    match outcome.and_then(|inner| inner) {
        Ok(edge) => ConnectResponse {
            ok: true,
            edge: Some(edge),
            message: "Connected.".to_string(),
        },
        Err(message) => ConnectResponse {
            ok: false,
            edge: None,
            message,
        },
    }
}

/// Canvas drag-end.
///
/// Unknown ids succeed as no-ops with `element = None`.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_move_element(element_id: String, x: f64, y: f64) -> WorkbenchActionResponse {
    with_session(|session| {
        match session.move_element(element_id.trim(), Position::new(x, y)) {
            Some(element) => {
                WorkbenchActionResponse::success("Element moved.", Some(to_element_item(element)))
            }
            None => WorkbenchActionResponse::success("No element moved.", None),
        }
    })
    .unwrap_or_else(WorkbenchActionResponse::failure)
}

/// Canvas or outline click. Returns the new property panel state.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_select(element_id: String) -> PropertyPanelState {
    with_session(|session| {
        session.select(element_id.trim());
        panel_state(session)
    })
    .unwrap_or_else(|_| hidden_panel())
}

/// Empty-canvas click.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_clear_selection() -> PropertyPanelState {
    with_session(|session| {
        session.clear_selection();
        panel_state(session)
    })
    .unwrap_or_else(|_| hidden_panel())
}

/// Property panel text field changes. `None` leaves a field as is.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_edit_draft(
    label: Option<String>,
    description: Option<String>,
) -> PropertyPanelState {
    with_session(|session| {
        if let Some(label) = label {
            session.edit_label(label);
        }
        if let Some(description) = description {
            session.edit_description(description);
        }
        panel_state(session)
    })
    .unwrap_or_else(|_| hidden_panel())
}

/// Property panel "update" button.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_commit_properties() -> WorkbenchActionResponse {
    with_session(|session| match session.commit_properties() {
        Ok(Some(element)) => {
            WorkbenchActionResponse::success("Properties updated.", Some(to_element_item(element)))
        }
        Ok(None) => WorkbenchActionResponse::success("Nothing to update.", None),
        Err(err) => {
            WorkbenchActionResponse::failure(format!("workbench_commit_properties failed: {err}"))
        }
    })
    .unwrap_or_else(WorkbenchActionResponse::failure)
}

/// Current canvas nodes in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_elements() -> Vec<ElementItem> {
    with_session(|session| {
        session
            .store()
            .nodes()
            .iter()
            .map(to_element_item)
            .collect()
    })
    .unwrap_or_default()
}

/// Current canvas edges in creation order.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_edges() -> Vec<EdgeItem> {
    with_session(|session| {
        session
            .store()
            .edges()
            .iter()
            .map(|edge| EdgeItem {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Outline tree grouped by kind.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_outline() -> Vec<OutlineGroupItem> {
    with_session(|session| {
        session
            .outline()
            .groups()
            .iter()
            .map(|group| OutlineGroupItem {
                label: group.label().to_string(),
                entries: group.entries.iter().copied().map(to_element_item).collect(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Snapshot JSON for hosts that persist on their own.
///
/// Returns an empty string when encoding fails.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_snapshot_json() -> String {
    with_session(|session| session.snapshot().to_json().unwrap_or_default()).unwrap_or_default()
}

/// Toolbar "save". A sink failure is reported but never blocks the session.
#[flutter_rust_bridge::frb(sync)]
pub fn workbench_save() -> WorkbenchActionResponse {
    with_session(|session| match session.save() {
        Ok(receipt) if receipt.delivered => WorkbenchActionResponse::success(
            format!("Model saved via {}.", receipt.sink_id),
            None,
        ),
        Ok(receipt) => WorkbenchActionResponse::failure(format!(
            "workbench_save failed: sink {} did not accept the snapshot",
            receipt.sink_id
        )),
        Err(err) => WorkbenchActionResponse::failure(format!("workbench_save failed: {err}")),
    })
    .unwrap_or_else(WorkbenchActionResponse::failure)
}

fn new_session() -> Workbench {
    let mut workbench = Workbench::new();
    let path = resolve_snapshot_path();
    log::info!(
        "event=session_init module=ffi status=ok snapshot_path={}",
        path.display()
    );
    workbench.attach_sink(std::sync::Arc::new(JsonFileSink::new(path)));
    workbench
}

fn resolve_snapshot_path() -> PathBuf {
    SNAPSHOT_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MODELBENCH_SNAPSHOT_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SNAPSHOT_FILE_NAME)
        })
        .clone()
}

fn lock_session() -> Result<MutexGuard<'static, Workbench>, String> {
    SESSION
        .lock()
        .map_err(|_| "workbench session is unavailable after a prior panic".to_string())
}

fn with_session<T>(f: impl FnOnce(&mut Workbench) -> T) -> Result<T, String> {
    let mut guard = lock_session()?;
    Ok(f(&mut guard))
}

fn panel_state(session: &Workbench) -> PropertyPanelState {
    let editor = session.editor();
    match editor.binding() {
        Some(binding) => PropertyPanelState {
            visible: true,
            element_id: Some(binding.element_id.clone()),
            kind: Some(binding.kind.to_string()),
            draft_label: binding.draft.label.clone(),
            draft_description: binding.draft.description.clone(),
            dirty: editor.is_dirty(session.store()),
        },
        None => hidden_panel(),
    }
}

fn hidden_panel() -> PropertyPanelState {
    PropertyPanelState {
        visible: false,
        element_id: None,
        kind: None,
        draft_label: String::new(),
        draft_description: String::new(),
        dirty: false,
    }
}

fn to_element_item(element: &Element) -> ElementItem {
    ElementItem {
        id: element.id.clone(),
        kind: element.kind.to_string(),
        label: element.label.clone(),
        description: element.description.clone(),
        x: element.position.x,
        y: element.position.y,
        color: kind_color(element.kind).to_string(),
    }
}
