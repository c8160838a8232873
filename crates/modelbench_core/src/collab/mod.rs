//! Seams for external collaborators (persistence, simulation).
//!
//! # Responsibility
//! - Define what the core hands to collaborators and nothing more.
//! - Keep collaborator outcomes out of graph state.
//!
//! # Invariants
//! - Collaborators receive snapshots (copies), never live store references.
//! - A collaborator failure is logged and dropped; it never blocks edits.

use crate::model::snapshot::GraphSnapshot;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sinks;

pub use sinks::{JsonFileSink, LogSink};

pub type SinkResult<T> = Result<T, SinkError>;

/// Failure reported by a snapshot sink.
#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Encode(serde_json::Error),
    Rejected(String),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot write failed: {err}"),
            Self::Encode(err) => write!(f, "snapshot encode failed: {err}"),
            Self::Rejected(message) => write!(f, "snapshot rejected: {message}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Persistence collaborator that receives snapshots on save.
pub trait SnapshotSink: Send + Sync {
    /// Name reported in save receipts and log lines.
    fn sink_id(&self) -> &str;
    fn submit(&self, snapshot: &GraphSnapshot) -> SinkResult<()>;
}

/// Opaque simulation runner started from the toolbar.
pub trait SimulationTrigger {
    fn start(&self, snapshot: &GraphSnapshot);
}

/// Outcome of handing one snapshot to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub sink_id: String,
    pub nodes: usize,
    pub edges: usize,
    /// `false` when the sink reported an error; the error itself is logged.
    pub delivered: bool,
}

/// Submits `snapshot` to `sink`, logging the sink's outcome.
pub fn deliver(sink: &dyn SnapshotSink, snapshot: &GraphSnapshot) -> SaveReceipt {
    let sink_id = sink.sink_id();
    let delivered = match sink.submit(snapshot) {
        Ok(()) => {
            info!(
                "event=snapshot_save module=collab status=ok sink={} nodes={} edges={}",
                sink_id,
                snapshot.nodes.len(),
                snapshot.edges.len()
            );
            true
        }
        Err(err) => {
            warn!(
                "event=snapshot_save module=collab status=error sink={} error={}",
                sink_id, err
            );
            false
        }
    };
    SaveReceipt {
        sink_id: sink_id.to_string(),
        nodes: snapshot.nodes.len(),
        edges: snapshot.edges.len(),
        delivered,
    }
}

#[cfg(test)]
mod tests {
    use super::{deliver, SinkError, SinkResult, SnapshotSink};
    use crate::model::element::ElementKind;
    use crate::model::snapshot::GraphSnapshot;
    use crate::store::GraphStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakySink {
        fail: bool,
        calls: AtomicUsize,
    }

    impl SnapshotSink for FlakySink {
        fn sink_id(&self) -> &str {
            "flaky"
        }

        fn submit(&self, _snapshot: &GraphSnapshot) -> SinkResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SinkError::Rejected("offline".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn deliver_reports_counts_of_submitted_snapshot() {
        let mut store = GraphStore::new();
        let block = store.create_node(ElementKind::Block).id.clone();
        store.connect(&block, &block).unwrap();
        let sink = FlakySink {
            fail: false,
            calls: AtomicUsize::new(0),
        };

        let receipt = deliver(&sink, &store.snapshot());
        assert!(receipt.delivered);
        assert_eq!(receipt.sink_id, "flaky");
        assert_eq!((receipt.nodes, receipt.edges), (1, 1));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn deliver_marks_sink_failure_without_erroring() {
        let sink = FlakySink {
            fail: true,
            calls: AtomicUsize::new(0),
        };

        let receipt = deliver(&sink, &GraphStore::new().snapshot());
        assert!(!receipt.delivered);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }
}
