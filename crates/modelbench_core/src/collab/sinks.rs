//! Built-in snapshot sinks.

use crate::collab::{SinkResult, SnapshotSink};
use crate::model::snapshot::GraphSnapshot;
use log::info;
use std::path::{Path, PathBuf};

/// Writes each snapshot as pretty JSON to one file, replacing prior content.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    sink_id: String,
    path: PathBuf,
}

impl JsonFileSink {
    pub const DEFAULT_ID: &'static str = "json-file";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_id(Self::DEFAULT_ID, path)
    }

    pub fn with_id(sink_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            sink_id: sink_id.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for JsonFileSink {
    fn sink_id(&self) -> &str {
        &self.sink_id
    }

    fn submit(&self, snapshot: &GraphSnapshot) -> SinkResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let encoded = snapshot.to_json_pretty()?;
        std::fs::write(&self.path, encoded)?;
        Ok(())
    }
}

/// Records snapshot metadata in the log and discards the payload.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

impl LogSink {
    pub const ID: &'static str = "log";
}

impl SnapshotSink for LogSink {
    fn sink_id(&self) -> &str {
        Self::ID
    }

    fn submit(&self, snapshot: &GraphSnapshot) -> SinkResult<()> {
        info!(
            "event=snapshot_logged module=collab nodes={} edges={} timestamp={}",
            snapshot.nodes.len(),
            snapshot.edges.len(),
            snapshot.timestamp
        );
        Ok(())
    }
}
