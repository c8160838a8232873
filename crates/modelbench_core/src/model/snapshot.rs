//! Serializable graph snapshot handed to persistence collaborators.
//!
//! # Responsibility
//! - Define the `{ nodes, edges, timestamp }` wire shape.
//! - Encode/decode snapshots as JSON.
//!
//! # Invariants
//! - `timestamp` is ISO-8601 UTC with millisecond precision and a `Z` suffix.
//! - A snapshot is a copy; it never aliases live store state.

use crate::model::element::{Edge, Element};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a graph store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<Element>,
    pub edges: Vec<Edge>,
    pub timestamp: String,
}

impl GraphSnapshot {
    /// Builds a snapshot stamped with `at`.
    pub fn new(nodes: Vec<Element>, edges: Vec<Edge>, at: DateTime<Utc>) -> Self {
        Self {
            nodes,
            edges,
            timestamp: format_timestamp(at),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::GraphSnapshot;
    use chrono::{TimeZone, Utc};

    #[test]
    fn timestamp_uses_millisecond_utc_format() {
        let at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
        let snapshot = GraphSnapshot::new(Vec::new(), Vec::new(), at);
        assert_eq!(snapshot.timestamp, "2026-02-13T10:00:00.000Z");
    }
}
