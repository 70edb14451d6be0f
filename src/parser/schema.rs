//! Call graph snapshot schema.
//!
//! A snapshot is a call graph that has already been aggregated (and,
//! for flame graphs, built in call tree mode) by the profiler.

use serde::{Deserialize, Serialize};

/// Top-level snapshot structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name shown in legends (binary or profile file)
    #[serde(default)]
    pub title: String,

    /// Kind of samples, e.g. "cpu" or "alloc_space"
    #[serde(default)]
    pub sample_type: String,

    /// Unit of every node and edge value
    #[serde(default = "default_unit", alias = "sample_unit")]
    pub unit: String,

    /// Percentage base; defaults to the sum of flat values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    /// Collection time in nanoseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_nanos: Option<i64>,

    pub nodes: Vec<SnapshotNode>,

    #[serde(default)]
    pub edges: Vec<SnapshotEdge>,
}

fn default_unit() -> String {
    "count".to_string()
}

/// One graph node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Unique within the snapshot; only used to resolve edges
    pub id: u64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub orig_name: String,

    #[serde(default)]
    pub address: u64,

    #[serde(default)]
    pub file: String,

    #[serde(default)]
    pub start_line: i64,

    #[serde(default, alias = "lineno")]
    pub line: i64,

    #[serde(default)]
    pub objfile: String,

    #[serde(default)]
    pub flat: i64,

    #[serde(default)]
    pub flat_div: i64,

    #[serde(default)]
    pub cum: i64,

    #[serde(default)]
    pub cum_div: i64,
}

/// One caller -> callee edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEdge {
    pub from: u64,
    pub to: u64,

    #[serde(default)]
    pub weight: i64,

    #[serde(default)]
    pub residual: bool,

    #[serde(default)]
    pub inline: bool,
}
