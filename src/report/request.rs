//! Report request configuration.
//!
//! Each view asks for a report with an explicit request value instead of
//! toggling flags on a shared generator. The flame graph needs a call
//! tree, which only `Shape::Tree` produces.

use crate::utils::config::{DEFAULT_GRAPH_NODE_COUNT, DEFAULT_TOP_NODE_COUNT};
use std::fmt;
use std::str::FromStr;

/// Shape of the graph a report is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Call tree: every node has at most one caller
    Tree,
    /// Call graph: nodes may be shared between callers
    Flat,
}

/// Ranking applied to report nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Flat,
    Cum,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(SortOrder::Flat),
            "cum" => Ok(SortOrder::Cum),
            other => Err(format!("unknown sort order {:?}, expected flat or cum", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Flat => f.write_str("flat"),
            SortOrder::Cum => f.write_str("cum"),
        }
    }
}

/// What a view needs from the report generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub shape: Shape,
    /// Drop nodes beyond `node_limit`
    pub trim: bool,
    pub node_limit: Option<usize>,
    pub sort: SortOrder,
}

impl ReportRequest {
    /// Bounded flat report for the top table
    pub fn top() -> Self {
        Self {
            shape: Shape::Flat,
            trim: true,
            node_limit: Some(DEFAULT_TOP_NODE_COUNT),
            sort: SortOrder::Flat,
        }
    }

    /// Untrimmed call tree for the flame graph
    pub fn flamegraph() -> Self {
        Self {
            shape: Shape::Tree,
            trim: false,
            node_limit: None,
            sort: SortOrder::Flat,
        }
    }

    /// Trimmed call graph for the rendered graph views
    pub fn graph() -> Self {
        Self {
            shape: Shape::Flat,
            trim: true,
            node_limit: Some(DEFAULT_GRAPH_NODE_COUNT),
            sort: SortOrder::Flat,
        }
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}
