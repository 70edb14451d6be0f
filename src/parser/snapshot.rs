//! Snapshot loading.
//!
//! Turns snapshot JSON into a `Graph` plus the `ReportOptions` that
//! describe it.

use super::schema::Snapshot;
use crate::graph::{Graph, GraphBuilder, NodeId, NodeInfo};
use crate::report::ReportOptions;
use crate::utils::error::ParseError;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::collections::HashMap;

/// A loaded profile: the graph and its report settings
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub graph: Graph,
    pub options: ReportOptions,
}

/// Parse snapshot JSON bytes
pub fn parse_snapshot(raw: &[u8]) -> Result<LoadedProfile, ParseError> {
    let snapshot: Snapshot = serde_json::from_slice(raw)?;
    from_snapshot(snapshot)
}

/// Convert a deserialized snapshot, validating ids and divisors
pub fn from_snapshot(snapshot: Snapshot) -> Result<LoadedProfile, ParseError> {
    debug!(
        "Loading snapshot {:?}: {} nodes, {} edges",
        snapshot.title,
        snapshot.nodes.len(),
        snapshot.edges.len()
    );

    let mut builder = GraphBuilder::with_capacity(snapshot.nodes.len());
    let mut ids: HashMap<u64, NodeId> = HashMap::with_capacity(snapshot.nodes.len());

    for node in snapshot.nodes {
        if node.flat_div < 0 || node.cum_div < 0 {
            return Err(ParseError::InvalidFormat(format!(
                "node {} has a negative divisor",
                node.id
            )));
        }
        if ids.contains_key(&node.id) {
            return Err(ParseError::InvalidFormat(format!(
                "duplicate node id {}",
                node.id
            )));
        }

        let info = NodeInfo {
            name: node.name,
            orig_name: node.orig_name,
            address: node.address,
            file: node.file,
            start_line: node.start_line,
            lineno: node.line,
            objfile: node.objfile,
        };
        let id = builder.add_node(info, node.flat, node.cum);
        builder.set_divisors(id, node.flat_div, node.cum_div);
        ids.insert(node.id, id);
    }

    for edge in &snapshot.edges {
        let resolve = |raw: u64| {
            ids.get(&raw).copied().ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "edge {} -> {} references unknown node {}",
                    edge.from, edge.to, raw
                ))
            })
        };
        let src = resolve(edge.from)?;
        let dest = resolve(edge.to)?;
        builder.add_edge(src, dest, edge.weight, edge.residual, edge.inline)?;
    }

    let time = snapshot.time_nanos.and_then(|nanos| {
        let parsed = DateTime::<Utc>::from_timestamp(
            nanos.div_euclid(1_000_000_000),
            nanos.rem_euclid(1_000_000_000) as u32,
        );
        if parsed.is_none() {
            warn!("Ignoring out of range snapshot time {}", nanos);
        }
        parsed
    });

    let options = ReportOptions {
        title: snapshot.title,
        sample_type: snapshot.sample_type,
        sample_unit: snapshot.unit,
        total: snapshot.total,
        time,
        ..Default::default()
    };

    Ok(LoadedProfile {
        graph: builder.build(),
        options,
    })
}
