//! Report generation from a source call graph.

use super::request::{ReportRequest, Shape, SortOrder};
use super::{Report, ReportOptions};
use crate::graph::{Graph, NodeId};
use log::debug;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Build a report for one view.
///
/// Every problem found is returned as a diagnostic; a report is produced
/// only when there are none.
pub fn generate_report(
    source: &Graph,
    options: &ReportOptions,
    request: ReportRequest,
) -> Result<Report, Vec<String>> {
    debug!(
        "Generating {:?} report from {} nodes (trim: {}, limit: {:?})",
        request.shape,
        source.len(),
        request.trim,
        request.node_limit
    );

    let mut errors = Vec::new();
    if source.is_empty() {
        errors.push("profile is empty".to_string());
    }
    if request.node_limit == Some(0) {
        errors.push("node count limit must be greater than 0".to_string());
    }
    if request.shape == Shape::Tree {
        if let Err(graph_errors) = source.forest() {
            errors.extend(
                graph_errors
                    .into_iter()
                    .map(|e| format!("call tree required: {}", e)),
            );
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut ids: Vec<NodeId> = source.iter().map(|(id, _)| id).collect();
    if request.shape == Shape::Flat {
        rank(source, &mut ids, request.sort);
    }

    let mut dropped_nodes = 0;
    if let (true, Some(limit)) = (request.trim, request.node_limit) {
        if ids.len() > limit {
            dropped_nodes = ids.len() - limit;
            match request.shape {
                Shape::Flat => ids.truncate(limit),
                Shape::Tree => {
                    // keep the heaviest nodes but leave tree order alone
                    let mut ranked = ids.clone();
                    rank(source, &mut ranked, SortOrder::Cum);
                    let keep: HashSet<NodeId> = ranked.into_iter().take(limit).collect();
                    ids.retain(|id| keep.contains(id));
                }
            }
        }
    }

    let (graph, dropped_edges) = source.retain(&ids);
    let total = options.total.unwrap_or_else(|| source.total_flat());

    debug!(
        "Report ready: {} nodes, {} dropped nodes, {} dropped edges, total {}",
        graph.len(),
        dropped_nodes,
        dropped_edges,
        total
    );

    Ok(Report {
        graph,
        total,
        options: options.clone(),
        shape: request.shape,
        dropped_nodes,
        dropped_edges,
    })
}

/// Order ids by the requested value, heaviest first, then by name
fn rank(graph: &Graph, ids: &mut [NodeId], sort: SortOrder) {
    ids.sort_by_cached_key(|&id| {
        let n = graph.node(id);
        let (primary, secondary) = match sort {
            SortOrder::Flat => (n.flat_value().unsigned_abs(), n.cum_value().unsigned_abs()),
            SortOrder::Cum => (n.cum_value().unsigned_abs(), n.flat_value().unsigned_abs()),
        };
        (Reverse(primary), Reverse(secondary), n.info.printable_name())
    });
}
