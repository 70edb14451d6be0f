//! Flame graph tree construction.
//!
//! A call tree report may have several roots. The builder hangs all of
//! them under one synthetic `root` node, so the client always receives a
//! single tree. Every graph node maps to exactly one tree node.

use crate::graph::{shorten_function_name, Forest, Graph, NodeId};
use crate::measurement::ValueFormatter;
use crate::utils::config::ROOT_NODE_NAME;
use log::debug;
use serde::{Deserialize, Serialize};

/// One frame of the flame graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Shortened display name
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "FullName")]
    pub full_name: String,

    /// Cumulative value in the profile's sample unit
    #[serde(rename = "Cum")]
    pub cumulative: i64,

    #[serde(rename = "CumFormat")]
    pub cumulative_formatted: String,

    /// Share of the report total, never padded
    #[serde(rename = "Percent")]
    pub percent_formatted: String,

    #[serde(rename = "Children", default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: String, full_name: String, cumulative: i64, total: i64, f: &ValueFormatter) -> Self {
        Self {
            name,
            full_name,
            cumulative,
            cumulative_formatted: f.format_value(cumulative),
            percent_formatted: f.percentage(cumulative, total).trim().to_string(),
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Build the flame graph tree of a call tree report.
///
/// Roots and children keep the graph's own order; no sorting is applied.
/// `total` is the base for every percentage.
pub fn build_flame_tree(forest: Forest<'_>, total: i64, formatter: &ValueFormatter) -> TreeNode {
    let graph = forest.graph();

    // One tree node per graph node, indexed by NodeId.
    let mut slots: Vec<Option<TreeNode>> = Vec::with_capacity(graph.len());
    for (_, n) in graph.iter() {
        let cum = n.cum_value();
        let full_name = n.info.printable_name();
        slots.push(Some(TreeNode::new(
            shorten_function_name(&full_name),
            full_name,
            cum,
            total,
            formatter,
        )));
    }

    let roots: Vec<NodeId> = forest.roots().collect();
    let root_value = roots
        .iter()
        .map(|&id| graph.node(id).cum_value())
        .fold(0i64, i64::saturating_add);

    // Children are complete before their parent claims them.
    for id in post_order(graph, &roots) {
        let children: Vec<TreeNode> = graph
            .node(id)
            .outbound
            .iter()
            .filter_map(|e| slots[e.dest.index()].take())
            .collect();
        if let Some(node) = slots[id.index()].as_mut() {
            node.children = children;
        }
    }

    let mut root = TreeNode::new(
        ROOT_NODE_NAME.to_string(),
        ROOT_NODE_NAME.to_string(),
        root_value,
        total,
        formatter,
    );
    root.children = roots
        .iter()
        .filter_map(|id| slots[id.index()].take())
        .collect();

    debug!(
        "Built flame tree: {} nodes under {} roots, root value {}",
        graph.len(),
        root.children.len(),
        root_value
    );
    root
}

fn post_order(graph: &Graph, roots: &[NodeId]) -> Vec<NodeId> {
    let mut order = Vec::with_capacity(graph.len());
    let mut stack: Vec<(NodeId, bool)> = roots.iter().map(|&id| (id, false)).collect();

    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        stack.push((id, true));
        stack.extend(graph.node(id).outbound.iter().map(|e| (e.dest, false)));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, NodeInfo};
    use pretty_assertions::assert_eq;

    fn build(graph: &Graph, total: i64) -> TreeNode {
        build_flame_tree(graph.forest().unwrap(), total, &ValueFormatter::default())
    }

    #[test]
    fn test_single_root_tree() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeInfo::named("A"), 0, 10);
        let bb = b.add_node(NodeInfo::named("B"), 6, 6);
        let c = b.add_node(NodeInfo::named("C"), 4, 4);
        b.add_edge(a, bb, 6, false, false).unwrap();
        b.add_edge(a, c, 4, false, false).unwrap();
        let g = b.build();

        let root = build(&g, 10);
        assert_eq!(root.name, "root");
        assert_eq!(root.full_name, "root");
        assert_eq!(root.cumulative, 10);
        assert_eq!(root.percent_formatted, "100%");
        assert_eq!(root.children.len(), 1);

        let a = &root.children[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.percent_formatted, "100%");
        let kids: Vec<(&str, i64, &str)> = a
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.cumulative, c.percent_formatted.as_str()))
            .collect();
        assert_eq!(kids, vec![("B", 6, "60%"), ("C", 4, "40%")]);
        assert!(a.children.iter().all(TreeNode::is_leaf));
    }

    #[test]
    fn test_empty_graph() {
        let root = build(&Graph::default(), 0);
        assert_eq!(root.cumulative, 0);
        assert!(root.children.is_empty());
        assert_eq!(root.percent_formatted, "0%");
        assert_eq!(root.node_count(), 1);
    }

    #[test]
    fn test_disjoint_roots() {
        let mut b = GraphBuilder::new();
        b.add_node(NodeInfo::named("A"), 5, 5);
        b.add_node(NodeInfo::named("D"), 7, 7);
        let root = build(&b.build(), 12);

        assert_eq!(root.cumulative, 12);
        let mut names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn test_root_value_saturates() {
        let mut b = GraphBuilder::new();
        b.add_node(NodeInfo::named("A"), i64::MAX, i64::MAX);
        b.add_node(NodeInfo::named("D"), i64::MAX, i64::MAX);
        let root = build(&b.build(), i64::MAX);

        assert_eq!(root.cumulative, i64::MAX);
        assert_eq!(root.children.len(), 2);
    }

    #[test]
    fn test_names_are_shortened() {
        let mut b = GraphBuilder::new();
        b.add_node(
            NodeInfo {
                name: "github.com/acme/svc/handler.Serve".to_string(),
                file: "handler.go".to_string(),
                lineno: 12,
                ..Default::default()
            },
            1,
            1,
        );
        let root = build(&b.build(), 1);
        let node = &root.children[0];
        assert_eq!(node.full_name, "github.com/acme/svc/handler.Serve handler.go:12");
        assert_eq!(node.name, "handler.Serve handler.go:12");
    }

    #[test]
    fn test_deep_chain() {
        let mut b = GraphBuilder::new();
        let mut prev = b.add_node(NodeInfo::named("f0"), 0, 1);
        for i in 1..2_000 {
            let next = b.add_node(NodeInfo::named(format!("f{}", i)), 0, 1);
            b.add_edge(prev, next, 1, false, false).unwrap();
            prev = next;
        }
        let g = b.build();
        let root = build_flame_tree(g.forest().unwrap(), 1, &ValueFormatter::default());
        assert_eq!(root.node_count(), 2_001);
    }

    #[test]
    fn test_json_shape() {
        let mut b = GraphBuilder::new();
        b.add_node(NodeInfo::named("A"), 3, 3);
        let root = build(&b.build(), 3);
        let json = serde_json::to_value(&root).unwrap();

        assert_eq!(json["Name"], "root");
        assert_eq!(json["Cum"], 3);
        assert_eq!(json["CumFormat"], "3");
        assert_eq!(json["Percent"], "100%");
        assert_eq!(json["Children"][0]["FullName"], "A");
        assert_eq!(json["Children"][0]["Children"], serde_json::json!([]));
    }
}
