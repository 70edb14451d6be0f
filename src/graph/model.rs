//! Call graph data model.
//!
//! Nodes live in an arena and are addressed by `NodeId`. Each node keeps
//! its inbound and outbound edges in insertion order, so iterating a
//! graph twice always yields the same sequence.

use crate::utils::error::GraphError;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Stable identity of a node inside one `Graph`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0 + 1)
    }
}

/// Source location attributes of a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub orig_name: String,
    pub address: u64,
    pub file: String,
    pub start_line: i64,
    pub lineno: i64,
    pub objfile: String,
}

impl NodeInfo {
    /// Info for a bare function name with no location
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The parts that make up the printable name
    pub fn name_components(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if self.address != 0 {
            parts.push(format!("{:016x}", self.address));
        }
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }

        if self.lineno != 0 {
            parts.push(format!("{}:{}", self.file, self.lineno));
        } else if !self.file.is_empty() {
            parts.push(self.file.clone());
        } else if !self.name.is_empty() {
            // the function name alone is enough
        } else if !self.objfile.is_empty() {
            let base = Path::new(&self.objfile)
                .file_name()
                .map(|b| b.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.objfile.clone());
            parts.push(format!("[{}]", base));
        } else {
            parts.push("<unknown>".to_string());
        }
        parts
    }

    /// Full display name of the node
    pub fn printable_name(&self) -> String {
        self.name_components().join(" ")
    }
}

/// A weighted caller -> callee relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub src: NodeId,
    pub dest: NodeId,
    pub weight: i64,
    pub weight_div: i64,
    /// Connects nodes that were joined through a node removed from the graph
    pub residual: bool,
    /// The callee was inlined into the caller
    pub inline: bool,
}

impl Edge {
    /// Weight normalized by the divisor, when one is set
    pub fn weight_value(&self) -> i64 {
        if self.weight_div == 0 {
            self.weight
        } else {
            self.weight / self.weight_div
        }
    }
}

/// Edges of one node keyed by the node on the other end.
///
/// Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
}

impl EdgeMap {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, peer: NodeId) -> Option<&Edge> {
        self.index.get(&peer).map(|&i| &self.edges[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Insert an edge, adding its weight to an existing edge to the same peer
    fn upsert(&mut self, peer: NodeId, edge: Edge) {
        match self.index.get(&peer) {
            Some(&i) => {
                let existing = &mut self.edges[i];
                existing.weight = existing.weight.saturating_add(edge.weight);
                existing.residual = existing.residual && edge.residual;
                existing.inline = existing.inline && edge.inline;
            }
            None => {
                self.index.insert(peer, self.edges.len());
                self.edges.push(edge);
            }
        }
    }
}

impl<'a> IntoIterator for &'a EdgeMap {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// One program location in a profiling report
#[derive(Debug, Clone)]
pub struct Node {
    pub info: NodeInfo,

    // Flat is exclusive to this node, Cum includes all descendants.
    pub flat: i64,
    pub flat_div: i64,
    pub cum: i64,
    pub cum_div: i64,

    /// Edges from callers, keyed by caller
    pub inbound: EdgeMap,
    /// Edges to callees, keyed by callee
    pub outbound: EdgeMap,
}

impl Node {
    fn new(info: NodeInfo, flat: i64, cum: i64) -> Self {
        Self {
            info,
            flat,
            flat_div: 0,
            cum,
            cum_div: 0,
            inbound: EdgeMap::default(),
            outbound: EdgeMap::default(),
        }
    }

    /// Inclusive value, averaged when a divisor is set
    pub fn cum_value(&self) -> i64 {
        if self.cum_div == 0 {
            self.cum
        } else {
            self.cum / self.cum_div
        }
    }

    /// Exclusive value, averaged when a divisor is set
    pub fn flat_value(&self) -> i64 {
        if self.flat_div == 0 {
            self.flat
        } else {
            self.flat / self.flat_div
        }
    }

    /// A node nobody calls within the report
    pub fn is_root(&self) -> bool {
        self.inbound.is_empty()
    }
}

/// Summary of a performance profile suitable for visualization
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outbound.len()).sum()
    }

    /// Sum of exclusive values over every node
    pub fn total_flat(&self) -> i64 {
        self.nodes
            .iter()
            .map(Node::flat_value)
            .fold(0i64, i64::saturating_add)
    }

    /// Copy of the graph holding only `keep`, in that order.
    ///
    /// Edges touching a dropped node are removed. Returns the new graph
    /// and the number of edges that were dropped.
    pub fn retain(&self, keep: &[NodeId]) -> (Graph, usize) {
        let mut remap: HashMap<NodeId, NodeId> = HashMap::with_capacity(keep.len());
        let mut builder = GraphBuilder::with_capacity(keep.len());

        for &old in keep {
            if remap.contains_key(&old) {
                continue;
            }
            let n = self.node(old);
            let new = builder.add_node(n.info.clone(), n.flat, n.cum);
            builder.set_divisors(new, n.flat_div, n.cum_div);
            remap.insert(old, new);
        }

        let mut dropped = 0;
        for (old_src, n) in self.iter() {
            let Some(&src) = remap.get(&old_src) else {
                dropped += n.outbound.len();
                continue;
            };
            for e in &n.outbound {
                match remap.get(&e.dest) {
                    Some(&dest) => builder.push_edge(Edge { src, dest, ..*e }),
                    None => dropped += 1,
                }
            }
        }

        (builder.build(), dropped)
    }
}

/// Incremental constructor for `Graph`
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
        }
    }

    pub fn add_node(&mut self, info: NodeInfo, flat: i64, cum: i64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(info, flat, cum));
        id
    }

    pub fn set_divisors(&mut self, id: NodeId, flat_div: i64, cum_div: i64) {
        if let Some(n) = self.nodes.get_mut(id.0) {
            n.flat_div = flat_div;
            n.cum_div = cum_div;
        }
    }

    /// Connect `src` to `dest`; repeated edges accumulate weight
    pub fn add_edge(
        &mut self,
        src: NodeId,
        dest: NodeId,
        weight: i64,
        residual: bool,
        inline: bool,
    ) -> Result<(), GraphError> {
        for id in [src, dest] {
            if id.0 >= self.nodes.len() {
                return Err(GraphError::UnknownNode(id.0));
            }
        }
        self.push_edge(Edge {
            src,
            dest,
            weight,
            weight_div: 0,
            residual,
            inline,
        });
        Ok(())
    }

    fn push_edge(&mut self, edge: Edge) {
        self.nodes[edge.src.0].outbound.upsert(edge.dest, edge);
        self.nodes[edge.dest.0].inbound.upsert(edge.src, edge);
    }

    pub fn build(self) -> Graph {
        Graph { nodes: self.nodes }
    }
}
