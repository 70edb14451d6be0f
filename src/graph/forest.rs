//! Call tree validation.
//!
//! A graph produced in call tree mode is a forest: every node has at most
//! one caller and every node is reachable from a root. `Forest` is the
//! proof of that shape; code that needs a tree takes a `Forest` rather
//! than a plain `Graph`.

use super::model::{Graph, NodeId};
use crate::utils::error::GraphError;

/// A graph known to be forest-shaped
#[derive(Debug, Clone, Copy)]
pub struct Forest<'g> {
    graph: &'g Graph,
}

impl<'g> Forest<'g> {
    /// Wrap a graph already known to be a forest, e.g. a subset of one
    pub(crate) fn assume(graph: &'g Graph) -> Self {
        Forest { graph }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Nodes without callers, in graph order
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + 'g {
        self.graph
            .iter()
            .filter(|(_, n)| n.is_root())
            .map(|(id, _)| id)
    }
}

impl Graph {
    /// Check that the graph is a forest.
    ///
    /// Every violation is reported, not just the first.
    pub fn forest(&self) -> Result<Forest<'_>, Vec<GraphError>> {
        let mut errors = Vec::new();

        for (_, n) in self.iter() {
            if n.inbound.len() > 1 {
                errors.push(GraphError::MultipleCallers {
                    name: n.info.printable_name(),
                    count: n.inbound.len(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        // With single callers, anything not reachable from a root sits on a cycle.
        let mut reached = vec![false; self.len()];
        let mut stack: Vec<NodeId> = self
            .iter()
            .filter(|(_, n)| n.is_root())
            .map(|(id, _)| id)
            .collect();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut reached[id.index()], true) {
                continue;
            }
            stack.extend(self.node(id).outbound.iter().map(|e| e.dest));
        }

        errors.extend(
            self.iter()
                .filter(|(id, _)| !reached[id.index()])
                .map(|(_, n)| GraphError::Cycle(n.info.printable_name())),
        );

        if errors.is_empty() {
            Ok(Forest { graph: self })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::{GraphBuilder, NodeInfo};

    #[test]
    fn test_tree_is_forest() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeInfo::named("a"), 0, 3);
        let c = b.add_node(NodeInfo::named("c"), 3, 3);
        let d = b.add_node(NodeInfo::named("d"), 1, 1);
        b.add_edge(a, c, 3, false, false).unwrap();
        let g = b.build();

        let forest = g.forest().unwrap();
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![a, d]);
    }

    #[test]
    fn test_empty_graph_is_forest() {
        let g = Graph::default();
        assert_eq!(g.forest().unwrap().roots().count(), 0);
    }

    #[test]
    fn test_shared_callee_rejected() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeInfo::named("a"), 0, 2);
        let x = b.add_node(NodeInfo::named("x"), 0, 1);
        let z = b.add_node(NodeInfo::named("z"), 1, 1);
        b.add_edge(a, x, 1, false, false).unwrap();
        b.add_edge(a, z, 1, false, false).unwrap();
        b.add_edge(x, z, 1, false, false).unwrap();
        let g = b.build();

        let errors = g.forest().unwrap_err();
        assert_eq!(
            errors,
            vec![GraphError::MultipleCallers {
                name: "z".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let mut b = GraphBuilder::new();
        let r = b.add_node(NodeInfo::named("r"), 1, 1);
        let p = b.add_node(NodeInfo::named("p"), 1, 2);
        let q = b.add_node(NodeInfo::named("q"), 1, 2);
        b.add_edge(p, q, 1, false, false).unwrap();
        b.add_edge(q, p, 1, false, false).unwrap();
        let g = b.build();
        let _ = r;

        let errors = g.forest().unwrap_err();
        assert_eq!(
            errors,
            vec![
                GraphError::Cycle("p".to_string()),
                GraphError::Cycle("q".to_string())
            ]
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut b = GraphBuilder::new();
        let s = b.add_node(NodeInfo::named("s"), 1, 1);
        b.add_edge(s, s, 1, false, false).unwrap();
        let g = b.build();
        assert_eq!(g.forest().unwrap_err(), vec![GraphError::Cycle("s".to_string())]);
    }
}
