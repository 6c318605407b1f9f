//! Core graph data structure.
//!
//! `SocialGraph` wraps an undirected petgraph graph and adds an index from
//! dataset node ids to graph indexes. Every ingest path creates nodes through
//! [`SocialGraph::ensure_node`], so a dataset id maps to exactly one node no
//! matter which file mentions it first.

use crate::circles::CircleIndex;
use crate::node::PersonNode;
use crate::registry::FeatureNameRegistry;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The attributed social graph.
///
/// Owns every node, every edge, the feature name registry and the circle
/// index. Consumers that only read the graph use the accessors below; the
/// mutating methods are used by the ingest layer.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    /// The underlying petgraph graph.
    pub(crate) graph: UnGraph<PersonNode, ()>,

    /// Maps dataset ids to graph node indexes.
    id_index: HashMap<u64, NodeIndex>,

    /// Feature index to description.
    pub(crate) registry: FeatureNameRegistry,

    /// Circle name to member ids.
    pub(crate) circles: CircleIndex,
}

impl SocialGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `id`, creating a bare one if it doesn't exist.
    pub fn ensure_node(&mut self, id: u64) -> NodeIndex {
        if let Some(&index) = self.id_index.get(&id) {
            return index;
        }

        let index = self.graph.add_node(PersonNode::new(id));
        self.id_index.insert(id, index);
        index
    }

    /// Adds the undirected edge `a`-`b`, creating missing endpoints.
    ///
    /// Returns `false` if the edge was already present (in either
    /// direction). Self-loops are kept.
    pub fn add_edge(&mut self, a: u64, b: u64) -> bool {
        let from = self.ensure_node(a);
        let to = self.ensure_node(b);

        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    /// Gets a node by its dataset id.
    pub fn node(&self, id: u64) -> Option<&PersonNode> {
        let index = self.id_index.get(&id)?;
        self.graph.node_weight(*index)
    }

    pub(crate) fn node_mut(&mut self, id: u64) -> Option<&mut PersonNode> {
        let index = self.id_index.get(&id)?;
        self.graph.node_weight_mut(*index)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: u64) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Whether the undirected edge `a`-`b` exists.
    pub fn has_edge(&self, a: u64, b: u64) -> bool {
        match (self.id_index.get(&a), self.id_index.get(&b)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Ids of the nodes adjacent to `id`, sorted.
    pub fn neighbors(&self, id: u64) -> Vec<u64> {
        let Some(&index) = self.id_index.get(&id) else {
            return Vec::new();
        };

        let mut ids: Vec<u64> = self
            .graph
            .neighbors(index)
            .filter_map(|n| self.graph.node_weight(n))
            .map(|node| node.id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Number of distinct neighbours of `id`, or `None` for unknown ids.
    pub fn degree(&self, id: u64) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        Some(self.neighbors(id).len())
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &PersonNode> {
        self.graph.node_weights()
    }

    /// Iterates over all edges as dataset id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()].id, self.graph[edge.target()].id))
    }

    /// The feature name registry.
    pub fn registry(&self) -> &FeatureNameRegistry {
        &self.registry
    }

    /// The circle name to members index.
    pub fn circles(&self) -> &CircleIndex {
        &self.circles
    }

    /// Read-only access to the underlying petgraph graph, for algorithms.
    pub fn inner(&self) -> &UnGraph<PersonNode, ()> {
        &self.graph
    }
}

/// Graph statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub circle_count: usize,
    pub feature_names: usize,
    /// Nodes that carry a feature map.
    pub featured_nodes: usize,
}

impl SocialGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            circle_count: self.circles.len(),
            feature_names: self.registry.len(),
            featured_nodes: self.nodes().filter(|n| n.features.is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_node_is_idempotent() {
        let mut graph = SocialGraph::new();
        let a = graph.ensure_node(7);
        let b = graph.ensure_node(7);

        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains(7));
        assert!(graph.node(7).unwrap().features.is_none());
    }

    #[test]
    fn test_duplicate_edges_are_ignored() {
        let mut graph = SocialGraph::new();

        assert!(graph.add_edge(1, 2));
        assert!(!graph.add_edge(1, 2));
        assert!(!graph.add_edge(2, 1));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(2, 1));
    }

    #[test]
    fn test_self_loops_are_kept() {
        let mut graph = SocialGraph::new();

        assert!(graph.add_edge(3, 3));
        assert!(!graph.add_edge(3, 3));

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn test_neighbors_and_degree() {
        let mut graph = SocialGraph::new();
        graph.add_edge(1, 2);
        graph.add_edge(3, 1);
        graph.ensure_node(9);

        assert_eq!(graph.neighbors(1), vec![2, 3]);
        assert_eq!(graph.degree(1), Some(2));
        assert_eq!(graph.degree(9), Some(0));
        assert_eq!(graph.degree(42), None);
        assert!(graph.neighbors(42).is_empty());
    }
}
