//! Relation graph assembly.
//!
//! Relations are undirected, but the exported graph is directed because the
//! interchange formats expect it. Every edge points from the lexicographically
//! smaller name to the larger one. The direction carries no meaning.

mod graphml;

pub use graphml::*;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use play_model::SceneKey;
use std::collections::HashMap;

use crate::relations::{RelationCounts, RelationPair};
use crate::timeline::TemporalSnapshot;

/// Weighted character graph built from relation counts.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    /// Nodes are canonical names, edge weights are relation counts.
    graph: DiGraph<String, u32>,

    /// Name -> node index mapping.
    name_to_node: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph with one edge per relation pair.
    pub fn from_counts(counts: &RelationCounts<RelationPair>) -> Self {
        let mut graph = Self::new();
        for (pair, count) in counts.iter() {
            let from = graph.node(&pair.first);
            let to = graph.node(&pair.second);
            graph.graph.add_edge(from, to, count);
        }
        graph
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.name_to_node.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.name_to_node.insert(name.to_string(), index);
        index
    }

    /// Weight of the relation between two names, in either direction.
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        let a = *self.name_to_node.get(a)?;
        let b = *self.name_to_node.get(b)?;
        self.graph
            .find_edge(a, b)
            .or_else(|| self.graph.find_edge(b, a))
            .map(|edge| self.graph[edge])
    }

    /// Whether a character appears in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|index| self.graph[index].as_str())
    }

    /// `(source, target, weight)` for every edge.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                *edge.weight(),
            )
        })
    }

    /// Sum of edge weights touching a character.
    pub fn strength(&self, name: &str) -> u32 {
        let Some(&index) = self.name_to_node.get(name) else {
            return 0;
        };
        self.graph
            .edges_directed(index, petgraph::Direction::Outgoing)
            .chain(self.graph.edges_directed(index, petgraph::Direction::Incoming))
            .map(|edge| *edge.weight())
            .sum()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The underlying petgraph graph.
    pub fn inner(&self) -> &DiGraph<String, u32> {
        &self.graph
    }
}

/// One graph per snapshot entry, in scene order.
pub fn timeline_graphs(timeline: &TemporalSnapshot) -> Vec<(SceneKey, RelationGraph)> {
    timeline
        .iter()
        .map(|(scene, counts)| (scene, RelationGraph::from_counts(counts)))
        .collect()
}
