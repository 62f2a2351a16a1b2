//! Graph wrapper using petgraph::StableDiGraph keyed by canonical path

use crate::error::GraphError;
use crate::model::*;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// The overlay graph: a named directed multigraph. Nodes are unique per
/// [`NodeId`]; parallel edges are kept.
pub struct Graph {
    name: String,
    directed: bool,
    inner: StableDiGraph<GraphNode, GraphEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("name", &self.name)
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    /// Create an empty directed graph with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Graph {
            name: name.into(),
            directed: true,
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a node. Fails if a node with the same id is already present.
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let id = node.id.clone();
        let idx = self.inner.add_node(node);
        self.index.insert(id, idx);
        Ok(())
    }

    /// Add an edge between two existing nodes.
    pub fn add_edge(&mut self, source: &NodeId, target: &NodeId) -> Result<(), GraphError> {
        let src = self.index_of(source)?;
        let dst = self.index_of(target)?;
        self.inner.add_edge(
            src,
            dst,
            GraphEdge {
                source: source.clone(),
                target: target.clone(),
            },
        );
        Ok(())
    }

    fn index_of(&self, id: &NodeId) -> Result<NodeIndex, GraphError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode(id.clone()))
    }

    /// Check whether a node with this id exists.
    pub fn is_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Get a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index
            .get(id)
            .and_then(|&idx| self.inner.node_weight(idx))
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Targets of the outgoing edges of `source`, in insertion order.
    pub fn edges_from<'a>(&'a self, source: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges()
            .filter(move |e| &e.source == source)
            .map(|e| &e.target)
    }

    /// Number of edges running from `source` to `target`.
    pub fn edge_multiplicity(&self, source: &NodeId, target: &NodeId) -> usize {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&src), Some(&dst)) => self
                .inner
                .edges_directed(src, Direction::Outgoing)
                .filter(|edge_ref| edge_ref.target() == dst)
                .count(),
            _ => 0,
        }
    }

    /// Check if at least one edge runs from `source` to `target`.
    pub fn has_edge(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edge_multiplicity(source, target) > 0
    }

    /// Nodes without incoming edges, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = &NodeId> {
        self.inner
            .node_indices()
            .filter(move |&idx| {
                self.inner
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .filter_map(move |idx| self.inner.node_weight(idx))
            .map(|n| &n.id)
    }

    /// Whether the base references loop back on themselves anywhere.
    pub fn is_cyclic(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.inner)
    }
}
