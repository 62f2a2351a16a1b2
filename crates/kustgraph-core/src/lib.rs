//! kustgraph core: overlay graph data model, graph container, and renderers

pub mod error;
pub mod graph;
pub mod model;
pub mod render;

#[cfg(test)]
pub mod tests;

pub use error::GraphError;
pub use graph::Graph;
pub use model::{GraphEdge, GraphNode, NodeId, LABEL_ATTR, missing_label};
pub use render::{GraphSnapshot, to_dot, to_json};
