//! Core data structures for the overlay graph

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute key holding a node's display label.
pub const LABEL_ATTR: &str = "label";

/// Identity of a node: the canonical, slash-separated absolute path of an
/// overlay directory. Two references to the same directory always produce
/// byte-identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(canonical_path: impl Into<String>) -> Self {
        NodeId(canonical_path.into())
    }

    /// The canonical path this id stands for.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form, as written into DOT output.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", crate::render::escape(&self.0))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(path: &str) -> Self {
        NodeId::new(path)
    }
}

/// One overlay directory in the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    /// Resource files present in the directory but not declared by its manifest.
    pub missing: Vec<String>,
    /// Rendering attributes. Empty when nothing is missing.
    pub attributes: BTreeMap<String, String>,
}

impl GraphNode {
    /// A bare node with no attributes.
    pub fn new(id: NodeId) -> Self {
        GraphNode {
            id,
            missing: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// A node annotated with its missing resources. The `label` attribute is
    /// only set when `missing` is non-empty.
    pub fn with_missing(id: NodeId, missing: Vec<String>) -> Self {
        let mut attributes = BTreeMap::new();
        if let Some(label) = missing_label(id.as_str(), &missing) {
            attributes.insert(LABEL_ATTR.to_string(), label);
        }
        GraphNode {
            id,
            missing,
            attributes,
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.attributes.get(LABEL_ATTR).map(String::as_str)
    }
}

/// Build the label for a directory with undeclared resources:
/// the path, a blank line, `missing:`, then one file per line.
pub fn missing_label(path: &str, missing: &[String]) -> Option<String> {
    if missing.is_empty() {
        return None;
    }
    Some(format!("{}\n\nmissing:\n{}", path, missing.join("\n")))
}

/// A directed "parent declares child as a base" relationship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
}
