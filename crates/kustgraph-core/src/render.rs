//! Textual renderings of a finished graph

use crate::graph::Graph;
use crate::model::{GraphEdge, GraphNode};
use serde::Serialize;
use std::fmt::Write;

/// Serializable view of a graph, used for JSON output.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot<'a> {
    pub name: &'a str,
    pub directed: bool,
    pub nodes: Vec<&'a GraphNode>,
    pub edges: Vec<&'a GraphEdge>,
}

impl<'a> GraphSnapshot<'a> {
    pub fn of(graph: &'a Graph) -> Self {
        GraphSnapshot {
            name: graph.name(),
            directed: graph.is_directed(),
            nodes: graph.nodes().collect(),
            edges: graph.edges().collect(),
        }
    }
}

/// Render the graph in DOT notation: nodes first, then edges, both in
/// insertion order.
pub fn to_dot(graph: &Graph) -> String {
    let (keyword, arrow) = if graph.is_directed() {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {} {{", keyword, dot_id(graph.name()));
    for node in graph.nodes() {
        if node.attributes.is_empty() {
            let _ = writeln!(out, "    {};", node.id.quoted());
        } else {
            let attrs = node
                .attributes
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape(v)))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "    {} [{}];", node.id.quoted(), attrs);
        }
    }
    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "    {} {} {};",
            edge.source.quoted(),
            arrow,
            edge.target.quoted()
        );
    }
    out.push_str("}\n");
    out
}

/// Render the graph as pretty-printed JSON.
pub fn to_json(graph: &Graph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&GraphSnapshot::of(graph))
}

/// Escape a value for use inside a quoted DOT string.
pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Graph names that are plain identifiers are written bare, anything else quoted.
fn dot_id(name: &str) -> String {
    let mut chars = name.chars();
    let plain = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", escape(name))
    }
}
