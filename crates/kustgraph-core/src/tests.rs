//! Unit tests for kustgraph-core

use crate::*;

fn id(path: &str) -> NodeId {
    NodeId::from(path)
}

#[test]
fn test_new_graph_is_directed_and_empty() {
    let graph = Graph::new("main");

    assert_eq!(graph.name(), "main");
    assert!(graph.is_directed());
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_duplicate_node_is_refused() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/app"))).unwrap();

    let err = graph.add_node(GraphNode::new(id("/app"))).unwrap_err();
    assert_eq!(err, GraphError::DuplicateNode(id("/app")));
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_edge_requires_both_nodes() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/app"))).unwrap();

    let err = graph.add_edge(&id("/app"), &id("/app/base")).unwrap_err();
    assert_eq!(err, GraphError::UnknownNode(id("/app/base")));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_parallel_edges_are_kept() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/a"))).unwrap();
    graph.add_node(GraphNode::new(id("/b"))).unwrap();

    graph.add_edge(&id("/a"), &id("/b")).unwrap();
    graph.add_edge(&id("/a"), &id("/b")).unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_multiplicity(&id("/a"), &id("/b")), 2);
    assert!(!graph.has_edge(&id("/b"), &id("/a")));
}

#[test]
fn test_edges_from_preserves_insertion_order() {
    let mut graph = Graph::new("main");
    for path in ["/app", "/app/same", "/app/middle", "/app/base"] {
        graph.add_node(GraphNode::new(id(path))).unwrap();
    }
    graph.add_edge(&id("/app"), &id("/app/same")).unwrap();
    graph.add_edge(&id("/app"), &id("/app/middle")).unwrap();
    graph.add_edge(&id("/app/middle"), &id("/app/base")).unwrap();

    let app = id("/app");
    let targets: Vec<&str> = graph.edges_from(&app).map(NodeId::as_str).collect();
    assert_eq!(targets, vec!["/app/same", "/app/middle"]);

    let roots: Vec<&str> = graph.roots().map(NodeId::as_str).collect();
    assert_eq!(roots, vec!["/app"]);
    assert!(!graph.is_cyclic());
}

#[test]
fn test_cycle_is_reported() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/a"))).unwrap();
    graph.add_node(GraphNode::new(id("/b"))).unwrap();
    graph.add_edge(&id("/a"), &id("/b")).unwrap();
    graph.add_edge(&id("/b"), &id("/a")).unwrap();

    assert!(graph.is_cyclic());
    assert_eq!(graph.roots().count(), 0);
}

#[test]
fn test_label_only_when_missing() {
    let clean = GraphNode::with_missing(id("/app"), Vec::new());
    assert!(clean.attributes.is_empty());
    assert_eq!(clean.label(), None);

    let dirty = GraphNode::with_missing(
        id("/app"),
        vec!["a.yaml".to_string(), "b.yaml".to_string()],
    );
    assert_eq!(dirty.label(), Some("/app\n\nmissing:\na.yaml\nb.yaml"));
    assert_eq!(dirty.missing, vec!["a.yaml", "b.yaml"]);
}

#[test]
fn test_node_id_quoting() {
    assert_eq!(id("/app/base").quoted(), "\"/app/base\"");
    assert_eq!(id("/we\"ird").quoted(), "\"/we\\\"ird\"");
    assert_eq!(id("/app").to_string(), "/app");
}

#[test]
fn test_dot_rendering() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/app"))).unwrap();
    graph
        .add_node(GraphNode::with_missing(
            id("/app/base"),
            vec!["extra.yaml".to_string()],
        ))
        .unwrap();
    graph.add_edge(&id("/app"), &id("/app/base")).unwrap();

    let dot = to_dot(&graph);
    insta::assert_snapshot!(dot.trim_end(), @r#"
    digraph main {
        "/app";
        "/app/base" [label="/app/base\n\nmissing:\nextra.yaml"];
        "/app" -> "/app/base";
    }
    "#);
}

#[test]
fn test_dot_quotes_unusual_graph_names() {
    let graph = Graph::new("my overlays");
    assert_eq!(to_dot(&graph), "digraph \"my overlays\" {\n}\n");
}

#[test]
fn test_json_rendering() {
    let mut graph = Graph::new("main");
    graph.add_node(GraphNode::new(id("/app"))).unwrap();
    graph
        .add_node(GraphNode::with_missing(id("/app/base"), vec!["x.yml".to_string()]))
        .unwrap();
    graph.add_edge(&id("/app"), &id("/app/base")).unwrap();

    let json = to_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["name"], "main");
    assert_eq!(value["directed"], true);
    assert_eq!(value["nodes"][0]["id"], "/app");
    assert_eq!(value["nodes"][1]["missing"][0], "x.yml");
    assert_eq!(value["edges"][0]["source"], "/app");
    assert_eq!(value["edges"][0]["target"], "/app/base");
}
