//! CLI command implementations

use anyhow::Context;
use clap::ValueEnum;
use kustgraph_core::{Graph, to_dot, to_json};
use kustgraph_engine::{BuildOptions, build_graph};
use kustgraph_loader::OsStorage;
use std::io::Write;
use std::path::PathBuf;

/// Output renderers selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Dot,
    Json,
}

/// Build the graph rooted at `root` from the local filesystem and print it.
pub fn graph(root: PathBuf, format: Format, options: &BuildOptions) -> anyhow::Result<()> {
    let graph = build_graph(&OsStorage, &root, options)
        .with_context(|| format!("could not produce graph from directory {}", root.display()))?;

    let missing: usize = graph.nodes().map(|n| n.missing.len()).sum();
    tracing::info!(
        "Resolved {} overlays, {} base references, {} undeclared resources",
        graph.node_count(),
        graph.edge_count(),
        missing
    );
    if graph.is_cyclic() {
        tracing::warn!("Base references contain a cycle");
    }

    let rendered = render(&graph, format)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn render(graph: &Graph, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Dot => Ok(to_dot(graph)),
        Format::Json => {
            let mut json = to_json(graph).context("could not serialize graph")?;
            json.push('\n');
            Ok(json)
        }
    }
}
