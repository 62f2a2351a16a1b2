//! kustomize-graph CLI entry point

use clap::Parser;
use kustgraph_engine::{BuildOptions, DEFAULT_GRAPH_NAME, DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Format;

#[derive(Parser)]
#[command(name = "kustomize-graph")]
#[command(about = "Graph how a tree of kustomize overlays builds on its bases", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Overlay directory to start from (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Dot)]
    format: Format,

    /// Name of the emitted graph
    #[arg(long, default_value = DEFAULT_GRAPH_NAME)]
    graph_name: String,

    /// Maximum depth of nested base references
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum number of directory visits, counting revisits of shared bases
    #[arg(long, default_value_t = DEFAULT_MAX_VISITS)]
    max_visits: usize,

    /// Fail instead of cutting cycles in base references
    #[arg(long)]
    fail_on_cycle: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the graph
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "kustomize_graph={0},kustgraph_engine={0},kustgraph_loader={0}",
            log_level
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("kustomize-graph v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Root directory: {}", cli.root.display());

    let options = BuildOptions {
        graph_name: cli.graph_name,
        max_depth: cli.max_depth,
        max_visits: cli.max_visits,
        fail_on_cycle: cli.fail_on_cycle,
    };
    commands::graph(cli.root, cli.format, &options)
}
