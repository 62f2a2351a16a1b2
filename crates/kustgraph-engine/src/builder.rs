//! Depth-first traversal of base references
//!
//! Each visit loads the directory's manifest, inserts a node for it the
//! first time its canonical path is seen, links it to the directory that
//! referenced it, then walks its `bases` in declaration order. The graph is
//! owned by one [`GraphBuilder`] and handed back when the walk completes;
//! any failure aborts the walk and no partial graph is returned.

use std::path::Path;

use kustgraph_core::{Graph, GraphNode, NodeId};
use kustgraph_loader::{Storage, absolutize, find_missing, load_manifest, resolve_base, to_slash};
use tracing::{debug, warn};

use crate::error::BuildError;

/// Name given to graphs when none is configured.
pub const DEFAULT_GRAPH_NAME: &str = "main";

/// Base-reference nesting allowed before the build gives up.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Directory visits allowed in one build. Revisits count, since a shared
/// base is walked again for every parent that reaches it.
pub const DEFAULT_MAX_VISITS: usize = 10_000;

/// Knobs for a single build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub graph_name: String,
    /// Maximum number of base hops from the root.
    pub max_depth: usize,
    /// Maximum number of directory visits, revisits included.
    pub max_visits: usize,
    /// Fail with [`BuildError::CycleDetected`] instead of cutting the cycle.
    pub fail_on_cycle: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_visits: DEFAULT_MAX_VISITS,
            fail_on_cycle: false,
        }
    }
}

/// Build the overlay graph rooted at `root`.
pub fn build_graph<S: Storage + ?Sized>(
    storage: &S,
    root: &Path,
    options: &BuildOptions,
) -> Result<Graph, BuildError> {
    GraphBuilder::new(storage, options).build(root)
}

/// Owns the graph and the active recursion stack for one build.
pub struct GraphBuilder<'a, S: ?Sized> {
    storage: &'a S,
    options: &'a BuildOptions,
    graph: Graph,
    /// Canonical paths of the directories currently being expanded.
    stack: Vec<NodeId>,
    visits: usize,
}

impl<'a, S: Storage + ?Sized> GraphBuilder<'a, S> {
    pub fn new(storage: &'a S, options: &'a BuildOptions) -> Self {
        Self {
            storage,
            options,
            graph: Graph::new(options.graph_name.clone()),
            stack: Vec::new(),
            visits: 0,
        }
    }

    /// Walk from `root` and return the finished graph.
    pub fn build(mut self, root: &Path) -> Result<Graph, BuildError> {
        let root = absolutize(root).map_err(|source| BuildError::Root {
            root: root.to_path_buf(),
            source,
        })?;
        debug!("Building graph from {}", root.display());

        self.visit(&root, None, 0)?;
        Ok(self.graph)
    }

    /// `dir` is always absolute and normalized, so its slash form is the
    /// node id.
    fn visit(
        &mut self,
        dir: &Path,
        parent: Option<&NodeId>,
        depth: usize,
    ) -> Result<NodeId, BuildError> {
        self.visits += 1;
        if self.visits > self.options.max_visits {
            return Err(BuildError::VisitBudgetExceeded {
                dir: dir.to_path_buf(),
                max_visits: self.options.max_visits,
            });
        }
        if depth > self.options.max_depth {
            return Err(BuildError::DepthExceeded {
                dir: dir.to_path_buf(),
                max_depth: self.options.max_depth,
            });
        }

        let manifest = load_manifest(self.storage, dir).map_err(|source| BuildError::Load {
            dir: dir.to_path_buf(),
            source,
        })?;
        let id = NodeId::new(to_slash(dir));

        if !self.graph.is_node(&id) {
            let missing = find_missing(self.storage, dir, &manifest).map_err(|source| {
                BuildError::Audit {
                    dir: dir.to_path_buf(),
                    source,
                }
            })?;
            self.graph
                .add_node(GraphNode::with_missing(id.clone(), missing))
                .map_err(|source| BuildError::Node {
                    node: id.clone(),
                    source,
                })?;
            debug!("Added node {}", id);
        }

        if let Some(parent) = parent {
            if parent == &id {
                warn!("{} lists itself as a base, ignoring", id);
                return Ok(id);
            }
            self.graph
                .add_edge(parent, &id)
                .map_err(|source| BuildError::Edge {
                    parent: parent.clone(),
                    child: id.clone(),
                    source,
                })?;
            debug!("Added edge {} -> {}", parent, id);
        }

        if let Some(start) = self.stack.iter().position(|open| open == &id) {
            let mut chain = self.stack[start..].to_vec();
            chain.push(id.clone());
            if self.options.fail_on_cycle {
                return Err(BuildError::CycleDetected { chain });
            }
            warn!(
                "Cycle through {} detected, not descending again ({} directories in loop)",
                id,
                chain.len() - 1
            );
            return Ok(id);
        }

        self.stack.push(id.clone());
        for base in &manifest.bases {
            let base_dir = resolve_base(dir, base).map_err(|source| BuildError::Resolve {
                dir: dir.to_path_buf(),
                base: base.clone(),
                source,
            })?;
            self.visit(&base_dir, Some(&id), depth + 1)
                .map_err(|source| BuildError::Base {
                    dir: dir.to_path_buf(),
                    base: base.clone(),
                    source: Box::new(source),
                })?;
        }
        self.stack.pop();

        Ok(id)
    }
}
