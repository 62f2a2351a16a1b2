//! Build errors, wrapped with the directory they came from at every level

use std::path::PathBuf;

use kustgraph_core::{GraphError, NodeId};
use kustgraph_loader::LoaderError;
use thiserror::Error;

/// Coarse classification of the innermost failure of a [`BuildError`] chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ManifestNotFound,
    ManifestAmbiguous,
    ManifestParseError,
    DirectoryReadError,
    GraphMutationError,
    CycleDetected,
    DepthExceeded,
    VisitBudgetExceeded,
    ResolveError,
}

/// Why a graph could not be built. Failures inside a base are wrapped in
/// [`BuildError::Base`] once per level, so the chain runs from the root
/// directory down to the directory that actually failed.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("could not resolve root directory '{root}'")]
    Root {
        root: PathBuf,
        #[source]
        source: LoaderError,
    },

    #[error("could not get kustomization file for '{dir}'")]
    Load {
        dir: PathBuf,
        #[source]
        source: LoaderError,
    },

    #[error("could not get missing resources for '{dir}'")]
    Audit {
        dir: PathBuf,
        #[source]
        source: LoaderError,
    },

    #[error("could not resolve base '{base}' of '{dir}'")]
    Resolve {
        dir: PathBuf,
        base: String,
        #[source]
        source: LoaderError,
    },

    #[error("could not create node {node}")]
    Node {
        node: NodeId,
        #[source]
        source: GraphError,
    },

    #[error("could not create edge from {parent} to {child}")]
    Edge {
        parent: NodeId,
        child: NodeId,
        #[source]
        source: GraphError,
    },

    #[error("error while traversing base '{base}' of '{dir}'")]
    Base {
        dir: PathBuf,
        base: String,
        #[source]
        source: Box<BuildError>,
    },

    #[error("base references form a cycle: {}", format_chain(.chain))]
    CycleDetected { chain: Vec<NodeId> },

    #[error("base references nest deeper than {max_depth} levels at '{dir}'")]
    DepthExceeded { dir: PathBuf, max_depth: usize },

    #[error("visited more than {max_visits} directories, stopped at '{dir}'")]
    VisitBudgetExceeded { dir: PathBuf, max_visits: usize },
}

impl BuildError {
    /// The deepest error in the chain of nested base failures.
    pub fn innermost(&self) -> &BuildError {
        match self {
            BuildError::Base { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Classify the innermost failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuildError::Base { source, .. } => source.kind(),
            BuildError::Root { source, .. }
            | BuildError::Load { source, .. }
            | BuildError::Audit { source, .. }
            | BuildError::Resolve { source, .. } => loader_kind(source),
            BuildError::Node { .. } | BuildError::Edge { .. } => ErrorKind::GraphMutationError,
            BuildError::CycleDetected { .. } => ErrorKind::CycleDetected,
            BuildError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
            BuildError::VisitBudgetExceeded { .. } => ErrorKind::VisitBudgetExceeded,
        }
    }
}

fn loader_kind(error: &LoaderError) -> ErrorKind {
    match error {
        LoaderError::ManifestNotFound { .. } => ErrorKind::ManifestNotFound,
        LoaderError::ManifestAmbiguous { .. } => ErrorKind::ManifestAmbiguous,
        LoaderError::ManifestParse { .. } => ErrorKind::ManifestParseError,
        LoaderError::DirectoryRead { .. } | LoaderError::FileRead { .. } => {
            ErrorKind::DirectoryReadError
        }
        LoaderError::Resolve { .. } => ErrorKind::ResolveError,
    }
}

fn format_chain(chain: &[NodeId]) -> String {
    chain
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
