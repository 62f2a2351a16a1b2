//! Depth-first construction of the overlay graph from a root directory

pub mod builder;
pub mod error;


pub use builder::{
    BuildOptions, DEFAULT_GRAPH_NAME, DEFAULT_MAX_DEPTH, DEFAULT_MAX_VISITS, GraphBuilder,
    build_graph,
};
pub use error::{BuildError, ErrorKind};
