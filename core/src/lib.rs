//! costar-core: degrees of separation over a collaboration graph.
//!
//! A generic labeled graph plus the queries played on it: breadth-first
//! shortest-path trees rooted at a "center of the universe", path
//! reconstruction, vertices with infinite separation, degree filtering, and
//! ranking of vertices by average separation.
//!
//! Everything is single-threaded and synchronous. A graph is built once and
//! then only read; changing the center rebuilds the path tree wholesale.

mod collab;
mod config;
mod error;
mod graph;
mod queries;
mod separation;
mod traversal;
mod universe;

pub use collab::{build_collaboration_graph, CollaborationGraph};
pub use config::{ConfigError, UniverseSettings};
pub use error::{GraphError, Result};
pub use graph::{LabelId, LabeledGraph};
pub use queries::{
    best_centers, list_by_degree_range, list_by_separation_range, missing_vertices,
    rank_by_separation,
};
pub use separation::{
    average_separation, average_separation_with, separations, tree_height, SeparationStrategy,
    MAX_RECURSIVE_DEPTH,
};
pub use traversal::{build_path_tree, path_steps, path_to_root, PathStep, PathTree};
pub use universe::Universe;
