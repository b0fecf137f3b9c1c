use thiserror::Error;

/// Errors raised by graph construction and separation queries.
///
/// Vertices are carried in their `Debug` rendering so the error type does not
/// depend on the graph's vertex parameter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(String),

    #[error("no edge from {from} to {to}")]
    NoSuchEdge { from: String, to: String },

    #[error("cannot build a path tree over an empty graph")]
    EmptyGraph,

    #[error("center of the universe {0} is not in the graph")]
    UnknownCenter(String),

    #[error("requested {requested} vertices but the graph only has {available}")]
    InsufficientVertices { requested: usize, available: usize },

    #[error("average separation is undefined for a tree holding only {0}")]
    SingleVertexTree(String),
}

impl GraphError {
    pub(crate) fn unknown_vertex<V: std::fmt::Debug>(v: &V) -> Self {
        GraphError::UnknownVertex(format!("{v:?}"))
    }

    pub(crate) fn no_such_edge<V: std::fmt::Debug>(from: &V, to: &V) -> Self {
        GraphError::NoSuchEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
