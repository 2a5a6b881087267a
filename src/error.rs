use thiserror::Error;

/// The error type for all fallible graph operations.
///
/// Errors are raised synchronously at the call that detects them; there is
/// no retry or recovery logic anywhere in the crate. A failed Hamiltonian
/// search is a normal outcome and is reported as `None`/empty, not as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A queried node is absent from the graph.
    #[error("node `{0}` does not exist")]
    NodeNotFound(String),

    /// A queried edge is absent from the graph.
    #[error("edge `{from} -> {to}` does not exist")]
    EdgeNotFound { from: String, to: String },

    /// An edge list specification does not contain exactly one `->`.
    #[error("malformed edge list `{0}`: expected exactly one `->`")]
    MalformedEdgeList(String),

    /// A negative weight was supplied for an edge.
    #[error("negative weight {weight} for edge `{from} -> {to}`")]
    NegativeWeight {
        from: String,
        to: String,
        weight: i64,
    },

    /// The requested k-mer length is outside `1..sequence length`.
    #[error("k-mer length {k} out of range for sequence of length {len}")]
    InvalidKmerLength { k: usize, len: usize },
}
