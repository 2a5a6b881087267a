//! Graph toolkit for sequence overlap analysis.
//!
//! Three layers, each usable on its own:
//!
//! - [`DiGraph`] — adjacency-list directed graph over string-labeled
//!   nodes, with traversal, distance and cycle queries.
//! - [`WeightedGraph`] — non-negative integer edge weights on top of
//!   [`DiGraph`], with single-source shortest-path search.
//! - [`AssemblyGraph`] — overlap graph built from sequence fragments,
//!   reconstructing the original sequence via Hamiltonian-path search.
//!
//! All graphs are plain owned values: no interior sharing, no locking, no
//! suspension points. Node identity is the string label; numeric labels
//! are accepted through [`IntoLabel`] and coerce to their decimal form.
//!
//! # Examples
//!
//! ```
//! use seqgraph::DiGraph;
//!
//! let mut graph = DiGraph::new();
//! graph.add_edges(["1 -> 2,3", "2 -> 4", "3 -> 4"]).unwrap();
//!
//! assert_eq!(graph.successors("1").unwrap(), vec!["2", "3"]);
//! assert_eq!(graph.dist("1", "4").unwrap(), Some(2));
//! assert!(!graph.has_cycle("1").unwrap());
//! ```

pub mod assembly;
pub mod error;
pub mod graph;
pub mod label;
pub mod matrix;
pub mod parse;
pub mod weighted;

mod traverse;

pub use crate::{
    assembly::AssemblyGraph,
    error::Error,
    graph::DiGraph,
    label::IntoLabel,
    matrix::AdjacencyMatrix,
    weighted::{ShortestPaths, WeightedGraph},
};
