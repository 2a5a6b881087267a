//! Adjacency-list directed graph over string-labeled nodes.
//!
//! # Examples
//!
//! ```
//! use seqgraph::DiGraph;
//!
//! let mut graph = DiGraph::new();
//! graph.add_edges(["a -> b,c", "b -> d"]).unwrap();
//!
//! assert!(graph.contains_node("d"));
//! assert_eq!(graph.successors("a").unwrap(), vec!["b", "c"]);
//! assert_eq!(graph.adjacents("b").unwrap(), vec!["a", "d"]);
//! ```

use rustc_hash::FxHashMap;

use crate::{
    error::Error,
    label::IntoLabel,
    matrix::AdjacencyMatrix,
    parse::{parse_edge_list, EdgeList},
};

/// Directed graph with string-labeled nodes.
///
/// Nodes live in an insertion-ordered arena and successor lists keep their
/// insertion order as well, which makes traversals deterministic. Edge
/// insertion creates missing endpoints automatically, so every successor of
/// a node is guaranteed to be a node of the graph. Duplicate edges are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiGraph {
    nodes: Vec<Node>,
    index: FxHashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    label: String,
    succ: Vec<usize>,
}

impl DiGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from structured `(origin, destination)` pairs.
    pub fn from_edges<U, V, I>(edges: I) -> Self
    where
        U: IntoLabel,
        V: IntoLabel,
        I: IntoIterator<Item = (U, V)>,
    {
        let mut graph = Self::new();
        for (from, to) in edges {
            graph.add_edge(from, to);
        }
        graph
    }

    /// Creates a graph from an adjacency mapping.
    ///
    /// Destinations that never appear as an origin are added as nodes too,
    /// keeping the successor invariant intact.
    pub fn from_adjacency<O, D, I>(adjacency: I) -> Self
    where
        O: IntoLabel,
        D: IntoLabel,
        I: IntoIterator<Item = (O, Vec<D>)>,
    {
        let mut graph = Self::new();
        for (origin, destinations) in adjacency {
            let from = graph.intern(origin.into_label());
            for dest in destinations {
                let to = graph.intern(dest.into_label());
                graph.connect(from, to);
            }
        }
        graph
    }

    /// Number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Node labels in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.label.as_str())
    }

    /// All `(origin, destination)` edges, grouped by origin in insertion
    /// order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().flat_map(move |node| {
            node.succ
                .iter()
                .map(move |&succ| (node.label.as_str(), self.nodes[succ].label.as_str()))
        })
    }

    /// Adds a node. Idempotent: adding an existing label is a no-op.
    pub fn add_node(&mut self, label: impl IntoLabel) {
        self.intern(label.into_label());
    }

    /// Adds the edge `from -> to`, creating missing endpoints. A duplicate
    /// edge is a no-op.
    pub fn add_edge(&mut self, from: impl IntoLabel, to: impl IntoLabel) {
        let from = self.intern(from.into_label());
        let to = self.intern(to.into_label());
        self.connect(from, to);
    }

    /// Adds edges given in the `"ORIGIN -> DEST1,DEST2,..."` format.
    ///
    /// A single specification is passed as a one-element iterator:
    /// `graph.add_edges(["a -> b,c"])`. See [`crate::parse`] for the
    /// grammar.
    pub fn add_edges<S>(&mut self, specs: impl IntoIterator<Item = S>) -> Result<(), Error>
    where
        S: AsRef<str>,
    {
        for spec in specs {
            let EdgeList {
                origin,
                destinations,
            } = parse_edge_list(spec.as_ref())?;

            let from = self.intern(origin);
            for dest in destinations {
                let to = self.intern(dest);
                self.connect(from, to);
            }
        }
        Ok(())
    }

    /// Removes a node and strips it from every successor list. The
    /// insertion order of the remaining nodes is preserved.
    pub fn remove_node(&mut self, label: &str) -> Result<(), Error> {
        let id = self.existing(label)?;

        self.nodes.remove(id);
        self.index.remove(label);

        for node in &mut self.nodes {
            node.succ.retain(|&succ| succ != id);
            for succ in &mut node.succ {
                if *succ > id {
                    *succ -= 1;
                }
            }
        }

        // Positions after the removed one shifted down by one.
        for pos in id..self.nodes.len() {
            let label = self.nodes[pos].label.clone();
            self.index.insert(label, pos);
        }

        Ok(())
    }

    /// Removes the edge `from -> to`.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<(), Error> {
        let from_id = self.existing(from)?;
        let to_id = self.existing(to)?;

        let succ = &mut self.nodes[from_id].succ;
        match succ.iter().position(|&s| s == to_id) {
            Some(pos) => {
                succ.remove(pos);
                Ok(())
            }
            None => Err(Error::EdgeNotFound {
                from: from.to_owned(),
                to: to.to_owned(),
            }),
        }
    }

    /// Removes edges given in the same format as
    /// [`add_edges`](DiGraph::add_edges).
    pub fn remove_edges<S>(&mut self, specs: impl IntoIterator<Item = S>) -> Result<(), Error>
    where
        S: AsRef<str>,
    {
        for spec in specs {
            let EdgeList {
                origin,
                destinations,
            } = parse_edge_list(spec.as_ref())?;

            for dest in destinations {
                self.remove_edge(&origin, &dest)?;
            }
        }
        Ok(())
    }

    /// Successors of a node in insertion order.
    pub fn successors(&self, label: &str) -> Result<Vec<&str>, Error> {
        let id = self.existing(label)?;
        Ok(self.nodes[id]
            .succ
            .iter()
            .map(|&succ| self.nodes[succ].label.as_str())
            .collect())
    }

    /// Nodes that have an edge towards the given node, in insertion order.
    pub fn predecessors(&self, label: &str) -> Result<Vec<&str>, Error> {
        let id = self.existing(label)?;
        Ok(self
            .nodes
            .iter()
            .filter(|node| node.succ.contains(&id))
            .map(|node| node.label.as_str())
            .collect())
    }

    /// Union of predecessors and successors, de-duplicated and sorted.
    pub fn adjacents(&self, label: &str) -> Result<Vec<&str>, Error> {
        let mut adjacents = self.predecessors(label)?;
        adjacents.extend(self.successors(label)?);
        adjacents.sort_unstable();
        adjacents.dedup();
        Ok(adjacents)
    }

    /// Builds the adjacency matrix of the graph.
    ///
    /// Entry `(i, j)` is set iff node `j` is a predecessor or a successor
    /// of node `i`, which makes the matrix symmetric even though the graph
    /// is directed.
    pub fn adjacency_matrix(&self) -> AdjacencyMatrix {
        let labels = self.nodes.iter().map(|node| node.label.clone()).collect();
        let mut matrix = AdjacencyMatrix::new(labels);

        for (from, node) in self.nodes.iter().enumerate() {
            for &to in &node.succ {
                matrix.set(from, to);
                matrix.set(to, from);
            }
        }

        matrix
    }

    pub(crate) fn node_index(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub(crate) fn existing(&self, label: &str) -> Result<usize, Error> {
        self.node_index(label)
            .ok_or_else(|| Error::NodeNotFound(label.to_owned()))
    }

    pub(crate) fn succ_indices(&self, id: usize) -> &[usize] {
        &self.nodes[id].succ
    }

    pub(crate) fn label_of(&self, id: usize) -> &str {
        &self.nodes[id].label
    }

    fn intern(&mut self, label: String) -> usize {
        if let Some(&id) = self.index.get(&label) {
            return id;
        }

        let id = self.nodes.len();
        self.index.insert(label.clone(), id);
        self.nodes.push(Node {
            label,
            succ: Vec::new(),
        });
        id
    }

    fn connect(&mut self, from: usize, to: usize) {
        let succ = &mut self.nodes[from].succ;
        if !succ.contains(&to) {
            succ.push(to);
        }
    }
}
