//! Weighted directed graph and single-source shortest paths.
//!
//! [`WeightedGraph::shortest_paths`] reproduces a FIFO-queue relaxation
//! that visits every node exactly once. It is *not* Dijkstra's algorithm:
//! when a cheaper path to a node is discovered after the node has already
//! been dequeued, its successors are not relaxed again, so the reported
//! distances are not guaranteed to be minimal on arbitrary weighted
//! graphs. Callers that need true shortest distances should use
//! [`WeightedGraph::dijkstra`] instead.
//!
//! # Examples
//!
//! ```
//! use seqgraph::WeightedGraph;
//!
//! let mut graph = WeightedGraph::new();
//! graph.add_weight("a", "b", 2).unwrap();
//! graph.add_weight("b", "c", 3).unwrap();
//!
//! let paths = graph.shortest_paths("a").unwrap();
//! assert_eq!(paths.dist("c"), Some(5));
//! assert_eq!(paths.dist("unconnected"), None);
//! ```

use std::{
    cmp::Reverse,
    collections::{hash_map::Entry, BinaryHeap, VecDeque},
    ops::Index,
};

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashMap;

use crate::{error::Error, graph::DiGraph, label::IntoLabel};

/// Directed graph with non-negative integer edge weights.
///
/// Composes a [`DiGraph`] with a weight map keyed by edge. Edges created
/// without an explicit weight default to 0; the weight map is completed by
/// [`rebuild_defaults`](WeightedGraph::rebuild_defaults), which runs
/// automatically before every shortest-path computation.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: DiGraph,
    weights: FxHashMap<(String, String), u64>,
}

impl WeightedGraph {
    /// Creates an empty weighted graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing graph, assigning the default weight 0 to all of
    /// its edges.
    pub fn from_graph(graph: DiGraph) -> Self {
        let mut weighted = Self {
            graph,
            weights: FxHashMap::default(),
        };
        weighted.rebuild_defaults();
        weighted
    }

    /// The underlying directed graph.
    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    pub fn add_node(&mut self, label: impl IntoLabel) {
        self.graph.add_node(label);
    }

    /// Adds an unweighted edge; it gets weight 0 on the next
    /// [`rebuild_defaults`](WeightedGraph::rebuild_defaults).
    pub fn add_edge(&mut self, from: impl IntoLabel, to: impl IntoLabel) {
        self.graph.add_edge(from, to);
    }

    pub fn add_edges<S>(&mut self, specs: impl IntoIterator<Item = S>) -> Result<(), Error>
    where
        S: AsRef<str>,
    {
        self.graph.add_edges(specs)
    }

    pub fn successors(&self, label: &str) -> Result<Vec<&str>, Error> {
        self.graph.successors(label)
    }

    /// Sets the weight of the edge `from -> to`, creating the edge and any
    /// missing endpoint. A previous weight is overwritten.
    ///
    /// Negative weights are rejected with [`Error::NegativeWeight`]; zero
    /// is accepted.
    pub fn add_weight(
        &mut self,
        from: impl IntoLabel,
        to: impl IntoLabel,
        weight: i64,
    ) -> Result<(), Error> {
        let from = from.into_label();
        let to = to.into_label();

        if weight < 0 {
            return Err(Error::NegativeWeight { from, to, weight });
        }

        self.graph.add_edge(from.clone(), to.clone());
        self.weights.insert((from, to), weight as u64);
        Ok(())
    }

    /// Weight of the edge `from -> to`, if it has an entry.
    pub fn weight(&self, from: &str, to: &str) -> Option<u64> {
        self.weights.get(&(from.to_owned(), to.to_owned())).copied()
    }

    /// Assigns the default weight 0 to every edge that does not have an
    /// explicit weight entry yet. Existing entries are left untouched.
    pub fn rebuild_defaults(&mut self) {
        let edges: Vec<(String, String)> = self
            .graph
            .edges()
            .map(|(from, to)| (from.to_owned(), to.to_owned()))
            .collect();

        for edge in edges {
            self.weights.entry(edge).or_insert(0);
        }
    }

    /// Single-source distances computed by a FIFO-queue relaxation.
    ///
    /// Nodes are dequeued in FIFO order and processed at most once; each
    /// outgoing edge to a not-yet-visited successor is relaxed at that
    /// moment. The distances are exact on graphs where no cheaper path to
    /// a node is found after the node was dequeued (e.g. hop-layered
    /// weights), but in general they are upper bounds. See the
    /// [module](self) documentation.
    pub fn shortest_paths(&mut self, start: &str) -> Result<ShortestPaths, Error> {
        self.rebuild_defaults();

        let graph = &self.graph;
        let start_id = graph.existing(start)?;

        let mut dist: FxHashMap<usize, u64> = FxHashMap::default();
        dist.insert(start_id, 0);

        let mut visited = FixedBitSet::with_capacity(graph.node_count());
        let mut queue = VecDeque::new();
        queue.push_back(start_id);

        while let Some(current) = queue.pop_front() {
            if visited.contains(current) {
                continue;
            }
            visited.insert(current);

            let current_dist = dist[&current];
            for &next in graph.succ_indices(current) {
                if visited.contains(next) {
                    continue;
                }
                queue.push_back(next);

                let next_dist = current_dist + self.edge_weight(current, next);
                match dist.entry(next) {
                    Entry::Occupied(mut entry) => {
                        if next_dist < *entry.get() {
                            *entry.get_mut() = next_dist;
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(next_dist);
                    }
                }
            }
        }

        Ok(self.collect_paths(start, dist))
    }

    /// Single-source shortest distances computed by Dijkstra's algorithm
    /// with a binary heap.
    ///
    /// Unlike [`shortest_paths`](WeightedGraph::shortest_paths), the
    /// returned distances are guaranteed to be minimal. Weights are
    /// non-negative by construction, so the algorithm always applies.
    pub fn dijkstra(&mut self, start: &str) -> Result<ShortestPaths, Error> {
        self.rebuild_defaults();

        let graph = &self.graph;
        let start_id = graph.existing(start)?;

        let mut dist: FxHashMap<usize, u64> = FxHashMap::default();
        let mut visited = FixedBitSet::with_capacity(graph.node_count());
        let mut queue = BinaryHeap::new();

        dist.insert(start_id, 0);
        queue.push(Reverse((0u64, start_id)));

        while let Some(Reverse((current_dist, current))) = queue.pop() {
            // Stale entry left behind by a later relaxation.
            if visited.contains(current) {
                continue;
            }
            visited.insert(current);

            for &next in graph.succ_indices(current) {
                if visited.contains(next) {
                    continue;
                }

                let next_dist = current_dist + self.edge_weight(current, next);
                match dist.entry(next) {
                    Entry::Occupied(mut entry) => {
                        if next_dist < *entry.get() {
                            *entry.get_mut() = next_dist;
                            queue.push(Reverse((next_dist, next)));
                        }
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(next_dist);
                        queue.push(Reverse((next_dist, next)));
                    }
                }
            }
        }

        Ok(self.collect_paths(start, dist))
    }

    fn edge_weight(&self, from: usize, to: usize) -> u64 {
        let key = (
            self.graph.label_of(from).to_owned(),
            self.graph.label_of(to).to_owned(),
        );
        // `rebuild_defaults` ran before any search, so missing entries can
        // only mean the default weight.
        self.weights.get(&key).copied().unwrap_or(0)
    }

    fn collect_paths(&self, source: &str, dist: FxHashMap<usize, u64>) -> ShortestPaths {
        let dist = dist
            .into_iter()
            .map(|(id, d)| (self.graph.label_of(id).to_owned(), d))
            .collect();

        ShortestPaths {
            source: source.to_owned(),
            dist,
        }
    }
}

/// Distances from a single source node.
///
/// Returned by [`WeightedGraph::shortest_paths`] and
/// [`WeightedGraph::dijkstra`]. Nodes that are not reachable from the
/// source have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    source: String,
    dist: FxHashMap<String, u64>,
}

impl ShortestPaths {
    /// Source node where the search started.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distance from the source to `node`, or `None` if it is unreachable.
    pub fn dist(&self, node: &str) -> Option<u64> {
        self.dist.get(node).copied()
    }

    /// Iterates over all `(node, distance)` entries, in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.dist.iter().map(|(node, &dist)| (node.as_str(), dist))
    }

    /// Number of nodes with a known distance.
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }
}

impl Index<&str> for ShortestPaths {
    type Output = u64;

    fn index(&self, node: &str) -> &u64 {
        &self.dist[node]
    }
}
