//! Overlap graphs and sequence reconstruction from fragments.
//!
//! An overlap graph connects fragment `A` to fragment `B` when the suffix
//! of `A` (all but the first character) equals the prefix of `B` (all but
//! the last character). For fragments of uniform length `k` this is a
//! `k - 1` overlap, and a Hamiltonian path through the graph spells out a
//! reconstruction of the original sequence, one character per hop.
//!
//! Hamiltonian-path search is NP-hard; [`AssemblyGraph`] performs a plain
//! backtracking search that is exponential in the node count in the worst
//! case and runs without a time budget.
//!
//! # Examples
//!
//! ```
//! use seqgraph::assembly::{k_merify, AssemblyGraph};
//!
//! let fragments = k_merify("CAATCATGATGATGATC", 3).unwrap();
//! let graph = AssemblyGraph::from_fragments(&fragments);
//!
//! let reconstructed: Vec<String> = graph
//!     .hamiltonian_paths()
//!     .iter()
//!     .filter_map(|path| graph.hamiltonian_reconstruction(path))
//!     .collect();
//!
//! assert!(reconstructed.contains(&"CAATCATGATGATGATC".to_string()));
//! ```

use fixedbitset::FixedBitSet;
use rustc_hash::FxHashSet;

use crate::{error::Error, graph::DiGraph};

/// All k-mers of `seq`, sorted lexicographically.
///
/// Fails with [`Error::InvalidKmerLength`] unless `0 < k < seq.len()`.
pub fn k_merify(seq: &str, k: usize) -> Result<Vec<String>, Error> {
    // Char boundaries of `seq` plus the end position.
    let bounds: Vec<usize> = seq
        .char_indices()
        .map(|(pos, _)| pos)
        .chain([seq.len()])
        .collect();
    let len = bounds.len() - 1;

    if k == 0 || k >= len {
        return Err(Error::InvalidKmerLength { k, len });
    }

    let mut kmers: Vec<String> = (0..=len - k)
        .map(|i| seq[bounds[i]..bounds[i + k]].to_owned())
        .collect();
    kmers.sort_unstable();
    Ok(kmers)
}

/// All characters of `seq` except the first.
pub fn suffix(seq: &str) -> &str {
    seq.char_indices()
        .nth(1)
        .map(|(pos, _)| &seq[pos..])
        .unwrap_or("")
}

/// All characters of `seq` except the last.
pub fn prefix(seq: &str) -> &str {
    seq.char_indices()
        .last()
        .map(|(pos, _)| &seq[..pos])
        .unwrap_or("")
}

/// Tags each fragment with its 1-based position: `"{fragment}-{index}"`.
///
/// The tag distinguishes duplicate fragment values, so they become
/// distinct graph nodes.
pub fn tag_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<String> {
    fragments
        .iter()
        .enumerate()
        .map(|(i, frag)| format!("{}-{}", frag.as_ref(), i + 1))
        .collect()
}

/// The sequence value of a tagged node label, i.e. everything before the
/// last `-`.
pub fn sequence_value(label: &str) -> &str {
    label.rsplit_once('-').map(|(seq, _)| seq).unwrap_or(label)
}

/// Overlap graph over a list of sequence fragments.
///
/// Nodes are tagged fragments (see [`tag_fragments`]); an edge `A-i ->
/// B-j` exists iff `suffix(A) == prefix(B)`. The graph is built once by
/// [`from_fragments`](AssemblyGraph::from_fragments) and not mutated
/// afterwards. Fragments that overlap nothing (not even themselves) do
/// not appear as nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyGraph {
    graph: DiGraph,
}

impl AssemblyGraph {
    /// Builds the overlap graph for the given fragments.
    ///
    /// Every ordered pair of fragments is compared, including a fragment
    /// against itself, which creates self-loops for fragments whose suffix
    /// equals their own prefix. Runs in `O(n²·k)` for `n` fragments of
    /// length `k`.
    pub fn from_fragments<S: AsRef<str>>(fragments: &[S]) -> Self {
        let mut graph = DiGraph::new();

        for (i, a) in fragments.iter().enumerate() {
            let a = a.as_ref();
            let suf = suffix(a);

            for (j, b) in fragments.iter().enumerate() {
                let b = b.as_ref();
                if prefix(b) == suf {
                    graph.add_edge(format!("{a}-{}", i + 1), format!("{b}-{}", j + 1));
                }
            }
        }

        Self { graph }
    }

    /// The underlying overlap graph, for running plain graph queries.
    pub fn graph(&self) -> &DiGraph {
        &self.graph
    }

    /// Whether every label in `path` is a node of the graph. The empty
    /// path is not valid.
    pub fn valid_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        !path.is_empty()
            && path
                .iter()
                .all(|node| self.graph.contains_node(node.as_ref()))
    }

    /// Whether `path` is a Hamiltonian path: valid, as long as the node
    /// count and visiting every node exactly once.
    pub fn is_hamiltonian<S: AsRef<str>>(&self, path: &[S]) -> bool {
        if !self.valid_path(path) || path.len() != self.graph.node_count() {
            return false;
        }

        let mut remaining: FxHashSet<&str> = self.graph.nodes().collect();
        path.iter().all(|node| remaining.remove(node.as_ref()))
    }

    /// Spells the sequence reconstructed by walking `path`: the full
    /// sequence value of the first fragment, extended by the last
    /// character of each subsequent fragment's sequence value.
    ///
    /// Returns `None` unless `path` is Hamiltonian.
    pub fn hamiltonian_reconstruction<S: AsRef<str>>(&self, path: &[S]) -> Option<String> {
        if !self.is_hamiltonian(path) {
            return None;
        }

        let mut seq = sequence_value(path[0].as_ref()).to_owned();
        for node in &path[1..] {
            seq.extend(sequence_value(node.as_ref()).chars().last());
        }
        Some(seq)
    }

    /// Iterative backtracking search for a Hamiltonian path starting at
    /// `start`.
    ///
    /// Each node on the path keeps a cursor to its next untried successor;
    /// successors are tried in insertion order. When a node's successors
    /// are exhausted it is popped from the path and the search resumes at
    /// its predecessor with that predecessor's cursor unchanged, so
    /// already-tried branches are never retried. The search terminates
    /// with a path when it covers every node, or with `None` when
    /// backtracking reaches the start node with nothing left to try.
    ///
    /// This is a true exponential backtracking search, without pruning or
    /// memoization.
    pub fn scan_hamiltonian_from_node(&self, start: &str) -> Result<Option<Vec<String>>, Error> {
        let graph = &self.graph;
        let start_id = graph.existing(start)?;
        let node_count = graph.node_count();

        let mut cursor = vec![0usize; node_count];
        let mut on_path = FixedBitSet::with_capacity(node_count);
        let mut path = vec![start_id];
        let mut current = start_id;
        on_path.insert(start_id);

        while path.len() < node_count {
            let succ = graph.succ_indices(current);
            let next_index = cursor[current];

            if next_index < succ.len() {
                cursor[current] += 1;
                let next = succ[next_index];

                if !on_path.contains(next) {
                    path.push(next);
                    cursor[next] = 0;
                    on_path.insert(next);
                    current = next;
                }
            } else if path.len() > 1 {
                path.pop();
                on_path.set(current, false);
                current = path[path.len() - 1];
            } else {
                return Ok(None);
            }
        }

        Ok(Some(
            path.into_iter()
                .map(|id| graph.label_of(id).to_owned())
                .collect(),
        ))
    }

    /// Attempts [`scan_hamiltonian_from_node`] from every node in
    /// insertion order and collects all paths found.
    ///
    /// Returns an empty vector when no Hamiltonian path exists from any
    /// start node.
    ///
    /// [`scan_hamiltonian_from_node`]: AssemblyGraph::scan_hamiltonian_from_node
    pub fn hamiltonian_paths(&self) -> Vec<Vec<String>> {
        self.graph
            .nodes()
            .filter_map(|node| self.scan_hamiltonian_from_node(node).ok().flatten())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const FRAGMENTS: [&str; 15] = [
        "ATA", "ACC", "ATG", "ATT", "CAT", "CAT", "CAT", "CCA", "GCA", "GGC", "TAA", "TCA", "TGG",
        "TTC", "TTT",
    ];

    fn hamiltonian_fixture() -> Vec<&'static str> {
        "ACC-2 CCA-8 CAT-5 ATG-3 TGG-13 GGC-10 GCA-9 CAT-6 ATT-4 TTT-15 TTC-14 TCA-12 CAT-7 ATA-1 TAA-11"
            .split(' ')
            .collect()
    }

    #[test]
    fn k_merify_sorted() {
        assert_eq!(k_merify("ACGT", 3).unwrap(), vec!["ACG", "CGT"]);
        assert_eq!(k_merify("GATTACA", 6).unwrap(), vec!["ATTACA", "GATTAC"]);
    }

    #[test]
    fn k_merify_invalid_length() {
        assert_matches!(
            k_merify("ACGT", 0),
            Err(Error::InvalidKmerLength { k: 0, len: 4 })
        );
        assert_matches!(k_merify("ACGT", 4), Err(Error::InvalidKmerLength { .. }));
        assert_matches!(k_merify("ACGT", 5), Err(Error::InvalidKmerLength { .. }));
    }

    #[test]
    fn suffix_prefix() {
        assert_eq!(suffix("CAT"), "AT");
        assert_eq!(prefix("CAT"), "CA");
        assert_eq!(suffix("A"), "");
        assert_eq!(prefix("A"), "");
        assert_eq!(suffix(""), "");
        assert_eq!(prefix(""), "");
    }

    #[test]
    fn tagging() {
        assert_eq!(
            tag_fragments(&["ATA", "ACC", "ATA"]),
            vec!["ATA-1", "ACC-2", "ATA-3"]
        );
        assert_eq!(sequence_value("ATA-1"), "ATA");
        assert_eq!(sequence_value("untagged"), "untagged");
    }

    #[test]
    fn overlap_edges() {
        let graph = AssemblyGraph::from_fragments(&["ATA", "TAT"]);

        assert_eq!(
            graph.graph().edges().collect::<Vec<_>>(),
            vec![("ATA-1", "TAT-2"), ("TAT-2", "ATA-1")]
        );
    }

    #[test]
    fn fragments_without_overlap_are_absent() {
        // CAT overlaps nothing here, not even itself.
        let graph = AssemblyGraph::from_fragments(&["CAT"]);
        assert!(graph.graph().is_empty());
    }

    #[test]
    fn self_overlap_creates_loop() {
        let graph = AssemblyGraph::from_fragments(&["AAA"]);
        assert_eq!(graph.graph().successors("AAA-1").unwrap(), vec!["AAA-1"]);
    }

    #[test]
    fn valid_path_checks_membership() {
        let graph = AssemblyGraph::from_fragments(&FRAGMENTS);

        assert!(graph.valid_path(&["ACC-2", "CCA-8", "CAT-5", "ATG-3"]));
        assert!(graph.valid_path(&hamiltonian_fixture()));
        assert!(!graph.valid_path(&["ACC-2", "XXX-9"]));
        assert!(!graph.valid_path::<&str>(&[]));
    }

    #[test]
    fn is_hamiltonian_rejects_partial_path() {
        let graph = AssemblyGraph::from_fragments(&FRAGMENTS);

        assert_eq!(graph.graph().node_count(), 15);
        assert!(!graph.is_hamiltonian(&["ACC-2", "CCA-8", "CAT-5", "ATG-3"]));
        assert!(graph.is_hamiltonian(&hamiltonian_fixture()));
    }

    #[test]
    fn is_hamiltonian_rejects_repeats() {
        let graph = AssemblyGraph::from_fragments(&FRAGMENTS);

        let mut path = hamiltonian_fixture();
        path[1] = path[0];
        assert!(!graph.is_hamiltonian(&path));
    }

    #[test]
    fn reconstruction_of_known_path() {
        let graph = AssemblyGraph::from_fragments(&FRAGMENTS);

        assert_eq!(
            graph.hamiltonian_reconstruction(&hamiltonian_fixture()),
            Some("ACCATGGCATTTCATAA".to_owned())
        );
        assert_eq!(
            graph.hamiltonian_reconstruction(&["ACC-2", "CCA-8", "CAT-5", "ATG-3"]),
            None
        );
    }

    #[test]
    fn scan_finds_round_trip() {
        let seq = "CAATCATGATGATGATC";
        let fragments = k_merify(seq, 3).unwrap();
        let graph = AssemblyGraph::from_fragments(&fragments);

        let paths = graph.hamiltonian_paths();
        assert!(!paths.is_empty());

        let reconstructed: Vec<String> = paths
            .iter()
            .filter_map(|path| graph.hamiltonian_reconstruction(path))
            .collect();
        assert_eq!(reconstructed.len(), paths.len());
        assert!(reconstructed.contains(&seq.to_owned()));
    }

    #[test]
    fn scan_two_node_cycle() {
        let graph = AssemblyGraph::from_fragments(&["ATA", "TAT"]);

        let path = graph.scan_hamiltonian_from_node("ATA-1").unwrap();
        assert_eq!(path, Some(vec!["ATA-1".to_owned(), "TAT-2".to_owned()]));

        let paths = graph.hamiltonian_paths();
        assert_eq!(paths.len(), 2);
        assert_eq!(
            graph.hamiltonian_reconstruction(&paths[0]),
            Some("ATAT".to_owned())
        );
        assert_eq!(
            graph.hamiltonian_reconstruction(&paths[1]),
            Some("TATA".to_owned())
        );
    }

    #[test]
    fn scan_unknown_start() {
        let graph = AssemblyGraph::from_fragments(&["ATA", "TAT"]);
        assert_matches!(
            graph.scan_hamiltonian_from_node("GGG-1"),
            Err(Error::NodeNotFound(_))
        );
    }

    #[test]
    fn no_hamiltonian_path_yields_empty() {
        // Two disconnected self-loops; no path can cover both nodes.
        let graph = AssemblyGraph::from_fragments(&["AAA", "CCC"]);

        assert_eq!(graph.graph().node_count(), 2);
        assert!(graph.hamiltonian_paths().is_empty());
        assert_eq!(graph.scan_hamiltonian_from_node("AAA-1").unwrap(), None);
    }
}
