//! Labeled adjacency matrix.

use fixedbitset::FixedBitSet;

/// Symmetric 0/1 adjacency matrix labeled by node.
///
/// Returned by [`DiGraph::adjacency_matrix`](crate::DiGraph::adjacency_matrix).
/// Rows and columns follow the node insertion order of the graph; entry
/// `(i, j)` is set iff the nodes are connected by an edge in either
/// direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    bits: FixedBitSet,
}

impl AdjacencyMatrix {
    pub(crate) fn new(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self {
            labels,
            bits: FixedBitSet::with_capacity(n * n),
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize) {
        let n = self.labels.len();
        self.bits.insert(row * n + col);
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row and column labels, in graph insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Entry at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> bool {
        let n = self.labels.len();
        assert!(row < n && col < n, "matrix index out of bounds");
        self.bits.contains(row * n + col)
    }

    /// Entry addressed by labels, or `None` when either label is unknown.
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<bool> {
        let row = self.labels.iter().position(|label| label == row)?;
        let col = self.labels.iter().position(|label| label == col)?;
        Some(self.get(row, col))
    }
}
