//! Traversal, distance and cycle queries over [`DiGraph`].
//!
//! The traversals here have deliberately narrow return contracts inherited
//! from the exercises this crate grew out of: [`DiGraph::traverse_bfs`] and
//! [`DiGraph::traverse_dfs`] report reachable sinks rather than the full
//! visitation order. Successors are always explored in insertion order, so
//! all results are deterministic for a given construction sequence.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::{error::Error, graph::DiGraph};

impl DiGraph {
    /// Breadth-first exploration from `start`.
    ///
    /// Returns, in discovery order, the sinks (nodes without successors)
    /// reached from `start` plus any already-visited node re-encountered
    /// through an edge that does not come from its queue parent. The latter
    /// stands in for cross and back edges, which is what makes
    /// [`has_cycle`](DiGraph::has_cycle) work: a node reachable from itself
    /// shows up in its own output.
    pub fn traverse_bfs(&self, start: &str) -> Result<Vec<&str>, Error> {
        let start_id = self.existing(start)?;

        let mut visited = FixedBitSet::with_capacity(self.node_count());
        let mut queue = VecDeque::new();
        let mut reachable: Vec<usize> = Vec::new();

        queue.push_back((start_id, None::<usize>));

        while let Some((current, parent)) = queue.pop_front() {
            visited.insert(current);

            let succ = self.succ_indices(current);
            if succ.is_empty() && !reachable.contains(&current) {
                reachable.push(current);
                continue;
            }

            for &next in succ {
                if !visited.contains(next) {
                    queue.push_back((next, Some(current)));
                } else if Some(next) != parent && !reachable.contains(&next) {
                    reachable.push(next);
                }
            }
        }

        Ok(reachable.into_iter().map(|id| self.label_of(id)).collect())
    }

    /// Depth-first walk from `start` returning the leaf nodes (zero
    /// out-degree) in discovery order. Already-visited nodes are skipped.
    pub fn traverse_dfs(&self, start: &str) -> Result<Vec<&str>, Error> {
        let start_id = self.existing(start)?;

        let mut visited = FixedBitSet::with_capacity(self.node_count());
        let mut stack = vec![start_id];
        let mut leaves = Vec::new();

        while let Some(current) = stack.pop() {
            if visited.contains(current) {
                continue;
            }
            visited.insert(current);

            let succ = self.succ_indices(current);
            if succ.is_empty() {
                leaves.push(current);
            } else {
                // Reversed so that the first successor is explored first.
                for &next in succ.iter().rev() {
                    if !visited.contains(next) {
                        stack.push(next);
                    }
                }
            }
        }

        Ok(leaves.into_iter().map(|id| self.label_of(id)).collect())
    }

    /// Hop count of the first path from `start` to `end` discovered by a
    /// depth-first search, or `None` when `end` is not reachable.
    ///
    /// The count follows the discovering branch, so it is not necessarily
    /// the minimum number of hops.
    pub fn dist(&self, start: &str, end: &str) -> Result<Option<usize>, Error> {
        let start_id = self.existing(start)?;
        let end_id = self.existing(end)?;

        let mut visited = FixedBitSet::with_capacity(self.node_count());
        visited.insert(start_id);

        // (node, next successor to try)
        let mut stack = vec![(start_id, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            let succ = self.succ_indices(current);

            if cursor < succ.len() {
                frame.1 += 1;
                let next = succ[cursor];

                if next == end_id {
                    return Ok(Some(stack.len()));
                }

                if !visited.contains(next) {
                    visited.insert(next);
                    stack.push((next, 0));
                }
            } else {
                stack.pop();
            }
        }

        Ok(None)
    }

    /// Sinks reachable from `start`, each paired with the hop distance
    /// along the branch that discovered it.
    pub fn reach_dist_dfs(&self, start: &str) -> Result<Vec<(&str, usize)>, Error> {
        let start_id = self.existing(start)?;

        let mut visited = FixedBitSet::with_capacity(self.node_count());
        visited.insert(start_id);

        if self.succ_indices(start_id).is_empty() {
            return Ok(vec![(self.label_of(start_id), 0)]);
        }

        let mut stack = vec![(start_id, 0usize)];
        let mut reachable: Vec<(usize, usize)> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            let (current, cursor) = *frame;
            let succ = self.succ_indices(current);

            if cursor < succ.len() {
                frame.1 += 1;
                let next = succ[cursor];

                if visited.contains(next) {
                    continue;
                }
                visited.insert(next);

                // Distance of `next` is the current path length.
                let distance = stack.len();
                if self.succ_indices(next).is_empty() {
                    reachable.push((next, distance));
                } else {
                    stack.push((next, 0));
                }
            } else {
                stack.pop();
            }
        }

        Ok(reachable
            .into_iter()
            .map(|(id, distance)| (self.label_of(id), distance))
            .collect())
    }

    /// Whether `start` lies on a cycle, i.e. is reachable from itself
    /// through [`traverse_bfs`](DiGraph::traverse_bfs).
    pub fn has_cycle(&self, start: &str) -> Result<bool, Error> {
        Ok(self.traverse_bfs(start)?.iter().any(|&node| node == start))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // 1 -> {2, 3, 4}, 2 -> {5, 6}, 3 -> {6, 8}, 4 -> 8, 5 -> 7, 8 -> 1;
    // 6 and 7 are sinks, 8 closes a cycle back to 1.
    fn create_cyclic_graph() -> DiGraph {
        let mut graph = DiGraph::new();
        for label in 1..=8 {
            graph.add_node(label);
        }
        graph
            .add_edges(["1 -> 2,3,4", "2 -> 5,6", "3 -> 6,8", "4 -> 8", "5 -> 7", "8 -> 1"])
            .unwrap();
        graph
    }

    #[test]
    fn bfs_reports_sinks_and_revisits() {
        let graph = create_cyclic_graph();

        // 6 is the first sink dequeued, then 1 is re-encountered through 8,
        // then the sink 7.
        assert_eq!(graph.traverse_bfs("1").unwrap(), vec!["6", "1", "7"]);
        assert_eq!(graph.traverse_bfs("2").unwrap(), vec!["6", "7"]);
    }

    #[test]
    fn bfs_missing_start() {
        let graph = create_cyclic_graph();
        assert_matches!(graph.traverse_bfs("9"), Err(Error::NodeNotFound(_)));
    }

    #[test]
    fn dfs_reports_leaves_in_discovery_order() {
        let graph = create_cyclic_graph();
        assert_eq!(graph.traverse_dfs("1").unwrap(), vec!["7", "6"]);
        assert_eq!(graph.traverse_dfs("6").unwrap(), vec!["6"]);
    }

    #[test]
    fn dist_follows_first_discovered_path() {
        let graph = create_cyclic_graph();

        assert_eq!(graph.dist("1", "2").unwrap(), Some(1));
        assert_eq!(graph.dist("1", "7").unwrap(), Some(3));
        assert_eq!(graph.dist("2", "1").unwrap(), None);
        assert_eq!(graph.dist("6", "7").unwrap(), None);

        assert_matches!(graph.dist("1", "9"), Err(Error::NodeNotFound(_)));
        assert_matches!(graph.dist("9", "1"), Err(Error::NodeNotFound(_)));
    }

    #[test]
    fn dist_self_loop() {
        let mut graph = DiGraph::new();
        graph.add_edge("a", "a");

        assert_eq!(graph.dist("a", "a").unwrap(), Some(1));
    }

    #[test]
    fn reach_dist_pairs() {
        let graph = create_cyclic_graph();

        assert_eq!(
            graph.reach_dist_dfs("1").unwrap(),
            vec![("7", 3), ("6", 2)]
        );
        assert_eq!(graph.reach_dist_dfs("6").unwrap(), vec![("6", 0)]);
    }

    #[test]
    fn cycle_detection() {
        let graph = create_cyclic_graph();

        assert!(graph.has_cycle("1").unwrap());
        assert!(!graph.has_cycle("2").unwrap());
        assert!(graph.has_cycle("8").unwrap());
    }

    #[test]
    fn sink_counts_as_cyclic() {
        // A sink is its own BFS sink result, so the reachability proxy
        // reports it as cyclic.
        let graph = create_cyclic_graph();
        assert!(graph.has_cycle("6").unwrap());
    }
}
