//! Peeling leaf levels off the bottom of a graph.

use crate::graphlib::Graph;
use crate::traversal::{leaves, visible_parents};

/// Removes up to `n` levels: the current leaves, then their visible parents, and so on.
///
/// Each round removes the frontier and takes its visible parents as the next frontier, so a
/// parent is peeled in the following round even if it still has other children. Stops early
/// once the frontier is empty. Returns the number of removed nodes.
pub fn remove_levels(g: &mut Graph, n: usize) -> usize {
    let mut frontier: Vec<String> = leaves(g).into_iter().map(str::to_string).collect();
    let mut removed = 0;
    for level in 0..n {
        if frontier.is_empty() {
            break;
        }
        let parents: Vec<String> = visible_parents(g, &frontier)
            .into_iter()
            .filter(|p| !frontier.iter().any(|f| f == p))
            .map(str::to_string)
            .collect();
        let count = g.remove_nodes_cluster_aware(&frontier);
        tracing::trace!(level, removed = count, "removed level");
        removed += count;
        frontier = parents;
    }
    tracing::debug!(levels = n, removed, "removed levels");
    removed
}
