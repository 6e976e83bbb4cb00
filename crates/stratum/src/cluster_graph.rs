//! Rebuilds the cluster edge graph after a subset of clusters survived filtering.

use crate::graphlib::{EdgeKey, Graph};
use crate::rank::RankMap;
use indexmap::IndexSet;
use std::collections::BTreeMap;

/// Orders `targets` into levels by their rank in `prior`.
///
/// Clusters that shared a prior rank share a level; levels follow ascending prior rank and
/// ranks with no surviving target are skipped. Targets missing from `prior` are dropped.
pub fn rank_levels<S: AsRef<str>>(prior: &RankMap, targets: &[S]) -> Vec<Vec<String>> {
    let mut by_rank: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    for (cluster, &rank) in prior {
        by_rank.entry(rank).or_default().push(cluster.as_str());
    }

    let mut remaining: IndexSet<&str> = targets.iter().map(|t| t.as_ref()).collect();
    let mut levels: Vec<Vec<String>> = Vec::new();
    for group in by_rank.values() {
        if remaining.is_empty() {
            break;
        }
        let level: Vec<String> = group
            .iter()
            .filter(|c| remaining.shift_remove(**c))
            .map(|c| c.to_string())
            .collect();
        if !level.is_empty() {
            levels.push(level);
        }
    }
    levels
}

/// Full bipartite fan between every pair of consecutive levels.
pub fn level_edges(levels: &[Vec<String>]) -> Vec<EdgeKey> {
    let mut out = Vec::new();
    for pair in levels.windows(2) {
        for upper in &pair[0] {
            for lower in &pair[1] {
                out.push(EdgeKey::new(upper.as_str(), lower.as_str()));
            }
        }
    }
    out
}

/// Clears the cluster edge graph and repopulates it from `prior` restricted to `targets`.
/// Returns the number of cluster edges inserted; plain graphs are left alone.
pub fn rebuild_cluster_edge_graph<S: AsRef<str>>(
    g: &mut Graph,
    prior: &RankMap,
    targets: &[S],
) -> usize {
    if !g.is_clustered() {
        return 0;
    }
    let levels = rank_levels(prior, targets);
    let edges = level_edges(&levels);

    g.delete_edge_graph();
    for e in &edges {
        g.add_cluster_edge(&e.v, &e.w);
    }
    tracing::debug!(
        levels = levels.len(),
        edges = edges.len(),
        "rebuilt cluster edge graph"
    );
    edges.len()
}
