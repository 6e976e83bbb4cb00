//! Rank assignment by longest-path propagation from every root.
//!
//! Every root starts at rank 0. Each root then gets its own [`eager_stateful_walk`] over one
//! shared rank map, with `rank[next] = max(rank[next], rank[current] + 1)`. The walk expands a
//! node once per root, so a longer path found after a node was expanded does not propagate
//! to its descendants in that walk. The result is an approximation of longest-path layering,
//! not a guaranteed maximum.
//!
//! Nodes unreachable from any root (e.g. members of a root-less cycle) are absent from the
//! rank map; callers must treat them as unranked rather than rank 0.

use crate::graphlib::Graph;
use crate::traversal::{eager_stateful_walk, roots, successors_excl_self};
use indexmap::IndexMap;

/// Node id to 0-based rank, in assignment order (roots first).
pub type RankMap = IndexMap<String, usize>;

pub fn assign_ranks(g: &Graph) -> RankMap {
    let roots = roots(g);
    let mut ranks: IndexMap<&str, usize> = roots.iter().map(|&r| (r, 0)).collect();

    for &root in &roots {
        ranks = eager_stateful_walk(
            |v| successors_excl_self(g, v),
            root,
            |state, current, next| {
                let candidate = state.get(current).map_or(1, |r| r + 1);
                match state.get(next) {
                    Some(&existing) => existing.max(candidate),
                    None => candidate,
                }
            },
            ranks,
        );
    }

    tracing::debug!(
        roots = roots.len(),
        ranked = ranks.len(),
        nodes = g.node_count(),
        "assigned ranks"
    );
    ranks
        .into_iter()
        .map(|(v, r)| (v.to_string(), r))
        .collect()
}

/// Ranks of the cluster edge graph; empty for plain graphs.
pub fn cluster_ranks(g: &Graph) -> RankMap {
    g.edge_graph().map(assign_ranks).unwrap_or_default()
}

pub fn max_rank(ranks: &RankMap) -> Option<usize> {
    ranks.values().copied().max()
}
