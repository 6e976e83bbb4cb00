//! Same-rank collisions within a classification key, attached as advisory cluster metadata.

use crate::graphlib::Graph;
use crate::rank::assign_ranks;
use crate::rank_index::RankIndex;
use indexmap::IndexMap;
use serde_json::Value;
use std::hash::Hash;

/// Cluster attribute receiving the tie groups of that cluster.
pub const FIX_RANKS_ATTR: &str = "fix-ranks";

/// Per key, every rank group with more than one member. Keys without ties are omitted.
pub fn same_rank_groups<K>(index: &RankIndex<K>) -> IndexMap<K, Vec<Vec<String>>>
where
    K: Hash + Eq + Clone,
{
    let mut out = IndexMap::new();
    for (key, by_rank) in index.iter() {
        let ties: Vec<Vec<String>> = by_rank
            .values()
            .filter(|group| group.len() > 1)
            .cloned()
            .collect();
        if !ties.is_empty() {
            out.insert(key.clone(), ties);
        }
    }
    out
}

/// Attaches each cluster's tie groups as its `fix-ranks` attribute, replacing any earlier
/// annotation. The node and edge sets are not touched. Returns the number of annotated
/// clusters.
pub fn fix_ranks<F>(g: &mut Graph, classify: F) -> usize
where
    F: Fn(&Graph, &str) -> Option<String>,
{
    let graph: &Graph = g;
    let ranks = assign_ranks(graph);
    let index = RankIndex::build(&ranks, |v| classify(graph, v));
    let ties = same_rank_groups(&index);
    g.clear_cluster_attr(FIX_RANKS_ATTR);
    for (cluster, groups) in &ties {
        let value = Value::Array(
            groups
                .iter()
                .map(|group| Value::Array(group.iter().cloned().map(Value::String).collect()))
                .collect(),
        );
        g.add_attr_to_cluster(cluster, FIX_RANKS_ATTR, value);
    }
    tracing::debug!(clusters = ties.len(), "annotated rank conflicts");
    ties.len()
}

/// [`fix_ranks`] classified by cluster membership.
pub fn fix_cluster_ranks(g: &mut Graph) -> usize {
    fix_ranks(g, |g, v| g.cluster_of(v).map(str::to_string))
}
