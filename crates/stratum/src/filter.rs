//! Predicate-based node/edge filtering and path isolation.
//!
//! Removal is cluster-aware on clustered graphs (emptied clusters are pruned).

use crate::graphlib::{Attrs, EdgeKey, Graph};
use crate::traversal::path_between;
use indexmap::IndexSet;

/// Edge attribute holding the mapping edge predicates are tested against.
pub const META_ATTR: &str = "meta";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterReport {
    pub nodes_removed: usize,
    pub edges_removed: usize,
}

/// Nodes whose attributes satisfy `predicate`, in insertion order.
pub fn matching_nodes<P>(g: &Graph, predicate: P) -> Vec<String>
where
    P: Fn(&Attrs) -> bool,
{
    let mut out = Vec::new();
    g.for_each_node(|v, attrs| {
        if predicate(attrs) {
            out.push(v.to_string());
        }
    });
    out
}

/// Keeps the nodes satisfying `predicate`. With `filter_edges`, also drops every visible
/// edge whose `meta` mapping fails it (a missing `meta` is tested as an empty mapping).
/// Invisible scaffolding edges are never filtered.
pub fn filter_graph<P>(g: &mut Graph, predicate: P, filter_edges: bool) -> FilterReport
where
    P: Fn(&Attrs) -> bool,
{
    let mut doomed: Vec<String> = Vec::new();
    g.for_each_node(|v, attrs| {
        if !predicate(attrs) {
            doomed.push(v.to_string());
        }
    });
    let mut report = FilterReport {
        nodes_removed: g.remove_nodes_cluster_aware(&doomed),
        ..Default::default()
    };

    if filter_edges {
        let empty = Attrs::new();
        let mut failing: Vec<EdgeKey> = Vec::new();
        let graph: &Graph = g;
        graph.for_each_edge(|key, attrs| {
            if graph.is_edge_invisible(&key.v, &key.w) {
                return;
            }
            let meta = attrs
                .get(META_ATTR)
                .and_then(|m| m.as_object())
                .unwrap_or(&empty);
            if !predicate(meta) {
                failing.push(key.clone());
            }
        });
        report.edges_removed = g.remove_edges(&failing);
    }

    tracing::debug!(
        nodes_removed = report.nodes_removed,
        edges_removed = report.edges_removed,
        "filtered graph"
    );
    report
}

/// Keeps only nodes lying on a shortest visible path from a `start` match to an `end` match.
/// Unreachable pairs contribute nothing; returns the number of removed nodes.
pub fn paths_only<S, E>(g: &mut Graph, start: S, end: E) -> usize
where
    S: Fn(&Attrs) -> bool,
    E: Fn(&Attrs) -> bool,
{
    let starts = matching_nodes(g, start);
    let ends = matching_nodes(g, end);

    let mut keep: IndexSet<String> = IndexSet::new();
    for a in &starts {
        for b in &ends {
            if let Some(path) = path_between(g, a, b) {
                keep.extend(path);
            }
        }
    }

    let doomed: Vec<String> = g
        .nodes()
        .filter(|v| !keep.contains(*v))
        .map(str::to_string)
        .collect();
    let removed = g.remove_nodes_cluster_aware(&doomed);
    tracing::debug!(
        starts = starts.len(),
        ends = ends.len(),
        kept = keep.len(),
        removed,
        "isolated paths"
    );
    removed
}
