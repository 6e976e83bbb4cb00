//! Synthesis of structural edges between vertically stacked clusters.
//!
//! For each adjacent `(upper, lower)` pair of a declared stack, anchors are drawn from the
//! highest rank of every cluster nested in `upper` and the lowest rank of every cluster nested
//! in `lower`. Each anchor pair becomes an edge. Pairs that already have a real edge are only
//! flagged `constraint = true`; the rest become `style = "invis"` scaffolding.

use crate::graphlib::{Attrs, EdgeKey, Graph, INVISIBLE_STYLE, STYLE_ATTR};
use crate::rank::{RankMap, assign_ranks};
use crate::rank_index::{Extremum, RankIndex};
use indexmap::IndexSet;
use serde_json::Value;

pub const CONSTRAINT_ATTR: &str = "constraint";

/// Anchor counts drawn from the upper and lower cluster of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fan {
    pub upper: usize,
    pub lower: usize,
}

impl Fan {
    pub const fn new(upper: usize, lower: usize) -> Self {
        Self { upper, lower }
    }
}

pub const DEFAULT_FAN: Fan = Fan::new(2, 2);

const FAN_TABLE: &[(usize, Fan)] = &[
    (16, Fan::new(4, 4)),
    (12, Fan::new(4, 3)),
    (9, Fan::new(3, 3)),
    (6, Fan::new(3, 2)),
    (4, Fan::new(2, 2)),
    (2, Fan::new(2, 1)),
    (1, Fan::new(1, 1)),
];

/// Fan for a requested total edge count; unlisted counts get [`DEFAULT_FAN`].
pub fn fan_for(edge_count: usize) -> Fan {
    FAN_TABLE
        .iter()
        .find(|(count, _)| *count == edge_count)
        .map_or(DEFAULT_FAN, |&(_, fan)| fan)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    /// New invisible edges.
    pub added: usize,
    /// Existing edges flagged as constraints.
    pub constrained: usize,
}

/// Groups ranked nodes by cluster.
pub fn cluster_rank_index(g: &Graph, ranks: &RankMap) -> RankIndex<String> {
    RankIndex::build(ranks, |v| g.cluster_of(v).map(str::to_string))
}

/// Each cluster edge as a two-element stack.
pub fn stacks_from_edge_graph(g: &Graph) -> Vec<Vec<String>> {
    g.edge_graph()
        .map(|eg| eg.edges().map(|e| vec![e.v.clone(), e.w.clone()]).collect())
        .unwrap_or_default()
}

/// Candidate anchor edges for one `(upper, lower)` cluster pair.
pub fn anchor_pairs(
    g: &Graph,
    index: &RankIndex<String>,
    upper: &str,
    lower: &str,
    fan: Fan,
) -> Vec<EdgeKey> {
    let upper_anchors: Vec<&str> = g
        .cluster_descendants(upper)
        .into_iter()
        .flat_map(|c| index.top_k_at_extremal_rank(c, fan.upper, Extremum::Max))
        .collect();
    let lower_anchors: Vec<&str> = g
        .cluster_descendants(lower)
        .into_iter()
        .flat_map(|c| index.top_k_at_extremal_rank(c, fan.lower, Extremum::Min))
        .collect();

    let mut out = Vec::with_capacity(upper_anchors.len() * lower_anchors.len());
    for &u in &upper_anchors {
        for &v in &lower_anchors {
            if u != v {
                out.push(EdgeKey::new(u, v));
            }
        }
    }
    out
}

/// Adds constraint / invisible edges between consecutive clusters of every stack.
///
/// Ranks are computed once, before any edge is inserted. Candidates are classified against
/// the graph as it was before the call, so a pair emitted by two stacks is handled once.
pub fn add_invisible_cluster_edges(
    g: &mut Graph,
    stacks: &[Vec<String>],
    edge_count: usize,
) -> SynthesisReport {
    let fan = fan_for(edge_count);
    let ranks = assign_ranks(g);
    let index = cluster_rank_index(g, &ranks);

    let mut candidates: IndexSet<EdgeKey> = IndexSet::new();
    for stack in stacks {
        for pair in stack.windows(2) {
            let pairs = anchor_pairs(g, &index, &pair[0], &pair[1], fan);
            tracing::trace!(
                upper = %pair[0],
                lower = %pair[1],
                candidates = pairs.len(),
                "cluster pair"
            );
            candidates.extend(pairs);
        }
    }

    let mut report = SynthesisReport::default();
    let mut fresh: Vec<EdgeKey> = Vec::new();
    for key in candidates {
        match g.edge_mut(&key.v, &key.w) {
            Some(attrs) => {
                attrs.insert(CONSTRAINT_ATTR.to_string(), Value::Bool(true));
                report.constrained += 1;
            }
            None => fresh.push(key),
        }
    }
    report.added = fresh.len();
    g.add_edges(fresh.into_iter().map(|key| {
        let mut attrs = Attrs::new();
        attrs.insert(
            STYLE_ATTR.to_string(),
            Value::String(INVISIBLE_STYLE.to_string()),
        );
        (key.v, key.w, attrs)
    }));

    tracing::debug!(
        upper_fan = fan.upper,
        lower_fan = fan.lower,
        added = report.added,
        constrained = report.constrained,
        "synthesized cluster edges"
    );
    report
}
