//! Layout preparation pipeline.
//!
//! Runs the graph-editing stages in a fixed order and returns the ranks of the result:
//! filter, path isolation, level removal, cluster edge graph rebuild, cluster edge synthesis,
//! rank-conflict annotation.

use crate::cluster_edges::{SynthesisReport, add_invisible_cluster_edges, stacks_from_edge_graph};
use crate::cluster_graph::rebuild_cluster_edge_graph;
use crate::error::Result;
use crate::filter::{filter_graph, paths_only};
use crate::graphlib::Graph;
use crate::levels::remove_levels;
use crate::options::PrepareOptions;
use crate::predicate::Predicate;
use crate::rank::{RankMap, assign_ranks, cluster_ranks};
use crate::rank_conflicts::fix_cluster_ranks;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prepared {
    pub ranks: RankMap,
    pub nodes_removed: usize,
    pub synthesis: SynthesisReport,
    pub annotated_clusters: usize,
}

pub fn prepare(g: &mut Graph, options: &PrepareOptions) -> Result<Prepared> {
    let _span = tracing::debug_span!("prepare", nodes = g.node_count()).entered();

    // Compile everything up front so a bad expression leaves the graph untouched.
    let filter = options.filter.as_deref().map(Predicate::compile).transpose()?;
    let paths = match &options.paths {
        Some(p) => Some((Predicate::compile(&p.from)?, Predicate::compile(&p.to)?)),
        None => None,
    };

    let prior_cluster_ranks = cluster_ranks(g);
    let mut out = Prepared::default();

    if let Some(filter) = &filter {
        let report = filter_graph(g, |a| filter.matches(a), options.filter_edges);
        out.nodes_removed += report.nodes_removed;
    }
    if let Some((from, to)) = &paths {
        out.nodes_removed += paths_only(g, |a| from.matches(a), |a| to.matches(a));
    }
    out.nodes_removed += remove_levels(g, options.levels);

    if g.is_clustered() && out.nodes_removed > 0 {
        let survivors: Vec<String> = g.cluster_ids().into_iter().map(str::to_string).collect();
        rebuild_cluster_edge_graph(g, &prior_cluster_ranks, &survivors);
    }

    if g.is_clustered() {
        let stacks = if options.cluster_stacks.is_empty() {
            stacks_from_edge_graph(g)
        } else {
            options.cluster_stacks.clone()
        };
        out.synthesis = add_invisible_cluster_edges(g, &stacks, options.cluster_edge_count);
    }

    if options.fix_ranks {
        out.annotated_clusters = fix_cluster_ranks(g);
    }

    out.ranks = assign_ranks(g);
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        removed = out.nodes_removed,
        "prepared graph"
    );
    Ok(out)
}
