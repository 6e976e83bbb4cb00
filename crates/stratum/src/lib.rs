//! Layering and cluster-edge preparation for hierarchical diagram layout.
//!
//! Assigns every node a rank, synthesizes constraint / invisible edges that hold clusters in a
//! stable vertical order, and extracts subgraphs by attribute predicates. Final coordinates are
//! left to a downstream layered renderer.

pub use stratum_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cluster_edges;
pub mod cluster_graph;
pub mod error;
pub mod filter;
pub mod levels;
pub mod options;
pub mod pipeline;
pub mod predicate;
pub mod rank;
pub mod rank_conflicts;
pub mod rank_index;
pub mod traversal;

pub use cluster_edges::{Fan, SynthesisReport, add_invisible_cluster_edges, fan_for};
pub use cluster_graph::rebuild_cluster_edge_graph;
pub use error::{Error, Result};
pub use filter::{FilterReport, filter_graph, paths_only};
pub use levels::remove_levels;
pub use options::{PathsOptions, PrepareOptions};
pub use pipeline::{Prepared, prepare};
pub use predicate::Predicate;
pub use rank::{RankMap, assign_ranks};
pub use rank_conflicts::{fix_ranks, same_rank_groups};
pub use rank_index::{Extremum, RankIndex};
pub use traversal::{NodeRef, path_between, subgraph};
