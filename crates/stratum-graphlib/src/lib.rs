//! Graph container and cluster hierarchy used by `stratum`.
//!
//! The container is a directed, simple, attribute-carrying graph with deterministic
//! (insertion-order) iteration. Clustered graphs additionally carry a [`Clusters`] hierarchy
//! and a cluster edge graph.

pub mod cluster;
pub mod graph;

pub use cluster::{Clusters, DEFAULT_CLUSTER_KEY};
pub use graph::{EdgeKey, Graph, INVISIBLE_STYLE, STYLE_ATTR};

/// Attribute mapping carried by nodes, edges and clusters.
pub type Attrs = serde_json::Map<String, serde_json::Value>;
