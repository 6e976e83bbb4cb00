//! Configuration for [`prepare`](crate::prepare), deserialized from JSON.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsOptions {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrepareOptions {
    /// Predicate expression nodes (and edge `meta` mappings) must satisfy.
    pub filter: Option<String>,
    pub filter_edges: bool,
    pub paths: Option<PathsOptions>,
    /// Leaf levels to peel off.
    pub levels: usize,
    /// Requested edges per cluster pair; see [`fan_for`](crate::cluster_edges::fan_for).
    pub cluster_edge_count: usize,
    /// Cluster stacks, top to bottom. Empty means "use the cluster edge graph".
    pub cluster_stacks: Vec<Vec<String>>,
    pub fix_ranks: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            filter: None,
            filter_edges: true,
            paths: None,
            levels: 0,
            cluster_edge_count: 4,
            cluster_stacks: Vec::new(),
            fix_ranks: false,
        }
    }
}

impl PrepareOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
