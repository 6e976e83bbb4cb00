//! Cluster hierarchy for clustered graphs.
//!
//! Membership is attribute-driven: a node belongs to cluster `c` when its `cluster_key`
//! attribute is the string `c`. Clusters may nest through an optional parent link, and each
//! clustered graph owns a small "cluster edge graph" recording declared adjacency between
//! clusters (nodes are cluster ids).

use crate::Attrs;
use crate::graph::Graph;
use indexmap::IndexMap;
use serde_json::Value;

/// Default node attribute naming a node's cluster.
pub const DEFAULT_CLUSTER_KEY: &str = "cluster";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClusterEntry {
    pub(crate) parent: Option<String>,
    pub(crate) attrs: Attrs,
}

#[derive(Debug, Clone, Default)]
pub struct Clusters {
    key: String,
    entries: IndexMap<String, ClusterEntry>,
    edge_graph: Graph,
}

impl Clusters {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: IndexMap::new(),
            edge_graph: Graph::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn register_from_attrs(&mut self, attrs: &Attrs) {
        if let Some(Value::String(id)) = attrs.get(&self.key) {
            if !self.entries.contains_key(id) {
                self.entries.insert(id.clone(), ClusterEntry::default());
            }
        }
    }
}

impl Graph {
    pub fn clustered(key: impl Into<String>) -> Self {
        let mut g = Self::new();
        g.clusters = Some(Box::new(Clusters::new(key)));
        g
    }

    pub fn is_clustered(&self) -> bool {
        self.clusters.is_some()
    }

    pub fn clusters(&self) -> Option<&Clusters> {
        self.clusters.as_deref()
    }

    /// The node attribute used to classify nodes into clusters.
    pub fn cluster_key(&self) -> Option<&str> {
        self.clusters().map(Clusters::key)
    }

    pub fn cluster_of(&self, node: &str) -> Option<&str> {
        let key = self.cluster_key()?;
        self.node(node)?.get(key)?.as_str()
    }

    /// Registers (or re-parents) a cluster. No-op on plain graphs.
    pub fn set_cluster(&mut self, id: impl Into<String>, parent: Option<&str>) -> &mut Self {
        let Some(clusters) = self.clusters.as_deref_mut() else {
            return self;
        };
        let id = id.into();
        if let Some(parent) = parent {
            if !clusters.entries.contains_key(parent) {
                clusters
                    .entries
                    .insert(parent.to_string(), ClusterEntry::default());
            }
        }
        let entry = clusters.entries.entry(id).or_default();
        entry.parent = parent.map(str::to_string);
        self
    }

    pub fn cluster_ids(&self) -> Vec<&str> {
        self.clusters()
            .map(|c| c.entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Nodes whose cluster attribute is exactly `cluster` (nested clusters excluded).
    pub fn cluster_members(&self, cluster: &str) -> Vec<&str> {
        self.nodes()
            .filter(|n| self.cluster_of(n) == Some(cluster))
            .collect()
    }

    /// `cluster` followed by every transitively nested cluster, depth-first in registration
    /// order. Empty when `cluster` is unknown.
    pub fn cluster_descendants(&self, cluster: &str) -> Vec<&str> {
        let Some(clusters) = self.clusters() else {
            return Vec::new();
        };
        let Some((root, _)) = clusters.entries.get_key_value(cluster) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        let mut stack: Vec<&str> = vec![root.as_str()];
        while let Some(c) = stack.pop() {
            if out.contains(&c) {
                continue;
            }
            out.push(c);
            let children: Vec<&str> = clusters
                .entries
                .iter()
                .filter(|(_, e)| e.parent.as_deref() == Some(c))
                .map(|(id, _)| id.as_str())
                .collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    pub fn cluster_attrs(&self, cluster: &str) -> Option<&Attrs> {
        self.clusters()?.entries.get(cluster).map(|e| &e.attrs)
    }

    pub fn add_attr_to_cluster(&mut self, cluster: &str, name: impl Into<String>, value: Value) {
        let Some(clusters) = self.clusters.as_deref_mut() else {
            return;
        };
        if let Some(entry) = clusters.entries.get_mut(cluster) {
            entry.attrs.insert(name.into(), value);
        }
    }

    pub fn edge_graph(&self) -> Option<&Graph> {
        self.clusters().map(|c| &c.edge_graph)
    }

    pub fn add_cluster_edge(&mut self, from: &str, to: &str) {
        if let Some(clusters) = self.clusters.as_deref_mut() {
            clusters.edge_graph.set_edge(from, to);
        }
    }

    pub fn delete_edge_graph(&mut self) {
        if let Some(clusters) = self.clusters.as_deref_mut() {
            clusters.edge_graph = Graph::new();
        }
    }

    /// Removes attribute `name` from every cluster.
    pub fn clear_cluster_attr(&mut self, name: &str) {
        if let Some(clusters) = self.clusters.as_deref_mut() {
            for entry in clusters.entries.values_mut() {
                entry.attrs.remove(name);
            }
        }
    }

    /// Clusters with members in themselves or any nested cluster.
    fn populated_clusters(&self) -> Vec<String> {
        self.cluster_ids()
            .into_iter()
            .filter(|c| {
                self.cluster_descendants(c)
                    .iter()
                    .any(|d| !self.cluster_members(d).is_empty())
            })
            .map(str::to_string)
            .collect()
    }

    /// Removes `ids`, then prunes the clusters this removal left without members in
    /// themselves or any nested cluster (also dropping them from the cluster edge graph).
    /// Clusters that were already empty are kept.
    pub fn remove_nodes_cluster_aware<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        if !self.is_clustered() {
            return self.remove_nodes(ids);
        }
        let populated_before = self.populated_clusters();
        let removed = self.remove_nodes(ids);
        if removed == 0 {
            return 0;
        }

        let populated_after = self.populated_clusters();
        let emptied: Vec<String> = populated_before
            .into_iter()
            .filter(|c| !populated_after.contains(c))
            .collect();
        if emptied.is_empty() {
            return removed;
        }
        if let Some(clusters) = self.clusters.as_deref_mut() {
            clusters.entries.retain(|c, _| !emptied.contains(c));
            // Only empty clusters can hang off an emptied parent.
            for entry in clusters.entries.values_mut() {
                if entry.parent.as_ref().is_some_and(|p| emptied.contains(p)) {
                    entry.parent = None;
                }
            }
            clusters.edge_graph.remove_nodes(&emptied);
        }
        removed
    }
}
