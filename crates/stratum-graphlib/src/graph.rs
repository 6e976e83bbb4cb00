//! Graph container used by `stratum`.
//!
//! A directed, simple graph whose nodes and edges carry attribute mappings. Node and edge
//! iteration follows insertion order, which keeps every derived structure (roots, rank maps,
//! rank indexes) reproducible for a given input.

mod adj_cache;
mod edge_key;
mod entries;

use crate::Attrs;
use crate::cluster::Clusters;
use adj_cache::AdjCache;
use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;

pub use edge_key::EdgeKey;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Edge attribute holding the rendering style (`"invis"` for scaffolding edges).
pub const STYLE_ATTR: &str = "style";
/// Style value marking an edge as invisible.
pub const INVISIBLE_STYLE: &str = "invis";

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry>,
    edge_index: HashMap<EdgeKey, usize>,

    pub(crate) clusters: Option<Box<Clusters>>,

    // Uses interior mutability to keep query APIs on `&self`.
    adj_gen: u64,
    adj_cache: RefCell<Option<AdjCache>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
        *self.adj_cache.get_mut() = None;
    }

    fn with_adj<R>(&self, f: impl FnOnce(&AdjCache) -> R) -> R {
        let generation = self.adj_gen;
        let mut cache = self.adj_cache.borrow_mut();
        if cache.as_ref().is_some_and(|c| c.generation != generation) {
            *cache = None;
        }
        let cache = cache.get_or_insert_with(|| {
            AdjCache::build(
                generation,
                self.nodes.len(),
                self.edges.iter().map(|e| (e.v_ix, e.w_ix)),
            )
        });
        f(cache)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts `id` or replaces its attributes.
    pub fn set_node(&mut self, id: impl Into<String>, attrs: Attrs) -> &mut Self {
        let id = id.into();
        if let Some(clusters) = self.clusters.as_deref_mut() {
            clusters.register_from_attrs(&attrs);
        }
        if let Some(&idx) = self.node_index.get(&id) {
            self.nodes[idx].attrs = attrs;
            return self;
        }
        self.invalidate_adj();
        let idx = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            attrs,
        });
        self.node_index.insert(id, idx);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.set_node(id, Attrs::new())
    }

    pub fn node(&self, id: &str) -> Option<&Attrs> {
        self.node_index.get(id).map(|&idx| &self.nodes[idx].attrs)
    }

    /// The stored id equal to `id`, borrowed from the graph.
    pub fn node_id(&self, id: &str) -> Option<&str> {
        self.node_index.get_key_value(id).map(|(k, _)| k.as_str())
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Attrs> {
        self.node_index
            .get(id)
            .copied()
            .map(move |idx| &mut self.nodes[idx].attrs)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Attrs),
    {
        for n in &self.nodes {
            f(&n.id, &n.attrs);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &Attrs),
    {
        for e in &self.edges {
            f(&e.key, &e.attrs);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.upsert_edge(v.into(), w.into(), None)
    }

    pub fn set_edge_with_attrs(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        attrs: Attrs,
    ) -> &mut Self {
        self.upsert_edge(v.into(), w.into(), Some(attrs))
    }

    /// Bulk form of [`Graph::set_edge_with_attrs`].
    pub fn add_edges<I, S>(&mut self, edges: I) -> &mut Self
    where
        I: IntoIterator<Item = (S, S, Attrs)>,
        S: Into<String>,
    {
        for (v, w, attrs) in edges {
            self.upsert_edge(v.into(), w.into(), Some(attrs));
        }
        self
    }

    fn upsert_edge(&mut self, v: String, w: String, attrs: Option<Attrs>) -> &mut Self {
        self.ensure_node(v.as_str());
        self.ensure_node(w.as_str());

        let view = EdgeKeyView {
            v: v.as_str(),
            w: w.as_str(),
        };
        if let Some(&idx) = self.edge_index.get(&view) {
            if let Some(attrs) = attrs {
                self.edges[idx].attrs = attrs;
            }
            return self;
        }

        let (Some(&v_ix), Some(&w_ix)) = (self.node_index.get(&v), self.node_index.get(&w)) else {
            return self;
        };
        self.invalidate_adj();
        let key = EdgeKey { v, w };
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            attrs: attrs.unwrap_or_default(),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index.contains_key(&EdgeKeyView { v, w })
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&Attrs> {
        let idx = *self.edge_index.get(&EdgeKeyView { v, w })?;
        Some(&self.edges[idx].attrs)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str) -> Option<&mut Attrs> {
        let idx = *self.edge_index.get(&EdgeKeyView { v, w })?;
        Some(&mut self.edges[idx].attrs)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        if !self.has_edge(v, w) {
            return false;
        }
        self.remove_edges(&[EdgeKey::new(v, w)]);
        true
    }

    /// Removes every listed edge; unknown keys are ignored.
    pub fn remove_edges(&mut self, keys: &[EdgeKey]) -> usize {
        let doomed: HashSet<&EdgeKey> = keys.iter().collect();
        let before = self.edges.len();
        self.edges.retain(|e| !doomed.contains(&e.key));
        let removed = before - self.edges.len();
        if removed > 0 {
            self.reindex_edges();
            self.invalidate_adj();
        }
        removed
    }

    /// Removes the listed nodes and their incident edges. Cluster entries are left alone; use
    /// [`Graph::remove_nodes_cluster_aware`] to prune emptied clusters as well.
    pub fn remove_nodes<S: AsRef<str>>(&mut self, ids: &[S]) -> usize {
        let doomed: HashSet<&str> = ids
            .iter()
            .map(|id| id.as_ref())
            .filter(|id| self.node_index.contains_key(*id))
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        self.nodes.retain(|n| !doomed.contains(n.id.as_str()));
        self.node_index.clear();
        for (i, n) in self.nodes.iter().enumerate() {
            self.node_index.insert(n.id.clone(), i);
        }

        self.edges
            .retain(|e| !doomed.contains(e.key.v.as_str()) && !doomed.contains(e.key.w.as_str()));
        self.reindex_edges();
        self.invalidate_adj();
        doomed.len()
    }

    fn reindex_edges(&mut self) {
        self.edge_index.clear();
        for (i, e) in self.edges.iter_mut().enumerate() {
            if let (Some(&v_ix), Some(&w_ix)) =
                (self.node_index.get(&e.key.v), self.node_index.get(&e.key.w))
            {
                e.v_ix = v_ix;
                e.w_ix = w_ix;
            }
            self.edge_index.insert(e.key.clone(), i);
        }
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let mut out = Vec::new();
        self.for_each_successor(v, |w| out.push(w));
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let mut out = Vec::new();
        self.for_each_predecessor(v, |u| out.push(u));
        out
    }

    pub fn for_each_successor<'a, F>(&'a self, v: &str, mut f: F)
    where
        F: FnMut(&'a str),
    {
        let Some(&v_ix) = self.node_index.get(v) else {
            return;
        };
        let edges = self.with_adj(|cache| cache.out_edges(v_ix).to_vec());
        for edge_ix in edges {
            f(self.edges[edge_ix].key.w.as_str());
        }
    }

    pub fn for_each_predecessor<'a, F>(&'a self, v: &str, mut f: F)
    where
        F: FnMut(&'a str),
    {
        let Some(&v_ix) = self.node_index.get(v) else {
            return;
        };
        let edges = self.with_adj(|cache| cache.in_edges(v_ix).to_vec());
        for edge_ix in edges {
            f(self.edges[edge_ix].key.v.as_str());
        }
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(&v_ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.with_adj(|cache| {
            cache
                .in_edges(v_ix)
                .iter()
                .map(|&edge_ix| self.edges[edge_ix].key.clone())
                .collect()
        })
    }

    /// `true` when the edge exists and is styled `invis`.
    pub fn is_edge_invisible(&self, v: &str, w: &str) -> bool {
        self.edge(v, w)
            .and_then(|attrs| attrs.get(STYLE_ATTR))
            .and_then(|style| style.as_str())
            == Some(INVISIBLE_STYLE)
    }

    /// A leaf has no visible outgoing edge to another node. Self-loops don't count.
    pub fn is_leaf(&self, v: &str) -> bool {
        self.has_node(v)
            && self
                .successors(v)
                .into_iter()
                .all(|w| w == v || self.is_edge_invisible(v, w))
    }

    /// First node (in insertion order) whose attributes contain every entry of `partial`.
    pub fn find_by_subset_match(&self, partial: &Attrs) -> Option<&str> {
        self.nodes
            .iter()
            .find(|n| {
                partial
                    .iter()
                    .all(|(k, expected)| n.attrs.get(k) == Some(expected))
            })
            .map(|n| n.id.as_str())
    }

    /// Builds a plain graph from an edge sequence; endpoints are created on first use.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (EdgeKey, Attrs)>,
    {
        let mut g = Self::new();
        for (key, attrs) in edges {
            g.upsert_edge(key.v, key.w, Some(attrs));
        }
        g
    }
}
