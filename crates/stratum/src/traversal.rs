//! Traversal helpers shared by rank assignment and the filtering operations.
//!
//! Adjacency queries here drop self-loops: a node pointing at itself must neither inflate its
//! own rank nor stop it from being a root or a leaf.

use crate::graphlib::{Attrs, EdgeKey, Graph};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::VecDeque;
use std::hash::Hash;

pub fn predecessors_excl_self<'a>(g: &'a Graph, v: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    g.for_each_predecessor(v, |u| {
        if u != v {
            out.push(u);
        }
    });
    out
}

pub fn successors_excl_self<'a>(g: &'a Graph, v: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    g.for_each_successor(v, |w| {
        if w != v {
            out.push(w);
        }
    });
    out
}

pub fn is_root(g: &Graph, v: &str) -> bool {
    predecessors_excl_self(g, v).is_empty()
}

/// Roots in node insertion order.
pub fn roots(g: &Graph) -> Vec<&str> {
    g.nodes().filter(|v| is_root(g, v)).collect()
}

/// Leaves (see [`Graph::is_leaf`]) in node insertion order.
pub fn leaves(g: &Graph) -> Vec<&str> {
    g.nodes().filter(|v| g.is_leaf(v)).collect()
}

/// Distinct predecessors of `nodes` over visible edges, in first-seen order.
pub fn visible_parents<'a, S: AsRef<str>>(g: &'a Graph, nodes: &[S]) -> Vec<&'a str> {
    let mut seen: HashSet<&str> = HashSet::default();
    let mut out: Vec<&'a str> = Vec::new();
    for v in nodes {
        let v = v.as_ref();
        for u in predecessors_excl_self(g, v) {
            if !g.is_edge_invisible(u, v) && seen.insert(u) {
                out.push(u);
            }
        }
    }
    out
}

/// Depth-first walk from `start` that folds a state value onto every newly discovered edge.
///
/// Each node is expanded at most once. For every successor `next` of the node being expanded
/// that has not been expanded yet, `state[next]` is replaced by `update(&state, current, next)`,
/// even if an earlier edge already assigned it. Combining old and new values (e.g. `max`) is
/// the update function's job.
pub fn eager_stateful_walk<K, V, S, U>(
    mut successors: S,
    start: K,
    mut update: U,
    mut state: IndexMap<K, V>,
) -> IndexMap<K, V>
where
    K: Clone + Eq + Hash,
    S: FnMut(&K) -> Vec<K>,
    U: FnMut(&IndexMap<K, V>, &K, &K) -> V,
{
    let mut explored: HashSet<K> = HashSet::default();
    let mut stack: Vec<K> = vec![start];
    while let Some(current) = stack.pop() {
        if !explored.insert(current.clone()) {
            continue;
        }
        for next in successors(&current) {
            if explored.contains(&next) {
                continue;
            }
            let value = update(&state, &current, &next);
            state.insert(next.clone(), value);
            stack.push(next);
        }
    }
    state
}

/// A node addressed by id or by a partial attribute descriptor.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Id(&'a str),
    Partial(&'a Attrs),
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a Attrs> for NodeRef<'a> {
    fn from(partial: &'a Attrs) -> Self {
        Self::Partial(partial)
    }
}

pub fn resolve_node<'a>(g: &'a Graph, node: NodeRef<'_>) -> Option<&'a str> {
    match node {
        NodeRef::Id(id) => g.node_id(id),
        NodeRef::Partial(partial) => g.find_by_subset_match(partial),
    }
}

/// Graph rebuilt from the depth-first tree edges reachable from `node`, in pre-order.
///
/// Node and edge attributes are copied. Only edge endpoints make it into the result, so a
/// node without successors, like an unresolvable reference, yields an empty graph.
pub fn subgraph(g: &Graph, node: NodeRef<'_>) -> Graph {
    let Some(start) = resolve_node(g, node) else {
        return Graph::new();
    };

    let mut visited: HashSet<&str> = HashSet::default();
    let mut tree_edges: Vec<EdgeKey> = Vec::new();
    // Pending successor lists per stack frame keep the walk iterative and pre-ordered.
    let mut stack: Vec<(&str, std::vec::IntoIter<&str>)> = Vec::new();
    visited.insert(start);
    stack.push((start, successors_excl_self(g, start).into_iter()));
    while let Some((v, pending)) = stack.last_mut() {
        let v = *v;
        match pending.next() {
            Some(w) => {
                if visited.insert(w) {
                    tree_edges.push(EdgeKey::new(v, w));
                    stack.push((w, successors_excl_self(g, w).into_iter()));
                }
            }
            None => {
                stack.pop();
            }
        }
    }

    let mut out = Graph::from_edges(tree_edges.into_iter().map(|key| {
        let attrs = g.edge(&key.v, &key.w).cloned().unwrap_or_default();
        (key, attrs)
    }));
    for v in out.node_ids() {
        if let (Some(src), Some(dst)) = (g.node(&v), out.node_mut(&v)) {
            dst.clone_from(src);
        }
    }
    out
}

/// Shortest path (by edge count) from `a` to `b` over visible edges, both ends included.
pub fn path_between(g: &Graph, a: &str, b: &str) -> Option<Vec<String>> {
    if !g.has_node(a) || !g.has_node(b) {
        return None;
    }
    if a == b {
        return Some(vec![a.to_string()]);
    }

    let mut came_from: HashMap<&str, &str> = HashMap::default();
    let mut queue: VecDeque<&str> = VecDeque::from([a]);
    came_from.insert(a, a);
    while let Some(v) = queue.pop_front() {
        for w in successors_excl_self(g, v) {
            if came_from.contains_key(w) || g.is_edge_invisible(v, w) {
                continue;
            }
            came_from.insert(w, v);
            if w == b {
                let mut path = vec![b.to_string()];
                let mut cur = b;
                while cur != a {
                    cur = came_from.get(cur).copied()?;
                    path.push(cur.to_string());
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(w);
        }
    }
    None
}
