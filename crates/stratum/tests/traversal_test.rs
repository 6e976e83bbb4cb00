use indexmap::IndexMap;
use serde_json::json;
use stratum::graphlib::{Attrs, EdgeKey, Graph};
use stratum::traversal::{
    NodeRef, eager_stateful_walk, is_root, leaves, path_between, predecessors_excl_self, roots,
    subgraph, successors_excl_self, visible_parents,
};

fn attrs(value: serde_json::Value) -> Attrs {
    value.as_object().cloned().unwrap_or_default()
}

fn invis() -> Attrs {
    attrs(json!({"style": "invis"}))
}

#[test]
fn adjacency_queries_exclude_self_loops() {
    let mut g = Graph::new();
    g.set_edge("a", "a");
    g.set_edge("a", "b");

    assert_eq!(successors_excl_self(&g, "a"), vec!["b"]);
    assert!(predecessors_excl_self(&g, "a").is_empty());
    assert_eq!(g.predecessors("a"), vec!["a"]);
    assert!(is_root(&g, "a"));
    assert!(!is_root(&g, "b"));
}

#[test]
fn roots_and_leaves_follow_node_order() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "c"]);
    g.ensure_node("d");

    assert_eq!(roots(&g), vec!["a", "d"]);
    assert_eq!(leaves(&g), vec!["c", "d"]);
}

#[test]
fn visible_parents_skip_invisible_edges_and_deduplicate() {
    let mut g = Graph::new();
    g.set_edge("a", "c");
    g.set_edge_with_attrs("b", "c", invis());
    g.set_edge("d", "e");
    g.set_edge("a", "e");

    assert_eq!(visible_parents(&g, &["c", "e"]), vec!["a", "d"]);
}

#[test]
fn eager_stateful_walk_overwrites_values_of_unexpanded_nodes() {
    let mut g = Graph::new();
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("c", "b");

    let mut initial: IndexMap<&str, usize> = IndexMap::new();
    initial.insert("a", 0);
    let depth = eager_stateful_walk(
        |v| successors_excl_self(&g, v),
        "a",
        |state, current, _next| state[current] + 1,
        initial,
    );

    // `c` is expanded first (stack order), so `b` is re-assigned through `c`.
    assert_eq!(depth.get("c"), Some(&1));
    assert_eq!(depth.get("b"), Some(&2));
}

#[test]
fn eager_stateful_walk_terminates_on_cycles() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "a"]);

    let mut initial: IndexMap<&str, usize> = IndexMap::new();
    initial.insert("a", 0);
    let depth = eager_stateful_walk(
        |v| successors_excl_self(&g, v),
        "a",
        |state, current, _next| state[current] + 1,
        initial,
    );
    assert_eq!(depth.get("a"), Some(&0));
    assert_eq!(depth.get("b"), Some(&1));
}

fn subgraph_fixture() -> Graph {
    let mut g = Graph::new();
    g.set_node("a", attrs(json!({"name": "alpha"})));
    g.set_node("b", attrs(json!({"name": "beta", "tier": "mid"})));
    g.set_edge_with_attrs("a", "b", attrs(json!({"label": "ab"})));
    g.set_edge("b", "c");
    g.set_edge("a", "c");
    g.set_edge("c", "d");
    g.set_edge("c", "c");
    g.set_edge("x", "y");
    g
}

#[test]
fn subgraph_keeps_depth_first_tree_edges_in_pre_order() {
    let g = subgraph_fixture();
    let sub = subgraph(&g, NodeRef::Id("a"));

    assert_eq!(sub.node_ids(), vec!["a", "b", "c", "d"]);
    assert_eq!(
        sub.edge_keys(),
        vec![
            EdgeKey::new("a", "b"),
            EdgeKey::new("b", "c"),
            EdgeKey::new("c", "d"),
        ]
    );
    assert_eq!(sub.edge("a", "b"), Some(&attrs(json!({"label": "ab"}))));
    assert_eq!(sub.node("a"), Some(&attrs(json!({"name": "alpha"}))));
}

#[test]
fn subgraph_resolves_partial_descriptors() {
    let g = subgraph_fixture();
    let partial = attrs(json!({"tier": "mid"}));
    let sub = subgraph(&g, NodeRef::from(&partial));
    assert_eq!(sub.node_ids(), vec!["b", "c", "d"]);
}

#[test]
fn subgraph_of_an_unknown_node_is_empty() {
    let g = subgraph_fixture();
    let partial = attrs(json!({"tier": "top"}));
    assert_eq!(subgraph(&g, NodeRef::from(&partial)).node_count(), 0);
    assert_eq!(subgraph(&g, NodeRef::Id("missing")).node_count(), 0);
}

#[test]
fn subgraph_of_a_node_without_successors_is_empty() {
    let mut g = subgraph_fixture();
    g.set_edge("d", "d");
    assert_eq!(subgraph(&g, NodeRef::Id("d")).node_count(), 0);
    assert_eq!(subgraph(&g, NodeRef::Id("y")).node_count(), 0);
    assert_eq!(subgraph(&g, NodeRef::Id("x")).node_ids(), vec!["x", "y"]);
}

#[test]
fn path_between_prefers_the_shortest_visible_path() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "c", "d"]);
    g.set_edge_with_attrs("a", "d", invis());
    g.set_path(&["a", "x", "d"]);

    assert_eq!(
        path_between(&g, "a", "d"),
        Some(vec!["a".to_string(), "x".to_string(), "d".to_string()])
    );
    assert_eq!(path_between(&g, "d", "a"), None);
    assert_eq!(path_between(&g, "a", "a"), Some(vec!["a".to_string()]));
    assert_eq!(path_between(&g, "a", "missing"), None);
}
