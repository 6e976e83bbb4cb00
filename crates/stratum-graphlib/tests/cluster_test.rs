use serde_json::json;
use stratum_graphlib::{Attrs, DEFAULT_CLUSTER_KEY, Graph};

fn member(cluster: &str) -> Attrs {
    json!({ "cluster": cluster }).as_object().cloned().unwrap_or_default()
}

fn nested_graph() -> Graph {
    let mut g = Graph::clustered(DEFAULT_CLUSTER_KEY);
    g.set_cluster("outer", None);
    g.set_cluster("inner", Some("outer"));
    g.set_cluster("other", None);
    g.set_node("a", member("outer"));
    g.set_node("b", member("inner"));
    g.set_node("c", member("other"));
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.add_cluster_edge("outer", "other");
    g
}

#[test]
fn cluster_membership_follows_the_cluster_attribute() {
    let g = nested_graph();
    assert!(g.is_clustered());
    assert_eq!(g.cluster_key(), Some("cluster"));
    assert_eq!(g.cluster_of("b"), Some("inner"));
    assert_eq!(g.cluster_members("outer"), vec!["a"]);
    assert_eq!(g.cluster_ids(), vec!["outer", "inner", "other"]);
}

#[test]
fn setting_a_node_registers_its_cluster() {
    let mut g = Graph::clustered("cluster");
    g.set_node("n", member("fresh"));
    assert_eq!(g.cluster_ids(), vec!["fresh"]);
}

#[test]
fn cluster_descendants_include_the_cluster_itself() {
    let g = nested_graph();
    assert_eq!(g.cluster_descendants("outer"), vec!["outer", "inner"]);
    assert_eq!(g.cluster_descendants("inner"), vec!["inner"]);
    assert!(g.cluster_descendants("missing").is_empty());
}

#[test]
fn cluster_aware_removal_prunes_emptied_clusters_and_their_cluster_edges() {
    let mut g = nested_graph();
    g.remove_nodes_cluster_aware(&["c"]);

    assert_eq!(g.cluster_ids(), vec!["outer", "inner"]);
    let edge_graph = g.edge_graph().unwrap();
    assert!(!edge_graph.has_node("other"));
    assert!(edge_graph.has_node("outer"));
}

#[test]
fn a_parent_with_populated_children_survives_cluster_aware_removal() {
    let mut g = nested_graph();
    g.remove_nodes_cluster_aware(&["a"]);
    assert_eq!(g.cluster_ids(), vec!["outer", "inner", "other"]);
}

#[test]
fn declared_empty_clusters_survive_removal_elsewhere() {
    let mut g = Graph::clustered("cluster");
    g.set_cluster("X", None);
    g.set_node("a1", member("A"));
    g.set_node("b1", member("B"));
    g.add_cluster_edge("X", "A");

    assert_eq!(g.remove_nodes_cluster_aware(&["b1"]), 1);
    assert_eq!(g.cluster_ids(), vec!["X", "A"]);
    let edge_graph = g.edge_graph().unwrap();
    assert!(edge_graph.has_edge("X", "A"));
}

#[test]
fn empty_children_of_a_pruned_cluster_are_detached() {
    let mut g = Graph::clustered("cluster");
    g.set_cluster("outer", None);
    g.set_cluster("inner", Some("outer"));
    g.set_node("a", member("outer"));

    g.remove_nodes_cluster_aware(&["a"]);
    assert_eq!(g.cluster_ids(), vec!["inner"]);
    assert_eq!(g.cluster_descendants("inner"), vec!["inner"]);

    // Re-registering `outer` must not resurrect the old nesting.
    g.set_cluster("outer", None);
    assert_eq!(g.cluster_descendants("outer"), vec!["outer"]);
}

#[test]
fn clear_cluster_attr_removes_it_everywhere() {
    let mut g = nested_graph();
    g.add_attr_to_cluster("outer", "fix-ranks", json!([["a"]]));
    g.add_attr_to_cluster("other", "fix-ranks", json!([["c"]]));
    g.add_attr_to_cluster("other", "label", json!("kept"));

    g.clear_cluster_attr("fix-ranks");
    for c in ["outer", "inner", "other"] {
        assert!(
            g.cluster_attrs(c).is_some_and(|a| !a.contains_key("fix-ranks")),
            "{c}"
        );
    }
    assert_eq!(
        g.cluster_attrs("other").and_then(|a| a.get("label")),
        Some(&json!("kept"))
    );
}

#[test]
fn cluster_attrs_and_edge_graph_reset() {
    let mut g = nested_graph();
    g.add_attr_to_cluster("outer", "fix-ranks", json!([["a"]]));
    g.add_attr_to_cluster("missing", "x", json!(1));
    assert_eq!(
        g.cluster_attrs("outer").and_then(|a| a.get("fix-ranks")),
        Some(&json!([["a"]]))
    );

    g.delete_edge_graph();
    assert_eq!(g.edge_graph().map(Graph::edge_count), Some(0));
}

#[test]
fn plain_graphs_ignore_cluster_operations() {
    let mut g = Graph::new();
    g.set_node("a", member("x"));
    g.set_cluster("x", None);
    g.add_cluster_edge("x", "y");

    assert!(!g.is_clustered());
    assert_eq!(g.cluster_of("a"), None);
    assert!(g.cluster_ids().is_empty());
    assert!(g.edge_graph().is_none());
    assert_eq!(g.remove_nodes_cluster_aware(&["a"]), 1);
}
