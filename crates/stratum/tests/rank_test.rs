use stratum::graphlib::{Attrs, Graph};
use stratum::rank::{assign_ranks, cluster_ranks, max_rank};
use stratum::traversal::roots;

fn ranks_of(g: &Graph) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = assign_ranks(g).into_iter().collect();
    out.sort();
    out
}

fn pairs(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = expected
        .iter()
        .map(|&(v, r)| (v.to_string(), r))
        .collect();
    out.sort();
    out
}

#[test]
fn roots_get_rank_zero_and_every_reachable_node_is_ranked() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "c"]);
    g.set_path(&["x", "c"]);
    g.ensure_node("lonely");

    let ranks = assign_ranks(&g);
    for root in roots(&g) {
        assert_eq!(ranks.get(root), Some(&0), "root {root}");
    }
    assert_eq!(ranks.len(), g.node_count());
}

#[test]
fn self_loops_do_not_inflate_ranks() {
    let mut g = Graph::new();
    g.set_path(&["root", "A", "B", "C"]);
    g.set_edge("A", "A");

    assert_eq!(
        ranks_of(&g),
        pairs(&[("root", 0), ("A", 1), ("B", 2), ("C", 3)])
    );
}

#[test]
fn tree_edges_step_down_exactly_one_rank() {
    let mut g = Graph::new();
    g.set_path(&["r", "a", "b"]);
    g.set_path(&["r", "c", "d"]);
    g.set_path(&["c", "e"]);

    let ranks = assign_ranks(&g);
    for key in g.edge_keys() {
        assert_eq!(ranks[key.w.as_str()], ranks[key.v.as_str()] + 1, "{key}");
    }
}

#[test]
fn later_roots_push_shared_descendants_down() {
    let mut g = Graph::new();
    g.set_edge("r1", "x");
    g.set_path(&["r2", "y", "x"]);

    assert_eq!(ranks_of(&g), pairs(&[("r1", 0), ("x", 2), ("r2", 0), ("y", 1)]));
}

#[test]
fn a_longer_path_found_after_expansion_is_not_propagated() {
    // `d` is expanded straight from `a` before the `b -> c -> d` branch reaches it.
    let mut g = Graph::new();
    g.set_path(&["a", "b", "c", "d"]);
    g.set_edge("a", "d");
    assert_eq!(
        ranks_of(&g),
        pairs(&[("a", 0), ("b", 1), ("c", 2), ("d", 1)])
    );

    // With the shortcut inserted first, the long branch is walked before `d` is expanded.
    let mut g = Graph::new();
    g.set_edge("a", "d");
    g.set_path(&["a", "b", "c", "d"]);
    assert_eq!(
        ranks_of(&g),
        pairs(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)])
    );
}

#[test]
fn ranks_gansner_graph() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);

    assert_eq!(
        ranks_of(&g),
        pairs(&[
            ("a", 0),
            ("b", 1),
            ("c", 2),
            ("d", 3),
            ("e", 1),
            ("f", 1),
            ("g", 2),
            ("h", 3),
        ])
    );
}

#[test]
fn nodes_on_a_rootless_cycle_stay_unranked() {
    let mut g = Graph::new();
    g.set_path(&["a", "b", "a"]);
    g.ensure_node("c");

    let ranks = assign_ranks(&g);
    assert_eq!(ranks.len(), 1);
    assert_eq!(ranks.get("c"), Some(&0));
    assert!(!ranks.contains_key("a"));
    assert!(!ranks.contains_key("b"));
}

#[test]
fn empty_graph_has_no_ranks() {
    let ranks = assign_ranks(&Graph::new());
    assert!(ranks.is_empty());
    assert_eq!(max_rank(&ranks), None);
}

#[test]
fn cluster_ranks_follow_the_cluster_edge_graph() {
    let mut g = Graph::clustered("cluster");
    g.add_cluster_edge("A", "B");
    g.add_cluster_edge("B", "C");

    let ranks = cluster_ranks(&g);
    assert_eq!(ranks.get("A"), Some(&0));
    assert_eq!(ranks.get("B"), Some(&1));
    assert_eq!(ranks.get("C"), Some(&2));
    assert_eq!(max_rank(&ranks), Some(2));

    let mut plain = Graph::new();
    plain.set_node("A", Attrs::new());
    assert!(cluster_ranks(&plain).is_empty());
}
