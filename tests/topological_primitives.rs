//! S5 from spec.md §8: the c17 benchmark hypergraph's topological ordering
//! has full length and respects tail-before-head order on every hyperedge,
//! plus the pure-function invariants of spec.md §4.2/§8 invariant 4.

use dhgp_acyclic::hypergraph::Hypergraph;
use dhgp_acyclic::topo::{check_acyclic, inverted_topological_ordering, reverse_top_levels, top_levels, topological_ordering};

/// 11 nodes, 6 hyperedges, 1 head + 2 tails per edge, head listed first in
/// each edge's pin range (matches spec.md §8 S5).
fn c17() -> Hypergraph {
    Hypergraph::new(
        11,
        &[0, 3, 6, 9, 12, 15, 18],
        &[0, 2, 7, 1, 8, 2, 2, 10, 4, 3, 5, 1, 5, 6, 10, 9, 1, 0],
        &[1, 1, 1, 1, 1, 1],
        &[1, 1, 1, 1, 1, 1],
    )
}

#[test]
fn s5_c17_topological_ordering_has_full_length_and_respects_direction() {
    let hg = c17();
    let topord = topological_ordering(&hg, false);
    assert_eq!(topord.len(), 11);

    let mut pos = vec![0usize; hg.initial_num_nodes()];
    for (i, &u) in topord.iter().enumerate() {
        pos[u] = i;
    }
    for he in hg.edges() {
        for &tail in hg.tail_pins(he) {
            for &head in hg.head_pins(he) {
                assert!(
                    pos[tail] < pos[head],
                    "edge {he}: tail {tail} (pos {}) must precede head {head} (pos {})",
                    pos[tail],
                    pos[head]
                );
            }
        }
    }
}

#[test]
fn inverted_ordering_is_consistent_with_ordering() {
    let hg = c17();
    let topord = topological_ordering(&hg, false);
    let inverted = inverted_topological_ordering(&hg, false);
    for (i, &u) in topord.iter().enumerate() {
        assert_eq!(inverted[u], i);
    }
}

#[test]
fn acyclic_hypergraph_is_reported_acyclic() {
    assert!(check_acyclic(&c17()));
}

#[test]
fn cyclic_hypergraph_is_reported_cyclic() {
    // 0 -> 1 -> 0: edge 0 has head 1 / tail 0, edge 1 has head 0 / tail 1.
    let hg = Hypergraph::new(2, &[0, 2, 4], &[1, 0, 0, 1], &[1, 1], &[1, 1]);
    assert!(!check_acyclic(&hg));
}

#[test]
fn top_levels_increase_along_every_edge() {
    let hg = c17();
    let levels = top_levels(&hg);
    for he in hg.edges() {
        for &tail in hg.tail_pins(he) {
            for &head in hg.head_pins(he) {
                assert!(levels[head] > levels[tail]);
            }
        }
    }
}

#[test]
fn reverse_top_levels_also_increase_along_every_edge() {
    // reverse_top_levels flips a head->tail longest path by `max_level -
    // level`, which keeps every tail's value strictly below its head's (the
    // flip changes the scale assigned to each node, not their relative
    // tail/head order).
    let hg = c17();
    let levels = reverse_top_levels(&hg);
    for he in hg.edges() {
        for &tail in hg.tail_pins(he) {
            for &head in hg.head_pins(he) {
                assert!(levels[tail] < levels[head]);
            }
        }
    }
}
