//! Pure topological primitives over a [`Hypergraph`]. None of these mutate
//! their input; each allocates a fresh output vector. Ported from
//! `kahypar/partition/dhgp/topord.h`.

use rand::Rng;

use crate::hypergraph::{Hypergraph, NodeId};

/// Kahn-like sweep over the hypergraph's tail->head direction.
///
/// `rank[v]` starts at the sum, over `v`'s incident head-edges, of that
/// edge's tail count; a node becomes a candidate once its rank drops to
/// zero (every incident head-edge has had all its tails emitted). When
/// `randomize` is `true` the next candidate is drawn uniformly from the
/// current pool; otherwise emission is LIFO.
///
/// If `hg` is cyclic, the returned sequence is shorter than
/// `hg.current_num_nodes()`.
pub fn topological_ordering(hg: &Hypergraph, randomize: bool) -> Vec<NodeId> {
    let mut rng = rand::thread_rng();
    topological_ordering_with(hg, randomize, &mut rng)
}

/// As [`topological_ordering`], but drawing randomization from the
/// supplied RNG (used by the initial partitioners so a run is reproducible
/// from `partition.seed`).
pub fn topological_ordering_with(
    hg: &Hypergraph,
    randomize: bool,
    rng: &mut impl Rng,
) -> Vec<NodeId> {
    let mut rank = vec![0usize; hg.initial_num_nodes()];
    for he in hg.edges() {
        let tails = hg.edge_num_tail_pins(he);
        for &hh in hg.head_pins(he) {
            rank[hh] += tails;
        }
    }

    let mut candidates: Vec<NodeId> = hg.nodes().filter(|&hn| rank[hn] == 0).collect();
    let mut ordering = Vec::with_capacity(hg.current_num_nodes());

    while !candidates.is_empty() {
        if randomize {
            let idx = rng.gen_range(0..candidates.len());
            let last = candidates.len() - 1;
            candidates.swap(idx, last);
        }
        let u = candidates.pop().unwrap();
        ordering.push(u);

        for &he in hg.incident_tail_edges(u) {
            for &hh in hg.head_pins(he) {
                debug_assert!(rank[hh] > 0);
                rank[hh] -= 1;
                if rank[hh] == 0 {
                    candidates.push(hh);
                }
            }
        }
    }

    ordering
}

/// `pos[topological_ordering(hg, randomize)[i]] = i`.
pub fn inverted_topological_ordering(hg: &Hypergraph, randomize: bool) -> Vec<usize> {
    let topord = topological_ordering(hg, randomize);
    let mut inverted = vec![0usize; hg.initial_num_nodes()];
    for (i, &u) in topord.iter().enumerate() {
        inverted[u] = i;
    }
    inverted
}

/// `true` iff `hg` has no directed cycle among its live nodes/hyperedges.
pub fn check_acyclic(hg: &Hypergraph) -> bool {
    topological_ordering(hg, false).len() == hg.current_num_nodes()
}

/// Longest path length in the tail->head direction, per node, computed in
/// one topological sweep: for each `u` in topological order, for each `v`
/// reached via an incident tail-edge's head pins,
/// `level[v] = max(level[v], level[u] + 1)`.
pub fn top_levels(hg: &Hypergraph) -> Vec<usize> {
    let topord = topological_ordering(hg, false);
    let mut levels = vec![0usize; hg.initial_num_nodes()];

    for u in topord {
        for &he in hg.incident_tail_edges(u) {
            for &v in hg.head_pins(he) {
                levels[v] = levels[v].max(levels[u] + 1);
            }
        }
    }

    levels
}

/// Head->tail longest path, then flipped: `max_level - level[·]`.
pub fn reverse_top_levels(hg: &Hypergraph) -> Vec<usize> {
    let mut topord = topological_ordering(hg, false);
    topord.reverse();
    let mut levels = vec![0usize; hg.initial_num_nodes()];
    let mut max_level = 0usize;

    for u in topord {
        for &he in hg.incident_head_edges(u) {
            for &v in hg.tail_pins(he) {
                levels[v] = levels[v].max(levels[u] + 1);
                max_level = max_level.max(levels[v]);
            }
        }
    }

    for level in &mut levels {
        *level = max_level - *level;
    }
    levels
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn topord_has_full_length_and_is_topological() {
        let hg = c17();
        let topord = topological_ordering(&hg, false);
        assert_eq!(topord.len(), hg.initial_num_nodes());

        let mut already_seen = std::collections::HashSet::new();
        for &u in &topord {
            for &he in hg.incident_tail_edges(u) {
                for &v in hg.head_pins(he) {
                    assert!(!already_seen.contains(&v));
                }
            }
            already_seen.insert(u);
        }
        assert_eq!(already_seen.len(), hg.initial_num_nodes());
    }

    #[test]
    fn inverted_topord_orders_tail_before_head() {
        let hg = c17();
        let inverted = inverted_topological_ordering(&hg, false);
        assert_eq!(inverted.len(), hg.initial_num_nodes());
        for u in hg.nodes() {
            for &he in hg.incident_tail_edges(u) {
                for &v in hg.head_pins(he) {
                    assert!(inverted[u] < inverted[v]);
                }
            }
        }
    }

    #[test]
    fn c17_is_acyclic() {
        let hg = c17();
        assert!(check_acyclic(&hg));
    }

    #[test]
    fn randomized_ordering_is_still_a_full_valid_topological_order() {
        let hg = c17();
        for _ in 0..20 {
            let topord = topological_ordering(&hg, true);
            assert_eq!(topord.len(), hg.initial_num_nodes());
            let mut pos = vec![0usize; hg.initial_num_nodes()];
            for (i, &u) in topord.iter().enumerate() {
                pos[u] = i;
            }
            for u in hg.nodes() {
                for &he in hg.incident_tail_edges(u) {
                    for &v in hg.head_pins(he) {
                        assert!(pos[u] < pos[v]);
                    }
                }
            }
        }
    }

    #[test]
    fn cyclic_hypergraph_yields_short_ordering() {
        // Two nodes, two edges forming a 2-cycle: 0 -> 1 (head 1, tail 0)
        // and 1 -> 0 (head 0, tail 1).
        let hg = Hypergraph::new(2, &[0, 2, 4], &[1, 0, 0, 1], &[1, 1], &[1, 1]);
        assert!(!check_acyclic(&hg));
        assert!(topological_ordering(&hg, false).len() < hg.current_num_nodes());
    }
}
