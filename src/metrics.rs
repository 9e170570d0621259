//! Partition-quality metrics and the best-effort result envelope returned by
//! an [`crate::external::InitialPartitioner`].

use crate::hypergraph::Hypergraph;
use crate::partition::Partition;

/// The km1 connectivity metric: for each live hyperedge, `(blocks spanned) -
/// 1`, summed over all live hyperedges and weighted by edge weight.
///
/// A hyperedge fully contained in one block contributes 0; one spanning `c`
/// distinct blocks contributes `(c - 1) * edge_weight`.
pub fn km1(hg: &Hypergraph) -> u64 {
    let mut total = 0u64;
    for e in hg.edges() {
        let blocks: std::collections::HashSet<_> = hg
            .head_pins(e)
            .iter()
            .chain(hg.tail_pins(e).iter())
            .map(|&n| hg.part_id(n))
            .collect();
        if blocks.len() > 1 {
            total += (blocks.len() as u64 - 1) * hg.edge_weight(e);
        }
    }
    total
}

/// Outcome of an initial-partitioning attempt: the partitioner always
/// returns a complete assignment, but `feasible` says whether every block
/// weight constraint was actually satisfied (spec.md's infeasibility is
/// surfaced this way, never as an error).
#[derive(Debug, Clone)]
pub struct PartitioningStats {
    pub km1: u64,
    pub feasible: bool,
}

impl PartitioningStats {
    /// Compute stats against explicit per-block upper bounds, as an initial
    /// partitioner's `upper_allowed_partition_weight` config demands rather
    /// than a uniform epsilon.
    pub fn compute_with_bounds(hg: &Hypergraph, partition: &Partition, upper_allowed: &[u64]) -> Self {
        let feasible = (0..partition.k())
            .all(|b| partition.weight(b as crate::hypergraph::BlockId) <= upper_allowed[b]);
        PartitioningStats { km1: km1(hg), feasible }
    }
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
    fn km1_zero_for_single_block() {
        let mut hg = c17();
        for n in hg.nodes().collect::<Vec<_>>() {
            hg.set_node_part(n, 0);
        }
        assert_eq!(km1(&hg), 0);
    }

    #[test]
    fn km1_counts_spanned_blocks_minus_one() {
        let mut hg = c17();
        for n in [0, 2, 3, 5, 7, 9] {
            hg.set_node_part(n, 0);
        }
        for n in [1, 4, 6, 8, 10] {
            hg.set_node_part(n, 1);
        }
        // edge 0: head 0 (block 0), tails 2, 7 (block 0) -> not spanned.
        // edge 1: head 1 (block 1), tails 8 (block 1), 2 (block 0) -> spanned.
        assert!(km1(&hg) > 0);
    }
}
