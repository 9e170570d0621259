//! Topological-sweep initial partitioner (spec.md §4.4.1): walk a randomized
//! topological order of the hypergraph, assigning a run of nodes to each
//! block in turn and advancing to the next block once the current one
//! exceeds its perfect-balance share. Every edge of a topological sweep
//! necessarily runs from an earlier block to a later one (or stays
//! internal), so the result is acyclic by construction — no cycle detector
//! is consulted at all.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::external::InitialPartitioner;
use crate::hypergraph::{BlockId, Hypergraph};
use crate::metrics::PartitioningStats;
use crate::partition::Partition;
use crate::topo::topological_ordering_with;

/// Assigns blocks by walking `topological_ordering(hg, randomize = true)`
/// and advancing the current block whenever it exceeds its perfect-balance
/// weight, seeded reproducibly from `config.partition.seed`.
#[derive(Debug, Default)]
pub struct TopoSweepPartitioner;

impl InitialPartitioner for TopoSweepPartitioner {
    fn partition(
        &mut self,
        hg: &mut Hypergraph,
        partition: &mut Partition,
        config: &Config,
    ) -> PartitioningStats {
        let k = config.initial_partitioning.k as usize;
        assert_eq!(partition.k(), k);
        let perfect = &config.initial_partitioning.perfect_balance_partition_weight;
        assert_eq!(perfect.len(), k);

        let mut rng = StdRng::seed_from_u64(config.partition.seed);
        let ordering = topological_ordering_with(hg, true, &mut rng);
        assert_eq!(
            ordering.len(),
            hg.current_num_nodes(),
            "topological sweep requires an acyclic hypergraph"
        );

        let mut p: usize = 0;
        for node in ordering {
            while p + 1 < k && partition.weight(p as BlockId) > perfect[p] {
                p += 1;
            }
            debug_assert!(p < k);
            partition.assign(hg, node, p as BlockId);
        }

        PartitioningStats::compute_with_bounds(
            hg,
            partition,
            &config.initial_partitioning.upper_allowed_partition_weight,
        )
    }
}
