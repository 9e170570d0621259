//! Undirected-fixup initial partitioner (spec.md §4.4.2, k = 2 only): run an
//! external undirected 2-way partitioner (which may produce a partition
//! whose quotient graph is cyclic between blocks 0 and 1), then repair
//! acyclicity by trying the four ways to break whichever quotient edge
//! exists and keeping the cheapest by the km1 metric.
//!
//! `createPartitionSnapshot`'s source bug (pushing node ids instead of
//! block ids) is fixed here: the snapshot is `part_id(hn)` per live node in
//! node-iteration order.

use fixedbitset::FixedBitSet;

use crate::config::Config;
use crate::external::InitialPartitioner;
use crate::hypergraph::{BlockId, Hypergraph, NodeId};
use crate::metrics::{km1, PartitioningStats};
use crate::partition::Partition;

/// An external undirected k-way partitioner this fixup runs as its first
/// phase. Production use is expected to supply a real ML-style/FM-refined
/// partitioner through this trait (spec.md's Non-goals exclude its
/// implementation from this core).
pub trait UndirectedPartitioner {
    fn partition(&mut self, hg: &mut Hypergraph, partition: &mut Partition, config: &Config);
}

/// A trivial stand-in used only by this crate's own tests: alternates nodes
/// between block 0 and block 1 in node-iteration order. Not balanced or
/// quality-aware; it exists solely so
/// [`AcyclicUndirectedFixupPartitioner`] is exercisable end-to-end without a
/// real undirected partitioner.
#[derive(Debug, Default)]
pub struct GreedyStripePartitioner;

impl UndirectedPartitioner for GreedyStripePartitioner {
    fn partition(&mut self, hg: &mut Hypergraph, partition: &mut Partition, _config: &Config) {
        for (i, node) in hg.nodes().collect::<Vec<_>>().into_iter().enumerate() {
            partition.assign(hg, node, (i % 2) as BlockId);
        }
    }
}

/// Runs `U` to produce a possibly-cyclic 2-way partition, then repairs
/// acyclicity by breaking whichever of the (0,1)/(1,0) quotient edges
/// exists, keeping whichever of the four break strategies yields the
/// lowest km1.
#[derive(Debug, Default)]
pub struct AcyclicUndirectedFixupPartitioner<U> {
    pub undirected: U,
}

impl<U: UndirectedPartitioner> InitialPartitioner for AcyclicUndirectedFixupPartitioner<U> {
    fn partition(
        &mut self,
        hg: &mut Hypergraph,
        partition: &mut Partition,
        config: &Config,
    ) -> PartitioningStats {
        assert_eq!(config.initial_partitioning.k, 2, "undirected fixup is k=2 only");

        self.undirected.partition(hg, partition, config);

        let live_nodes: Vec<NodeId> = hg.nodes().collect();
        let original = create_partition_snapshot(hg, &live_nodes);

        let mut best: Option<(u64, Vec<BlockId>)> = None;
        for &(u, v) in &[(0i32, 1i32), (1i32, 0i32)] {
            for &direction in &[false, true] {
                break_quotient_graph_edge(hg, &live_nodes, u, v, direction);
                let candidate_km1 = km1(hg);
                let candidate = create_partition_snapshot(hg, &live_nodes);
                if best.as_ref().map_or(true, |&(best_km1, _)| candidate_km1 < best_km1) {
                    best = Some((candidate_km1, candidate));
                }
                restore_partition_snapshot(hg, &live_nodes, &original);
            }
        }

        let (_, winner) = best.expect("four candidates are always produced");
        restore_partition_snapshot(hg, &live_nodes, &winner);
        partition.rebuild(hg);

        PartitioningStats::compute_with_bounds(
            hg,
            partition,
            &config.initial_partitioning.upper_allowed_partition_weight,
        )
    }
}

/// `part_id(hn)` for each of `live_nodes`, in the given order.
fn create_partition_snapshot(hg: &Hypergraph, live_nodes: &[NodeId]) -> Vec<BlockId> {
    live_nodes.iter().map(|&n| hg.part_id(n)).collect()
}

fn restore_partition_snapshot(hg: &mut Hypergraph, live_nodes: &[NodeId], snapshot: &[BlockId]) {
    for (&n, &part) in live_nodes.iter().zip(snapshot.iter()) {
        let current = hg.part_id(n);
        if current != part {
            hg.change_node_part(n, current, part);
        }
    }
}

/// `direction == false`: starting from every node currently in `v`, follow
/// tail-side predecessors (nodes `t` such that some hyperedge has `t` as a
/// tail and the current node as a head) transitively while they are still
/// in `u`, moving each one into `v`.
///
/// `direction == true`: starting from every node currently in `u`, follow
/// head-side successors (nodes `h` such that some hyperedge has the current
/// node as a tail and `h` as a head) transitively while they are still in
/// `u`, moving each one into `v`.
///
/// Either way this eliminates every pin pair that contributed the `u -> v`
/// quotient edge.
fn break_quotient_graph_edge(hg: &mut Hypergraph, live_nodes: &[NodeId], u: BlockId, v: BlockId, direction: bool) {
    let mut visited = FixedBitSet::with_capacity(hg.initial_num_nodes());
    let mut queue: Vec<NodeId> = if direction {
        live_nodes.iter().copied().filter(|&n| hg.part_id(n) == u).collect()
    } else {
        live_nodes.iter().copied().filter(|&n| hg.part_id(n) == v).collect()
    };
    for &n in &queue {
        visited.insert(n);
    }

    while let Some(w) = queue.pop() {
        let neighbors: Vec<NodeId> = if direction {
            hg.incident_tail_edges(w)
                .iter()
                .flat_map(|&he| hg.head_pins(he).to_vec())
                .collect()
        } else {
            hg.incident_head_edges(w)
                .iter()
                .flat_map(|&he| hg.tail_pins(he).to_vec())
                .collect()
        };

        for n in neighbors {
            if visited.contains(n) {
                continue;
            }
            if hg.part_id(n) == u {
                let current = hg.part_id(n);
                hg.change_node_part(n, current, v);
                visited.insert(n);
                queue.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CoarseningAlgorithm, CoarseningConfig, InitialPartitionerAlgorithm, InitialPartitioningConfig,
        LocalSearchConfig, PartitionConfig, PartitionMode, PreprocessingConfig, RefinementAlgorithm,
    };

    fn c17() -> Hypergraph {
        Hypergraph::new(
            11,
            &[0, 3, 6, 9, 12, 15, 18],
            &[0, 2, 7, 1, 8, 2, 2, 10, 4, 3, 5, 1, 5, 6, 10, 9, 1, 0],
            &[1, 1, 1, 1, 1, 1],
            &[1, 1, 1, 1, 1, 1],
        )
    }

    fn config() -> Config {
        Config {
            partition: PartitionConfig {
                k: 2,
                mode: PartitionMode::DirectKway,
                seed: 7,
            },
            preprocessing: PreprocessingConfig::default(),
            coarsening: CoarseningConfig {
                algorithm: CoarseningAlgorithm::MlStyle,
            },
            initial_partitioning: InitialPartitioningConfig {
                k: 2,
                mode: PartitionMode::DirectKway,
                algo: InitialPartitionerAlgorithm::Pool,
                unassigned_part: None,
                perfect_balance_partition_weight: vec![6, 5],
                upper_allowed_partition_weight: vec![u64::MAX, u64::MAX],
                local_search: LocalSearchConfig {
                    algorithm: RefinementAlgorithm::TwowayFm,
                },
            },
            local_search: LocalSearchConfig {
                algorithm: RefinementAlgorithm::TwowayFm,
            },
        }
    }

    #[test]
    fn every_node_ends_up_assigned_to_a_valid_block() {
        let mut hg = c17();
        let cfg = config();
        let mut partition = Partition::new(2);
        let mut partitioner = AcyclicUndirectedFixupPartitioner {
            undirected: GreedyStripePartitioner,
        };
        partitioner.partition(&mut hg, &mut partition, &cfg);

        for n in hg.nodes() {
            let p = hg.part_id(n);
            assert!(p == 0 || p == 1);
        }
    }

    #[test]
    fn snapshot_round_trips_through_restore() {
        let mut hg = c17();
        for (i, n) in hg.nodes().collect::<Vec<_>>().into_iter().enumerate() {
            hg.set_node_part(n, (i % 2) as BlockId);
        }
        let live: Vec<NodeId> = hg.nodes().collect();
        let snap = create_partition_snapshot(&hg, &live);
        hg.change_node_part(live[0], hg.part_id(live[0]), 1 - hg.part_id(live[0]));
        restore_partition_snapshot(&mut hg, &live, &snap);
        assert_eq!(create_partition_snapshot(&hg, &live), snap);
    }
}
