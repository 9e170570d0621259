//! External interface contracts: the three traits a driver plugs into this
//! core (`Coarsener`, `InitialPartitioner`, `Refiner`), plus the minimal
//! test-only stand-ins used by this crate's own test suite. Associated ids
//! are the crate's own type aliases (`NodeId = usize`, `BlockId = i32`)
//! rather than generics, matching the original's direct use of
//! `HypernodeID`/`PartitionID` typedefs.

use crate::config::Config;
use crate::hypergraph::{BlockId, ContractionMemento, Hypergraph, NodeId};
use crate::metrics::PartitioningStats;
use crate::partition::Partition;

/// A single accepted or candidate node move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub node: NodeId,
    pub from: BlockId,
    pub to: BlockId,
}

/// The set of nodes whose incident-edge neighborhood changed as a result of
/// one uncontraction step, handed to the refiner so it knows which gains to
/// recompute rather than rescanning the whole hypergraph.
#[derive(Debug, Clone, Default)]
pub struct UncontractionChanges {
    pub touched_nodes: Vec<NodeId>,
}

/// Coarsens a hypergraph by repeated contraction, then reverses the process
/// one batch at a time, calling a [`Refiner`] after each unbatch.
pub trait Coarsener {
    /// Coarsen `hg` until `hg.current_num_nodes() <= limit`, recording every
    /// contraction so [`Self::uncoarsen`] can reverse it.
    fn coarsen(&mut self, hg: &mut Hypergraph, limit: usize);

    /// Reverse every contraction made by [`Self::coarsen`], from the most
    /// recent backward, invoking `refiner` after each unbatch.
    fn uncoarsen(&mut self, hg: &mut Hypergraph, partition: &mut Partition, refiner: &mut dyn Refiner);

    /// A stable identifier for this coarsening policy, for logs.
    fn policy_string(&self) -> &str;
}

/// Assigns a block to every live node of an (already maximally coarsened)
/// hypergraph such that the resulting quotient graph is acyclic and every
/// block's weight respects `upper_allowed_partition_weight`.
pub trait InitialPartitioner {
    fn partition(
        &mut self,
        hg: &mut Hypergraph,
        partition: &mut Partition,
        config: &Config,
    ) -> PartitioningStats;
}

/// Local search over an already-feasible partition.
pub trait Refiner {
    /// One-time setup before the first [`Self::refine`] call, given the
    /// maximum gain any single move in this run could have.
    fn initialize(&mut self, max_gain: i64);

    /// Attempt to improve the partition restricted to `nodes`. Returns
    /// `true` iff any accepted move improved the metric recorded in
    /// `metrics`.
    fn refine(
        &mut self,
        hg: &mut Hypergraph,
        partition: &mut Partition,
        nodes: &[NodeId],
        max_allowed_weights: &[u64],
        uncontraction_changes: &UncontractionChanges,
        metrics: &mut PartitioningStats,
    ) -> bool;

    /// Apply `moves` to `hg`/`partition` and update any internal gain cache,
    /// appending newly-relevant nodes to `refinement_nodes`.
    fn perform_moves_and_update_cache(
        &mut self,
        hg: &mut Hypergraph,
        partition: &mut Partition,
        moves: &[Move],
        refinement_nodes: &mut Vec<NodeId>,
        changes: &UncontractionChanges,
    );

    /// Undo every move made since the last [`Self::initialize`]/rollback,
    /// returning them in undo order.
    fn rollback(&mut self) -> Vec<Move>;
}

/// A coarsener that performs no contractions; used to exercise
/// [`Coarsener::uncoarsen`]'s refiner-invocation contract in isolation.
#[derive(Debug, Default)]
pub struct NullCoarsener {
    mementos: Vec<ContractionMemento>,
}

impl Coarsener for NullCoarsener {
    fn coarsen(&mut self, _hg: &mut Hypergraph, _limit: usize) {}

    fn uncoarsen(&mut self, hg: &mut Hypergraph, _partition: &mut Partition, refiner: &mut dyn Refiner) {
        while let Some(m) = self.mementos.pop() {
            hg.uncontract(m);
            let mut touched = Vec::new();
            refiner.perform_moves_and_update_cache(hg, _partition, &[], &mut touched, &UncontractionChanges::default());
        }
    }

    fn policy_string(&self) -> &str {
        "null"
    }
}

/// A refiner that never proposes a move; used to exercise
/// [`Coarsener::uncoarsen`] without pulling in a real local search.
#[derive(Debug, Default)]
pub struct StubRefiner;

impl Refiner for StubRefiner {
    fn initialize(&mut self, _max_gain: i64) {}

    fn refine(
        &mut self,
        _hg: &mut Hypergraph,
        _partition: &mut Partition,
        _nodes: &[NodeId],
        _max_allowed_weights: &[u64],
        _uncontraction_changes: &UncontractionChanges,
        _metrics: &mut PartitioningStats,
    ) -> bool {
        false
    }

    fn perform_moves_and_update_cache(
        &mut self,
        _hg: &mut Hypergraph,
        _partition: &mut Partition,
        _moves: &[Move],
        _refinement_nodes: &mut Vec<NodeId>,
        _changes: &UncontractionChanges,
    ) {
    }

    fn rollback(&mut self) -> Vec<Move> {
        Vec::new()
    }
}
