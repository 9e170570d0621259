//! Acyclic initial partitioners: assign every live node a block such that
//! the resulting quotient graph is acyclic and balance constraints are
//! respected as closely as each strategy can manage on its own (final
//! balance/refinement is delegated to a [`crate::external::Refiner`]).

mod topo_sweep;
mod undirected_fixup;

pub use topo_sweep::TopoSweepPartitioner;
pub use undirected_fixup::{AcyclicUndirectedFixupPartitioner, GreedyStripePartitioner, UndirectedPartitioner};
