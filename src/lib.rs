//! Acyclicity-preservation core for directed-hypergraph partitioning.
//!
//! This crate maintains the invariant that a k-way partition of a directed
//! hypergraph induces an acyclic quotient graph over its blocks, across
//! incremental node moves, hyperedge contraction/uncontraction and removal.
//! It provides:
//!
//!   - [`hypergraph`]: the directed hypergraph model itself.
//!   - [`cycle`]: three interchangeable incremental cycle detectors over a
//!     plain directed graph (Kahn-ordering, DFS reachability, Bender et
//!     al.'s pseudo-topological order).
//!   - [`topo`]: pure topological primitives over a hypergraph (ordering,
//!     top-levels, acyclicity check).
//!   - [`quotient`]: the quotient graph itself, parameterized over one of
//!     the three cycle detectors.
//!   - [`initial_partitioning`]: two acyclic initial partitioners
//!     (topological-sweep, undirected-fixup).
//!   - [`partition`]: per-block weight bookkeeping.
//!   - [`external`]: the `Coarsener`/`InitialPartitioner`/`Refiner` traits a
//!     driver plugs this core into.
//!   - [`config`], [`error`], [`metrics`]: ambient configuration, error and
//!     quality-metric surface.
//!
//! Scheduling is single-threaded and synchronous throughout: every public
//! operation runs to completion before returning, and nothing here spawns a
//! thread or suspends.

pub mod config;
pub mod cycle;
pub mod error;
pub mod external;
pub mod hypergraph;
pub mod initial_partitioning;
pub mod metrics;
pub mod partition;
pub mod quotient;
pub mod topo;

pub use cycle::{CycleDetector, DfsCycleDetector, KahnCycleDetector, PseudoTopologicalCycleDetector};
pub use error::CoreError;
pub use hypergraph::{BlockId, EdgeId, Hypergraph, NodeId, UNASSIGNED};
pub use partition::Partition;
pub use quotient::QuotientGraph;
