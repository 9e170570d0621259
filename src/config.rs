//! Configuration surface: a struct of small closed enums, built
//! programmatically by the embedding framework. Parsing a config file or CLI
//! arguments is out of scope here (spec.md's Non-goals) and stays with that
//! framework; this module only defines the shape the framework hands in.

use crate::hypergraph::BlockId;

/// Top-level configuration for one partitioning run.
#[derive(Debug, Clone)]
pub struct Config {
    pub partition: PartitionConfig,
    pub preprocessing: PreprocessingConfig,
    pub coarsening: CoarseningConfig,
    pub initial_partitioning: InitialPartitioningConfig,
    pub local_search: LocalSearchConfig,
}

#[derive(Debug, Clone)]
pub struct PartitionConfig {
    pub k: u32,
    pub mode: PartitionMode,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionMode {
    DirectKway,
    RecursiveBisection,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PreprocessingConfig {
    pub enable_min_hash_sparsifier: bool,
    pub enable_community_detection: bool,
}

#[derive(Debug, Clone)]
pub struct CoarseningConfig {
    pub algorithm: CoarseningAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoarseningAlgorithm {
    MlStyle,
    Other(String),
}

#[derive(Debug, Clone)]
pub struct InitialPartitioningConfig {
    pub k: u32,
    pub mode: PartitionMode,
    pub algo: InitialPartitionerAlgorithm,
    /// If `Some(b)`, unassignable nodes fall back to block `b` rather than
    /// being left at [`crate::hypergraph::UNASSIGNED`].
    pub unassigned_part: Option<BlockId>,
    pub perfect_balance_partition_weight: Vec<u64>,
    pub upper_allowed_partition_weight: Vec<u64>,
    pub local_search: LocalSearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialPartitionerAlgorithm {
    Pool,
    Other(String),
}

#[derive(Debug, Clone)]
pub struct LocalSearchConfig {
    pub algorithm: RefinementAlgorithm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinementAlgorithm {
    TwowayFm,
    TwowayFmHyperflowCutter,
    Other(String),
}
