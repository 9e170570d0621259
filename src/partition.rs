//! Per-block weight bookkeeping for a k-way partition of a [`Hypergraph`].
//!
//! The node->block assignment itself lives on [`Hypergraph`]
//! (`part_id`/`set_node_part`/`change_node_part`); `Partition` tracks the
//! aggregate that initial partitioners and refiners need on every candidate
//! move (per-block weight) without re-summing node weights from scratch
//! each time.

use crate::hypergraph::{BlockId, Hypergraph, NodeId};

/// Running per-block weight totals for a k-way partition.
#[derive(Debug, Clone)]
pub struct Partition {
    k: usize,
    block_weight: Vec<u64>,
}

impl Partition {
    /// An empty partition over `k` blocks, all at weight zero.
    pub fn new(k: usize) -> Self {
        Partition {
            k,
            block_weight: vec![0; k],
        }
    }

    /// Rebuild block weights from scratch by summing every live node's
    /// weight into its current block. Every live node of `hg` must already
    /// be assigned (no [`crate::hypergraph::UNASSIGNED`] nodes).
    pub fn rebuild(&mut self, hg: &Hypergraph) {
        self.block_weight.iter_mut().for_each(|w| *w = 0);
        for n in hg.nodes() {
            let part = hg.part_id(n);
            debug_assert_ne!(part, crate::hypergraph::UNASSIGNED);
            self.block_weight[part as usize] += hg.node_weight(n);
        }
    }

    /// Number of blocks.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Current weight of block `b`.
    pub fn weight(&self, b: BlockId) -> u64 {
        self.block_weight[b as usize]
    }

    /// Record that a previously-unassigned node of weight `w` has just been
    /// assigned to `to`.
    pub fn on_assign(&mut self, to: BlockId, w: u64) {
        self.block_weight[to as usize] += w;
    }

    /// Record that a node of weight `w` has just moved from `from` to `to`.
    pub fn on_move(&mut self, from: BlockId, to: BlockId, w: u64) {
        self.block_weight[from as usize] -= w;
        self.block_weight[to as usize] += w;
    }

    /// Record a node's first assignment on both `hg` and this partition.
    pub fn assign(&mut self, hg: &mut Hypergraph, node: NodeId, to: BlockId) {
        hg.set_node_part(node, to);
        self.on_assign(to, hg.node_weight(node));
    }

    /// Record a node's move on both `hg` and this partition.
    pub fn mv(&mut self, hg: &mut Hypergraph, node: NodeId, from: BlockId, to: BlockId) {
        hg.change_node_part(node, from, to);
        self.on_move(from, to, hg.node_weight(node));
    }
}
