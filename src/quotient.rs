//! The quotient graph: a directed multigraph on `k` blocks summarizing a
//! partitioned hypergraph, maintained incrementally across node moves.
//! Ported and completed from `kahypar/partition/dhgp/quotient_graph.h`; two
//! of its three methods (`testAndUpdateBeforeMovement`,
//! `determineEdgeInsertionsDueToMovement`) were unimplemented or stubbed in
//! the source (spec.md §9) — this module implements the behavior that
//! SPEC_FULL.md §4.3 specifies for them.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::cycle::CycleDetector;
use crate::hypergraph::{BlockId as HgBlockId, EdgeId, Hypergraph, NodeId};

/// A block id within the quotient graph, always in `0..k`.
pub type Block = usize;

/// The quotient graph over a partitioned hypergraph, parameterized on the
/// cycle detector strategy used to screen candidate moves.
pub struct QuotientGraph<D: CycleDetector + Clone> {
    k: usize,
    n: usize,
    /// `adj[u * k + v]`: number of hyperedges contributing a u->v
    /// crossing (u == v counts hyperedges fully internal to block u).
    adj: Vec<u32>,
    /// `hn_conn[hn * k + p]`: count of `hn`'s incident directed pin-pairs
    /// whose other endpoint sits in block `p`.
    hn_conn: Vec<u32>,
    blocked_moves: HashSet<(NodeId, HgBlockId)>,
    cycle_detector: D,
    dirty: RefCell<bool>,
    cached_topord: RefCell<Vec<Block>>,
    cached_inverted_topord: RefCell<Vec<usize>>,
}

impl<D: CycleDetector + Clone> QuotientGraph<D> {
    /// Create an empty quotient graph over `k` blocks and `n` hypergraph
    /// nodes. Call [`Self::initialize`] before using it.
    pub fn new(n: usize, k: usize) -> Self {
        QuotientGraph {
            k,
            n,
            adj: vec![0; k * k],
            hn_conn: vec![0; n * k],
            blocked_moves: HashSet::new(),
            cycle_detector: D::new(k),
            dirty: RefCell::new(true),
            cached_topord: RefCell::new(Vec::new()),
            cached_inverted_topord: RefCell::new(Vec::new()),
        }
    }

    fn adj_at(&self, u: Block, v: Block) -> u32 {
        self.adj[u * self.k + v]
    }

    fn adj_set(&mut self, u: Block, v: Block, value: u32) {
        self.adj[u * self.k + v] = value;
    }

    fn hn_conn_at(&self, hn: NodeId, p: Block) -> u32 {
        self.hn_conn[hn * self.k + p]
    }

    fn hn_conn_add(&mut self, hn: NodeId, p: Block, delta: i64) {
        let idx = hn * self.k + p;
        self.hn_conn[idx] = (self.hn_conn[idx] as i64 + delta).max(0) as u32;
    }

    /// Rebuild `adj` and `hn_conn` from scratch, flush the blocked-move
    /// cache, reseed the cycle detector from `adj`, and recompute the
    /// topological order. Requires every live node of `hg` to have been
    /// assigned a block (no [`crate::hypergraph::UNASSIGNED`] nodes).
    pub fn initialize(&mut self, hg: &Hypergraph) {
        self.adj = vec![0; self.k * self.k];
        self.hn_conn = vec![0; self.n * self.k];

        for he in hg.edges() {
            for &(u, v) in edge_contributions(hg, he, None).iter() {
                let idx = u * self.k + v;
                self.adj[idx] += 1;
            }
            for &u in hg.tail_pins(he) {
                for &v in hg.head_pins(he) {
                    let pu = hg.part_id(u) as usize;
                    let pv = hg.part_id(v) as usize;
                    self.hn_conn_add(u, pv, 1);
                    self.hn_conn_add(v, pu, 1);
                }
            }
        }

        self.blocked_moves.clear();

        self.cycle_detector = D::new(self.k);
        let edges: Vec<(usize, usize)> = (0..self.k)
            .flat_map(|u| (0..self.k).map(move |v| (u, v)))
            .filter(|&(u, v)| u != v && self.adj_at(u, v) > 0)
            .collect();
        self.cycle_detector.bulk_connect(&edges);

        self.recompute_topological_ordering();
    }

    fn recompute_topological_ordering(&self) {
        let mut indegree = vec![0usize; self.k];
        for u in 0..self.k {
            for v in 0..self.k {
                if u != v && self.adj_at(u, v) > 0 {
                    indegree[v] += 1;
                }
            }
        }

        let mut candidates: Vec<Block> = (0..self.k).filter(|&u| indegree[u] == 0).collect();
        let mut topord = Vec::with_capacity(self.k);
        while let Some(u) = candidates.pop() {
            topord.push(u);
            for v in 0..self.k {
                if u != v && self.adj_at(u, v) > 0 {
                    indegree[v] -= 1;
                    if indegree[v] == 0 {
                        candidates.push(v);
                    }
                }
            }
        }
        assert_eq!(topord.len(), self.k, "quotient graph is not acyclic");

        let mut inverted = vec![0usize; self.k];
        for (pos, &u) in topord.iter().enumerate() {
            inverted[u] = pos;
        }

        *self.cached_topord.borrow_mut() = topord;
        *self.cached_inverted_topord.borrow_mut() = inverted;
        *self.dirty.borrow_mut() = false;
    }

    /// The cached topological order of `0..k`, recomputing first if the
    /// adjacency structure has changed since the last computation.
    pub fn topological_ordering(&self) -> Vec<Block> {
        if *self.dirty.borrow() {
            self.recompute_topological_ordering();
        }
        self.cached_topord.borrow().clone()
    }

    /// The inverse of [`Self::topological_ordering`]:
    /// `inverted[topological_ordering()[i]] == i`.
    pub fn inverted_topological_ordering(&self) -> Vec<usize> {
        if *self.dirty.borrow() {
            self.recompute_topological_ordering();
        }
        self.cached_inverted_topord.borrow().clone()
    }

    /// Per-edge contribution delta for moving `hn` from `from` to `to`,
    /// aggregated over every hyperedge incident to `hn`: positive entries
    /// are block pairs that gain a contribution, negative entries are
    /// block pairs that lose one.
    fn movement_delta(
        &self,
        hg: &Hypergraph,
        hn: NodeId,
        from: Block,
        to: Block,
    ) -> HashMap<(Block, Block), i64> {
        let mut delta: HashMap<(Block, Block), i64> = HashMap::new();
        for &he in hg
            .incident_head_edges(hn)
            .iter()
            .chain(hg.incident_tail_edges(hn).iter())
        {
            let before = edge_contributions(hg, he, Some((hn, from)));
            let after = edge_contributions(hg, he, Some((hn, to)));
            for &p in before.difference(&after) {
                *delta.entry(p).or_insert(0) -= 1;
            }
            for &p in after.difference(&before) {
                *delta.entry(p).or_insert(0) += 1;
            }
        }
        delta
    }

    /// Contract: returns `true` iff moving `hn` from its current block to
    /// `to` would not introduce a quotient-graph cycle and is not cached as
    /// blocked. Does **not** apply the move; the caller must apply the move
    /// to the hypergraph and then call [`Self::perform_movement`].
    ///
    /// Idempotent when called twice with the same arguments and no
    /// intervening structural change (the second call is a cache hit
    /// against `blocked_moves`).
    pub fn test_and_update_before_movement(&mut self, hg: &Hypergraph, hn: NodeId, to: HgBlockId) -> bool {
        let from = hg.part_id(hn);
        if from == to {
            return true;
        }
        if self.blocked_moves.contains(&(hn, to)) {
            return false;
        }

        let delta = self.movement_delta(hg, hn, from as usize, to as usize);

        let mut trial = self.cycle_detector.clone();
        let mut insertions = Vec::new();
        for (&(u, v), &d) in &delta {
            if u == v {
                continue;
            }
            let current = self.adj_at(u, v);
            if d < 0 && current as i64 + d <= 0 {
                trial.disconnect(u, v);
            } else if d > 0 && current == 0 {
                insertions.push((u, v));
            }
        }

        for (u, v) in insertions {
            if !trial.connect(u, v) {
                self.blocked_moves.insert((hn, to));
                return false;
            }
        }

        true
    }

    /// Commit a move already applied to `hg` (i.e. `hg.part_id(hn) == to`
    /// already holds): update `adj`, `hn_conn`, invalidate the topological
    /// order cache and flush the blocked-move cache.
    pub fn perform_movement(&mut self, hg: &Hypergraph, hn: NodeId, from: HgBlockId, to: HgBlockId) {
        debug_assert_eq!(hg.part_id(hn), to);
        let (from, to) = (from as usize, to as usize);

        let delta = self.movement_delta(hg, hn, from, to);
        let mut removals = Vec::new();
        let mut insertions = Vec::new();
        for (&(u, v), &d) in &delta {
            if u == v {
                let new = (self.adj_at(u, u) as i64 + d).max(0) as u32;
                self.adj_set(u, u, new);
                continue;
            }
            let old = self.adj_at(u, v);
            let new = (old as i64 + d).max(0) as u32;
            self.adj_set(u, v, new);
            if old == 0 && new > 0 {
                insertions.push((u, v));
            } else if old > 0 && new == 0 {
                removals.push((u, v));
            }
        }

        // Removals must land on the real cycle detector before insertions:
        // a move that both drops `from->to` and adds the reverse `to->from`
        // would otherwise have its insertion rejected (or silently desync
        // `adj` from the detector) depending on iteration order, since the
        // stale `from->to` edge is still present when the insertion runs.
        for (u, v) in removals {
            self.cycle_detector.disconnect(u, v);
        }
        for (u, v) in insertions {
            let accepted = self.cycle_detector.connect(u, v);
            debug_assert!(accepted, "performMovement committed a move that was not screened");
        }

        for &he in hg.incident_tail_edges(hn) {
            for &v in hg.head_pins(he) {
                self.hn_conn_add(v, from, -1);
                self.hn_conn_add(v, to, 1);
            }
        }
        for &he in hg.incident_head_edges(hn) {
            for &u in hg.tail_pins(he) {
                self.hn_conn_add(u, from, -1);
                self.hn_conn_add(u, to, 1);
            }
        }

        self.reset_quotient_edge_cache();
    }

    /// Invalidate the topological-order cache and flush `blocked_moves`;
    /// called whenever `adj`'s edge set changes.
    pub fn reset_quotient_edge_cache(&mut self) {
        *self.dirty.borrow_mut() = true;
        self.blocked_moves.clear();
    }

    /// Current count of hyperedges contributing a `u -> v` quotient edge
    /// (or, for `u == v`, fully internal to block `u`).
    pub fn adjacency(&self, u: Block, v: Block) -> u32 {
        self.adj_at(u, v)
    }

    /// `hn`'s incident pin-pair count crossing to block `p`.
    pub fn hn_connectivity(&self, hn: NodeId, p: Block) -> u32 {
        self.hn_conn_at(hn, p)
    }
}

/// The set of `(tail_block, head_block)` pairs that hyperedge `he`
/// contributes to the quotient graph, optionally overriding the block of
/// one node (used to compute "as if this node were still/already in block
/// X" without mutating the hypergraph). `u == v` entries mean `he` is (or
/// would be) fully internal to block `u`.
fn edge_contributions(
    hg: &Hypergraph,
    he: EdgeId,
    override_node: Option<(NodeId, Block)>,
) -> HashSet<(Block, Block)> {
    let block_of = |n: NodeId| -> Block {
        match override_node {
            Some((on, ob)) if on == n => ob,
            _ => hg.part_id(n) as usize,
        }
    };

    let tail_blocks: HashSet<Block> = hg.tail_pins(he).iter().map(|&n| block_of(n)).collect();
    let head_blocks: HashSet<Block> = hg.head_pins(he).iter().map(|&n| block_of(n)).collect();

    let mut pairs = HashSet::new();
    for &u in &tail_blocks {
        for &v in &head_blocks {
            if u != v {
                pairs.insert((u, v));
            }
        }
    }

    let all_blocks: HashSet<Block> = tail_blocks.union(&head_blocks).copied().collect();
    if all_blocks.len() == 1 {
        let b = *all_blocks.iter().next().unwrap();
        pairs.insert((b, b));
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::KahnCycleDetector;

    fn c17() -> Hypergraph {
        Hypergraph::new(
            11,
            &[0, 3, 6, 9, 12, 15, 18],
            &[0, 2, 7, 1, 8, 2, 2, 10, 4, 3, 5, 1, 5, 6, 10, 9, 1, 0],
            &[1, 1, 1, 1, 1, 1],
            &[1, 1, 1, 1, 1, 1],
        )
    }

    fn partition_block_0_1(hg: &mut Hypergraph) {
        for n in [0, 2, 3, 5, 7, 9] {
            hg.set_node_part(n, 0);
        }
        for n in [1, 4, 6, 8, 10] {
            hg.set_node_part(n, 1);
        }
    }

    #[test]
    fn initialize_builds_acyclic_two_block_quotient() {
        let mut hg = c17();
        partition_block_0_1(&mut hg);
        let mut qg = QuotientGraph::<KahnCycleDetector>::new(hg.initial_num_nodes(), 2);
        qg.initialize(&hg);

        let topord = qg.topological_ordering();
        assert_eq!(topord.len(), 2);
        // no self-contradicting edges in both directions
        assert!(!(qg.adjacency(0, 1) > 0 && qg.adjacency(1, 0) > 0));
    }

    #[test]
    fn blocked_move_is_cached_until_structural_change() {
        let mut hg = c17();
        partition_block_0_1(&mut hg);
        let mut qg = QuotientGraph::<KahnCycleDetector>::new(hg.initial_num_nodes(), 2);
        qg.initialize(&hg);

        // find a node whose move from its block to the other is blocked,
        // if any exists for this instance; if adj has only one direction
        // populated, moving a node the "wrong" way across that edge with
        // no other connecting node is always safe, so instead assert the
        // idempotency contract directly by calling twice.
        let hn = 1;
        let to = 1 - hg.part_id(hn);
        let first = qg.test_and_update_before_movement(&hg, hn, to);
        let second = qg.test_and_update_before_movement(&hg, hn, to);
        assert_eq!(first, second, "cache hit must agree with first verdict");

        if !first {
            qg.reset_quotient_edge_cache();
            // after a structural-change flush (simulating some other
            // accepted move elsewhere), the entry is eligible again and
            // re-evaluates rather than trusting a stale cache.
            let _ = qg.test_and_update_before_movement(&hg, hn, to);
        }
    }

    #[test]
    fn accepted_move_updates_adjacency_and_clears_cache() {
        let mut hg = c17();
        partition_block_0_1(&mut hg);
        let mut qg = QuotientGraph::<KahnCycleDetector>::new(hg.initial_num_nodes(), 2);
        qg.initialize(&hg);

        let hn = 9;
        let from = hg.part_id(hn);
        let to = 1 - from;
        if qg.test_and_update_before_movement(&hg, hn, to) {
            hg.change_node_part(hn, from, to);
            qg.perform_movement(&hg, hn, from, to);
            assert_eq!(hg.part_id(hn), to);
        }
    }
}
