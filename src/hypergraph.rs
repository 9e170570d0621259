//! The directed hypergraph model.
//!
//! A hypergraph has a fixed number of nodes and hyperedges fixed at
//! construction time. Each hyperedge carries an ordered set of pins split
//! into two disjoint subsets: heads (the edge points *into* these) and
//! tails (the edge points *out of* these). Nodes track their incident
//! head-edges and tail-edges separately so that `topo` and `quotient` can
//! walk the hypergraph in either direction without scanning every edge.

use std::collections::HashSet;

/// A node id, dense in `0..initial_num_nodes`.
pub type NodeId = usize;
/// A hyperedge id, dense in `0..initial_num_edges`.
pub type EdgeId = usize;
/// A block id in a k-way partition, or the sentinel [`UNASSIGNED`].
pub type BlockId = i32;

/// Sentinel block id meaning "not yet assigned to any block".
pub const UNASSIGNED: BlockId = -1;

/// Which side of a hyperedge a pin occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    /// The edge points into this pin.
    Head,
    /// The edge points out of this pin.
    Tail,
}

#[derive(Debug, Clone)]
struct Hyperedge {
    heads: Vec<NodeId>,
    tails: Vec<NodeId>,
    weight: u64,
    /// `false` once the edge has been removed by `remove_edge`.
    enabled: bool,
}

#[derive(Debug, Clone)]
struct Node {
    incident_head_edges: Vec<EdgeId>,
    incident_tail_edges: Vec<EdgeId>,
    weight: u64,
    part: BlockId,
    /// `false` once the node has been contracted away.
    enabled: bool,
}

/// Which of the two contraction cases applied to a single incident edge of
/// the absorbed node, recorded so `uncontract` can reverse it exactly.
#[derive(Debug, Clone)]
enum PinMemento {
    /// `v` and `u` were both already pins of this edge (possibly on
    /// different sides is impossible by the hypergraph invariant, so they
    /// were on the same side); `v`'s pin was simply dropped.
    Dropped { role: PinRole, index_in_list: usize },
    /// `v` was the sole pin on its side; its slot was rewritten to `u`,
    /// preserving role.
    Rewritten { role: PinRole },
}

/// A single contraction (u, v) recorded so it can be reversed by
/// [`Hypergraph::uncontract`].
#[derive(Debug, Clone)]
pub struct ContractionMemento {
    u: NodeId,
    v: NodeId,
    v_weight: u64,
    v_part: BlockId,
    /// Per edge that `v` used to be incident to (head or tail), what
    /// happened to that pin, in the order `v`'s adjacency lists held them.
    head_edges: Vec<(EdgeId, PinMemento)>,
    tail_edges: Vec<(EdgeId, PinMemento)>,
}

/// A memento for [`Hypergraph::restore_edge`] reversing a prior
/// [`Hypergraph::remove_edge`].
#[derive(Debug, Clone)]
pub struct EdgeRemovalMemento {
    edge: EdgeId,
    heads: Vec<NodeId>,
    tails: Vec<NodeId>,
    weight: u64,
}

/// A directed hypergraph: nodes with head/tail incidence, supporting
/// contraction/uncontraction and hyperedge removal/restoration.
#[derive(Debug, Clone)]
pub struct Hypergraph {
    nodes: Vec<Node>,
    edges: Vec<Hyperedge>,
    current_num_nodes: usize,
    current_num_edges: usize,
}

impl Hypergraph {
    /// Build a hypergraph from a pin-index/pin-vector encoding matching the
    /// hMETIS-like format: `pin_index` has `num_edges + 1` entries where
    /// `pin_index[e]..pin_index[e + 1]` indexes into `pins`; `head_counts[e]`
    /// says how many of the leading pins of edge `e` are heads (the
    /// remainder are tails), matching the convention used by the reference
    /// fixtures (the first `head_counts[e]` pins of each edge are heads).
    pub fn new(
        num_nodes: usize,
        pin_index: &[usize],
        pins: &[NodeId],
        head_counts: &[usize],
        edge_weights: &[u64],
    ) -> Self {
        let num_edges = pin_index.len().saturating_sub(1);
        assert_eq!(head_counts.len(), num_edges);
        assert_eq!(edge_weights.len(), num_edges);

        let mut nodes: Vec<Node> = (0..num_nodes)
            .map(|_| Node {
                incident_head_edges: Vec::new(),
                incident_tail_edges: Vec::new(),
                weight: 1,
                part: UNASSIGNED,
                enabled: true,
            })
            .collect();

        let mut edges = Vec::with_capacity(num_edges);
        for e in 0..num_edges {
            let start = pin_index[e];
            let end = pin_index[e + 1];
            let edge_pins = &pins[start..end];
            let nheads = head_counts[e];
            let heads: Vec<NodeId> = edge_pins[..nheads].to_vec();
            let tails: Vec<NodeId> = edge_pins[nheads..].to_vec();
            for &h in &heads {
                nodes[h].incident_head_edges.push(e);
            }
            for &t in &tails {
                nodes[t].incident_tail_edges.push(e);
            }
            edges.push(Hyperedge {
                heads,
                tails,
                weight: edge_weights[e],
                enabled: true,
            });
        }

        Hypergraph {
            nodes,
            edges,
            current_num_nodes: num_nodes,
            current_num_edges: num_edges,
        }
    }

    /// Always `true`: this crate models only directed hypergraphs.
    pub fn is_directed(&self) -> bool {
        true
    }

    /// Number of nodes the hypergraph was constructed with.
    pub fn initial_num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of hyperedges the hypergraph was constructed with.
    pub fn initial_num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of live (non-contracted) nodes.
    pub fn current_num_nodes(&self) -> usize {
        self.current_num_nodes
    }

    /// Number of live (non-removed) hyperedges.
    pub fn current_num_edges(&self) -> usize {
        self.current_num_edges
    }

    /// Iterate live node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).filter(move |&n| self.nodes[n].enabled)
    }

    /// Iterate live edge ids in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).filter(move |&e| self.edges[e].enabled)
    }

    /// Head pins of a hyperedge.
    pub fn head_pins(&self, e: EdgeId) -> &[NodeId] {
        &self.edges[e].heads
    }

    /// Tail pins of a hyperedge.
    pub fn tail_pins(&self, e: EdgeId) -> &[NodeId] {
        &self.edges[e].tails
    }

    /// Number of head pins of a hyperedge.
    pub fn edge_num_head_pins(&self, e: EdgeId) -> usize {
        self.edges[e].heads.len()
    }

    /// Number of tail pins of a hyperedge.
    pub fn edge_num_tail_pins(&self, e: EdgeId) -> usize {
        self.edges[e].tails.len()
    }

    /// Weight of a hyperedge.
    pub fn edge_weight(&self, e: EdgeId) -> u64 {
        self.edges[e].weight
    }

    /// Edges in which `node` appears as a head pin.
    pub fn incident_head_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.nodes[node].incident_head_edges
    }

    /// Edges in which `node` appears as a tail pin.
    pub fn incident_tail_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.nodes[node].incident_tail_edges
    }

    /// Number of edges in which `node` appears as a head pin.
    pub fn node_num_head_edges(&self, node: NodeId) -> usize {
        self.nodes[node].incident_head_edges.len()
    }

    /// Number of edges in which `node` appears as a tail pin.
    pub fn node_num_tail_edges(&self, node: NodeId) -> usize {
        self.nodes[node].incident_tail_edges.len()
    }

    /// Weight of a node.
    pub fn node_weight(&self, node: NodeId) -> u64 {
        self.nodes[node].weight
    }

    /// Current block assignment of a node, or [`UNASSIGNED`].
    pub fn part_id(&self, node: NodeId) -> BlockId {
        self.nodes[node].part
    }

    /// Assign `node` to `part` for the first time (it must currently be
    /// [`UNASSIGNED`]).
    pub fn set_node_part(&mut self, node: NodeId, part: BlockId) {
        debug_assert_eq!(self.nodes[node].part, UNASSIGNED);
        self.nodes[node].part = part;
    }

    /// Move `node` from `from` to `to`. `from` must equal the node's current
    /// block.
    pub fn change_node_part(&mut self, node: NodeId, from: BlockId, to: BlockId) {
        debug_assert_eq!(self.nodes[node].part, from);
        self.nodes[node].part = to;
    }

    /// Number of pins of hyperedge `e` (head or tail) currently assigned to
    /// block `part`.
    pub fn pin_count_in_part(&self, e: EdgeId, part: BlockId) -> usize {
        self.edges[e]
            .heads
            .iter()
            .chain(self.edges[e].tails.iter())
            .filter(|&&n| self.nodes[n].part == part)
            .count()
    }

    /// Contract `v` into `u`: `v` is removed from the hypergraph and every
    /// edge it was a pin of is rewritten to reference `u` instead (dropping
    /// the pin entirely if `u` was already a pin of the same edge on the
    /// same side, per the hypergraph invariant that a node is either a head
    /// or a tail of a given edge, never both).
    ///
    /// Returns a memento that [`Self::uncontract`] can replay in reverse.
    ///
    /// **Panics** if `u == v`, or if either is not currently live.
    pub fn contract(&mut self, u: NodeId, v: NodeId) -> ContractionMemento {
        assert_ne!(u, v, "cannot contract a node into itself");
        assert!(self.nodes[u].enabled && self.nodes[v].enabled);

        let v_weight = self.nodes[v].weight;
        let v_part = self.nodes[v].part;

        let head_edges = self.nodes[v].incident_head_edges.clone();
        let tail_edges = self.nodes[v].incident_tail_edges.clone();

        let mut head_mementos = Vec::with_capacity(head_edges.len());
        for &e in &head_edges {
            head_mementos.push((e, self.contract_pin(e, u, v, PinRole::Head)));
        }
        let mut tail_mementos = Vec::with_capacity(tail_edges.len());
        for &e in &tail_edges {
            tail_mementos.push((e, self.contract_pin(e, u, v, PinRole::Tail)));
        }

        self.nodes[u].weight += v_weight;
        self.nodes[v].enabled = false;
        self.nodes[v].incident_head_edges.clear();
        self.nodes[v].incident_tail_edges.clear();
        self.current_num_nodes -= 1;

        ContractionMemento {
            u,
            v,
            v_weight,
            v_part,
            head_edges: head_mementos,
            tail_edges: tail_mementos,
        }
    }

    fn contract_pin(&mut self, e: EdgeId, u: NodeId, v: NodeId, role: PinRole) -> PinMemento {
        let list = match role {
            PinRole::Head => &mut self.edges[e].heads,
            PinRole::Tail => &mut self.edges[e].tails,
        };
        let already_present = list.contains(&u);
        let index_in_list = list.iter().position(|&n| n == v).expect("v must be a pin");

        if already_present {
            list.remove(index_in_list);
            PinMemento::Dropped { role, index_in_list }
        } else {
            list[index_in_list] = u;
            PinMemento::Rewritten { role }
        }
    }

    /// Reverse the most recent contraction described by `memento`.
    ///
    /// Mementos must be applied in exact reverse order of the contractions
    /// that produced them.
    pub fn uncontract(&mut self, memento: ContractionMemento) {
        let ContractionMemento {
            u,
            v,
            v_weight,
            v_part,
            head_edges,
            tail_edges,
        } = memento;

        self.nodes[v].enabled = true;
        self.nodes[v].weight = v_weight;
        self.nodes[v].part = v_part;
        self.nodes[u].weight -= v_weight;

        for (e, m) in &head_edges {
            self.uncontract_pin(*e, u, v, m);
        }
        for (e, m) in &tail_edges {
            self.uncontract_pin(*e, u, v, m);
        }

        self.nodes[v].incident_head_edges = head_edges.iter().map(|(e, _)| *e).collect();
        self.nodes[v].incident_tail_edges = tail_edges.iter().map(|(e, _)| *e).collect();
        self.current_num_nodes += 1;
    }

    fn uncontract_pin(&mut self, e: EdgeId, u: NodeId, v: NodeId, memento: &PinMemento) {
        match *memento {
            PinMemento::Dropped { role, index_in_list } => {
                let list = match role {
                    PinRole::Head => &mut self.edges[e].heads,
                    PinRole::Tail => &mut self.edges[e].tails,
                };
                let at = index_in_list.min(list.len());
                list.insert(at, v);
            }
            PinMemento::Rewritten { role } => {
                let list = match role {
                    PinRole::Head => &mut self.edges[e].heads,
                    PinRole::Tail => &mut self.edges[e].tails,
                };
                for slot in list.iter_mut() {
                    if *slot == u {
                        *slot = v;
                        break;
                    }
                }
            }
        }
    }

    /// Remove hyperedge `e` from the hypergraph entirely: its pins no longer
    /// list it as incident. Returns a memento for [`Self::restore_edge`].
    pub fn remove_edge(&mut self, e: EdgeId) -> EdgeRemovalMemento {
        assert!(self.edges[e].enabled);
        let heads = self.edges[e].heads.clone();
        let tails = self.edges[e].tails.clone();
        let weight = self.edges[e].weight;

        for &h in &heads {
            self.nodes[h].incident_head_edges.retain(|&x| x != e);
        }
        for &t in &tails {
            self.nodes[t].incident_tail_edges.retain(|&x| x != e);
        }
        self.edges[e].enabled = false;
        self.current_num_edges -= 1;

        EdgeRemovalMemento {
            edge: e,
            heads,
            tails,
            weight,
        }
    }

    /// Reverse a prior [`Self::remove_edge`], restoring pins, head/tail
    /// sets and adjacency exactly.
    pub fn restore_edge(&mut self, memento: EdgeRemovalMemento) {
        let EdgeRemovalMemento {
            edge,
            heads,
            tails,
            weight,
        } = memento;

        for &h in &heads {
            self.nodes[h].incident_head_edges.push(edge);
        }
        for &t in &tails {
            self.nodes[t].incident_tail_edges.push(edge);
        }
        self.edges[edge].heads = heads;
        self.edges[edge].tails = tails;
        self.edges[edge].weight = weight;
        self.edges[edge].enabled = true;
        self.current_num_edges += 1;
    }

    /// Sanity check used by tests: every node/edge incidence is mutually
    /// consistent (spec invariant: u in heads(e) iff e in
    /// incident_head_edges(u), symmetrically for tails).
    #[cfg(test)]
    fn check_invariants(&self) {
        for e in self.edges() {
            let heads: HashSet<_> = self.edges[e].heads.iter().copied().collect();
            let tails: HashSet<_> = self.edges[e].tails.iter().copied().collect();
            assert!(heads.is_disjoint(&tails), "pin is both head and tail of {e}");
            for &h in &heads {
                assert!(self.nodes[h].incident_head_edges.contains(&e));
            }
            for &t in &tails {
                assert!(self.nodes[t].incident_tail_edges.contains(&e));
            }
        }
        for n in self.nodes() {
            for &e in &self.nodes[n].incident_head_edges {
                assert!(self.edges[e].heads.contains(&n));
            }
            for &e in &self.nodes[n].incident_tail_edges {
                assert!(self.edges[e].tails.contains(&n));
            }
        }
    }
}
