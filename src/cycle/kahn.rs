//! Kahn-ordering cycle detector: maintains a total topological order and
//! only falls back to a from-scratch recompute when a candidate edge
//! violates it. Ported from `KahnCycleDetector` in the reference
//! `cycle_detector.h`.

use super::{CycleDetector, OutAdjacency};

/// Maintains `position[u]`, the rank of `u` in a cached topological order.
/// `connect(s, t)` is accepted immediately if `position[s] < position[t]`;
/// otherwise the edge is tentatively inserted and a fresh topological order
/// is computed by Kahn's algorithm, reverting the edge if none exists.
#[derive(Debug, Clone)]
pub struct KahnCycleDetector {
    adj: OutAdjacency,
    position: Vec<usize>,
}

impl CycleDetector for KahnCycleDetector {
    fn new(n: usize) -> Self {
        KahnCycleDetector {
            adj: OutAdjacency::new(n),
            position: (0..n).collect(),
        }
    }

    fn bulk_connect(&mut self, edges: &[(usize, usize)]) {
        self.adj.bulk_connect(edges);
        self.position = self
            .adj
            .topological_positions()
            .expect("bulk_connect caller must preserve acyclicity");
    }

    fn connect(&mut self, s: usize, t: usize) -> bool {
        if s == t {
            return false;
        }
        debug_assert!(
            !self.adj.has_edge(s, t),
            "duplicate connect({s}, {t}) request"
        );

        if self.position[s] < self.position[t] {
            self.adj.push(s, t);
            return true;
        }

        self.adj.push(s, t);
        match self.adj.topological_positions() {
            Some(position) => {
                self.position = position;
                true
            }
            None => {
                self.adj.pop(s);
                false
            }
        }
    }

    fn disconnect(&mut self, s: usize, t: usize) {
        self.adj.disconnect(s, t);
    }

    fn reset(&mut self) {
        self.adj.reset();
        self.position = (0..self.adj.len()).collect();
    }
}
