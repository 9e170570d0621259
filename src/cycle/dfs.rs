//! DFS cycle detector: no ordering is maintained. `connect(s, t)` runs a
//! forward search from `t`; if `s` is reachable, the edge would close a
//! cycle and is refused. A per-run mark avoids re-initializing the visited
//! array between calls. Ported from `DFSCycleDetector` in the reference
//! `cycle_detector.h`.

use super::{CycleDetector, OutAdjacency};

/// Minimal-state detector: an out-adjacency list plus a "last visited in
/// run N" mark per vertex.
#[derive(Debug, Clone)]
pub struct DfsCycleDetector {
    adj: OutAdjacency,
    run: Vec<u64>,
    run_id: u64,
}

impl CycleDetector for DfsCycleDetector {
    fn new(n: usize) -> Self {
        DfsCycleDetector {
            adj: OutAdjacency::new(n),
            run: vec![0; n],
            run_id: 0,
        }
    }

    fn bulk_connect(&mut self, edges: &[(usize, usize)]) {
        self.adj.bulk_connect(edges);
    }

    fn connect(&mut self, s: usize, t: usize) -> bool {
        if s == t {
            return false;
        }
        debug_assert!(
            !self.adj.has_edge(s, t),
            "duplicate connect({s}, {t}) request"
        );

        self.run_id += 1;
        let mut todo = vec![t];
        while let Some(u) = todo.pop() {
            if u == s {
                return false;
            }
            if self.run[u] == self.run_id {
                continue;
            }
            self.run[u] = self.run_id;
            for &v in self.adj.out_of(u) {
                if self.run[v] != self.run_id {
                    todo.push(v);
                }
            }
        }

        self.adj.push(s, t);
        true
    }

    fn disconnect(&mut self, s: usize, t: usize) {
        self.adj.disconnect(s, t);
    }

    fn reset(&mut self) {
        self.adj.reset();
        self.run.iter_mut().for_each(|r| *r = 0);
        self.run_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diamond_scenario() {
        let mut d = DfsCycleDetector::new(5);
        assert!(d.connect(0, 1));
        assert!(d.connect(0, 2));
        assert!(d.connect(0, 3));
        assert!(d.connect(4, 3));
        assert!(d.connect(4, 2));
        assert!(d.connect(4, 1));
        assert!(!d.connect(3, 4));
        assert!(!d.connect(2, 4));
        assert!(!d.connect(1, 4));
        assert!(!d.connect(1, 0));
        assert!(!d.connect(2, 0));
        assert!(!d.connect(3, 0));
        assert!(d.connect(4, 0));
        assert!(d.connect(3, 2));
    }

    #[test]
    fn self_loop_refused() {
        let mut d = DfsCycleDetector::new(2);
        assert!(!d.connect(0, 0));
    }
}
