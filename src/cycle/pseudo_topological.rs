//! Pseudo-topological-order cycle detector (Bender et al., "A New Approach
//! to Incremental Cycle Detection and Related Problems"). Maintains a level
//! function `level: V -> N` such that `level(x) <= level(y)` for every edge
//! `(x, y)`. Ported from `PseudoTopologicalOrderingCycleDetector` in the
//! reference `cycle_detector.h`, which is authoritative over spec.md's
//! prose gloss for the exact delta formula and the commit/rollback
//! sequencing (see SPEC_FULL.md §4.1).

use std::collections::HashSet;

use super::CycleDetector;

/// Small sorted-or-hashed sets would both work here (spec leaves the choice
/// open); a `HashSet` is used since point-queries ("is x in in[v]?") are
/// rare and iteration is the hot path.
type NodeSet = HashSet<usize>;

#[derive(Debug, Clone)]
pub struct PseudoTopologicalCycleDetector {
    level: Vec<usize>,
    out: Vec<NodeSet>,
    r#in: Vec<NodeSet>,
    marked: Vec<u64>,
    mark: u64,
    /// `floor(cbrt(n))`, fixed at construction.
    cbrt_n: usize,
    /// `min(isqrt(size), cbrt_n)`, recomputed whenever `size` changes.
    delta: usize,
    size: usize,
}

impl PseudoTopologicalCycleDetector {
    fn update_delta(&mut self) {
        let isqrt_size = isqrt(self.size);
        self.delta = isqrt_size.min(self.cbrt_n);
    }

    fn insert_edge(&mut self, u: usize, v: usize) -> bool {
        self.out[u].insert(v);
        if self.level[u] == self.level[v] {
            self.r#in[v].insert(u);
        }
        self.size += 1;
        self.update_delta();
        true
    }

    /// `level(u) >= level(v)`: search backward through same-level
    /// predecessors of `u`, bounded to `delta` visits, looking for `v`.
    fn backward_search(&mut self, u: usize, v: usize) -> bool {
        debug_assert!(self.level[u] >= self.level[v]);

        let mut visited = 0usize;
        self.mark += 1;
        let mut todo = vec![u];

        while let Some(y) = todo.pop() {
            if self.marked[y] != self.mark {
                visited += 1;
                self.marked[y] = self.mark;

                if y == v {
                    return false; // cycle
                }

                for &x in &self.r#in[y] {
                    if self.marked[x] != self.mark && self.level[x] == self.level[y] {
                        todo.push(x);
                    }
                }

                if visited >= self.delta {
                    break;
                }
            }
        }

        if visited < self.delta && self.level[u] == self.level[v] {
            return self.insert_edge(u, v);
        }

        debug_assert!(visited >= self.delta || self.level[u] > self.level[v]);
        let old_level_v = self.level[v];
        self.level[v] = if visited < self.delta {
            self.level[u]
        } else {
            self.level[u] + 1
        };

        if visited >= self.delta {
            // Backward search was inconclusive: reset the B-set, marking it
            // with the current epoch = {u}.
            self.marked.iter_mut().for_each(|m| *m = 0);
            self.marked[u] = self.mark;
        }

        // Split step 3 into a pure search (no `in` mutation, so a refusal
        // needs no `in`-set rollback) and, only on success, a commit pass
        // that reapplies the same level promotions and rebuilds `in`.
        if !self.forward_cycle_search(v) {
            self.level[v] = old_level_v;
            return false;
        }

        self.r#in[v].clear();
        self.forward_commit(u, v);
        true
    }

    /// Propagate "must be at level >= level(v)" through `out[v]`
    /// transitively, without mutating `in`. Returns `false` (cycle) if a
    /// vertex marked by the backward phase is reached.
    fn forward_cycle_search(&mut self, v: usize) -> bool {
        let mut todo: Vec<(usize, usize)> = self.out[v].iter().map(|&y| (v, y)).collect();
        let mut changed_levels: Vec<(usize, usize)> = Vec::new();
        let mut success = true;

        while let Some((x, y)) = todo.pop() {
            if self.marked[y] == self.mark {
                success = false;
                break;
            }
            if self.level[x] > self.level[y] {
                changed_levels.push((y, self.level[y]));
                self.level[y] = self.level[x];
                for &y_prime in &self.out[y] {
                    todo.push((y, y_prime));
                }
            }
        }

        for (x, level) in changed_levels {
            self.level[x] = level;
        }
        success
    }

    /// Re-run the same propagation as [`Self::forward_cycle_search`], this
    /// time committing level changes and rebuilding `in[y]` for every
    /// affected `y` (`y` gets `x` in `in[y]` iff `level(x) == level(y)` at
    /// commit time), then inserts `(u, v)`.
    fn forward_commit(&mut self, u: usize, v: usize) {
        let mut todo: Vec<(usize, usize)> = self.out[v].iter().map(|&y| (v, y)).collect();

        while let Some((x, y)) = todo.pop() {
            if self.level[x] == self.level[y] {
                self.r#in[y].insert(x);
            } else if self.level[x] > self.level[y] {
                self.level[y] = self.level[x];
                self.r#in[y].clear();
                self.r#in[y].insert(x);
                for &y_prime in &self.out[y] {
                    todo.push((y, y_prime));
                }
            }
        }

        self.insert_edge(u, v);
    }

    #[cfg(test)]
    fn check_pseudo_topological_order(&self) {
        for (x, adj) in self.out.iter().enumerate() {
            for &y in adj {
                assert!(
                    self.level[x] <= self.level[y],
                    "pseudo topological order violated: level({x})={}, level({y})={}",
                    self.level[x],
                    self.level[y]
                );
            }
        }
    }
}

impl CycleDetector for PseudoTopologicalCycleDetector {
    fn new(n: usize) -> Self {
        PseudoTopologicalCycleDetector {
            level: vec![0; n],
            out: vec![NodeSet::new(); n],
            r#in: vec![NodeSet::new(); n],
            marked: vec![0; n],
            mark: 0,
            cbrt_n: icbrt(n),
            delta: 0,
            size: 0,
        }
    }

    fn bulk_connect(&mut self, edges: &[(usize, usize)]) {
        self.size = edges.len();
        self.update_delta();
        for &(s, t) in edges {
            self.connect(s, t);
            self.size -= 1; // connect() re-increments; size was set up front.
        }
    }

    fn connect(&mut self, u: usize, v: usize) -> bool {
        if u == v {
            return false;
        }
        debug_assert!(!self.out[u].contains(&v), "duplicate connect({u}, {v}) request");

        let success = if self.level[u] < self.level[v] {
            self.insert_edge(u, v)
        } else {
            self.backward_search(u, v)
        };

        #[cfg(test)]
        if success {
            self.check_pseudo_topological_order();
        }

        success
    }

    fn disconnect(&mut self, s: usize, t: usize) {
        self.out[s].remove(&t);
        self.r#in[t].remove(&s);
    }

    fn reset(&mut self) {
        let n = self.out.len();
        self.level = vec![0; n];
        self.out = vec![NodeSet::new(); n];
        self.r#in = vec![NodeSet::new(); n];
        self.marked = vec![0; n];
        self.delta = 0;
        self.size = 0;
        self.mark = 0;
    }
}

fn isqrt(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).sqrt() as usize;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

fn icbrt(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut x = (n as f64).cbrt() as usize;
    while x * x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}
