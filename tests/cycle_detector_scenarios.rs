//! Seed scenarios S1-S4 from spec.md §8, run against each of the three
//! cycle detector strategies in turn (the comparative contract, §4.1.4,
//! requires them to agree on every verdict).

use dhgp_acyclic::{CycleDetector, DfsCycleDetector, KahnCycleDetector, PseudoTopologicalCycleDetector};

/// S1: a 5-node path, then every chord that would or would not close a cycle.
fn s1_path<D: CycleDetector>() {
    let mut d = D::new(5);
    assert!(d.connect(0, 1));
    assert!(d.connect(1, 2));
    assert!(d.connect(2, 3));
    assert!(d.connect(3, 4));

    for k in [0, 1, 2, 3] {
        assert!(!d.connect(4, k), "connect(4, {k}) should close a cycle");
    }
    for k in [2, 3, 4] {
        assert!(d.connect(0, k), "connect(0, {k}) should stay acyclic");
    }
    for k in [3, 4] {
        assert!(d.connect(1, k), "connect(1, {k}) should stay acyclic");
    }
    assert!(d.connect(2, 4));
    assert!(!d.connect(0, 0), "self-loop must always be refused");
}

/// S2: a 5-node diamond (0 fans out to 1,2,3; 4 fans into 1,2,3).
fn s2_diamond<D: CycleDetector>() {
    let mut d = D::new(5);
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

/// S3: a 128-node chain, closing it into a cycle must be refused.
fn s3_large_chain<D: CycleDetector>() {
    const N: usize = 128;
    let mut d = D::new(N);
    for i in 0..N - 1 {
        assert!(d.connect(i, i + 1));
    }
    assert!(!d.connect(N - 1, 0));
}

/// S4: a 64-node upper-triangular tournament; any back edge from the sink
/// into the interior must be refused.
fn s4_tournament<D: CycleDetector>() {
    const N: usize = 64;
    let mut d = D::new(N);
    for u in 0..N {
        for v in (u + 1)..N {
            assert!(d.connect(u, v));
        }
    }
    for u in (2..N - 1).rev() {
        assert!(!d.connect(N - 1, u));
    }
}

macro_rules! scenario_per_detector {
    ($test_name:ident, $scenario:ident) => {
        #[test]
        fn $test_name() {
            $scenario::<KahnCycleDetector>();
            $scenario::<DfsCycleDetector>();
            $scenario::<PseudoTopologicalCycleDetector>();
        }
    };
}

scenario_per_detector!(s1_path_agrees_across_detectors, s1_path);
scenario_per_detector!(s2_diamond_agrees_across_detectors, s2_diamond);
scenario_per_detector!(s3_large_chain_agrees_across_detectors, s3_large_chain);
scenario_per_detector!(s4_tournament_agrees_across_detectors, s4_tournament);

#[test]
fn disconnect_then_reconnect_agrees_across_detectors() {
    fn run<D: CycleDetector>() {
        let mut d = D::new(3);
        assert!(d.connect(0, 1));
        d.disconnect(0, 1);
        assert!(d.connect(1, 0));
        assert!(!d.connect(0, 1));
        d.reset();
        assert!(d.connect(0, 1));
        assert!(d.connect(1, 2));
    }
    run::<KahnCycleDetector>();
    run::<DfsCycleDetector>();
    run::<PseudoTopologicalCycleDetector>();
}
