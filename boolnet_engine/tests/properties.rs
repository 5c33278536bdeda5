//! Property-based tests for the update rule.
//!
//! Uses proptest to check the threshold rule and trajectory contracts
//! over random well-shaped inputs.

use proptest::prelude::*;

use boolnet_engine::trajectory::generate;
use boolnet_engine::transition::{next_node_state, transition};
use boolnet_engine::{advance, advance_with_policy, masking, xor_masking, BoolMatrix, Network, Policy, Schedule};

fn policy() -> impl Strategy<Value = Policy> {
    prop_oneof![Just(Policy::Xor), Just(Policy::And), Just(Policy::Or)]
}

/// (adjacency, mask, state) over 0..=8 nodes.
fn shaped_inputs() -> impl Strategy<Value = (BoolMatrix, BoolMatrix, Vec<bool>)> {
    (0usize..=8).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n * n),
            prop::collection::vec(any::<bool>(), n * n),
            prop::collection::vec(any::<bool>(), n),
        )
            .prop_map(move |(a, m, s)| {
                (
                    BoolMatrix::from_flat(n, n, a).unwrap(),
                    BoolMatrix::from_flat(n, n, m).unwrap(),
                    s,
                )
            })
    })
}

// =============================================================================
// Threshold rule
// =============================================================================

proptest! {
    /// An all-false adjacency row always yields false.
    #[test]
    fn prop_isolation_decay((a, m, s) in shaped_inputs(), row in 0usize..8, p in policy()) {
        let n = a.rows();
        prop_assume!(n > 0);
        let row = row % n;
        let mut a = a;
        for j in 0..n {
            a.set(row, j, false);
        }
        let next = masking(&a, &m, &s, p).unwrap();
        prop_assert!(!next[row]);
    }

    /// All-zero topology yields an all-false state whatever the mask and state.
    #[test]
    fn prop_all_zero_network((_, m, s) in shaped_inputs(), p in policy()) {
        let n = s.len();
        let a = BoolMatrix::zeros(n, n);
        prop_assert_eq!(masking(&a, &m, &s, p).unwrap(), vec![false; n]);
    }

    /// Next state is true iff more than half of the active edges vote true.
    #[test]
    fn prop_strict_majority(
        edges in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..16),
        p in policy(),
    ) {
        let adj: Vec<bool> = edges.iter().map(|e| e.0).collect();
        let mask: Vec<bool> = edges.iter().map(|e| e.1).collect();
        let state: Vec<bool> = edges.iter().map(|e| e.2).collect();
        let active = edges.iter().filter(|e| e.0).count();
        let votes = edges.iter().filter(|e| e.0 && p.vote(e.1, e.2)).count();
        prop_assert_eq!(next_node_state(&adj, &mask, &state, p), 2 * votes > active);
    }
}

#[test]
fn tie_resolves_false() {
    // active = 2, votes_true = 1
    assert!(!next_node_state(&[true, true], &[false, false], &[true, false], Policy::Xor));
    assert!(!next_node_state(&[true, true], &[true, false], &[true, true], Policy::And));
    assert!(!next_node_state(&[true, true], &[false, false], &[true, false], Policy::Or));
}

#[test]
fn three_edges_two_votes_is_true() {
    assert!(next_node_state(&[true, true, true], &[false, false, false], &[true, true, false], Policy::Xor));
}

// =============================================================================
// Trajectories
// =============================================================================

proptest! {
    /// First row of a one-step advance equals the single-step XOR call.
    #[test]
    fn prop_advance_matches_single_step((a, m, s) in shaped_inputs()) {
        let t = advance(&a, &m, &s, 1).unwrap();
        prop_assert_eq!(t.len(), 1);
        let expected = xor_masking(&a, &m, &s).unwrap();
        prop_assert_eq!(t.state(0).unwrap(), expected.as_slice());
    }

    /// Identical arguments give bit-identical trajectories.
    #[test]
    fn prop_advance_is_deterministic((a, m, s) in shaped_inputs(), steps in 0i64..12) {
        prop_assert_eq!(advance(&a, &m, &s, steps).unwrap(), advance(&a, &m, &s, steps).unwrap());
    }

    /// Row t of a trajectory is the transition of row t - 1.
    #[test]
    fn prop_rows_chain((a, m, s) in shaped_inputs(), steps in 1i64..10, p in policy()) {
        let t = advance_with_policy(&a, &m, &s, steps, p).unwrap();
        prop_assert_eq!(t.len() as i64, steps);
        let mut prev = s.clone();
        for row in t.iter() {
            let expected = masking(&a, &m, &prev, p).unwrap();
            prop_assert_eq!(row, expected.as_slice());
            prev = row.to_vec();
        }
    }

    /// Sequential and parallel node evaluation agree bit for bit.
    #[test]
    fn prop_schedule_independent((a, m, s) in shaped_inputs(), steps in 0usize..6, p in policy()) {
        let net = Network::new(a, m).unwrap();
        let seq = generate(&net, &s, steps, p, Schedule::Sequential).unwrap();
        let par = generate(&net, &s, steps, p, Schedule::Parallel).unwrap();
        prop_assert_eq!(&seq, &par);
        prop_assert_eq!(
            transition(&net, &s, p, Schedule::Sequential).unwrap(),
            transition(&net, &s, p, Schedule::Parallel).unwrap()
        );
    }

    /// Negative step counts are rejected, never clamped to empty.
    #[test]
    fn prop_negative_steps_rejected((a, m, s) in shaped_inputs(), steps in i64::MIN..0) {
        prop_assert!(advance(&a, &m, &s, steps).unwrap_err().is_shape_mismatch());
    }

    /// A state of the wrong length is rejected by every entry point.
    #[test]
    fn prop_state_length_rejected((a, m, s) in shaped_inputs(), extra in 1usize..3, p in policy()) {
        let mut longer = s.clone();
        longer.extend(std::iter::repeat(true).take(extra));
        prop_assert!(masking(&a, &m, &longer, p).is_err());
        prop_assert!(advance(&a, &m, &longer, 1).is_err());
    }
}
