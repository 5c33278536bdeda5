//! BoolNet Engine: Host-Facing Operations
//!
//! The four calls a host makes with plain boolean buffers. Each one
//! validates every shape first and computes nothing on failure.

use crate::error::Result;
use crate::invariants::{check_shapes, check_stepcount};
use crate::matrix::BoolMatrix;
use crate::policy::Policy;
use crate::trajectory::{generate_unchecked, Trajectory};
use crate::transition::{step_unchecked, Schedule};

/// Single transition under `policy`.
pub fn masking(adjacency: &BoolMatrix, mask: &BoolMatrix, state: &[bool], policy: Policy) -> Result<Vec<bool>> {
    check_shapes(adjacency, mask, state)?;
    Ok(step_unchecked(adjacency, mask, state, policy, Schedule::default()))
}

pub fn xor_masking(adjacency: &BoolMatrix, mask: &BoolMatrix, state: &[bool]) -> Result<Vec<bool>> {
    masking(adjacency, mask, state, Policy::Xor)
}

pub fn and_masking(adjacency: &BoolMatrix, mask: &BoolMatrix, state: &[bool]) -> Result<Vec<bool>> {
    masking(adjacency, mask, state, Policy::And)
}

pub fn or_masking(adjacency: &BoolMatrix, mask: &BoolMatrix, state: &[bool]) -> Result<Vec<bool>> {
    masking(adjacency, mask, state, Policy::Or)
}

/// `stepcount` XOR transitions from `initial_state`.
///
/// Always XOR. Use [`advance_with_policy`] for the other operators.
pub fn advance(adjacency: &BoolMatrix, mask: &BoolMatrix, initial_state: &[bool], stepcount: i64) -> Result<Trajectory> {
    advance_with_policy(adjacency, mask, initial_state, stepcount, Policy::Xor)
}

pub fn advance_with_policy(
    adjacency: &BoolMatrix,
    mask: &BoolMatrix,
    initial_state: &[bool],
    stepcount: i64,
    policy: Policy,
) -> Result<Trajectory> {
    check_shapes(adjacency, mask, initial_state)?;
    let steps = check_stepcount(stepcount)?;
    generate_unchecked(adjacency, mask, initial_state, steps, policy, Schedule::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, ShapeMismatch};

    fn m(rows: &[&str]) -> BoolMatrix {
        BoolMatrix::from_bit_rows(rows).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let adj = m(&["010", "001", "100"]);
        let mask = m(&["000", "000", "000"]);
        let next = xor_masking(&adj, &mask, &[true, false, false]).unwrap();
        assert_eq!(next, vec![false, false, true]);
    }

    #[test]
    fn test_policies_differ_on_same_input() {
        // node 0 reads all three nodes; nodes 1 and 2 are isolated
        let adj = m(&["111", "000", "000"]);
        let mask = m(&["011", "000", "000"]);
        let state = [true, false, true];
        // xor votes 1, 1, 0
        assert_eq!(xor_masking(&adj, &mask, &state).unwrap(), vec![true, false, false]);
        // and votes 0, 0, 1
        assert_eq!(and_masking(&adj, &mask, &state).unwrap(), vec![false, false, false]);
        // or votes 1, 1, 1
        assert_eq!(or_masking(&adj, &mask, &state).unwrap(), vec![true, false, false]);
    }

    #[test]
    fn test_all_zero_network() {
        let adj = BoolMatrix::zeros(5, 5);
        let mask = m(&["11111", "11111", "11111", "11111", "11111"]);
        let state = [true; 5];
        for policy in Policy::ALL {
            assert_eq!(masking(&adj, &mask, &state, policy).unwrap(), vec![false; 5]);
        }
    }

    #[test]
    fn test_advance_first_row_matches_single_step() {
        let adj = m(&["0110", "1001", "0101", "1110"]);
        let mask = m(&["0100", "0001", "0100", "1010"]);
        let state = [true, false, false, true];
        let t = advance(&adj, &mask, &state, 1).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.state(0).unwrap(), xor_masking(&adj, &mask, &state).unwrap().as_slice());
    }

    #[test]
    fn test_advance_is_xor_only() {
        let adj = m(&["11", "11"]);
        let mask = m(&["11", "11"]);
        let state = [true, true];
        let xor = advance(&adj, &mask, &state, 1).unwrap();
        let and = advance_with_policy(&adj, &mask, &state, 1, Policy::And).unwrap();
        assert_eq!(xor.state(0).unwrap(), &[false, false]);
        assert_eq!(and.state(0).unwrap(), &[true, true]);
    }

    #[test]
    fn test_advance_zero_and_negative_steps() {
        let adj = m(&["01", "10"]);
        let mask = m(&["00", "00"]);
        let t = advance(&adj, &mask, &[true, false], 0).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.nodes(), 2);
        let err = advance(&adj, &mask, &[true, false], -3).unwrap_err();
        assert_eq!(err, EngineError::ShapeMismatch(ShapeMismatch::NegativeStepCount(-3)));
    }

    #[test]
    fn test_shape_failures_before_stepcount() {
        let adj = m(&["01", "10"]);
        let mask = m(&["000", "000", "000"]);
        let err = advance(&adj, &mask, &[true, false], -1).unwrap_err();
        assert!(matches!(err, EngineError::ShapeMismatch(ShapeMismatch::MaskShape { .. })));
        assert!(xor_masking(&adj, &mask, &[true, false]).is_err());
        assert!(and_masking(&adj, &adj, &[true]).is_err());
        assert!(or_masking(&m(&["011", "101"]), &m(&["011", "101"]), &[true, true]).is_err());
    }
}
