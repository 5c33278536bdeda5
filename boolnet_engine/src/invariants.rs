//! BoolNet Engine: Shape Checks
//!
//! Run once, before any computation. The first failing check is
//! reported and nothing is computed.

use tracing::warn;

use crate::error::{Result, ShapeMismatch};
use crate::matrix::BoolMatrix;

/// Topology must be N×N. Returns N.
pub fn check_topology(adjacency: &BoolMatrix) -> Result<usize> {
    let (rows, cols) = adjacency.shape();
    if rows != cols {
        return reject(ShapeMismatch::NonSquareTopology { rows, cols });
    }
    Ok(rows)
}

/// Mask must have the topology's shape.
pub fn check_mask(adjacency: &BoolMatrix, mask: &BoolMatrix) -> Result<()> {
    if mask.shape() != adjacency.shape() {
        return reject(ShapeMismatch::MaskShape {
            expected: adjacency.shape(),
            found: mask.shape(),
        });
    }
    Ok(())
}

/// State must have one entry per node.
pub fn check_state(nodes: usize, state: &[bool]) -> Result<()> {
    if state.len() != nodes {
        return reject(ShapeMismatch::StateLength {
            expected: nodes,
            found: state.len(),
        });
    }
    Ok(())
}

/// All shape checks of a single-step call. Returns N.
pub fn check_shapes(adjacency: &BoolMatrix, mask: &BoolMatrix, state: &[bool]) -> Result<usize> {
    let n = check_topology(adjacency)?;
    check_mask(adjacency, mask)?;
    check_state(n, state)?;
    Ok(n)
}

/// Host step counts arrive signed; negatives are rejected, not clamped.
pub fn check_stepcount(stepcount: i64) -> Result<usize> {
    usize::try_from(stepcount).or_else(|_| reject(ShapeMismatch::NegativeStepCount(stepcount)))
}

fn reject<T>(mismatch: ShapeMismatch) -> Result<T> {
    warn!(%mismatch, "rejected call");
    Err(mismatch.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn shape_err(r: Result<usize>) -> ShapeMismatch {
        match r.unwrap_err() {
            EngineError::ShapeMismatch(m) => m,
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_shapes_return_node_count() {
        let a = BoolMatrix::zeros(4, 4);
        let m = BoolMatrix::zeros(4, 4);
        assert_eq!(check_shapes(&a, &m, &[false; 4]).unwrap(), 4);
    }

    #[test]
    fn test_non_square_topology() {
        let a = BoolMatrix::zeros(2, 3);
        let m = BoolMatrix::zeros(2, 3);
        assert_eq!(
            shape_err(check_shapes(&a, &m, &[false; 2])),
            ShapeMismatch::NonSquareTopology { rows: 2, cols: 3 }
        );
    }

    #[test]
    fn test_mask_shape() {
        let a = BoolMatrix::zeros(3, 3);
        let m = BoolMatrix::zeros(3, 2);
        assert_eq!(
            shape_err(check_shapes(&a, &m, &[false; 3])),
            ShapeMismatch::MaskShape {
                expected: (3, 3),
                found: (3, 2)
            }
        );
    }

    #[test]
    fn test_state_length() {
        let a = BoolMatrix::zeros(3, 3);
        assert_eq!(
            shape_err(check_shapes(&a, &a, &[false; 2])),
            ShapeMismatch::StateLength {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_topology_checked_before_mask() {
        let a = BoolMatrix::zeros(2, 3);
        let m = BoolMatrix::zeros(5, 5);
        assert!(matches!(
            shape_err(check_shapes(&a, &m, &[])),
            ShapeMismatch::NonSquareTopology { .. }
        ));
    }

    #[test]
    fn test_stepcount() {
        assert_eq!(check_stepcount(0).unwrap(), 0);
        assert_eq!(check_stepcount(7).unwrap(), 7);
        assert_eq!(
            shape_err(check_stepcount(-1)),
            ShapeMismatch::NegativeStepCount(-1)
        );
    }
}
