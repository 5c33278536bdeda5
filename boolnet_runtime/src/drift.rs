//! Drift detection: determinism verification and state comparison.
//!
//! Everything here is integer counting over node indices.

use boolnet_engine::hashing::canonical_trajectory_hash;
use boolnet_engine::invariants::check_state;
use boolnet_engine::trajectory::generate;
use boolnet_engine::{Network, Policy, Schedule, Trajectory};

use crate::error::{Result, RuntimeError};

/// Generate the same trajectory twice, once per schedule, and require
/// identical canonical hashes. Returns the shared hash.
pub fn verify_determinism(network: &Network, initial: &[bool], steps: usize, policy: Policy) -> Result<String> {
    let first = canonical_trajectory_hash(&generate(network, initial, steps, policy, Schedule::Sequential)?);
    let second = canonical_trajectory_hash(&generate(network, initial, steps, policy, Schedule::Parallel)?);

    if first != second {
        return Err(RuntimeError::DeterminismFailure { first, second });
    }
    Ok(first)
}

/// Structured comparison of two states over the same nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDrift {
    pub active_a: usize,
    pub active_b: usize,
    /// `active_b - active_a`.
    pub active_delta: i64,
    /// Nodes false in `a` and true in `b`, ascending.
    pub activated: Vec<usize>,
    /// Nodes true in `a` and false in `b`, ascending.
    pub deactivated: Vec<usize>,
}

impl StateDrift {
    pub fn is_identical(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty()
    }

    /// Number of nodes whose value changed.
    pub fn hamming_distance(&self) -> usize {
        self.activated.len() + self.deactivated.len()
    }
}

pub fn compare_states(state_a: &[bool], state_b: &[bool]) -> Result<StateDrift> {
    check_state(state_a.len(), state_b)?;

    let active_a = state_a.iter().filter(|&&b| b).count();
    let active_b = state_b.iter().filter(|&&b| b).count();

    let mut activated = Vec::new();
    let mut deactivated = Vec::new();
    for (i, (&was, &is)) in state_a.iter().zip(state_b).enumerate() {
        match (was, is) {
            (false, true) => activated.push(i),
            (true, false) => deactivated.push(i),
            _ => {}
        }
    }

    Ok(StateDrift {
        active_a,
        active_b,
        active_delta: active_b as i64 - active_a as i64,
        activated,
        deactivated,
    })
}

/// Index of the first step at which two trajectories differ.
///
/// A trajectory that is a strict prefix of the other diverges at its
/// own length. Different node counts diverge at step 0.
pub fn first_divergence(a: &Trajectory, b: &Trajectory) -> Option<usize> {
    if a.nodes() != b.nodes() {
        return Some(0);
    }
    if let Some(t) = a.iter().zip(b.iter()).position(|(x, y)| x != y) {
        return Some(t);
    }
    if a.len() != b.len() {
        return Some(a.len().min(b.len()));
    }
    None
}
