//! BoolNet Engine: Trajectory
//!
//! Row t of a trajectory is the state after t + 1 transitions. Steps
//! run strictly in order; only nodes within a step are parallel.

use tracing::{debug, trace};

use crate::error::Result;
use crate::invariants::check_state;
use crate::matrix::BoolMatrix;
use crate::network::Network;
use crate::policy::Policy;
use crate::transition::{step_unchecked, Schedule};

/// `steps × nodes` history of states, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trajectory {
    states: BoolMatrix,
}

impl Trajectory {
    /// Empty trajectory over `nodes` nodes.
    pub fn empty(nodes: usize) -> Self {
        Self {
            states: BoolMatrix::zeros(0, nodes),
        }
    }

    pub fn from_matrix(states: BoolMatrix) -> Self {
        Self { states }
    }

    pub fn nodes(&self) -> usize {
        self.states.cols()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.states.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.states.rows() == 0
    }

    /// State after step `t` (zero-based).
    pub fn state(&self, t: usize) -> Option<&[bool]> {
        self.states.row(t)
    }

    pub fn final_state(&self) -> Option<&[bool]> {
        self.len().checked_sub(1).and_then(|t| self.state(t))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[bool]> + '_ {
        self.states.iter_rows()
    }

    pub fn as_matrix(&self) -> &BoolMatrix {
        &self.states
    }

    pub fn into_matrix(self) -> BoolMatrix {
        self.states
    }

    /// Append the state after one more step. Length must equal `nodes()`.
    pub fn push(&mut self, state: &[bool]) -> Result<()> {
        check_state(self.nodes(), state)?;
        self.states.push_row(state)
    }
}

/// Apply the transition `steps` times starting from `initial`.
pub fn generate(
    network: &Network,
    initial: &[bool],
    steps: usize,
    policy: Policy,
    schedule: Schedule,
) -> Result<Trajectory> {
    check_state(network.nodes(), initial)?;
    generate_unchecked(network.adjacency(), network.mask(), initial, steps, policy, schedule)
}

/// `generate` over raw matrices whose shapes were already checked.
pub(crate) fn generate_unchecked(
    adjacency: &BoolMatrix,
    mask: &BoolMatrix,
    initial: &[bool],
    steps: usize,
    policy: Policy,
    schedule: Schedule,
) -> Result<Trajectory> {
    let n = adjacency.rows();
    debug!(nodes = n, steps, %policy, "generating trajectory");

    let mut trajectory = Trajectory::empty(n);
    let mut current = initial.to_vec();
    for t in 0..steps {
        let next = step_unchecked(adjacency, mask, &current, policy, schedule);
        trajectory.push(&next)?;
        trace!(step = t, active = next.iter().filter(|&&b| b).count(), "step");
        current = next;
    }
    Ok(trajectory)
}
