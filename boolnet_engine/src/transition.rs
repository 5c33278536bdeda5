//! BoolNet Engine: Single-Step Transition
//!
//! Strict-majority update. For node i, every active inbound edge (i, j)
//! casts `policy.vote(mask[i][j], state[j])`; the node turns on iff
//! `active < votes_true * 2`. Ties and isolated nodes resolve to false.
//!
//! Nodes within a step read only immutable inputs and write their own
//! slot, so they may be evaluated on the rayon pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::invariants::check_state;
use crate::matrix::BoolMatrix;
use crate::network::Network;
use crate::policy::Policy;

/// Node count at which `Schedule::Auto` switches to parallel evaluation.
pub const DEFAULT_PARALLEL_MIN_NODES: usize = 256;

/// How the nodes of one step are evaluated. Output never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Schedule {
    Sequential,
    Parallel,
    Auto { min_nodes: usize },
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Auto {
            min_nodes: DEFAULT_PARALLEL_MIN_NODES,
        }
    }
}

impl Schedule {
    pub fn is_parallel_for(self, nodes: usize) -> bool {
        match self {
            Schedule::Sequential => false,
            Schedule::Parallel => true,
            Schedule::Auto { min_nodes } => nodes >= min_nodes,
        }
    }
}

/// Next value of one node from its adjacency row and mask row.
#[inline]
pub fn next_node_state(adj_row: &[bool], mask_row: &[bool], state: &[bool], policy: Policy) -> bool {
    let mut active = 0usize;
    let mut votes_true = 0usize;
    for ((&edge, &mask_bit), &neighbor) in adj_row.iter().zip(mask_row).zip(state) {
        if edge {
            active += 1;
            if policy.vote(mask_bit, neighbor) {
                votes_true += 1;
            }
        }
    }
    active < votes_true * 2
}

/// Next state of every node. `state` must have `network.nodes()` entries.
pub fn transition(network: &Network, state: &[bool], policy: Policy, schedule: Schedule) -> Result<Vec<bool>> {
    check_state(network.nodes(), state)?;
    Ok(step_unchecked(network.adjacency(), network.mask(), state, policy, schedule))
}

/// `transition` over raw matrices whose shapes were already checked.
pub(crate) fn step_unchecked(
    adjacency: &BoolMatrix,
    mask: &BoolMatrix,
    state: &[bool],
    policy: Policy,
    schedule: Schedule,
) -> Vec<bool> {
    let n = adjacency.rows();
    let node = |i: usize| next_node_state(adjacency.row_slice(i), mask.row_slice(i), state, policy);

    if schedule.is_parallel_for(n) {
        (0..n).into_par_iter().map(node).collect()
    } else {
        (0..n).map(node).collect()
    }
}
