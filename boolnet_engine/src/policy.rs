//! BoolNet Engine: Edge Contribution Policy
//!
//! Combines an edge's mask bit with the source node's state into a
//! single vote. Pure and total for every policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Boolean operator applied per active edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Xor,
    And,
    Or,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Xor, Policy::And, Policy::Or];

    /// Vote of one edge.
    #[inline]
    pub fn vote(self, mask_bit: bool, neighbor_state: bool) -> bool {
        match self {
            Policy::Xor => mask_bit ^ neighbor_state,
            Policy::And => mask_bit && neighbor_state,
            Policy::Or => mask_bit || neighbor_state,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Xor => "xor",
            Policy::And => "and",
            Policy::Or => "or",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown policy {0:?}, expected one of xor, and, or")]
pub struct UnknownPolicy(pub String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xor" => Ok(Policy::Xor),
            "and" => Ok(Policy::And),
            "or" => Ok(Policy::Or),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
