#![forbid(unsafe_code)]

//! BoolNet Engine
//!
//! Discrete-time dynamics of thresholded Boolean networks. Given a
//! topology, a per-edge mask and a state, compute the next state under
//! an aggregation policy, or a whole trajectory of states.
//!
//! No I/O. Only `NetworkEngine` keeps state between calls.

/// Engine v1. Changing any output bit requires a new version.
pub const ENGINE_VERSION: u32 = 1;

pub mod bits;
pub mod error;
pub mod matrix;
pub mod policy;
pub mod invariants;
pub mod network;
pub mod transition;
pub mod trajectory;
pub mod masking;
pub mod hashing;
pub mod engine;

pub use error::{EngineError, Result, ShapeMismatch};
pub use masking::{advance, advance_with_policy, and_masking, masking, or_masking, xor_masking};
pub use matrix::BoolMatrix;
pub use network::Network;
pub use policy::Policy;
pub use trajectory::Trajectory;
pub use transition::Schedule;
