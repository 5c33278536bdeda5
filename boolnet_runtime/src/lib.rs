#![forbid(unsafe_code)]

//! BoolNet Runtime
//!
//! Wraps the engine with run logs, replay, snapshots, sessions,
//! network families and drift detection.
//!
//! Every state is computed by the engine. Nothing stored here is
//! trusted without recomputation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod records;
pub mod proto_types;
pub mod proto_bridge;
pub mod trajectory_store;
pub mod replay;
pub mod snapshot;
pub mod snapshot_codec;
pub mod session;
pub mod family;
pub mod drift;
pub mod fixtures;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
