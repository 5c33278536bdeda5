//! Runtime error types.

use thiserror::Error;

use boolnet_engine::EngineError;

use crate::snapshot_codec::SnapshotError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Engine rejected the call (shape contract).
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Run-log sequence must be strictly increasing with no gaps.
    #[error("sequence violation: expected {expected}, got {got}")]
    Sequence { expected: u64, got: u64 },

    /// First record of a run log must be the run header.
    #[error("first record must be the run header")]
    HeaderRequired,

    /// Only the first record may be a run header.
    #[error("run header can only be the first record")]
    DuplicateHeader,

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// Stored step disagrees with the recomputed one.
    #[error("replay diverged from the log at sequence {sequence}")]
    ReplayDivergence { sequence: u64 },

    #[error("determinism failure: run 1 = {first}, run 2 = {second}")]
    DeterminismFailure { first: String, second: String },

    #[error("session {0:?} already exists")]
    SessionExists(String),

    #[error("session {0:?} has no run log")]
    SessionNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

impl RuntimeError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRecord(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
