//! Replay orchestrator: rebuild a trajectory from a run log.
//!
//! Every stored step is recomputed by the engine from the header and
//! compared against the log. Stored states are never trusted.

use tracing::{debug, warn};

use boolnet_engine::engine::NetworkEngine;
use boolnet_engine::hashing::canonical_trajectory_hash;
use boolnet_engine::Trajectory;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::records::{RecordEnvelope, RunHeader, RunRecord};

/// Rebuild the run described by `records`.
///
/// 1. Read the header (sequence 1)
/// 2. Recompute one transition per step record and compare
/// 3. Return (header, trajectory, canonical trajectory hash)
pub fn rebuild_trajectory(records: &[RecordEnvelope]) -> Result<(RunHeader, Trajectory, String)> {
    rebuild_with(records, &RuntimeConfig::default())
}

/// Same as `rebuild_trajectory` with the schedule taken from `config`.
pub fn rebuild_with(records: &[RecordEnvelope], config: &RuntimeConfig) -> Result<(RunHeader, Trajectory, String)> {
    let (first, rest) = records.split_first().ok_or(RuntimeError::HeaderRequired)?;
    let header = match &first.record {
        RunRecord::Header(h) if first.sequence == 1 => h.clone(),
        RunRecord::Header(_) => {
            return Err(RuntimeError::Sequence {
                expected: 1,
                got: first.sequence,
            })
        }
        RunRecord::Step(_) => return Err(RuntimeError::HeaderRequired),
    };

    let mut engine = NetworkEngine::new(header.network.clone(), header.policy).with_schedule(config.schedule);
    engine.initialize_state(&header.initial_state)?;

    let mut trajectory = Trajectory::empty(header.network.nodes());
    for (k, envelope) in rest.iter().enumerate() {
        let expected = k as u64 + 2;
        if envelope.sequence != expected {
            return Err(RuntimeError::Sequence {
                expected,
                got: envelope.sequence,
            });
        }
        let stored = match &envelope.record {
            RunRecord::Step(s) => s,
            RunRecord::Header(_) => return Err(RuntimeError::DuplicateHeader),
        };
        let next = engine.step()?;
        if next != stored.as_slice() {
            warn!(sequence = envelope.sequence, "stored step disagrees with recomputation");
            return Err(RuntimeError::ReplayDivergence {
                sequence: envelope.sequence,
            });
        }
        trajectory.push(next)?;
    }

    let hash = canonical_trajectory_hash(&trajectory);
    debug!(steps = trajectory.len(), %hash, "replay finished");
    Ok((header, trajectory, hash))
}

/// Rebuild and return only the canonical trajectory hash.
pub fn rebuild_hash(records: &[RecordEnvelope]) -> Result<String> {
    let (_, _, hash) = rebuild_trajectory(records)?;
    Ok(hash)
}
