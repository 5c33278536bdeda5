//! Run records.
//!
//! A run log is one header followed by one record per step. Records are
//! pure data; every state in them is recomputable from the header.

use boolnet_engine::{Network, Policy};

/// Everything needed to reproduce a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHeader {
    pub network: Network,
    pub initial_state: Vec<bool>,
    pub policy: Policy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRecord {
    Header(RunHeader),
    /// State after one more transition.
    Step(Vec<bool>),
}

/// Sequence 1 is the header, sequence k + 1 is step k.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEnvelope {
    pub sequence: u64,
    pub record: RunRecord,
}

impl RecordEnvelope {
    pub fn header(header: RunHeader) -> Self {
        Self {
            sequence: 1,
            record: RunRecord::Header(header),
        }
    }

    pub fn step(sequence: u64, state: Vec<bool>) -> Self {
        Self {
            sequence,
            record: RunRecord::Step(state),
        }
    }
}
