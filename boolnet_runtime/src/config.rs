//! Runtime configuration.
//!
//! JSON file, every field optional. Unknown fields are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use boolnet_engine::{Policy, Schedule};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Aggregation policy for sessions and `run`
    pub policy: Policy,

    /// Node evaluation schedule within a step
    pub schedule: Schedule,

    /// Write a snapshot every N steps (0 = never)
    pub snapshot_interval: u64,

    /// Root directory for session logs and snapshots
    pub data_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Xor,
            schedule: Schedule::default(),
            snapshot_interval: 0,
            data_dir: PathBuf::from("boolnet-data"),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RuntimeError::config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| RuntimeError::config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
    }

    /// Directory of one session.
    pub fn session_dir(&self, session_id: &str) -> PathBuf {
        self.data_dir.join(session_id)
    }
}
