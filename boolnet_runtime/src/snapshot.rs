//! Snapshot layer: deterministic session snapshots on disk.
//!
//! Snapshots carry the encoded network state plus its hash for
//! verification. No timestamps in snapshot content.
//!
//! Sessions write them every `snapshot_interval` steps. They are an
//! export of the run, not a replay shortcut: reopening a session
//! always replays the whole log. `verify_snapshot_hash` checks a loaded
//! snapshot before it is trusted.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use boolnet_engine::hashing::sha256_hex;
use boolnet_engine::ENGINE_VERSION;

use crate::error::Result;
use crate::snapshot_codec::{encode_snapshot, restore_snapshot, NetworkSnapshot};

/// Snapshot on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Run-log sequence number at which this snapshot was taken.
    pub sequence: u64,
    /// `encode_snapshot` output.
    pub canonical_json: String,
    /// SHA-256 of `canonical_json`.
    pub hash: String,
    pub engine_version: u32,
}

impl Snapshot {
    /// Decode and validate the embedded network state.
    pub fn restore(&self) -> Result<NetworkSnapshot> {
        Ok(restore_snapshot(&self.canonical_json)?)
    }
}

fn snapshot_path(dir: &Path, sequence: u64) -> PathBuf {
    dir.join(format!("snapshot_{:06}.json", sequence))
}

/// Save a snapshot of `state` taken at `sequence`.
pub fn save_snapshot(dir: &Path, sequence: u64, state: &NetworkSnapshot) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let canonical_json = encode_snapshot(state)?;
    let hash = sha256_hex(canonical_json.as_bytes());
    let snap = Snapshot {
        sequence,
        canonical_json,
        hash,
        engine_version: ENGINE_VERSION,
    };

    let path = snapshot_path(dir, sequence);
    let content = serde_json::to_string(&snap)?;
    let mut file = File::create(&path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    info!(sequence, path = %path.display(), "snapshot written");
    Ok(path)
}

/// Snapshot at exactly `sequence`, or None.
pub fn load_snapshot(dir: &Path, sequence: u64) -> Result<Option<Snapshot>> {
    let path = snapshot_path(dir, sequence);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Snapshot with the highest sequence in `dir`, or None.
pub fn load_latest_snapshot(dir: &Path) -> Result<Option<Snapshot>> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut best_seq: Option<u64> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name_str = name.to_string_lossy();
        if let Some(seq) = name_str
            .strip_prefix("snapshot_")
            .and_then(|s| s.strip_suffix(".json"))
            .and_then(|s| s.parse::<u64>().ok())
        {
            if best_seq.map_or(true, |best| seq > best) {
                best_seq = Some(seq);
            }
        }
    }

    match best_seq {
        Some(seq) => load_snapshot(dir, seq),
        None => Ok(None),
    }
}

/// True if the hash matches the content and the engine version is current.
pub fn verify_snapshot_hash(snap: &Snapshot) -> bool {
    snap.engine_version == ENGINE_VERSION && sha256_hex(snap.canonical_json.as_bytes()) == snap.hash
}
