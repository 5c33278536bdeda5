//! Snapshot Codec: deterministic network-state encoder/decoder.
//!
//! Pure codec layer. No side-effects, no timestamps, no envelope.
//!
//! - `encode_snapshot`:  NetworkSnapshot → JSON string
//! - `decode_snapshot`:  JSON string → NetworkSnapshot (strict, no defaults)
//! - `restore_snapshot`: decode + shape validation
//! - `export_snapshot_to_file` / `import_snapshot_from_file`: file I/O
//! - `snapshot_hash`:    SHA-256 of the JSON (lowercase hex)

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use boolnet_engine::bits::{decode_bits, encode_bits};
use boolnet_engine::hashing::sha256_hex;
use boolnet_engine::invariants::check_state;
use boolnet_engine::{BoolMatrix, Network, Policy};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// All possible snapshot codec failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// JSON serialization failed.
    #[error("SerializationError: {0}")]
    Serialization(String),
    /// JSON deserialization failed (malformed, missing fields, unknown fields).
    #[error("DeserializationError: {0}")]
    Deserialization(String),
    /// Decoded matrices or state violate the shape contract.
    #[error("InvalidNetwork: {0}")]
    InvalidNetwork(String),
    /// File I/O error.
    #[error("IoError: {0}")]
    Io(String),
}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::Io(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Snapshot type
// ---------------------------------------------------------------------------

/// A network together with a point of its run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkSnapshot {
    pub adjacency: Vec<String>,
    pub mask: Vec<String>,
    pub state: String,
    /// Transitions applied to reach `state`.
    pub step: u64,
    pub policy: Policy,
}

impl NetworkSnapshot {
    pub fn capture(network: &Network, state: &[bool], step: u64, policy: Policy) -> Self {
        Self {
            adjacency: network.adjacency().to_bit_rows(),
            mask: network.mask().to_bit_rows(),
            state: encode_bits(state),
            step,
            policy,
        }
    }

    /// Parse and validate into a network and its state.
    pub fn to_parts(&self) -> Result<(Network, Vec<bool>), SnapshotError> {
        let invalid = |e: boolnet_engine::EngineError| SnapshotError::InvalidNetwork(e.to_string());
        let adjacency = BoolMatrix::from_bit_rows(&self.adjacency).map_err(invalid)?;
        let mask = BoolMatrix::from_bit_rows(&self.mask).map_err(invalid)?;
        let network = Network::new(adjacency, mask).map_err(invalid)?;
        let state = decode_bits(&self.state, 0).map_err(invalid)?;
        check_state(network.nodes(), &state).map_err(invalid)?;
        Ok((network, state))
    }
}

// ---------------------------------------------------------------------------
// Encoder / decoder
// ---------------------------------------------------------------------------

/// Compact JSON, field order as declared. Identical snapshots encode identically.
pub fn encode_snapshot(snapshot: &NetworkSnapshot) -> Result<String, SnapshotError> {
    serde_json::to_string(snapshot).map_err(|e| SnapshotError::Serialization(e.to_string()))
}

/// Strict decode. No shape validation; use `restore_snapshot` for that.
pub fn decode_snapshot(json: &str) -> Result<NetworkSnapshot, SnapshotError> {
    serde_json::from_str::<NetworkSnapshot>(json).map_err(|e| SnapshotError::Deserialization(e.to_string()))
}

/// Decode and validate. Safe entry point for untrusted input.
pub fn restore_snapshot(json: &str) -> Result<NetworkSnapshot, SnapshotError> {
    let snapshot = decode_snapshot(json)?;
    snapshot.to_parts()?;
    Ok(snapshot)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Write a snapshot as JSON, creating parent directories.
pub fn export_snapshot_to_file(snapshot: &NetworkSnapshot, path: &Path) -> Result<(), SnapshotError> {
    let json = encode_snapshot(snapshot)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json.as_bytes())?;
    Ok(())
}

/// Read, decode and validate a snapshot file.
pub fn import_snapshot_from_file(path: &Path) -> Result<NetworkSnapshot, SnapshotError> {
    let content = fs::read_to_string(path)?;
    restore_snapshot(&content)
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// SHA-256 of `encode_snapshot`. For file integrity, not the canonical
/// network hash from `hashing`.
pub fn snapshot_hash(snapshot: &NetworkSnapshot) -> Result<String, SnapshotError> {
    Ok(sha256_hex(encode_snapshot(snapshot)?.as_bytes()))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_snapshot() -> NetworkSnapshot {
        let network =
            Network::from_bit_rows(&["0110", "1010", "0001", "1100"], &["0100", "0010", "0000", "1000"]).unwrap();
        NetworkSnapshot::capture(&network, &[true, false, false, true], 3, Policy::And)
    }

    fn temp_path(case: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("boolnet_snapshot_codec_tests").join(case);
        let _ = fs::remove_dir_all(&dir);
        dir.join("snapshot.json")
    }

    #[test]
    fn encoding_is_stable() {
        let s = make_snapshot();
        let json1 = encode_snapshot(&s).unwrap();
        let json2 = encode_snapshot(&decode_snapshot(&json1).unwrap()).unwrap();
        assert_eq!(json1, json2);
        assert_eq!(
            json1,
            r#"{"adjacency":["0110","1010","0001","1100"],"mask":["0100","0010","0000","1000"],"state":"1001","step":3,"policy":"and"}"#
        );
    }

    #[test]
    fn mismatched_state_returns_invalid_network() {
        let mut s = make_snapshot();
        s.state = "101".to_string();
        let json = encode_snapshot(&s).unwrap();
        match restore_snapshot(&json).unwrap_err() {
            SnapshotError::InvalidNetwork(msg) => assert!(msg.contains("state must have 4"), "got: {}", msg),
            other => panic!("Expected InvalidNetwork, got: {:?}", other),
        }
    }

    #[test]
    fn non_square_topology_returns_invalid_network() {
        let mut s = make_snapshot();
        s.adjacency.pop();
        let json = encode_snapshot(&s).unwrap();
        assert!(matches!(restore_snapshot(&json), Err(SnapshotError::InvalidNetwork(_))));
    }

    #[test]
    fn bad_bit_char_returns_invalid_network() {
        let mut s = make_snapshot();
        s.mask[2] = "00x0".to_string();
        assert!(matches!(s.to_parts(), Err(SnapshotError::InvalidNetwork(_))));
    }

    #[test]
    fn unknown_or_missing_fields_rejected() {
        assert!(matches!(decode_snapshot(r#"{"adjacency":[]}"#), Err(SnapshotError::Deserialization(_))));
        let json = encode_snapshot(&make_snapshot()).unwrap().replacen('{', r#"{"extra":1,"#, 1);
        assert!(matches!(decode_snapshot(&json), Err(SnapshotError::Deserialization(_))));
    }

    #[test]
    fn file_roundtrip_matches() {
        let s = make_snapshot();
        let path = temp_path("file_roundtrip");
        export_snapshot_to_file(&s, &path).unwrap();
        assert_eq!(import_snapshot_from_file(&path).unwrap(), s);
        assert_eq!(fs::read_to_string(&path).unwrap(), encode_snapshot(&s).unwrap());
    }

    #[test]
    fn corrupted_file_returns_deserialization_error() {
        let path = temp_path("corrupted");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not valid json !!!}").unwrap();
        assert!(matches!(import_snapshot_from_file(&path), Err(SnapshotError::Deserialization(_))));
    }

    #[test]
    fn hash_matches_file_bytes() {
        let s = make_snapshot();
        let path = temp_path("hash_parity");
        export_snapshot_to_file(&s, &path).unwrap();
        let file_hash = sha256_hex(&fs::read(&path).unwrap());
        assert_eq!(snapshot_hash(&s).unwrap(), file_hash);
        assert_eq!(file_hash.len(), 64);
    }
}
