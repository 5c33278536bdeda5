//! BoolNet Engine: Canonical Hashing
//!
//! Deterministic serialization + SHA-256. Byte-identical across platforms.
//!
//! Rules:
//!   - Compact UTF-8 JSON, no whitespace
//!   - Fixed field order, `engine_version` first
//!   - Boolean rows rendered as '0'/'1' strings

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::bits::encode_bits;
use crate::matrix::BoolMatrix;
use crate::network::Network;
use crate::trajectory::Trajectory;
use crate::ENGINE_VERSION;

/// `{"engine_version","nodes","adjacency","mask"}`
pub fn canonical_network_bytes(network: &Network) -> Vec<u8> {
    let mut root = header();
    root.insert("nodes".to_string(), Value::from(network.nodes() as u64));
    root.insert("adjacency".to_string(), rows_value(network.adjacency()));
    root.insert("mask".to_string(), rows_value(network.mask()));
    Value::Object(root).to_string().into_bytes()
}

pub fn canonical_network_hash(network: &Network) -> String {
    sha256_hex(&canonical_network_bytes(network))
}

/// `{"engine_version","nodes","steps","states"}`
pub fn canonical_trajectory_bytes(trajectory: &Trajectory) -> Vec<u8> {
    let mut root = header();
    root.insert("nodes".to_string(), Value::from(trajectory.nodes() as u64));
    root.insert("steps".to_string(), Value::from(trajectory.len() as u64));
    root.insert("states".to_string(), rows_value(trajectory.as_matrix()));
    Value::Object(root).to_string().into_bytes()
}

pub fn canonical_trajectory_hash(trajectory: &Trajectory) -> String {
    sha256_hex(&canonical_trajectory_bytes(trajectory))
}

/// Lowercase hex SHA-256.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn header() -> Map<String, Value> {
    let mut root = Map::new();
    root.insert("engine_version".to_string(), Value::from(ENGINE_VERSION));
    root
}

fn rows_value(matrix: &BoolMatrix) -> Value {
    Value::Array(
        matrix
            .iter_rows()
            .map(|r| Value::String(encode_bits(r)))
            .collect(),
    )
}
