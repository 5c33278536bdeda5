//! Fixture harness: known networks with expected outcomes.
//!
//! Every fixture is advanced twice through the host-facing `advance`
//! surface and both runs must hash identically.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use boolnet_engine::bits::{decode_bits, encode_bits};
use boolnet_engine::hashing::canonical_trajectory_hash;
use boolnet_engine::{advance_with_policy, BoolMatrix, Policy};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub name: String,
    pub adjacency: Vec<String>,
    pub mask: Vec<String>,
    pub initial_state: String,
    /// Signed so that negative counts reach the engine and are rejected there.
    pub steps: i64,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub expected_final: Option<String>,
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOutcome {
    /// Last state as a bit row. The initial state when `steps` is 0.
    pub final_state: String,
    pub hash: String,
    pub deterministic: bool,
    /// None when the fixture has no expectation for it.
    pub final_matches: Option<bool>,
    pub hash_matches: Option<bool>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.deterministic && self.final_matches != Some(false) && self.hash_matches != Some(false)
    }
}

/// Read a JSON array of fixtures.
pub fn load_fixtures(path: &Path) -> Result<Vec<Fixture>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run_fixture(fixture: &Fixture) -> Result<FixtureOutcome> {
    let adjacency = BoolMatrix::from_bit_rows(&fixture.adjacency)?;
    let mask = BoolMatrix::from_bit_rows(&fixture.mask)?;
    let initial = decode_bits(&fixture.initial_state, 0)?;

    // Run 1
    let first = advance_with_policy(&adjacency, &mask, &initial, fixture.steps, fixture.policy)?;
    // Run 2 (determinism check)
    let second = advance_with_policy(&adjacency, &mask, &initial, fixture.steps, fixture.policy)?;

    let hash = canonical_trajectory_hash(&first);
    let deterministic = hash == canonical_trajectory_hash(&second);
    let final_state = encode_bits(first.final_state().unwrap_or(&initial));

    Ok(FixtureOutcome {
        final_matches: fixture.expected_final.as_ref().map(|e| *e == final_state),
        hash_matches: fixture.expected_hash.as_ref().map(|e| *e == hash),
        final_state,
        hash,
        deterministic,
    })
}
