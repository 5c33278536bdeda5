//! Family: an ordered ensemble of distinct networks.
//!
//! Members are advanced independently from a shared initial state.

use rayon::prelude::*;
use tracing::{info, warn};

use boolnet_engine::hashing::canonical_network_hash;
use boolnet_engine::trajectory::generate;
use boolnet_engine::{Network, Policy, Schedule, Trajectory};

use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct Family {
    members: Vec<Network>,
}

impl Family {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a network. Returns false, leaving the family unchanged, when
    /// an equal network is already a member.
    pub fn add(&mut self, network: Network) -> bool {
        if self.contains(&network) {
            warn!(hash = %canonical_network_hash(&network), "network is already a member");
            return false;
        }
        self.members.push(network);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Network> {
        self.members.get(index)
    }

    pub fn contains(&self, network: &Network) -> bool {
        self.members.iter().any(|m| m == network)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Network> + '_ {
        self.members.iter()
    }

    /// Advance every member `steps` times from `initial`.
    ///
    /// Output order matches member order. Any member whose node count
    /// differs from `initial` fails the whole call.
    pub fn advance_all(
        &self,
        initial: &[bool],
        steps: usize,
        policy: Policy,
        schedule: Schedule,
    ) -> Result<Vec<Trajectory>> {
        if self.members.is_empty() {
            warn!("family is empty, nothing to advance");
            return Ok(Vec::new());
        }

        let total = self.members.len();
        self.members
            .par_iter()
            .enumerate()
            .map(|(index, network)| -> Result<Trajectory> {
                let trajectory = generate(network, initial, steps, policy, schedule)?;
                info!(member = index + 1, total, steps, "member advanced");
                Ok(trajectory)
            })
            .collect()
    }
}

impl FromIterator<Network> for Family {
    /// Duplicates are dropped as with `add`.
    fn from_iter<I: IntoIterator<Item = Network>>(iter: I) -> Self {
        let mut family = Family::new();
        for network in iter {
            family.add(network);
        }
        family
    }
}
