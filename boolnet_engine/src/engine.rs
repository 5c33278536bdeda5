//! BoolNet Engine: Stateful Stepping
//!
//! Wraps the pure transition with a current state and a step counter.
//! Every step is validated and computed by `transition`; the engine
//! only remembers where it is.

use tracing::debug;

use crate::error::Result;
use crate::invariants::check_state;
use crate::network::Network;
use crate::policy::Policy;
use crate::trajectory::Trajectory;
use crate::transition::{step_unchecked, Schedule};

pub struct NetworkEngine {
    network: Network,
    policy: Policy,
    schedule: Schedule,
    state: Vec<bool>,
    steps_taken: u64,
}

impl NetworkEngine {
    /// Engine at the all-false state.
    pub fn new(network: Network, policy: Policy) -> Self {
        let state = vec![false; network.nodes()];
        Self {
            network,
            policy,
            schedule: Schedule::default(),
            state,
            steps_taken: 0,
        }
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the current state and reset the step counter.
    pub fn initialize_state(&mut self, state: &[bool]) -> Result<&[bool]> {
        check_state(self.network.nodes(), state)?;
        self.state = state.to_vec();
        self.steps_taken = 0;
        Ok(&self.state)
    }

    /// Advance one step and return the new state.
    pub fn step(&mut self) -> Result<&[bool]> {
        let next = self.peek_step();
        self.commit_step(next)
    }

    /// The state the next `step` would produce. Nothing changes.
    pub fn peek_step(&self) -> Vec<bool> {
        step_unchecked(
            self.network.adjacency(),
            self.network.mask(),
            &self.state,
            self.policy,
            self.schedule,
        )
    }

    /// Accept `next` as the result of one step.
    ///
    /// `next` should come from `peek_step` on the current state; only its
    /// length is checked here.
    pub fn commit_step(&mut self, next: Vec<bool>) -> Result<&[bool]> {
        check_state(self.network.nodes(), &next)?;
        self.state = next;
        self.steps_taken += 1;
        Ok(&self.state)
    }

    /// Advance `steps` times, returning the states visited.
    pub fn run(&mut self, steps: usize) -> Result<Trajectory> {
        let mut trajectory = Trajectory::empty(self.network.nodes());
        for _ in 0..steps {
            self.step()?;
            trajectory.push(&self.state)?;
        }
        debug!(steps, total = self.steps_taken, "engine run finished");
        Ok(trajectory)
    }

    /// Reset to `initial` and run again from scratch.
    pub fn replay(&mut self, initial: &[bool], steps: usize) -> Result<Trajectory> {
        self.initialize_state(initial)?;
        self.run(steps)
    }

    pub fn state(&self) -> &[bool] {
        &self.state
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::generate;

    fn cycle3() -> Network {
        Network::from_bit_rows(&["010", "001", "100"], &["000", "000", "000"]).unwrap()
    }

    #[test]
    fn test_starts_all_false() {
        let engine = NetworkEngine::new(cycle3(), Policy::Xor);
        assert_eq!(engine.state(), &[false, false, false]);
        assert_eq!(engine.steps_taken(), 0);
    }

    #[test]
    fn test_step_matches_generator() {
        let mut engine = NetworkEngine::new(cycle3(), Policy::Xor);
        engine.initialize_state(&[true, false, false]).unwrap();
        let t = engine.run(5).unwrap();
        let expected = generate(&cycle3(), &[true, false, false], 5, Policy::Xor, Schedule::Sequential).unwrap();
        assert_eq!(t, expected);
        assert_eq!(engine.steps_taken(), 5);
        assert_eq!(engine.state(), expected.final_state().unwrap());
    }

    #[test]
    fn test_run_continues_from_current_state() {
        let mut engine = NetworkEngine::new(cycle3(), Policy::Xor);
        engine.initialize_state(&[true, false, false]).unwrap();
        let first = engine.run(2).unwrap();
        let second = engine.run(2).unwrap();
        let whole = engine.replay(&[true, false, false], 4).unwrap();
        assert_eq!(whole.state(1), first.state(1));
        assert_eq!(whole.state(3), second.state(1));
        assert_eq!(engine.steps_taken(), 4);
    }

    #[test]
    fn test_peek_does_not_advance() {
        let mut engine = NetworkEngine::new(cycle3(), Policy::Xor);
        engine.initialize_state(&[true, false, false]).unwrap();
        let peeked = engine.peek_step();
        assert_eq!(peeked, vec![false, false, true]);
        assert_eq!(engine.state(), &[true, false, false]);
        assert_eq!(engine.steps_taken(), 0);

        assert_eq!(engine.commit_step(peeked).unwrap(), &[false, false, true]);
        assert_eq!(engine.steps_taken(), 1);
        assert!(engine.commit_step(vec![true]).is_err());
        assert_eq!(engine.steps_taken(), 1);
    }

    #[test]
    fn test_initialize_rejects_bad_length() {
        let mut engine = NetworkEngine::new(cycle3(), Policy::Or);
        assert!(engine.initialize_state(&[true]).is_err());
        assert_eq!(engine.state(), &[false, false, false]);
    }
}
