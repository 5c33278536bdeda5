//! Session manager: isolated runs with persist-before-commit semantics.
//!
//! Each session gets its own directory with a run log and snapshots.
//! Concurrency: Mutex for write serialization, no global mutable state.
//!
//! Persist-before-commit order:
//!   1. engine.peek_step()      computes the next state, engine unchanged
//!   2. store.append()          a failure leaves the session as it was
//!   3. engine.commit_step()    memory catches up with the log
//!   4. snapshot if interval reached
//!
//! Directory structure:
//!   <data_dir>/<session_id>/run.log
//!   <data_dir>/<session_id>/snapshots/

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use boolnet_engine::engine::NetworkEngine;
use boolnet_engine::hashing::canonical_trajectory_hash;
use boolnet_engine::{Network, Policy, Trajectory};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::proto_bridge::{envelope_to_proto, proto_to_envelopes};
use crate::records::{RecordEnvelope, RunHeader};
use crate::replay;
use crate::snapshot;
use crate::snapshot_codec::NetworkSnapshot;
use crate::trajectory_store::TrajectoryStore;

const LOG_FILE: &str = "run.log";
const SNAPSHOT_DIR: &str = "snapshots";

/// An isolated run with its own log and state.
pub struct Session {
    session_id: String,
    session_dir: PathBuf,
    config: RuntimeConfig,
    engine: NetworkEngine,
    store: TrajectoryStore,
    trajectory: Trajectory,
}

impl Session {
    /// Start a new run. Fails if the session already has a log.
    pub fn create(config: &RuntimeConfig, session_id: &str, network: Network, initial_state: &[bool]) -> Result<Self> {
        let session_dir = config.session_dir(session_id);
        let mut store = TrajectoryStore::open(&session_dir.join(LOG_FILE))?;
        if store.last_sequence() > 0 {
            return Err(RuntimeError::SessionExists(session_id.to_string()));
        }

        let mut engine = NetworkEngine::new(network, config.policy).with_schedule(config.schedule);
        engine.initialize_state(initial_state)?;

        let header = RunHeader {
            network: engine.network().clone(),
            initial_state: initial_state.to_vec(),
            policy: config.policy,
        };
        store.append(&envelope_to_proto(&RecordEnvelope::header(header)))?;

        info!(
            session = session_id,
            nodes = engine.network().nodes(),
            policy = %config.policy,
            "session created"
        );
        let nodes = engine.network().nodes();
        Ok(Self {
            session_id: session_id.to_string(),
            session_dir,
            config: config.clone(),
            engine,
            store,
            trajectory: Trajectory::empty(nodes),
        })
    }

    /// Reopen an existing run, replaying and verifying its whole log.
    ///
    /// The policy recorded in the log wins over `config.policy`.
    pub fn open(config: &RuntimeConfig, session_id: &str) -> Result<Self> {
        let session_dir = config.session_dir(session_id);
        let log_path = session_dir.join(LOG_FILE);
        if !log_path.is_file() {
            return Err(RuntimeError::SessionNotFound(session_id.to_string()));
        }
        let store = TrajectoryStore::open(&log_path)?;
        let records = proto_to_envelopes(&store.load_all()?)?;
        let (header, trajectory, hash) = replay::rebuild_with(&records, config)?;

        let mut engine = NetworkEngine::new(header.network, header.policy).with_schedule(config.schedule);
        engine.initialize_state(trajectory.final_state().unwrap_or(&header.initial_state))?;

        info!(session = session_id, steps = trajectory.len(), %hash, "session reopened");
        Ok(Self {
            session_id: session_id.to_string(),
            session_dir,
            config: config.clone(),
            engine,
            store,
            trajectory,
        })
    }

    /// Advance one step and persist it. Returns the new state.
    pub fn step(&mut self) -> Result<&[bool]> {
        let next = self.engine.peek_step();
        let sequence = self.store.last_sequence() + 1;
        self.store.append(&envelope_to_proto(&RecordEnvelope::step(sequence, next.clone())))?;
        self.trajectory.push(&next)?;
        self.engine.commit_step(next)?;

        let steps = self.trajectory.len() as u64;
        let interval = self.config.snapshot_interval;
        if interval > 0 && steps % interval == 0 {
            let snap = NetworkSnapshot::capture(self.engine.network(), self.engine.state(), steps, self.engine.policy());
            snapshot::save_snapshot(&self.snapshot_dir(), sequence, &snap)?;
        }

        Ok(self.engine.state())
    }

    /// Advance `steps` times, returning only the states this call produced.
    pub fn run(&mut self, steps: usize) -> Result<Trajectory> {
        let mut produced = Trajectory::empty(self.engine.network().nodes());
        for _ in 0..steps {
            let state = self.step()?.to_vec();
            produced.push(&state)?;
        }
        Ok(produced)
    }

    /// Full replay from the log: verify every step and resync the engine.
    pub fn replay_full(&mut self) -> Result<(Trajectory, String)> {
        let records = proto_to_envelopes(&self.store.load_all()?)?;
        let (header, trajectory, hash) = replay::rebuild_with(&records, &self.config)?;

        self.engine = NetworkEngine::new(header.network, header.policy).with_schedule(self.config.schedule);
        self.engine
            .initialize_state(trajectory.final_state().unwrap_or(&header.initial_state))?;
        self.trajectory = trajectory.clone();

        info!(session = %self.session_id, steps = trajectory.len(), %hash, "session replayed");
        Ok((trajectory, hash))
    }

    pub fn state(&self) -> &[bool] {
        self.engine.state()
    }

    /// Every state since the run started.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Canonical hash of the trajectory so far.
    pub fn current_hash(&self) -> String {
        canonical_trajectory_hash(&self.trajectory)
    }

    /// Last log sequence: 1 for the header plus one per step.
    pub fn current_sequence(&self) -> u64 {
        self.store.last_sequence()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn network(&self) -> &Network {
        self.engine.network()
    }

    pub fn policy(&self) -> Policy {
        self.engine.policy()
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.session_dir.join(SNAPSHOT_DIR)
    }
}

/// Thread-safe session handle using Mutex.
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Step under lock, returning a copy of the new state.
    pub fn step(&self) -> Result<Vec<bool>> {
        let mut session = self.inner.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(session.step()?.to_vec())
    }

    pub fn run(&self, steps: usize) -> Result<Trajectory> {
        let mut session = self.inner.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        session.run(steps)
    }

    pub fn current_hash(&self) -> Result<String> {
        let session = self.inner.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(session.current_hash())
    }

    pub fn current_sequence(&self) -> Result<u64> {
        let session = self.inner.lock().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(session.current_sequence())
    }
}
