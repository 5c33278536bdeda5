//! `boolnet`: fixture checks and persisted runs from the command line.
//!
//! ```text
//! boolnet check <FIXTURES>
//! boolnet run --network <SNAPSHOT> --steps <N> [--config <FILE>] [--session <ID>] [--policy <P>]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use boolnet_engine::bits::encode_bits;
use boolnet_engine::Policy;
use boolnet_runtime::fixtures::{load_fixtures, run_fixture};
use boolnet_runtime::session::Session;
use boolnet_runtime::snapshot_codec::import_snapshot_from_file;
use boolnet_runtime::telemetry::init_tracing;
use boolnet_runtime::{Result, RuntimeConfig};

#[derive(Parser)]
#[command(name = "boolnet", version, about = "Thresholded Boolean network runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every fixture in a JSON array twice and compare with expectations.
    Check {
        fixtures: PathBuf,
    },
    /// Advance a network snapshot inside a new persisted session.
    Run {
        /// Snapshot file holding the network and its starting state.
        #[arg(long)]
        network: PathBuf,

        #[arg(long)]
        steps: usize,

        /// Runtime configuration (JSON).
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "run")]
        session: String,

        /// Overrides the policy stored in the snapshot.
        #[arg(long)]
        policy: Option<Policy>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing() {
        eprintln!("warning: {}", e);
    }

    let outcome = match cli.command {
        Command::Check { fixtures } => check(&fixtures),
        Command::Run {
            network,
            steps,
            config,
            session,
            policy,
        } => run(&network, steps, config.as_deref(), &session, policy).map(|()| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn check(path: &Path) -> Result<bool> {
    let fixtures = load_fixtures(path)?;
    let mut passed = 0usize;

    for fixture in &fixtures {
        match run_fixture(fixture) {
            Ok(outcome) if outcome.passed() => {
                passed += 1;
                println!(
                    "[PASS] {}: steps={}, final={}, hash={}",
                    fixture.name, fixture.steps, outcome.final_state, outcome.hash
                );
            }
            Ok(outcome) => {
                println!("[FAIL] {}:", fixture.name);
                if !outcome.deterministic {
                    println!("  Determinism fail: two runs hashed differently");
                }
                if outcome.final_matches == Some(false) {
                    println!(
                        "  Final state: got={} expected={}",
                        outcome.final_state,
                        fixture.expected_final.as_deref().unwrap_or_default()
                    );
                }
                if outcome.hash_matches == Some(false) {
                    println!(
                        "  Hash: got={} expected={}",
                        outcome.hash,
                        fixture.expected_hash.as_deref().unwrap_or_default()
                    );
                }
            }
            Err(e) => println!("[FAIL] {}: {}", fixture.name, e),
        }
    }

    println!("\nResults: {}/{} passed", passed, fixtures.len());
    Ok(passed == fixtures.len())
}

fn run(network: &Path, steps: usize, config: Option<&Path>, session_id: &str, policy: Option<Policy>) -> Result<()> {
    let mut config = match config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    let snapshot = import_snapshot_from_file(network)?;
    let (network, initial) = snapshot.to_parts()?;
    config.policy = policy.unwrap_or(snapshot.policy);

    let mut session = Session::create(&config, session_id, network, &initial)?;
    session.run(steps)?;

    println!("session: {}", session.session_dir().display());
    println!("final:   {}", encode_bits(session.state()));
    println!("hash:    {}", session.current_hash());
    Ok(())
}
