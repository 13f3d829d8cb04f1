//! tsdiff Prover CLI
//!
//! A command-line tool for raising the hashcash difficulty of an identity.
//!
//! # Commands
//!
//! - `init` - Start tracking an identity
//! - `show` - Print difficulty and phase of the tracked identity
//! - `difficulty` - Score a single identity/counter pair
//! - `phase` - Phase arithmetic for an identity length and counter
//! - `improve` - Search for a counter reaching a target difficulty
//! - `benchmark` - Run performance benchmark

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use tsdiff::difficulty::{
    decimal_length, is_slow_phase, its_constant_counter_length, its_until_slow_phase,
};
use tsdiff::identity::{default_state_path, ensure_state_dir};
use tsdiff::{improve, Algorithm, IdentityState, ImproveConfig};

#[derive(Parser)]
#[command(name = "tsdiff")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "Identity difficulty prover")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Custom identity state file path
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// JSON file with improve settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct IdentityArgs {
    /// Identity as UTF-8 text
    #[arg(long)]
    identity: Option<String>,

    /// Identity as hex-encoded bytes
    #[arg(long)]
    identity_hex: Option<String>,
}

impl IdentityArgs {
    fn into_state(self, algorithm: Algorithm) -> anyhow::Result<IdentityState> {
        let state = match (self.identity, self.identity_hex) {
            (Some(text), _) => IdentityState::new(text.into_bytes(), algorithm)?,
            (None, Some(hex)) => IdentityState::from_hex(&hex, algorithm)?,
            (None, None) => anyhow::bail!("An identity is required"),
        };
        Ok(state)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking an identity at counter 0
    Init {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Digest algorithm
        #[arg(short, long, value_enum, default_value_t = Algorithm::Sha1)]
        algorithm: Algorithm,

        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },

    /// Show difficulty and phase of the tracked identity
    Show,

    /// Score a single identity and counter
    Difficulty {
        #[command(flatten)]
        identity: IdentityArgs,

        #[arg(long)]
        counter: u64,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Sha1)]
        algorithm: Algorithm,
    },

    /// Phase arithmetic for an identity length and counter
    Phase {
        #[arg(long)]
        identity_len: usize,

        #[arg(long)]
        counter: u64,
    },

    /// Search for a counter reaching the target difficulty
    Improve {
        /// Target difficulty (number of zero bits)
        #[arg(short, long)]
        target: u32,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Maximum number of counters to examine
        #[arg(long)]
        max_iterations: Option<u64>,

        /// Do not search past the last fast-phase counter
        #[arg(long)]
        stop_at_slow_phase: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "100000")]
        count: u64,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Sha1)]
        algorithm: Algorithm,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state_path = cli.state.unwrap_or_else(default_state_path);

    let result = match cli.command {
        Commands::Init {
            identity,
            algorithm,
            force,
        } => cmd_init(identity, algorithm, force, &state_path),
        Commands::Show => cmd_show(&state_path),
        Commands::Difficulty {
            identity,
            counter,
            algorithm,
        } => cmd_difficulty(identity, counter, algorithm),
        Commands::Phase {
            identity_len,
            counter,
        } => cmd_phase(identity_len, counter),
        Commands::Improve {
            target,
            threads,
            max_iterations,
            stop_at_slow_phase,
        } => load_config(cli.config.as_deref()).and_then(|mut config| {
            if threads.is_some() {
                config.threads = threads;
            }
            if max_iterations.is_some() {
                config.max_iterations = max_iterations;
            }
            config.stop_at_slow_phase |= stop_at_slow_phase;
            cmd_improve(target, config, &state_path)
        }),
        Commands::Benchmark { count, algorithm } => cmd_benchmark(count, algorithm),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ImproveConfig> {
    match path {
        Some(path) => Ok(ImproveConfig::load_from_file(path)?),
        None => Ok(ImproveConfig::default()),
    }
}

fn load_state(path: &Path) -> anyhow::Result<IdentityState> {
    if !path.exists() {
        anyhow::bail!(
            "No identity state found at {}. Create one with 'tsdiff init'",
            path.display()
        );
    }
    Ok(IdentityState::load_from_file(path)?)
}

fn cmd_init(
    identity: IdentityArgs,
    algorithm: Algorithm,
    force: bool,
    path: &Path,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Identity state already exists at {}. Pass --force to replace it.",
            path.display()
        );
    }

    let state = identity.into_state(algorithm)?;
    let path = ensure_state_dir(path)?;
    state.save_to_file(&path)?;

    println!("Identity initialized!");
    println!("Length: {} bytes", state.identity().len());
    println!("Algorithm: {}", state.algorithm);
    println!("Difficulty: {}", state.best_difficulty);
    println!("Saved to: {}", path.display());

    Ok(())
}

fn cmd_show(path: &Path) -> anyhow::Result<()> {
    let state = load_state(path)?;
    let identity_len = state.identity().len();

    println!("Identity: {}", hex::encode(state.identity()));
    println!("Length: {} bytes", identity_len);
    println!("Algorithm: {}", state.algorithm);
    println!("Counter: {}", state.counter);
    println!("Difficulty: {}", state.difficulty());
    println!(
        "Best: {} at counter {}",
        state.best_difficulty, state.best_counter
    );
    print_phase(identity_len, state.counter);

    Ok(())
}

fn cmd_difficulty(identity: IdentityArgs, counter: u64, algorithm: Algorithm) -> anyhow::Result<()> {
    let state = identity.into_state(algorithm)?;
    println!("{}", algorithm.difficulty(state.identity(), counter));
    Ok(())
}

fn cmd_phase(identity_len: usize, counter: u64) -> anyhow::Result<()> {
    print_phase(identity_len, counter);
    Ok(())
}

fn print_phase(identity_len: usize, counter: u64) {
    let phase = if is_slow_phase(identity_len, counter) {
        "slow"
    } else {
        "fast"
    };
    println!("Phase: {}", phase);
    println!("Counter digits: {}", decimal_length(counter));

    match its_until_slow_phase(identity_len, counter) {
        Ok(u64::MAX) => println!("Until slow phase: never"),
        Ok(remaining) => println!("Until slow phase: {}", remaining),
        Err(e) => println!("Until slow phase: n/a ({})", e),
    }

    match its_constant_counter_length(counter) {
        u64::MAX => println!("Until counter widens: never"),
        remaining => println!("Until counter widens: {}", remaining),
    }
}

fn cmd_improve(target: u32, config: ImproveConfig, path: &Path) -> anyhow::Result<()> {
    let mut state = load_state(path)?;

    if state.best_difficulty >= target {
        println!(
            "Counter {} already has difficulty {} (target {})",
            state.best_counter, state.best_difficulty, target
        );
        return Ok(());
    }

    let start = state.counter.saturating_add(1);
    let threads = config.threads.unwrap_or_else(num_cpus::get);
    let config = ImproveConfig {
        threads: Some(threads),
        ..config
    };

    println!("Improving identity...");
    println!("Algorithm: {}", state.algorithm);
    println!("Target: {} bits", target);
    println!("Starting counter: {}", start);
    println!("Threads: {}", threads);

    let outcome = improve(state.identity(), state.algorithm, start, target, &config)?;
    state.advance(outcome.counter, outcome.difficulty);
    state.save_to_file(path)?;

    println!("\nFound counter!");
    println!("Counter: {}", outcome.counter);
    println!("Difficulty: {}", outcome.difficulty);
    println!("Hashes computed: {}", outcome.searched);
    println!("Hashrate: {:.2} H/s", outcome.hashrate());

    Ok(())
}

fn cmd_benchmark(count: u64, algorithm: Algorithm) -> anyhow::Result<()> {
    println!("Running benchmark with {} hashes ({})...", count, algorithm);

    let engine = algorithm.engine(b"benchmark identity for tsdiff");
    let start = Instant::now();

    let mut best = 0u32;
    for counter in 0..count {
        best = best.max(engine.difficulty(counter));
    }

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total hashes: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);
    println!("  Best difficulty: {}", best);

    println!("\nAlgorithm parameters:");
    println!("  Digest size: {} bytes", algorithm.digest_size());
    println!("  Max difficulty: {}", algorithm.max_difficulty());
    println!(
        "  Length budget: {} bytes ({} reserved)",
        tsdiff::difficulty::TOTAL_LENGTH_BUDGET,
        tsdiff::difficulty::RESERVED_OVERHEAD
    );

    Ok(())
}
