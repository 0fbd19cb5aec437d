//! Statespace CLI - inspect persisted state spaces

use clap::{Parser, Subcommand};
use statespace_cli::{dump_states, dump_transitions, hash_state, summarize};
use statespace_core::ExplorationConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "statespace")]
#[command(about = "Inspect Petri-net state space streams")]
#[command(version)]
struct Cli {
    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    
    /// Logging level, overridden by RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
    
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the hash pairs of a JSON state
    Hash {
        /// State document, e.g. '{"P0": {"Default": 1}}'
        json: String,
    },
    
    /// Dump a state dictionary stream
    States {
        /// State dictionary file
        file: PathBuf,
    },
    
    /// Dump a transition stream
    Transitions {
        /// Transition file
        file: PathBuf,
    },
    
    /// Load both streams and print totals
    Summary {
        /// State dictionary file
        #[arg(short, long)]
        states: PathBuf,
        
        /// Transition file
        #[arg(short, long)]
        transitions: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    
    let config = match &cli.config {
        Some(path) => ExplorationConfig::from_file(path)?,
        None => ExplorationConfig::default(),
    };
    
    // Initialize logging
    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    
    if let Some(path) = &cli.config {
        info!("Loaded configuration from {}", path.display());
    }
    
    let scheme = config.hashing;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    
    match cli.command {
        Commands::Hash { json } => hash_state(&json, scheme, &mut out)?,
        Commands::States { file } => dump_states(&file, scheme, &mut out)?,
        Commands::Transitions { file } => dump_transitions(&file, scheme, &mut out)?,
        Commands::Summary {
            states,
            transitions,
        } => summarize(&states, &transitions, scheme, &mut out)?,
    }
    
    Ok(())
}
