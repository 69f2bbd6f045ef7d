//! Match simulator CLI
//!
//! simulate: one request file → response JSON
//! batch:    N seeds of one request → summary JSON
//! config:   print a preset as YAML

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "sim_cli")]
#[command(about = "Run football match simulations from JSON requests", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a single match request
    Simulate {
        /// Request JSON file
        #[arg(long)]
        request: PathBuf,

        /// Write the response here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the response
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Simulate the same fixture over consecutive seeds
    Batch {
        /// Request JSON file (seed is the first seed of the run)
        #[arg(long)]
        request: PathBuf,

        /// Number of matches
        #[arg(long, default_value = "100")]
        count: u64,

        /// Engine config (YAML, or JSON by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print an engine preset as YAML
    Config {
        /// realistic | arcade | no-injuries
        #[arg(long, default_value = "realistic")]
        preset: String,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        1 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate { request, out, pretty } => {
            let req = sim_cli::load_request(&request)?;
            let json = sim_cli::run_simulate(&req, pretty)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "response written");
                }
                None => println!("{}", json),
            }
        }

        Commands::Batch { request, count, config } => {
            let req = sim_cli::load_request(&request)?;
            let config = config.as_deref().map(sim_cli::load_config).transpose()?;
            let summary = sim_cli::run_batch(&req, count, config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Config { preset } => {
            print!("{}", sim_cli::preset_yaml(&preset)?);
        }
    }

    Ok(())
}
