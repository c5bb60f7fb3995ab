//! Scratch game command-line host
//!
//! Usage:
//!   scratch-game --config config.json --betting-amount 100
//!   scratch-game --config config.json --betting-amount 100 --seed 42
//!   scratch-game --config config.json --betting-amount 100 --matrix '[["A","A","B"],["A","+1000","B"],["A","A","B"]]'

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use rf_scratch::{ConfigLoader, Grid, ScratchEngine};

#[derive(Parser)]
#[command(name = "scratch-game", about = "Play one round of a scratch game")]
struct Cli {
    /// Game configuration file (JSON, or YAML by extension)
    #[arg(long)]
    config: PathBuf,

    /// Bet amount
    #[arg(long, allow_negative_numbers = true)]
    betting_amount: String,

    /// Seed for a reproducible grid
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate this grid (JSON array of rows) instead of generating one
    #[arg(long)]
    matrix: Option<String>,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let bet: Decimal = cli
        .betting_amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid betting amount '{}'", cli.betting_amount))?;

    let config = ConfigLoader::new()
        .load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let engine = ScratchEngine::new(&config)?;

    let result = match cli.matrix {
        Some(matrix) => {
            let rows: Vec<Vec<String>> =
                serde_json::from_str(&matrix).context("Matrix must be a JSON array of rows")?;
            engine.play_with_grid(bet, Grid::from_rows(rows)?)?
        }
        None => {
            let mut rng = match cli.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                None => ChaCha8Rng::from_os_rng(),
            };
            engine.play(&mut rng, bet)?
        }
    };

    result.to_json_pretty().context("Failed to serialize result")
}
