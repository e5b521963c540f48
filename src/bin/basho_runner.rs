//! Headless Basho Runner
//!
//! Plays all-CPU tournaments and reports champions as JSON. Seeds run in
//! parallel; each tournament is reproducible from its seed.

use dohyo::core::config::{load_config, DohyoConfig};
use dohyo::core::error::Result;
use dohyo::core::types::Side;
use dohyo::tournament::{MatchSummary, TournamentState};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Headless Basho Runner - CPU tournaments for balance checks
#[derive(Parser, Debug)]
#[command(name = "basho_runner")]
#[command(about = "Run all-CPU tournaments and output champions as JSON")]
struct Args {
    /// Number of tournaments to run
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// First seed; run i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop a tournament without a champion after this many bouts
    #[arg(long, default_value_t = 500)]
    max_bouts: usize,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include every bout summary in the output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Serialize)]
struct BashoResult {
    seed: u64,
    champion: Option<String>,
    champion_record: Option<(u32, u32)>,
    bouts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<MatchSummary>>,
}

#[derive(Serialize)]
struct Report {
    runs: Vec<BashoResult>,
    /// Cups per ring name across all runs
    cups: BTreeMap<String, u32>,
    /// Share of listed bouts won from the east corner (verbose runs only)
    east_win_rate: f64,
}

fn run_basho(
    config: &DohyoConfig,
    seed: u64,
    max_bouts: usize,
    verbose: bool,
) -> Result<BashoResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = TournamentState::new(config.clone());
    state.start(0, &mut rng)?;

    let mut clock = 0;
    while state.champion.is_none() && state.history.len() < max_bouts {
        clock += 1;
        state.next_match(clock, &mut rng)?;
    }

    let champion = state.champion();
    Ok(BashoResult {
        seed,
        champion: champion.map(|p| p.display_name().to_string()),
        champion_record: champion.map(|p| (p.record.wins, p.record.losses)),
        bouts: state.history.len(),
        history: verbose.then(|| state.history.clone()),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dohyo=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DohyoConfig::default(),
    };
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let runs: Vec<BashoResult> = (0..args.runs)
        .into_par_iter()
        .map(|i| run_basho(&config, base_seed.wrapping_add(i), args.max_bouts, args.verbose))
        .collect::<Result<_>>()?;

    let mut cups = BTreeMap::new();
    for run in &runs {
        if let Some(name) = &run.champion {
            *cups.entry(name.clone()).or_insert(0) += 1;
        }
    }

    let (east, total) = runs
        .iter()
        .filter_map(|r| r.history.as_ref())
        .flatten()
        .fold((0usize, 0usize), |(east, total), summary| {
            let won_east = summary.winner_side == Side::East;
            (east + won_east as usize, total + 1)
        });
    let report = Report {
        runs,
        cups,
        east_win_rate: if total > 0 { east as f64 / total as f64 } else { 0.0 },
    };

    match args.format.as_str() {
        "text" => {
            println!("Basho Results");
            println!("=============");
            for run in &report.runs {
                println!(
                    "seed {:>20}: {} after {} bouts",
                    run.seed,
                    run.champion.as_deref().unwrap_or("no champion"),
                    run.bouts
                );
            }
            println!();
            for (name, count) in &report.cups {
                println!("{:<16} {}", name, count);
            }
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
