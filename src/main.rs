//! Dohyo - Entry Point
//!
//! Registers one human wrestler, fills the field with roster CPUs and plays
//! the tournament bout by bout from the terminal.

use dohyo::bout::phase::{Choice, Phase, SignatureMove};
use dohyo::bout::tables::{choice_info, choices_for, phase_definition};
use dohyo::bout::wrestler::WrestlerBuild;
use dohyo::bout::Match;
use dohyo::core::config::{load_config, DohyoConfig};
use dohyo::core::error::{DohyoError, Result};
use dohyo::core::types::{Millis, ParticipantId, Side};
use dohyo::tournament::{Participant, TournamentState};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const PLAYER_ID: &str = "player@dohyo.local";

/// Fight a basho against CPU rikishi
#[derive(Parser, Debug)]
#[command(name = "dohyo")]
struct Args {
    /// Ring name
    #[arg(long, default_value = "Hakuryu")]
    shikona: String,

    #[arg(long, default_value_t = 5)]
    height: u8,

    #[arg(long, default_value_t = 5)]
    weight: u8,

    #[arg(long, default_value_t = 5)]
    speed: u8,

    #[arg(long, default_value_t = 5)]
    technique: u8,

    /// Signature move, e.g. yorikiri or uwatenage
    #[arg(long, default_value = "yorikiri")]
    signature: String,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for a reproducible basho
    #[arg(long)]
    seed: Option<u64>,

    /// Snapshot the tournament here after every bout
    #[arg(long)]
    save: Option<PathBuf>,
}

fn now_millis() -> Millis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Millis)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dohyo=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => DohyoConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Dohyo starting (seed {})", seed);

    let signature = SignatureMove::from_name(&args.signature).ok_or_else(|| {
        DohyoError::InvalidBuild(format!("unknown signature move '{}'", args.signature))
    })?;
    let build =
        WrestlerBuild::new(args.height, args.weight, args.speed, args.technique, signature)?;

    let mut state = TournamentState::new(config);
    state.register(Participant::human(PLAYER_ID, "Player", args.shikona.as_str(), build)?)?;
    state.start(now_millis(), &mut rng)?;

    println!("\n=== DOHYO ===");
    println!(
        "First to {} wins takes the Emperor's Cup.",
        state.config.tournament.wins_needed_for_cup
    );
    println!(
        "Signature move: {} ({})",
        signature.name(),
        signature.description()
    );
    println!("Commands: <number or move>, standings, quit\n");

    let player = ParticipantId::from(PLAYER_ID);
    loop {
        if let Some(champion) = state.champion() {
            println!("\n{} wins the Emperor's Cup!", champion.display_name());
            break;
        }

        let bout = state.next_match(now_millis(), &mut rng)?.clone();
        if bout.is_completed() {
            report_result(&bout);
            continue;
        }

        let Ok(side) = bout.side_of(&player) else {
            // Only CPU bouts are left to fight
            break;
        };
        prompt_phase(&bout, side);

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "quit" | "q" => break,
            "standings" | "s" => {
                print_standings(&state);
                continue;
            }
            _ => {}
        }

        let phase = bout.current_phase;
        let choice = match parse_input(phase, input) {
            Ok(choice) => choice,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let now = now_millis();
        state.check_timeout(now, &mut rng)?;
        match state.submit_choice(&player, choice, now, &mut rng) {
            Ok(result) => {
                if let Some(outcome) = result.outcome {
                    println!("  {}", outcome.announcements.east);
                    println!("  {}", outcome.announcements.west);
                    println!("  >> {}", outcome.narrative);
                }
            }
            Err(DohyoError::PhaseAlreadyResolved(phase)) => {
                println!("Too slow! The {} phase was already decided.", phase.id());
            }
            Err(e) => println!("{}", e),
        }

        if let Some(bout) = state.current_match.as_ref().filter(|m| m.is_completed()) {
            report_result(bout);
            if let Some(path) = &args.save {
                state.save(path)?;
            }
        }
    }

    print_standings(&state);
    Ok(())
}

fn parse_input(phase: Phase, input: &str) -> Result<Choice> {
    let choices = choices_for(phase);
    if let Ok(n) = input.parse::<usize>() {
        if let Some(choice) = n.checked_sub(1).and_then(|i| choices.get(i)) {
            return Ok(*choice);
        }
    }
    Choice::parse_for(phase, input)
}

fn prompt_phase(bout: &Match, side: Side) {
    let definition = phase_definition(bout.current_phase);
    let wins = bout.phase_wins();
    println!(
        "\n{} vs {}  [{} - {}]",
        bout.east.display_name, bout.west.display_name, wins.east, wins.west
    );
    println!("{}: {}", definition.name, definition.description);

    let stats = bout.stats.get(side);
    let shown: Vec<String> = stats
        .nonzero()
        .iter()
        .map(|(stat, value)| format!("{} {:+}", stat.label(), value))
        .collect();
    if !shown.is_empty() {
        println!("Your stats: {}", shown.join(", "));
    }

    for (i, choice) in definition.choices.iter().enumerate() {
        let info = choice_info(*choice);
        println!("  {}. {:<22} {}", i + 1, info.label, info.description);
    }
}

fn report_result(bout: &Match) {
    let Some(winner) = bout.winner else {
        return;
    };
    let wins = bout.phase_wins();
    println!(
        "\n*** {} defeats {} by {} ({} - {}) ***",
        bout.corner(winner).display_name,
        bout.corner(winner.opponent()).display_name,
        bout.winning_move.as_deref().unwrap_or("decision"),
        wins.get(winner),
        wins.get(winner.opponent())
    );
}

fn print_standings(state: &TournamentState) {
    println!("\n--- Banzuke ---");
    for (i, p) in state.standings().iter().enumerate() {
        println!(
            "{:>2}. {:<16} {}-{}  cups {}",
            i + 1,
            p.display_name(),
            p.record.wins,
            p.record.losses,
            p.record.tournament_wins
        );
    }
}
