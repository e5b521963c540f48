//! Tournament bookkeeping integration tests

use dohyo::bout::ai::random_choice;
use dohyo::bout::phase::SignatureMove;
use dohyo::bout::wrestler::WrestlerBuild;
use dohyo::core::config::DohyoConfig;
use dohyo::core::error::DohyoError;
use dohyo::core::types::ParticipantId;
use dohyo::tournament::{Participant, TournamentState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn human(id: &str, shikona: &str) -> Participant {
    Participant::human(id, id, shikona, WrestlerBuild::balanced(SignatureMove::Uwatenage)).unwrap()
}

/// Pair bouts until someone takes the cup, letting the move timer play
/// for any human corner
fn run_to_champion(state: &mut TournamentState, rng: &mut ChaCha8Rng) {
    let budget = state.config.bout.timing.move_selection_timeout_ms;
    let mut clock = 0;
    while state.champion.is_none() {
        clock += budget;
        let waiting = !state.next_match(clock, rng).unwrap().is_completed();
        if waiting {
            state.check_timeout(clock + budget, rng).unwrap();
        }
        assert!(state.history.len() < 1_000, "tournament never concluded");
    }
}

#[test]
fn test_cpu_basho_crowns_champion_at_three_wins() {
    let mut state = TournamentState::new(DohyoConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    state.start(0, &mut rng).unwrap();
    assert_eq!(state.participants.len(), 8);

    run_to_champion(&mut state, &mut rng);

    let champion = state.champion().unwrap();
    assert_eq!(champion.record.wins, 3);
    assert_eq!(champion.record.tournament_wins, 1);

    let wins: u32 = state.participants.values().map(|p| p.record.wins).sum();
    let losses: u32 = state.participants.values().map(|p| p.record.losses).sum();
    assert_eq!(wins as usize, state.history.len());
    assert_eq!(losses as usize, state.history.len());

    // Pairing halts once the cup is taken
    let err = state.next_match(10_000, &mut rng).unwrap_err();
    assert!(matches!(err, DohyoError::TournamentConcluded(_)));
}

#[test]
fn test_human_bout_updates_records() {
    let mut state = TournamentState::new(DohyoConfig::default());
    state.register(human("player@dohyo", "Hakuryu")).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let player = ParticipantId::from("player@dohyo");

    let opponent = state.start(0, &mut rng).unwrap().west.participant_id.clone();

    let mut now = 0;
    while !state.current_match.as_ref().unwrap().is_completed() {
        now += 1_000;
        let phase = state.current_match.as_ref().unwrap().current_phase;
        let choice = random_choice(phase, &mut rng);
        let result = state.submit_choice(&player, choice, now, &mut rng).unwrap();
        // The CPU answers at once, so every submission resolves its phase
        assert!(result.resolved);
    }

    let me = state.participant(&player).unwrap().record;
    let them = state.participant(&opponent).unwrap().record;
    assert_eq!(me.wins + me.losses, 1);
    assert_eq!(them.wins + them.losses, 1);
    assert_ne!(me.wins, them.wins);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].phase_winners.len(), 5);
}

#[test]
fn test_timeouts_alone_finish_a_human_bout() {
    let mut state = TournamentState::new(DohyoConfig::default());
    state.register(human("a@dohyo", "Asahi")).unwrap();
    state.register(human("b@dohyo", "Bando")).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    state.start(0, &mut rng).unwrap();

    let budget = state.config.bout.timing.move_selection_timeout_ms;
    let mut now = 0;
    for _ in 0..5 {
        now += budget;
        let check = state.check_timeout(now, &mut rng).unwrap();
        assert!(check.expired);
    }

    let bout = state.current_match.as_ref().unwrap();
    assert!(bout.is_completed());
    assert!(bout.phase_results.values().all(|o| o.timed_out.east && o.timed_out.west));
    assert_eq!(state.history.len(), 1);
}

#[test]
fn test_restart_clears_records_but_keeps_cups() {
    let mut state = TournamentState::new(DohyoConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    state.register(human("a@dohyo", "Asahi")).unwrap();
    state.start(0, &mut rng).unwrap();
    run_to_champion(&mut state, &mut rng);

    let a = ParticipantId::from("a@dohyo");
    let cups_before = state.participant(&a).unwrap().record.tournament_wins;

    state.start(0, &mut rng).unwrap();
    assert!(state.champion.is_none());
    assert!(state.history.is_empty());
    let record = state.participant(&a).unwrap().record;
    assert_eq!(record.tournament_wins, cups_before);
    assert!(record.wins + record.losses <= 1);
    assert_eq!(state.participants.len(), 8);
}

#[test]
fn test_snapshot_round_trip() {
    let mut state = TournamentState::new(DohyoConfig::default());
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    state.register(human("a@dohyo", "Asahi")).unwrap();
    state.start(0, &mut rng).unwrap();
    state
        .submit_choice(
            &"a@dohyo".into(),
            random_choice(dohyo::bout::Phase::Salt, &mut rng),
            500,
            &mut rng,
        )
        .unwrap();

    let json = state.to_json().unwrap();
    let restored = TournamentState::from_json(&json).unwrap();
    assert_eq!(restored.participants.len(), state.participants.len());
    let original = state.current_match.as_ref().unwrap();
    let reloaded = restored.current_match.as_ref().unwrap();
    assert_eq!(reloaded.id, original.id);
    assert_eq!(reloaded.current_phase, original.current_phase);
    assert_eq!(reloaded.stats, original.stats);

    let path = std::env::temp_dir().join(format!("dohyo-snapshot-{}.json", std::process::id()));
    state.save(&path).unwrap();
    let loaded = TournamentState::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded.standings().len(), 8);
}

#[test]
fn test_bad_snapshot_is_an_error() {
    let err = TournamentState::from_json("{ not json").unwrap_err();
    assert!(matches!(err, DohyoError::SerdeError(_)));
}
