//! Tournament bookkeeping
//!
//! Owns the entrants, the single active match and the archive of finished
//! bouts. Every mutation goes through `&mut self`, so a host sharing one
//! tournament between threads wraps it in a single mutex.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bout::execution::{BoutObserver, Match, SubmitOutcome, TimeoutCheck};
use crate::bout::phase::{Choice, Phase};
use crate::core::config::DohyoConfig;
use crate::core::error::{DohyoError, Result};
use crate::core::types::{MatchId, Millis, ParticipantId, Side};
use crate::tournament::pairing::pick_pairing;
use crate::tournament::participant::Participant;
use crate::tournament::roster::create_cpu_participant;

/// Archived result of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: MatchId,
    pub east: ParticipantId,
    pub west: ParticipantId,
    pub winner: ParticipantId,
    pub loser: ParticipantId,
    pub winner_side: Side,
    pub winning_move: Option<String>,
    pub phase_winners: BTreeMap<Phase, Option<Side>>,
    pub completed_at: Millis,
}

impl MatchSummary {
    /// `None` until the match has a winner
    pub fn from_match(bout: &Match) -> Option<Self> {
        let winner_side = bout.winner?;
        let loser_side = winner_side.opponent();
        Some(Self {
            match_id: bout.id,
            east: bout.east.participant_id.clone(),
            west: bout.west.participant_id.clone(),
            winner: bout.corner(winner_side).participant_id.clone(),
            loser: bout.corner(loser_side).participant_id.clone(),
            winner_side,
            winning_move: bout.winning_move.clone(),
            phase_winners: bout
                .phase_results
                .iter()
                .map(|(phase, outcome)| (*phase, outcome.winner))
                .collect(),
            completed_at: bout.completed_at.unwrap_or(bout.created_at),
        })
    }
}

#[derive(Default, Serialize, Deserialize)]
pub struct TournamentState {
    pub config: DohyoConfig,
    pub participants: BTreeMap<ParticipantId, Participant>,
    pub current_match: Option<Match>,
    pub history: Vec<MatchSummary>,
    pub champion: Option<ParticipantId>,
    #[serde(skip)]
    observers: Vec<Box<dyn BoutObserver>>,
}

impl std::fmt::Debug for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TournamentState")
            .field("participants", &self.participants.len())
            .field("current_match", &self.current_match.as_ref().map(|m| m.id))
            .field("history", &self.history.len())
            .field("champion", &self.champion)
            .finish_non_exhaustive()
    }
}

impl TournamentState {
    pub fn new(config: DohyoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn register(&mut self, participant: Participant) -> Result<()> {
        if self.participants.contains_key(&participant.id) {
            return Err(DohyoError::DuplicateParticipant(participant.id));
        }
        participant.validate()?;

        tracing::info!(
            "Registered {} ({})",
            participant.id,
            participant.display_name()
        );
        self.participants.insert(participant.id.clone(), participant);
        Ok(())
    }

    pub fn participant(&self, id: &ParticipantId) -> Result<&Participant> {
        self.participants
            .get(id)
            .ok_or_else(|| DohyoError::UnknownParticipant(id.clone()))
    }

    /// Receive every bout event from now on
    pub fn subscribe(&mut self, observer: Box<dyn BoutObserver>) {
        self.observers.push(observer);
    }

    pub fn champion(&self) -> Option<&Participant> {
        self.champion.as_ref().and_then(|id| self.participants.get(id))
    }

    /// Drop CPU entrants and clear every per-tournament record
    pub fn reset(&mut self) {
        self.participants.retain(|_, p| !p.is_cpu());
        for participant in self.participants.values_mut() {
            participant.record.clear_bouts();
        }
        self.current_match = None;
        self.history.clear();
        self.champion = None;
        tracing::info!("Tournament reset, {} entrants kept", self.participants.len());
    }

    /// Reset, fill the field with roster CPUs and pair the first bout
    pub fn start<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Result<&Match> {
        self.reset();

        let humans = self.participants.len();
        let cpu_needed = self.config.tournament.tournament_size.saturating_sub(humans);
        let mut used: BTreeSet<u32> = self
            .participants
            .values()
            .filter_map(|p| p.wrestler_id)
            .collect();

        // CPU ids skip any key a human already holds
        let mut index = 0;
        let mut added = 0;
        while added < cpu_needed {
            let cpu = create_cpu_participant(index, &used);
            index += 1;
            if self.participants.contains_key(&cpu.id) {
                continue;
            }
            if let Some(wrestler_id) = cpu.wrestler_id {
                used.insert(wrestler_id);
            }
            self.participants.insert(cpu.id.clone(), cpu);
            added += 1;
        }

        tracing::info!("Tournament started: {} humans + {} CPU", humans, cpu_needed);
        self.next_match(now, rng)
    }

    /// The active match, or a freshly paired one once the last has finished.
    /// CPU-vs-CPU pairings are fought out before returning.
    pub fn next_match<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) -> Result<&Match> {
        if let Some(champion) = &self.champion {
            return Err(DohyoError::TournamentConcluded(champion.clone()));
        }

        let active = matches!(&self.current_match, Some(bout) if !bout.is_completed());
        if !active {
            let available: Vec<&Participant> = self.participants.values().collect();
            let pairing = pick_pairing(&available, rng).ok_or(DohyoError::NotEnoughEntrants {
                have: available.len(),
            })?;

            let east = self.participant(&pairing.east)?.corner();
            let west = self.participant(&pairing.west)?.corner();
            let mut bout = Match::new(MatchId::from_rng(rng), east, west, now);
            tracing::info!(
                "Match: {} vs {}",
                bout.east.display_name,
                bout.west.display_name
            );

            if bout.east.is_cpu() && bout.west.is_cpu() {
                bout.run_cpu_bout(now, &self.config.bout, rng)?;
            }

            self.current_match = Some(bout);
            self.after_progress(0, true)?;
        }

        self.current_match.as_ref().ok_or(DohyoError::NoActiveMatch)
    }

    /// Submit a choice on behalf of a participant in the active match
    pub fn submit_choice<R: Rng + ?Sized>(
        &mut self,
        participant_id: &ParticipantId,
        choice: Choice,
        now: Millis,
        rng: &mut R,
    ) -> Result<SubmitOutcome> {
        let bout = self.current_match.as_mut().ok_or(DohyoError::NoActiveMatch)?;
        let side = bout.side_of(participant_id)?;
        let seen = bout.log.len();
        let was_active = !bout.is_completed();

        let result = bout.submit_choice(side, choice, now, &self.config.bout, rng)?;
        self.after_progress(seen, was_active)?;
        Ok(result)
    }

    /// Run the move timer for the active match
    pub fn check_timeout<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        rng: &mut R,
    ) -> Result<TimeoutCheck> {
        let bout = self.current_match.as_mut().ok_or(DohyoError::NoActiveMatch)?;
        let seen = bout.log.len();
        let was_active = !bout.is_completed();
        let budget = self.config.bout.timing.move_selection_timeout_ms;

        let result = bout.check_timeout(now, budget, &self.config.bout, rng)?;
        self.after_progress(seen, was_active)?;
        Ok(result)
    }

    /// Forward new events to observers and book a match that just finished
    fn after_progress(&mut self, seen: usize, was_active: bool) -> Result<()> {
        let Some(bout) = self.current_match.as_ref() else {
            return Ok(());
        };

        for observer in self.observers.iter_mut() {
            for event in &bout.log[seen..] {
                observer.on_event(bout.id, event);
            }
        }

        if was_active {
            if let Some(summary) = MatchSummary::from_match(bout) {
                self.record_result(summary)?;
            }
        }
        Ok(())
    }

    fn record_result(&mut self, summary: MatchSummary) -> Result<()> {
        let needed = self.config.tournament.wins_needed_for_cup;

        let winner = self
            .participants
            .get_mut(&summary.winner)
            .ok_or_else(|| DohyoError::UnknownParticipant(summary.winner.clone()))?;
        winner.record.wins += 1;
        let reached_cup = winner.record.wins >= needed;
        if reached_cup && self.champion.is_none() {
            winner.record.tournament_wins += 1;
            tracing::info!(
                "{} takes the Emperor's Cup with {} wins",
                winner.display_name(),
                winner.record.wins
            );
            self.champion = Some(summary.winner.clone());
        }

        let loser = self
            .participants
            .get_mut(&summary.loser)
            .ok_or_else(|| DohyoError::UnknownParticipant(summary.loser.clone()))?;
        loser.record.losses += 1;

        self.history.push(summary);
        Ok(())
    }

    /// Entrants ordered by cups, then wins, then fewest losses
    pub fn standings(&self) -> Vec<&Participant> {
        let mut table: Vec<&Participant> = self.participants.values().collect();
        table.sort_by(|a, b| {
            b.record
                .tournament_wins
                .cmp(&a.record.tournament_wins)
                .then(b.record.wins.cmp(&a.record.wins))
                .then(a.record.losses.cmp(&b.record.losses))
                .then(a.id.cmp(&b.id))
        });
        table
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let state: TournamentState = serde_json::from_str(json)?;
        state.config.validate()?;
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bout::phase::{SaltThrow, SignatureMove};
    use crate::bout::wrestler::WrestlerBuild;
    use crate::bout::BoutEvent;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::{Arc, Mutex};

    fn human(id: &str) -> Participant {
        Participant::human(id, id, "Rikishi", WrestlerBuild::balanced(SignatureMove::Yorikiri))
            .unwrap()
    }

    struct Recorder(Arc<Mutex<Vec<BoutEvent>>>);

    impl BoutObserver for Recorder {
        fn on_event(&mut self, _match_id: MatchId, event: &BoutEvent) {
            self.0.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut state = TournamentState::default();
        state.register(human("a@dohyo")).unwrap();
        let err = state.register(human("a@dohyo")).unwrap_err();
        assert!(matches!(err, DohyoError::DuplicateParticipant(_)));
    }

    #[test]
    fn test_start_fills_field_with_cpus() {
        let mut state = TournamentState::default();
        state.register(human("a@dohyo")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let bout = state.start(0, &mut rng).unwrap();
        // A lone human is always paired first
        assert_eq!(bout.east.participant_id.as_str(), "a@dohyo");
        assert!(bout.west.is_cpu());

        assert_eq!(state.participants.len(), 8);
        let cpus = state.participants.values().filter(|p| p.is_cpu()).count();
        assert_eq!(cpus, 7);
        let wrestlers: BTreeSet<u32> = state
            .participants
            .values()
            .filter_map(|p| p.wrestler_id)
            .collect();
        assert_eq!(wrestlers.len(), 7);
    }

    #[test]
    fn test_start_keeps_human_holding_cpu_style_id() {
        let mut state = TournamentState::default();
        state.register(human("cpu_0@cpu.local")).unwrap();
        state.register(human("cpu_2@cpu.local")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        state.start(0, &mut rng).unwrap();

        assert_eq!(state.participants.len(), 8);
        let humans: Vec<&str> = state
            .participants
            .values()
            .filter(|p| !p.is_cpu())
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(humans, ["cpu_0@cpu.local", "cpu_2@cpu.local"]);
        assert!(!state.participant(&"cpu_0@cpu.local".into()).unwrap().is_cpu());
        assert!(state.participant(&"cpu_7@cpu.local".into()).unwrap().is_cpu());
    }

    #[test]
    fn test_next_match_returns_active_match() {
        let mut state = TournamentState::default();
        state.register(human("a@dohyo")).unwrap();
        state.register(human("b@dohyo")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let first = state.start(0, &mut rng).unwrap().id;
        let again = state.next_match(10, &mut rng).unwrap().id;
        assert_eq!(first, again);
    }

    #[test]
    fn test_not_enough_entrants() {
        let mut state = TournamentState::default();
        state.register(human("a@dohyo")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = state.next_match(0, &mut rng).unwrap_err();
        assert!(matches!(err, DohyoError::NotEnoughEntrants { have: 1 }));
    }

    #[test]
    fn test_submit_without_match() {
        let mut state = TournamentState::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let err = state
            .submit_choice(&"a@dohyo".into(), Choice::Salt(SaltThrow::Lots), 0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, DohyoError::NoActiveMatch));
    }

    #[test]
    fn test_outsider_cannot_submit() {
        let mut state = TournamentState::default();
        for id in ["a@dohyo", "b@dohyo", "c@dohyo"] {
            state.register(human(id)).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let bout = state.next_match(0, &mut rng).unwrap();
        let outsider = ["a@dohyo", "b@dohyo", "c@dohyo"]
            .into_iter()
            .map(ParticipantId::from)
            .find(|id| bout.side_of(id).is_err())
            .unwrap();

        let err = state
            .submit_choice(&outsider, Choice::Salt(SaltThrow::Lots), 0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, DohyoError::NotInMatch(_)));
    }

    #[test]
    fn test_observers_receive_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut state = TournamentState::default();
        state.subscribe(Box::new(Recorder(events.clone())));
        state.register(human("a@dohyo")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        state.start(0, &mut rng).unwrap();
        state
            .submit_choice(&"a@dohyo".into(), Choice::Salt(SaltThrow::Lots), 5, &mut rng)
            .unwrap();

        let log = state.current_match.as_ref().unwrap().log.clone();
        assert_eq!(*events.lock().unwrap(), log);
    }

    #[test]
    fn test_standings_order() {
        let mut state = TournamentState::default();
        for id in ["a@dohyo", "b@dohyo", "c@dohyo"] {
            state.register(human(id)).unwrap();
        }
        let set = |state: &mut TournamentState, id: &str, cups, wins, losses| {
            let record = &mut state.participants.get_mut(&ParticipantId::from(id)).unwrap().record;
            record.tournament_wins = cups;
            record.wins = wins;
            record.losses = losses;
        };
        set(&mut state, "a@dohyo", 0, 3, 1);
        set(&mut state, "b@dohyo", 1, 0, 0);
        set(&mut state, "c@dohyo", 0, 3, 0);

        let order: Vec<&str> = state.standings().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, ["b@dohyo", "c@dohyo", "a@dohyo"]);
    }

    #[test]
    fn test_reset_drops_cpus_and_keeps_cups() {
        let mut state = TournamentState::default();
        state.register(human("a@dohyo")).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        state.start(0, &mut rng).unwrap();

        let a = ParticipantId::from("a@dohyo");
        {
            let record = &mut state.participants.get_mut(&a).unwrap().record;
            record.wins = 2;
            record.tournament_wins = 1;
        }
        state.reset();

        assert_eq!(state.participants.len(), 1);
        let record = state.participants[&a].record;
        assert_eq!((record.wins, record.tournament_wins), (0, 1));
        assert!(state.current_match.is_none());
    }
}
