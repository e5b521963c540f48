//! Match state machine
//!
//! Each phase: collect both choices (CPU corners answer immediately, the move
//! timer fills the rest) -> resolve -> advance, or settle the match after the
//! finish.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bout::ai::{choose_for_phase, random_choice, AiView};
use crate::bout::phase::{Choice, Kimarite, Phase, Technique};
use crate::bout::resolution::{
    finish_odds, resolve_phase, CornerContext, FinishOdds, PhaseOutcome, ResolveContext,
};
use crate::bout::stats::BoutStats;
use crate::bout::wrestler::{Controller, WrestlerBuild};
use crate::core::config::BoutConfig;
use crate::core::error::{DohyoError, Result};
use crate::core::types::{MatchId, Millis, ParticipantId, PerSide, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Active,
    Completed,
}

/// One side of the dohyo for a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corner {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub build: WrestlerBuild,
    pub controller: Controller,
    /// Pending choice for the current phase
    pub choice: Option<Choice>,
    /// Set when the move timer picked `choice`
    pub timed_out: bool,
}

impl Corner {
    pub fn new(
        participant_id: ParticipantId,
        display_name: impl Into<String>,
        build: WrestlerBuild,
        controller: Controller,
    ) -> Self {
        Self {
            participant_id,
            display_name: display_name.into(),
            build,
            controller,
            choice: None,
            timed_out: false,
        }
    }

    pub fn is_cpu(&self) -> bool {
        self.controller == Controller::Cpu
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoutEventType {
    MatchStarted,
    ChoiceLocked { side: Side, phase: Phase },
    CpuChoice { side: Side, phase: Phase },
    AutoChoice { side: Side, phase: Phase },
    PhaseResolved { phase: Phase, winner: Option<Side> },
    MatchCompleted { winner: Side },
}

/// Log entry for bout events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoutEvent {
    pub at: Millis,
    pub event_type: BoutEventType,
    pub description: String,
}

/// Receives every event a match logs
pub trait BoutObserver: Send {
    fn on_event(&mut self, match_id: MatchId, event: &BoutEvent);
}

/// Result of a submission
#[derive(Debug, Clone, Default)]
pub struct SubmitOutcome {
    /// Both choices were in and the phase resolved
    pub resolved: bool,
    pub outcome: Option<PhaseOutcome>,
}

/// Result of a move-timer check
#[derive(Debug, Clone, Default)]
pub struct TimeoutCheck {
    /// The budget ran out and the phase was auto-resolved
    pub expired: bool,
    pub outcome: Option<PhaseOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub east: Corner,
    pub west: Corner,
    pub status: MatchStatus,
    pub current_phase: Phase,
    pub stats: PerSide<BoutStats>,
    pub phase_results: BTreeMap<Phase, PhaseOutcome>,
    /// Set iff the match is completed
    pub winner: Option<Side>,
    pub winning_move: Option<String>,
    pub phase_started_at: Millis,
    pub created_at: Millis,
    pub completed_at: Option<Millis>,
    pub log: Vec<BoutEvent>,
}

impl Match {
    pub fn new(id: MatchId, east: Corner, west: Corner, now: Millis) -> Self {
        let mut bout = Self {
            id,
            east,
            west,
            status: MatchStatus::Active,
            current_phase: Phase::Salt,
            stats: PerSide::default(),
            phase_results: BTreeMap::new(),
            winner: None,
            winning_move: None,
            phase_started_at: now,
            created_at: now,
            completed_at: None,
            log: Vec::new(),
        };
        let description = format!(
            "{} (East) faces {} (West)",
            bout.east.display_name, bout.west.display_name
        );
        bout.log_event(BoutEventType::MatchStarted, description, now);
        bout
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn corner(&self, side: Side) -> &Corner {
        match side {
            Side::East => &self.east,
            Side::West => &self.west,
        }
    }

    fn corner_mut(&mut self, side: Side) -> &mut Corner {
        match side {
            Side::East => &mut self.east,
            Side::West => &mut self.west,
        }
    }

    /// Which corner a participant fights from
    pub fn side_of(&self, participant_id: &ParticipantId) -> Result<Side> {
        Side::BOTH
            .into_iter()
            .find(|&side| &self.corner(side).participant_id == participant_id)
            .ok_or_else(|| DohyoError::NotInMatch(participant_id.clone()))
    }

    pub fn log_event(&mut self, event_type: BoutEventType, description: String, at: Millis) {
        self.log.push(BoutEvent {
            at,
            event_type,
            description,
        });
    }

    /// Lock in a corner's choice for the current phase.
    ///
    /// A CPU opponent that has not chosen answers immediately, so a
    /// human-vs-CPU phase resolves on the human's submission.
    pub fn submit_choice<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        choice: Choice,
        now: Millis,
        config: &BoutConfig,
        rng: &mut R,
    ) -> Result<SubmitOutcome> {
        if self.is_completed() {
            return Err(DohyoError::PhaseAlreadyResolved(choice.phase()));
        }

        let phase = self.current_phase;
        if choice.phase() < phase {
            return Err(DohyoError::PhaseAlreadyResolved(choice.phase()));
        }
        if choice.phase() > phase {
            return Err(DohyoError::InvalidChoice {
                phase,
                choice: choice.id().to_string(),
            });
        }
        if self.corner(side).choice.is_some() {
            return Err(DohyoError::PhaseAlreadyResolved(phase));
        }

        self.corner_mut(side).choice = Some(choice);
        tracing::debug!("{} locked {} for {}", side.label(), choice, phase.id());
        let description = format!("{} locked in a choice", self.corner(side).display_name);
        self.log_event(BoutEventType::ChoiceLocked { side, phase }, description, now);

        let opponent = side.opponent();
        if self.corner(opponent).is_cpu() && self.corner(opponent).choice.is_none() {
            self.cpu_choose(opponent, now, config, rng);
        }

        let outcome = self.resolve_if_ready(now, config, rng)?;
        Ok(SubmitOutcome {
            resolved: outcome.is_some(),
            outcome,
        })
    }

    /// Auto-resolve the current phase once its move budget has run out.
    /// Calling again for the same expiry is a no-op, as is a zero budget.
    pub fn check_timeout<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        budget: Millis,
        config: &BoutConfig,
        rng: &mut R,
    ) -> Result<TimeoutCheck> {
        if budget == 0
            || self.is_completed()
            || now.saturating_sub(self.phase_started_at) < budget
        {
            return Ok(TimeoutCheck::default());
        }

        let phase = self.current_phase;
        for side in Side::BOTH {
            if self.corner(side).choice.is_some() {
                continue;
            }
            let choice = random_choice(phase, rng);
            let corner = self.corner_mut(side);
            corner.choice = Some(choice);
            corner.timed_out = true;

            tracing::warn!(
                "{} timed out in {}, assigned {}",
                side.label(),
                phase.id(),
                choice
            );
            let description = format!(
                "{} ran out of time and was given {}",
                self.corner(side).display_name,
                choice
            );
            self.log_event(BoutEventType::AutoChoice { side, phase }, description, now);
        }

        let outcome = self.resolve_if_ready(now, config, rng)?;
        Ok(TimeoutCheck {
            expired: outcome.is_some(),
            outcome,
        })
    }

    /// Play every phase in which only CPU corners still owe a choice.
    /// A CPU-vs-CPU match runs to completion.
    pub fn run_cpu_bout<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        config: &BoutConfig,
        rng: &mut R,
    ) -> Result<()> {
        while !self.is_completed() {
            let waiting_on_human = Side::BOTH
                .into_iter()
                .any(|side| self.corner(side).choice.is_none() && !self.corner(side).is_cpu());
            if waiting_on_human {
                break;
            }
            for side in Side::BOTH {
                if self.corner(side).choice.is_none() {
                    self.cpu_choose(side, now, config, rng);
                }
            }
            self.resolve_if_ready(now, config, rng)?;
        }
        Ok(())
    }

    fn cpu_choose<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        now: Millis,
        config: &BoutConfig,
        rng: &mut R,
    ) {
        let phase = self.current_phase;
        let view = AiView {
            own: self.stats.get(side),
            opponent: self.stats.get(side.opponent()),
            build: &self.corner(side).build,
        };
        let choice = choose_for_phase(phase, &view, &config.ai, rng);
        self.corner_mut(side).choice = Some(choice);

        tracing::debug!("CPU {} chose {} for {}", side.label(), choice, phase.id());
        let description = format!("{} has chosen", self.corner(side).display_name);
        self.log_event(BoutEventType::CpuChoice { side, phase }, description, now);
    }

    /// Technique-phase choice of a corner, once that phase is resolved
    pub fn technique_choice(&self, side: Side) -> Option<Technique> {
        match self.phase_results.get(&Phase::Technique)?.choice(side) {
            Choice::Technique(technique) => Some(technique),
            _ => None,
        }
    }

    fn resolve_if_ready<R: Rng + ?Sized>(
        &mut self,
        now: Millis,
        config: &BoutConfig,
        rng: &mut R,
    ) -> Result<Option<PhaseOutcome>> {
        let (Some(east_choice), Some(west_choice)) = (self.east.choice, self.west.choice) else {
            return Ok(None);
        };

        let phase = self.current_phase;
        let techniques = PerSide::new(
            self.technique_choice(Side::East),
            self.technique_choice(Side::West),
        );
        let mut ctx = ResolveContext {
            stats: &mut self.stats,
            corners: PerSide::new(
                CornerContext {
                    name: &self.east.display_name,
                    build: &self.east.build,
                    technique: techniques.east,
                },
                CornerContext {
                    name: &self.west.display_name,
                    build: &self.west.build,
                    technique: techniques.west,
                },
            ),
            finish: &config.finish,
        };
        let mut outcome = resolve_phase(phase, east_choice, west_choice, &mut ctx, rng)?;
        outcome.timed_out = PerSide::new(self.east.timed_out, self.west.timed_out);

        for side in Side::BOTH {
            let corner = self.corner_mut(side);
            corner.choice = None;
            corner.timed_out = false;
        }

        tracing::debug!(
            "{} resolved: {} vs {}, winner {:?}",
            phase.id(),
            east_choice,
            west_choice,
            outcome.winner
        );
        self.log_event(
            BoutEventType::PhaseResolved {
                phase,
                winner: outcome.winner,
            },
            outcome.narrative.clone(),
            now,
        );
        self.phase_results.insert(phase, outcome.clone());

        match phase.next() {
            Some(next) => {
                self.current_phase = next;
                self.phase_started_at = now;
            }
            None => self.complete(now, rng),
        }

        Ok(Some(outcome))
    }

    fn complete<R: Rng + ?Sized>(&mut self, now: Millis, rng: &mut R) {
        let totals = PerSide::new(self.stats.east.total(), self.stats.west.total());
        let winner = decide_winner(self.phase_wins(), totals, rng);

        self.winning_move = self
            .phase_results
            .get(&Phase::Finish)
            .map(|finish| finish.choice(winner).to_string());
        self.winner = Some(winner);
        self.status = MatchStatus::Completed;
        self.completed_at = Some(now);

        let name = self.corner(winner).display_name.clone();
        tracing::info!(
            "Match {} won by {} ({})",
            self.id,
            name,
            self.winning_move.as_deref().unwrap_or("-")
        );
        self.log_event(
            BoutEventType::MatchCompleted { winner },
            format!("{} wins the match!", name),
            now,
        );
    }

    /// Competitive phases won so far by each corner
    pub fn phase_wins(&self) -> PerSide<u32> {
        let mut wins = PerSide::new(0, 0);
        for outcome in self.phase_results.values() {
            if let Some(side) = outcome.winner {
                *wins.get_mut(side) += 1;
            }
        }
        wins
    }

    /// Finishing odds if both corners chose these moves now
    pub fn finish_chances(&self, moves: PerSide<Kimarite>, config: &BoutConfig) -> FinishOdds {
        let corners = PerSide::new(
            CornerContext {
                name: &self.east.display_name,
                build: &self.east.build,
                technique: self.technique_choice(Side::East),
            },
            CornerContext {
                name: &self.west.display_name,
                build: &self.west.build,
                technique: self.technique_choice(Side::West),
            },
        );
        finish_odds(&self.stats, &corners, moves, &config.finish)
    }

    pub fn winner_id(&self) -> Option<&ParticipantId> {
        self.winner.map(|side| &self.corner(side).participant_id)
    }
}

/// Match winner: more phase wins, then higher stat total, then a coin flip
pub fn decide_winner<R: Rng + ?Sized>(
    phase_wins: PerSide<u32>,
    stat_totals: PerSide<i32>,
    rng: &mut R,
) -> Side {
    use std::cmp::Ordering;

    match phase_wins.east.cmp(&phase_wins.west) {
        Ordering::Greater => return Side::East,
        Ordering::Less => return Side::West,
        Ordering::Equal => {}
    }
    match stat_totals.east.cmp(&stat_totals.west) {
        Ordering::Greater => Side::East,
        Ordering::Less => Side::West,
        Ordering::Equal => {
            if rng.gen_bool(0.5) {
                Side::East
            } else {
                Side::West
            }
        }
    }
}
