//! Phase resolution
//!
//! Salt and display only apply stat effects. Tachiai and technique roll once
//! against the matchup table. The finish phase turns accumulated stats into a
//! success chance per corner, normalizes the pair and rolls once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bout::narrative::{announcement, headline};
use crate::bout::phase::{Choice, Kimarite, Phase, Technique};
use crate::bout::stats::{BoutStats, Stat, StatDelta};
use crate::bout::tables::{choice_effects, matchup, win_bonus};
use crate::bout::wrestler::WrestlerBuild;
use crate::core::config::FinishTuning;
use crate::core::error::{DohyoError, Result};
use crate::core::types::{PerSide, Side};

/// Record of one resolved phase. Never modified once appended to a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub east_choice: Choice,
    pub west_choice: Choice,
    pub winner: Option<Side>,
    /// East's win probability for the roll, when the phase has one
    pub east_win_probability: Option<f64>,
    pub roll: Option<f64>,
    /// Every stat change this phase applied, per corner
    pub deltas: PerSide<Vec<StatDelta>>,
    pub announcements: PerSide<String>,
    pub narrative: String,
    /// Corners whose choice was assigned by the move timer
    #[serde(default)]
    pub timed_out: PerSide<bool>,
}

impl PhaseOutcome {
    pub fn choice(&self, side: Side) -> Choice {
        match side {
            Side::East => self.east_choice,
            Side::West => self.west_choice,
        }
    }
}

/// What the resolver knows about one corner
#[derive(Debug, Clone, Copy)]
pub struct CornerContext<'a> {
    pub name: &'a str,
    pub build: &'a WrestlerBuild,
    /// Technique-phase choice, once that phase is resolved
    pub technique: Option<Technique>,
}

pub struct ResolveContext<'a> {
    pub stats: &'a mut PerSide<BoutStats>,
    pub corners: PerSide<CornerContext<'a>>,
    pub finish: &'a FinishTuning,
}

/// Clamped finishing chances for both corners and east's normalized share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinishOdds {
    pub chances: PerSide<f64>,
    pub east_share: f64,
}

/// Success chance of one corner's finishing move, clamped to the tuning bounds
pub fn finish_chance(
    stats: &BoutStats,
    build: &WrestlerBuild,
    finish: Kimarite,
    technique: Option<Technique>,
    tuning: &FinishTuning,
) -> f64 {
    let mut chance = tuning.base_success_rate;

    for stat in Stat::ALL {
        chance += stats.get(stat) as f64 * tuning.stat_multipliers.get(stat);
    }

    if build.signature_move.as_kimarite() == Some(finish) {
        chance += tuning.signature_move_bonus;
    }

    if technique == Some(build.signature_move.affinity()) {
        chance += tuning.affinity_bonus;
    }

    chance += build.technique as f64 * tuning.technique_weight;
    chance += build.speed as f64 * tuning.speed_weight;

    chance.clamp(tuning.min_chance, tuning.max_chance)
}

pub fn finish_odds(
    stats: &PerSide<BoutStats>,
    corners: &PerSide<CornerContext<'_>>,
    moves: PerSide<Kimarite>,
    tuning: &FinishTuning,
) -> FinishOdds {
    let chance_for = |side: Side| {
        let corner = corners.get(side);
        finish_chance(
            stats.get(side),
            corner.build,
            *moves.get(side),
            corner.technique,
            tuning,
        )
    };
    let chances = PerSide::new(chance_for(Side::East), chance_for(Side::West));

    let total = chances.east + chances.west;
    let east_share = if total > 0.0 {
        chances.east / total
    } else {
        0.5
    };

    FinishOdds {
        chances,
        east_share,
    }
}

/// Resolve one phase, mutating the accumulated stats in place
pub fn resolve_phase<R: Rng + ?Sized>(
    phase: Phase,
    east_choice: Choice,
    west_choice: Choice,
    ctx: &mut ResolveContext<'_>,
    rng: &mut R,
) -> Result<PhaseOutcome> {
    for choice in [east_choice, west_choice] {
        if choice.phase() != phase {
            return Err(DohyoError::InvalidChoice {
                phase,
                choice: choice.id().to_string(),
            });
        }
    }
    let choices = PerSide::new(east_choice, west_choice);

    // Choice effects land regardless of who wins
    let mut deltas: PerSide<Vec<StatDelta>> = PerSide::default();
    for side in Side::BOTH {
        let effects = choice_effects(*choices.get(side));
        ctx.stats.get_mut(side).apply(effects);
        deltas.get_mut(side).extend_from_slice(effects);
    }

    let (winner, east_win_probability, roll) = match phase {
        Phase::Salt | Phase::Display => (None, None, None),
        Phase::Tachiai | Phase::Technique => {
            let [p_east, _] =
                matchup(east_choice, west_choice).ok_or_else(|| DohyoError::InvalidChoice {
                    phase,
                    choice: format!("{}_vs_{}", east_choice, west_choice),
                })?;
            let roll: f64 = rng.gen();
            let winner = if roll < p_east { Side::East } else { Side::West };
            (Some(winner), Some(p_east), Some(roll))
        }
        Phase::Finish => {
            let (Choice::Finish(east), Choice::Finish(west)) = (east_choice, west_choice) else {
                return Err(DohyoError::InvalidChoice {
                    phase,
                    choice: east_choice.id().to_string(),
                });
            };
            let odds = finish_odds(&*ctx.stats, &ctx.corners, PerSide::new(east, west), ctx.finish);
            let roll: f64 = rng.gen();
            let winner = if roll < odds.east_share {
                Side::East
            } else {
                Side::West
            };
            (Some(winner), Some(odds.east_share), Some(roll))
        }
    };

    if let Some(side) = winner {
        let bonus = win_bonus(phase);
        ctx.stats.get_mut(side).apply(bonus);
        deltas.get_mut(side).extend_from_slice(bonus);
    }

    let names = PerSide::new(ctx.corners.east.name, ctx.corners.west.name);
    let announcements = PerSide::new(
        announcement(east_choice, names.east),
        announcement(west_choice, names.west),
    );

    Ok(PhaseOutcome {
        phase,
        east_choice,
        west_choice,
        winner,
        east_win_probability,
        roll,
        deltas,
        announcements,
        narrative: headline(phase, winner, names),
        timed_out: PerSide::default(),
    })
}
