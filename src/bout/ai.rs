//! CPU opponent - picks a move per phase from the bout so far
//!
//! Pure functions over the corner's stats and build. Randomness comes from the
//! caller's RNG so seeded bouts replay exactly.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::bout::phase::{Choice, DisplayMove, Kimarite, Phase, SaltThrow, TachiaiMove, Technique};
use crate::bout::stats::BoutStats;
use crate::bout::tables::choices_for;
use crate::bout::wrestler::WrestlerBuild;
use crate::core::config::AiTuning;

/// What a CPU corner can see when deciding
#[derive(Debug, Clone, Copy)]
pub struct AiView<'a> {
    pub own: &'a BoutStats,
    pub opponent: &'a BoutStats,
    pub build: &'a WrestlerBuild,
}

/// Pick a choice valid for `phase`. Never fails.
pub fn choose_for_phase<R: Rng + ?Sized>(
    phase: Phase,
    view: &AiView<'_>,
    tuning: &AiTuning,
    rng: &mut R,
) -> Choice {
    match phase {
        Phase::Salt => Choice::Salt(choose_salt(tuning, rng)),
        Phase::Display => Choice::Display(choose_display(view.own, rng)),
        Phase::Tachiai => Choice::Tachiai(choose_tachiai(view, tuning, rng)),
        Phase::Technique => Choice::Technique(choose_technique(view, tuning, rng)),
        Phase::Finish => Choice::Finish(choose_finish(view)),
    }
}

/// Uniform pick from the phase's choice set, used when the move timer expires
pub fn random_choice<R: Rng + ?Sized>(phase: Phase, rng: &mut R) -> Choice {
    let choices = choices_for(phase);
    choices[rng.gen_range(0..choices.len())]
}

fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

fn choose_salt<R: Rng + ?Sized>(tuning: &AiTuning, rng: &mut R) -> SaltThrow {
    if chance(rng, tuning.salt_dramatic_bias) {
        SaltThrow::Lots
    } else {
        SaltThrow::Little
    }
}

fn choose_display<R: Rng + ?Sized>(own: &BoutStats, rng: &mut R) -> DisplayMove {
    // Spirit already banked, go for the crowd
    if own.spirit > own.focus {
        return DisplayMove::Aura;
    }
    if rng.gen_bool(0.5) {
        DisplayMove::Mawashi
    } else {
        DisplayMove::Aura
    }
}

fn choose_tachiai<R: Rng + ?Sized>(
    view: &AiView<'_>,
    tuning: &AiTuning,
    rng: &mut R,
) -> TachiaiMove {
    let mine = view.own.confidence();
    let theirs = view.opponent.confidence();
    let margin = tuning.tachiai_confidence_margin;

    if mine > theirs + margin {
        return TachiaiMove::Hard;
    }
    if theirs > mine + margin {
        return TachiaiMove::Soft;
    }

    const MIX: [TachiaiMove; 3] = [TachiaiMove::Hard, TachiaiMove::Soft, TachiaiMove::Henka];
    match WeightedIndex::new(tuning.tachiai_mix) {
        Ok(dist) => MIX[dist.sample(rng)],
        Err(_) => MIX[rng.gen_range(0..MIX.len())],
    }
}

fn choose_technique<R: Rng + ?Sized>(
    view: &AiView<'_>,
    tuning: &AiTuning,
    rng: &mut R,
) -> Technique {
    let build = view.build;
    let threshold = tuning.style_threshold;

    let styled = if build.technique > threshold {
        Some((Technique::Grip, Technique::Pull))
    } else if build.weight > threshold {
        Some((Technique::Push, Technique::Grip))
    } else if build.speed > threshold {
        Some((Technique::Tsuppari, Technique::Pull))
    } else {
        None
    };

    match styled {
        Some((primary, secondary)) => {
            if chance(rng, tuning.style_primary_bias) {
                primary
            } else {
                secondary
            }
        }
        // No standout attribute: keep pressure when ahead, reset when not
        None if view.own.momentum > 0 => Technique::Push,
        None => Technique::Pull,
    }
}

fn choose_finish(view: &AiView<'_>) -> Kimarite {
    if let Some(signature) = view.build.signature_move.as_kimarite() {
        return signature;
    }

    let own = view.own;
    if own.throw_power >= own.push_power {
        if own.balance > own.push_power {
            Kimarite::Uwatenage
        } else {
            Kimarite::Yorikiri
        }
    } else if own.strike_power > own.balance {
        Kimarite::Oshidashi
    } else {
        Kimarite::Hatakikomi
    }
}
