//! Phase tables - choice sets, stat effects and matchup probabilities
//!
//! Matchup values are the published calibration: other tools pin against
//! them, so they are fixed here rather than loaded from config.

use serde::Serialize;

use crate::bout::phase::{
    Choice, DisplayMove, Kimarite, Phase, SaltThrow, TachiaiMove, Technique,
};
use crate::bout::stats::{Stat, StatDelta};

const SALT_CHOICES: [Choice; 2] = [Choice::Salt(SaltThrow::Little), Choice::Salt(SaltThrow::Lots)];

const DISPLAY_CHOICES: [Choice; 2] = [
    Choice::Display(DisplayMove::Mawashi),
    Choice::Display(DisplayMove::Aura),
];

const TACHIAI_CHOICES: [Choice; 3] = [
    Choice::Tachiai(TachiaiMove::Hard),
    Choice::Tachiai(TachiaiMove::Soft),
    Choice::Tachiai(TachiaiMove::Henka),
];

const TECHNIQUE_CHOICES: [Choice; 4] = [
    Choice::Technique(Technique::Grip),
    Choice::Technique(Technique::Tsuppari),
    Choice::Technique(Technique::Push),
    Choice::Technique(Technique::Pull),
];

const FINISH_CHOICES: [Choice; 4] = [
    Choice::Finish(Kimarite::Yorikiri),
    Choice::Finish(Kimarite::Oshidashi),
    Choice::Finish(Kimarite::Uwatenage),
    Choice::Finish(Kimarite::Hatakikomi),
];

/// Valid choices for a phase
pub fn choices_for(phase: Phase) -> &'static [Choice] {
    match phase {
        Phase::Salt => &SALT_CHOICES,
        Phase::Display => &DISPLAY_CHOICES,
        Phase::Tachiai => &TACHIAI_CHOICES,
        Phase::Technique => &TECHNIQUE_CHOICES,
        Phase::Finish => &FINISH_CHOICES,
    }
}

/// Static description of one phase
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PhaseDefinition {
    pub phase: Phase,
    pub name: &'static str,
    pub description: &'static str,
    pub choices: &'static [Choice],
    pub has_winner: bool,
}

pub fn phase_definition(phase: Phase) -> PhaseDefinition {
    let (name, description) = match phase {
        Phase::Salt => ("Salt Ritual", "Purify the ring and prepare your spirit"),
        Phase::Display => (
            "Intimidation Display",
            "Show your opponent your fighting spirit",
        ),
        Phase::Tachiai => ("Tachiai!", "The explosive initial charge"),
        Phase::Technique => ("Attack!", "Execute your fighting technique"),
        Phase::Finish => ("Finishing Move!", "Execute your winning technique"),
    };

    PhaseDefinition {
        phase,
        name,
        description,
        choices: choices_for(phase),
        has_winner: phase.has_winner(),
    }
}

/// Every phase definition in bout order
pub fn phase_tables() -> [PhaseDefinition; 5] {
    Phase::ORDER.map(phase_definition)
}

/// Player-facing label and hint for a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceInfo {
    pub label: &'static str,
    pub description: &'static str,
}

pub fn choice_info(choice: Choice) -> ChoiceInfo {
    let (label, description) = match choice {
        Choice::Salt(SaltThrow::Little) => ("Little Salt", "Careful, measured throw"),
        Choice::Salt(SaltThrow::Lots) => ("Lots of Salt", "Grand, dramatic throw"),
        Choice::Display(DisplayMove::Mawashi) => ("Slap Mawashi", "Aggressive belt slap"),
        Choice::Display(DisplayMove::Aura) => ("Powerful Aura", "Calm, confident stance"),
        Choice::Tachiai(TachiaiMove::Hard) => (
            "Hard Tachiai",
            "Powerful forward charge. Strong vs Henka.",
        ),
        Choice::Tachiai(TachiaiMove::Soft) => (
            "Soft Tachiai",
            "Measured initial clash. Balanced approach.",
        ),
        Choice::Tachiai(TachiaiMove::Henka) => (
            "Henka (Sidestep)",
            "Shameful sidestep. Risky but can surprise.",
        ),
        Choice::Technique(Technique::Grip) => ("Belt Grip (Mawashi)", "Secure the belt for throws"),
        Choice::Technique(Technique::Tsuppari) => (
            "Tsuppari (Thrusts)",
            "Rapid palm thrusts. Good vs Grip and Pulling.",
        ),
        Choice::Technique(Technique::Push) => (
            "Oshi (Pushing)",
            "Steady forward pressure. Good vs Pulling.",
        ),
        Choice::Technique(Technique::Pull) => (
            "Hiki (Pulling)",
            "Redirect momentum. Good vs Pushing.",
        ),
        Choice::Finish(Kimarite::Yorikiri) => ("Yorikiri", "Force out while gripping belt"),
        Choice::Finish(Kimarite::Oshidashi) => ("Oshidashi", "Push out with thrusts"),
        Choice::Finish(Kimarite::Uwatenage) => ("Uwatenage", "Overarm throw"),
        Choice::Finish(Kimarite::Hatakikomi) => ("Hatakikomi", "Slap down"),
    };
    ChoiceInfo { label, description }
}

// Stat effects applied to the choosing corner regardless of outcome
const LITTLE_SALT: [StatDelta; 1] = [StatDelta::new(Stat::Focus, 2)];
const LOTS_OF_SALT: [StatDelta; 1] = [StatDelta::new(Stat::Spirit, 2)];
const SLAP_MAWASHI: [StatDelta; 1] = [StatDelta::new(Stat::Intimidation, 2)];
const POWERFUL_AURA: [StatDelta; 1] = [StatDelta::new(Stat::CrowdSupport, 2)];
const HENKA_PENALTY: [StatDelta; 2] = [
    StatDelta::new(Stat::CrowdSupport, -1),
    StatDelta::new(Stat::Spirit, -1),
];
const GRIP_BONUS: [StatDelta; 1] = [StatDelta::new(Stat::ThrowPower, 2)];
const TSUPPARI_BONUS: [StatDelta; 1] = [StatDelta::new(Stat::StrikePower, 2)];
const PUSH_BONUS: [StatDelta; 1] = [StatDelta::new(Stat::PushPower, 2)];
const PULL_BONUS: [StatDelta; 1] = [StatDelta::new(Stat::Balance, 2)];

pub fn choice_effects(choice: Choice) -> &'static [StatDelta] {
    match choice {
        Choice::Salt(SaltThrow::Little) => &LITTLE_SALT,
        Choice::Salt(SaltThrow::Lots) => &LOTS_OF_SALT,
        Choice::Display(DisplayMove::Mawashi) => &SLAP_MAWASHI,
        Choice::Display(DisplayMove::Aura) => &POWERFUL_AURA,
        Choice::Tachiai(TachiaiMove::Henka) => &HENKA_PENALTY,
        Choice::Tachiai(_) => &[],
        Choice::Technique(Technique::Grip) => &GRIP_BONUS,
        Choice::Technique(Technique::Tsuppari) => &TSUPPARI_BONUS,
        Choice::Technique(Technique::Push) => &PUSH_BONUS,
        Choice::Technique(Technique::Pull) => &PULL_BONUS,
        Choice::Finish(_) => &[],
    }
}

const TACHIAI_WIN_BONUS: [StatDelta; 2] = [
    StatDelta::new(Stat::Momentum, 3),
    StatDelta::new(Stat::Positioning, 2),
];
const TECHNIQUE_WIN_BONUS: [StatDelta; 1] = [StatDelta::new(Stat::Momentum, 2)];

/// Bonus applied to the winner of a phase only
pub fn win_bonus(phase: Phase) -> &'static [StatDelta] {
    match phase {
        Phase::Tachiai => &TACHIAI_WIN_BONUS,
        Phase::Technique => &TECHNIQUE_WIN_BONUS,
        Phase::Salt | Phase::Display | Phase::Finish => &[],
    }
}

/// Win probabilities `[east, west]` for a tachiai pairing
pub fn tachiai_matchup(east: TachiaiMove, west: TachiaiMove) -> [f64; 2] {
    use TachiaiMove::*;
    match (east, west) {
        (Hard, Hard) => [0.50, 0.50],
        (Hard, Soft) => [0.55, 0.45],
        // A full-power charge punishes the sidestep
        (Hard, Henka) => [0.70, 0.30],

        (Soft, Hard) => [0.45, 0.55],
        (Soft, Soft) => [0.50, 0.50],
        (Soft, Henka) => [0.40, 0.60],

        (Henka, Hard) => [0.30, 0.70],
        (Henka, Soft) => [0.60, 0.40],
        (Henka, Henka) => [0.50, 0.50],
    }
}

/// Win probabilities `[east, west]` for a technique pairing
pub fn technique_matchup(east: Technique, west: Technique) -> [f64; 2] {
    use Technique::*;
    match (east, west) {
        (Grip, Grip) => [0.50, 0.50],
        (Grip, Tsuppari) => [0.40, 0.60],
        (Grip, Push) => [0.45, 0.55],
        (Grip, Pull) => [0.55, 0.45],

        (Tsuppari, Grip) => [0.60, 0.40],
        (Tsuppari, Tsuppari) => [0.50, 0.50],
        (Tsuppari, Push) => [0.55, 0.45],
        (Tsuppari, Pull) => [0.60, 0.40],

        (Push, Grip) => [0.55, 0.45],
        (Push, Tsuppari) => [0.45, 0.55],
        (Push, Push) => [0.50, 0.50],
        (Push, Pull) => [0.40, 0.60],

        (Pull, Grip) => [0.45, 0.55],
        (Pull, Tsuppari) => [0.40, 0.60],
        (Pull, Push) => [0.60, 0.40],
        (Pull, Pull) => [0.50, 0.50],
    }
}

/// Matchup for two choices of the same table-driven phase
pub fn matchup(east: Choice, west: Choice) -> Option<[f64; 2]> {
    match (east, west) {
        (Choice::Tachiai(e), Choice::Tachiai(w)) => Some(tachiai_matchup(e, w)),
        (Choice::Technique(e), Choice::Technique(w)) => Some(technique_matchup(e, w)),
        _ => None,
    }
}
