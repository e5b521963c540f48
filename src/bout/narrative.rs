//! Canned ring announcements. Deterministic for a given input.

use crate::bout::phase::{Choice, DisplayMove, Kimarite, Phase, SaltThrow, TachiaiMove, Technique};
use crate::core::types::{PerSide, Side};

/// What the announcer calls out when a corner commits to a choice
pub fn announcement(choice: Choice, name: &str) -> String {
    match choice {
        Choice::Salt(SaltThrow::Little) => format!("{name} throws a precise handful of salt!"),
        Choice::Salt(SaltThrow::Lots) => {
            format!("{name} hurls a mighty cloud of salt into the air!")
        }
        Choice::Display(DisplayMove::Mawashi) => {
            format!("{name} slaps their belt with thunderous force!")
        }
        Choice::Display(DisplayMove::Aura) => {
            format!("{name} radiates an intimidating aura of calm!")
        }
        Choice::Tachiai(TachiaiMove::Hard) => {
            format!("{name} explodes forward with a devastating charge!")
        }
        Choice::Tachiai(TachiaiMove::Soft) => {
            format!("{name} absorbs the impact with perfect technique!")
        }
        Choice::Tachiai(TachiaiMove::Henka) => {
            format!("{name} sidesteps with lightning reflexes!")
        }
        Choice::Technique(Technique::Grip) => {
            format!("{name} secures a powerful grip on the belt!")
        }
        Choice::Technique(Technique::Tsuppari) => {
            format!("{name} unleashes a flurry of palm strikes!")
        }
        Choice::Technique(Technique::Push) => {
            format!("{name} drives forward with tremendous force!")
        }
        Choice::Technique(Technique::Pull) => {
            format!("{name} pulls their opponent off balance!")
        }
        Choice::Finish(Kimarite::Yorikiri) => {
            format!("{name} forces their opponent out with yorikiri!")
        }
        Choice::Finish(Kimarite::Oshidashi) => format!("{name} pushes out with oshidashi!"),
        Choice::Finish(Kimarite::Uwatenage) => {
            format!("{name} executes a spectacular uwatenage throw!")
        }
        Choice::Finish(Kimarite::Hatakikomi) => format!("{name} slaps down with hatakikomi!"),
    }
}

/// One-line summary of a resolved phase
pub fn headline(phase: Phase, winner: Option<Side>, names: PerSide<&str>) -> String {
    match (phase, winner) {
        (Phase::Salt, _) => "The dohyo is purified. Both rikishi are ready.".to_string(),
        (Phase::Display, _) => "The psychological battle intensifies!".to_string(),
        (Phase::Tachiai, Some(Side::East)) => format!("{} wins the initial clash!", names.east),
        (Phase::Tachiai, Some(Side::West)) => format!("{} gains the advantage!", names.west),
        (Phase::Technique, Some(Side::East)) => format!("{} establishes control!", names.east),
        (Phase::Technique, Some(Side::West)) => {
            format!("{} takes the dominant position!", names.west)
        }
        (Phase::Finish, Some(side)) => format!("{} wins the bout!", names.get(side)),
        (_, None) => "Neither rikishi gives ground.".to_string(),
    }
}
