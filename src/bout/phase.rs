//! Bout phases and the moves a corner can choose in each

use serde::{Deserialize, Serialize};

use crate::core::error::{DohyoError, Result};

/// The five phases of a bout, in the order they are fought
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Salt,
    Display,
    Tachiai,
    Technique,
    Finish,
}

impl Phase {
    pub const ORDER: [Phase; 5] = [
        Phase::Salt,
        Phase::Display,
        Phase::Tachiai,
        Phase::Technique,
        Phase::Finish,
    ];

    /// Phases whose outcome names a winner
    pub const COMPETITIVE: [Phase; 3] = [Phase::Tachiai, Phase::Technique, Phase::Finish];

    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Salt => Some(Phase::Display),
            Phase::Display => Some(Phase::Tachiai),
            Phase::Tachiai => Some(Phase::Technique),
            Phase::Technique => Some(Phase::Finish),
            Phase::Finish => None,
        }
    }

    pub fn has_winner(self) -> bool {
        !matches!(self, Phase::Salt | Phase::Display)
    }

    pub fn id(self) -> &'static str {
        match self {
            Phase::Salt => "salt",
            Phase::Display => "display",
            Phase::Tachiai => "tachiai",
            Phase::Technique => "technique",
            Phase::Finish => "finish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaltThrow {
    Little,
    Lots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMove {
    Mawashi,
    Aura,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TachiaiMove {
    /// Full-power charge
    Hard,
    /// Measured absorb
    Soft,
    /// Sidestep
    Henka,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Technique {
    Grip,
    Tsuppari,
    Push,
    Pull,
}

/// Finishing techniques offered in the finish phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kimarite {
    Yorikiri,
    Oshidashi,
    Uwatenage,
    Hatakikomi,
}

/// A wrestler's preselected finishing technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMove {
    Yorikiri,
    Oshidashi,
    Hatakikomi,
    Uwatenage,
    Tsukiotoshi,
    Kotenage,
    Hikiotoshi,
    Sukuinage,
}

impl SignatureMove {
    pub const ALL: [SignatureMove; 8] = [
        SignatureMove::Yorikiri,
        SignatureMove::Oshidashi,
        SignatureMove::Hatakikomi,
        SignatureMove::Uwatenage,
        SignatureMove::Tsukiotoshi,
        SignatureMove::Kotenage,
        SignatureMove::Hikiotoshi,
        SignatureMove::Sukuinage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SignatureMove::Yorikiri => "Yorikiri",
            SignatureMove::Oshidashi => "Oshidashi",
            SignatureMove::Hatakikomi => "Hatakikomi",
            SignatureMove::Uwatenage => "Uwatenage",
            SignatureMove::Tsukiotoshi => "Tsukiotoshi",
            SignatureMove::Kotenage => "Kotenage",
            SignatureMove::Hikiotoshi => "Hikiotoshi",
            SignatureMove::Sukuinage => "Sukuinage",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SignatureMove::Yorikiri => "Force out while holding belt",
            SignatureMove::Oshidashi => "Push out without belt grip",
            SignatureMove::Hatakikomi => "Slap down technique",
            SignatureMove::Uwatenage => "Overarm throw",
            SignatureMove::Tsukiotoshi => "Thrust down",
            SignatureMove::Kotenage => "Arm lock throw",
            SignatureMove::Hikiotoshi => "Pull down technique",
            SignatureMove::Sukuinage => "Scoop throw",
        }
    }

    /// Technique-phase choice this move is best set up by
    pub fn affinity(self) -> Technique {
        match self {
            SignatureMove::Yorikiri
            | SignatureMove::Uwatenage
            | SignatureMove::Kotenage
            | SignatureMove::Sukuinage => Technique::Grip,
            SignatureMove::Oshidashi => Technique::Push,
            SignatureMove::Hatakikomi | SignatureMove::Hikiotoshi => Technique::Pull,
            SignatureMove::Tsukiotoshi => Technique::Tsuppari,
        }
    }

    /// The finish-phase choice for this move, if the finish phase offers it
    pub fn as_kimarite(self) -> Option<Kimarite> {
        match self {
            SignatureMove::Yorikiri => Some(Kimarite::Yorikiri),
            SignatureMove::Oshidashi => Some(Kimarite::Oshidashi),
            SignatureMove::Uwatenage => Some(Kimarite::Uwatenage),
            SignatureMove::Hatakikomi => Some(Kimarite::Hatakikomi),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<SignatureMove> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// A move submitted for one phase; the variant names the phase it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Choice {
    Salt(SaltThrow),
    Display(DisplayMove),
    Tachiai(TachiaiMove),
    Technique(Technique),
    Finish(Kimarite),
}

impl Choice {
    pub fn phase(self) -> Phase {
        match self {
            Choice::Salt(_) => Phase::Salt,
            Choice::Display(_) => Phase::Display,
            Choice::Tachiai(_) => Phase::Tachiai,
            Choice::Technique(_) => Phase::Technique,
            Choice::Finish(_) => Phase::Finish,
        }
    }

    /// Stable identifier used on the wire
    pub fn id(self) -> &'static str {
        match self {
            Choice::Salt(SaltThrow::Little) => "little",
            Choice::Salt(SaltThrow::Lots) => "lots",
            Choice::Display(DisplayMove::Mawashi) => "mawashi",
            Choice::Display(DisplayMove::Aura) => "aura",
            Choice::Tachiai(TachiaiMove::Hard) => "hard",
            Choice::Tachiai(TachiaiMove::Soft) => "soft",
            Choice::Tachiai(TachiaiMove::Henka) => "henka",
            Choice::Technique(Technique::Grip) => "grip",
            Choice::Technique(Technique::Tsuppari) => "tsuppari",
            Choice::Technique(Technique::Push) => "push",
            Choice::Technique(Technique::Pull) => "pull",
            Choice::Finish(Kimarite::Yorikiri) => "yorikiri",
            Choice::Finish(Kimarite::Oshidashi) => "oshidashi",
            Choice::Finish(Kimarite::Uwatenage) => "uwatenage",
            Choice::Finish(Kimarite::Hatakikomi) => "hatakikomi",
        }
    }

    /// Look up a choice by id across all phases (ids are unique)
    pub fn from_id(id: &str) -> Option<Choice> {
        let id = id.trim();
        Phase::ORDER
            .iter()
            .flat_map(|&phase| crate::bout::tables::choices_for(phase).iter().copied())
            .find(|choice| choice.id().eq_ignore_ascii_case(id))
    }

    /// Parse an id that must be valid for `phase`
    pub fn parse_for(phase: Phase, id: &str) -> Result<Choice> {
        match Self::from_id(id) {
            Some(choice) if choice.phase() == phase => Ok(choice),
            _ => Err(DohyoError::InvalidChoice {
                phase,
                choice: id.to_string(),
            }),
        }
    }
}

impl From<Choice> for &'static str {
    fn from(choice: Choice) -> Self {
        choice.id()
    }
}

impl TryFrom<String> for Choice {
    type Error = String;

    fn try_from(id: String) -> std::result::Result<Self, Self::Error> {
        Choice::from_id(&id).ok_or_else(|| format!("unknown choice id '{}'", id))
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
