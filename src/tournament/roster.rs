//! Real wrestlers used to fill the field with CPU entrants

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::bout::phase::SignatureMove;
use crate::bout::wrestler::{Controller, WrestlerBuild};
use crate::core::types::ParticipantId;
use crate::tournament::participant::{Participant, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Power,
    Technical,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Ozeki,
    Sekiwake,
    Komusubi,
    Maegashira,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterWrestler {
    pub id: u32,
    pub name: &'static str,
    pub rank: Rank,
    pub style: Style,
    pub signature_move: SignatureMove,
}

const fn wrestler(
    id: u32,
    name: &'static str,
    rank: Rank,
    style: Style,
    signature_move: SignatureMove,
) -> RosterWrestler {
    RosterWrestler {
        id,
        name,
        rank,
        style,
        signature_move,
    }
}

pub const ROSTER: [RosterWrestler; 12] = [
    wrestler(1, "Hoshoryu", Rank::Ozeki, Style::Technical, SignatureMove::Uwatenage),
    wrestler(2, "Kirishima", Rank::Ozeki, Style::Technical, SignatureMove::Yorikiri),
    wrestler(3, "Onosato", Rank::Sekiwake, Style::Power, SignatureMove::Oshidashi),
    wrestler(4, "Wakamotoharu", Rank::Komusubi, Style::Technical, SignatureMove::Yorikiri),
    wrestler(5, "Tamawashi", Rank::Maegashira, Style::Power, SignatureMove::Oshidashi),
    wrestler(6, "Ura", Rank::Maegashira, Style::Speed, SignatureMove::Hatakikomi),
    wrestler(7, "Yoshinofuji", Rank::Maegashira, Style::Technical, SignatureMove::Yorikiri),
    wrestler(8, "Aonishiki", Rank::Maegashira, Style::Power, SignatureMove::Yorikiri),
    wrestler(9, "Ichiyamamoto", Rank::Maegashira, Style::Speed, SignatureMove::Oshidashi),
    wrestler(10, "Kotozakura", Rank::Maegashira, Style::Power, SignatureMove::Yorikiri),
    wrestler(11, "Oho", Rank::Maegashira, Style::Power, SignatureMove::Oshidashi),
    wrestler(12, "Shodai", Rank::Maegashira, Style::Technical, SignatureMove::Yorikiri),
];

pub fn find(id: u32) -> Option<&'static RosterWrestler> {
    ROSTER.iter().find(|w| w.id == id)
}

/// Style-shaped 20-point build: the style's strength at 7, its weakness at 3
pub fn cpu_build(wrestler: &RosterWrestler) -> WrestlerBuild {
    let mut build = WrestlerBuild::balanced(wrestler.signature_move);
    match wrestler.style {
        Style::Power => {
            build.weight = 7;
            build.technique = 3;
        }
        Style::Technical => {
            build.technique = 7;
            build.weight = 3;
        }
        Style::Speed => {
            build.speed = 7;
            build.height = 3;
        }
    }
    build
}

/// CPU entrant number `index`, drawn from the first roster wrestler not in
/// `used`. Once the roster is exhausted wrestlers repeat.
pub fn create_cpu_participant(index: usize, used: &BTreeSet<u32>) -> Participant {
    let wrestler = ROSTER
        .iter()
        .find(|w| !used.contains(&w.id))
        .unwrap_or(&ROSTER[index % ROSTER.len()]);

    Participant {
        id: ParticipantId::new(format!("cpu_{}@cpu.local", index)),
        player_name: format!("CPU {}", wrestler.name),
        shikona: wrestler.name.to_string(),
        wrestler_id: Some(wrestler.id),
        build: cpu_build(wrestler),
        controller: Controller::Cpu,
        record: Record::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_cpu_build_is_valid() {
        for wrestler in &ROSTER {
            assert!(cpu_build(wrestler).validate().is_ok(), "{}", wrestler.name);
        }
    }

    #[test]
    fn test_style_shapes_build() {
        let onosato = find(3).unwrap();
        let build = cpu_build(onosato);
        assert_eq!((build.weight, build.technique), (7, 3));

        let ura = find(6).unwrap();
        let build = cpu_build(ura);
        assert_eq!((build.speed, build.height), (7, 3));
        assert_eq!(build.signature_move, SignatureMove::Hatakikomi);
    }

    #[test]
    fn test_unused_wrestlers_first() {
        let used: BTreeSet<u32> = [1, 2].into_iter().collect();
        let cpu = create_cpu_participant(0, &used);
        assert_eq!(cpu.wrestler_id, Some(3));
        assert_eq!(cpu.shikona, "Onosato");
        assert!(cpu.is_cpu());
    }

    #[test]
    fn test_exhausted_roster_wraps() {
        let used: BTreeSet<u32> = ROSTER.iter().map(|w| w.id).collect();
        let cpu = create_cpu_participant(13, &used);
        assert_eq!(cpu.wrestler_id, Some(2));
    }
}
