//! Per-corner stat accumulator, zeroed at the start of every match

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Spirit,
    Focus,
    Intimidation,
    CrowdSupport,
    Momentum,
    Positioning,
    ThrowPower,
    StrikePower,
    PushPower,
    Balance,
}

impl Stat {
    pub const ALL: [Stat; 10] = [
        Stat::Spirit,
        Stat::Focus,
        Stat::Intimidation,
        Stat::CrowdSupport,
        Stat::Momentum,
        Stat::Positioning,
        Stat::ThrowPower,
        Stat::StrikePower,
        Stat::PushPower,
        Stat::Balance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Spirit => "Spirit",
            Stat::Focus => "Focus",
            Stat::Intimidation => "Intimidation",
            Stat::CrowdSupport => "Crowd Support",
            Stat::Momentum => "Momentum",
            Stat::Positioning => "Positioning",
            Stat::ThrowPower => "Throw Power",
            Stat::StrikePower => "Strike Power",
            Stat::PushPower => "Push Power",
            Stat::Balance => "Balance",
        }
    }
}

/// A signed change to one stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta {
    pub stat: Stat,
    pub amount: i32,
}

impl StatDelta {
    pub const fn new(stat: Stat, amount: i32) -> Self {
        Self { stat, amount }
    }
}

/// Stats built up over a single bout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoutStats {
    pub spirit: i32,
    pub focus: i32,
    pub intimidation: i32,
    pub crowd_support: i32,
    pub momentum: i32,
    pub positioning: i32,
    pub throw_power: i32,
    pub strike_power: i32,
    pub push_power: i32,
    pub balance: i32,
}

impl BoutStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Spirit => self.spirit,
            Stat::Focus => self.focus,
            Stat::Intimidation => self.intimidation,
            Stat::CrowdSupport => self.crowd_support,
            Stat::Momentum => self.momentum,
            Stat::Positioning => self.positioning,
            Stat::ThrowPower => self.throw_power,
            Stat::StrikePower => self.strike_power,
            Stat::PushPower => self.push_power,
            Stat::Balance => self.balance,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Spirit => &mut self.spirit,
            Stat::Focus => &mut self.focus,
            Stat::Intimidation => &mut self.intimidation,
            Stat::CrowdSupport => &mut self.crowd_support,
            Stat::Momentum => &mut self.momentum,
            Stat::Positioning => &mut self.positioning,
            Stat::ThrowPower => &mut self.throw_power,
            Stat::StrikePower => &mut self.strike_power,
            Stat::PushPower => &mut self.push_power,
            Stat::Balance => &mut self.balance,
        }
    }

    pub fn add(&mut self, stat: Stat, amount: i32) {
        *self.slot(stat) += amount;
    }

    pub fn apply(&mut self, deltas: &[StatDelta]) {
        for delta in deltas {
            self.add(delta.stat, delta.amount);
        }
    }

    /// Sum of every field, used by the match tie-break
    pub fn total(&self) -> i32 {
        Stat::ALL.iter().map(|&stat| self.get(stat)).sum()
    }

    /// Spirit plus focus, the AI's read on pre-clash confidence
    pub fn confidence(&self) -> i32 {
        self.spirit + self.focus
    }

    /// Non-zero stats in display order
    pub fn nonzero(&self) -> Vec<(Stat, i32)> {
        Stat::ALL
            .iter()
            .map(|&stat| (stat, self.get(stat)))
            .filter(|(_, value)| *value != 0)
            .collect()
    }
}
