//! Engine configuration with documented constants
//!
//! The matchup tables in `bout::tables` are a fixed contract. Everything here
//! is balance tuning and may be overridden from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bout::stats::Stat;
use crate::core::error::{DohyoError, Result};
use crate::core::types::Millis;

/// Success-chance contribution per accumulated stat point in the finish phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatMultipliers {
    pub spirit: f64,
    pub focus: f64,
    pub intimidation: f64,
    pub crowd_support: f64,
    pub momentum: f64,
    pub positioning: f64,
    pub throw_power: f64,
    pub strike_power: f64,
    pub push_power: f64,
    pub balance: f64,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            spirit: 0.02,
            focus: 0.025,
            intimidation: 0.015,
            crowd_support: 0.01,
            momentum: 0.03,
            positioning: 0.02,
            throw_power: 0.02,
            strike_power: 0.02,
            push_power: 0.02,
            balance: 0.015,
        }
    }
}

impl StatMultipliers {
    pub fn get(&self, stat: Stat) -> f64 {
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
}

/// Finishing-move success chance tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FinishTuning {
    /// Chance before any modifier
    pub base_success_rate: f64,
    pub stat_multipliers: StatMultipliers,
    /// Added when the finish choice is the wrestler's own signature move
    pub signature_move_bonus: f64,
    /// Added when the technique-phase choice matches the signature move's affinity
    pub affinity_bonus: f64,
    /// Per point of the build's technique attribute
    pub technique_weight: f64,
    /// Per point of the build's speed attribute
    pub speed_weight: f64,
    pub min_chance: f64,
    pub max_chance: f64,
}

impl Default for FinishTuning {
    fn default() -> Self {
        Self {
            base_success_rate: 0.50,
            stat_multipliers: StatMultipliers::default(),
            signature_move_bonus: 0.15,
            affinity_bonus: 0.10,
            technique_weight: 0.01,
            speed_weight: 0.005,
            min_chance: 0.05,
            max_chance: 0.95,
        }
    }
}

/// CPU opponent heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Probability of the dramatic (spirit) salt throw
    pub salt_dramatic_bias: f64,
    /// Confidence lead (spirit + focus) needed before committing at the tachiai
    pub tachiai_confidence_margin: i32,
    /// Mixed tachiai weights when neither side leads: hard, soft, henka
    pub tachiai_mix: [f64; 3],
    /// A base attribute above this counts as the wrestler's style
    pub style_threshold: u8,
    /// Probability of the style's primary technique over its secondary one
    pub style_primary_bias: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            salt_dramatic_bias: 0.6,
            tachiai_confidence_margin: 2,
            tachiai_mix: [0.4, 0.3, 0.3],
            style_threshold: 6,
            style_primary_bias: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Budget for both corners to choose before the phase auto-resolves
    pub move_selection_timeout_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_selection_timeout_ms: 30_000,
        }
    }
}

/// Everything the bout engine reads while resolving a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoutConfig {
    pub finish: FinishTuning,
    pub ai: AiTuning,
    pub timing: TimingConfig,
}

impl BoutConfig {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let finish = &self.finish;
        if !(0.0..=1.0).contains(&finish.min_chance)
            || !(0.0..=1.0).contains(&finish.max_chance)
            || finish.min_chance >= finish.max_chance
        {
            return Err(DohyoError::Config(format!(
                "finish chance bounds must satisfy 0 <= min ({}) < max ({}) <= 1",
                finish.min_chance, finish.max_chance
            )));
        }

        // Negative weights would let a stat gain lower the finishing chance
        let negative = Stat::ALL
            .iter()
            .any(|&stat| finish.stat_multipliers.get(stat) < 0.0)
            || finish.signature_move_bonus < 0.0
            || finish.affinity_bonus < 0.0
            || finish.technique_weight < 0.0
            || finish.speed_weight < 0.0;
        if negative {
            return Err(DohyoError::Config(
                "finish multipliers and bonuses must be non-negative".into(),
            ));
        }

        let ai = &self.ai;
        if !(0.0..=1.0).contains(&ai.salt_dramatic_bias)
            || !(0.0..=1.0).contains(&ai.style_primary_bias)
        {
            return Err(DohyoError::Config("AI biases must be within [0, 1]".into()));
        }
        if ai.tachiai_mix.iter().any(|w| *w < 0.0) || ai.tachiai_mix.iter().sum::<f64>() <= 0.0 {
            return Err(DohyoError::Config(
                "tachiai_mix weights must be non-negative with a positive sum".into(),
            ));
        }

        if self.timing.move_selection_timeout_ms == 0 {
            return Err(DohyoError::Config(
                "move_selection_timeout_ms must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Tournament bookkeeping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Field size after CPU fill
    pub tournament_size: usize,
    /// Match wins that earn the Emperor's Cup
    pub wins_needed_for_cup: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            tournament_size: 8,
            wins_needed_for_cup: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DohyoConfig {
    pub bout: BoutConfig,
    pub tournament: TournamentConfig,
}

impl DohyoConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: DohyoConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.bout.validate()?;
        if self.tournament.tournament_size < 2 {
            return Err(DohyoError::Config(
                "tournament_size must allow at least one pairing".into(),
            ));
        }
        if self.tournament.wins_needed_for_cup == 0 {
            return Err(DohyoError::Config(
                "wins_needed_for_cup must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<DohyoConfig> {
    let contents = fs::read_to_string(path)?;
    DohyoConfig::from_toml_str(&contents)
}
