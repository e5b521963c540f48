//! Registered entrants and their running records

use serde::{Deserialize, Serialize};

use crate::bout::execution::Corner;
use crate::bout::wrestler::{Controller, WrestlerBuild};
use crate::core::error::{DohyoError, Result};
use crate::core::types::ParticipantId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    /// Cups taken across tournaments; survives a reset
    pub tournament_wins: u32,
}

impl Record {
    /// Clear the per-tournament counters
    pub fn clear_bouts(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub player_name: String,
    /// Ring name
    pub shikona: String,
    /// Roster entry the wrestler is drawn from, if any
    pub wrestler_id: Option<u32>,
    pub build: WrestlerBuild,
    pub controller: Controller,
    #[serde(default)]
    pub record: Record,
}

impl Participant {
    /// A human entrant. The build must be valid and the names non-blank.
    pub fn human(
        id: impl Into<ParticipantId>,
        player_name: impl Into<String>,
        shikona: impl Into<String>,
        build: WrestlerBuild,
    ) -> Result<Self> {
        let participant = Self {
            id: id.into(),
            player_name: player_name.into(),
            shikona: shikona.into(),
            wrestler_id: None,
            build,
            controller: Controller::Human,
            record: Record::default(),
        };
        participant.validate()?;
        Ok(participant)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DohyoError::InvalidBuild("participant id is blank".into()));
        }
        if self.shikona.trim().is_empty() {
            return Err(DohyoError::InvalidBuild("ring name is blank".into()));
        }
        self.build.validate()
    }

    pub fn is_cpu(&self) -> bool {
        self.controller == Controller::Cpu
    }

    /// Name used in announcements: the build's override, else the ring name
    pub fn display_name(&self) -> &str {
        self.build.display_name.as_deref().unwrap_or(&self.shikona)
    }

    /// A fresh corner for a new match
    pub fn corner(&self) -> Corner {
        Corner::new(
            self.id.clone(),
            self.display_name(),
            self.build.clone(),
            self.controller,
        )
    }
}
