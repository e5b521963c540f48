use thiserror::Error;

use crate::bout::phase::Phase;
use crate::core::types::ParticipantId;

#[derive(Error, Debug)]
pub enum DohyoError {
    #[error("Invalid choice '{choice}' for phase {phase:?}")]
    InvalidChoice { phase: Phase, choice: String },

    #[error("Participant not in this match: {0}")]
    NotInMatch(ParticipantId),

    #[error("Phase already resolved: {0:?}")]
    PhaseAlreadyResolved(Phase),

    #[error("No active match")]
    NoActiveMatch,

    #[error("Invalid wrestler build: {0}")]
    InvalidBuild(String),

    #[error("Participant already registered: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Not enough entrants to pair a match (have {have})")]
    NotEnoughEntrants { have: usize },

    #[error("Tournament concluded, champion: {0}")]
    TournamentConcluded(ParticipantId),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DohyoError>;
