//! Core type definitions used throughout the codebase

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Wall-clock milliseconds supplied by the host
pub type Millis = u64;

/// Unique identifier for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive an id from the injected RNG so seeded runs stay reproducible
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(Builder::from_random_bytes(rng.gen()).into_uuid())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Participant key (email-like)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Corner of the dohyo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    East,
    West,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::East, Side::West];

    pub fn opponent(self) -> Self {
        match self {
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::East => "East",
            Side::West => "West",
        }
    }
}

/// A value held once per corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub east: T,
    pub west: T,
}

impl<T> PerSide<T> {
    pub fn new(east: T, west: T) -> Self {
        Self { east, west }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::East => &self.east,
            Side::West => &self.west,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::East => &mut self.east,
            Side::West => &mut self.west,
        }
    }
}
