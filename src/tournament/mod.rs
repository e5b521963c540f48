//! Entrants, pairing and the championship race

pub mod pairing;
pub mod participant;
pub mod roster;
pub mod state;

pub use participant::{Participant, Record};
pub use state::{MatchSummary, TournamentState};
