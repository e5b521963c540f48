//! Dohyo - Sumo Bout Resolution Engine
//!
//! Five-phase bouts resolved from matchup tables and accumulated stats, a CPU
//! opponent, and tournament bookkeeping around a single active match.

pub mod bout;
pub mod core;
pub mod tournament;
