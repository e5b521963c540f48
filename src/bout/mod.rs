//! Bout engine - phase tables, stat accumulation, resolution and the CPU opponent

pub mod ai;
pub mod execution;
pub mod narrative;
pub mod phase;
pub mod resolution;
pub mod stats;
pub mod tables;
pub mod wrestler;

pub use execution::{
    decide_winner, BoutEvent, BoutEventType, BoutObserver, Corner, Match, MatchStatus,
    SubmitOutcome, TimeoutCheck,
};
pub use phase::{Choice, Kimarite, Phase, SignatureMove};
pub use resolution::{finish_chance, resolve_phase, FinishOdds, PhaseOutcome};
pub use stats::{BoutStats, Stat, StatDelta};
pub use wrestler::{Controller, WrestlerBuild};
