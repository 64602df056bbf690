//! Turn-based creature battle simulation engine.
//!
//! Given two fully-resolved creature records, a level, and an optional
//! seed, [`sim::battle::simulate_battle`] plays out a complete battle and
//! returns a structured, replayable [`report::BattleReport`]. Resolving
//! creature names to records and rendering the report are the caller's
//! concern; the engine itself does no I/O.

pub mod data;
pub mod report;
pub mod rng;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::data::creature::{
        BaseStats, Creature, EffectKind, Move, MoveCategory, MoveEffect,
    };
    pub use crate::data::types::{effectiveness, Type};
    pub use crate::report::{BattleOutcome, BattleReport, HpSnapshot, LogEntry, TurnRecord};
    pub use crate::rng::{BattleRng, SeedValue};
    pub use crate::sim::battle::{simulate_battle, BattleSim, DEFAULT_LEVEL, DEFAULT_MAX_TURNS};
    pub use crate::sim::combatant::Combatant;
    pub use crate::sim::status::StatusCondition;
}
