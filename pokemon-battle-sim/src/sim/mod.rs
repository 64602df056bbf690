//! Battle simulation: combatant state, damage math, statuses, turn loop.

pub mod battle;
pub mod combatant;
pub mod damage;
pub mod status;

pub use battle::{simulate_battle, BattleSim};
pub use combatant::Combatant;
pub use status::StatusCondition;
