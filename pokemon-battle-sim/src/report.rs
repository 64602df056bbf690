//! Structured battle output: per-turn records and the final report.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::rng::SeedValue;
use crate::sim::combatant::Combatant;

/// One human-readable line of the action log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub actor: String,
    #[serde(rename = "move", skip_serializing_if = "Option::is_none", default)]
    pub move_name: Option<String>,
    pub text: String,
}

impl LogEntry {
    pub fn text(actor: &str, text: String) -> Self {
        Self {
            actor: actor.to_string(),
            move_name: None,
            text,
        }
    }

    pub fn with_move(actor: &str, move_name: &str, text: String) -> Self {
        Self {
            actor: actor.to_string(),
            move_name: Some(move_name.to_string()),
            text,
        }
    }
}

/// HP state of one combatant at the end of a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpSnapshot {
    pub name: String,
    pub current: u16,
    pub max: u16,
}

impl HpSnapshot {
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            current: combatant.current_hp,
            max: combatant.stats.hp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum BattleOutcome {
    Winner { name: String },
    Draw,
}

impl BattleOutcome {
    pub fn winner_name(&self) -> Option<&str> {
        match self {
            BattleOutcome::Winner { name } => Some(name),
            BattleOutcome::Draw => None,
        }
    }
}

/// Record of a single resolved turn. Append-only; once `outcome` is set the
/// engine stops producing further records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub entries: Vec<LogEntry>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub outcome: Option<BattleOutcome>,
    /// Both combatants in listing order.
    pub hp: [HpSnapshot; 2],
}

/// Full result of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// Turns actually executed (`records.len()`).
    pub turns: u32,
    /// The seed that drove the run; replays with it are identical.
    pub seed: SeedValue,
    pub records: Vec<TurnRecord>,
}

impl BattleReport {
    pub fn to_json(&self) -> serde_json::Value {
        json!(self)
    }
}
