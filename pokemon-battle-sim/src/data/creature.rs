//! Caller-supplied creature records.
//!
//! These mirror the wire shape produced by the external data-fetch layer
//! (camel-cased JSON); the engine treats them as immutable input.

use serde::{Deserialize, Serialize};

use super::types::Type;

/// Base stat sextuple of a creature, before level scaling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Secondary effect a move can inflict on the defender.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Burn,
    Poison,
    Paralysis,
    Sleep,
    Freeze,
    Confusion,
    Flinch,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MoveEffect {
    pub kind: EffectKind,
    /// Application chance in percent, rolled independently per hit.
    #[serde(default = "full_chance")]
    pub chance: u8,
}

fn full_chance() -> u8 {
    100
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: Type,
    pub category: MoveCategory,
    /// Absent or zero for pure-status moves.
    #[serde(default)]
    pub power: Option<u16>,
    /// Percent accuracy; `None` means the move always hits.
    #[serde(default)]
    pub accuracy: Option<u8>,
    /// Total uses before the combatant has to struggle.
    pub pp: u8,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

impl Move {
    pub fn is_damaging(&self) -> bool {
        self.power.unwrap_or(0) > 0 && self.category != MoveCategory::Status
    }
}

/// A fully-resolved creature as delivered by the data layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub name: String,
    /// One or two types; order only matters for display.
    pub types: Vec<Type>,
    pub base_stats: BaseStats,
    pub moves: Vec<Move>,
}
