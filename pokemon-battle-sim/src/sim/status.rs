//! Primary status conditions and their end-of-turn processing.

use serde::{Deserialize, Serialize};

use crate::data::creature::EffectKind;
use crate::report::LogEntry;

use super::combatant::Combatant;

/// Mutually exclusive primary statuses. Confusion and flinch are volatile
/// states tracked directly on the combatant, not here.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCondition {
    Burn,
    Poison,
    Paralysis,
    Sleep,
    Freeze,
}

impl StatusCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCondition::Burn => "burn",
            StatusCondition::Poison => "poison",
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Sleep => "sleep",
            StatusCondition::Freeze => "freeze",
        }
    }

    /// Maps a move's effect kind onto a primary status, if it is one.
    pub fn from_effect(kind: EffectKind) -> Option<Self> {
        match kind {
            EffectKind::Burn => Some(StatusCondition::Burn),
            EffectKind::Poison => Some(StatusCondition::Poison),
            EffectKind::Paralysis => Some(StatusCondition::Paralysis),
            EffectKind::Sleep => Some(StatusCondition::Sleep),
            EffectKind::Freeze => Some(StatusCondition::Freeze),
            EffectKind::Confusion | EffectKind::Flinch => None,
        }
    }
}

/// Sets a primary status. Refused while another (or the same) one is
/// active, which enforces mutual exclusivity at the application boundary.
pub fn try_apply(combatant: &mut Combatant, condition: StatusCondition) -> bool {
    if combatant.status.is_some() {
        return false;
    }
    combatant.status = Some(condition);
    if condition == StatusCondition::Sleep {
        // Duration is rolled by the action gate on first encounter.
        combatant.sleep_turns = None;
    }
    true
}

/// End-of-turn residual processing. Burn and poison chip damage lands here;
/// sleep and freeze only announce themselves — their skip/thaw logic is
/// owned by the per-action gate so counters are never decremented twice.
pub fn tick(combatant: &mut Combatant) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    let Some(condition) = combatant.status else {
        return entries;
    };
    let name = combatant.name.clone();
    match condition {
        StatusCondition::Burn => {
            entries.push(LogEntry::text(&name, format!("{name} is hurt by its burn!")));
            combatant.take_damage(chip_damage(combatant.stats.hp, 16));
        }
        StatusCondition::Poison => {
            entries.push(LogEntry::text(&name, format!("{name} is hurt by poison!")));
            combatant.take_damage(chip_damage(combatant.stats.hp, 8));
        }
        StatusCondition::Sleep => {
            entries.push(LogEntry::text(&name, format!("{name} is fast asleep.")));
        }
        StatusCondition::Freeze => {
            entries.push(LogEntry::text(&name, format!("{name} is frozen solid!")));
        }
        StatusCondition::Paralysis => {}
    }
    entries
}

/// Ceiling division of the effective max HP by the status divisor.
fn chip_damage(max_hp: u16, divisor: u32) -> u16 {
    ((u32::from(max_hp) + divisor - 1) / divisor) as u16
}
