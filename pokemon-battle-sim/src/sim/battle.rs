//! Turn loop, per-action resolution, and the public simulation entry point.

use anyhow::{bail, Result};

use crate::data::creature::{Creature, EffectKind};
use crate::report::{BattleOutcome, BattleReport, HpSnapshot, LogEntry, TurnRecord};
use crate::rng::{BattleRng, SeedValue};

use super::combatant::{Combatant, DEFAULT_MOVE_POOL_SIZE, MOVE_POOL_LIMIT};
use super::damage::{calculate_damage, NEUTRAL_RANDOM_FACTOR};
use super::status::{self, StatusCondition};

pub const DEFAULT_MAX_TURNS: u32 = 300;
pub const DEFAULT_LEVEL: u8 = 50;

const FREEZE_THAW_CHANCE: f64 = 0.2;
const CONFUSION_SELF_HIT_CHANCE: f64 = 0.33;
const FULL_PARALYSIS_CHANCE: f64 = 0.25;

/// Battle simulator with a configurable move-pool size.
pub struct BattleSim {
    move_pool_size: usize,
}

impl Default for BattleSim {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleSim {
    pub fn new() -> Self {
        Self {
            move_pool_size: DEFAULT_MOVE_POOL_SIZE,
        }
    }

    pub fn with_move_pool_size(size: usize) -> Self {
        Self {
            move_pool_size: size.clamp(1, MOVE_POOL_LIMIT),
        }
    }

    /// Runs a full battle to completion or to the turn cap.
    ///
    /// Without a seed the run is seeded from the wall clock; the derived
    /// seed is echoed in the report either way, so any run can be
    /// replayed exactly.
    pub fn simulate(
        &self,
        creature_a: &Creature,
        creature_b: &Creature,
        max_turns: u32,
        level: u8,
        seed: Option<SeedValue>,
    ) -> Result<BattleReport> {
        validate_creature(creature_a)?;
        validate_creature(creature_b)?;
        if level == 0 {
            bail!("level must be at least 1");
        }
        if max_turns == 0 {
            bail!("max_turns must be at least 1");
        }

        let seed = seed.unwrap_or_else(SeedValue::from_clock);
        let mut rng = BattleRng::new(&seed);
        let mut a = Combatant::prepare(creature_a, level, self.move_pool_size);
        let mut b = Combatant::prepare(creature_b, level, self.move_pool_size);

        let mut records = Vec::new();
        let mut turn: u32 = 1;
        while !(a.is_fainted() || b.is_fainted()) && turn <= max_turns {
            records.push(process_turn(&mut a, &mut b, turn, level, &mut rng));
            turn += 1;
        }

        Ok(BattleReport {
            outcome: decide_outcome(&a, &b),
            turns: turn - 1,
            seed,
            records,
        })
    }
}

/// Convenience entry point using the default move pool.
pub fn simulate_battle(
    creature_a: &Creature,
    creature_b: &Creature,
    max_turns: u32,
    level: u8,
    seed: Option<SeedValue>,
) -> Result<BattleReport> {
    BattleSim::new().simulate(creature_a, creature_b, max_turns, level, seed)
}

fn validate_creature(creature: &Creature) -> Result<()> {
    if creature.moves.is_empty() {
        bail!("{} has no moves; at least one is required", creature.name);
    }
    if creature.types.is_empty() || creature.types.len() > 2 {
        bail!("{} must have one or two types", creature.name);
    }
    Ok(())
}

/// Winner if exactly one side is fainted, draw otherwise (simultaneous
/// knock-out, or turn-cap expiry with both sides standing).
fn decide_outcome(a: &Combatant, b: &Combatant) -> BattleOutcome {
    match (a.is_fainted(), b.is_fainted()) {
        (true, false) => BattleOutcome::Winner { name: b.name.clone() },
        (false, true) => BattleOutcome::Winner { name: a.name.clone() },
        _ => BattleOutcome::Draw,
    }
}

fn process_turn(
    a: &mut Combatant,
    b: &mut Combatant,
    turn: u32,
    level: u8,
    rng: &mut BattleRng,
) -> TurnRecord {
    let mut entries = Vec::new();

    // Speed ties go to the first-listed side; no tie-break roll.
    let a_first = a.effective_speed() >= b.effective_speed();
    {
        let (first, second) = if a_first {
            (&mut *a, &mut *b)
        } else {
            (&mut *b, &mut *a)
        };

        entries.extend(execute_action(first, second, level, rng));
        if !second.is_fainted() {
            entries.extend(execute_action(second, first, level, rng));
        }

        // Residuals run in mover order for whoever is still standing.
        if !first.is_fainted() {
            entries.extend(status::tick(first));
        }
        if !second.is_fainted() {
            entries.extend(status::tick(second));
        }
    }

    let outcome = if a.is_fainted() || b.is_fainted() {
        Some(decide_outcome(a, b))
    } else {
        None
    };

    TurnRecord {
        turn,
        entries,
        outcome,
        hp: [HpSnapshot::of(a), HpSnapshot::of(b)],
    }
}

/// Resolves one combatant's action: status gates, move selection, accuracy,
/// damage, then secondary effects.
fn execute_action(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    level: u8,
    rng: &mut BattleRng,
) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    if attacker.is_fainted() {
        return entries;
    }
    let name = attacker.name.clone();

    if attacker.flinched {
        attacker.flinched = false;
        entries.push(LogEntry::text(
            &name,
            format!("{name} flinched and couldn't move!"),
        ));
        return entries;
    }

    if attacker.status == Some(StatusCondition::Sleep) {
        let remaining = match attacker.sleep_turns {
            Some(turns) => turns,
            None => {
                let rolled = rng.int(1, 3) as u8;
                attacker.sleep_turns = Some(rolled);
                rolled
            }
        };
        if remaining > 0 {
            attacker.sleep_turns = Some(remaining - 1);
            entries.push(LogEntry::text(&name, format!("{name} is fast asleep.")));
            return entries;
        }
        attacker.status = None;
        attacker.sleep_turns = None;
        entries.push(LogEntry::text(&name, format!("{name} woke up!")));
    }

    if attacker.status == Some(StatusCondition::Freeze) {
        if rng.chance(FREEZE_THAW_CHANCE) {
            attacker.status = None;
            entries.push(LogEntry::text(&name, format!("{name} thawed out!")));
        } else {
            entries.push(LogEntry::text(&name, format!("{name} is frozen solid!")));
            return entries;
        }
    }

    if attacker.confusion_turns > 0 {
        attacker.confusion_turns -= 1;
        entries.push(LogEntry::text(&name, format!("{name} is confused!")));
        if rng.chance(CONFUSION_SELF_HIT_CHANCE) {
            let self_damage = (attacker.effective_attack() / 8).max(1);
            attacker.take_damage(self_damage);
            entries.push(LogEntry::text(
                &name,
                format!("It hurt itself in its confusion for {self_damage} damage."),
            ));
            return entries;
        }
        if attacker.confusion_turns == 0 {
            entries.push(LogEntry::text(
                &name,
                format!("{name} snapped out of confusion!"),
            ));
        }
    }

    if attacker.status == Some(StatusCondition::Paralysis) && rng.chance(FULL_PARALYSIS_CHANCE) {
        entries.push(LogEntry::text(
            &name,
            format!("{name} is paralyzed! It can't move!"),
        ));
        return entries;
    }

    let Some(move_index) = select_move(attacker, defender, level) else {
        // Out of PP on every move: fall back to struggling. Consumes no PP.
        entries.push(LogEntry::text(
            &name,
            format!("{name} has no PP left! It struggles."),
        ));
        let struggle_damage = (attacker.effective_attack() / 10).max(1);
        defender.take_damage(struggle_damage);
        entries.push(LogEntry::text(
            &name,
            format!(
                "It dealt {struggle_damage} damage. {} HP: {}/{}",
                defender.name, defender.current_hp, defender.stats.hp
            ),
        ));
        return entries;
    };

    let mv = attacker.moves[move_index].clone();
    let accuracy = mv.accuracy.unwrap_or(100);
    if rng.next() * 100.0 >= f64::from(accuracy) {
        // A miss still spends the attempt.
        attacker.consume_pp(move_index);
        entries.push(LogEntry::with_move(
            &name,
            &mv.name,
            format!("{name} used {}, but it missed!", mv.name),
        ));
        return entries;
    }

    attacker.consume_pp(move_index);
    if mv.is_damaging() {
        let roll = 0.85 + rng.next() * 0.15;
        let damage = calculate_damage(attacker, defender, &mv, level, roll);
        defender.take_damage(damage);
        entries.push(LogEntry::with_move(
            &name,
            &mv.name,
            format!(
                "{name} used {}! It dealt {damage} damage. {} HP: {}/{}",
                mv.name, defender.name, defender.current_hp, defender.stats.hp
            ),
        ));
    } else {
        entries.push(LogEntry::with_move(
            &name,
            &mv.name,
            format!("{name} used {}!", mv.name),
        ));
    }

    for effect in &mv.effects {
        if !rng.chance(f64::from(effect.chance) / 100.0) {
            continue;
        }
        match effect.kind {
            EffectKind::Flinch => {
                defender.flinched = true;
                entries.push(LogEntry::text(
                    &defender.name,
                    format!("{} flinched!", defender.name),
                ));
            }
            EffectKind::Confusion => {
                // Orthogonal 1-4 turn counter. Gated on a clear primary
                // status at application time; it may outlast one applied
                // later.
                if defender.status.is_none() && defender.confusion_turns == 0 {
                    defender.confusion_turns = rng.int(1, 4) as u8;
                    entries.push(LogEntry::text(
                        &defender.name,
                        format!("{} is afflicted by confusion!", defender.name),
                    ));
                }
            }
            kind => {
                let Some(condition) = StatusCondition::from_effect(kind) else {
                    continue;
                };
                if status::try_apply(defender, condition) {
                    entries.push(LogEntry::text(
                        &defender.name,
                        format!("{} is afflicted by {}!", defender.name, condition.as_str()),
                    ));
                }
            }
        }
    }

    entries
}

/// Greedy move choice: maximize estimated damage (neutral roll) weighted by
/// accuracy, with a mild bonus for moves matching the attacker's own type.
/// Ties keep the earliest candidate. `None` when every move is out of PP.
fn select_move(attacker: &Combatant, defender: &Combatant, level: u8) -> Option<usize> {
    let mut best = None;
    let mut best_score = f64::NEG_INFINITY;
    for (index, mv) in attacker.moves.iter().enumerate() {
        if attacker.pp[index] == 0 {
            continue;
        }
        let accuracy = f64::from(mv.accuracy.unwrap_or(100)) / 100.0;
        let estimate = f64::from(calculate_damage(
            attacker,
            defender,
            mv,
            level,
            NEUTRAL_RANDOM_FACTOR,
        ));
        let affinity = if attacker.types.contains(&mv.move_type) {
            1.1
        } else {
            1.0
        };
        let score = estimate * accuracy * affinity;
        if score > best_score {
            best_score = score;
            best = Some(index);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::creature::{BaseStats, Move, MoveCategory};
    use crate::data::types::Type;

    fn creature(name: &str, speed: u16, moves: Vec<Move>) -> Creature {
        Creature {
            name: name.to_string(),
            types: vec![Type::Normal],
            base_stats: BaseStats {
                hp: 60,
                attack: 60,
                defense: 60,
                special_attack: 60,
                special_defense: 60,
                speed,
            },
            moves,
        }
    }

    fn attack_move(name: &str, power: u16, accuracy: u8) -> Move {
        Move {
            name: name.to_string(),
            move_type: Type::Normal,
            category: MoveCategory::Physical,
            power: Some(power),
            accuracy: Some(accuracy),
            pp: 30,
            effects: Vec::new(),
        }
    }

    #[test]
    fn rejects_creatures_without_moves() {
        let valid = creature("A", 60, vec![attack_move("tackle", 40, 100)]);
        let invalid = creature("B", 60, Vec::new());
        let err = simulate_battle(&valid, &invalid, 10, 50, Some(SeedValue::Number(1)))
            .unwrap_err();
        assert!(err.to_string().contains("no moves"));
    }

    #[test]
    fn rejects_degenerate_level_and_turn_cap() {
        let a = creature("A", 60, vec![attack_move("tackle", 40, 100)]);
        let b = creature("B", 60, vec![attack_move("tackle", 40, 100)]);
        assert!(simulate_battle(&a, &b, 10, 0, Some(SeedValue::Number(1))).is_err());
        assert!(simulate_battle(&a, &b, 0, 50, Some(SeedValue::Number(1))).is_err());
    }

    #[test]
    fn rejects_bad_type_counts() {
        let mut three_typed = creature("A", 60, vec![attack_move("tackle", 40, 100)]);
        three_typed.types = vec![Type::Normal, Type::Fire, Type::Water];
        let b = creature("B", 60, vec![attack_move("tackle", 40, 100)]);
        assert!(simulate_battle(&three_typed, &b, 10, 50, Some(SeedValue::Number(1))).is_err());
    }

    #[test]
    fn greedy_selection_weighs_accuracy_against_power() {
        let attacker_creature = creature(
            "A",
            60,
            vec![
                attack_move("wild-swing", 100, 50),
                attack_move("steady-hit", 60, 100),
            ],
        );
        let defender_creature = creature("B", 60, vec![attack_move("tackle", 40, 100)]);
        let attacker = Combatant::prepare(&attacker_creature, 50, 8);
        let defender = Combatant::prepare(&defender_creature, 50, 8);
        // 100 power at 50% accuracy scores below 60 power at 100%.
        assert_eq!(select_move(&attacker, &defender, 50), Some(1));
    }

    #[test]
    fn selection_skips_exhausted_moves_and_breaks_ties_first() {
        let attacker_creature = creature(
            "A",
            60,
            vec![
                attack_move("first", 60, 100),
                attack_move("twin", 60, 100),
            ],
        );
        let defender_creature = creature("B", 60, vec![attack_move("tackle", 40, 100)]);
        let mut attacker = Combatant::prepare(&attacker_creature, 50, 8);
        let defender = Combatant::prepare(&defender_creature, 50, 8);
        assert_eq!(select_move(&attacker, &defender, 50), Some(0));
        attacker.pp[0] = 0;
        assert_eq!(select_move(&attacker, &defender, 50), Some(1));
        attacker.pp[1] = 0;
        assert_eq!(select_move(&attacker, &defender, 50), None);
    }

    #[test]
    fn speed_ties_favor_the_first_listed_side() {
        let a = creature("First", 60, vec![attack_move("tackle", 40, 100)]);
        let b = creature("Second", 60, vec![attack_move("tackle", 40, 100)]);
        let report = simulate_battle(&a, &b, 5, 50, Some(SeedValue::Number(11))).unwrap();
        let opening = &report.records[0].entries[0];
        assert_eq!(opening.actor, "First");
    }

    #[test]
    fn faster_side_moves_first() {
        let a = creature("Slow", 10, vec![attack_move("tackle", 40, 100)]);
        let b = creature("Fast", 120, vec![attack_move("tackle", 40, 100)]);
        let report = simulate_battle(&a, &b, 5, 50, Some(SeedValue::Number(11))).unwrap();
        let opening = &report.records[0].entries[0];
        assert_eq!(opening.actor, "Fast");
    }
}
