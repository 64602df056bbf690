//! Pure damage calculation.

use crate::data::creature::{Move, MoveCategory};
use crate::data::types::effectiveness;

use super::combatant::Combatant;

/// Neutral roll used by the move-selection heuristic in place of a random
/// draw, so ranking stays deterministic.
pub const NEUTRAL_RANDOM_FACTOR: f64 = 0.925;

/// Computes the damage a move deals. `random_factor` is the variance roll
/// in `[0.85, 1.0]`, supplied by the caller (the engine draws it; move
/// ranking passes [`NEUTRAL_RANDOM_FACTOR`]).
///
/// Status-category and powerless moves deal 0, as do moves the defender is
/// immune to; any other hit deals at least 1.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    level: u8,
    random_factor: f64,
) -> u16 {
    let power = match mv.power {
        Some(power) if power > 0 && mv.category != MoveCategory::Status => power,
        _ => return 0,
    };

    let (attack, defense) = if mv.category == MoveCategory::Physical {
        (attacker.effective_attack(), defender.effective_defense())
    } else {
        (
            attacker.effective_special_attack(),
            defender.effective_special_defense(),
        )
    };

    let type_multiplier = effectiveness(mv.move_type, &defender.types);
    if type_multiplier == 0.0 {
        return 0;
    }

    let base = ((2.0 * f64::from(level) / 5.0 + 2.0)
        * f64::from(power)
        * (f64::from(attack) / f64::from(defense.max(1)))
        / 50.0)
        .floor()
        + 2.0;
    let stab = if attacker.types.contains(&mv.move_type) {
        1.5
    } else {
        1.0
    };

    (base * stab * type_multiplier * random_factor).floor().max(1.0) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::creature::{BaseStats, Creature, Move, MoveCategory};
    use crate::data::types::Type;
    use crate::sim::combatant::Combatant;

    fn flat_combatant(name: &str, types: Vec<Type>) -> Combatant {
        // Base 50 across the board scales to 55 at level 50, so attack and
        // defense cancel in the base-damage ratio.
        let creature = Creature {
            name: name.to_string(),
            types,
            base_stats: BaseStats {
                hp: 50,
                attack: 50,
                defense: 50,
                special_attack: 50,
                special_defense: 50,
                speed: 50,
            },
            moves: vec![physical_move("tackle", Type::Normal, Some(50))],
        };
        Combatant::prepare(&creature, 50, 8)
    }

    fn physical_move(name: &str, move_type: Type, power: Option<u16>) -> Move {
        Move {
            name: name.to_string(),
            move_type,
            category: MoveCategory::Physical,
            power,
            accuracy: Some(100),
            pp: 35,
            effects: Vec::new(),
        }
    }

    #[test]
    fn status_and_powerless_moves_deal_zero() {
        let attacker = flat_combatant("A", vec![Type::Normal]);
        let defender = flat_combatant("B", vec![Type::Normal]);
        let status = Move {
            category: MoveCategory::Status,
            ..physical_move("growl", Type::Normal, None)
        };
        assert_eq!(calculate_damage(&attacker, &defender, &status, 50, 1.0), 0);
        let powerless = physical_move("splash", Type::Normal, Some(0));
        assert_eq!(
            calculate_damage(&attacker, &defender, &powerless, 50, 1.0),
            0
        );
    }

    #[test]
    fn immune_defender_takes_zero() {
        let attacker = flat_combatant("A", vec![Type::Normal]);
        let defender = flat_combatant("B", vec![Type::Ghost]);
        let tackle = physical_move("tackle", Type::Normal, Some(50));
        assert_eq!(calculate_damage(&attacker, &defender, &tackle, 50, 1.0), 0);
    }

    #[test]
    fn neutral_hit_matches_the_formula() {
        let attacker = flat_combatant("A", vec![Type::Fighting]);
        let defender = flat_combatant("B", vec![Type::Normal]);
        let tackle = physical_move("tackle", Type::Normal, Some(50));
        // base = floor((2*50/5 + 2) * 50 * (55/55) / 50) + 2 = 24
        assert_eq!(calculate_damage(&attacker, &defender, &tackle, 50, 1.0), 24);
        // Neutral selection roll: floor(24 * 0.925) = 22.
        assert_eq!(
            calculate_damage(&attacker, &defender, &tackle, 50, NEUTRAL_RANDOM_FACTOR),
            22
        );
    }

    #[test]
    fn stab_and_effectiveness_multiply_in() {
        let attacker = flat_combatant("A", vec![Type::Normal]);
        let defender = flat_combatant("B", vec![Type::Normal]);
        let tackle = physical_move("tackle", Type::Normal, Some(50));
        // STAB: floor(24 * 1.5) = 36.
        assert_eq!(calculate_damage(&attacker, &defender, &tackle, 50, 1.0), 36);

        let rock_defender = flat_combatant("C", vec![Type::Rock]);
        // Resisted + STAB: floor(24 * 1.5 * 0.5) = 18.
        assert_eq!(
            calculate_damage(&attacker, &rock_defender, &tackle, 50, 1.0),
            18
        );
    }

    #[test]
    fn damaging_hits_never_round_to_zero() {
        let attacker = flat_combatant("A", vec![Type::Normal]);
        let defender = flat_combatant("B", vec![Type::Rock, Type::Steel]);
        let weak = physical_move("tackle", Type::Normal, Some(1));
        let damage = calculate_damage(&attacker, &defender, &weak, 1, 0.85);
        assert_eq!(damage, 1);
    }

    #[test]
    fn special_moves_use_special_stats() {
        let mut attacker = flat_combatant("A", vec![Type::Normal]);
        let defender = flat_combatant("B", vec![Type::Normal]);
        attacker.stats.special_attack = attacker.stats.attack * 2;
        let physical = physical_move("tackle", Type::Normal, Some(50));
        let special = Move {
            category: MoveCategory::Special,
            ..physical.clone()
        };
        let physical_damage = calculate_damage(&attacker, &defender, &physical, 50, 1.0);
        let special_damage = calculate_damage(&attacker, &defender, &special, 50, 1.0);
        assert!(special_damage > physical_damage);
    }
}
