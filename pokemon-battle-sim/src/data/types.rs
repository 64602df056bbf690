//! Elemental types and the type-effectiveness chart.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The eighteen elemental types.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Type {
    pub fn as_str(&self) -> &'static str {
        match self {
            Type::Normal => "normal",
            Type::Fire => "fire",
            Type::Water => "water",
            Type::Electric => "electric",
            Type::Grass => "grass",
            Type::Ice => "ice",
            Type::Fighting => "fighting",
            Type::Poison => "poison",
            Type::Ground => "ground",
            Type::Flying => "flying",
            Type::Psychic => "psychic",
            Type::Bug => "bug",
            Type::Rock => "rock",
            Type::Ghost => "ghost",
            Type::Dragon => "dragon",
            Type::Dark => "dark",
            Type::Steel => "steel",
            Type::Fairy => "fairy",
        }
    }
}

impl FromStr for Type {
    type Err = anyhow::Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Ok(Type::Normal),
            "fire" => Ok(Type::Fire),
            "water" => Ok(Type::Water),
            "electric" => Ok(Type::Electric),
            "grass" => Ok(Type::Grass),
            "ice" => Ok(Type::Ice),
            "fighting" => Ok(Type::Fighting),
            "poison" => Ok(Type::Poison),
            "ground" => Ok(Type::Ground),
            "flying" => Ok(Type::Flying),
            "psychic" => Ok(Type::Psychic),
            "bug" => Ok(Type::Bug),
            "rock" => Ok(Type::Rock),
            "ghost" => Ok(Type::Ghost),
            "dragon" => Ok(Type::Dragon),
            "dark" => Ok(Type::Dark),
            "steel" => Ok(Type::Steel),
            "fairy" => Ok(Type::Fairy),
            other => Err(anyhow::anyhow!("unknown type '{other}'")),
        }
    }
}

/// Sparse (attacking, defending) -> multiplier chart. Pairs not listed are
/// neutral (1.0). Built once on first use and read-only afterwards.
static TYPE_CHART: Lazy<HashMap<(Type, Type), f64>> = Lazy::new(|| {
    use Type::*;
    let mut chart = HashMap::new();
    let mut row = |attacking: Type, entries: &[(Type, f64)]| {
        for &(defending, multiplier) in entries {
            chart.insert((attacking, defending), multiplier);
        }
    };
    row(Normal, &[(Rock, 0.5), (Steel, 0.5), (Ghost, 0.0)]);
    row(
        Fire,
        &[
            (Grass, 2.0),
            (Ice, 2.0),
            (Bug, 2.0),
            (Steel, 2.0),
            (Fire, 0.5),
            (Water, 0.5),
            (Rock, 0.5),
            (Dragon, 0.5),
        ],
    );
    row(
        Water,
        &[
            (Fire, 2.0),
            (Ground, 2.0),
            (Rock, 2.0),
            (Water, 0.5),
            (Grass, 0.5),
            (Dragon, 0.5),
        ],
    );
    row(
        Electric,
        &[
            (Water, 2.0),
            (Flying, 2.0),
            (Electric, 0.5),
            (Grass, 0.5),
            (Dragon, 0.5),
            (Ground, 0.0),
        ],
    );
    row(
        Grass,
        &[
            (Water, 2.0),
            (Ground, 2.0),
            (Rock, 2.0),
            (Fire, 0.5),
            (Grass, 0.5),
            (Poison, 0.5),
            (Flying, 0.5),
            (Bug, 0.5),
            (Dragon, 0.5),
            (Steel, 0.5),
        ],
    );
    row(
        Ice,
        &[
            (Grass, 2.0),
            (Ground, 2.0),
            (Flying, 2.0),
            (Dragon, 2.0),
            (Fire, 0.5),
            (Water, 0.5),
            (Ice, 0.5),
            (Steel, 0.5),
        ],
    );
    row(
        Fighting,
        &[
            (Normal, 2.0),
            (Ice, 2.0),
            (Rock, 2.0),
            (Dark, 2.0),
            (Steel, 2.0),
            (Poison, 0.5),
            (Flying, 0.5),
            (Psychic, 0.5),
            (Bug, 0.5),
            (Fairy, 0.5),
            (Ghost, 0.0),
        ],
    );
    row(
        Poison,
        &[
            (Grass, 2.0),
            (Fairy, 2.0),
            (Poison, 0.5),
            (Ground, 0.5),
            (Rock, 0.5),
            (Ghost, 0.5),
            (Steel, 0.0),
        ],
    );
    row(
        Ground,
        &[
            (Fire, 2.0),
            (Electric, 2.0),
            (Poison, 2.0),
            (Rock, 2.0),
            (Steel, 2.0),
            (Grass, 0.5),
            (Bug, 0.5),
            (Flying, 0.0),
        ],
    );
    row(
        Flying,
        &[
            (Grass, 2.0),
            (Fighting, 2.0),
            (Bug, 2.0),
            (Electric, 0.5),
            (Rock, 0.5),
            (Steel, 0.5),
        ],
    );
    row(
        Psychic,
        &[
            (Fighting, 2.0),
            (Poison, 2.0),
            (Psychic, 0.5),
            (Steel, 0.5),
            (Dark, 0.0),
        ],
    );
    row(
        Bug,
        &[
            (Grass, 2.0),
            (Psychic, 2.0),
            (Dark, 2.0),
            (Fire, 0.5),
            (Fighting, 0.5),
            (Poison, 0.5),
            (Flying, 0.5),
            (Ghost, 0.5),
            (Steel, 0.5),
            (Fairy, 0.5),
        ],
    );
    row(
        Rock,
        &[
            (Fire, 2.0),
            (Ice, 2.0),
            (Flying, 2.0),
            (Bug, 2.0),
            (Fighting, 0.5),
            (Ground, 0.5),
            (Steel, 0.5),
        ],
    );
    row(
        Ghost,
        &[(Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5), (Normal, 0.0)],
    );
    row(Dragon, &[(Dragon, 2.0), (Steel, 0.5), (Fairy, 0.0)]);
    row(
        Dark,
        &[
            (Psychic, 2.0),
            (Ghost, 2.0),
            (Fighting, 0.5),
            (Dark, 0.5),
            (Fairy, 0.5),
        ],
    );
    row(
        Steel,
        &[
            (Ice, 2.0),
            (Rock, 2.0),
            (Fairy, 2.0),
            (Fire, 0.5),
            (Water, 0.5),
            (Electric, 0.5),
            (Steel, 0.5),
        ],
    );
    row(
        Fairy,
        &[
            (Fighting, 2.0),
            (Dragon, 2.0),
            (Dark, 2.0),
            (Fire, 0.5),
            (Poison, 0.5),
            (Steel, 0.5),
        ],
    );
    chart
});

/// Combined multiplier of an attacking type against a defending type set.
/// Multipliers compound across dual types; unlisted pairs contribute 1.0.
pub fn effectiveness(attacking: Type, defending: &[Type]) -> f64 {
    defending.iter().fold(1.0, |multiplier, defending_type| {
        multiplier
            * TYPE_CHART
                .get(&(attacking, *defending_type))
                .copied()
                .unwrap_or(1.0)
    })
}
