use anyhow::{anyhow, bail, Context, Result};
use pokemon_battle_sim::prelude::*;
use rand::seq::SliceRandom;
use std::env;
use std::fs;

const SAMPLES: &[&str] = &[
    include_str!("../samples/pikachu.json"),
    include_str!("../samples/charizard.json"),
    include_str!("../samples/blastoise.json"),
    include_str!("../samples/venusaur.json"),
];

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("simulate") => {
            let path_a = args
                .next()
                .ok_or_else(|| anyhow!("Usage: pokemon-battle-sim-cli simulate <a.json> <b.json> [options]"))?;
            let path_b = args
                .next()
                .ok_or_else(|| anyhow!("Usage: pokemon-battle-sim-cli simulate <a.json> <b.json> [options]"))?;
            let opts = BattleOpts::parse(args)?;
            let creature_a = load_creature(&path_a)?;
            let creature_b = load_creature(&path_b)?;
            run_battle(&creature_a, &creature_b, &opts)
        }
        Some("demo") => {
            let opts = BattleOpts::parse(args)?;
            demo(&opts)
        }
        Some("chart") => {
            let attacking: Type = args
                .next()
                .ok_or_else(|| anyhow!("Usage: pokemon-battle-sim-cli chart <attacking> <defending...>"))?
                .parse()?;
            let defending = args
                .map(|name| name.parse::<Type>())
                .collect::<Result<Vec<_>>>()?;
            if defending.is_empty() || defending.len() > 2 {
                bail!("chart expects one or two defending types");
            }
            let multiplier = effectiveness(attacking, &defending);
            let defending_names: Vec<&str> = defending.iter().map(Type::as_str).collect();
            println!(
                "{} -> {}: x{}",
                attacking.as_str(),
                defending_names.join("/"),
                multiplier
            );
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage: pokemon-battle-sim-cli <command>");
    println!();
    println!("Commands:");
    println!("  simulate <a.json> <b.json> [options]   battle two creature files");
    println!("  demo [options]                         battle two bundled sample creatures");
    println!("  chart <attacking> <defending...>       query the type chart");
    println!();
    println!("Options:");
    println!("  --level <n>        battle level (default {DEFAULT_LEVEL})");
    println!("  --max-turns <n>    turn cap (default {DEFAULT_MAX_TURNS})");
    println!("  --seed <s>         number or text seed for an exact replay");
    println!("  --pool <n>         move-pool size, 1-12 (default 8)");
    println!("  --json             print the full report as JSON");
}

struct BattleOpts {
    level: u8,
    max_turns: u32,
    seed: Option<SeedValue>,
    move_pool: Option<usize>,
    json: bool,
}

impl BattleOpts {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut opts = Self {
            level: DEFAULT_LEVEL,
            max_turns: DEFAULT_MAX_TURNS,
            seed: None,
            move_pool: None,
            json: false,
        };
        let args: Vec<String> = args.collect();
        let mut index = 0;
        while index < args.len() {
            let flag = args[index].as_str();
            let mut value = |name: &str| -> Result<String> {
                index += 1;
                args.get(index)
                    .cloned()
                    .ok_or_else(|| anyhow!("{name} expects a value"))
            };
            match flag {
                "--level" => {
                    opts.level = value("--level")?.parse().context("--level expects a number")?
                }
                "--max-turns" => {
                    opts.max_turns = value("--max-turns")?
                        .parse()
                        .context("--max-turns expects a number")?
                }
                "--seed" => {
                    let raw = value("--seed")?;
                    opts.seed = Some(match raw.parse::<u64>() {
                        Ok(number) => SeedValue::Number(number),
                        Err(_) => SeedValue::Text(raw),
                    });
                }
                "--pool" => {
                    opts.move_pool =
                        Some(value("--pool")?.parse().context("--pool expects a number")?)
                }
                "--json" => opts.json = true,
                other => bail!("unknown option '{other}'"),
            }
            index += 1;
        }
        Ok(opts)
    }
}

fn load_creature(path: &str) -> Result<Creature> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse creature from {path}"))
}

fn run_battle(creature_a: &Creature, creature_b: &Creature, opts: &BattleOpts) -> Result<()> {
    let report = match opts.move_pool {
        Some(pool) => BattleSim::with_move_pool_size(pool).simulate(
            creature_a,
            creature_b,
            opts.max_turns,
            opts.level,
            opts.seed.clone(),
        )?,
        None => simulate_battle(
            creature_a,
            creature_b,
            opts.max_turns,
            opts.level,
            opts.seed.clone(),
        )?,
    };
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        render(&report);
    }
    Ok(())
}

fn demo(opts: &BattleOpts) -> Result<()> {
    let seed = opts.seed.clone().unwrap_or_else(SeedValue::from_clock);
    let mut picker = BattleRng::new(&seed);
    let pair: Vec<Creature> = SAMPLES
        .choose_multiple(&mut picker, 2)
        .map(|text| serde_json::from_str(text))
        .collect::<serde_json::Result<_>>()
        .context("bundled sample creature is malformed")?;
    println!("{} vs {}", pair[0].name, pair[1].name);
    let opts = BattleOpts {
        seed: Some(seed),
        level: opts.level,
        max_turns: opts.max_turns,
        move_pool: opts.move_pool,
        json: opts.json,
    };
    run_battle(&pair[0], &pair[1], &opts)
}

fn render(report: &BattleReport) {
    for record in &report.records {
        println!("Turn {}:", record.turn);
        for entry in &record.entries {
            println!("  {}", entry.text);
        }
    }
    println!();
    match report.outcome.winner_name() {
        Some(name) => println!("Winner: {name} after {} turns.", report.turns),
        None => println!("Draw after {} turns.", report.turns),
    }
    if let Some(last) = report.records.last() {
        for snapshot in &last.hp {
            println!("  {}: {}/{} HP", snapshot.name, snapshot.current, snapshot.max);
        }
    }
    println!("Seed: {}", report.seed);
}
