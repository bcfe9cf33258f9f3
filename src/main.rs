//! Faction Engine - command line entry point
//!
//! Runs the scoring rules outside the tabletop host, for balancing and for
//! checking what a given faction sheet or raid plan would produce.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use faction_engine::core::{EngineConfig, OpBundle, Result};
use faction_engine::faction::{calculate_strength, Base};
use faction_engine::radiation::{classify_tier, decay_with_config, effective_level};
use faction_engine::raid::{
    calculate_difficulty, difficulty_score, resolve_outcome, success_probability, ActivityKind,
    DifficultyInput, OutcomeInput,
};
use faction_engine::territory::{calculate_resources_by_key, territory_income, Territory};

/// Faction scoring and outcome engine
#[derive(Parser, Debug)]
#[command(name = "faction_engine")]
#[command(about = "Score territories, factions, raids, radiation and activities")]
struct Args {
    /// TOML file overriding the default coefficients
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resource yield of one territory
    Resources {
        /// settlement, fortress, mine, farm, port, factory or research
        kind: String,
        /// small, medium, large or capital
        #[arg(default_value = "medium")]
        size: String,
    },

    /// Strength and income of a faction sheet (JSON)
    Strength {
        /// File with `ops`, `territories` and `bases`
        sheet: PathBuf,
    },

    /// Resolve one raid
    Raid {
        #[command(flatten)]
        contest: ContestArgs,

        /// Random seed for deterministic rolls
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Exact odds of a raid succeeding
    Odds {
        #[command(flatten)]
        contest: ContestArgs,
    },

    /// Effective radiation level and tier
    Radiation {
        #[arg(long)]
        exposure: f64,

        /// Protection from gear, in percent
        #[arg(long, default_value_t = 0.0)]
        protection: f64,

        /// Seconds since the exposure was last recorded
        #[arg(long, default_value_t = 0.0)]
        elapsed: f64,
    },

    /// Difficulty tier of a planned activity
    Difficulty {
        /// raid, skirmish, sabotage, espionage, patrol or siege
        #[arg(long, default_value = "raid", value_parser = parse_activity)]
        kind: ActivityKind,

        /// Explicit type modifier (overrides the kind's default)
        #[arg(long, allow_hyphen_values = true)]
        type_modifier: Option<f64>,

        #[arg(long, default_value_t = 1)]
        objectives: u32,

        #[arg(long, default_value_t = 0.0)]
        resources: f64,

        #[arg(long, default_value_t = 1)]
        participants: u32,
    },
}

#[derive(clap::Args, Debug)]
struct ContestArgs {
    #[arg(long)]
    attacker: f64,

    #[arg(long)]
    defender: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    attacker_modifier: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    defender_modifier: f64,

    /// Share of the attacker's strength committed, in percent
    #[arg(long, default_value_t = 100.0)]
    forces: f64,

    #[arg(long, default_value_t = faction_engine::raid::outcome::DEFAULT_CASUALTY_RATE)]
    casualty_rate: f64,

    #[arg(long, default_value_t = 1.0)]
    casualty_multiplier: f64,
}

fn parse_activity(s: &str) -> std::result::Result<ActivityKind, String> {
    s.parse()
}

impl ContestArgs {
    fn to_input(&self) -> OutcomeInput {
        OutcomeInput::new(self.attacker, self.defender)
            .with_modifiers(self.attacker_modifier, self.defender_modifier)
            .with_forces_committed(self.forces)
            .with_casualties(self.casualty_rate, self.casualty_multiplier)
    }
}

/// Faction sheet as exported from the host
#[derive(Deserialize, Debug)]
struct FactionSheet {
    #[serde(default)]
    ops: OpBundle,
    #[serde(default)]
    territories: Vec<Territory>,
    #[serde(default)]
    bases: Vec<Base>,
}

#[derive(Serialize)]
struct StrengthReport {
    strength: u32,
    income: OpBundle,
}

#[derive(Serialize)]
struct RadiationReport {
    exposure: f64,
    effective_level: f64,
    tier: String,
}

#[derive(Serialize)]
struct DifficultyReport {
    score: f64,
    tier: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("faction_engine=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Resources { kind, size } => {
            let yields = calculate_resources_by_key(&kind, &size, &config.territory)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&yields)?);
            } else {
                println!("{} {} yields:", size, kind);
                for (category, amount) in yields.iter() {
                    println!("  {:<10} {}", category, amount);
                }
            }
        }

        Command::Strength { sheet } => {
            let content = std::fs::read_to_string(&sheet)?;
            let sheet: FactionSheet = serde_json::from_str(&content)?;
            let report = StrengthReport {
                strength: calculate_strength(
                    &sheet.ops,
                    &sheet.territories,
                    &sheet.bases,
                    &config.strength,
                ),
                income: territory_income(&sheet.territories, &config.territory),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Strength: {}", report.strength);
                println!("Income per cycle:");
                for (category, amount) in report.income.iter() {
                    println!("  {:<10} {}", category, amount);
                }
            }
        }

        Command::Raid { contest, seed } => {
            let seed = seed.unwrap_or_else(|| rand::random());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_outcome(&contest.to_input(), &config.outcome, &mut rng)?;
            tracing::info!(seed, success = result.success, "Raid resolved");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} ({} + {} vs {} + {}), margin {}",
                    if result.success { "SUCCESS" } else { "FAILURE" },
                    result.attacker_roll,
                    result.attacker_total - result.attacker_roll as f64,
                    result.defender_roll,
                    result.defender_total - result.defender_roll as f64,
                    result.margin,
                );
                println!(
                    "Casualties: attacker {}, defender {}",
                    result.attacker_casualties, result.defender_casualties
                );
                for effect in &result.effects {
                    println!("  {:?}", effect);
                }
            }
        }

        Command::Odds { contest } => {
            let p = success_probability(&contest.to_input(), &config.outcome)?;
            if args.json {
                println!("{}", serde_json::json!({ "success_probability": p }));
            } else {
                println!("Success chance: {:.1}%", p * 100.0);
            }
        }

        Command::Radiation {
            exposure,
            protection,
            elapsed,
        } => {
            let exposure = decay_with_config(exposure, elapsed, &config.radiation);
            let level = effective_level(exposure, protection);
            let report = RadiationReport {
                exposure,
                effective_level: level,
                tier: classify_tier(level, &config.radiation.tiers).to_string(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "Exposure {:.1}, effective {:.1}: {}",
                    report.exposure, report.effective_level, report.tier
                );
            }
        }

        Command::Difficulty {
            kind,
            type_modifier,
            objectives,
            resources,
            participants,
        } => {
            let mut input =
                DifficultyInput::for_kind(kind, objectives, resources, participants, &config.difficulty);
            if let Some(modifier) = type_modifier {
                input.type_modifier = modifier;
            }
            let report = DifficultyReport {
                score: difficulty_score(&input, &config.difficulty),
                tier: calculate_difficulty(&input, &config.difficulty).to_string(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Score {:.1}: {}", report.score, report.tier);
            }
        }
    }

    Ok(())
}
