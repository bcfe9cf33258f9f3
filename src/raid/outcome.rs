//! Raid outcome resolution
//!
//! Both sides roll a die and add their score and modifier. The attacker
//! needs a strictly higher total; ties hold for the defender. Casualties
//! scale with each side's committed score, and the losing side takes the
//! heavier factor.

use serde::{Deserialize, Serialize};

use crate::core::config::{OutcomeConfig, MAX_DIE_SIDES};
use crate::core::error::{require_finite, require_non_negative, EngineError, Result};
use crate::raid::dice::DiceRoller;

/// Casualty rate used when the caller has no better figure
pub const DEFAULT_CASUALTY_RATE: f64 = 0.1;

/// Everything a single raid resolution needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeInput {
    pub attacker_score: f64,
    pub defender_score: f64,
    #[serde(default)]
    pub attacker_modifier: f64,
    #[serde(default)]
    pub defender_modifier: f64,
    /// Share of the attacker's strength sent on the raid (0-100)
    #[serde(default = "full_commitment")]
    pub forces_committed_percent: f64,
    #[serde(default = "default_casualty_rate")]
    pub casualty_rate_base: f64,
    #[serde(default = "unit_multiplier")]
    pub casualty_multiplier: f64,
}

fn full_commitment() -> f64 {
    100.0
}

fn default_casualty_rate() -> f64 {
    DEFAULT_CASUALTY_RATE
}

fn unit_multiplier() -> f64 {
    1.0
}

impl OutcomeInput {
    /// Full commitment, no modifiers, default casualty rate
    pub fn new(attacker_score: f64, defender_score: f64) -> Self {
        Self {
            attacker_score,
            defender_score,
            attacker_modifier: 0.0,
            defender_modifier: 0.0,
            forces_committed_percent: full_commitment(),
            casualty_rate_base: DEFAULT_CASUALTY_RATE,
            casualty_multiplier: unit_multiplier(),
        }
    }

    pub fn with_modifiers(mut self, attacker: f64, defender: f64) -> Self {
        self.attacker_modifier = attacker;
        self.defender_modifier = defender;
        self
    }

    pub fn with_forces_committed(mut self, percent: f64) -> Self {
        self.forces_committed_percent = percent;
        self
    }

    pub fn with_casualties(mut self, rate_base: f64, multiplier: f64) -> Self {
        self.casualty_rate_base = rate_base;
        self.casualty_multiplier = multiplier;
        self
    }

    fn validate(&self) -> Result<()> {
        require_non_negative("attacker_score", self.attacker_score)?;
        require_non_negative("defender_score", self.defender_score)?;
        require_non_negative("forces_committed_percent", self.forces_committed_percent)?;
        require_non_negative("casualty_rate_base", self.casualty_rate_base)?;
        require_non_negative("casualty_multiplier", self.casualty_multiplier)?;
        require_finite("attacker_modifier", self.attacker_modifier)?;
        require_finite("defender_modifier", self.defender_modifier)?;
        Ok(())
    }

    /// Attacker score scaled by the committed share, rounded
    pub fn effective_attacker_score(&self) -> f64 {
        (self.attacker_score * self.forces_committed_percent / 100.0).round()
    }
}

/// Rewards and consequences attached to a resolved raid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeEffect {
    /// Attacker carries off resources proportional to the margin
    ResourcesSeized { amount: u32 },
    /// Attacker won by at least the decisive margin
    DecisiveVictory,
    /// Defender held
    AttackRepelled,
    /// Defender held by at least the decisive margin
    AttackerRouted,
}

/// Result of one raid resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResult {
    pub success: bool,
    pub margin: f64,
    pub attacker_roll: u32,
    pub defender_roll: u32,
    pub attacker_total: f64,
    pub defender_total: f64,
    pub effective_attacker_score: f64,
    pub attacker_casualties: u32,
    pub defender_casualties: u32,
    pub effects: Vec<OutcomeEffect>,
}

/// Resolve a raid with dice from `dice`
///
/// Inputs are validated before anything is rolled, so a rejected call
/// leaves the roller untouched.
pub fn resolve_outcome<D: DiceRoller + ?Sized>(
    input: &OutcomeInput,
    config: &OutcomeConfig,
    dice: &mut D,
) -> Result<OutcomeResult> {
    input.validate()?;

    let effective_attacker_score = input.effective_attacker_score();
    let attacker_roll = dice.roll(config.die_sides);
    let defender_roll = dice.roll(config.die_sides);

    let (attacker_total, defender_total) =
        contest_totals(input, effective_attacker_score, attacker_roll, defender_roll);
    let success = attacker_total > defender_total;
    let margin = (attacker_total - defender_total).abs();

    let casualty_rate = input.casualty_rate_base * input.casualty_multiplier;
    let (attacker_factor, defender_factor) = if success {
        (config.winner_casualty_factor, config.loser_casualty_factor)
    } else {
        (config.loser_casualty_factor, config.winner_casualty_factor)
    };
    let attacker_casualties = round_count(effective_attacker_score * casualty_rate * attacker_factor);
    let defender_casualties = round_count(input.defender_score * casualty_rate * defender_factor);

    let effects = outcome_effects(success, margin, config);

    tracing::debug!(
        attacker_roll,
        defender_roll,
        attacker_total,
        defender_total,
        success,
        "Resolved raid outcome"
    );

    Ok(OutcomeResult {
        success,
        margin,
        attacker_roll,
        defender_roll,
        attacker_total,
        defender_total,
        effective_attacker_score,
        attacker_casualties,
        defender_casualties,
        effects,
    })
}

/// Exact chance that the attacker wins, over every pair of rolls
pub fn success_probability(input: &OutcomeInput, config: &OutcomeConfig) -> Result<f64> {
    input.validate()?;
    if config.die_sides > MAX_DIE_SIDES {
        return Err(EngineError::InvalidConfig(format!(
            "die_sides {} is above {}",
            config.die_sides, MAX_DIE_SIDES
        )));
    }

    let sides = config.die_sides.max(1);
    let effective = input.effective_attacker_score();
    let mut wins = 0u64;

    for attacker_roll in 1..=sides {
        for defender_roll in 1..=sides {
            let (attacker_total, defender_total) =
                contest_totals(input, effective, attacker_roll, defender_roll);
            if attacker_total > defender_total {
                wins += 1;
            }
        }
    }

    Ok(wins as f64 / (sides as f64 * sides as f64))
}

fn contest_totals(
    input: &OutcomeInput,
    effective_attacker_score: f64,
    attacker_roll: u32,
    defender_roll: u32,
) -> (f64, f64) {
    let attacker_total = attacker_roll as f64 + effective_attacker_score + input.attacker_modifier;
    let defender_total = defender_roll as f64 + input.defender_score + input.defender_modifier;
    (attacker_total, defender_total)
}

fn outcome_effects(success: bool, margin: f64, config: &OutcomeConfig) -> Vec<OutcomeEffect> {
    let decisive = margin >= config.decisive_margin;
    let mut effects = Vec::new();

    if success {
        effects.push(OutcomeEffect::ResourcesSeized {
            amount: round_count(margin * config.plunder_per_margin),
        });
        if decisive {
            effects.push(OutcomeEffect::DecisiveVictory);
        }
    } else {
        effects.push(OutcomeEffect::AttackRepelled);
        if decisive {
            effects.push(OutcomeEffect::AttackerRouted);
        }
    }

    effects
}

fn round_count(value: f64) -> u32 {
    // `as` saturates; NaN becomes 0
    value.round().max(0.0) as u32
}
