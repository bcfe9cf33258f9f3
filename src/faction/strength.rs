//! Faction strength scoring
//!
//! Collapses a faction's OP pool, territories and bases into one number
//! used to compare factions in raids and activities.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::{normalize_kind, StrengthConfig};
use crate::core::types::{OpBundle, OpCategory};
use crate::territory::Territory;

/// A fortified base owned by a faction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub kind: String,
}

impl Base {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Strength of a faction
///
/// Negative or NaN OP values contribute nothing, so the score is never
/// negative and never decreases when a territory or base is added.
pub fn calculate_strength(
    ops: &OpBundle,
    territories: &[Territory],
    bases: &[Base],
    config: &StrengthConfig,
) -> u32 {
    let op = |category| non_negative(ops.get(category));

    let op_strength = op(OpCategory::Violence) * config.violence_weight
        + op(OpCategory::NonLethal) * config.non_lethal_weight
        + op(OpCategory::Economy) * config.economy_weight;

    let territory_bonus: f64 = territories
        .iter()
        .map(|t| bucket_bonus(&config.territory_bonus, &t.kind, config.territory_bonus_other))
        .sum();

    let base_bonus: f64 = bases
        .iter()
        .map(|b| bucket_bonus(&config.base_bonus, &b.kind, config.base_bonus_other))
        .sum();

    let total = (op_strength + territory_bonus + base_bonus).round().max(0.0);

    tracing::debug!(
        op_strength,
        territory_bonus,
        base_bonus,
        total,
        "Calculated faction strength"
    );

    total as u32
}

fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}

fn bucket_bonus(table: &AHashMap<String, f64>, kind: &str, other: f64) -> f64 {
    table
        .get(normalize_kind(kind).as_str())
        .copied()
        .unwrap_or(other)
}
