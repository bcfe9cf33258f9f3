//! Engine configuration with documented constants
//!
//! Every coefficient used by the scoring formulas lives here. The defaults
//! reproduce the balance the tabletop modules shipped with; campaigns can
//! override any subset of them from a TOML file.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::{OpBundle, OpCategory};
use crate::radiation::RadiationTier;
use crate::raid::ActivityKind;
use crate::territory::TerritoryType;

/// Top-level configuration handed to every scoring call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub territory: TerritoryConfig,
    pub strength: StrengthConfig,
    pub outcome: OutcomeConfig,
    pub radiation: RadiationConfig,
    pub difficulty: DifficultyConfig,
}

// === TERRITORY ===

/// Resource rates per territory type and multipliers per size class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerritoryConfig {
    /// Base OP yield per territory type, before the size multiplier
    ///
    /// Zero rates are listed on purpose: the yield keeps the key.
    /// Entries read from a file are laid over these, category by category.
    #[serde(deserialize_with = "merge_territory_rates")]
    pub rates: AHashMap<TerritoryType, OpBundle>,

    pub sizes: SizeMultipliers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeMultipliers {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
    pub capital: f64,
}

impl Default for SizeMultipliers {
    fn default() -> Self {
        Self {
            small: 0.5,
            medium: 1.0,
            large: 2.0,
            capital: 4.0,
        }
    }
}

impl Default for TerritoryConfig {
    fn default() -> Self {
        let rates = TerritoryType::ALL
            .iter()
            .map(|kind| (*kind, default_rates(*kind)))
            .collect();

        Self {
            rates,
            sizes: SizeMultipliers::default(),
        }
    }
}

fn default_rates(kind: TerritoryType) -> OpBundle {
    use OpCategory::*;

    let entries: &[(OpCategory, f64)] = match kind {
        TerritoryType::Settlement => &[(Economy, 2.0), (SoftPower, 1.0), (Diplomacy, 1.0), (Violence, 0.0)],
        TerritoryType::Fortress => &[(Violence, 3.0), (NonLethal, 1.0), (Logistics, 1.0), (Economy, 0.0)],
        TerritoryType::Mine => &[(Economy, 3.0), (Logistics, 1.0), (SoftPower, 0.0)],
        TerritoryType::Farm => &[(Economy, 2.0), (Logistics, 2.0), (Violence, 0.0)],
        TerritoryType::Port => &[(Economy, 2.0), (Diplomacy, 1.0), (Logistics, 2.0)],
        TerritoryType::Factory => &[(Economy, 3.0), (Violence, 1.0), (Faith, 0.0)],
        TerritoryType::Research => &[(Intrigue, 1.0), (Economy, 1.0), (Culture, 2.0)],
    };

    entries.iter().copied().collect()
}

// === FACTION STRENGTH ===

/// Weights for the faction strength score
///
/// Only the combat-relevant OP categories count. Territory and base kinds
/// not present in the bonus tables fall into the `*_other` bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    pub violence_weight: f64,
    pub non_lethal_weight: f64,
    pub economy_weight: f64,

    /// Bonus per territory, keyed by lowercase territory kind
    #[serde(deserialize_with = "merge_territory_bonus")]
    pub territory_bonus: AHashMap<String, f64>,
    pub territory_bonus_other: f64,

    /// Bonus per base, keyed by lowercase base kind
    #[serde(deserialize_with = "merge_base_bonus")]
    pub base_bonus: AHashMap<String, f64>,
    pub base_bonus_other: f64,
}

impl Default for StrengthConfig {
    fn default() -> Self {
        let territory_bonus = [("fortress", 5.0), ("settlement", 2.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        let base_bonus = [("castle", 8.0), ("bunker", 6.0), ("tower", 4.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        Self {
            violence_weight: 2.0,
            non_lethal_weight: 1.5,
            economy_weight: 0.5,
            territory_bonus,
            territory_bonus_other: 1.0,
            base_bonus,
            base_bonus_other: 2.0,
        }
    }
}

// === RAID OUTCOME ===

/// Largest die the odds calculation will enumerate (sides squared pairs)
pub const MAX_DIE_SIDES: u32 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeConfig {
    /// Die size for both contest rolls (d20 convention)
    pub die_sides: u32,

    /// Casualty factor applied to the winning side
    pub winner_casualty_factor: f64,

    /// Casualty factor applied to the losing side
    pub loser_casualty_factor: f64,

    /// Resources seized per point of winning margin
    pub plunder_per_margin: f64,

    /// Margin at which a result counts as decisive
    pub decisive_margin: f64,
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            die_sides: 20,
            winner_casualty_factor: 0.7,
            loser_casualty_factor: 1.3,
            plunder_per_margin: 1.0,
            decisive_margin: 10.0,
        }
    }
}

// === RADIATION ===

/// Inclusive upper bound of one radiation tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBound {
    pub tier: RadiationTier,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiationConfig {
    /// Tier bounds, ascending. Levels above the last bound are lethal.
    pub tiers: Vec<TierBound>,

    /// Exposure lost per decay interval
    pub decay_rate_per_interval: f64,

    /// Length of one decay interval in seconds
    pub decay_interval_secs: f64,

    /// Exposure at which a creature counts as fully saturated
    pub threshold_for_full_level: f64,
}

impl Default for RadiationConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierBound { tier: RadiationTier::Safe, max: 10.0 },
                TierBound { tier: RadiationTier::Low, max: 25.0 },
                TierBound { tier: RadiationTier::Moderate, max: 50.0 },
                TierBound { tier: RadiationTier::High, max: 75.0 },
                TierBound { tier: RadiationTier::Severe, max: 90.0 },
            ],
            decay_rate_per_interval: 1.0,
            decay_interval_secs: 3600.0,
            threshold_for_full_level: 100.0,
        }
    }
}

// === DIFFICULTY ===

/// Coefficients of the activity difficulty score
///
/// Tuned empirically at the table; kept as-is for compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    pub objective_weight: f64,

    /// Resource totals below this add `scarce_resource_penalty`
    pub scarce_resource_limit: f64,
    pub scarce_resource_penalty: f64,
    /// Resource totals below this (but not scarce) add `low_resource_penalty`
    pub low_resource_limit: f64,
    pub low_resource_penalty: f64,
    /// Resource totals above this add `ample_resource_bonus` (negative)
    pub ample_resource_limit: f64,
    pub ample_resource_bonus: f64,

    pub no_participant_penalty: f64,
    pub solo_participant_penalty: f64,
    /// Groups larger than this add `large_group_bonus` (negative)
    pub large_group_size: usize,
    pub large_group_bonus: f64,

    /// Inclusive upper score bounds for trivial, easy, medium and hard
    pub trivial_max: f64,
    pub easy_max: f64,
    pub medium_max: f64,
    pub hard_max: f64,

    /// Default type modifier per activity kind
    #[serde(deserialize_with = "merge_activity_modifiers")]
    pub activity_modifiers: AHashMap<ActivityKind, f64>,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        let activity_modifiers = [
            (ActivityKind::Patrol, -1.0),
            (ActivityKind::Espionage, 1.0),
            (ActivityKind::Skirmish, 1.0),
            (ActivityKind::Sabotage, 2.0),
            (ActivityKind::Raid, 2.0),
            (ActivityKind::Siege, 3.0),
        ]
        .into_iter()
        .collect();

        Self {
            objective_weight: 0.5,
            scarce_resource_limit: 10.0,
            scarce_resource_penalty: 2.0,
            low_resource_limit: 20.0,
            low_resource_penalty: 1.0,
            ample_resource_limit: 50.0,
            ample_resource_bonus: -1.0,
            no_participant_penalty: 3.0,
            solo_participant_penalty: 1.0,
            large_group_size: 3,
            large_group_bonus: -1.0,
            trivial_max: -1.0,
            easy_max: 1.0,
            medium_max: 3.0,
            hard_max: 5.0,
            activity_modifiers,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let s = &self.strength;
        let weights = [s.violence_weight, s.non_lethal_weight, s.economy_weight];
        if weights.iter().any(|w| !(*w >= 0.0)) {
            return Err(invalid("strength weights must be non-negative"));
        }
        let bonuses = s
            .territory_bonus
            .values()
            .chain(s.base_bonus.values())
            .chain([&s.territory_bonus_other, &s.base_bonus_other]);
        for bonus in bonuses {
            if !(*bonus >= 0.0) {
                return Err(invalid("territory and base bonuses must be non-negative"));
            }
        }
        let keys = s.territory_bonus.keys().chain(s.base_bonus.keys());
        for key in keys {
            if *key != normalize_kind(key) {
                return Err(invalid(&format!(
                    "bonus key '{}' must be trimmed lowercase",
                    key
                )));
            }
        }

        let sizes = &self.territory.sizes;
        if [sizes.small, sizes.medium, sizes.large, sizes.capital]
            .iter()
            .any(|m| !(*m > 0.0))
        {
            return Err(invalid("size multipliers must be positive"));
        }
        if !(sizes.small <= sizes.medium && sizes.medium <= sizes.large && sizes.large <= sizes.capital) {
            return Err(invalid("size multipliers must grow with size"));
        }
        for (kind, rates) in &self.territory.rates {
            if let Some((category, value)) = rates.first_invalid() {
                return Err(invalid(&format!(
                    "{} rate for {} must be non-negative (got {})",
                    category, kind, value
                )));
            }
        }

        let o = &self.outcome;
        if o.die_sides == 0 || o.die_sides > MAX_DIE_SIDES {
            return Err(invalid(&format!(
                "die_sides must be between 1 and {} (got {})",
                MAX_DIE_SIDES, o.die_sides
            )));
        }
        if !(o.winner_casualty_factor >= 0.0 && o.loser_casualty_factor >= 0.0) {
            return Err(invalid("casualty factors must be non-negative"));
        }

        let r = &self.radiation;
        if r.tiers.is_empty() {
            return Err(invalid("radiation tier table must not be empty"));
        }
        if r.tiers.windows(2).any(|w| !(w[0].max < w[1].max)) {
            return Err(invalid("radiation tier bounds must be strictly ascending"));
        }
        if !(r.threshold_for_full_level > 0.0) {
            return Err(invalid("threshold_for_full_level must be positive"));
        }

        let d = &self.difficulty;
        if !(d.trivial_max < d.easy_max && d.easy_max < d.medium_max && d.medium_max < d.hard_max) {
            return Err(invalid(&format!(
                "difficulty thresholds must be ascending ({} < {} < {} < {})",
                d.trivial_max, d.easy_max, d.medium_max, d.hard_max
            )));
        }
        if !(d.scarce_resource_limit <= d.low_resource_limit) {
            return Err(invalid("scarce_resource_limit must be <= low_resource_limit"));
        }

        Ok(())
    }
}

/// Lookup form of a freeform territory or base kind
pub(crate) fn normalize_kind(kind: &str) -> String {
    kind.trim().to_ascii_lowercase()
}

// === MERGING OVERRIDES ===
//
// A table given in a config file extends the default table instead of
// replacing it; entries with the same key take the file's value.

fn merge_territory_rates<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<AHashMap<TerritoryType, OpBundle>, D::Error> {
    let overrides = AHashMap::<TerritoryType, OpBundle>::deserialize(deserializer)?;
    let mut rates = TerritoryConfig::default().rates;
    for (kind, bundle) in overrides {
        let entry = rates.entry(kind).or_default();
        for (category, rate) in bundle.iter() {
            entry.set(category, rate);
        }
    }
    Ok(rates)
}

fn merge_territory_bonus<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<AHashMap<String, f64>, D::Error> {
    let overrides = AHashMap::<String, f64>::deserialize(deserializer)?;
    Ok(merge_bonus_table(StrengthConfig::default().territory_bonus, overrides))
}

fn merge_base_bonus<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<AHashMap<String, f64>, D::Error> {
    let overrides = AHashMap::<String, f64>::deserialize(deserializer)?;
    Ok(merge_bonus_table(StrengthConfig::default().base_bonus, overrides))
}

fn merge_bonus_table(
    mut table: AHashMap<String, f64>,
    overrides: AHashMap<String, f64>,
) -> AHashMap<String, f64> {
    for (kind, bonus) in overrides {
        table.insert(normalize_kind(&kind), bonus);
    }
    table
}

fn merge_activity_modifiers<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<AHashMap<ActivityKind, f64>, D::Error> {
    let overrides = AHashMap::<ActivityKind, f64>::deserialize(deserializer)?;
    let mut modifiers = DifficultyConfig::default().activity_modifiers;
    modifiers.extend(overrides);
    Ok(modifiers)
}

fn invalid(msg: &str) -> EngineError {
    EngineError::InvalidConfig(msg.to_string())
}
