//! Activity difficulty classification

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::DifficultyConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Trivial,
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DifficultyTier::Trivial => "trivial",
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// Kinds of faction activity with a configured base difficulty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Raid,
    Skirmish,
    Sabotage,
    Espionage,
    Patrol,
    Siege,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 6] = [
        ActivityKind::Raid,
        ActivityKind::Skirmish,
        ActivityKind::Sabotage,
        ActivityKind::Espionage,
        ActivityKind::Patrol,
        ActivityKind::Siege,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ActivityKind::Raid => "raid",
            ActivityKind::Skirmish => "skirmish",
            ActivityKind::Sabotage => "sabotage",
            ActivityKind::Espionage => "espionage",
            ActivityKind::Patrol => "patrol",
            ActivityKind::Siege => "siege",
        }
    }

    /// Type modifier from the config (0 when the kind is not listed)
    pub fn type_modifier(&self, config: &DifficultyConfig) -> f64 {
        config.activity_modifiers.get(self).copied().unwrap_or(0.0)
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityKind::ALL
            .iter()
            .copied()
            .find(|k| k.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown activity kind '{}'", s))
    }
}

/// Composition of a planned raid or activity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyInput {
    pub type_modifier: f64,
    pub objective_count: u32,
    pub total_resources: f64,
    pub participant_count: u32,
}

impl DifficultyInput {
    pub fn for_kind(
        kind: ActivityKind,
        objective_count: u32,
        total_resources: f64,
        participant_count: u32,
        config: &DifficultyConfig,
    ) -> Self {
        Self {
            type_modifier: kind.type_modifier(config),
            objective_count,
            total_resources,
            participant_count,
        }
    }
}

/// Raw difficulty score before tiering
pub fn difficulty_score(input: &DifficultyInput, config: &DifficultyConfig) -> f64 {
    input.type_modifier
        + input.objective_count as f64 * config.objective_weight
        + resource_adjustment(input.total_resources, config)
        + participant_adjustment(input.participant_count, config)
}

/// Tier for a planned activity
///
/// Never fails: degenerate inputs simply land on a boundary tier.
pub fn calculate_difficulty(input: &DifficultyInput, config: &DifficultyConfig) -> DifficultyTier {
    let score = difficulty_score(input, config);
    let tier = tier_for_score(score, config);
    tracing::debug!(score, %tier, "Classified activity difficulty");
    tier
}

fn tier_for_score(score: f64, config: &DifficultyConfig) -> DifficultyTier {
    if score <= config.trivial_max {
        DifficultyTier::Trivial
    } else if score <= config.easy_max {
        DifficultyTier::Easy
    } else if score <= config.medium_max {
        DifficultyTier::Medium
    } else if score <= config.hard_max {
        DifficultyTier::Hard
    } else {
        DifficultyTier::Extreme
    }
}

fn resource_adjustment(resources: f64, config: &DifficultyConfig) -> f64 {
    if resources < config.scarce_resource_limit {
        config.scarce_resource_penalty
    } else if resources < config.low_resource_limit {
        config.low_resource_penalty
    } else if resources > config.ample_resource_limit {
        config.ample_resource_bonus
    } else {
        0.0
    }
}

fn participant_adjustment(participants: u32, config: &DifficultyConfig) -> f64 {
    match participants {
        0 => config.no_participant_penalty,
        1 => config.solo_participant_penalty,
        n if n as usize > config.large_group_size => config.large_group_bonus,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(type_modifier: f64, objectives: u32, resources: f64, participants: u32) -> DifficultyInput {
        DifficultyInput {
            type_modifier,
            objective_count: objectives,
            total_resources: resources,
            participant_count: participants,
        }
    }

    #[test]
    fn test_resource_adjustment_bands() {
        let config = DifficultyConfig::default();
        assert_eq!(resource_adjustment(5.0, &config), 2.0);
        assert_eq!(resource_adjustment(10.0, &config), 1.0);
        assert_eq!(resource_adjustment(19.9, &config), 1.0);
        assert_eq!(resource_adjustment(20.0, &config), 0.0);
        assert_eq!(resource_adjustment(50.0, &config), 0.0);
        assert_eq!(resource_adjustment(50.1, &config), -1.0);
    }

    #[test]
    fn test_participant_adjustment_bands() {
        let config = DifficultyConfig::default();
        assert_eq!(participant_adjustment(0, &config), 3.0);
        assert_eq!(participant_adjustment(1, &config), 1.0);
        assert_eq!(participant_adjustment(2, &config), 0.0);
        assert_eq!(participant_adjustment(3, &config), 0.0);
        assert_eq!(participant_adjustment(4, &config), -1.0);
    }

    #[test]
    fn test_score() {
        let config = DifficultyConfig::default();
        // 1 + 4*0.5 + 1 (resources 15) + 0 (2 participants)
        assert_eq!(difficulty_score(&input(1.0, 4, 15.0, 2), &config), 4.0);
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let config = DifficultyConfig::default();
        assert_eq!(tier_for_score(-1.0, &config), DifficultyTier::Trivial);
        assert_eq!(tier_for_score(-0.5, &config), DifficultyTier::Easy);
        assert_eq!(tier_for_score(1.0, &config), DifficultyTier::Easy);
        assert_eq!(tier_for_score(3.0, &config), DifficultyTier::Medium);
        assert_eq!(tier_for_score(5.0, &config), DifficultyTier::Hard);
        assert_eq!(tier_for_score(5.5, &config), DifficultyTier::Extreme);
    }

    #[test]
    fn test_well_supplied_patrol_is_trivial() {
        let config = DifficultyConfig::default();
        let plan = DifficultyInput::for_kind(ActivityKind::Patrol, 0, 80.0, 5, &config);
        // -1 + 0 - 1 - 1 = -3
        assert_eq!(calculate_difficulty(&plan, &config), DifficultyTier::Trivial);
    }

    #[test]
    fn test_unstaffed_siege_is_extreme() {
        let config = DifficultyConfig::default();
        let plan = DifficultyInput::for_kind(ActivityKind::Siege, 2, 5.0, 0, &config);
        // 3 + 1 + 2 + 3 = 9
        assert_eq!(calculate_difficulty(&plan, &config), DifficultyTier::Extreme);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let config = DifficultyConfig::default();
        assert_eq!(
            calculate_difficulty(&input(f64::NEG_INFINITY, 0, 0.0, 0), &config),
            DifficultyTier::Trivial
        );
        assert_eq!(
            calculate_difficulty(&input(0.0, u32::MAX, f64::INFINITY, u32::MAX), &config),
            DifficultyTier::Extreme
        );
        // NaN never satisfies a bound and lands on the top tier
        assert_eq!(
            calculate_difficulty(&input(f64::NAN, 0, 30.0, 2), &config),
            DifficultyTier::Extreme
        );
    }

    #[test]
    fn test_unlisted_kind_modifier_is_zero() {
        let mut config = DifficultyConfig::default();
        config.activity_modifiers.remove(&ActivityKind::Espionage);
        assert_eq!(ActivityKind::Espionage.type_modifier(&config), 0.0);
    }

    #[test]
    fn test_parse_activity_kind() {
        assert_eq!("Siege".parse::<ActivityKind>().unwrap(), ActivityKind::Siege);
        assert!("picnic".parse::<ActivityKind>().is_err());
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(DifficultyTier::Trivial < DifficultyTier::Easy);
        assert!(DifficultyTier::Hard < DifficultyTier::Extreme);
    }
}
