//! Radiation severity tiers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::TierBound;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiationTier {
    Safe,
    Low,
    Moderate,
    High,
    Severe,
    Lethal,
}

impl RadiationTier {
    pub fn label(&self) -> &'static str {
        match self {
            RadiationTier::Safe => "safe",
            RadiationTier::Low => "low",
            RadiationTier::Moderate => "moderate",
            RadiationTier::High => "high",
            RadiationTier::Severe => "severe",
            RadiationTier::Lethal => "lethal",
        }
    }
}

impl fmt::Display for RadiationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First tier whose inclusive upper bound covers `level`
///
/// Levels above every bound are lethal; negative and NaN levels are safe.
pub fn classify_tier(level: f64, tiers: &[TierBound]) -> RadiationTier {
    if level.is_nan() || level <= 0.0 {
        return tiers.first().map(|b| b.tier).unwrap_or(RadiationTier::Safe);
    }

    tiers
        .iter()
        .find(|bound| level <= bound.max)
        .map(|bound| bound.tier)
        .unwrap_or(RadiationTier::Lethal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RadiationConfig;

    fn tiers() -> Vec<TierBound> {
        RadiationConfig::default().tiers
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let tiers = tiers();
        assert_eq!(classify_tier(10.0, &tiers), RadiationTier::Safe);
        assert_eq!(classify_tier(10.5, &tiers), RadiationTier::Low);
        assert_eq!(classify_tier(25.0, &tiers), RadiationTier::Low);
        assert_eq!(classify_tier(50.0, &tiers), RadiationTier::Moderate);
        assert_eq!(classify_tier(75.0, &tiers), RadiationTier::High);
        assert_eq!(classify_tier(90.0, &tiers), RadiationTier::Severe);
        assert_eq!(classify_tier(91.0, &tiers), RadiationTier::Lethal);
    }

    #[test]
    fn test_out_of_range_levels_clamp() {
        let tiers = tiers();
        assert_eq!(classify_tier(10_000.0, &tiers), RadiationTier::Lethal);
        assert_eq!(classify_tier(f64::INFINITY, &tiers), RadiationTier::Lethal);
        assert_eq!(classify_tier(-5.0, &tiers), RadiationTier::Safe);
        assert_eq!(classify_tier(f64::NAN, &tiers), RadiationTier::Safe);
    }

    #[test]
    fn test_custom_table() {
        let tiers = vec![
            TierBound { tier: RadiationTier::Safe, max: 25.0 },
            TierBound { tier: RadiationTier::Moderate, max: 60.0 },
        ];
        assert_eq!(classify_tier(20.0, &tiers), RadiationTier::Safe);
        assert_eq!(classify_tier(40.0, &tiers), RadiationTier::Moderate);
        assert_eq!(classify_tier(61.0, &tiers), RadiationTier::Lethal);
    }

    #[test]
    fn test_empty_table_is_all_lethal_above_zero() {
        assert_eq!(classify_tier(0.0, &[]), RadiationTier::Safe);
        assert_eq!(classify_tier(1.0, &[]), RadiationTier::Lethal);
    }
}
