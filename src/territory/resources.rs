//! Resource yield calculation

use crate::core::config::TerritoryConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::OpBundle;
use crate::territory::types::{SizeClass, Territory, TerritoryType};

/// Yield of one territory: every base rate scaled by the size multiplier
/// and rounded. Zero rates stay in the bundle as zero entries.
pub fn calculate_resources(
    kind: TerritoryType,
    size: SizeClass,
    config: &TerritoryConfig,
) -> Result<OpBundle> {
    let rates = config
        .rates
        .get(&kind)
        .ok_or_else(|| EngineError::InvalidTerritoryType(kind.to_string()))?;

    let multiplier = size.multiplier(&config.sizes);
    if !(multiplier > 0.0) {
        return Err(EngineError::InvalidSizeClass(size.to_string()));
    }

    Ok(rates
        .iter()
        .map(|(category, rate)| (category, (rate * multiplier).round()))
        .collect())
}

/// Same as [`calculate_resources`], from freeform keys
pub fn calculate_resources_by_key(
    kind: &str,
    size: &str,
    config: &TerritoryConfig,
) -> Result<OpBundle> {
    let kind: TerritoryType = kind.parse()?;
    let size: SizeClass = size.parse()?;
    calculate_resources(kind, size, config)
}

/// Combined yield of a faction's territories
///
/// Records whose kind or size do not parse contribute nothing.
pub fn territory_income(territories: &[Territory], config: &TerritoryConfig) -> OpBundle {
    let mut income = OpBundle::new();

    for territory in territories {
        match calculate_resources_by_key(&territory.kind, &territory.size, config) {
            Ok(yields) => income.accumulate(&yields),
            Err(e) => {
                tracing::warn!(territory = %territory.name, error = %e, "Skipping territory in income");
            }
        }
    }

    income
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::OpCategory;

    #[test]
    fn test_medium_mine_yields_base_rates() {
        let config = TerritoryConfig::default();
        let yields = calculate_resources(TerritoryType::Mine, SizeClass::Medium, &config).unwrap();
        assert_eq!(yields.get(OpCategory::Economy), 3.0);
        assert_eq!(yields.get(OpCategory::Logistics), 1.0);
    }

    #[test]
    fn test_small_rounds_half_up() {
        let config = TerritoryConfig::default();
        // economy 3 * 0.5 = 1.5 -> 2, logistics 1 * 0.5 = 0.5 -> 1
        let yields = calculate_resources(TerritoryType::Mine, SizeClass::Small, &config).unwrap();
        assert_eq!(yields.get(OpCategory::Economy), 2.0);
        assert_eq!(yields.get(OpCategory::Logistics), 1.0);
    }

    #[test]
    fn test_capital_settlement() {
        let config = TerritoryConfig::default();
        let yields = calculate_resources(TerritoryType::Settlement, SizeClass::Capital, &config).unwrap();
        assert_eq!(yields.get(OpCategory::Economy), 8.0);
        assert_eq!(yields.get(OpCategory::SoftPower), 4.0);
        assert_eq!(yields.get(OpCategory::Diplomacy), 4.0);
    }

    #[test]
    fn test_zero_rates_keep_their_key() {
        let config = TerritoryConfig::default();
        let yields = calculate_resources(TerritoryType::Fortress, SizeClass::Large, &config).unwrap();
        assert!(yields.contains(OpCategory::Economy));
        assert_eq!(yields.get(OpCategory::Economy), 0.0);
    }

    #[test]
    fn test_missing_rate_table_is_invalid_type() {
        let mut config = TerritoryConfig::default();
        config.rates.remove(&TerritoryType::Port);
        let err = calculate_resources(TerritoryType::Port, SizeClass::Medium, &config).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTerritoryType(_)));
    }

    #[test]
    fn test_by_key_errors() {
        let config = TerritoryConfig::default();
        assert!(matches!(
            calculate_resources_by_key("volcano", "small", &config),
            Err(EngineError::InvalidTerritoryType(_))
        ));
        assert!(matches!(
            calculate_resources_by_key("farm", "enormous", &config),
            Err(EngineError::InvalidSizeClass(_))
        ));
        assert!(calculate_resources_by_key("Farm", "Large", &config).is_ok());
    }

    #[test]
    fn test_income_skips_unparseable_records() {
        let config = TerritoryConfig::default();
        let territories = vec![
            Territory::new("North Farm", "farm", "medium"),
            Territory::new("Deep Mine", "mine", "large"),
            Territory::new("Haunted Ruin", "ruin", "small"),
        ];
        let income = territory_income(&territories, &config);
        // farm: economy 2, logistics 2; large mine: economy 6, logistics 2
        assert_eq!(income.get(OpCategory::Economy), 8.0);
        assert_eq!(income.get(OpCategory::Logistics), 4.0);
    }
}
