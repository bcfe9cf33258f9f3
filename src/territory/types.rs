//! Territory - a claimed map region with a type and a size

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::SizeMultipliers;
use crate::core::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerritoryType {
    Settlement,
    Fortress,
    Mine,
    Farm,
    Port,
    Factory,
    Research,
}

impl TerritoryType {
    pub const ALL: [TerritoryType; 7] = [
        TerritoryType::Settlement,
        TerritoryType::Fortress,
        TerritoryType::Mine,
        TerritoryType::Farm,
        TerritoryType::Port,
        TerritoryType::Factory,
        TerritoryType::Research,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TerritoryType::Settlement => "settlement",
            TerritoryType::Fortress => "fortress",
            TerritoryType::Mine => "mine",
            TerritoryType::Farm => "farm",
            TerritoryType::Port => "port",
            TerritoryType::Factory => "factory",
            TerritoryType::Research => "research",
        }
    }
}

impl fmt::Display for TerritoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TerritoryType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        TerritoryType::ALL
            .iter()
            .copied()
            .find(|t| t.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| EngineError::InvalidTerritoryType(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Capital,
}

impl SizeClass {
    pub const ALL: [SizeClass; 4] = [
        SizeClass::Small,
        SizeClass::Medium,
        SizeClass::Large,
        SizeClass::Capital,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
            SizeClass::Capital => "capital",
        }
    }

    /// Yield multiplier for this size under the given table
    pub fn multiplier(&self, sizes: &SizeMultipliers) -> f64 {
        match self {
            SizeClass::Small => sizes.small,
            SizeClass::Medium => sizes.medium,
            SizeClass::Large => sizes.large,
            SizeClass::Capital => sizes.capital,
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SizeClass {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SizeClass::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| EngineError::InvalidSizeClass(s.to_string()))
    }
}

/// A territory record as supplied by the host adapter
///
/// `kind` and `size` are freeform; they are only parsed when a yield is
/// requested, and the strength scorer buckets unknown kinds instead of failing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub kind: String,
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_size() -> String {
    SizeClass::Medium.key().to_string()
}

impl Territory {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size: size.into(),
        }
    }

    pub fn territory_type(&self) -> Result<TerritoryType, EngineError> {
        self.kind.parse()
    }

    pub fn size_class(&self) -> Result<SizeClass, EngineError> {
        self.size.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_territory_type() {
        assert_eq!("Fortress".parse::<TerritoryType>().unwrap(), TerritoryType::Fortress);
        assert_eq!(" mine ".parse::<TerritoryType>().unwrap(), TerritoryType::Mine);
        let err = "swamp".parse::<TerritoryType>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidTerritoryType(ref k) if k == "swamp"));
    }

    #[test]
    fn test_parse_size_class() {
        assert_eq!("CAPITAL".parse::<SizeClass>().unwrap(), SizeClass::Capital);
        assert!(matches!(
            "huge".parse::<SizeClass>(),
            Err(EngineError::InvalidSizeClass(_))
        ));
    }

    #[test]
    fn test_default_multipliers() {
        let sizes = SizeMultipliers::default();
        assert_eq!(SizeClass::Small.multiplier(&sizes), 0.5);
        assert_eq!(SizeClass::Medium.multiplier(&sizes), 1.0);
        assert_eq!(SizeClass::Large.multiplier(&sizes), 2.0);
        assert_eq!(SizeClass::Capital.multiplier(&sizes), 4.0);
    }

    #[test]
    fn test_territory_size_defaults_to_medium() {
        let t: Territory = serde_json::from_str(r#"{"name":"Old Mill","kind":"farm"}"#).unwrap();
        assert_eq!(t.size_class().unwrap(), SizeClass::Medium);
        assert_eq!(t.territory_type().unwrap(), TerritoryType::Farm);
    }
}
