//! Core type definitions used throughout the codebase

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operation categories a faction spends and earns Organization Points in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpCategory {
    Violence,
    NonLethal,
    Intrigue,
    Economy,
    SoftPower,
    Diplomacy,
    Faith,
    Logistics,
    Culture,
}

impl OpCategory {
    pub const ALL: [OpCategory; 9] = [
        OpCategory::Violence,
        OpCategory::NonLethal,
        OpCategory::Intrigue,
        OpCategory::Economy,
        OpCategory::SoftPower,
        OpCategory::Diplomacy,
        OpCategory::Faith,
        OpCategory::Logistics,
        OpCategory::Culture,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            OpCategory::Violence => "violence",
            OpCategory::NonLethal => "nonLethal",
            OpCategory::Intrigue => "intrigue",
            OpCategory::Economy => "economy",
            OpCategory::SoftPower => "softPower",
            OpCategory::Diplomacy => "diplomacy",
            OpCategory::Faith => "faith",
            OpCategory::Logistics => "logistics",
            OpCategory::Culture => "culture",
        }
    }
}

impl fmt::Display for OpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OpCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpCategory::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown OP category '{}'", s))
    }
}

/// Organization Points per category
///
/// Ordered so that iteration and serialization are deterministic.
/// A missing category reads as zero, but entries inserted with a zero
/// value are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpBundle {
    values: BTreeMap<OpCategory, f64>,
}

impl OpBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, category: OpCategory, value: f64) -> Self {
        self.set(category, value);
        self
    }

    pub fn set(&mut self, category: OpCategory, value: f64) {
        self.values.insert(category, value);
    }

    /// Value for a category (0 when absent)
    pub fn get(&self, category: OpCategory) -> f64 {
        self.values.get(&category).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, category: OpCategory) -> bool {
        self.values.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpCategory, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Add every entry of `other` into this bundle
    pub fn accumulate(&mut self, other: &OpBundle) {
        for (category, value) in other.iter() {
            *self.values.entry(category).or_insert(0.0) += value;
        }
    }

    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// First category holding a negative or NaN value, if any
    pub fn first_invalid(&self) -> Option<(OpCategory, f64)> {
        self.iter().find(|(_, v)| v.is_nan() || *v < 0.0)
    }
}

impl FromIterator<(OpCategory, f64)> for OpBundle {
    fn from_iter<I: IntoIterator<Item = (OpCategory, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_category_reads_zero() {
        let ops = OpBundle::new().with(OpCategory::Violence, 3.0);
        assert_eq!(ops.get(OpCategory::Violence), 3.0);
        assert_eq!(ops.get(OpCategory::Faith), 0.0);
        assert!(!ops.contains(OpCategory::Faith));
    }

    #[test]
    fn test_zero_entries_are_kept() {
        let ops = OpBundle::new().with(OpCategory::Economy, 0.0);
        assert!(ops.contains(OpCategory::Economy));
        assert_eq!(ops.len(), 1);
    }

    #[test]
    fn test_accumulate() {
        let mut a = OpBundle::new().with(OpCategory::Economy, 2.0);
        let b = OpBundle::new()
            .with(OpCategory::Economy, 3.0)
            .with(OpCategory::Logistics, 1.0);
        a.accumulate(&b);
        assert_eq!(a.get(OpCategory::Economy), 5.0);
        assert_eq!(a.get(OpCategory::Logistics), 1.0);
        assert_eq!(a.total(), 6.0);
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let ops = OpBundle::new()
            .with(OpCategory::NonLethal, 1.0)
            .with(OpCategory::SoftPower, 2.0);
        let json = serde_json::to_string(&ops).unwrap();
        assert_eq!(json, r#"{"nonLethal":1.0,"softPower":2.0}"#);

        let back: OpBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ops);
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("NONLETHAL".parse::<OpCategory>().unwrap(), OpCategory::NonLethal);
        assert!("morale".parse::<OpCategory>().is_err());
    }

    #[test]
    fn test_first_invalid() {
        let ops = OpBundle::new()
            .with(OpCategory::Violence, 1.0)
            .with(OpCategory::Intrigue, -2.0);
        assert_eq!(ops.first_invalid(), Some((OpCategory::Intrigue, -2.0)));
    }
}
