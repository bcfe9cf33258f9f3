//! Raid and activity resolution
//!
//! Raids are contests between two factions: each side adds a d20 roll to
//! its strength score, and the higher total wins. Activities are graded
//! into difficulty tiers before they are launched.

pub mod dice;
pub mod difficulty;
pub mod outcome;

pub use dice::{DiceRoller, FixedRolls};
pub use difficulty::{
    calculate_difficulty, difficulty_score, ActivityKind, DifficultyInput, DifficultyTier,
};
pub use outcome::{resolve_outcome, success_probability, OutcomeEffect, OutcomeInput, OutcomeResult};
