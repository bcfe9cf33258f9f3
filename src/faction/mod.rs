//! Faction military strength

pub mod strength;

pub use strength::{calculate_strength, Base};
