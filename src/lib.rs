//! Faction Engine - scoring and outcome rules for faction play
//!
//! Territory yields, faction strength, raid resolution, radiation exposure
//! and activity difficulty. Every function takes its inputs and its
//! configuration explicitly; nothing here keeps state between calls.

pub mod core;
pub mod faction;
pub mod radiation;
pub mod raid;
pub mod territory;
