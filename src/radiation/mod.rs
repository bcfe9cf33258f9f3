//! Radiation exposure model
//!
//! Exposure accumulates from doses, is reduced by protective gear, and
//! decays in whole intervals. Effective levels are bucketed into tiers.
//! No function here reads a clock: elapsed time is always passed in.

pub mod exposure;
pub mod tier;

pub use exposure::{accumulate_exposure, apply_decay, decay_with_config, effective_level, RadiationState};
pub use tier::{classify_tier, RadiationTier};
