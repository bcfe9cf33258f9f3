//! Exposure arithmetic

use serde::{Deserialize, Serialize};

use crate::core::config::RadiationConfig;
use crate::radiation::tier::{classify_tier, RadiationTier};

const MAX_LEVEL: f64 = 100.0;

/// Exposure after protective gear, never negative
///
/// Protection is clamped into 0-100 percent; NaN exposure counts as none.
pub fn effective_level(exposure: f64, protection_percent: f64) -> f64 {
    if exposure.is_nan() {
        return 0.0;
    }
    let protection = if protection_percent.is_nan() {
        0.0
    } else {
        protection_percent.clamp(0.0, 100.0)
    };
    (exposure - exposure * protection / 100.0).max(0.0)
}

/// Exposure left after `elapsed_secs`, decaying only in whole intervals
///
/// Non-positive intervals, negative elapsed time and negative rates decay
/// nothing. The result is never negative.
pub fn apply_decay(
    last_exposure: f64,
    elapsed_secs: f64,
    decay_rate_per_interval: f64,
    interval_secs: f64,
) -> f64 {
    let last = if last_exposure > 0.0 { last_exposure } else { 0.0 };

    if !(interval_secs > 0.0) || !(elapsed_secs > 0.0) || !(decay_rate_per_interval > 0.0) {
        return last;
    }

    let intervals = (elapsed_secs / interval_secs).floor();
    (last - intervals * decay_rate_per_interval).max(0.0)
}

/// [`apply_decay`] with the configured rate and interval
pub fn decay_with_config(last_exposure: f64, elapsed_secs: f64, config: &RadiationConfig) -> f64 {
    apply_decay(
        last_exposure,
        elapsed_secs,
        config.decay_rate_per_interval,
        config.decay_interval_secs,
    )
}

/// Add a dose, after protection, to the running exposure
pub fn accumulate_exposure(current: f64, dose: f64, protection_percent: f64) -> f64 {
    let current = if current > 0.0 { current } else { 0.0 };
    current + effective_level(dose, protection_percent)
}

/// Radiation state of one creature as read from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiationState {
    pub exposure: f64,
    #[serde(default)]
    pub protection_percent: f64,
    #[serde(default = "default_threshold")]
    pub threshold_for_full_level: f64,
}

fn default_threshold() -> f64 {
    MAX_LEVEL
}

impl RadiationState {
    pub fn new(exposure: f64, protection_percent: f64) -> Self {
        Self {
            exposure,
            protection_percent,
            threshold_for_full_level: default_threshold(),
        }
    }

    /// Protected exposure clamped into 0-100
    pub fn effective_level(&self) -> f64 {
        effective_level(self.exposure, self.protection_percent).min(MAX_LEVEL)
    }

    pub fn tier(&self, config: &RadiationConfig) -> RadiationTier {
        classify_tier(self.effective_level(), &config.tiers)
    }

    /// Share of the full-level threshold reached, 0.0 to 1.0
    pub fn saturation(&self) -> f64 {
        if !(self.threshold_for_full_level > 0.0) {
            return 1.0;
        }
        let unclamped = effective_level(self.exposure, self.protection_percent);
        (unclamped / self.threshold_for_full_level).clamp(0.0, 1.0)
    }

    /// State after `elapsed_secs` of configured decay
    pub fn decayed(&self, elapsed_secs: f64, config: &RadiationConfig) -> Self {
        Self {
            exposure: decay_with_config(self.exposure, elapsed_secs, config),
            ..*self
        }
    }

    /// State after receiving an unprotected `dose`, filtered by the current gear
    pub fn exposed_to(&self, dose: f64) -> Self {
        Self {
            exposure: accumulate_exposure(self.exposure, dose, self.protection_percent),
            ..*self
        }
    }
}
