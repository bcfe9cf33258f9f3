use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid territory type: {0}")]
    InvalidTerritoryType(String),

    #[error("Invalid size class: {0}")]
    InvalidSizeClass(String),

    #[error("Invalid score input: {field} = {value}")]
    InvalidScoreInput { field: &'static str, value: f64 },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reject negative, NaN or infinite inputs for a named field
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidScoreInput { field, value });
    }
    Ok(value)
}

/// Reject NaN or infinite inputs (signed modifiers are allowed)
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(EngineError::InvalidScoreInput { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_input_rejected() {
        let err = require_non_negative("attacker_score", -1.0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScoreInput { field: "attacker_score", .. }));
    }

    #[test]
    fn test_nan_input_rejected() {
        assert!(require_non_negative("defender_score", f64::NAN).is_err());
        assert!(require_finite("attacker_modifier", f64::NAN).is_err());
        assert!(require_finite("attacker_modifier", f64::INFINITY).is_err());
    }

    #[test]
    fn test_infinite_score_rejected() {
        assert!(require_non_negative("attacker_score", f64::INFINITY).is_err());
        assert!(require_non_negative("defender_score", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_valid_inputs_pass_through() {
        assert_eq!(require_non_negative("score", 0.0).unwrap(), 0.0);
        assert_eq!(require_finite("modifier", -3.0).unwrap(), -3.0);
    }

    #[test]
    fn test_error_messages() {
        let err = EngineError::InvalidTerritoryType("swamp".into());
        assert_eq!(err.to_string(), "Invalid territory type: swamp");
    }
}
