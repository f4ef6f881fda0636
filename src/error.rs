//! Error types for the numeric core.

use thiserror::Error;

/// Result type for core calculations
pub type CalcResult<T> = std::result::Result<T, CalcError>;

/// Everything that can go wrong between raw input and a rendered result.
///
/// All variants are recoverable: the caller shows the message and lets the
/// operator correct the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Input is not a real-number literal
    #[error("Please enter a valid number for {field}")]
    Parse { field: String, input: String },

    /// Value outside the interval it must lie in
    #[error("{0}")]
    Range(String),

    /// Velocity inside the band just below c where results stop being reliable
    #[error(
        "Velocity is too close to the speed of light. Calculations become unreliable \
         above {threshold}% of c due to extreme relativistic effects."
    )]
    NearLightSpeed { threshold: String },

    /// Unknown unit tag
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    /// Square-root argument of the Lorentz factor is not positive
    #[error("Lorentz factor undefined: {0}")]
    Domain(String),

    #[error("Division by zero in {0}")]
    DivisionByZero(String),

    /// Numeric context built with unusable settings
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CalcError {
    pub(crate) fn parse(field: &str, input: &str) -> Self {
        CalcError::Parse {
            field: field.to_string(),
            input: input.to_string(),
        }
    }

    /// Stable short tag for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::Parse { .. } => "parse",
            CalcError::Range(_) => "range",
            CalcError::NearLightSpeed { .. } => "near-light-speed",
            CalcError::UnsupportedUnit(_) => "unsupported-unit",
            CalcError::Domain(_) => "domain",
            CalcError::DivisionByZero(_) => "division-by-zero",
            CalcError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_names_the_field() {
        let err = CalcError::parse("velocity", "abc");
        assert_eq!(err.to_string(), "Please enter a valid number for velocity");
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn near_light_speed_message_carries_threshold() {
        let err = CalcError::NearLightSpeed {
            threshold: "99.9".into(),
        };
        assert!(err.to_string().contains("above 99.9% of c"));
        assert_eq!(err.kind(), "near-light-speed");
    }
}
