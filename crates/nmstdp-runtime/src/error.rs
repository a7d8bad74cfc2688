//! Error types for the plasticity runtime

use nmstdp_lut::{LutError, Time};
use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur in the plasticity runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Table image could not be loaded
    #[error("Table image error: {source}")]
    Lut {
        #[from]
        /// Source table error
        source: LutError,
    },

    /// Event arrived earlier than the synapse's last recorded event
    #[error("Non-monotonic event time: {got} is earlier than last event {last}")]
    NonMonotonicTime {
        /// Time of the last accepted event
        last: Time,
        /// Time carried by the rejected event
        got: Time,
    },

    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Configuration text could not be parsed
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },
}

impl RuntimeError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = RuntimeError::invalid_parameter("tau_c_ms", "0", "> 0.0");
        assert!(matches!(err, RuntimeError::InvalidParameter { .. }));

        let err: RuntimeError = LutError::truncated(0, 4, 1).into();
        assert!(matches!(err, RuntimeError::Lut { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = RuntimeError::NonMonotonicTime {
            last: Time::new(12),
            got: Time::new(7),
        };
        assert_eq!(
            err.to_string(),
            "Non-monotonic event time: t=7 is earlier than last event t=12"
        );
    }
}
