//! Diagnostic Error Types

use feature_engine::FeatureError;
use signal_validator::SignalError;
use thiserror::Error;

/// Errors raised by the diagnostic engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticError {
    /// Signal or feature input failed validation
    #[error("Invalid signal: {0}")]
    InvalidSignal(#[from] SignalError),

    /// A threshold, weight, or breakpoint is outside its sane range
    #[error("Invalid configuration {field} = {value}: {reason}")]
    Configuration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl From<FeatureError> for DiagnosticError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::InvalidSignal(inner) => DiagnosticError::InvalidSignal(inner),
            FeatureError::Configuration {
                field,
                value,
                reason,
            } => DiagnosticError::Configuration {
                field,
                value,
                reason,
            },
        }
    }
}
