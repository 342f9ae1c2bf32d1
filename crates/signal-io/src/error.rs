//! Capture I/O Error Types

use signal_validator::SignalError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or writing capture files
#[derive(Debug, Error)]
pub enum SignalIoError {
    /// File could not be opened or created
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// First row holds numbers instead of column names
    #[error("CSV must have a header row (e.g. time,accel)")]
    MissingHeader,

    /// A cell that should be numeric is not
    #[error("Line {line}, column '{column}': '{value}' is not a number")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    /// No time column and no fallback sampling frequency
    #[error("Sampling frequency unknown: no usable time column and none supplied")]
    UnknownSamplingFrequency,

    /// Loaded data is not a valid signal
    #[error("Invalid signal: {0}")]
    InvalidSignal(#[from] SignalError),
}
