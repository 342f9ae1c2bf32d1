//! Signal Validation
//!
//! Provides the validated `Signal` type and input checks for the vibration
//! diagnostics pipeline.

mod error;
mod validator;

pub use error::SignalError;
pub use validator::{validate_running_frequency, Signal};
