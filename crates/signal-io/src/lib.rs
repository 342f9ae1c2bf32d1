//! Vibration Capture I/O
//!
//! Reads `time,accel` (or accel-only) CSV captures, inferring the sampling
//! frequency from timestamp spacing, and writes captures back out.

mod error;
mod reader;
mod writer;

pub use error::SignalIoError;
pub use reader::{infer_sampling_frequency, load_csv, read_csv, LoadedCapture};
pub use writer::{write_csv, write_csv_to};
