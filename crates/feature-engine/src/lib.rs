//! Vibration Feature Engine
//!
//! Derives time-domain statistics and frequency-domain fault indicators
//! from a single-channel vibration signal.

mod error;
mod features;
mod fft;
mod statistics;

pub use error::FeatureError;
pub use features::{extract_features, ExtractionConfig, FeatureExtractor, FeatureSet};
pub use fft::{Spectrum, SpectrumAnalyzer};
pub use statistics::TimeDomainFeatures;
