//! Vibration Diagnostic Engine
//!
//! Maps extracted vibration features to fault detections, a 0-100 health
//! score, a status tier, and maintenance recommendations. Every call is a
//! pure function of its inputs and configuration.

mod config;
mod engine;
mod error;
mod recommendations;
mod report;
mod rules;
mod scoring;

pub use config::{
    AnalysisConfig, BearingEvidence, DetectionThresholds, DiagnosticConfig, PenaltyWeights,
    StatusBreakpoints, TieredPenalty,
};
pub use engine::{analyze, diagnose, DiagnosticEngine, VibrationAnalyzer};
pub use error::DiagnosticError;
pub use recommendations::recommendations;
pub use report::DiagnosticReport;
pub use rules::{bearing_confidence, detect_faults, select_primary, FaultDetection, FaultType};
pub use scoring::{health_score, HealthStatus};

pub use feature_engine::{ExtractionConfig, FeatureSet};
pub use signal_validator::{Signal, SignalError};
