//! Diagnostic Engine Implementation

use crate::config::{AnalysisConfig, DiagnosticConfig};
use crate::error::DiagnosticError;
use crate::recommendations::recommendations;
use crate::report::{DiagnosticReport, NORMAL_CONFIDENCE};
use crate::rules::{detect_faults, select_primary, FaultType};
use crate::scoring::{health_score, HealthStatus};
use feature_engine::{FeatureExtractor, FeatureSet};
use signal_validator::{Signal, SignalError};
use tracing::{debug, info};

/// Rule-based diagnostic engine bound to one validated configuration
#[derive(Debug, Clone, Default)]
pub struct DiagnosticEngine {
    config: DiagnosticConfig,
}

impl DiagnosticEngine {
    /// Create a new engine; fails on an out-of-range configuration
    pub fn new(config: DiagnosticConfig) -> Result<Self, DiagnosticError> {
        config.validate()?;
        debug!("Creating diagnostic engine with config: {:?}", config);
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Classify faults, score health, and assemble the report.
    ///
    /// Deterministic: the same features always produce the same report.
    pub fn diagnose(&self, features: &FeatureSet) -> Result<DiagnosticReport, DiagnosticError> {
        if let Some((name, value)) = features
            .named_values()
            .into_iter()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(SignalError::NonFiniteFeature { name, value }.into());
        }

        let detections = detect_faults(features, &self.config);
        let health_score = health_score(features, &detections, &self.config);
        let status = HealthStatus::from_score(health_score, &self.config.status);

        let (primary_fault, confidence) = match select_primary(&detections) {
            Some(primary) => (primary.fault, primary.severity),
            None => (FaultType::Normal, NORMAL_CONFIDENCE),
        };

        let report = DiagnosticReport {
            health_score,
            status,
            primary_fault,
            confidence,
            detected_faults: detections.iter().map(|d| d.fault).collect(),
            recommendations: recommendations(&detections, status),
            detections,
            features: features.clone(),
        };

        debug!(
            "Diagnosis: score={} status={} primary={} faults={:?}",
            report.health_score, report.status, report.primary_fault, report.detected_faults
        );

        Ok(report)
    }
}

/// One-shot diagnosis with an explicit configuration
pub fn diagnose(
    features: &FeatureSet,
    config: &DiagnosticConfig,
) -> Result<DiagnosticReport, DiagnosticError> {
    DiagnosticEngine::new(config.clone())?.diagnose(features)
}

/// Full pipeline: signal → features → report.
///
/// Owns its FFT state, so give each worker thread its own analyzer.
pub struct VibrationAnalyzer {
    extractor: FeatureExtractor,
    engine: DiagnosticEngine,
}

impl VibrationAnalyzer {
    /// Create a new analyzer for one configuration profile
    pub fn new(config: &AnalysisConfig) -> Result<Self, DiagnosticError> {
        let extractor = FeatureExtractor::new(config.extraction.clone())?;
        let engine = DiagnosticEngine::new(config.diagnostics.clone())?;
        Ok(Self { extractor, engine })
    }

    /// Analyze one signal. `running_freq` defaults per the extraction config.
    pub fn analyze(
        &mut self,
        signal: &Signal,
        running_freq: Option<f64>,
    ) -> Result<DiagnosticReport, DiagnosticError> {
        let features = self.extractor.extract(signal, running_freq)?;
        let report = self.engine.diagnose(&features)?;

        info!(
            "Analyzed {} samples @ {} Hz: score {} ({}), primary fault {}",
            signal.len(),
            signal.sampling_freq(),
            report.health_score,
            report.status,
            report.primary_fault
        );

        Ok(report)
    }

    /// Diagnostic engine in use
    pub fn engine(&self) -> &DiagnosticEngine {
        &self.engine
    }
}

/// One-shot analysis with a fresh analyzer
pub fn analyze(
    signal: &Signal,
    running_freq: Option<f64>,
    config: &AnalysisConfig,
) -> Result<DiagnosticReport, DiagnosticError> {
    VibrationAnalyzer::new(config)?.analyze(signal, running_freq)
}
