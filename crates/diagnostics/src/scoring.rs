//! Health Scoring

use crate::config::{DiagnosticConfig, StatusBreakpoints};
use crate::rules::{FaultDetection, FaultType};
use feature_engine::FeatureSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Status tier derived from the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Critical,
    Warning,
    Acceptable,
    Healthy,
}

impl HealthStatus {
    /// Map a score onto its tier
    pub fn from_score(score: u8, breakpoints: &StatusBreakpoints) -> Self {
        if score >= breakpoints.healthy {
            HealthStatus::Healthy
        } else if score >= breakpoints.acceptable {
            HealthStatus::Acceptable
        } else if score >= breakpoints.warning {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Acceptable => "ACCEPTABLE",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall machine health, 100 = perfect, 0 = critical.
///
/// Starts at 100 and deducts for vibration severity, impulsiveness, peak
/// impacts, excess spectral energy, and each detected fault scaled by its
/// severity. Every deduction is non-decreasing in its indicator.
pub fn health_score(
    features: &FeatureSet,
    detections: &[FaultDetection],
    config: &DiagnosticConfig,
) -> u8 {
    let p = &config.penalties;

    let rms_penalty = p.rms.penalty(features.rms);
    let kurtosis_penalty = p.kurtosis.penalty(features.kurtosis);
    let crest_penalty = p.crest_factor.penalty(features.crest_factor);
    let energy_penalty = if features.total_energy > p.total_energy_limit {
        p.total_energy_penalty
    } else {
        0.0
    };

    let fault_penalty: f64 = detections
        .iter()
        .map(|d| {
            let weight = match d.fault {
                FaultType::Imbalance => p.imbalance,
                FaultType::Misalignment => p.misalignment,
                FaultType::Bearing => p.bearing,
                FaultType::Normal => 0.0,
            };
            weight * d.severity
        })
        .sum();

    let score =
        100.0 - rms_penalty - kurtosis_penalty - crest_penalty - energy_penalty - fault_penalty;

    debug!(
        "Score deductions: rms={} kurtosis={} crest={} energy={} faults={:.2} -> {:.2}",
        rms_penalty, kurtosis_penalty, crest_penalty, energy_penalty, fault_penalty, score
    );

    score.clamp(0.0, 100.0).round() as u8
}
