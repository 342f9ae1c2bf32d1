//! Diagnostic report

use crate::rules::{FaultDetection, FaultType};
use crate::scoring::HealthStatus;
use feature_engine::FeatureSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Confidence reported when no fault rule fires
pub const NORMAL_CONFIDENCE: f64 = 0.9;

/// Result of one diagnosis. Self-contained and serializable: it holds no
/// reference to engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// 0-100, higher is healthier
    pub health_score: u8,
    /// Tier derived from `health_score`
    pub status: HealthStatus,
    /// Most severe detected fault, or `Normal`
    pub primary_fault: FaultType,
    /// Confidence in `primary_fault`
    pub confidence: f64,
    /// Every fault whose rule fired
    pub detected_faults: BTreeSet<FaultType>,
    /// Per-fault severity, most safety-critical first
    pub detections: Vec<FaultDetection>,
    /// Indicators the diagnosis was computed from
    pub features: FeatureSet,
    /// Maintenance advice, in fault-priority order
    pub recommendations: Vec<String>,
}

impl DiagnosticReport {
    /// Whether any fault rule fired
    pub fn has_faults(&self) -> bool {
        !self.detected_faults.is_empty()
    }

    /// Severity of a specific fault, if it was detected
    pub fn severity_of(&self, fault: FaultType) -> Option<f64> {
        self.detections
            .iter()
            .find(|d| d.fault == fault)
            .map(|d| d.severity)
    }
}
