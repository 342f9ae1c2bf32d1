//! Fault Detection Rules
//!
//! Each rule is an independent predicate over the same immutable
//! `FeatureSet`, so evaluation order never changes the outcome.

use crate::config::{BearingEvidence, DetectionThresholds, DiagnosticConfig};
use feature_engine::FeatureSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mechanical fault classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultType {
    /// No fault signature matched
    Normal,
    /// Dominant 1× component
    Imbalance,
    /// Dominant 2× component
    Misalignment,
    /// Impulsive, high-frequency behavior
    Bearing,
}

impl FaultType {
    /// Fault types that rules can report, most safety-critical first
    pub const BY_PRIORITY: [FaultType; 3] = [
        FaultType::Bearing,
        FaultType::Misalignment,
        FaultType::Imbalance,
    ];

    /// Label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultType::Normal => "NORMAL",
            FaultType::Imbalance => "IMBALANCE",
            FaultType::Misalignment => "MISALIGNMENT",
            FaultType::Bearing => "BEARING",
        }
    }

    /// Tie-break rank: higher wins
    pub fn priority(&self) -> u8 {
        match self {
            FaultType::Normal => 0,
            FaultType::Imbalance => 1,
            FaultType::Misalignment => 2,
            FaultType::Bearing => 3,
        }
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fault reported by one rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaultDetection {
    pub fault: FaultType,
    /// Severity / confidence in (0, 1]
    pub severity: f64,
}

/// How far `value` sits above `threshold`, mapped so that the threshold
/// itself scores 0.5 and twice the threshold or more scores 1.0
fn exceedance(value: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        1.0
    } else {
        (value / (2.0 * threshold)).min(1.0)
    }
}

fn imbalance(features: &FeatureSet, thresholds: &DetectionThresholds) -> Option<FaultDetection> {
    (features.amp_1x > thresholds.imbalance_amp_1x).then(|| FaultDetection {
        fault: FaultType::Imbalance,
        severity: exceedance(features.amp_1x, thresholds.imbalance_amp_1x),
    })
}

fn misalignment(features: &FeatureSet, thresholds: &DetectionThresholds) -> Option<FaultDetection> {
    (features.amp_2x > thresholds.misalignment_amp_2x).then(|| FaultDetection {
        fault: FaultType::Misalignment,
        severity: exceedance(features.amp_2x, thresholds.misalignment_amp_2x),
    })
}

/// Accumulated bearing-fault evidence in [0, 1]
pub fn bearing_confidence(
    features: &FeatureSet,
    thresholds: &DetectionThresholds,
    weights: &BearingEvidence,
) -> f64 {
    let mut confidence = 0.0;

    if features.kurtosis > thresholds.bearing_kurtosis {
        confidence += weights.kurtosis_weight;
    }
    if features.kurtosis > weights.severe_kurtosis {
        confidence += weights.severe_kurtosis_weight;
    }
    if features.crest_factor > thresholds.bearing_crest_factor {
        confidence += weights.crest_factor_weight;
    }
    if features.hf_energy > thresholds.bearing_hf_energy {
        confidence += weights.hf_energy_weight;
    }

    f64::min(confidence, 1.0)
}

fn bearing(features: &FeatureSet, config: &DiagnosticConfig) -> Option<FaultDetection> {
    let confidence = bearing_confidence(features, &config.thresholds, &config.bearing);
    (confidence > config.bearing.confidence_threshold).then(|| FaultDetection {
        fault: FaultType::Bearing,
        severity: confidence,
    })
}

/// Run every rule; detections come back in priority order
pub fn detect_faults(features: &FeatureSet, config: &DiagnosticConfig) -> Vec<FaultDetection> {
    [
        bearing(features, config),
        misalignment(features, &config.thresholds),
        imbalance(features, &config.thresholds),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Most severe detection, ties going to the more safety-critical fault.
/// `None` means the machine reads as normal.
pub fn select_primary(detections: &[FaultDetection]) -> Option<FaultDetection> {
    detections.iter().copied().max_by(|a, b| {
        a.severity
            .total_cmp(&b.severity)
            .then_with(|| a.fault.priority().cmp(&b.fault.priority()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureSet {
        FeatureSet {
            rms: 0.15,
            kurtosis: 1.5,
            crest_factor: 1.5,
            amp_1x: 0.2,
            amp_2x: 0.01,
            hf_energy: 0.001,
            running_freq: 30.0,
            sampling_freq: 2000.0,
            sample_count: 4000,
            ..Default::default()
        }
    }

    #[test]
    fn test_normal_features_detect_nothing() {
        assert!(detect_faults(&features(), &DiagnosticConfig::default()).is_empty());
    }

    #[test]
    fn test_imbalance_detection() {
        let f = FeatureSet {
            amp_1x: 0.6,
            ..features()
        };
        let detections = detect_faults(&f, &DiagnosticConfig::default());
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].fault, FaultType::Imbalance);
        assert!((detections[0].severity - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let f = FeatureSet {
            amp_1x: 0.4,
            amp_2x: 0.3,
            ..features()
        };
        assert!(detect_faults(&f, &DiagnosticConfig::default()).is_empty());
    }

    #[test]
    fn test_bearing_needs_accumulated_evidence() {
        let config = DiagnosticConfig::default();

        // Moderate kurtosis alone is not enough
        let f = FeatureSet {
            kurtosis: 5.0,
            ..features()
        };
        assert!((bearing_confidence(&f, &config.thresholds, &config.bearing) - 0.4).abs() < 1e-12);
        assert!(detect_faults(&f, &config).is_empty());

        // Two moderate indicators are
        let f = FeatureSet {
            crest_factor: 7.0,
            hf_energy: 0.02,
            ..features()
        };
        let detections = detect_faults(&f, &config);
        assert_eq!(detections[0].fault, FaultType::Bearing);
        assert!((detections[0].severity - 0.6).abs() < 1e-12);

        // One strong indicator is
        let f = FeatureSet {
            kurtosis: 12.0,
            ..features()
        };
        assert_eq!(detect_faults(&f, &config)[0].fault, FaultType::Bearing);
    }

    #[test]
    fn test_bearing_confidence_capped() {
        let config = DiagnosticConfig::default();
        let f = FeatureSet {
            kurtosis: 35.0,
            crest_factor: 12.0,
            hf_energy: 0.03,
            ..features()
        };
        assert_eq!(bearing_confidence(&f, &config.thresholds, &config.bearing), 1.0);
    }

    #[test]
    fn test_multiple_faults_in_priority_order() {
        let f = FeatureSet {
            amp_1x: 0.9,
            amp_2x: 0.5,
            kurtosis: 9.0,
            ..features()
        };
        let faults: Vec<FaultType> = detect_faults(&f, &DiagnosticConfig::default())
            .iter()
            .map(|d| d.fault)
            .collect();
        assert_eq!(
            faults,
            vec![FaultType::Bearing, FaultType::Misalignment, FaultType::Imbalance]
        );
    }

    #[test]
    fn test_primary_is_most_severe() {
        let detections = [
            FaultDetection {
                fault: FaultType::Misalignment,
                severity: 0.6,
            },
            FaultDetection {
                fault: FaultType::Imbalance,
                severity: 0.9,
            },
        ];
        assert_eq!(select_primary(&detections).unwrap().fault, FaultType::Imbalance);
    }

    #[test]
    fn test_primary_tie_goes_to_bearing() {
        let detections = [
            FaultDetection {
                fault: FaultType::Imbalance,
                severity: 1.0,
            },
            FaultDetection {
                fault: FaultType::Bearing,
                severity: 1.0,
            },
            FaultDetection {
                fault: FaultType::Misalignment,
                severity: 1.0,
            },
        ];
        assert_eq!(select_primary(&detections).unwrap().fault, FaultType::Bearing);
        assert!(select_primary(&[]).is_none());
    }

    #[test]
    fn test_labels() {
        assert_eq!(FaultType::Misalignment.to_string(), "MISALIGNMENT");
        assert_eq!(
            serde_json::to_string(&FaultType::Bearing).unwrap(),
            "\"BEARING\""
        );
    }
}
