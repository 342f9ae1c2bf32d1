//! Diagnostic configuration

use crate::error::DiagnosticError;
use feature_engine::ExtractionConfig;
use serde::{Deserialize, Serialize};

/// Fault detection thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionThresholds {
    /// 1× amplitude above which imbalance is reported
    pub imbalance_amp_1x: f64,
    /// 2× amplitude above which misalignment is reported
    pub misalignment_amp_2x: f64,
    /// Kurtosis above which impulsiveness counts as bearing evidence
    pub bearing_kurtosis: f64,
    /// Crest factor above which peaks count as bearing evidence
    pub bearing_crest_factor: f64,
    /// HF band power above which HF content counts as bearing evidence
    pub bearing_hf_energy: f64,
}

impl Default for DetectionThresholds {
    fn default() -> Self {
        Self {
            imbalance_amp_1x: 0.4,
            misalignment_amp_2x: 0.3,
            bearing_kurtosis: 4.0,
            bearing_crest_factor: 6.0,
            bearing_hf_energy: 0.01,
        }
    }
}

/// Confidence increments for bearing evidence.
///
/// Each satisfied indicator adds its weight; bearing is reported once the
/// total passes `confidence_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BearingEvidence {
    pub kurtosis_weight: f64,
    /// Kurtosis at which impulsiveness alone is strong evidence
    pub severe_kurtosis: f64,
    /// Added on top of `kurtosis_weight` past `severe_kurtosis`
    pub severe_kurtosis_weight: f64,
    pub crest_factor_weight: f64,
    pub hf_energy_weight: f64,
    pub confidence_threshold: f64,
}

impl Default for BearingEvidence {
    fn default() -> Self {
        Self {
            kurtosis_weight: 0.4,
            severe_kurtosis: 8.0,
            severe_kurtosis_weight: 0.2,
            crest_factor_weight: 0.3,
            hf_energy_weight: 0.3,
            confidence_threshold: 0.5,
        }
    }
}

/// Two-step penalty: `warning_penalty` past `warning`, `critical_penalty`
/// past `critical`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TieredPenalty {
    pub warning: f64,
    pub critical: f64,
    pub warning_penalty: f64,
    pub critical_penalty: f64,
}

impl TieredPenalty {
    /// Points deducted for `value`
    pub fn penalty(&self, value: f64) -> f64 {
        if value > self.critical {
            self.critical_penalty
        } else if value > self.warning {
            self.warning_penalty
        } else {
            0.0
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), DiagnosticError> {
        for value in [
            self.warning,
            self.critical,
            self.warning_penalty,
            self.critical_penalty,
        ] {
            non_negative(field, value)?;
        }
        if self.warning > self.critical {
            return Err(DiagnosticError::Configuration {
                field,
                value: self.warning,
                reason: "warning level must not exceed critical level",
            });
        }
        if self.warning_penalty > self.critical_penalty {
            return Err(DiagnosticError::Configuration {
                field,
                value: self.warning_penalty,
                reason: "warning penalty must not exceed critical penalty",
            });
        }
        Ok(())
    }
}

/// Health score deductions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Vibration severity
    pub rms: TieredPenalty,
    /// Impulsiveness
    pub kurtosis: TieredPenalty,
    /// Peak impacts
    pub crest_factor: TieredPenalty,
    /// Overall spectral power above which `total_energy_penalty` applies
    pub total_energy_limit: f64,
    pub total_energy_penalty: f64,
    /// Per-fault deductions, scaled by the fault's severity
    pub imbalance: f64,
    pub misalignment: f64,
    pub bearing: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            rms: TieredPenalty {
                warning: 0.3,
                critical: 0.6,
                warning_penalty: 15.0,
                critical_penalty: 30.0,
            },
            kurtosis: TieredPenalty {
                warning: 5.0,
                critical: 8.0,
                warning_penalty: 10.0,
                critical_penalty: 20.0,
            },
            crest_factor: TieredPenalty {
                warning: 6.0,
                critical: 8.0,
                warning_penalty: 8.0,
                critical_penalty: 15.0,
            },
            total_energy_limit: 0.25,
            total_energy_penalty: 10.0,
            imbalance: 15.0,
            misalignment: 20.0,
            bearing: 35.0,
        }
    }
}

/// Lowest score of each status tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBreakpoints {
    pub healthy: u8,
    pub acceptable: u8,
    pub warning: u8,
}

impl Default for StatusBreakpoints {
    fn default() -> Self {
        Self {
            healthy: 85,
            acceptable: 70,
            warning: 50,
        }
    }
}

/// Complete diagnostic engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    pub thresholds: DetectionThresholds,
    pub bearing: BearingEvidence,
    pub penalties: PenaltyWeights,
    pub status: StatusBreakpoints,
}

impl DiagnosticConfig {
    /// Lower detection thresholds: faults are reported earlier
    pub fn sensitive() -> Self {
        Self {
            thresholds: DetectionThresholds {
                imbalance_amp_1x: 0.3,
                misalignment_amp_2x: 0.2,
                bearing_kurtosis: 3.5,
                bearing_crest_factor: 5.0,
                bearing_hf_energy: 0.005,
            },
            ..Default::default()
        }
    }

    /// Higher detection thresholds for machines that run rough by nature
    pub fn tolerant() -> Self {
        Self {
            thresholds: DetectionThresholds {
                imbalance_amp_1x: 0.6,
                misalignment_amp_2x: 0.45,
                bearing_kurtosis: 5.0,
                bearing_crest_factor: 7.0,
                bearing_hf_energy: 0.02,
            },
            ..Default::default()
        }
    }

    /// Reject negative, non-finite, or inconsistent settings
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        let t = &self.thresholds;
        non_negative("thresholds.imbalance_amp_1x", t.imbalance_amp_1x)?;
        non_negative("thresholds.misalignment_amp_2x", t.misalignment_amp_2x)?;
        non_negative("thresholds.bearing_kurtosis", t.bearing_kurtosis)?;
        non_negative("thresholds.bearing_crest_factor", t.bearing_crest_factor)?;
        non_negative("thresholds.bearing_hf_energy", t.bearing_hf_energy)?;

        let b = &self.bearing;
        non_negative("bearing.kurtosis_weight", b.kurtosis_weight)?;
        non_negative("bearing.severe_kurtosis", b.severe_kurtosis)?;
        non_negative("bearing.severe_kurtosis_weight", b.severe_kurtosis_weight)?;
        non_negative("bearing.crest_factor_weight", b.crest_factor_weight)?;
        non_negative("bearing.hf_energy_weight", b.hf_energy_weight)?;
        if !(0.0..1.0).contains(&b.confidence_threshold) {
            return Err(DiagnosticError::Configuration {
                field: "bearing.confidence_threshold",
                value: b.confidence_threshold,
                reason: "must be within [0, 1)",
            });
        }

        let p = &self.penalties;
        p.rms.validate("penalties.rms")?;
        p.kurtosis.validate("penalties.kurtosis")?;
        p.crest_factor.validate("penalties.crest_factor")?;
        non_negative("penalties.total_energy_limit", p.total_energy_limit)?;
        non_negative("penalties.total_energy_penalty", p.total_energy_penalty)?;
        non_negative("penalties.imbalance", p.imbalance)?;
        non_negative("penalties.misalignment", p.misalignment)?;
        non_negative("penalties.bearing", p.bearing)?;

        let s = &self.status;
        if s.healthy > 100 {
            return Err(DiagnosticError::Configuration {
                field: "status.healthy",
                value: f64::from(s.healthy),
                reason: "must not exceed 100",
            });
        }
        if !(s.healthy > s.acceptable && s.acceptable > s.warning) {
            return Err(DiagnosticError::Configuration {
                field: "status",
                value: f64::from(s.acceptable),
                reason: "breakpoints must satisfy healthy > acceptable > warning",
            });
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), DiagnosticError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DiagnosticError::Configuration {
            field,
            value,
            reason: "must be finite and >= 0",
        });
    }
    Ok(())
}

/// Extraction and diagnostic settings for one analysis profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub extraction: ExtractionConfig,
    pub diagnostics: DiagnosticConfig,
}

impl AnalysisConfig {
    /// Validate both halves
    pub fn validate(&self) -> Result<(), DiagnosticError> {
        self.extraction.validate()?;
        self.diagnostics.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(DiagnosticConfig::default().validate().is_ok());
        assert!(DiagnosticConfig::sensitive().validate().is_ok());
        assert!(DiagnosticConfig::tolerant().validate().is_ok());
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let mut config = DiagnosticConfig::default();
        config.thresholds.imbalance_amp_1x = -0.4;
        match config.validate() {
            Err(DiagnosticError::Configuration { field, value, .. }) => {
                assert_eq!(field, "thresholds.imbalance_amp_1x");
                assert_eq!(value, -0.4);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let mut config = DiagnosticConfig::default();
        config.penalties.bearing = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_tier_rejected() {
        let mut config = DiagnosticConfig::default();
        config.penalties.rms.warning = 0.9;
        assert!(config.validate().is_err());

        let mut config = DiagnosticConfig::default();
        config.penalties.kurtosis.warning_penalty = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_breakpoints_must_descend() {
        let mut config = DiagnosticConfig::default();
        config.status.acceptable = 90;
        assert!(config.validate().is_err());

        let mut config = DiagnosticConfig::default();
        config.status.healthy = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extraction_error_is_configuration() {
        let mut config = AnalysisConfig::default();
        config.extraction.hf_cutoff_hz = 0.0;
        assert!(matches!(
            config.validate(),
            Err(DiagnosticError::Configuration { field: "hf_cutoff_hz", .. })
        ));
    }

    #[test]
    fn test_tiered_penalty() {
        let tier = PenaltyWeights::default().rms;
        assert_eq!(tier.penalty(0.2), 0.0);
        assert_eq!(tier.penalty(0.3), 0.0);
        assert_eq!(tier.penalty(0.45), 15.0);
        assert_eq!(tier.penalty(0.7), 30.0);
    }
}
