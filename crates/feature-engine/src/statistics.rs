//! Time-Domain Statistics

use serde::{Deserialize, Serialize};

/// Standard deviation below this fraction of the peak magnitude counts as zero
/// variance. Catches constant signals whose mean picks up rounding error.
const ZERO_VARIANCE_RATIO: f64 = 1e-12;

/// Time-domain statistics of a vibration signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeDomainFeatures {
    /// Mean value (DC offset)
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Skewness (asymmetry)
    pub skewness: f64,
    /// Kurtosis: E[(X-μ)⁴] / σ⁴, non-excess (Gaussian ≈ 3)
    pub kurtosis: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Root mean square amplitude
    pub rms: f64,
    /// Largest absolute amplitude
    pub peak: f64,
    /// max - min
    pub peak_to_peak: f64,
    /// peak / rms
    pub crest_factor: f64,
    /// Fewer than two samples, or zero variance
    pub degenerate: bool,
}

impl TimeDomainFeatures {
    /// Compute time-domain statistics from a slice of samples.
    ///
    /// Fewer than two samples carry no vibration information and yield all
    /// zeros with `degenerate` set. Zero-variance input keeps its rms and
    /// peak values but reports kurtosis and skewness as 0.
    pub fn compute(values: &[f64]) -> Self {
        if values.len() < 2 {
            return Self {
                degenerate: true,
                ..Self::default()
            };
        }

        let n = values.len() as f64;

        let min = values.iter().cloned().fold(f64::MAX, f64::min);
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let peak = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

        // Moments use samples scaled to unit peak; powers stay finite for
        // any finite input
        let scale = if peak > 0.0 { peak } else { 1.0 };
        let scaled = || values.iter().map(|v| v / scale);

        let mean_scaled = scaled().sum::<f64>() / n;
        let rms_scaled = (scaled().map(|v| v * v).sum::<f64>() / n).sqrt();

        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for v in scaled() {
            let d = v - mean_scaled;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }

        let variance = m2 / n;
        let std_scaled = variance.sqrt();
        let zero_variance = std_scaled <= ZERO_VARIANCE_RATIO;

        let (skewness, kurtosis) = if zero_variance {
            (0.0, 0.0)
        } else {
            (
                (m3 / n) / (variance * std_scaled),
                (m4 / n) / (variance * variance),
            )
        };

        let mean = mean_scaled * scale;
        let std_dev = std_scaled * scale;
        let rms = rms_scaled * scale;

        let crest_factor = if rms > 0.0 { peak / rms } else { 0.0 };

        Self {
            mean,
            std_dev: if zero_variance { 0.0 } else { std_dev },
            skewness,
            kurtosis,
            min,
            max,
            rms,
            peak,
            peak_to_peak: max - min,
            crest_factor,
            degenerate: zero_variance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(amplitude: f64, freq: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn test_sine_statistics() {
        let stats = TimeDomainFeatures::compute(&sine(1.0, 10.0, 1000.0, 1000));
        assert!((stats.rms - 1.0 / 2f64.sqrt()).abs() < 0.01);
        assert!((stats.peak_to_peak - 2.0).abs() < 0.01);
        // A pure sine has kurtosis 1.5
        assert!((stats.kurtosis - 1.5).abs() < 0.05);
        assert!((stats.crest_factor - 2f64.sqrt()).abs() < 0.01);
        assert!(!stats.degenerate);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = TimeDomainFeatures::compute(&values);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_impulse_has_high_kurtosis() {
        let mut values = vec![0.0; 1000];
        values[500] = 10.0;
        let stats = TimeDomainFeatures::compute(&values);
        assert!(stats.kurtosis > 10.0);
        assert!(stats.crest_factor > 10.0);
    }

    #[test]
    fn test_all_zero_signal() {
        let stats = TimeDomainFeatures::compute(&[0.0; 64]);
        assert_eq!(stats.rms, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert_eq!(stats.crest_factor, 0.0);
        assert!(stats.degenerate);
    }

    #[test]
    fn test_constant_signal() {
        let stats = TimeDomainFeatures::compute(&[0.1; 3]);
        assert_eq!(stats.kurtosis, 0.0);
        assert_eq!(stats.skewness, 0.0);
        assert!((stats.rms - 0.1).abs() < 1e-12);
        assert!((stats.crest_factor - 1.0).abs() < 1e-9);
        assert!(stats.degenerate);
    }

    #[test]
    fn test_single_sample() {
        let stats = TimeDomainFeatures::compute(&[0.7]);
        assert_eq!(stats.rms, 0.0);
        assert_eq!(stats.crest_factor, 0.0);
        assert_eq!(stats.kurtosis, 0.0);
        assert!(stats.degenerate);
    }

    #[test]
    fn test_huge_amplitudes_stay_finite() {
        // Fourth powers of these samples overflow f64
        let values: Vec<f64> = (0..64)
            .map(|i| if i % 2 == 0 { 1e100 } else { -1e100 })
            .collect();
        let stats = TimeDomainFeatures::compute(&values);
        assert!((stats.rms / 1e100 - 1.0).abs() < 1e-12);
        assert!((stats.std_dev / 1e100 - 1.0).abs() < 1e-12);
        assert!((stats.kurtosis - 1.0).abs() < 1e-9);
        assert!((stats.crest_factor - 1.0).abs() < 1e-9);
        assert!(stats.skewness.abs() < 1e-9);
        assert!(!stats.degenerate);
    }

    #[test]
    fn test_scaling_keeps_shape_statistics() {
        let mut small = sine(1.0, 10.0, 1000.0, 500);
        small[250] = 8.0;
        let large: Vec<f64> = small.iter().map(|v| v * 1e120).collect();

        let a = TimeDomainFeatures::compute(&small);
        let b = TimeDomainFeatures::compute(&large);
        assert!((a.kurtosis - b.kurtosis).abs() < 1e-9 * a.kurtosis);
        assert!((a.skewness - b.skewness).abs() < 1e-9);
        assert!((b.rms / 1e120 - a.rms).abs() < 1e-12);
    }

    #[test]
    fn test_empty_values() {
        let stats = TimeDomainFeatures::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert!(stats.degenerate);
    }
}
