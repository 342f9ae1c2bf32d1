//! Feature Set Assembly

use crate::error::FeatureError;
use crate::fft::SpectrumAnalyzer;
use crate::statistics::TimeDomainFeatures;
use serde::{Deserialize, Serialize};
use signal_validator::{validate_running_frequency, Signal, SignalError};
use tracing::{debug, warn};

/// Feature extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Running frequency used when the caller does not know it (Hz)
    pub default_running_freq: f64,
    /// Content above this frequency counts as high-frequency energy (Hz)
    pub hf_cutoff_hz: f64,
    /// Content up to this frequency counts as low-frequency energy (Hz)
    pub lf_cutoff_hz: f64,
    /// Half-width of the 1×/2× peak search, as a fraction of the target
    /// frequency. Never narrower than one bin.
    pub peak_tolerance_fraction: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_running_freq: 30.0,
            hf_cutoff_hz: 100.0,
            lf_cutoff_hz: 50.0,
            peak_tolerance_fraction: 0.05,
        }
    }
}

impl ExtractionConfig {
    /// Reject settings that would make the features meaningless
    pub fn validate(&self) -> Result<(), FeatureError> {
        positive("default_running_freq", self.default_running_freq)?;
        positive("hf_cutoff_hz", self.hf_cutoff_hz)?;
        positive("lf_cutoff_hz", self.lf_cutoff_hz)?;

        let tolerance = self.peak_tolerance_fraction;
        if !tolerance.is_finite() || !(0.0..1.0).contains(&tolerance) {
            return Err(FeatureError::Configuration {
                field: "peak_tolerance_fraction",
                value: tolerance,
                reason: "must be within [0, 1)",
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), FeatureError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(FeatureError::Configuration {
            field,
            value,
            reason: "must be finite and > 0",
        });
    }
    Ok(())
}

/// Scalar indicators computed once per signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Root mean square amplitude
    pub rms: f64,
    /// max - min
    pub peak_to_peak: f64,
    /// Non-excess kurtosis (Gaussian ≈ 3)
    pub kurtosis: f64,
    /// Peak magnitude / rms
    pub crest_factor: f64,
    /// Spectral amplitude at the running frequency
    pub amp_1x: f64,
    /// Spectral amplitude at twice the running frequency
    pub amp_2x: f64,
    /// Mean-square power above the HF cutoff
    pub hf_energy: f64,
    /// Mean-square power up to the LF cutoff
    pub lf_energy: f64,
    /// Mean-square power of the whole spectrum
    pub total_energy: f64,
    /// Magnitude-weighted mean frequency (Hz)
    pub spectral_centroid: f64,
    /// Frequency of the strongest spectral line (Hz)
    pub dominant_freq: f64,
    /// Mean value (DC offset)
    pub mean: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// Skewness
    pub skewness: f64,
    /// Running frequency the 1×/2× lookups were centred on (Hz)
    pub running_freq: f64,
    /// Sampling frequency (Hz)
    pub sampling_freq: f64,
    /// Number of samples analyzed
    pub sample_count: usize,
    /// Too short or zero variance; sentinel values in use
    pub degenerate: bool,
}

impl FeatureSet {
    /// Every floating-point indicator with its field name
    pub fn named_values(&self) -> [(&'static str, f64); 16] {
        [
            ("rms", self.rms),
            ("peak_to_peak", self.peak_to_peak),
            ("kurtosis", self.kurtosis),
            ("crest_factor", self.crest_factor),
            ("amp_1x", self.amp_1x),
            ("amp_2x", self.amp_2x),
            ("hf_energy", self.hf_energy),
            ("lf_energy", self.lf_energy),
            ("total_energy", self.total_energy),
            ("spectral_centroid", self.spectral_centroid),
            ("dominant_freq", self.dominant_freq),
            ("mean", self.mean),
            ("std_dev", self.std_dev),
            ("skewness", self.skewness),
            ("running_freq", self.running_freq),
            ("sampling_freq", self.sampling_freq),
        ]
    }
}

/// Feature extractor holding reusable FFT state.
///
/// One extractor per worker: `extract` needs `&mut self` for the FFT
/// planner cache, and nothing is shared between extractors.
pub struct FeatureExtractor {
    spectrum_analyzer: SpectrumAnalyzer,
    config: ExtractionConfig,
}

impl FeatureExtractor {
    /// Create a new feature extractor
    pub fn new(config: ExtractionConfig) -> Result<Self, FeatureError> {
        config.validate()?;
        Ok(Self {
            spectrum_analyzer: SpectrumAnalyzer::new(),
            config,
        })
    }

    /// Active settings
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the full feature set from a signal.
    ///
    /// `running_freq` falls back to the configured default when `None`.
    pub fn extract(
        &mut self,
        signal: &Signal,
        running_freq: Option<f64>,
    ) -> Result<FeatureSet, FeatureError> {
        let running_freq = running_freq.unwrap_or(self.config.default_running_freq);
        validate_running_frequency(running_freq)?;

        let sampling_freq = signal.sampling_freq();
        let samples = signal.samples();
        let time = TimeDomainFeatures::compute(samples);

        if samples.len() < 2 {
            warn!(
                "Signal has {} sample(s); reporting zeroed features",
                samples.len()
            );
            return Ok(FeatureSet {
                running_freq,
                sampling_freq,
                sample_count: samples.len(),
                degenerate: true,
                ..FeatureSet::default()
            });
        }

        if time.degenerate {
            warn!("Signal has zero variance; kurtosis reported as 0");
        }

        let spectrum = self.spectrum_analyzer.analyze(samples, sampling_freq);
        let tolerance = self.config.peak_tolerance_fraction;
        let peak_near = |f: f64| {
            spectrum.peak_amplitude_near(f, (f * tolerance).max(spectrum.resolution))
        };

        let amp_1x = peak_near(running_freq);
        let amp_2x = peak_near(2.0 * running_freq);

        let features = FeatureSet {
            rms: time.rms,
            peak_to_peak: time.peak_to_peak,
            kurtosis: time.kurtosis,
            crest_factor: time.crest_factor,
            amp_1x,
            amp_2x,
            hf_energy: spectrum.power_above(self.config.hf_cutoff_hz),
            lf_energy: spectrum.band_power(0.0, self.config.lf_cutoff_hz),
            total_energy: spectrum.total_power(),
            spectral_centroid: spectrum.centroid(),
            dominant_freq: spectrum.dominant_frequency(),
            mean: time.mean,
            std_dev: time.std_dev,
            skewness: time.skewness,
            running_freq,
            sampling_freq,
            sample_count: samples.len(),
            degenerate: time.degenerate,
        };

        // Spectral powers of near-f64::MAX amplitudes are not representable
        if let Some((name, value)) = features
            .named_values()
            .into_iter()
            .find(|(_, v)| !v.is_finite())
        {
            warn!("Feature {} overflowed to {}; rejecting signal", name, value);
            return Err(SignalError::NonFiniteFeature { name, value }.into());
        }

        debug!(
            "Features: rms={:.4} kurtosis={:.3} crest={:.3} 1x={:.4} 2x={:.4} hf={:.5}",
            features.rms,
            features.kurtosis,
            features.crest_factor,
            features.amp_1x,
            features.amp_2x,
            features.hf_energy
        );

        Ok(features)
    }
}

/// One-shot extraction with a fresh extractor
pub fn extract_features(
    signal: &Signal,
    running_freq: Option<f64>,
    config: &ExtractionConfig,
) -> Result<FeatureSet, FeatureError> {
    FeatureExtractor::new(config.clone())?.extract(signal, running_freq)
}
