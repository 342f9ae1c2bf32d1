//! FFT-based Spectrum Analysis

use rustfft::{num_complex::Complex, FftPlanner};

/// One-sided amplitude spectrum of a real signal.
///
/// Bin `k` sits at `k * resolution` Hz and runs from DC to Nyquist. The
/// magnitudes are amplitude-calibrated: a sinusoid of amplitude `A` centred
/// on a bin shows up as a peak of height `A`.
#[derive(Debug, Clone, Default)]
pub struct Spectrum {
    /// Amplitude per bin
    pub magnitudes: Vec<f64>,
    /// Bin spacing (Hz)
    pub resolution: f64,
    /// Sampling frequency (Hz)
    pub sampling_freq: f64,
    /// Whether the last bin is the Nyquist bin (even-length input)
    has_nyquist_bin: bool,
}

impl Spectrum {
    /// Nyquist frequency (Hz)
    pub fn nyquist(&self) -> f64 {
        self.sampling_freq / 2.0
    }

    /// Frequency of bin `k` (Hz)
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.resolution
    }

    /// Mean-square power carried by bin `k`
    fn bin_power(&self, k: usize) -> f64 {
        let mag = self.magnitudes[k];
        let last = self.magnitudes.len() - 1;
        if k == 0 || (self.has_nyquist_bin && k == last) {
            mag * mag
        } else {
            mag * mag / 2.0
        }
    }

    /// Largest magnitude within `±half_width` Hz of `center`.
    ///
    /// Returns 0 when `center` lies above Nyquist, so no aliased bin is
    /// ever read.
    pub fn peak_amplitude_near(&self, center: f64, half_width: f64) -> f64 {
        if self.magnitudes.is_empty() || center > self.nyquist() {
            return 0.0;
        }

        // Tolerate rounding when the window edge lands exactly on a bin
        let slack = self.resolution * 1e-9;
        let low = center - half_width - slack;
        let high = center + half_width + slack;

        self.magnitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| {
                let f = self.frequency(*k);
                f >= low && f <= high
            })
            .map(|(_, &mag)| mag)
            .fold(0.0, f64::max)
    }

    /// Power in the bins whose frequency satisfies `in_band`
    fn power_where(&self, in_band: impl Fn(f64) -> bool) -> f64 {
        (0..self.magnitudes.len())
            .filter(|&k| in_band(self.frequency(k)))
            .map(|k| self.bin_power(k))
            .sum()
    }

    /// Mean-square power of all content strictly above `cutoff` Hz
    pub fn power_above(&self, cutoff: f64) -> f64 {
        self.power_where(|f| f > cutoff)
    }

    /// Mean-square power of content in `[low, high]` Hz
    pub fn band_power(&self, low: f64, high: f64) -> f64 {
        self.power_where(|f| f >= low && f <= high)
    }

    /// Mean-square power of the whole spectrum
    pub fn total_power(&self) -> f64 {
        self.power_where(|_| true)
    }

    /// Magnitude-weighted mean frequency (Hz)
    pub fn centroid(&self) -> f64 {
        let total: f64 = self.magnitudes.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .magnitudes
            .iter()
            .enumerate()
            .map(|(k, &mag)| self.frequency(k) * mag)
            .sum();
        weighted / total
    }

    /// Frequency of the strongest bin (Hz)
    pub fn dominant_frequency(&self) -> f64 {
        let mut max_mag = 0.0;
        let mut dominant_idx = 0;
        for (k, &mag) in self.magnitudes.iter().enumerate() {
            if mag > max_mag {
                max_mag = mag;
                dominant_idx = k;
            }
        }
        self.frequency(dominant_idx)
    }
}

/// Spectrum analyzer that reuses FFT plans across calls
pub struct SpectrumAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectrumAnalyzer {
    /// Create a new spectrum analyzer
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Compute the one-sided amplitude spectrum of the mean-removed signal.
    ///
    /// Rectangular window, so tone amplitudes stay calibrated.
    pub fn analyze(&mut self, signal: &[f64], sampling_freq: f64) -> Spectrum {
        if signal.is_empty() {
            return Spectrum {
                sampling_freq,
                ..Spectrum::default()
            };
        }

        let n = signal.len();
        let mean = signal.iter().sum::<f64>() / n as f64;

        let mut buffer: Vec<Complex<f64>> = signal
            .iter()
            .map(|&v| Complex::new(v - mean, 0.0))
            .collect();

        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let bins = n / 2 + 1;
        let has_nyquist_bin = n % 2 == 0 && n > 1;
        let scale = 1.0 / n as f64;

        let magnitudes: Vec<f64> = buffer
            .iter()
            .take(bins)
            .enumerate()
            .map(|(k, c)| {
                let edge = k == 0 || (has_nyquist_bin && k == bins - 1);
                if edge {
                    c.norm() * scale
                } else {
                    2.0 * c.norm() * scale
                }
            })
            .collect();

        Spectrum {
            magnitudes,
            resolution: sampling_freq / n as f64,
            sampling_freq,
            has_nyquist_bin,
        }
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
