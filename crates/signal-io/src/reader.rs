//! CSV Capture Reader

use crate::error::SignalIoError;
use csv::StringRecord;
use signal_validator::Signal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const ACCEL_COLUMN: &str = "accel";
const TIME_COLUMN: &str = "time";

/// Raw contents of a capture file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCapture {
    /// Timestamps (s), when the file has a time column
    pub time: Option<Vec<f64>>,
    /// Acceleration samples
    pub samples: Vec<f64>,
    /// Inferred from the time column when its spacing is positive
    pub sampling_freq: Option<f64>,
}

impl LoadedCapture {
    /// Validate into a `Signal`, using `fallback_fs` when the file carries
    /// no usable timestamps
    pub fn into_signal(self, fallback_fs: Option<f64>) -> Result<Signal, SignalIoError> {
        let fs = self
            .sampling_freq
            .or(fallback_fs)
            .ok_or(SignalIoError::UnknownSamplingFrequency)?;
        Ok(Signal::new(self.samples, fs)?)
    }
}

/// Sampling frequency from the median timestamp spacing.
///
/// `None` for fewer than two timestamps or non-positive spacing.
pub fn infer_sampling_frequency(time: &[f64]) -> Option<f64> {
    if time.len() < 2 {
        return None;
    }

    let mut deltas: Vec<f64> = time.windows(2).map(|w| w[1] - w[0]).collect();
    deltas.sort_by(|a, b| a.total_cmp(b));

    let mid = deltas.len() / 2;
    let dt = if deltas.len() % 2 == 0 {
        (deltas[mid - 1] + deltas[mid]) / 2.0
    } else {
        deltas[mid]
    };

    (dt > 0.0 && dt.is_finite()).then(|| 1.0 / dt)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn parse_cell(record: &StringRecord, idx: usize, column: &str) -> Result<f64, SignalIoError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| SignalIoError::InvalidValue {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Read a capture from any CSV source.
///
/// The acceleration column is `accel` when present, otherwise the last
/// column. A `time` column is optional.
pub fn read_csv<R: Read>(source: R) -> Result<LoadedCapture, SignalIoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.parse::<f64>().is_ok()) {
        return Err(SignalIoError::MissingHeader);
    }

    let accel_idx = column_index(&headers, ACCEL_COLUMN).unwrap_or(headers.len() - 1);
    let accel_name = headers.get(accel_idx).unwrap_or(ACCEL_COLUMN).to_string();
    let time_idx = column_index(&headers, TIME_COLUMN);

    let mut samples = Vec::new();
    let mut time = time_idx.map(|_| Vec::new());

    for result in reader.records() {
        let record = result?;
        samples.push(parse_cell(&record, accel_idx, &accel_name)?);
        if let (Some(idx), Some(t)) = (time_idx, time.as_mut()) {
            t.push(parse_cell(&record, idx, TIME_COLUMN)?);
        }
    }

    let sampling_freq = time.as_deref().and_then(infer_sampling_frequency);
    if time.is_some() && sampling_freq.is_none() {
        warn!("Time column present but spacing unusable; sampling frequency not inferred");
    }

    debug!(
        "Read {} samples from column '{}' (fs = {:?})",
        samples.len(),
        accel_name,
        sampling_freq
    );

    Ok(LoadedCapture {
        time,
        samples,
        sampling_freq,
    })
}

/// Read a capture file
pub fn load_csv(path: impl AsRef<Path>) -> Result<LoadedCapture, SignalIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SignalIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file)
}
