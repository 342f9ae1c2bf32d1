//! CSV Capture Writer

use crate::error::SignalIoError;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `time,accel` rows to any sink
pub fn write_csv_to<W: Write>(
    sink: W,
    time: &[f64],
    samples: &[f64],
) -> Result<(), SignalIoError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(["time", "accel"])?;
    for (t, x) in time.iter().zip(samples) {
        writer.write_record([t.to_string(), x.to_string()])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write a capture file, creating parent directories as needed
pub fn write_csv(
    path: impl AsRef<Path>,
    time: &[f64],
    samples: &[f64],
) -> Result<(), SignalIoError> {
    let path = path.as_ref();
    let io_err = |source| SignalIoError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    write_csv_to(file, time, samples)?;

    info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{load_csv, read_csv};

    #[test]
    fn test_written_capture_reads_back() {
        let time: Vec<f64> = (0..50).map(|i| i as f64 / 1000.0).collect();
        let samples: Vec<f64> = (0..50).map(|i| (i as f64 * 0.37).sin()).collect();

        let mut buffer = Vec::new();
        write_csv_to(&mut buffer, &time, &samples).unwrap();
        assert!(buffer.starts_with(b"time,accel\n"));

        let capture = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(capture.samples, samples);
        assert!((capture.sampling_freq.unwrap() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("normal.csv");
        write_csv(&path, &[0.0, 0.5], &[1.0, -1.0]).unwrap();

        let capture = load_csv(&path).unwrap();
        assert_eq!(capture.samples, vec![1.0, -1.0]);
    }
}
