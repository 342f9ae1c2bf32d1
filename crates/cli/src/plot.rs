//! Analysis plots
//!
//! Two panels per capture: the time-domain trace with ±RMS reference lines,
//! and the spectrum up to 500 Hz with 1×/2× markers, the HF band shaded and
//! the diagnosis summary in the corner.

use anyhow::Context;
use diagnostics::{DiagnosticReport, Signal};
use feature_engine::{Spectrum, SpectrumAnalyzer};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;
/// Upper edge of the spectrum panel (Hz), clipped to Nyquist
const MAX_PLOT_HZ: f64 = 500.0;

const ORANGE: RGBColor = RGBColor(255, 140, 0);
const PANEL: RGBColor = RGBColor(245, 222, 179);

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// File stem of a capture, used for plot names and titles
pub fn capture_stem(capture: &Path) -> String {
    capture
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "capture".to_string())
}

/// `<dir>/<stem>_analysis.svg`
pub fn plot_path(dir: &Path, capture: &Path) -> PathBuf {
    dir.join(format!("{}_analysis.svg", capture_stem(capture)))
}

/// Render the analysis figure as an SVG document
pub fn render_plot(
    title: &str,
    signal: &Signal,
    report: &DiagnosticReport,
    hf_cutoff_hz: f64,
) -> anyhow::Result<String> {
    let spectrum = SpectrumAnalyzer::new().analyze(signal.samples(), signal.sampling_freq());

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(title, ("sans-serif", 24))?;
        let (upper, lower) = root.split_vertically(380);

        draw_time_domain(&upper, signal, report.features.rms)?;
        draw_spectrum(&lower, &spectrum, report.features.running_freq, hf_cutoff_hz)?;
        draw_summary(&lower, report)?;

        root.present()?;
    }
    Ok(svg)
}

/// Render and write the figure, creating `path`'s directory
pub fn write_plot(
    path: &Path,
    title: &str,
    signal: &Signal,
    report: &DiagnosticReport,
    hf_cutoff_hz: f64,
) -> anyhow::Result<()> {
    let svg = render_plot(title, signal, report, hf_cutoff_hz)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Plot saved: {}", path.display());
    Ok(())
}

fn draw_time_domain(area: &Area<'_>, signal: &Signal, rms: f64) -> anyhow::Result<()> {
    let fs = signal.sampling_freq();
    let samples = signal.samples();
    let duration = (samples.len() as f64 / fs).max(1.0 / fs);
    let y_max = samples.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1e-9) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Time domain signal", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..duration, -y_max..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Acceleration (g)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        samples.iter().enumerate().map(|(i, &x)| (i as f64 / fs, x)),
        BLUE.stroke_width(1),
    ))?;

    chart
        .draw_series(LineSeries::new(
            [(0.0, rms), (duration, rms)],
            RED.mix(0.6).stroke_width(1),
        ))?
        .label(format!("RMS = {:.3}", rms))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    chart.draw_series(LineSeries::new(
        [(0.0, -rms), (duration, -rms)],
        RED.mix(0.6).stroke_width(1),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_spectrum(
    area: &Area<'_>,
    spectrum: &Spectrum,
    running_freq: f64,
    hf_cutoff_hz: f64,
) -> anyhow::Result<()> {
    let x_max = spectrum
        .nyquist()
        .min(MAX_PLOT_HZ)
        .max(spectrum.resolution)
        .max(1e-9);
    let points: Vec<(f64, f64)> = spectrum
        .magnitudes
        .iter()
        .enumerate()
        .map(|(k, &mag)| (spectrum.frequency(k), mag))
        .take_while(|(f, _)| *f <= x_max)
        .collect();
    let y_top = points.iter().fold(0.0_f64, |acc, (_, m)| acc.max(*m)).max(1e-9) * 1.15;

    let mut chart = ChartBuilder::on(area)
        .caption("Frequency spectrum (FFT)", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_top)?;

    chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc("Magnitude")
        .draw()?;

    if hf_cutoff_hz < x_max {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(hf_cutoff_hz, 0.0), (x_max, y_top)],
                RED.mix(0.1).filled(),
            )))?
            .label("HF region (bearing)")
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], RED.mix(0.1).filled()));
    }

    chart.draw_series(LineSeries::new(points, BLUE.stroke_width(1)))?;

    for (harmonic, color) in [(1.0, GREEN), (2.0, ORANGE)] {
        let f = harmonic * running_freq;
        if f > x_max {
            continue;
        }
        chart
            .draw_series(LineSeries::new([(f, 0.0), (f, y_top)], color.stroke_width(2)))?
            .label(format!("{}x ({:.1} Hz)", harmonic, f))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::MiddleRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_summary(area: &Area<'_>, report: &DiagnosticReport) -> anyhow::Result<()> {
    let f = &report.features;
    let lines = [
        format!("Health score: {}/100", report.health_score),
        format!("Status: {}", report.status),
        format!("Fault: {}", report.primary_fault),
        format!("Kurtosis: {:.2}", f.kurtosis),
        format!("Crest factor: {:.2}", f.crest_factor),
    ];

    let (width, _) = area.dim_in_pixel();
    let left = width as i32 - 300;
    let top = 45;
    let line_height = 20;

    area.draw(&Rectangle::new(
        [
            (left - 10, top - 10),
            (left + 220, top + line_height * lines.len() as i32),
        ],
        PANEL.mix(0.8).filled(),
    ))?;
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (left, top + line_height * i as i32),
            ("monospace", 14),
        ))?;
    }

    Ok(())
}
