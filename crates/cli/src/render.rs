//! Report rendering

use crate::batch::FileOutcome;
use clap::ValueEnum;
use diagnostics::DiagnosticReport;
use serde::Serialize;
use std::fmt;
use std::path::Path;

const RULE_WIDTH: usize = 70;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Text layout of one diagnostic report
pub struct ReportView<'a> {
    pub path: &'a Path,
    pub report: &'a DiagnosticReport,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let f = &report.features;

        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "File: {}", display_name(self.path))?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(out, "Health score:   {}/100 ({})", report.health_score, report.status)?;
        writeln!(
            out,
            "Primary fault:  {} (confidence {:.0}%)",
            report.primary_fault,
            report.confidence * 100.0
        )?;

        if report.has_faults() {
            writeln!(out, "Detected faults:")?;
            for detection in &report.detections {
                writeln!(
                    out,
                    "  - {:<14} severity {:.2}",
                    detection.fault.as_str(),
                    detection.severity
                )?;
            }
        } else {
            writeln!(out, "Detected faults: none")?;
        }

        writeln!(out, "Key indicators:")?;
        let indicators = [
            ("RMS", f.rms),
            ("Peak-to-peak", f.peak_to_peak),
            ("Kurtosis", f.kurtosis),
            ("Crest factor", f.crest_factor),
            ("1x amplitude", f.amp_1x),
            ("2x amplitude", f.amp_2x),
            ("HF energy", f.hf_energy),
        ];
        for (label, value) in indicators {
            writeln!(out, "  {:<14} {:>10.4}", label, value)?;
        }
        writeln!(
            out,
            "  {:<14} {:>10.1} Hz @ {} Hz, {} samples",
            "Running freq", f.running_freq, f.sampling_freq, f.sample_count
        )?;

        writeln!(out, "Recommendations:")?;
        for line in &report.recommendations {
            writeln!(out, "  - {}", line)?;
        }
        Ok(())
    }
}

/// Comparison table, one row per file
pub struct SummaryView<'a>(pub &'a [FileOutcome]);

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "SUMMARY")?;
        writeln!(out, "{:<28} {:>6}  {:<11} {}", "File", "Score", "Status", "Primary fault")?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for outcome in self.0 {
            let name = display_name(&outcome.path);
            match &outcome.result {
                Ok(report) => writeln!(
                    out,
                    "{:<28} {:>6}  {:<11} {}",
                    name,
                    report.health_score,
                    report.status.as_str(),
                    report.primary_fault.as_str()
                )?,
                Err(_) => writeln!(out, "{:<28} {:>6}  {:<11} {}", name, "-", "ERROR", "-")?,
            }
        }
        Ok(())
    }
}

/// Human-readable report for one capture
pub fn render_report(path: &Path, report: &DiagnosticReport) -> String {
    ReportView { path, report }.to_string()
}

/// One row per file: name, score, status, primary fault
pub fn render_summary(outcomes: &[FileOutcome]) -> String {
    SummaryView(outcomes).to_string()
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a DiagnosticReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// All outcomes as a JSON array
pub fn render_json(outcomes: &[FileOutcome]) -> serde_json::Result<String> {
    let entries: Vec<JsonEntry<'_>> = outcomes
        .iter()
        .map(|o| JsonEntry {
            file: o.path.display().to_string(),
            report: o.result.as_ref().ok(),
            error: o.result.as_ref().err().map(|e| format!("{:#}", e)),
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}
