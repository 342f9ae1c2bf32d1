//! End-to-end diagnosis of synthetic machine captures

use diagnostics::{
    analyze, AnalysisConfig, DiagnosticConfig, DiagnosticError, FaultType, HealthStatus, Signal,
    SignalError, VibrationAnalyzer,
};
use signal_synth::{generate, FaultInjection, MachineCondition, SynthConfig};
use std::f64::consts::PI;

fn capture(condition: MachineCondition, config: SynthConfig) -> Signal {
    generate(&config, condition.injection())
        .unwrap()
        .to_signal()
        .unwrap()
}

#[test]
fn quiet_machine_is_healthy() {
    let config = SynthConfig {
        duration_secs: 2.0,
        base_amplitude: 0.05,
        noise_std: 0.01,
        seed: 1,
        ..Default::default()
    };
    let signal = capture(MachineCondition::Normal, config);
    let report = analyze(&signal, Some(30.0), &AnalysisConfig::default()).unwrap();

    assert!(report.detected_faults.is_empty());
    assert_eq!(report.primary_fault, FaultType::Normal);
    assert!(report.health_score >= 85);
    assert_eq!(report.status, HealthStatus::Healthy);
    assert!((report.features.amp_1x - 0.05).abs() < 0.01);
}

#[test]
fn impulsive_capture_is_bearing_critical() {
    let config = SynthConfig {
        duration_secs: 2.0,
        seed: 4,
        ..Default::default()
    };
    let signal = capture(MachineCondition::Bearing, config);
    let report = analyze(&signal, Some(30.0), &AnalysisConfig::default()).unwrap();

    assert!(report.features.kurtosis > 10.0);
    assert!(report.features.hf_energy > 0.01);
    assert!(report.detected_faults.contains(&FaultType::Bearing));
    assert_eq!(report.primary_fault, FaultType::Bearing);
    assert!(report.health_score <= 49);
    assert_eq!(report.status, HealthStatus::Critical);
    assert_eq!(report.recommendations[0], "Bearing fault indicators present");
}

#[test]
fn strong_second_harmonic_is_misalignment() {
    let signal = capture(
        MachineCondition::Misalignment,
        SynthConfig {
            seed: 3,
            ..Default::default()
        },
    );
    let report = analyze(&signal, Some(30.0), &AnalysisConfig::default()).unwrap();

    assert!(report.detected_faults.contains(&FaultType::Misalignment));
    assert!(!report.detected_faults.contains(&FaultType::Imbalance));
    assert!(report.features.amp_1x < 0.4);
    assert!((report.features.amp_2x - 0.45).abs() < 0.02);
    assert_eq!(report.primary_fault, FaultType::Misalignment);
    assert!((50..85).contains(&report.health_score));
}

#[test]
fn strong_running_speed_is_imbalance() {
    let signal = capture(
        MachineCondition::Imbalance,
        SynthConfig {
            seed: 2,
            ..Default::default()
        },
    );
    let report = analyze(&signal, Some(30.0), &AnalysisConfig::default()).unwrap();

    assert_eq!(report.primary_fault, FaultType::Imbalance);
    assert!((report.features.amp_1x - 0.8).abs() < 0.02);
    assert_eq!(report.status, HealthStatus::Warning);
}

#[test]
fn pure_tone_amplitudes() {
    let fs = 2000.0;
    let samples: Vec<f64> = (0..4000)
        .map(|i| 0.7 * (2.0 * PI * 25.0 * i as f64 / fs).sin())
        .collect();
    let signal = Signal::new(samples, fs).unwrap();
    let report = analyze(&signal, Some(25.0), &AnalysisConfig::default()).unwrap();

    assert!((report.features.amp_1x - 0.7).abs() < 1e-3);
    assert!(report.features.amp_2x < 1e-3);
    assert_eq!(report.primary_fault, FaultType::Imbalance);
}

#[test]
fn silence_and_dc_offset_complete() {
    let silence = Signal::new(vec![0.0; 2000], 1000.0).unwrap();
    let report = analyze(&silence, None, &AnalysisConfig::default()).unwrap();
    assert_eq!(report.features.rms, 0.0);
    assert_eq!(report.features.kurtosis, 0.0);
    assert_eq!(report.features.crest_factor, 0.0);
    assert_eq!(report.health_score, 100);

    let offset = Signal::new(vec![2.0; 2000], 1000.0).unwrap();
    let report = analyze(&offset, None, &AnalysisConfig::default()).unwrap();
    assert!(report.features.degenerate);
    assert_eq!(report.features.amp_1x, 0.0);
    assert!(report.health_score <= 100);
}

#[test]
fn single_sample_completes() {
    let signal = Signal::new(vec![0.3], 1000.0).unwrap();
    let report = analyze(&signal, Some(30.0), &AnalysisConfig::default()).unwrap();
    assert_eq!(report.features.rms, 0.0);
    assert_eq!(report.features.crest_factor, 0.0);
    assert_eq!(report.features.kurtosis, 0.0);
}

#[test]
fn invalid_inputs_fail_fast() {
    assert_eq!(Signal::new(vec![], 1000.0).unwrap_err(), SignalError::Empty);

    let signal = Signal::new(vec![0.0, 1.0], 1000.0).unwrap();
    let err = analyze(&signal, Some(f64::NAN), &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DiagnosticError::InvalidSignal(SignalError::InvalidRunningFrequency { .. })
    ));

    let mut config = AnalysisConfig::default();
    config.diagnostics.penalties.bearing = -35.0;
    let err = analyze(&signal, Some(30.0), &config).unwrap_err();
    assert!(err.to_string().contains("penalties.bearing"));
}

#[test]
fn concurrent_callers_with_different_profiles() {
    let sensitive = AnalysisConfig {
        diagnostics: DiagnosticConfig::sensitive(),
        ..Default::default()
    };
    let tolerant = AnalysisConfig {
        diagnostics: DiagnosticConfig::tolerant(),
        ..Default::default()
    };

    // 0.5 at 1× sits between the two profiles' imbalance thresholds
    let synth = SynthConfig {
        base_amplitude: 0.5,
        noise_std: 0.01,
        ..Default::default()
    };
    let signal = generate(&synth, FaultInjection::default())
        .unwrap()
        .to_signal()
        .unwrap();

    let (a, b) = std::thread::scope(|s| {
        let a = s.spawn(|| {
            let mut analyzer = VibrationAnalyzer::new(&sensitive).unwrap();
            analyzer.analyze(&signal, Some(30.0)).unwrap()
        });
        let b = s.spawn(|| {
            let mut analyzer = VibrationAnalyzer::new(&tolerant).unwrap();
            analyzer.analyze(&signal, Some(30.0)).unwrap()
        });
        (a.join().unwrap(), b.join().unwrap())
    });

    assert!(a.detected_faults.contains(&FaultType::Imbalance));
    assert!(!b.detected_faults.contains(&FaultType::Imbalance));
    assert_eq!(a.features, b.features);
}
