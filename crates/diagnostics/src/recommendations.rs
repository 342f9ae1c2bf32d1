//! Maintenance recommendations

use crate::rules::{FaultDetection, FaultType};
use crate::scoring::HealthStatus;

fn fault_advice(fault: FaultType) -> &'static [&'static str] {
    match fault {
        FaultType::Bearing => &[
            "Bearing fault indicators present",
            "Inspect bearings for wear or damage",
            "Consider bearing replacement soon",
        ],
        FaultType::Misalignment => &[
            "Misalignment detected: check shaft alignment",
            "Verify coupling and bearing alignment",
        ],
        FaultType::Imbalance => &[
            "Imbalance detected: check rotor balance",
            "Inspect for uneven mass distribution",
        ],
        FaultType::Normal => &[],
    }
}

/// Advisory strings for a diagnosis, in fault-priority order, without
/// duplicates
pub fn recommendations(detections: &[FaultDetection], status: HealthStatus) -> Vec<String> {
    let mut advice: Vec<&'static str> = Vec::new();
    let mut push = |line: &'static str| {
        if !advice.contains(&line) {
            advice.push(line);
        }
    };

    if detections.is_empty() {
        match status {
            HealthStatus::Healthy | HealthStatus::Acceptable => {
                push("Machine operating normally");
                push("Continue routine monitoring");
            }
            HealthStatus::Warning | HealthStatus::Critical => {
                push("No specific fault signature matched: investigate overall vibration level");
            }
        }
    }

    for fault in FaultType::BY_PRIORITY {
        if detections.iter().any(|d| d.fault == fault) {
            fault_advice(fault).iter().copied().for_each(&mut push);
        }
    }

    if detections.len() > 1 {
        push("Multiple fault indicators: priority inspection needed");
    }

    match status {
        HealthStatus::Critical => push("CRITICAL: schedule immediate maintenance"),
        HealthStatus::Warning => push("Plan maintenance within the next scheduled window"),
        HealthStatus::Healthy | HealthStatus::Acceptable => {}
    }

    advice.into_iter().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(fault: FaultType) -> FaultDetection {
        FaultDetection {
            fault,
            severity: 1.0,
        }
    }

    #[test]
    fn test_normal_machine() {
        let advice = recommendations(&[], HealthStatus::Healthy);
        assert_eq!(
            advice,
            vec!["Machine operating normally", "Continue routine monitoring"]
        );
    }

    #[test]
    fn test_fault_priority_order() {
        // Input order must not matter
        let advice = recommendations(
            &[detection(FaultType::Imbalance), detection(FaultType::Bearing)],
            HealthStatus::Critical,
        );
        assert_eq!(advice[0], "Bearing fault indicators present");
        assert!(
            advice.iter().position(|a| a.starts_with("Bearing"))
                < advice.iter().position(|a| a.starts_with("Imbalance"))
        );
        assert!(advice
            .iter()
            .any(|line| line == "Multiple fault indicators: priority inspection needed"));
        assert_eq!(advice.last().unwrap(), "CRITICAL: schedule immediate maintenance");
    }

    #[test]
    fn test_no_duplicates() {
        let advice = recommendations(
            &[
                detection(FaultType::Misalignment),
                detection(FaultType::Misalignment),
            ],
            HealthStatus::Warning,
        );
        let mut unique = advice.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), advice.len());
    }

    #[test]
    fn test_low_score_without_fault() {
        let advice = recommendations(&[], HealthStatus::Critical);
        assert!(!advice.iter().any(|a| a == "Machine operating normally"));
        assert!(advice.iter().any(|a| a.starts_with("CRITICAL")));
    }
}
