//! Fleet compliance summary across HOS logs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{HosLog, Severity, ViolationType};

/// Aggregated violation counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetComplianceSummary {
    pub total_logs: usize,
    /// Logs holding at least one violation-severity record
    pub logs_in_violation: usize,
    pub total_violations: usize,
    pub total_warnings: usize,
    pub violations_by_type: BTreeMap<ViolationType, usize>,
    pub violations_by_driver: BTreeMap<String, usize>,
}

/// Count stored violation records across logs. Resolved records are ignored.
pub fn summarize_logs(logs: &[HosLog]) -> FleetComplianceSummary {
    let mut summary = FleetComplianceSummary {
        total_logs: logs.len(),
        ..Default::default()
    };

    for log in logs {
        let mut in_violation = false;
        for record in log.violations.iter().filter(|r| !r.resolved) {
            *summary
                .violations_by_type
                .entry(record.violation.violation_type)
                .or_insert(0) += 1;
            match record.violation.severity {
                Severity::Violation => {
                    summary.total_violations += 1;
                    in_violation = true;
                    *summary
                        .violations_by_driver
                        .entry(log.driver_id.clone())
                        .or_insert(0) += 1;
                }
                Severity::Warning => summary.total_warnings += 1,
            }
        }
        if in_violation {
            summary.logs_in_violation += 1;
        }
    }

    summary
}

pub fn generate_compliance_report(summary: &FleetComplianceSummary) -> String {
    let mut report = String::new();

    report.push_str("==================================================\n");
    report.push_str("            HOS Fleet Compliance Report            \n");
    report.push_str("==================================================\n\n");

    report.push_str("[Summary]\n");
    report.push_str(&format!("  Logs checked:        {}\n", summary.total_logs));
    report.push_str(&format!("  Logs in violation:   {}\n", summary.logs_in_violation));
    report.push_str(&format!("  Violations:          {}\n", summary.total_violations));
    report.push_str(&format!("  Warnings:            {}\n", summary.total_warnings));
    if summary.total_logs > 0 {
        let rate = (summary.logs_in_violation as f64 / summary.total_logs as f64) * 100.0;
        report.push_str(&format!("  Violation rate:      {:.1}%\n", rate));
    }
    report.push('\n');

    if summary.violations_by_type.is_empty() {
        report.push_str("[No Violations or Warnings]\n");
        report.push_str("  All logs are within HOS limits.\n\n");
    } else {
        report.push_str("[By Type]\n");
        report.push_str("-".repeat(40).as_str());
        report.push('\n');
        for (violation_type, count) in &summary.violations_by_type {
            report.push_str(&format!("  {:<28} {:>6}\n", violation_type.as_str(), count));
        }
        report.push('\n');
    }

    if !summary.violations_by_driver.is_empty() {
        report.push_str("[Drivers In Violation]\n");
        report.push_str("-".repeat(40).as_str());
        report.push('\n');
        for (driver, count) in &summary.violations_by_driver {
            report.push_str(&format!("  {:<28} {:>6}\n", truncate_str(driver, 27), count));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Violation, ViolationRecord};
    use chrono::Utc;

    fn record(violation_type: ViolationType, severity: Severity) -> ViolationRecord {
        ViolationRecord::new(
            Violation {
                violation_type,
                severity,
                description: String::new(),
            },
            Utc::now(),
        )
    }

    fn logs() -> Vec<HosLog> {
        let mut clean = HosLog::new("log-1", "driver-a");
        clean.violations = vec![record(ViolationType::ApproachingDriveLimit, Severity::Warning)];

        let mut bad = HosLog::new("log-2", "driver-b");
        bad.violations = vec![
            record(ViolationType::DailyDriveLimit, Severity::Violation),
            record(ViolationType::CycleLimit, Severity::Violation),
        ];

        let mut resolved = HosLog::new("log-3", "driver-c");
        let mut old = record(ViolationType::DailyOnDutyLimit, Severity::Violation);
        old.resolved = true;
        resolved.violations = vec![old];

        vec![clean, bad, resolved]
    }

    #[test]
    fn test_summarize_logs() {
        let summary = summarize_logs(&logs());
        assert_eq!(summary.total_logs, 3);
        assert_eq!(summary.logs_in_violation, 1);
        assert_eq!(summary.total_violations, 2);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(summary.violations_by_type.get(&ViolationType::DailyDriveLimit), Some(&1));
        assert_eq!(summary.violations_by_type.get(&ViolationType::DailyOnDutyLimit), None);
        assert_eq!(summary.violations_by_driver.get("driver-b"), Some(&2));
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_logs(&[]);
        assert_eq!(summary, FleetComplianceSummary::default());
        let report = generate_compliance_report(&summary);
        assert!(report.contains("All logs are within HOS limits."));
        assert!(!report.contains("Violation rate"));
    }

    #[test]
    fn test_generate_report() {
        let report = generate_compliance_report(&summarize_logs(&logs()));
        assert!(report.contains("HOS Fleet Compliance Report"));
        assert!(report.contains("daily_drive_limit"));
        assert!(report.contains("driver-b"));
        assert!(report.contains("33.3%"));
    }
}
