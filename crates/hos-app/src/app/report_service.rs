//! Fleet and driver compliance reports over stored logs

use chrono::{DateTime, Utc};
use serde::Serialize;

use hos_domain::model::{HosLog, Severity};
use hos_domain::repository::HosLogRepository;
use hos_domain::service::{generate_compliance_report, summarize_logs, FleetComplianceSummary};

use super::error::PlanningError;

/// One row of a driver's compliance history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverLogSummary {
    pub log_id: String,
    pub driver_id: String,
    pub created_at: DateTime<Utc>,
    pub duty_periods: usize,
    pub open_violations: usize,
    pub open_warnings: usize,
}

impl From<&HosLog> for DriverLogSummary {
    fn from(log: &HosLog) -> Self {
        let open = || log.violations.iter().filter(|r| !r.resolved);
        Self {
            log_id: log.id.clone(),
            driver_id: log.driver_id.clone(),
            created_at: log.created_at,
            duty_periods: log.duty_periods.len(),
            open_violations: open()
                .filter(|r| r.violation.severity == Severity::Violation)
                .count(),
            open_warnings: open()
                .filter(|r| r.violation.severity == Severity::Warning)
                .count(),
        }
    }
}

pub struct ComplianceReportService<R: HosLogRepository> {
    repo: R,
}

impl<R: HosLogRepository> ComplianceReportService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Summary over all logs, or over one driver's logs
    pub fn fleet_summary(&self, driver_id: Option<&str>) -> Result<FleetComplianceSummary, PlanningError> {
        let logs = match driver_id {
            Some(driver) => self.repo.find_by_driver(driver)?,
            None => self.repo.find_all()?,
        };
        let summary = summarize_logs(&logs);
        tracing::debug!(
            logs = summary.total_logs,
            violations = summary.total_violations,
            "fleet summary computed"
        );
        Ok(summary)
    }

    pub fn fleet_report(&self, driver_id: Option<&str>) -> Result<String, PlanningError> {
        Ok(generate_compliance_report(&self.fleet_summary(driver_id)?))
    }

    /// Per-log rows for one driver, newest first
    pub fn driver_history(&self, driver_id: &str) -> Result<Vec<DriverLogSummary>, PlanningError> {
        let logs = self.repo.find_by_driver(driver_id)?;
        Ok(logs.iter().map(DriverLogSummary::from).collect())
    }
}
