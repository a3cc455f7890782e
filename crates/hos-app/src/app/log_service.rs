//! HOS log use cases: create, record duty periods, check, schedule

use chrono::Utc;

use hos_domain::model::{ComplianceLimits, ComplianceStatus, DutyBlock, DutyPeriod, HosLog, ViolationRecord};
use hos_domain::repository::HosLogRepository;
use hos_domain::service::{evaluate_compliance, generate_schedule};

use super::error::PlanningError;

/// Fields for a new log
#[derive(Debug, Clone, Default)]
pub struct NewLog {
    pub driver_id: String,
    pub trip_id: Option<String>,
    pub cycle_hours_used: f64,
    pub time_zone: Option<String>,
    pub shipping_document: Option<String>,
    pub commodity: Option<String>,
}

/// Largest driving total a schedule is generated for: ten 70-hour cycles
pub const MAX_SCHEDULE_DRIVING_HOURS: f64 = 700.0;

/// Accept a schedule's driving total only when it is finite, positive and
/// within `MAX_SCHEDULE_DRIVING_HOURS`.
pub fn validate_driving_hours(hours: f64) -> Result<f64, PlanningError> {
    if hours.is_finite() && hours > 0.0 && hours <= MAX_SCHEDULE_DRIVING_HOURS {
        Ok(hours)
    } else {
        Err(PlanningError::Validation(format!(
            "total_driving_hours must be greater than 0 and at most {}, got {}",
            MAX_SCHEDULE_DRIVING_HOURS, hours
        )))
    }
}

pub struct HosLogService<R: HosLogRepository> {
    repo: R,
    limits: ComplianceLimits,
}

impl<R: HosLogRepository> HosLogService<R> {
    pub fn new(repo: R, limits: ComplianceLimits) -> Self {
        Self { repo, limits }
    }

    pub fn create_log(&self, new_log: NewLog) -> Result<HosLog, PlanningError> {
        if new_log.driver_id.trim().is_empty() {
            return Err(PlanningError::Validation("driver_id required".to_string()));
        }
        if !new_log.cycle_hours_used.is_finite() || new_log.cycle_hours_used < 0.0 {
            return Err(PlanningError::Validation(format!(
                "cycle_hours_used must be a non-negative number, got {}",
                new_log.cycle_hours_used
            )));
        }

        let mut log = HosLog::new(uuid::Uuid::new_v4().to_string(), new_log.driver_id);
        log.trip_id = new_log.trip_id;
        log.cycle_hours_used = new_log.cycle_hours_used;
        if let Some(tz) = new_log.time_zone {
            log.time_zone = tz;
        }
        log.shipping_document = new_log.shipping_document;
        log.commodity = new_log.commodity;

        self.repo.save(&log)?;
        tracing::info!(log_id = %log.id, driver_id = %log.driver_id, "HOS log created");
        Ok(log)
    }

    pub fn get_log(&self, log_id: &str) -> Result<HosLog, PlanningError> {
        self.repo
            .find_by_id(log_id)?
            .ok_or_else(|| PlanningError::LogNotFound(log_id.to_string()))
    }

    /// All logs, or one driver's logs, newest first
    pub fn list_logs(&self, driver_id: Option<&str>) -> Result<Vec<HosLog>, PlanningError> {
        let logs = match driver_id {
            Some(driver) => self.repo.find_by_driver(driver)?,
            None => self.repo.find_all()?,
        };
        Ok(logs)
    }

    /// Append periods to a log, or replace the existing set when `replace` is set
    pub fn record_periods(
        &self,
        log_id: &str,
        periods: Vec<DutyPeriod>,
        replace: bool,
    ) -> Result<HosLog, PlanningError> {
        let log = self.get_log(log_id)?;
        let next = if replace {
            periods
        } else {
            let mut all = log.duty_periods;
            all.extend(periods);
            all
        };
        self.repo.replace_duty_periods(log_id, next)?;
        self.get_log(log_id)
    }

    /// Evaluate a log's duty periods and replace its violation records with
    /// the result.
    pub fn check_log(&self, log_id: &str) -> Result<ComplianceStatus, PlanningError> {
        let log = self.get_log(log_id)?;
        let status = evaluate_compliance(&log.duty_periods, log.cycle_hours_used, &self.limits);

        let now = Utc::now();
        let records = status
            .violations
            .iter()
            .cloned()
            .map(|v| ViolationRecord::new(v, now))
            .collect();
        self.repo.replace_violations(log_id, records)?;

        tracing::info!(
            log_id,
            violations = status.violations.len(),
            can_continue = status.can_continue_driving,
            "log checked"
        );
        Ok(status)
    }

    /// Generate a schedule and store it as the log's duty periods
    pub fn schedule_log(
        &self,
        log_id: &str,
        start_time: Option<&str>,
        total_driving_hours: Option<f64>,
    ) -> Result<Vec<DutyBlock>, PlanningError> {
        let log = self.get_log(log_id)?;

        let start_time = start_time.map(str::trim).filter(|s| !s.is_empty());
        let (start_time, hours) = match (start_time, total_driving_hours) {
            (Some(start), Some(hours)) => (start, validate_driving_hours(hours)?),
            _ => {
                return Err(PlanningError::Validation(
                    "start_time and total_driving_hours required".to_string(),
                ))
            }
        };

        let schedule = generate_schedule(start_time, hours, log.cycle_hours_used);
        let periods = schedule.iter().map(DutyPeriod::from).collect();
        self.repo.replace_duty_periods(log_id, periods)?;

        tracing::info!(log_id, blocks = schedule.len(), "schedule stored");
        Ok(schedule)
    }
}
