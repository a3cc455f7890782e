//! Daily HOS log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::compliance::Violation;
use super::duty_period::DutyPeriod;

/// A driver's HOS log with its duty periods and last computed violations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HosLog {
    pub id: String,
    pub driver_id: String,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default)]
    pub shipping_document: Option<String>,
    #[serde(default)]
    pub commodity: Option<String>,
    /// Hours already used in the rolling cycle before this log
    #[serde(default)]
    pub cycle_hours_used: f64,
    #[serde(default)]
    pub duty_periods: Vec<DutyPeriod>,
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
    pub created_at: DateTime<Utc>,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

impl HosLog {
    pub fn new(id: impl Into<String>, driver_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            driver_id: driver_id.into(),
            trip_id: None,
            time_zone: default_time_zone(),
            shipping_document: None,
            commodity: None,
            cycle_hours_used: 0.0,
            duty_periods: Vec::new(),
            violations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_violations(&self) -> bool {
        self.violations.iter().any(|r| r.violation.is_violation())
    }
}

/// A persisted violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationRecord {
    #[serde(flatten)]
    pub violation: Violation,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub resolved: bool,
}

impl ViolationRecord {
    pub fn new(violation: Violation, timestamp: DateTime<Utc>) -> Self {
        Self {
            violation,
            timestamp,
            resolved: false,
        }
    }
}
