//! Compliance limits, status snapshot and violation types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulatory thresholds, all in hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceLimits {
    pub max_driving_hours: f64,
    pub max_on_duty_hours: f64,
    pub max_cycle_hours: f64,
    pub required_rest_break: f64,
    /// Part of the limits contract; evaluation does not consult it yet
    pub required_off_duty: f64,
}

impl Default for ComplianceLimits {
    fn default() -> Self {
        Self {
            max_driving_hours: 11.0,
            max_on_duty_hours: 14.0,
            max_cycle_hours: 70.0,
            required_rest_break: 0.5,
            required_off_duty: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    DailyDriveLimit,
    ApproachingDriveLimit,
    DailyOnDutyLimit,
    ApproachingOnDutyLimit,
    CycleLimit,
    ApproachingCycleLimit,
}

impl ViolationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationType::DailyDriveLimit => "daily_drive_limit",
            ViolationType::ApproachingDriveLimit => "approaching_drive_limit",
            ViolationType::DailyOnDutyLimit => "daily_on_duty_limit",
            ViolationType::ApproachingOnDutyLimit => "approaching_on_duty_limit",
            ViolationType::CycleLimit => "cycle_limit",
            ViolationType::ApproachingCycleLimit => "approaching_cycle_limit",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Violation,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Violation => write!(f, "violation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    pub severity: Severity,
    pub description: String,
}

impl Violation {
    pub fn is_violation(&self) -> bool {
        self.severity == Severity::Violation
    }
}

/// Snapshot produced by one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    pub driving_hours_used: f64,
    pub on_duty_hours_used: f64,
    pub cycle_hours_used: f64,
    pub hours_until_break: f64,
    pub hours_until_off_duty: f64,
    pub violations: Vec<Violation>,
    pub can_continue_driving: bool,
}

impl ComplianceStatus {
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }
}
