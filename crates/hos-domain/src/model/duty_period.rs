//! Duty period records as supplied by log retrieval

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use hos_types::Error;

/// Driver duty status (FMCSA record-of-duty-status lines)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DutyStatus {
    Driving,
    OnDuty,
    OffDuty,
    SleeperBerth,
}

impl DutyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "driving",
            DutyStatus::OnDuty => "on_duty",
            DutyStatus::OffDuty => "off_duty",
            DutyStatus::SleeperBerth => "sleeper_berth",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDuty => "On Duty",
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
        }
    }

    /// Off duty and sleeper berth both count as rest
    pub fn is_rest(&self) -> bool {
        matches!(self, DutyStatus::OffDuty | DutyStatus::SleeperBerth)
    }
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" => Ok(DutyStatus::Driving),
            "on_duty" => Ok(DutyStatus::OnDuty),
            "off_duty" => Ok(DutyStatus::OffDuty),
            "sleeper_berth" => Ok(DutyStatus::SleeperBerth),
            other => Err(Error::InvalidInput(format!("unknown duty status: {}", other))),
        }
    }
}

/// A single duty period.
///
/// Timestamps stay as text: rows come from external storage and a row whose
/// timestamps do not parse is skipped by accumulation rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyPeriod {
    pub status: DutyStatus,
    pub start_time: String,
    /// None while the period is still open
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DutyPeriod {
    pub fn new(status: DutyStatus, start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            status,
            start_time: start_time.into(),
            end_time: Some(end_time.into()),
            notes: None,
        }
    }

    /// Start and end instants, if both are present and parse
    pub fn closed_interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_instant(&self.start_time)?;
        let end = parse_instant(self.end_time.as_deref()?)?;
        Some((start, end))
    }

    /// Length in hours. Negative when the timestamps are inverted.
    pub fn duration_hours(&self) -> Option<f64> {
        let (start, end) = self.closed_interval()?;
        Some((end - start).num_milliseconds() as f64 / 3_600_000.0)
    }
}

/// Parse an ISO-8601 instant.
///
/// Offset-bearing values are converted to UTC; naive values are taken as UTC.
/// A bare date means midnight.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in naive_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}
