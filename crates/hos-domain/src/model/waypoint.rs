//! Route waypoint types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use hos_types::Coordinates;

use super::compliance::ComplianceStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointType {
    Origin,
    Pickup,
    FuelStop,
    RestBreak,
    MandatoryBreak,
    Dropoff,
}

impl WaypointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaypointType::Origin => "origin",
            WaypointType::Pickup => "pickup",
            WaypointType::FuelStop => "fuel_stop",
            WaypointType::RestBreak => "rest_break",
            WaypointType::MandatoryBreak => "mandatory_break",
            WaypointType::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for WaypointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointCompliance {
    Safe,
    Violation,
}

/// A planned stop along a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub coordinates: Coordinates,
    #[serde(rename = "type")]
    pub waypoint_type: WaypointType,
    pub address: String,
    pub eta: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_window: Option<String>,
    pub compliance_status: WaypointCompliance,
    /// Planned dwell at the stop
    #[serde(default)]
    pub duration_minutes: u32,
}

impl Waypoint {
    pub fn is_mandatory(&self) -> bool {
        matches!(
            self.waypoint_type,
            WaypointType::RestBreak | WaypointType::MandatoryBreak
        )
    }
}

/// Driver state the route starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HosBaseline {
    pub driving_hours_used: f64,
    pub can_continue_driving: bool,
}

impl Default for HosBaseline {
    fn default() -> Self {
        Self {
            driving_hours_used: 0.0,
            can_continue_driving: true,
        }
    }
}

impl From<&ComplianceStatus> for HosBaseline {
    fn from(status: &ComplianceStatus) -> Self {
        Self {
            driving_hours_used: status.driving_hours_used,
            can_continue_driving: status.can_continue_driving,
        }
    }
}
