//! Route geometry and the external route payload

use serde::{Deserialize, Serialize};

use hos_types::Coordinates;

use super::compliance::Violation;
use super::duty_block::DutyBlock;
use super::waypoint::WaypointType;

/// Approximate route over a sequence of points
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Interpolated points for drawing only
    pub path: Vec<Coordinates>,
    pub distance_miles: f64,
    pub duration_hours: f64,
}

/// Route calculation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePayload {
    pub route: RouteDetails,
    pub hos_schedule: Vec<DutyBlock>,
    pub compliance_warnings: Vec<Violation>,
}

impl RoutePayload {
    /// Fill the schedule and warning sections left empty by assembly
    pub fn with_compliance(mut self, schedule: Vec<DutyBlock>, warnings: Vec<Violation>) -> Self {
        self.hos_schedule = schedule;
        self.compliance_warnings = warnings;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDetails {
    pub coordinates: Vec<[f64; 2]>,
    pub distance: f64,
    pub duration: f64,
    pub waypoints: Vec<RouteWaypointPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteWaypointPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub waypoint_type: WaypointType,
    pub location: Coordinates,
    pub coordinates: [f64; 2],
    pub estimated_arrival: String,
    pub duration_minutes: u32,
    pub description: String,
    pub is_mandatory: bool,
}
