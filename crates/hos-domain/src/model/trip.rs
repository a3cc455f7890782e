use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hos_types::Coordinates;

use super::waypoint::Waypoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TripLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: String,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub current_cycle_hours: f64,
    #[serde(default)]
    pub current_location: TripLocation,
    #[serde(default)]
    pub pickup_location: TripLocation,
    #[serde(default)]
    pub dropoff_location: TripLocation,
    #[serde(default)]
    pub commodity: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    pub created_at: DateTime<Utc>,
}

impl TripRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            driver_id: None,
            vehicle_id: None,
            status: TripStatus::Planned,
            current_cycle_hours: 0.0,
            current_location: TripLocation::default(),
            pickup_location: TripLocation::default(),
            dropoff_location: TripLocation::default(),
            commodity: None,
            waypoints: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
