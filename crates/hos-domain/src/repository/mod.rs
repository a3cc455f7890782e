//! Repository trait definitions for data persistence
//!
//! The `replace_*` methods swap a record's child collection for a new full
//! set. Implementations must make the swap atomic: a reader sees either the
//! old set or the new one, never a mix.

use crate::model::{DutyPeriod, HosLog, TripRecord, ViolationRecord, Waypoint};
use hos_types::Error;

/// Repository for HOS logs
pub trait HosLogRepository {
    /// Insert or overwrite a log
    fn save(&self, log: &HosLog) -> Result<(), Error>;

    /// Find a log by its ID
    fn find_by_id(&self, id: &str) -> Result<Option<HosLog>, Error>;

    /// Find all logs, newest first
    fn find_all(&self) -> Result<Vec<HosLog>, Error>;

    /// Find logs belonging to a driver
    fn find_by_driver(&self, driver_id: &str) -> Result<Vec<HosLog>, Error>;

    /// Replace every duty period of a log
    fn replace_duty_periods(&self, log_id: &str, periods: Vec<DutyPeriod>) -> Result<(), Error>;

    /// Replace every violation of a log
    fn replace_violations(&self, log_id: &str, violations: Vec<ViolationRecord>) -> Result<(), Error>;
}

/// Repository for trips
pub trait TripRepository {
    /// Insert or overwrite a trip
    fn save(&self, trip: &TripRecord) -> Result<(), Error>;

    /// Find a trip by its ID
    fn find_by_id(&self, id: &str) -> Result<Option<TripRecord>, Error>;

    /// Find all trips, newest first
    fn find_all(&self) -> Result<Vec<TripRecord>, Error>;

    /// Replace every waypoint of a trip
    fn replace_waypoints(&self, trip_id: &str, waypoints: Vec<Waypoint>) -> Result<(), Error>;
}
