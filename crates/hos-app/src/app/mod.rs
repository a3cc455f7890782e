//! Application services
//!
//! Use cases that load records from the store, run the HOS rules over them
//! and write the replacement sets back.

mod error;
mod log_service;
mod report_service;
mod trip_service;

pub use error::PlanningError;
pub use log_service::{validate_driving_hours, HosLogService, NewLog, MAX_SCHEDULE_DRIVING_HOURS};
pub use report_service::{ComplianceReportService, DriverLogSummary};
pub use trip_service::{
    compute_route_plan, resolve_location, LocationInput, NewTrip, RouteRequest, TripRoutePlan,
    TripService,
};
