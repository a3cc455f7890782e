//! Domain model types

pub mod compliance;
pub mod duty_block;
pub mod duty_period;
pub mod hos_log;
pub mod route;
pub mod trip;
pub mod waypoint;

pub use compliance::{ComplianceLimits, ComplianceStatus, Severity, Violation, ViolationType};
pub use duty_block::DutyBlock;
pub use duty_period::{parse_instant, DutyPeriod, DutyStatus};
pub use hos_log::{HosLog, ViolationRecord};
pub use route::{RouteDetails, RoutePayload, RouteSummary, RouteWaypointPayload};
pub use trip::{TripLocation, TripRecord, TripStatus};
pub use waypoint::{HosBaseline, Waypoint, WaypointCompliance, WaypointType};
