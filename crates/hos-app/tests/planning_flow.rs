//! End-to-end use cases against a temp store and a stub geocoder

use std::collections::HashMap;
use std::io::Write;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::{tempdir, NamedTempFile};

use hos_app::app::{
    ComplianceReportService, HosLogService, LocationInput, NewLog, NewTrip, PlanningError,
    RouteRequest, TripService,
};
use hos_app::repository::{open_log_repo_at, open_trip_repo_at};
use hos_domain::model::{
    ComplianceLimits, DutyStatus, HosBaseline, WaypointCompliance, WaypointType,
};
use hos_domain::{Geocoder, TripRepository};
use hos_infra::duty_csv::load_duty_periods_from_csv;
use hos_types::{Coordinates, GeocodeError};

struct StubGeocoder {
    known: HashMap<&'static str, Coordinates>,
}

impl StubGeocoder {
    fn new() -> Self {
        let mut known = HashMap::new();
        known.insert("Depot", Coordinates::new(30.0, -90.0));
        known.insert("Warehouse", Coordinates::new(31.0, -90.0));
        known.insert("Store", Coordinates::new(37.0, -90.0));
        Self { known }
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        self.known
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))
    }
}

fn address(a: &str) -> LocationInput {
    LocationInput {
        coordinates: None,
        address: Some(a.to_string()),
    }
}

fn departure() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 20, 8, 0, 0).unwrap()
}

#[test]
fn test_plan_route_from_addresses() {
    let dir = tempdir().unwrap();
    let repo = open_trip_repo_at(dir.path().to_path_buf()).unwrap();
    let service = TripService::new(repo, StubGeocoder::new(), ComplianceLimits::default());

    let trip = service
        .create_trip(NewTrip {
            driver_id: Some("driver-1".to_string()),
            ..Default::default()
        })
        .unwrap();

    let request = RouteRequest {
        current_location: address("Depot"),
        pickup: address("Warehouse"),
        dropoff: address("Store"),
        hos_status: None,
    };
    let plan = service.plan_route_at(&trip.id, request, departure()).unwrap();

    let kinds: Vec<WaypointType> = plan
        .route
        .route
        .waypoints
        .iter()
        .map(|w| w.waypoint_type)
        .collect();
    assert_eq!(
        kinds,
        vec![
            WaypointType::Origin,
            WaypointType::Pickup,
            WaypointType::FuelStop,
            WaypointType::Dropoff
        ]
    );
    assert_eq!(plan.route.route.waypoints[0].id, "1");
    assert!((plan.route.route.distance - 483.68).abs() < 0.1);

    // 06:00 start, pre-trip, 8h leg, break, remainder, post-trip
    assert_eq!(plan.hos_schedule.len(), 5);
    assert_eq!(
        plan.hos_schedule[0].start_time,
        Utc.with_ymd_and_hms(2025, 9, 20, 6, 0, 0).unwrap()
    );
    assert_eq!(plan.hos_schedule[2].status, DutyStatus::OffDuty);
    assert!(plan.hos_status.violations.is_empty());
    assert!(plan.hos_status.can_continue_driving);
    assert_eq!(plan.route.hos_schedule, plan.hos_schedule);

    // Waypoints are persisted on the trip
    let reopened = open_trip_repo_at(dir.path().to_path_buf()).unwrap();
    let stored = reopened.find_by_id(&trip.id).unwrap().unwrap();
    assert_eq!(stored.waypoints.len(), 4);
    assert_eq!(stored.waypoints[0].eta, departure());
}

#[test]
fn test_plan_route_uses_stored_locations_and_baseline() {
    let dir = tempdir().unwrap();
    let repo = open_trip_repo_at(dir.path().to_path_buf()).unwrap();
    let service = TripService::new(repo, StubGeocoder::new(), ComplianceLimits::default());

    let trip = service
        .create_trip(NewTrip {
            current_location: LocationInput {
                coordinates: Some(Coordinates::new(30.0, -90.0)),
                address: None,
            },
            pickup: address("Warehouse"),
            dropoff: LocationInput {
                coordinates: Some(Coordinates::new(31.5, -90.0)),
                address: None,
            },
            ..Default::default()
        })
        .unwrap();

    let request = RouteRequest {
        hos_status: Some(HosBaseline {
            driving_hours_used: 11.5,
            can_continue_driving: false,
        }),
        ..Default::default()
    };
    let plan = service.plan_route_at(&trip.id, request, departure()).unwrap();
    let waypoints = &plan.route.route.waypoints;
    assert_eq!(waypoints.len(), 4);
    assert_eq!(waypoints[2].waypoint_type, WaypointType::RestBreak);
    assert!(waypoints[2].is_mandatory);

    let stored = service.get_trip(&trip.id).unwrap();
    let dropoff = stored.waypoints.last().unwrap();
    assert_eq!(dropoff.compliance_status, WaypointCompliance::Violation);
}

#[test]
fn test_plan_route_errors() {
    let dir = tempdir().unwrap();
    let repo = open_trip_repo_at(dir.path().to_path_buf()).unwrap();
    let service = TripService::new(repo, StubGeocoder::new(), ComplianceLimits::default());
    let trip = service.create_trip(NewTrip::default()).unwrap();

    let unknown = RouteRequest {
        current_location: address("Depot"),
        pickup: address("Nowhere"),
        dropoff: address("Store"),
        hos_status: None,
    };
    assert!(matches!(
        service.plan_route_at(&trip.id, unknown, departure()),
        Err(PlanningError::Geocode(_))
    ));

    let missing = RouteRequest {
        current_location: address("Depot"),
        pickup: address("Warehouse"),
        ..Default::default()
    };
    assert!(matches!(
        service.plan_route_at(&trip.id, missing, departure()),
        Err(PlanningError::MissingLocation(name)) if name == "dropoff_location"
    ));

    assert!(matches!(
        service.plan_route_at("no-such-trip", RouteRequest::default(), departure()),
        Err(PlanningError::TripNotFound(_))
    ));
    assert!(service.get_trip(&trip.id).unwrap().waypoints.is_empty());
}

#[test]
fn test_log_import_check_and_report() {
    let dir = tempdir().unwrap();
    let logs = HosLogService::new(
        open_log_repo_at(dir.path().to_path_buf()).unwrap(),
        ComplianceLimits::default(),
    );

    let log = logs
        .create_log(NewLog {
            driver_id: "driver-7".to_string(),
            cycle_hours_used: 20.0,
            ..Default::default()
        })
        .unwrap();

    let mut csv = NamedTempFile::new().unwrap();
    writeln!(csv, "status,start_time,end_time,notes").unwrap();
    writeln!(csv, "on_duty,2025-09-20T05:30:00,2025-09-20T06:00:00,Pre-trip").unwrap();
    writeln!(csv, "driving,2025-09-20T06:00:00,2025-09-20T14:00:00,").unwrap();
    writeln!(csv, "off_duty,2025-09-20T14:00:00,2025-09-20T14:30:00,Break").unwrap();
    writeln!(csv, "driving,2025-09-20T14:30:00,2025-09-20T18:00:00,").unwrap();
    writeln!(csv, "personal_conveyance,2025-09-20T18:00:00,2025-09-20T19:00:00,").unwrap();
    let periods = load_duty_periods_from_csv(csv.path()).unwrap();
    assert_eq!(periods.len(), 4);

    logs.record_periods(&log.id, periods, false).unwrap();
    let status = logs.check_log(&log.id).unwrap();
    assert!((status.driving_hours_used - 11.5).abs() < 1e-9);
    assert!(!status.can_continue_driving);

    let reports = ComplianceReportService::new(open_log_repo_at(dir.path().to_path_buf()).unwrap());
    let summary = reports.fleet_summary(None).unwrap();
    assert_eq!(summary.total_logs, 1);
    assert_eq!(summary.logs_in_violation, 1);
    assert_eq!(summary.violations_by_driver.get("driver-7"), Some(&1));
    assert!(reports.fleet_report(Some("driver-7")).unwrap().contains("daily_drive_limit"));
}
