//! Trip route planning
//!
//! Resolves the three trip points, simulates the route, places HOS-aware
//! stops and pairs the result with a generated duty schedule.

use std::convert::Infallible;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hos_domain::model::{
    ComplianceLimits, ComplianceStatus, DutyBlock, DutyPeriod, HosBaseline, RoutePayload,
    TripLocation, TripRecord, Waypoint,
};
use hos_domain::repository::TripRepository;
use hos_domain::service::{
    assemble_route_response, default_start, evaluate_compliance, generate_schedule_from,
    generate_waypoints, simulate_route,
};
use hos_domain::Geocoder;
use hos_types::Coordinates;

use super::error::PlanningError;

/// A point given by the caller: coordinates win over the address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub address: Option<String>,
}

impl LocationInput {
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_none() && self.address.as_deref().map_or(true, |a| a.trim().is_empty())
    }
}

/// `"lat,lon"` becomes coordinates; anything else is an address
impl FromStr for LocationInput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<Coordinates>() {
            Ok(coords) => LocationInput {
                coordinates: Some(coords),
                address: None,
            },
            Err(_) => LocationInput {
                coordinates: None,
                address: Some(s.trim().to_string()),
            },
        })
    }
}

impl From<LocationInput> for TripLocation {
    fn from(input: LocationInput) -> Self {
        TripLocation {
            address: input.address,
            coordinates: input.coordinates,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    pub current_location: LocationInput,
    pub pickup: LocationInput,
    pub dropoff: LocationInput,
    /// Driver state at departure; zero hours used when absent
    pub hos_status: Option<HosBaseline>,
}

/// Fields for a new trip
#[derive(Debug, Clone, Default)]
pub struct NewTrip {
    pub driver_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub current_cycle_hours: f64,
    pub current_location: LocationInput,
    pub pickup: LocationInput,
    pub dropoff: LocationInput,
    pub commodity: Option<String>,
}

/// Route plan returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRoutePlan {
    pub route: RoutePayload,
    pub hos_schedule: Vec<DutyBlock>,
    pub hos_status: ComplianceStatus,
}

/// Route, stops and schedule for resolved origin, pickup and dropoff.
///
/// The schedule starts at 06:00 UTC on the departure's day and is evaluated
/// with zero prior cycle hours. The raw waypoints are returned alongside the
/// plan for persistence.
pub fn compute_route_plan(
    points: [Coordinates; 3],
    baseline: &HosBaseline,
    departure: DateTime<Utc>,
    limits: &ComplianceLimits,
) -> (TripRoutePlan, Vec<Waypoint>) {
    let [origin, pickup, dropoff] = points;
    let route = simulate_route(&points);
    let waypoints = generate_waypoints(
        origin,
        pickup,
        dropoff,
        baseline,
        route.distance_miles,
        departure,
    );

    let schedule = generate_schedule_from(
        default_start(departure.date_naive()),
        route.duration_hours,
        0.0,
    );
    let periods: Vec<DutyPeriod> = schedule.iter().map(DutyPeriod::from).collect();
    let status = evaluate_compliance(&periods, 0.0, limits);

    let payload = assemble_route_response(
        &waypoints,
        &route.path,
        route.distance_miles,
        route.duration_hours,
    )
    .with_compliance(schedule.clone(), status.violations.clone());

    let plan = TripRoutePlan {
        route: payload,
        hos_schedule: schedule,
        hos_status: status,
    };
    (plan, waypoints)
}

pub struct TripService<R: TripRepository, G: Geocoder> {
    repo: R,
    geocoder: G,
    limits: ComplianceLimits,
}

impl<R: TripRepository, G: Geocoder> TripService<R, G> {
    pub fn new(repo: R, geocoder: G, limits: ComplianceLimits) -> Self {
        Self {
            repo,
            geocoder,
            limits,
        }
    }

    pub fn create_trip(&self, new_trip: NewTrip) -> Result<TripRecord, PlanningError> {
        if !new_trip.current_cycle_hours.is_finite() || new_trip.current_cycle_hours < 0.0 {
            return Err(PlanningError::Validation(format!(
                "current_cycle_hours must be a non-negative number, got {}",
                new_trip.current_cycle_hours
            )));
        }

        let mut trip = TripRecord::new(uuid::Uuid::new_v4().to_string());
        trip.driver_id = new_trip.driver_id;
        trip.vehicle_id = new_trip.vehicle_id;
        trip.current_cycle_hours = new_trip.current_cycle_hours;
        trip.current_location = new_trip.current_location.into();
        trip.pickup_location = new_trip.pickup.into();
        trip.dropoff_location = new_trip.dropoff.into();
        trip.commodity = new_trip.commodity;

        self.repo.save(&trip)?;
        tracing::info!(trip_id = %trip.id, "trip created");
        Ok(trip)
    }

    pub fn get_trip(&self, trip_id: &str) -> Result<TripRecord, PlanningError> {
        self.repo
            .find_by_id(trip_id)?
            .ok_or_else(|| PlanningError::TripNotFound(trip_id.to_string()))
    }

    pub fn list_trips(&self) -> Result<Vec<TripRecord>, PlanningError> {
        Ok(self.repo.find_all()?)
    }

    /// Plan a trip's route departing now
    pub fn plan_route(&self, trip_id: &str, request: RouteRequest) -> Result<TripRoutePlan, PlanningError> {
        self.plan_route_at(trip_id, request, Utc::now())
    }

    /// Plan a trip's route with an explicit departure instant and replace
    /// the trip's waypoints with the planned set.
    pub fn plan_route_at(
        &self,
        trip_id: &str,
        request: RouteRequest,
        departure: DateTime<Utc>,
    ) -> Result<TripRoutePlan, PlanningError> {
        let trip = self.get_trip(trip_id)?;

        let origin = self.resolve("current_location", &request.current_location, &trip.current_location)?;
        let pickup = self.resolve("pickup_location", &request.pickup, &trip.pickup_location)?;
        let dropoff = self.resolve("dropoff_location", &request.dropoff, &trip.dropoff_location)?;

        let baseline = request.hos_status.unwrap_or_default();
        let (plan, waypoints) =
            compute_route_plan([origin, pickup, dropoff], &baseline, departure, &self.limits);

        self.repo.replace_waypoints(trip_id, waypoints)?;
        tracing::info!(
            trip_id,
            distance_miles = plan.route.route.distance,
            duration_hours = plan.route.route.duration,
            waypoints = plan.route.route.waypoints.len(),
            "route planned"
        );
        Ok(plan)
    }

    fn resolve(
        &self,
        name: &str,
        input: &LocationInput,
        stored: &TripLocation,
    ) -> Result<Coordinates, PlanningError> {
        resolve_location(&self.geocoder, name, input, stored)
    }
}

/// Coordinates, else geocoded address, else what the trip stores.
///
/// `name` labels the point in the `MissingLocation` error.
pub fn resolve_location<G: Geocoder>(
    geocoder: &G,
    name: &str,
    input: &LocationInput,
    stored: &TripLocation,
) -> Result<Coordinates, PlanningError> {
    if let Some(coords) = input.coordinates {
        return Ok(coords);
    }
    if let Some(address) = input.address.as_deref().filter(|a| !a.trim().is_empty()) {
        return Ok(geocoder.geocode(address)?);
    }
    if let Some(coords) = stored.coordinates {
        return Ok(coords);
    }
    if let Some(address) = stored.address.as_deref().filter(|a| !a.trim().is_empty()) {
        return Ok(geocoder.geocode(address)?);
    }
    Err(PlanningError::MissingLocation(name.to_string()))
}
