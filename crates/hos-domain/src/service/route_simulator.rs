//! Straight-line route approximation and HOS-aware stop placement
//!
//! Distance and duration use great-circle legs. The drawn path is a linear
//! lat/lon interpolation and never feeds back into distance math.

use chrono::{DateTime, Duration, Utc};

use hos_types::Coordinates;

use crate::model::{HosBaseline, RouteSummary, Waypoint, WaypointCompliance, WaypointType};

pub const EARTH_RADIUS_MILES: f64 = 3959.0;
pub const AVG_SPEED_MPH: f64 = 55.0;
pub const FUEL_INTERVAL_MILES: f64 = 400.0;
pub const MAX_DRIVE_BEFORE_BREAK_HOURS: f64 = 8.0;
/// One path step per this many miles of leg
pub const PATH_STEP_MILES: f64 = 50.0;

pub const PICKUP_SERVICE_MINUTES: u32 = 60;
pub const DROPOFF_SERVICE_MINUTES: u32 = 60;
pub const FUEL_STOP_MINUTES: u32 = 15;
pub const REST_BREAK_MINUTES: u32 = 30;

const DISTANCE_EPSILON: f64 = 1e-6;
const FUEL_TOLERANCE_MILES: f64 = 1e-3;
const BREAK_TOLERANCE_HOURS: f64 = 1e-9;
const MIN_LAST_LEG_MILES: f64 = 0.001;

/// Great-circle distance in miles
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lon.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lon.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let hav = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * hav.sqrt().atan2((1.0 - hav).sqrt());
    EARTH_RADIUS_MILES * c
}

/// Linear interpolation in lat/lon space
fn interpolate(from: Coordinates, to: Coordinates, ratio: f64) -> Coordinates {
    Coordinates {
        lat: from.lat + (to.lat - from.lat) * ratio,
        lon: from.lon + (to.lon - from.lon) * ratio,
    }
}

fn hours(h: f64) -> Duration {
    Duration::microseconds((h * 3_600_000_000.0).round() as i64)
}

/// Sum distance and duration leg by leg and build a drawable path.
///
/// Each leg contributes `max(2, floor(miles / 50))` steps, both endpoints
/// included, so shared points between legs appear twice.
pub fn simulate_route(points: &[Coordinates]) -> RouteSummary {
    let mut summary = RouteSummary::default();

    for leg in points.windows(2) {
        let (start, end) = (leg[0], leg[1]);
        let leg_miles = haversine_miles(start, end);
        summary.distance_miles += leg_miles;
        summary.duration_hours += leg_miles / AVG_SPEED_MPH;

        let steps = ((leg_miles / PATH_STEP_MILES).floor() as usize).max(2);
        summary
            .path
            .extend((0..=steps).map(|step| interpolate(start, end, step as f64 / steps as f64)));
    }

    summary
}

/// Place origin, pickup, fuel stops, rest breaks and dropoff along the trip.
///
/// Origin to pickup is one direct leg followed by an hour of service. The
/// pickup to dropoff leg is walked in chunks bounded by the next 8-hour
/// driving break, the next 400-mile fuel checkpoint and the remaining
/// distance. Driving time before the first break is seeded from the
/// baseline. `_route_distance` is accepted for callers that already hold
/// the summed route distance; stop placement measures its own leg.
pub fn generate_waypoints(
    origin: Coordinates,
    pickup: Coordinates,
    dropoff: Coordinates,
    baseline: &HosBaseline,
    _route_distance: f64,
    departure: DateTime<Utc>,
) -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    let mut eta = departure;

    waypoints.push(Waypoint {
        coordinates: origin,
        waypoint_type: WaypointType::Origin,
        address: "Starting location".to_string(),
        eta,
        reason: None,
        service_window: None,
        compliance_status: WaypointCompliance::Safe,
        duration_minutes: 0,
    });

    eta += hours(haversine_miles(origin, pickup) / AVG_SPEED_MPH);
    waypoints.push(Waypoint {
        coordinates: pickup,
        waypoint_type: WaypointType::Pickup,
        address: "Pickup location".to_string(),
        eta,
        reason: None,
        service_window: Some("1 hour".to_string()),
        compliance_status: WaypointCompliance::Safe,
        duration_minutes: PICKUP_SERVICE_MINUTES,
    });
    eta += Duration::minutes(PICKUP_SERVICE_MINUTES as i64);

    let leg_distance = haversine_miles(pickup, dropoff);
    let mut distance_covered = 0.0;
    let mut driving_since_break = baseline.driving_hours_used;
    let mut next_fuel_at = FUEL_INTERVAL_MILES;

    while distance_covered < leg_distance - DISTANCE_EPSILON {
        let remaining = leg_distance - distance_covered;
        let miles_until_break =
            (MAX_DRIVE_BEFORE_BREAK_HOURS - driving_since_break).max(0.0) * AVG_SPEED_MPH;
        // A break already due does not shorten the chunk; it is taken at its end.
        let mut chunk = if miles_until_break > 0.0 {
            remaining.min(miles_until_break)
        } else {
            remaining
        };
        let miles_to_fuel = next_fuel_at - distance_covered;
        if miles_to_fuel > 0.0 && miles_to_fuel < chunk {
            chunk = miles_to_fuel;
        }
        if chunk <= DISTANCE_EPSILON {
            break;
        }

        distance_covered += chunk;
        let position = interpolate(pickup, dropoff, (distance_covered / leg_distance).min(1.0));
        eta += hours(chunk / AVG_SPEED_MPH);
        driving_since_break += chunk / AVG_SPEED_MPH;

        if distance_covered > next_fuel_at - FUEL_TOLERANCE_MILES {
            waypoints.push(Waypoint {
                coordinates: position,
                waypoint_type: WaypointType::FuelStop,
                address: "Fuel stop".to_string(),
                eta,
                reason: Some("Recommended fuel stop".to_string()),
                service_window: None,
                compliance_status: WaypointCompliance::Safe,
                duration_minutes: FUEL_STOP_MINUTES,
            });
            eta += Duration::minutes(FUEL_STOP_MINUTES as i64);
            next_fuel_at += FUEL_INTERVAL_MILES;
        }

        // The baseline is counted again on top of the running total, which
        // pulls every break after the first one forward by the same amount.
        let break_due = driving_since_break >= MAX_DRIVE_BEFORE_BREAK_HOURS - BREAK_TOLERANCE_HOURS
            || baseline.driving_hours_used + driving_since_break
                >= MAX_DRIVE_BEFORE_BREAK_HOURS - BREAK_TOLERANCE_HOURS;
        if break_due {
            waypoints.push(Waypoint {
                coordinates: position,
                waypoint_type: WaypointType::RestBreak,
                address: "Required rest break".to_string(),
                eta,
                reason: Some("HOS 8-hour driving limit".to_string()),
                service_window: None,
                compliance_status: WaypointCompliance::Safe,
                duration_minutes: REST_BREAK_MINUTES,
            });
            eta += Duration::minutes(REST_BREAK_MINUTES as i64);
            driving_since_break = 0.0;
        }
    }

    let reached = if leg_distance > 0.0 {
        interpolate(pickup, dropoff, (distance_covered / leg_distance).min(1.0))
    } else {
        pickup
    };
    let last_leg = haversine_miles(reached, dropoff);
    if last_leg > MIN_LAST_LEG_MILES {
        eta += hours(last_leg / AVG_SPEED_MPH);
    }

    waypoints.push(Waypoint {
        coordinates: dropoff,
        waypoint_type: WaypointType::Dropoff,
        address: "Drop-off location".to_string(),
        eta,
        reason: None,
        service_window: Some("1 hour".to_string()),
        compliance_status: if baseline.can_continue_driving {
            WaypointCompliance::Safe
        } else {
            WaypointCompliance::Violation
        },
        duration_minutes: DROPOFF_SERVICE_MINUTES,
    });

    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_instant;
    use proptest::prelude::*;

    fn departure() -> DateTime<Utc> {
        parse_instant("2025-09-20T06:00:00").unwrap()
    }

    /// A point `miles` due north of `from`
    fn north_of(from: Coordinates, miles: f64) -> Coordinates {
        Coordinates::new(from.lat + (miles / EARTH_RADIUS_MILES).to_degrees(), from.lon)
    }

    fn count(waypoints: &[Waypoint], kind: WaypointType) -> usize {
        waypoints.iter().filter(|w| w.waypoint_type == kind).count()
    }

    fn chicago() -> Coordinates {
        Coordinates::new(41.8781, -87.6298)
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_miles(chicago(), chicago()), 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Chicago to Indianapolis is roughly 165 miles in a straight line
        let indianapolis = Coordinates::new(39.7684, -86.1581);
        let miles = haversine_miles(chicago(), indianapolis);
        assert!((miles - 165.0).abs() < 5.0, "got {}", miles);
    }

    #[test]
    fn test_simulate_route_totals() {
        let b = north_of(chicago(), 110.0);
        let summary = simulate_route(&[chicago(), b]);
        assert!((summary.distance_miles - 110.0).abs() < 1e-6);
        assert!((summary.duration_hours - 2.0).abs() < 1e-6);
        // floor(110/50) = 2 steps -> 3 points
        assert_eq!(summary.path.len(), 3);
        assert_eq!(summary.path[0], chicago());
    }

    #[test]
    fn test_simulate_route_short_leg_still_two_steps() {
        let b = north_of(chicago(), 5.0);
        let summary = simulate_route(&[chicago(), b]);
        assert_eq!(summary.path.len(), 3);
    }

    #[test]
    fn test_simulate_route_multi_leg_path() {
        let b = north_of(chicago(), 250.0);
        let c = north_of(b, 100.0);
        let summary = simulate_route(&[chicago(), b, c]);
        // 5 steps + 2 steps, both legs include their endpoints
        assert_eq!(summary.path.len(), 6 + 3);
        assert!((summary.distance_miles - 350.0).abs() < 1e-6);
    }

    #[test]
    fn test_simulate_route_degenerate_inputs() {
        assert_eq!(simulate_route(&[]), RouteSummary::default());
        let single = simulate_route(&[chicago()]);
        assert!(single.path.is_empty());
        assert_eq!(single.distance_miles, 0.0);
    }

    #[test]
    fn test_short_trip_has_no_intermediate_stops() {
        let pickup = north_of(chicago(), 20.0);
        let dropoff = north_of(pickup, 300.0);
        let waypoints =
            generate_waypoints(chicago(), pickup, dropoff, &HosBaseline::default(), 320.0, departure());
        let kinds: Vec<WaypointType> = waypoints.iter().map(|w| w.waypoint_type).collect();
        assert_eq!(
            kinds,
            vec![WaypointType::Origin, WaypointType::Pickup, WaypointType::Dropoff]
        );
    }

    #[test]
    fn test_crossing_fuel_interval_adds_one_fuel_stop() {
        let pickup = chicago();
        let dropoff = north_of(pickup, 420.0);
        let waypoints =
            generate_waypoints(chicago(), pickup, dropoff, &HosBaseline::default(), 420.0, departure());
        assert_eq!(count(&waypoints, WaypointType::FuelStop), 1);
        assert_eq!(count(&waypoints, WaypointType::RestBreak), 0);

        let fuel = waypoints
            .iter()
            .find(|w| w.waypoint_type == WaypointType::FuelStop)
            .unwrap();
        let miles_in = haversine_miles(pickup, fuel.coordinates);
        assert!((miles_in - 400.0).abs() < 1.0, "fuel stop at {} miles", miles_in);
    }

    #[test]
    fn test_long_trip_gets_rest_break_after_eight_hours() {
        let pickup = chicago();
        let dropoff = north_of(pickup, 500.0);
        let waypoints =
            generate_waypoints(chicago(), pickup, dropoff, &HosBaseline::default(), 500.0, departure());
        // fuel at 400 mi, break at 440 mi (8h * 55mph)
        let kinds: Vec<WaypointType> = waypoints.iter().map(|w| w.waypoint_type).collect();
        assert_eq!(
            kinds,
            vec![
                WaypointType::Origin,
                WaypointType::Pickup,
                WaypointType::FuelStop,
                WaypointType::RestBreak,
                WaypointType::Dropoff,
            ]
        );
        assert!(waypoints[3].is_mandatory());
        assert!(!waypoints[2].is_mandatory());
    }

    #[test]
    fn test_baseline_hours_bring_break_forward() {
        let pickup = chicago();
        let dropoff = north_of(pickup, 300.0);
        let baseline = HosBaseline {
            driving_hours_used: 6.0,
            can_continue_driving: true,
        };
        let waypoints = generate_waypoints(chicago(), pickup, dropoff, &baseline, 300.0, departure());
        let rest = waypoints
            .iter()
            .find(|w| w.waypoint_type == WaypointType::RestBreak)
            .expect("rest break");
        let miles_in = haversine_miles(pickup, rest.coordinates);
        assert!((miles_in - 110.0).abs() < 1.0, "rest break at {} miles", miles_in);
        // 190 mi after the reset is under 8h alone, but 6h + 3.45h trips the break
        assert_eq!(count(&waypoints, WaypointType::RestBreak), 2);
        let second = waypoints
            .iter()
            .filter(|w| w.waypoint_type == WaypointType::RestBreak)
            .nth(1)
            .expect("second rest break");
        let miles_in = haversine_miles(pickup, second.coordinates);
        assert!((miles_in - 300.0).abs() < 1.0, "second break at {} miles", miles_in);
    }

    #[test]
    fn test_baseline_counts_twice_toward_first_break() {
        // 3h used + 150 mi (2.7h) stays under 8h, yet 3h + 5.7h does not
        let pickup = chicago();
        let dropoff = north_of(pickup, 150.0);
        let baseline = HosBaseline {
            driving_hours_used: 3.0,
            can_continue_driving: true,
        };
        let waypoints = generate_waypoints(chicago(), pickup, dropoff, &baseline, 150.0, departure());
        let kinds: Vec<WaypointType> = waypoints.iter().map(|w| w.waypoint_type).collect();
        assert_eq!(
            kinds,
            vec![
                WaypointType::Origin,
                WaypointType::Pickup,
                WaypointType::RestBreak,
                WaypointType::Dropoff,
            ]
        );
    }

    #[test]
    fn test_zero_baseline_short_leg_has_no_break() {
        let pickup = chicago();
        let dropoff = north_of(pickup, 150.0);
        let waypoints =
            generate_waypoints(chicago(), pickup, dropoff, &HosBaseline::default(), 150.0, departure());
        assert_eq!(count(&waypoints, WaypointType::RestBreak), 0);
    }

    #[test]
    fn test_eta_accounts_for_service_and_dwell() {
        let pickup = north_of(chicago(), 55.0);
        let dropoff = north_of(pickup, 110.0);
        let waypoints =
            generate_waypoints(chicago(), pickup, dropoff, &HosBaseline::default(), 165.0, departure());
        let pickup_eta = waypoints[1].eta - departure();
        assert!((pickup_eta.num_seconds() - 3600).abs() <= 1);
        // 1h to pickup + 1h service + 2h driving
        let dropoff_eta = waypoints.last().unwrap().eta - departure();
        assert!((dropoff_eta.num_seconds() - 4 * 3600).abs() <= 1);
    }

    #[test]
    fn test_dropoff_flags_violation_when_driver_cannot_continue() {
        let pickup = north_of(chicago(), 10.0);
        let dropoff = north_of(pickup, 10.0);
        let baseline = HosBaseline {
            driving_hours_used: 0.0,
            can_continue_driving: false,
        };
        let waypoints = generate_waypoints(chicago(), pickup, dropoff, &baseline, 20.0, departure());
        let last = waypoints.last().unwrap();
        assert_eq!(last.waypoint_type, WaypointType::Dropoff);
        assert_eq!(last.compliance_status, WaypointCompliance::Violation);
        assert!(waypoints[..waypoints.len() - 1]
            .iter()
            .all(|w| w.compliance_status == WaypointCompliance::Safe));
    }

    #[test]
    fn test_same_pickup_and_dropoff_terminates() {
        let waypoints =
            generate_waypoints(chicago(), chicago(), chicago(), &HosBaseline::default(), 0.0, departure());
        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[1].eta, departure());
    }

    #[test]
    fn test_exhausted_baseline_breaks_at_end_of_first_chunk() {
        let pickup = chicago();
        let dropoff = north_of(pickup, 100.0);
        let baseline = HosBaseline {
            driving_hours_used: 9.0,
            can_continue_driving: true,
        };
        let waypoints = generate_waypoints(chicago(), pickup, dropoff, &baseline, 100.0, departure());
        assert_eq!(count(&waypoints, WaypointType::RestBreak), 1);
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat1 in -80.0f64..80.0, lon1 in -179.0f64..179.0,
            lat2 in -80.0f64..80.0, lon2 in -179.0f64..179.0,
        ) {
            let a = Coordinates::new(lat1, lon1);
            let b = Coordinates::new(lat2, lon2);
            let forward = simulate_route(&[a, b]).distance_miles;
            let backward = simulate_route(&[b, a]).distance_miles;
            prop_assert!((forward - backward).abs() < 1e-6);
        }

        #[test]
        fn prop_waypoint_etas_never_go_backwards(
            miles in 0.0f64..2000.0,
            used in 0.0f64..10.0,
        ) {
            let pickup = chicago();
            let dropoff = north_of(pickup, miles);
            let baseline = HosBaseline { driving_hours_used: used, can_continue_driving: true };
            let waypoints = generate_waypoints(chicago(), pickup, dropoff, &baseline, miles, departure());
            for pair in waypoints.windows(2) {
                prop_assert!(pair[0].eta <= pair[1].eta);
            }
            prop_assert_eq!(waypoints.first().map(|w| w.waypoint_type), Some(WaypointType::Origin));
            prop_assert_eq!(waypoints.last().map(|w| w.waypoint_type), Some(WaypointType::Dropoff));
        }
    }
}
