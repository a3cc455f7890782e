//! Route response assembly

use chrono::SecondsFormat;

use hos_types::Coordinates;

use crate::model::{RouteDetails, RoutePayload, RouteWaypointPayload, Waypoint};

/// Shape waypoints and path into the route payload.
///
/// Schedule and compliance-warning sections are left empty; see
/// [`RoutePayload::with_compliance`].
pub fn assemble_route_response(
    waypoints: &[Waypoint],
    path: &[Coordinates],
    distance: f64,
    duration: f64,
) -> RoutePayload {
    let waypoints = waypoints
        .iter()
        .enumerate()
        .map(|(i, wp)| RouteWaypointPayload {
            id: (i + 1).to_string(),
            waypoint_type: wp.waypoint_type,
            location: wp.coordinates,
            coordinates: [wp.coordinates.lat, wp.coordinates.lon],
            estimated_arrival: wp.eta.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            duration_minutes: wp.duration_minutes,
            description: wp.reason.clone().unwrap_or_else(|| wp.address.clone()),
            is_mandatory: wp.is_mandatory(),
        })
        .collect();

    RoutePayload {
        route: RouteDetails {
            coordinates: path.iter().map(|p| [p.lat, p.lon]).collect(),
            distance,
            duration,
            waypoints,
        },
        hos_schedule: Vec::new(),
        compliance_warnings: Vec::new(),
    }
}
