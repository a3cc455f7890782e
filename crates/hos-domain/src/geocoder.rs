//! Address resolution seam

use hos_types::{Coordinates, GeocodeError};

/// Resolves free-text addresses to coordinates.
///
/// Implementations may hit the network. A failure is fatal to the route
/// computation that asked for it; callers do not retry.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}
