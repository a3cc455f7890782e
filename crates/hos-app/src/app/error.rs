use thiserror::Error;

use hos_types::{Error, GeocodeError};

/// Errors raised by the application services
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("HOS log not found: {0}")]
    LogNotFound(String),

    #[error("Trip not found: {0}")]
    TripNotFound(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("No location for {0}")]
    MissingLocation(String),

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Other(String),
}

impl From<Error> for PlanningError {
    fn from(err: Error) -> Self {
        match err {
            Error::Store(e) => PlanningError::Store(e.to_string()),
            Error::Geocode(e) => PlanningError::Geocode(e),
            Error::InvalidInput(msg) => PlanningError::Validation(msg),
            _ => PlanningError::Other(err.to_string()),
        }
    }
}
