//! Error types for hos-planner

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Store-related errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store data corrupted: {0}")]
    Corrupted(String),

    #[error("Failed to persist store: {0}")]
    PersistFailed(String),
}

/// Address resolution errors raised by a geocoder
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("No geocode result for address: {0}")]
    NoResult(String),

    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Invalid geocoder response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Geocoding error: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
