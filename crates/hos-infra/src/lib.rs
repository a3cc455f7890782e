//! Infrastructure layer - persistence implementations, loaders, geocoding

pub mod duty_csv;
pub mod geocoder;
pub mod limits_loader;
pub mod persistence;
