//! Domain layer: HOS rules, schedule and route generation, repository traits

pub mod geocoder;
pub mod model;
pub mod repository;
pub mod service;

pub use geocoder::Geocoder;
pub use model::*;
pub use repository::{HosLogRepository, TripRepository};
