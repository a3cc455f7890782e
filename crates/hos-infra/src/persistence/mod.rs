//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_hos_log_repo;
mod file_trip_repo;
mod json_store;

pub use file_hos_log_repo::FileHosLogRepository;
pub use file_trip_repo::FileTripRepository;
