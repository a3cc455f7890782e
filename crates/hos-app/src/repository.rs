//! Repository adapters for persistence layer

use std::path::PathBuf;

use hos_infra::geocoder::NominatimGeocoder;
use hos_infra::persistence::{FileHosLogRepository, FileTripRepository};
use hos_types::Result;

use crate::config::Config;

/// Open file-based HOS log repository
pub fn open_log_repo(config: &Config) -> Result<FileHosLogRepository> {
    open_log_repo_at(config.store_dir()?)
}

/// Open file-based trip repository
pub fn open_trip_repo(config: &Config) -> Result<FileTripRepository> {
    open_trip_repo_at(config.store_dir()?)
}

/// Open HOS log repository at a custom directory
pub fn open_log_repo_at(store_dir: PathBuf) -> Result<FileHosLogRepository> {
    tracing::debug!(store_dir = %store_dir.display(), "opening log store");
    FileHosLogRepository::open(store_dir)
}

/// Open trip repository at a custom directory
pub fn open_trip_repo_at(store_dir: PathBuf) -> Result<FileTripRepository> {
    tracing::debug!(store_dir = %store_dir.display(), "opening trip store");
    FileTripRepository::open(store_dir)
}

/// Build the HTTP geocoder from config
pub fn open_geocoder(config: &Config) -> Result<NominatimGeocoder> {
    NominatimGeocoder::new(config.geocoder.clone()).map_err(Into::into)
}
