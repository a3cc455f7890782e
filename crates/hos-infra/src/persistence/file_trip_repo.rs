//! File-based implementation of TripRepository

use std::path::{Path, PathBuf};

use hos_domain::model::{TripRecord, Waypoint};
use hos_domain::repository::TripRepository;
use hos_types::Error;

use super::json_store::JsonStore;

/// Trips stored in `<store_dir>/trips.json`
pub struct FileTripRepository {
    store: JsonStore<TripRecord>,
}

impl FileTripRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self, Error> {
        Ok(Self {
            store: JsonStore::open(&store_dir, "trips.json")?,
        })
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}

impl TripRepository for FileTripRepository {
    fn save(&self, trip: &TripRecord) -> Result<(), Error> {
        self.store.upsert(&trip.id, trip.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<TripRecord>, Error> {
        Ok(self.store.get(id))
    }

    fn find_all(&self) -> Result<Vec<TripRecord>, Error> {
        let mut trips = self.store.values();
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(trips)
    }

    fn replace_waypoints(&self, trip_id: &str, waypoints: Vec<Waypoint>) -> Result<(), Error> {
        let count = waypoints.len();
        self.store.update(trip_id, |trip| trip.waypoints = waypoints)?;
        tracing::info!(trip_id, waypoints = count, "waypoints replaced");
        Ok(())
    }
}
