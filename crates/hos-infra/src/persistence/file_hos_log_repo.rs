//! File-based implementation of HosLogRepository

use std::path::{Path, PathBuf};

use hos_domain::model::{DutyPeriod, HosLog, ViolationRecord};
use hos_domain::repository::HosLogRepository;
use hos_types::Error;

use super::json_store::JsonStore;

/// HOS logs stored in `<store_dir>/hos_logs.json`
pub struct FileHosLogRepository {
    store: JsonStore<HosLog>,
}

impl FileHosLogRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self, Error> {
        Ok(Self {
            store: JsonStore::open(&store_dir, "hos_logs.json")?,
        })
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }
}

fn newest_first(mut logs: Vec<HosLog>) -> Vec<HosLog> {
    logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    logs
}

impl HosLogRepository for FileHosLogRepository {
    fn save(&self, log: &HosLog) -> Result<(), Error> {
        self.store.upsert(&log.id, log.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<HosLog>, Error> {
        Ok(self.store.get(id))
    }

    fn find_all(&self) -> Result<Vec<HosLog>, Error> {
        Ok(newest_first(self.store.values()))
    }

    fn find_by_driver(&self, driver_id: &str) -> Result<Vec<HosLog>, Error> {
        let logs = self
            .store
            .values()
            .into_iter()
            .filter(|log| log.driver_id == driver_id)
            .collect();
        Ok(newest_first(logs))
    }

    fn replace_duty_periods(&self, log_id: &str, periods: Vec<DutyPeriod>) -> Result<(), Error> {
        let count = periods.len();
        self.store.update(log_id, |log| log.duty_periods = periods)?;
        tracing::info!(log_id, periods = count, "duty periods replaced");
        Ok(())
    }

    fn replace_violations(&self, log_id: &str, violations: Vec<ViolationRecord>) -> Result<(), Error> {
        let count = violations.len();
        self.store.update(log_id, |log| log.violations = violations)?;
        tracing::info!(log_id, violations = count, "violations replaced");
        Ok(())
    }
}
