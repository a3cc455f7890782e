//! Keyed JSON file with atomic rewrites

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use hos_types::{Result, StoreError};

/// A map of records persisted as one pretty-printed JSON file.
///
/// Every mutation writes the full map to a temp file in the same directory
/// and renames it over the old one, so readers see the old or the new
/// content and never a partial write. The in-memory map is only swapped
/// after the rename succeeds.
pub(crate) struct JsonStore<T> {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, T>>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn open(store_dir: &Path, file_name: &str) -> Result<Self> {
        fs::create_dir_all(store_dir)?;
        let path = store_dir.join(file_name);

        let entries = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)
                .map_err(|e| StoreError::Corrupted(format!("{}: {}", path.display(), e)))?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.entries.borrow().get(id).cloned()
    }

    pub fn values(&self) -> Vec<T> {
        self.entries.borrow().values().cloned().collect()
    }

    pub fn upsert(&self, id: &str, value: T) -> Result<()> {
        let mut next = self.entries.borrow().clone();
        next.insert(id.to_string(), value);
        self.commit(next)
    }

    /// Apply `f` to one record; fails with `NotFound` if the id is unknown
    pub fn update<F>(&self, id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.entries.borrow().clone();
        let record = next
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(record);
        self.commit(next)
    }

    fn commit(&self, next: BTreeMap<String, T>) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, &next)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::PersistFailed(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!(path = %self.path.display(), records = next.len(), "store persisted");
        *self.entries.borrow_mut() = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempdir().unwrap();
        {
            let store: JsonStore<u32> = JsonStore::open(dir.path(), "numbers.json").unwrap();
            store.upsert("a", 1).unwrap();
            store.upsert("b", 2).unwrap();
        }
        let reopened: JsonStore<u32> = JsonStore::open(dir.path(), "numbers.json").unwrap();
        assert_eq!(reopened.get("a"), Some(1));
        assert_eq!(reopened.values(), vec![1, 2]);
    }

    #[test]
    fn test_update_missing_record_fails_and_keeps_state() {
        let dir = tempdir().unwrap();
        let store: JsonStore<u32> = JsonStore::open(dir.path(), "numbers.json").unwrap();
        store.upsert("a", 1).unwrap();
        assert!(store.update("zzz", |v| *v = 9).is_err());
        assert_eq!(store.values(), vec![1]);
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("numbers.json"), "{not json").unwrap();
        let result: Result<JsonStore<u32>> = JsonStore::open(dir.path(), "numbers.json");
        assert!(matches!(
            result,
            Err(hos_types::Error::Store(StoreError::Corrupted(_)))
        ));
    }
}
