//! JSON-file store.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/
//!   clinic/
//!     last_id        # highest id ever assigned, as decimal text
//!     1.json
//!     2.json
//!   vaccine/
//!     ...
//! ```
//!
//! Writes go to a temporary sibling first and are renamed into place, so a crash
//! never leaves a half-written record behind.

use super::{stamp_id, EntityKind, Filter, Store, StoreError, StoreResult};
use crate::constants::{LAST_ID_FILENAME, RECORD_EXTENSION, TEMP_EXTENSION};
use api_shared::RecordId;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Store persisting each record as a JSON document under a data directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    fn kind_dir(&self, kind: EntityKind) -> PathBuf {
        self.root.join(kind.as_str())
    }

    fn record_path(&self, kind: EntityKind, id: RecordId) -> PathBuf {
        self.kind_dir(kind)
            .join(format!("{id}.{RECORD_EXTENSION}"))
    }

    fn read_row(&self, kind: EntityKind, id: RecordId) -> StoreResult<Value> {
        let bytes = match fs::read(self.record_path(kind, id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound { kind, id })
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode { kind, source })
    }

    fn write_row(&self, kind: EntityKind, id: RecordId, row: &Value) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec_pretty(row).map_err(|source| StoreError::Encode { kind, source })?;
        write_atomic(&self.record_path(kind, id), &bytes)
    }

    fn last_id(&self, kind: EntityKind) -> StoreResult<RecordId> {
        let path = self.kind_dir(kind).join(LAST_ID_FILENAME);
        match fs::read_to_string(&path) {
            Ok(text) => text.trim().parse().map_err(|_| {
                StoreError::Corrupt(format!("unreadable id counter at {}", path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of every record file of `kind`, ascending.
    fn record_ids(&self, kind: EntityKind) -> StoreResult<Vec<RecordId>> {
        let entries = match fs::read_dir(self.kind_dir(kind)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<RecordId>().ok())
            {
                Some(id) => ids.push(id),
                None => tracing::warn!("ignoring stray file in store: {}", path.display()),
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = path.with_extension(TEMP_EXTENSION);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl Store for FileStore {
    fn get(&self, kind: EntityKind, id: RecordId) -> StoreResult<Value> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        self.read_row(kind, id)
    }

    fn filter(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>> {
        let _guard = self.lock.read().map_err(|_| StoreError::Poisoned)?;
        let mut rows = Vec::new();
        for id in self.record_ids(kind)? {
            let row = self.read_row(kind, id)?;
            if filter.matches(&row) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn create(&self, kind: EntityKind, mut row: Value) -> StoreResult<RecordId> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        fs::create_dir_all(self.kind_dir(kind))?;

        let id = self.last_id(kind)? + 1;
        stamp_id(kind, &mut row, id)?;
        // Counter first: a failed row write burns the id instead of leaving a row
        // that the next create would overwrite.
        write_atomic(
            &self.kind_dir(kind).join(LAST_ID_FILENAME),
            id.to_string().as_bytes(),
        )?;
        self.write_row(kind, id, &row)?;
        Ok(id)
    }

    fn save(&self, kind: EntityKind, id: RecordId, row: Value) -> StoreResult<()> {
        if !row.is_object() {
            return Err(StoreError::NotAnObject { kind });
        }
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        if !self.record_path(kind, id).is_file() {
            return Err(StoreError::NotFound { kind, id });
        }
        self.write_row(kind, id, &row)
    }

    fn delete(&self, kind: EntityKind, id: RecordId) -> StoreResult<()> {
        let _guard = self.lock.write().map_err(|_| StoreError::Poisoned)?;
        match fs::remove_file(self.record_path(kind, id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound { kind, id }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn records_persist_across_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let id = {
            let store = FileStore::open(temp_dir.path()).expect("open");
            store
                .create(EntityKind::Clinic, json!({"location": "Ensenada"}))
                .expect("create")
        };

        let store = FileStore::open(temp_dir.path()).expect("reopen");
        let row = store.get(EntityKind::Clinic, id).expect("get");
        assert_eq!(row["location"], "Ensenada");
        assert_eq!(row["id"], id);

        let next = store
            .create(EntityKind::Clinic, json!({"location": "Tijuana"}))
            .expect("create");
        assert_eq!(next, id + 1);
    }

    #[test]
    fn writes_one_file_per_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        let id = store
            .create(EntityKind::Station, json!({"name": "ENT"}))
            .expect("create");

        let path = temp_dir.path().join("station").join(format!("{id}.json"));
        assert!(path.is_file(), "expected {}", path.display());
        assert!(temp_dir.path().join("station").join(LAST_ID_FILENAME).is_file());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        let a = store.create(EntityKind::Patient, json!({})).unwrap();
        store.delete(EntityKind::Patient, a).unwrap();
        let b = store.create(EntityKind::Patient, json!({})).unwrap();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn failed_counter_write_leaves_no_row() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        let clinic_dir = temp_dir.path().join("clinic");
        let blocker = clinic_dir.join(format!("{LAST_ID_FILENAME}.{TEMP_EXTENSION}"));
        fs::create_dir_all(&blocker).unwrap();

        assert!(matches!(
            store.create(EntityKind::Clinic, json!({"who": "first"})),
            Err(StoreError::Io(_))
        ));
        assert!(!clinic_dir.join("1.json").exists());

        fs::remove_dir(&blocker).unwrap();
        let id = store
            .create(EntityKind::Clinic, json!({"who": "second"}))
            .expect("create");
        assert_eq!(id, 1);
        let rows = store.filter(EntityKind::Clinic, &Filter::new()).unwrap();
        assert_eq!(rows, vec![json!({"id": 1, "who": "second"})]);
    }

    #[test]
    fn failed_row_write_does_not_reuse_the_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        let clinic_dir = temp_dir.path().join("clinic");
        let blocker = clinic_dir.join(format!("1.{TEMP_EXTENSION}"));
        fs::create_dir_all(&blocker).unwrap();

        assert!(store
            .create(EntityKind::Clinic, json!({"who": "first"}))
            .is_err());
        assert!(!clinic_dir.join("1.json").exists());

        fs::remove_dir(&blocker).unwrap();
        let id = store
            .create(EntityKind::Clinic, json!({"who": "second"}))
            .expect("create");
        assert_eq!(id, 2);
        assert!(matches!(
            store.get(EntityKind::Clinic, 1),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn save_and_delete_report_missing_rows() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        assert!(matches!(
            store.save(EntityKind::Vaccine, 3, json!({})),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(EntityKind::Vaccine, 3),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.get(EntityKind::Vaccine, 3),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn filter_skips_stray_files_and_orders_by_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        for n in 0..11 {
            store
                .create(EntityKind::Vaccine, json!({"clinic": n % 2}))
                .unwrap();
        }
        fs::write(temp_dir.path().join("vaccine").join("notes.json"), b"{}").unwrap();

        let rows = store
            .filter(EntityKind::Vaccine, &Filter::new().eq("clinic", 0))
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn unreadable_record_is_a_decode_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).expect("open");
        let id = store.create(EntityKind::Clinic, json!({})).unwrap();
        fs::write(store.record_path(EntityKind::Clinic, id), b"not json").unwrap();

        assert!(matches!(
            store.get(EntityKind::Clinic, id),
            Err(StoreError::Decode { .. })
        ));
    }
}
