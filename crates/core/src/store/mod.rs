//! Persistence gateway.
//!
//! Services talk to storage only through the [`Store`] contract: get-by-id, filter by
//! field equality, create (the store assigns the id), save and delete. Rows travel as
//! JSON objects; [`Table`] layers typed access for one [`Entity`] kind on top.
//!
//! Two stores ship with the crate:
//! - [`MemoryStore`]: process-local maps, the default and what tests use
//! - [`FileStore`]: one JSON document per record under a data directory

mod files;
mod memory;

pub use files::FileStore;
pub use memory::MemoryStore;

use api_shared::RecordId;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// The kinds of record the store holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Clinic,
    Patient,
    Station,
    ClinicStation,
    Vaccine,
}

impl EntityKind {
    /// Stable lowercase name, used in file paths and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::Clinic => "clinic",
            EntityKind::Patient => "patient",
            EntityKind::Station => "station",
            EntityKind::ClinicStation => "clinicstation",
            EntityKind::Vaccine => "vaccine",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: RecordId },
    #[error("{kind} row must be a JSON object")]
    NotAnObject { kind: EntityKind },
    #[error("failed to encode {kind}: {source}")]
    Encode {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode {kind}: {source}")]
    Decode {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt store data: {0}")]
    Corrupt(String),
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Conjunction of field-equality conditions, the `filter(**fields)` of the gateway.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter matching every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the condition `field == value`.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_owned(), value.into()));
        self
    }

    /// Whether `row` satisfies every condition. Missing fields never match.
    pub fn matches(&self, row: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }
}

/// Storage contract consumed by the services.
///
/// Implementations must assign positive ids, monotonically per kind, and never reuse
/// an id after delete. `filter` returns rows ordered by id.
pub trait Store: Send + Sync + fmt::Debug {
    /// Fetches one row; [`StoreError::NotFound`] when absent.
    fn get(&self, kind: EntityKind, id: RecordId) -> StoreResult<Value>;

    fn filter(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Inserts a new row, writing the assigned id into its `id` field.
    fn create(&self, kind: EntityKind, row: Value) -> StoreResult<RecordId>;

    /// Replaces an existing row; [`StoreError::NotFound`] when absent.
    fn save(&self, kind: EntityKind, id: RecordId, row: Value) -> StoreResult<()>;

    /// Removes a row; [`StoreError::NotFound`] when absent.
    fn delete(&self, kind: EntityKind, id: RecordId) -> StoreResult<()>;

    /// Existence check that treats not-found as an ordinary `false`.
    fn exists(&self, kind: EntityKind, id: RecordId) -> StoreResult<bool> {
        match self.get(kind, id) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// A record type persisted through the gateway.
///
/// Entities carry their own `id` field; whatever value it holds on create is
/// replaced by the store-assigned id.
pub trait Entity: Serialize + DeserializeOwned {
    const KIND: EntityKind;
}

/// Sets `row["id"] = id`, rejecting non-object rows.
pub(crate) fn stamp_id(kind: EntityKind, row: &mut Value, id: RecordId) -> StoreResult<()> {
    match row {
        Value::Object(map) => {
            map.insert("id".to_owned(), Value::from(id));
            Ok(())
        }
        _ => Err(StoreError::NotAnObject { kind }),
    }
}

/// Typed access to one entity kind.
pub struct Table<E> {
    store: Arc<dyn Store>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for Table<E> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for Table<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("store", &self.store).finish()
    }
}

impl<E: Entity> Table<E> {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn get(&self, id: RecordId) -> StoreResult<E> {
        decode(self.store.get(E::KIND, id)?)
    }

    /// Like [`Table::get`], but an absent row is `Ok(None)`.
    pub fn find(&self, id: RecordId) -> StoreResult<Option<E>> {
        match self.get(id) {
            Ok(entity) => Ok(Some(entity)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn exists(&self, id: RecordId) -> StoreResult<bool> {
        self.store.exists(E::KIND, id)
    }

    pub fn filter(&self, filter: &Filter) -> StoreResult<Vec<E>> {
        self.store
            .filter(E::KIND, filter)?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub fn all(&self) -> StoreResult<Vec<E>> {
        self.filter(&Filter::new())
    }

    pub fn create(&self, entity: &E) -> StoreResult<RecordId> {
        self.store.create(E::KIND, encode(entity)?)
    }

    pub fn save(&self, id: RecordId, entity: &E) -> StoreResult<()> {
        let mut row = encode(entity)?;
        stamp_id(E::KIND, &mut row, id)?;
        self.store.save(E::KIND, id, row)
    }

    pub fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.store.delete(E::KIND, id)
    }

    /// Deletes every row matching `filter`, returning how many went.
    pub fn delete_where(&self, filter: &Filter) -> StoreResult<usize> {
        let rows = self.store.filter(E::KIND, filter)?;
        let mut deleted = 0;
        for row in rows {
            let id = row_id(E::KIND, &row)?;
            self.store.delete(E::KIND, id)?;
            deleted += 1;
        }
        Ok(deleted)
    }
}

fn encode<E: Entity>(entity: &E) -> StoreResult<Value> {
    serde_json::to_value(entity).map_err(|source| StoreError::Encode {
        kind: E::KIND,
        source,
    })
}

fn decode<E: Entity>(row: Value) -> StoreResult<E> {
    serde_json::from_value(row).map_err(|source| StoreError::Decode {
        kind: E::KIND,
        source,
    })
}

pub(crate) fn row_id(kind: EntityKind, row: &Value) -> StoreResult<RecordId> {
    row.get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| StoreError::Corrupt(format!("{kind} row without an integer id")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: RecordId,
        clinic: RecordId,
        text: String,
    }

    impl Entity for Note {
        const KIND: EntityKind = EntityKind::Station;
    }

    fn note(clinic: RecordId, text: &str) -> Note {
        Note {
            id: 0,
            clinic,
            text: text.into(),
        }
    }

    #[test]
    fn filter_matches_all_conditions() {
        let row = json!({"id": 1, "patient": 4, "clinic": 9});
        assert!(Filter::new().matches(&row));
        assert!(Filter::new().eq("clinic", 9).matches(&row));
        assert!(Filter::new().eq("clinic", 9).eq("patient", 4).matches(&row));
        assert!(!Filter::new().eq("clinic", 9).eq("patient", 5).matches(&row));
        assert!(!Filter::new().eq("station", 9).matches(&row));
    }

    #[test]
    fn table_round_trips_entities_and_assigns_ids() {
        let table: Table<Note> = Table::new(Arc::new(MemoryStore::new()));

        let first = table.create(&note(3, "a")).expect("create");
        let second = table.create(&note(4, "b")).expect("create");
        assert_eq!((first, second), (1, 2));

        let fetched = table.get(second).expect("get");
        assert_eq!(fetched.id, 2);
        assert_eq!(fetched.text, "b");

        let by_clinic = table.filter(&Filter::new().eq("clinic", 3)).expect("filter");
        assert_eq!(by_clinic.len(), 1);
        assert_eq!(by_clinic[0].id, 1);
    }

    #[test]
    fn find_turns_not_found_into_none() {
        let table: Table<Note> = Table::new(Arc::new(MemoryStore::new()));
        assert!(table.find(42).expect("find").is_none());
        assert!(!table.exists(42).expect("exists"));
    }

    #[test]
    fn save_keeps_the_row_id() {
        let table: Table<Note> = Table::new(Arc::new(MemoryStore::new()));
        let id = table.create(&note(1, "before")).expect("create");

        let mut entity = table.get(id).expect("get");
        entity.text = "after".into();
        entity.id = 999;
        table.save(id, &entity).expect("save");

        let reloaded = table.get(id).expect("get");
        assert_eq!(reloaded.id, id);
        assert_eq!(reloaded.text, "after");
    }

    #[test]
    fn delete_where_removes_only_matching_rows() {
        let table: Table<Note> = Table::new(Arc::new(MemoryStore::new()));
        table.create(&note(1, "x")).expect("create");
        table.create(&note(2, "y")).expect("create");
        table.create(&note(1, "z")).expect("create");

        let removed = table
            .delete_where(&Filter::new().eq("clinic", 1))
            .expect("delete_where");
        assert_eq!(removed, 2);

        let left = table.all().expect("all");
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].clinic, 2);
    }
}
