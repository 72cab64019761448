use super::{stamp_id, EntityKind, Filter, Store, StoreError, StoreResult};
use api_shared::RecordId;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<EntityKind, MemoryTable>>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: RecordId,
    rows: BTreeMap<RecordId, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<EntityKind, MemoryTable>>> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<EntityKind, MemoryTable>>> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Store for MemoryStore {
    fn get(&self, kind: EntityKind, id: RecordId) -> StoreResult<Value> {
        self.read()?
            .get(&kind)
            .and_then(|table| table.rows.get(&id))
            .cloned()
            .ok_or(StoreError::NotFound { kind, id })
    }

    fn filter(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>> {
        let tables = self.read()?;
        let Some(table) = tables.get(&kind) else {
            return Ok(Vec::new());
        };
        Ok(table
            .rows
            .values()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }

    fn create(&self, kind: EntityKind, mut row: Value) -> StoreResult<RecordId> {
        let mut tables = self.write()?;
        let table = tables.entry(kind).or_default();
        let id = table.last_id + 1;
        stamp_id(kind, &mut row, id)?;
        table.last_id = id;
        table.rows.insert(id, row);
        Ok(id)
    }

    fn save(&self, kind: EntityKind, id: RecordId, row: Value) -> StoreResult<()> {
        if !row.is_object() {
            return Err(StoreError::NotAnObject { kind });
        }
        let mut tables = self.write()?;
        let slot = tables
            .get_mut(&kind)
            .and_then(|table| table.rows.get_mut(&id))
            .ok_or(StoreError::NotFound { kind, id })?;
        *slot = row;
        Ok(())
    }

    fn delete(&self, kind: EntityKind, id: RecordId) -> StoreResult<()> {
        self.write()?
            .get_mut(&kind)
            .and_then(|table| table.rows.remove(&id))
            .map(|_| ())
            .ok_or(StoreError::NotFound { kind, id })
    }
}
