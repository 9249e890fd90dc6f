//! In-memory record store.
//!
//! Records are kept in a `BTreeMap` keyed by id. Ids are handed out by a counter that only
//! ever moves forward, so iteration order equals creation order and ids are never reused.

use crate::domain::error::{InventoryError, InventoryResult};
use crate::domain::inventory::record::{InventoryRecord, RecordPatch, RecordSummary};
use crate::domain::inventory::search::SearchQuery;
use std::collections::BTreeMap;

pub struct RecordStore {
    records: BTreeMap<u64, InventoryRecord>,
    next_id: u64,
}

impl RecordStore {
    /// Creates an empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a new record under the next id and returns it.
    pub fn insert(&mut self, inventory_name: String, description: String) -> &mut InventoryRecord {
        let id = self.next_id;
        self.next_id += 1;
        self.records.entry(id).or_insert(InventoryRecord {
            id,
            inventory_name,
            description,
            photo: None,
        })
    }

    pub fn get(&self, id: u64) -> InventoryResult<&InventoryRecord> {
        self.records
            .get(&id)
            .ok_or_else(|| InventoryError::record_not_found(id))
    }

    pub fn get_mut(&mut self, id: u64) -> InventoryResult<&mut InventoryRecord> {
        self.records
            .get_mut(&id)
            .ok_or_else(|| InventoryError::record_not_found(id))
    }

    pub fn list(&self) -> Vec<RecordSummary> {
        self.records.values().map(InventoryRecord::summary).collect()
    }

    /// Applies a partial update. A patch without any field is rejected, an unknown id wins
    /// over an empty patch.
    pub fn update(&mut self, id: u64, patch: &RecordPatch) -> InventoryResult<&InventoryRecord> {
        let record = self.get_mut(id)?;
        if patch.is_empty() {
            return Err(InventoryError::validation(
                "Request body must contain inventory_name or description",
            ));
        }
        patch.apply(record);
        Ok(&*record)
    }

    pub fn remove(&mut self, id: u64) -> InventoryResult<InventoryRecord> {
        self.records
            .remove(&id)
            .ok_or_else(|| InventoryError::record_not_found(id))
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<RecordSummary> {
        self.records
            .values()
            .filter(|r| query.matches(r))
            .map(InventoryRecord::summary)
            .collect()
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
