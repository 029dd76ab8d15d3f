//! In-process record store.
//!
//! # Invariants
//! - One mutex guards both the id counter and the record map.
//! - Id assignment and map insertion happen inside a single critical section.
//! - `list` copies the map under the same mutex, so it never observes a
//!   half-finished insert.

use super::record_store::{RecordStore, StoreResult};
use crate::model::record::{Record, RecordId};
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: RecordId,
    records: BTreeMap<RecordId, Record>,
}

/// Record store kept in process memory for the lifetime of the instance.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    state: Mutex<MemoryState>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryRecordStore {
    fn create_table_if_absent(&self) -> StoreResult<()> {
        Ok(())
    }

    fn insert(&self, name: &str, email: &str) -> StoreResult<Record> {
        let mut state = self.state.lock();
        state.last_id += 1;
        let record = Record::new(state.last_id, name, email);
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        let state = self.state.lock();
        Ok(state.records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryRecordStore;
    use crate::repo::record_store::RecordStore;

    #[test]
    fn insert_assigns_sequential_ids_from_one() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty());

        let first = store.insert("Ann", "ann@example.com").unwrap();
        let second = store.insert("Bob", "bob@example.com").unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn separate_instances_do_not_share_state() {
        let left = MemoryRecordStore::new();
        let right = MemoryRecordStore::new();

        left.insert("a", "a@x").unwrap();
        let record = right.insert("b", "b@x").unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(left.len(), 1);
    }
}
