use std::sync::{Arc, Mutex};

use anyhow::Result;
use uuid::Uuid;

use super::RecordStore;
use crate::models::{AnimalRecord, FilterPredicate, StoredRecord};

/// In-process record store that evaluates predicates in Rust.
///
/// Used for fixtures and tests; keeps insertion order like the SQLite store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<StoredRecord>>>,
}

impl MemoryStore {
    pub fn new(records: impl IntoIterator<Item = AnimalRecord>) -> Self {
        let store = Self::default();
        if let Ok(mut held) = store.records.lock() {
            held.extend(records.into_iter().map(|record| StoredRecord {
                id: Uuid::new_v4(),
                record,
            }));
        }
        store
    }

    pub fn insert(&self, record: AnimalRecord) -> Result<StoredRecord> {
        let stored = StoredRecord {
            id: Uuid::new_v4(),
            record,
        };
        self.records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?
            .push(stored.clone());
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn read(&self, filter: &FilterPredicate) -> Result<Vec<StoredRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;

        Ok(records
            .iter()
            .filter(|stored| filter.matches(&stored.record))
            .cloned()
            .collect())
    }
}
