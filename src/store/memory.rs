//! In-memory game store.

use std::collections::HashMap;

use super::{GameStore, StoredRecord};
use crate::error::StoreError;

/// In-memory storage implementation.
///
/// Used by tests and native tooling. Data is lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn put(&mut self, name: &str, payload: &[u8]) -> Result<(), StoreError> {
        let replaced = self
            .records
            .insert(name.to_string(), payload.to_vec())
            .is_some();
        log::debug!("Stored {} in memory (replaced: {})", name, replaced);
        Ok(())
    }

    fn get(&self, name: &str) -> Result<StoredRecord, StoreError> {
        self.records
            .get(name)
            .map(|payload| StoredRecord {
                name: name.to_string(),
                payload: payload.clone(),
            })
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn get_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .map(|(name, payload)| StoredRecord {
                name: name.clone(),
                payload: payload.clone(),
            })
            .collect())
    }
}
