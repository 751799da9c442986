use crate::models::{ImportError, StoreError};
use crate::storage::ErrorStore;
use crate::types::DealId;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// In-memory error log. Rows are kept in insertion order.
pub struct ErrorStorage {
    errors: DashMap<u64, ImportError>,
    deal_ids: DashSet<DealId>,
    sequence: AtomicU64
}

impl ErrorStorage {
    pub fn new() -> Self {
        Self {
            errors: DashMap::new(),
            deal_ids: DashSet::new(),
            sequence: AtomicU64::new(0)
        }
    }

    /// Snapshot of every recorded error, oldest first.
    pub fn all(&self) -> Vec<ImportError> {
        let mut entries: Vec<_> = self.errors.iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        entries.sort_by_key(|(sequence, _)| *sequence);
        entries.into_iter().map(|(_, error)| error).collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl ErrorStore for ErrorStorage {
    fn save(&self, error: ImportError) -> Result<(), StoreError> {
        if let Some(deal_id) = &error.deal_id {
            self.deal_ids.insert(deal_id.clone());
        }

        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.errors.insert(sequence, error);

        Ok(())
    }

    fn exists(&self, deal_id: &str) -> Result<bool, StoreError> {
        Ok(self.deal_ids.contains(deal_id))
    }
}
