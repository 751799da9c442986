use crate::models::{DealRecord, StoreError};
use crate::storage::DealStore;
use crate::types::DealId;
use dashmap::iter::Iter;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

pub struct DealStorage {
    deals: Arc<DashMap<DealId, DealRecord>>
}

impl DealStorage {
    pub fn new() -> Self {
        Self {
            deals: Arc::new(DashMap::new())
        }
    }

    pub fn iter(&self) -> Iter<'_, DealId, DealRecord> {
        self.deals.iter()
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }
}

impl DealStore for DealStorage {
    fn exists(&self, deal_id: &str) -> Result<bool, StoreError> {
        Ok(self.deals.contains_key(deal_id))
    }

    fn find_by_id(&self, deal_id: &str) -> Result<Option<DealRecord>, StoreError> {
        Ok(self.deals.get(deal_id).map(|entry| entry.value().clone()))
    }

    fn save(&self, record: DealRecord) -> Result<(), StoreError> {
        match self.deals.entry(record.deal_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::UniqueViolation { deal_id: record.deal_id }),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }
}
