mod deal_storage;
mod error_storage;

use crate::models::{DealRecord, ImportError, StoreError};

pub use deal_storage::DealStorage;
pub use error_storage::ErrorStorage;

/// Capability the import engine needs from wherever committed deals live.
pub trait DealStore: Send + Sync + 'static {
    fn exists(&self, deal_id: &str) -> Result<bool, StoreError>;
    fn find_by_id(&self, deal_id: &str) -> Result<Option<DealRecord>, StoreError>;
    /// Commits a new record. Must fail with `UniqueViolation` if the id is already taken.
    fn save(&self, record: DealRecord) -> Result<(), StoreError>;
}

/// Append-only sink for rejected rows.
pub trait ErrorStore: Send + Sync + 'static {
    fn save(&self, error: ImportError) -> Result<(), StoreError>;
    /// Whether any error row has been recorded for `deal_id`.
    fn exists(&self, deal_id: &str) -> Result<bool, StoreError>;
}
