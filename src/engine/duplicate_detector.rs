use crate::engine::DuplicatePolicy;
use crate::models::{ErrorReason, Rejection, ValidatedDeal};
use crate::storage::DealStore;

/// Looks a validated deal up in the deal store before it is committed.
pub struct DuplicateDetector<'a, D: DealStore> {
    store: &'a D,
    policy: DuplicatePolicy
}

impl<'a, D: DealStore> DuplicateDetector<'a, D> {
    pub fn new(store: &'a D, policy: DuplicatePolicy) -> Self {
        Self { store, policy }
    }

    /// # Errors
    /// `DuplicateId` when the policy finds a colliding committed deal, `PersistenceFailure`
    /// when the store cannot be queried.
    pub fn check(&self, deal: &ValidatedDeal) -> Result<(), Rejection> {
        let lookup = match self.policy {
            DuplicatePolicy::IdOnly => self.store.exists(&deal.deal_id),
            DuplicatePolicy::IdAndTimestamp => self.store.find_by_id(&deal.deal_id)
                .map(|existing| existing.is_some_and(|record| record.timestamp == deal.timestamp))
        };

        let is_duplicate = lookup.map_err(|error| Rejection::with_detail(ErrorReason::PersistenceFailure, error))?;

        if is_duplicate {
            return Err(ErrorReason::DuplicateId.into());
        }

        Ok(())
    }
}
