use std::str::FromStr;

use crate::models::{DealRecord, ErrorReason, Rejection, ValidatedDeal};
use crate::storage::DealStore;
use crate::types::CurrencyCode;

/// Builds the final `DealRecord` and commits it.
pub struct Persister<'a, D: DealStore> {
    store: &'a D
}

impl<'a, D: DealStore> Persister<'a, D> {
    pub fn new(store: &'a D) -> Self {
        Self { store }
    }

    /// Normalizes the currency codes and saves the record.
    ///
    /// # Errors
    /// A store failure comes back as a `PersistenceFailure` rejection carrying the
    /// store's message; nothing is committed in that case.
    pub fn commit(&self, deal: ValidatedDeal) -> Result<DealRecord, Rejection> {
        let record = DealRecord {
            from_currency: normalize_currency(&deal.from_currency)?,
            to_currency: normalize_currency(&deal.to_currency)?,
            deal_id: deal.deal_id,
            timestamp: deal.timestamp,
            amount: deal.amount
        };

        self.store.save(record.clone())
            .map_err(|error| Rejection::with_detail(ErrorReason::PersistenceFailure, error))?;

        Ok(record)
    }
}

fn normalize_currency(code: &str) -> Result<CurrencyCode, Rejection> {
    CurrencyCode::from_str(code)
        .map_err(|error| Rejection::with_detail(ErrorReason::InvalidCurrencyCodeLength, error))
}
