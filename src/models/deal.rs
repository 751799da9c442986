use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{CurrencyCode, DealId};

/// A committed currency-exchange deal. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealRecord {
    /// Business identifier, unique across the deal store.
    #[serde(rename = "id")]
    pub deal_id: DealId,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    /// Offset-less local date-time of the deal.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Strictly positive, scale preserved from the input.
    pub amount: Decimal
}

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&timestamp.format(crate::types::DEAL_TIMESTAMP_FORMAT))
}
