use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::DealId;

/// The five deal columns of one input row as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFields {
    pub deal_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub timestamp: String,
    pub amount: String
}

impl DealFields {
    pub fn trimmed(&self) -> DealFields {
        DealFields {
            deal_id: self.deal_id.trim().to_string(),
            from_currency: self.from_currency.trim().to_string(),
            to_currency: self.to_currency.trim().to_string(),
            timestamp: self.timestamp.trim().to_string(),
            amount: self.amount.trim().to_string()
        }
    }
}

/// An unvalidated row extracted from the input.
///
/// `fields` holds the trimmed values the validator works on, `raw` keeps the values
/// exactly as submitted so a rejection can record them unmodified.
#[derive(Debug, Clone)]
pub struct CandidateDeal {
    /// 1-based line of the row in the source.
    pub line: u64,
    pub fields: DealFields,
    pub raw: DealFields,
    /// The full row as submitted, comma joined.
    pub raw_payload: String
}

impl CandidateDeal {
    /// The business identifier, if the row carries a non-blank one.
    pub fn deal_id(&self) -> Option<&str> {
        Some(self.fields.deal_id.as_str()).filter(|id| !id.is_empty())
    }
}

/// A candidate that passed every validation rule.
///
/// Currency codes are still the trimmed submitted values; they are normalized only
/// when the final record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDeal {
    pub deal_id: DealId,
    pub from_currency: String,
    pub to_currency: String,
    pub timestamp: NaiveDateTime,
    pub amount: Decimal
}
