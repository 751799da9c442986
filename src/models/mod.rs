mod candidate;
mod deal;
mod errors;
mod import_error;
#[cfg(test)]
mod tests;

use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

pub use candidate::{CandidateDeal, DealFields, ValidatedDeal};
pub use deal::DealRecord;
pub use errors::{EngineError, StoreError, StructuralError};
pub use import_error::{ImportError, Rejection};

/// Why a row ended in the error store. Exactly one reason is recorded per rejected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorReason {
    MissingField,
    MalformedTimestamp,
    MalformedAmount,
    NonPositiveAmount,
    InvalidCurrencyCodeLength,
    DuplicateId,
    PersistenceFailure,
    StructuralRowError
}

impl Display for ErrorReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            ErrorReason::MissingField => "Missing required fields",
            ErrorReason::MalformedTimestamp => "Invalid timestamp format, expected YYYY-MM-DDTHH:MM:SS",
            ErrorReason::MalformedAmount => "Invalid amount format",
            ErrorReason::NonPositiveAmount => "Deal amount must be greater than 0",
            ErrorReason::InvalidCurrencyCodeLength => "Currency codes must be exactly 3 characters",
            ErrorReason::DuplicateId => "Duplicate deal id",
            ErrorReason::PersistenceFailure => "Deal could not be persisted",
            ErrorReason::StructuralRowError => "Row could not be decomposed into deal columns"
        };

        formatter.write_str(message)
    }
}
