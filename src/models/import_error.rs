use chrono::{DateTime, Utc};

use crate::models::{CandidateDeal, DealFields, ErrorReason, StructuralError};
use crate::types::DealId;

/// The reason a row was turned away, with an optional free-form detail
/// (e.g. a store failure message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: ErrorReason,
    pub detail: Option<String>
}

impl Rejection {
    pub fn with_detail(reason: ErrorReason, detail: impl ToString) -> Self {
        Self {
            reason,
            detail: Some(detail.to_string())
        }
    }
}

impl From<ErrorReason> for Rejection {
    fn from(reason: ErrorReason) -> Self {
        Self { reason, detail: None }
    }
}

/// A rejected row as written to the error store. Never updated after creation.
#[derive(Debug, Clone)]
pub struct ImportError {
    /// The candidate's business id, absent when blank or when the row could not be decomposed.
    pub deal_id: Option<DealId>,
    pub line: u64,
    /// Field values exactly as submitted.
    pub raw: Option<DealFields>,
    pub raw_payload: String,
    pub reason: ErrorReason,
    pub detail: Option<String>,
    pub occurred_at: DateTime<Utc>
}

impl ImportError {
    pub fn from_candidate(candidate: &CandidateDeal, rejection: Rejection) -> Self {
        Self {
            deal_id: candidate.deal_id().map(str::to_string),
            line: candidate.line,
            raw: Some(candidate.raw.clone()),
            raw_payload: candidate.raw_payload.clone(),
            reason: rejection.reason,
            detail: rejection.detail,
            occurred_at: Utc::now()
        }
    }

    pub fn structural(line: u64, raw_payload: String, error: &StructuralError) -> Self {
        Self {
            deal_id: None,
            line,
            raw: None,
            raw_payload,
            reason: ErrorReason::StructuralRowError,
            detail: Some(error.to_string()),
            occurred_at: Utc::now()
        }
    }
}
