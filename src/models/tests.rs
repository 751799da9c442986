use super::{CandidateDeal, DealFields, DealRecord, ErrorReason, ImportError, Rejection, StoreError, StructuralError};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::types::{parse_deal_timestamp, CurrencyCode};

fn create_candidate(line: u64, raw: DealFields) -> CandidateDeal {
    CandidateDeal {
        line,
        fields: raw.trimmed(),
        raw_payload: format!("{},{},{},{},{}", raw.deal_id, raw.from_currency, raw.to_currency, raw.timestamp, raw.amount),
        raw
    }
}

fn raw_fields(deal_id: &str, from_currency: &str, to_currency: &str, timestamp: &str, amount: &str) -> DealFields {
    DealFields {
        deal_id: deal_id.to_string(),
        from_currency: from_currency.to_string(),
        to_currency: to_currency.to_string(),
        timestamp: timestamp.to_string(),
        amount: amount.to_string()
    }
}

#[test]
fn test_trimmed_fields_strip_surrounding_whitespace_only() {
    let fields = raw_fields(" D001 ", " usd", "EUR ", " 2025-11-13T10:00:00", "100.00 ");
    let trimmed = fields.trimmed();

    assert_eq!(trimmed, raw_fields("D001", "usd", "EUR", "2025-11-13T10:00:00", "100.00"));
}

#[test]
fn test_candidate_without_id_reports_no_business_identifier() {
    let candidate = create_candidate(2, raw_fields("   ", "USD", "EUR", "2025-11-13T10:00:00", "1"));

    assert_eq!(candidate.deal_id(), None);
}

#[test]
fn test_import_error_preserves_raw_values_unmodified() {
    let candidate = create_candidate(7, raw_fields(" D010", " usd", "eur ", "13/11/2025", "abc"));
    let error = ImportError::from_candidate(&candidate, ErrorReason::MalformedTimestamp.into());

    assert_eq!(error.deal_id.as_deref(), Some("D010"));
    assert_eq!(error.line, 7);
    assert_eq!(error.reason, ErrorReason::MalformedTimestamp);
    assert_eq!(error.raw, Some(raw_fields(" D010", " usd", "eur ", "13/11/2025", "abc")));
    assert_eq!(error.raw_payload, " D010, usd,eur ,13/11/2025,abc");
    assert!(error.detail.is_none());
}

#[test]
fn test_structural_import_error_has_no_id_and_carries_detail() {
    let cause = StructuralError::ColumnCount { expected: 5, found: 2 };
    let error = ImportError::structural(4, "D1,USD".to_string(), &cause);

    assert_eq!(error.deal_id, None);
    assert_eq!(error.raw, None);
    assert_eq!(error.reason, ErrorReason::StructuralRowError);
    assert_eq!(error.detail.as_deref(), Some("Row has 2 columns, header declares 5"));
}

#[test]
fn test_rejection_with_detail_keeps_store_message() {
    let cause = StoreError::UniqueViolation { deal_id: "D001".to_string() };
    let rejection = Rejection::with_detail(ErrorReason::PersistenceFailure, &cause);

    assert_eq!(rejection.reason, ErrorReason::PersistenceFailure);
    assert_eq!(rejection.detail.as_deref(), Some("Deal [D001] already exists in the store"));
}

#[test]
fn test_deal_record_serializes_canonical_timestamp_and_amount_scale() -> Result<()> {
    let record = DealRecord {
        deal_id: "D001".to_string(),
        from_currency: CurrencyCode::from_str(" usd")?,
        to_currency: CurrencyCode::from_str("EUR")?,
        timestamp: parse_deal_timestamp("2025-11-13T10:00:00")?,
        amount: Decimal::from_str("100.00")?
    };

    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.serialize(&record)?;
        writer.flush()?;
    }
    let output = String::from_utf8(buffer)?;

    assert_eq!(output, "id,from_currency,to_currency,timestamp,amount\nD001,USD,EUR,2025-11-13T10:00:00,100.00\n");

    Ok(())
}
