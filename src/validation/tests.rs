use super::{Validator, RULES};
use crate::models::{CandidateDeal, DealFields, ErrorReason};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

fn create_candidate(deal_id: &str, from_currency: &str, to_currency: &str, timestamp: &str, amount: &str) -> CandidateDeal {
    let raw = DealFields {
        deal_id: deal_id.to_string(),
        from_currency: from_currency.to_string(),
        to_currency: to_currency.to_string(),
        timestamp: timestamp.to_string(),
        amount: amount.to_string()
    };

    CandidateDeal {
        line: 2,
        fields: raw.trimmed(),
        raw_payload: String::new(),
        raw
    }
}

fn reason_for(deal_id: &str, from_currency: &str, to_currency: &str, timestamp: &str, amount: &str) -> Option<ErrorReason> {
    Validator::new()
        .validate(&create_candidate(deal_id, from_currency, to_currency, timestamp, amount))
        .err()
        .map(|rejection| rejection.reason)
}

#[test]
fn test_rule_table_is_in_fixed_order() {
    let names: Vec<_> = RULES.iter().map(|rule| rule.name).collect();

    assert_eq!(names, vec!["required-fields", "timestamp-format", "positive-amount", "currency-code-length"]);
}

#[test]
fn test_valid_candidate_produces_parsed_deal() -> Result<()> {
    let validated = Validator::new().validate(&create_candidate("D001", " usd", "EUR", "2025-11-13T10:00:00", "100.00"))
        .map_err(|reason| anyhow::anyhow!("unexpected rejection: {reason:?}"))?;

    assert_eq!(validated.deal_id, "D001");
    assert_eq!(validated.from_currency, "usd");
    assert_eq!(validated.to_currency, "EUR");
    assert_eq!(validated.amount, Decimal::from_str("100.00")?);
    assert_eq!(validated.amount.to_string(), "100.00");
    assert_eq!(validated.timestamp.to_string(), "2025-11-13 10:00:00");

    Ok(())
}

#[test]
fn test_each_rule_reports_its_own_reason() {
    let test_cases = vec![
        (("D1", "USD", "", "2025-11-13T10:00:00", "1"), ErrorReason::MissingField),
        (("", "USD", "EUR", "2025-11-13T10:00:00", "1"), ErrorReason::MissingField),
        (("D1", "USD", "EUR", "13/11/2025", "1"), ErrorReason::MalformedTimestamp),
        (("D1", "USD", "EUR", "2025-11-13T23:59:60", "1"), ErrorReason::MalformedTimestamp),
        (("D1", "USD", "EUR", "2025-11- 3T10:00:00", "1"), ErrorReason::MalformedTimestamp),
        (("D1", "USD", "EUR", "+025-11-13T10:00:00", "1"), ErrorReason::MalformedTimestamp),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "abc"), ErrorReason::MalformedAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "1_000"), ErrorReason::MalformedAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "1__0"), ErrorReason::MalformedAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "0.00000000000000000000000000001"), ErrorReason::MalformedAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "100000000000000000000000000000"), ErrorReason::MalformedAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "-5"), ErrorReason::NonPositiveAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "0"), ErrorReason::NonPositiveAmount),
        (("D1", "USD", "EUR", "2025-11-13T10:00:00", "0.00"), ErrorReason::NonPositiveAmount),
        (("D1", "US", "EUR", "2025-11-13T10:00:00", "1"), ErrorReason::InvalidCurrencyCodeLength),
        (("D1", "USD", "EURO", "2025-11-13T10:00:00", "1"), ErrorReason::InvalidCurrencyCodeLength)
    ];

    for ((deal_id, from_currency, to_currency, timestamp, amount), expected) in test_cases {
        assert_eq!(reason_for(deal_id, from_currency, to_currency, timestamp, amount), Some(expected));
    }
}

#[test]
fn test_earliest_violated_rule_wins() {
    // missing field beats every later violation
    assert_eq!(reason_for("D1", "US", "", "bad", "-1"), Some(ErrorReason::MissingField));
    // timestamp beats amount and currency
    assert_eq!(reason_for("D1", "US", "EURO", "bad", "-1"), Some(ErrorReason::MalformedTimestamp));
    assert_eq!(reason_for("D1", "USD", "EUR", "bad", "abc"), Some(ErrorReason::MalformedTimestamp));
    // amount beats currency
    assert_eq!(reason_for("D1", "US", "EURO", "2025-11-13T10:00:00", "abc"), Some(ErrorReason::MalformedAmount));
    assert_eq!(reason_for("D1", "US", "EURO", "2025-11-13T10:00:00", "0"), Some(ErrorReason::NonPositiveAmount));
}

#[test]
fn test_amount_boundary_accepts_smallest_positive_value() {
    assert_eq!(reason_for("D1", "USD", "EUR", "2025-11-13T10:00:00", "0.01"), None);
    assert_eq!(reason_for("D1", "USD", "EUR", "2025-11-13T10:00:00", "-0.01"), Some(ErrorReason::NonPositiveAmount));
}

#[test]
fn test_currency_shape_ignores_case_and_whitespace() {
    assert_eq!(reason_for("D1", " usd ", "eUr", "2025-11-13T10:00:00", "1"), None);
}

#[test]
fn test_whitespace_only_field_counts_as_missing() {
    assert_eq!(reason_for("D1", "USD", "EUR", "   ", "1"), Some(ErrorReason::MissingField));
}

#[test]
fn test_unrepresentable_amount_is_rejected_with_detail() -> Result<()> {
    let rejection = Validator::new()
        .validate(&create_candidate("D1", "USD", "EUR", "2025-11-13T10:00:00", "0.00000000000000000000000000001"))
        .err()
        .ok_or_else(|| anyhow::anyhow!("amount should not be accepted"))?;

    assert_eq!(rejection.reason, ErrorReason::MalformedAmount);
    assert!(rejection.detail.is_some_and(|detail| detail.contains("without rounding")));

    Ok(())
}

#[test]
fn test_scientific_amount_is_accepted() -> Result<()> {
    let validated = Validator::new()
        .validate(&create_candidate("D1", "USD", "EUR", "2025-11-13T10:00:00", "1.5e2"))
        .map_err(|reason| anyhow::anyhow!("unexpected rejection: {reason:?}"))?;

    assert_eq!(validated.amount.normalize(), Decimal::from_str("150")?);

    Ok(())
}
