use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{CandidateDeal, DealFields, ErrorReason, Rejection, ValidatedDeal};
use crate::types::{parse_deal_amount, parse_deal_timestamp, CurrencyCode};

/// Values parsed by earlier rules, handed on so they are parsed once per candidate.
#[derive(Debug, Default)]
pub struct ParsedValues {
    timestamp: Option<NaiveDateTime>,
    amount: Option<Decimal>
}

/// A single named check over a candidate's trimmed fields.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub name: &'static str,
    pub check: fn(&DealFields, &mut ParsedValues) -> Result<(), Rejection>
}

/// Evaluation order is fixed: the first failing rule decides the reported reason.
pub const RULES: [ValidationRule; 4] = [
    ValidationRule { name: "required-fields", check: check_required_fields },
    ValidationRule { name: "timestamp-format", check: check_timestamp },
    ValidationRule { name: "positive-amount", check: check_amount },
    ValidationRule { name: "currency-code-length", check: check_currency_codes }
];

/// Classifies candidate deals as structurally valid or rejected.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    rules: &'static [ValidationRule]
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Runs the rule table in order, stopping at the first violation.
    ///
    /// # Errors
    /// Returns the rejection of the earliest violated rule; later rules are not evaluated.
    pub fn validate(&self, candidate: &CandidateDeal) -> Result<ValidatedDeal, Rejection> {
        let fields = &candidate.fields;
        let mut parsed = ParsedValues::default();

        for rule in self.rules {
            (rule.check)(fields, &mut parsed)?;
        }

        Ok(ValidatedDeal {
            deal_id: fields.deal_id.clone(),
            from_currency: fields.from_currency.clone(),
            to_currency: fields.to_currency.clone(),
            timestamp: parsed.timestamp.ok_or(ErrorReason::MalformedTimestamp)?,
            amount: parsed.amount.ok_or(ErrorReason::MalformedAmount)?
        })
    }
}

fn check_required_fields(fields: &DealFields, _parsed: &mut ParsedValues) -> Result<(), Rejection> {
    let values = [&fields.deal_id, &fields.from_currency, &fields.to_currency, &fields.timestamp, &fields.amount];

    if values.iter().any(|value| value.trim().is_empty()) {
        return Err(ErrorReason::MissingField.into());
    }

    Ok(())
}

fn check_timestamp(fields: &DealFields, parsed: &mut ParsedValues) -> Result<(), Rejection> {
    let timestamp = parse_deal_timestamp(&fields.timestamp)
        .map_err(|error| Rejection::with_detail(ErrorReason::MalformedTimestamp, error))?;

    parsed.timestamp = Some(timestamp);

    Ok(())
}

fn check_amount(fields: &DealFields, parsed: &mut ParsedValues) -> Result<(), Rejection> {
    let amount = parse_deal_amount(&fields.amount)
        .map_err(|error| Rejection::with_detail(ErrorReason::MalformedAmount, error))?;

    if amount <= Decimal::ZERO {
        return Err(ErrorReason::NonPositiveAmount.into());
    }

    parsed.amount = Some(amount);

    Ok(())
}

fn check_currency_codes(fields: &DealFields, _parsed: &mut ParsedValues) -> Result<(), Rejection> {
    if !CurrencyCode::has_valid_length(&fields.from_currency) || !CurrencyCode::has_valid_length(&fields.to_currency) {
        return Err(ErrorReason::InvalidCurrencyCodeLength.into());
    }

    Ok(())
}
