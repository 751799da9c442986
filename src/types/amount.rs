use crate::types::errors::TypeError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A plain decimal split into its digit groups, sign dropped.
struct DecimalParts<'a> {
    integer: &'a str,
    fraction: &'a str,
    exponent: i64
}

impl DecimalParts<'_> {
    /// Fractional digits needed to hold the value exactly, trailing zeros ignored.
    fn required_scale(&self) -> i64 {
        let digits = format!("{}{}", self.integer, self.fraction);
        let significant = digits.trim_end_matches('0');

        if significant.is_empty() {
            return 0;
        }

        let trailing_zeros = (digits.len() - significant.len()) as i64;

        (self.fraction.len() as i64)
            .saturating_sub(self.exponent)
            .saturating_sub(trailing_zeros)
            .max(0)
    }
}

/// Parses a deal amount written as a plain decimal: an optional sign, digits, an optional
/// `.digits` fraction and an optional `e`/`E` exponent.
///
/// # Errors
/// - `AmountFormat` for anything outside that grammar (digit separators, bare dots, words).
/// - `AmountRange` when the value does not fit a `Decimal`.
/// - `AmountPrecision` when the value would be rounded to fit a `Decimal`.
pub fn parse_deal_amount(value: &str) -> Result<Decimal, TypeError> {
    let value = value.trim();

    let Some(parts) = split_plain_decimal(value) else {
        return Err(TypeError::AmountFormat { value: value.to_string() });
    };

    let unsigned = value.strip_prefix('+').unwrap_or(value);
    let parsed = if value.contains(['e', 'E']) {
        Decimal::from_scientific(unsigned)
    } else {
        Decimal::from_str(unsigned)
    };

    let amount = parsed.map_err(|_| TypeError::AmountRange { value: value.to_string() })?;

    if parts.required_scale() > i64::from(amount.scale()) {
        return Err(TypeError::AmountPrecision { value: value.to_string() });
    }

    Ok(amount)
}

fn split_plain_decimal(value: &str) -> Option<DecimalParts<'_>> {
    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None)
    };

    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) if is_digits(fraction) => (integer, fraction),
        Some(_) => return None,
        None => (mantissa, "")
    };

    if !is_digits(integer) {
        return None;
    }

    let exponent = match exponent {
        Some(exponent) => {
            if !is_digits(exponent.strip_prefix(['+', '-']).unwrap_or(exponent)) {
                return None;
            }
            exponent.parse::<i64>().ok()?
        }
        None => 0
    };

    Some(DecimalParts { integer, fraction, exponent })
}
