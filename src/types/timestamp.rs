use crate::types::errors::TypeError;
use chrono::{NaiveDateTime, Timelike};

pub const DEAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DEAL_TIMESTAMP_LENGTH: usize = "YYYY-MM-DDTHH:MM:SS".len();

// chrono stores a leap second as nanoseconds past the one second mark
const LEAP_SECOND_NANOS: u32 = 1_000_000_000;

/// Parses an offset-less deal timestamp in the canonical `YYYY-MM-DDTHH:MM:SS` form.
///
/// Fractional seconds, timezone suffixes, padded or signed fields and leap seconds are rejected.
pub fn parse_deal_timestamp(value: &str) -> Result<NaiveDateTime, TypeError> {
    let value = value.trim();

    //NOTE: chrono's %Y/%d/%S are more lenient than the literal pattern (signs, space padding)
    if !has_canonical_layout(value) {
        return Err(TypeError::TimestampFormat { value: value.to_string() });
    }

    let timestamp = NaiveDateTime::parse_from_str(value, DEAL_TIMESTAMP_FORMAT)?;

    if timestamp.nanosecond() >= LEAP_SECOND_NANOS {
        return Err(TypeError::TimestampFormat { value: value.to_string() });
    }

    Ok(timestamp)
}

fn has_canonical_layout(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == DEAL_TIMESTAMP_LENGTH && bytes.iter().enumerate().all(|(index, byte)| match index {
        4 | 7 => *byte == b'-',
        10 => *byte == b'T',
        13 | 16 => *byte == b':',
        _ => byte.is_ascii_digit()
    })
}
