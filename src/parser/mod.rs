mod record_parser;

pub use record_parser::{raw_payload, RecordParser};

pub const DEAL_ID_HEADER: &str = "Deal Unique Id";
pub const FROM_CURRENCY_HEADER: &str = "From Currency ISO Code";
pub const TO_CURRENCY_HEADER: &str = "To Currency ISO Code";
pub const TIMESTAMP_HEADER: &str = "Deal timestamp";
pub const AMOUNT_HEADER: &str = "Deal Amount";

pub const REQUIRED_HEADERS: [&str; 5] = [
    DEAL_ID_HEADER,
    FROM_CURRENCY_HEADER,
    TO_CURRENCY_HEADER,
    TIMESTAMP_HEADER,
    AMOUNT_HEADER
];
