use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypeError {
    #[error("Currency code error: [{0}] is not exactly 3 characters")]
    CurrencyLength(String),
    #[error("Timestamp error: [{value}] is not a YYYY-MM-DDTHH:MM:SS local date-time")]
    TimestampFormat {
        value: String
    },
    #[error("Timestamp error: {0}")]
    TimestampParse(#[from] chrono::ParseError),
    #[error("Amount error: [{value}] is not a plain decimal")]
    AmountFormat {
        value: String
    },
    #[error("Amount error: [{value}] is outside the supported range")]
    AmountRange {
        value: String
    },
    #[error("Amount error: [{value}] has more fractional digits than can be stored without rounding")]
    AmountPrecision {
        value: String
    }
}
