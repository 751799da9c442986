mod amount;
mod currency;
mod errors;
mod timestamp;

pub use amount::parse_deal_amount;
pub use currency::CurrencyCode;
pub use errors::TypeError;
pub use timestamp::{parse_deal_timestamp, DEAL_TIMESTAMP_FORMAT};

pub type DealId = String;
