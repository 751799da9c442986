use crate::types::errors::TypeError;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// An ISO-style currency code, always stored trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub const LENGTH: usize = 3;

    /// Shape check on a raw value: trimmed length only, case is ignored.
    pub fn has_valid_length(value: &str) -> bool {
        value.trim().chars().count() == Self::LENGTH
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = TypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !Self::has_valid_length(value) {
            return Err(TypeError::CurrencyLength(value.to_string()));
        }

        Ok(CurrencyCode(value.trim().to_uppercase()))
    }
}
