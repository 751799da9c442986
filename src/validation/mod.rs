mod validator;
#[cfg(test)]
mod tests;

pub use validator::{ParsedValues, ValidationRule, Validator, RULES};
