use crate::config::LoanAmountLimits;
use crate::errors::{QuoteError, Result};

/// Parse a requested loan amount and check it against `limits`.
///
/// The amount must be a plain integer: no sign prefix, no leading zeroes.
pub fn parse_loan_amount(input: &str, limits: &LoanAmountLimits) -> Result<u64> {
    if input.starts_with('+') {
        return Err(QuoteError::invalid_parameter(format!(
            "Invalid loan amount format, must be an integer without leading plus: {}",
            input
        )));
    }

    let amount: i64 = input.parse().map_err(|_| {
        QuoteError::invalid_parameter(format!("Invalid loan amount format, must be an integer: {}", input))
    })?;

    let digits = input.trim_start_matches('-');
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(QuoteError::invalid_parameter(format!(
            "Invalid loan amount format, must be an integer without leading zeroes: {}",
            input
        )));
    }

    match u64::try_from(amount) {
        Ok(amount) if limits.contains(amount) => Ok(amount),
        _ => Err(QuoteError::invalid_parameter(format!(
            "Invalid loan amount, must be any {} increment between {}-{} inclusive: {}",
            limits.increment, limits.minimum, limits.maximum, input
        ))),
    }
}
