use crate::errors::{QuoteError, Result};
use crate::types::LoanQuote;

pub const CURRENCY_SYMBOL: &str = "£";

pub const USAGE: &str = "Usage: loan-quote <MARKET_FILE> <LOAN_AMOUNT>";

/// human readable quote, one figure per line
pub fn render_text(quote: &LoanQuote) -> String {
    format!(
        "Requested amount: {symbol}{}\nRate: {}%\nMonthly repayment: {symbol}{}\nTotal repayment: {symbol}{}",
        quote.requested_amount,
        quote.rate,
        quote.monthly_repayment,
        quote.total_repayment,
        symbol = CURRENCY_SYMBOL,
    )
}

/// pretty JSON with decimal figures as strings
pub fn render_json(quote: &LoanQuote) -> Result<String> {
    serde_json::to_string_pretty(quote).map_err(|e| QuoteError::calculation(format!("cannot render quote: {}", e)))
}

/// message shown for a failed quote, followed by the usage line
pub fn render_error(error: &QuoteError) -> String {
    let message = match error {
        QuoteError::InsufficientLenders { .. } => {
            "Insufficient offers from lenders to satisfy the loan. Try a smaller loan amount.".to_string()
        }
        other => other.to_string(),
    };
    format!("{}\n{}", message, USAGE)
}
