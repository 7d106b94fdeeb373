use rust_decimal::Decimal;

use crate::decimal::{div_half_up, Money, Rate};
use crate::errors::{QuoteError, Result};

/// Fixed monthly payment that retires `principal` over `periods` months.
///
/// c = P * r / (1 - 1 / (1 + r)^n), where r is the monthly rate.
///
/// Every division is rounded half-up to `scale` places. The payment is left
/// at working precision so callers can sum several loans before rounding.
pub fn monthly_repayment(principal: Money, annual_rate: Rate, periods: u32, scale: u32) -> Result<Money> {
    if periods == 0 {
        return Err(QuoteError::invalid_argument("number of payment periods must be positive"));
    }

    if annual_rate.is_negative() {
        return Err(QuoteError::invalid_argument(format!(
            "annual interest rate cannot be negative: {}",
            annual_rate.as_decimal()
        )));
    }

    let monthly_rate = annual_rate.monthly_rate(scale).as_decimal();

    // the annuity denominator vanishes at zero rate
    if monthly_rate.is_zero() {
        return straight_line(principal, periods, scale);
    }

    let compound = compound_factor(Decimal::ONE + monthly_rate, periods)?;
    let discount = div_half_up(Decimal::ONE, compound, scale)
        .ok_or_else(|| QuoteError::calculation("compounding factor collapsed to zero"))?;

    let numerator = principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .ok_or_else(|| QuoteError::calculation("principal too large for monthly interest"))?;

    let payment = div_half_up(numerator, Decimal::ONE - discount, scale).ok_or_else(|| {
        QuoteError::calculation(format!("monthly rate {} too small to amortize", monthly_rate))
    })?;

    Ok(Money::from_decimal(payment))
}

/// equal principal instalments with no interest
fn straight_line(principal: Money, periods: u32, scale: u32) -> Result<Money> {
    div_half_up(principal.as_decimal(), Decimal::from(periods), scale)
        .map(Money::from_decimal)
        .ok_or_else(|| QuoteError::calculation("cannot divide principal across periods"))
}

/// (1 + r)^n by repeated multiplication
fn compound_factor(base: Decimal, periods: u32) -> Result<Decimal> {
    let mut compound = Decimal::ONE;
    for _ in 0..periods {
        compound = compound.checked_mul(base).ok_or_else(|| {
            QuoteError::calculation(format!("compounding {} over {} periods overflows", base, periods))
        })?;
    }
    Ok(compound)
}
