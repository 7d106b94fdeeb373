use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// round half away from zero, padding the result to exactly `dp` places
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    round_with(value, dp, RoundingStrategy::MidpointAwayFromZero)
}

/// round away from zero whenever any remainder is left beyond `dp` places
pub fn round_up(value: Decimal, dp: u32) -> Decimal {
    round_with(value, dp, RoundingStrategy::AwayFromZero)
}

/// divide and round half-up to `scale` places
pub fn div_half_up(dividend: Decimal, divisor: Decimal, scale: u32) -> Option<Decimal> {
    dividend
        .checked_div(divisor)
        .map(|quotient| quotient.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
}

fn round_with(value: Decimal, dp: u32, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, strategy);
    rounded.rescale(dp);
    rounded
}

/// Money type with no implicit rounding; every rounding step is explicit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s)?))
    }

    /// create from integer amount in major units
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// round half-up to `dp` places (customer facing figures)
    pub fn round_half_up(&self, dp: u32) -> Self {
        Money(round_half_up(self.0, dp))
    }

    /// round away from zero to `dp` places (totals owed to lenders)
    pub fn round_up(&self, dp: u32) -> Self {
        Money(round_up(self.0, dp))
    }

    /// multiply by a count of periods; `None` on overflow
    pub fn times(&self, periods: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(periods)).map(Money)
    }

    /// `None` on overflow
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// rate type for annual interest rates expressed as fractions (0.07 = 7%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from string with exact parsing (e.g., "0.069")
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Rate(Decimal::from_str_exact(s)?))
    }

    /// create from percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::from(100))
    }

    /// create from basis points (e.g., 500 for 5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage; `None` when the rate is too large to scale
    pub fn as_percentage(&self) -> Option<Decimal> {
        self.0.checked_mul(Decimal::ONE_HUNDRED)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// monthly rate from annual rate, rounded half-up to `scale` places
    pub fn monthly_rate(&self, scale: u32) -> Rate {
        Rate((self.0 / Decimal::from(12)).round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_percentage() {
            Some(percentage) => f.pad(&format!("{}%", percentage.normalize())),
            // beyond percentage range, show the raw fraction
            None => f.pad(&self.0.normalize().to_string()),
        }
    }
}

impl FromStr for Rate {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rate::from_str_exact(s)
    }
}
