use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// an offer of funds from a single lender in the market
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LenderOffer {
    pub name: String,
    /// annual interest rate as a fraction
    pub rate: Rate,
    /// amount available to lend, in whole currency units
    pub available: u64,
}

impl LenderOffer {
    pub fn new(name: impl Into<String>, rate: Rate, available: u64) -> Self {
        Self {
            name: name.into(),
            rate,
            available,
        }
    }
}

/// amount drawn from one lender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub lender: LenderOffer,
    pub drawn: u64,
}

/// lenders funding a loan, in the order they were drawn from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllocationPlan {
    allocations: Vec<Allocation>,
}

impl AllocationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// append a draw; identical offers are kept as separate entries
    pub fn push(&mut self, lender: LenderOffer, drawn: u64) {
        self.allocations.push(Allocation { lender, drawn });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Allocation> {
        self.allocations.iter()
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// first lender drawn from; present even for a zero amount
    pub fn anchor(&self) -> Option<&Allocation> {
        self.allocations.first()
    }

    pub fn total_drawn(&self) -> u64 {
        self.allocations.iter().map(|a| a.drawn).sum()
    }

    pub fn drawn_from(&self, name: &str) -> Option<u64> {
        self.allocations
            .iter()
            .find(|a| a.lender.name == name)
            .map(|a| a.drawn)
    }
}

impl FromIterator<(LenderOffer, u64)> for AllocationPlan {
    fn from_iter<I: IntoIterator<Item = (LenderOffer, u64)>>(iter: I) -> Self {
        let mut plan = AllocationPlan::new();
        for (lender, drawn) in iter {
            plan.push(lender, drawn);
        }
        plan
    }
}

impl<'a> IntoIterator for &'a AllocationPlan {
    type Item = &'a Allocation;
    type IntoIter = std::slice::Iter<'a, Allocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.allocations.iter()
    }
}

/// consolidated quote for one loan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanQuote {
    pub requested_amount: u64,
    /// blended annual rate in percent, e.g. 7.0
    pub rate: Decimal,
    pub monthly_repayment: Money,
    pub total_repayment: Money,
}
