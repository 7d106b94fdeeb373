use std::collections::HashSet;

use tracing::{debug, warn};

use crate::errors::{QuoteError, Result};
use crate::types::{AllocationPlan, LenderOffer};

/// Order lenders cheapest first; among equal rates the larger offer comes
/// first. The sort is stable, so offers equal on both keys keep their order.
pub fn rank_lenders(lenders: &mut [LenderOffer]) {
    lenders.sort_by(|a, b| a.rate.cmp(&b.rate).then_with(|| b.available.cmp(&a.available)));
}

/// Draw `amount` from ranked lenders, exhausting each before moving on.
///
/// A zero amount still draws (nothing) from the first lender so the quote
/// has a rate to report. Fails when the lenders run out first, including
/// when there are none at all.
pub fn allocate(lenders: &[LenderOffer], amount: u64) -> Result<AllocationPlan> {
    let mut plan = AllocationPlan::new();
    let mut remaining = amount;

    for lender in lenders {
        if lender.available >= remaining {
            debug!(lender = %lender.name, rate = %lender.rate, drawn = remaining, "final draw");
            plan.push(lender.clone(), remaining);
            return Ok(plan);
        }

        debug!(lender = %lender.name, rate = %lender.rate, drawn = lender.available, "drawing full offer");
        plan.push(lender.clone(), lender.available);
        remaining -= lender.available;
    }

    Err(QuoteError::InsufficientLenders {
        requested: amount,
        available: total_available(lenders),
    })
}

fn total_available(lenders: &[LenderOffer]) -> u64 {
    lenders
        .iter()
        .fold(0u64, |total, lender| total.saturating_add(lender.available))
}

/// ranked snapshot of the lenders in a market
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LenderBook {
    lenders: Vec<LenderOffer>,
}

impl LenderBook {
    pub fn new(mut lenders: Vec<LenderOffer>) -> Self {
        let mut seen = HashSet::new();
        for lender in &lenders {
            if !seen.insert(lender.name.as_str()) {
                warn!(lender = %lender.name, "duplicate lender name in market");
            }
        }

        rank_lenders(&mut lenders);
        Self { lenders }
    }

    /// lenders in the order they are drawn from
    pub fn lenders(&self) -> &[LenderOffer] {
        &self.lenders
    }

    pub fn total_available(&self) -> u64 {
        total_available(&self.lenders)
    }

    pub fn allocate(&self, amount: u64) -> Result<AllocationPlan> {
        allocate(&self.lenders, amount)
    }
}
