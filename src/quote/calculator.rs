use tracing::debug;

use crate::amortization::{AnnuityModel, RepaymentModel};
use crate::config::QuoteConfig;
use crate::decimal::{round_half_up, Money, Rate};
use crate::errors::{QuoteError, Result};
use crate::types::{AllocationPlan, LenderOffer, LoanQuote};

use super::allocator::LenderBook;

/// quotes loans against a fixed snapshot of lender offers
#[derive(Debug, Clone)]
pub struct QuoteCalculator<M = AnnuityModel> {
    book: LenderBook,
    config: QuoteConfig,
    model: M,
}

impl QuoteCalculator<AnnuityModel> {
    /// standard 36 month quotes
    pub fn new(lenders: Vec<LenderOffer>) -> Self {
        let config = QuoteConfig::standard();
        let model = AnnuityModel::from_config(&config);
        Self {
            book: LenderBook::new(lenders),
            config,
            model,
        }
    }

    pub fn with_config(lenders: Vec<LenderOffer>, config: QuoteConfig) -> Result<Self> {
        let model = AnnuityModel::from_config(&config);
        Self::with_model(lenders, config, model)
    }
}

impl<M: RepaymentModel> QuoteCalculator<M> {
    pub fn with_model(lenders: Vec<LenderOffer>, config: QuoteConfig, model: M) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            book: LenderBook::new(lenders),
            config,
            model,
        })
    }

    /// lenders ranked in draw order
    pub fn lenders(&self) -> &[LenderOffer] {
        self.book.lenders()
    }

    pub fn book(&self) -> &LenderBook {
        &self.book
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// allocate `amount` across the market and price the resulting loan
    pub fn quote(&self, amount: u64) -> Result<LoanQuote> {
        let plan = self.book.allocate(amount)?;
        self.build_quote(amount, &plan)
    }

    /// Price an allocation plan.
    ///
    /// Per-lender payments are summed at working precision; only the figures
    /// on the returned quote are rounded. The total is rounded up from the
    /// unrounded sum so lenders are never short.
    pub fn build_quote(&self, amount: u64, plan: &AllocationPlan) -> Result<LoanQuote> {
        let anchor = plan.anchor().ok_or_else(|| QuoteError::InvariantViolation {
            message: format!("no lenders allocated to a loan of {}", amount),
        })?;

        let term = self.config.term_months;
        let mut raw_monthly = Money::ZERO;

        for allocation in plan {
            if allocation.drawn == 0 {
                continue;
            }

            let payment = self
                .model
                .monthly_repayment(Money::from(allocation.drawn), allocation.lender.rate, term)?;

            debug!(
                lender = %allocation.lender.name,
                drawn = allocation.drawn,
                payment = %payment,
                "lender repayment"
            );

            raw_monthly = raw_monthly
                .checked_add(payment)
                .ok_or_else(|| QuoteError::calculation("sum of lender repayments overflows"))?;
        }

        let raw_total = raw_monthly
            .times(term)
            .ok_or_else(|| QuoteError::calculation(format!("{} over {} months overflows", raw_monthly, term)))?;

        let interest_free = plan
            .iter()
            .filter(|a| a.drawn > 0)
            .all(|a| a.lender.rate.is_zero());

        // nothing is borrowed, so the anchor lender's rate stands
        let annual_rate = if amount == 0 {
            anchor.lender.rate
        } else if interest_free {
            // straight line payments lose digits at working precision, which
            // would read as a payment too small to clear the principal
            Rate::ZERO
        } else {
            self.model
                .approximate_annual_rate(Money::from(amount), term, raw_monthly)?
        };

        debug!(
            amount,
            lenders = plan.len(),
            raw_monthly = %raw_monthly,
            raw_total = %raw_total,
            rate = %annual_rate,
            "quote assembled"
        );

        let percentage = annual_rate
            .as_percentage()
            .ok_or_else(|| QuoteError::calculation(format!("rate {} too large to quote", annual_rate)))?;

        Ok(LoanQuote {
            requested_amount: amount,
            rate: round_half_up(percentage, self.config.rate_decimal_places),
            monthly_repayment: raw_monthly.round_half_up(self.config.money_decimal_places),
            total_repayment: raw_total.round_up(self.config.money_decimal_places),
        })
    }
}
