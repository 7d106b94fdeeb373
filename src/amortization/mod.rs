pub mod newton;
pub mod rate;
pub mod repayment;

use crate::config::{QuoteConfig, SolverConfig, DEFAULT_WORKING_SCALE};
use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use newton::{newton_raphson_bracketed, SolverResult};
pub use rate::approximate_annual_rate;
pub use repayment::monthly_repayment;

/// trait for the loan maths used when assembling a quote
pub trait RepaymentModel {
    /// unrounded monthly payment for one loan
    fn monthly_repayment(&self, principal: Money, annual_rate: Rate, periods: u32) -> Result<Money>;

    /// annual rate implied by a monthly payment on a principal
    fn approximate_annual_rate(&self, principal: Money, periods: u32, monthly_payment: Money) -> Result<Rate>;
}

/// fixed-rate annuity maths at a given working precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnuityModel {
    pub working_scale: u32,
    pub solver: SolverConfig,
}

impl AnnuityModel {
    pub fn new(working_scale: u32, solver: SolverConfig) -> Self {
        Self { working_scale, solver }
    }

    pub fn from_config(config: &QuoteConfig) -> Self {
        Self::new(config.working_scale, config.solver)
    }
}

impl Default for AnnuityModel {
    fn default() -> Self {
        Self::new(DEFAULT_WORKING_SCALE, SolverConfig::default())
    }
}

impl RepaymentModel for AnnuityModel {
    fn monthly_repayment(&self, principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
        repayment::monthly_repayment(principal, annual_rate, periods, self.working_scale)
    }

    fn approximate_annual_rate(&self, principal: Money, periods: u32, monthly_payment: Money) -> Result<Rate> {
        rate::approximate_annual_rate(principal, periods, monthly_payment, &self.solver)
    }
}

impl<M: RepaymentModel + ?Sized> RepaymentModel for &M {
    fn monthly_repayment(&self, principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
        (**self).monthly_repayment(principal, annual_rate, periods)
    }

    fn approximate_annual_rate(&self, principal: Money, periods: u32, monthly_payment: Money) -> Result<Rate> {
        (**self).approximate_annual_rate(principal, periods, monthly_payment)
    }
}
