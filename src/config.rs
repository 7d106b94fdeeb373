use serde::{Deserialize, Serialize};

use crate::errors::{QuoteError, Result};

/// default repayment term in monthly periods
pub const DEFAULT_TERM_MONTHS: u32 = 36;

/// fractional digits kept by intermediate divisions
pub const DEFAULT_WORKING_SCALE: u32 = 10;

/// quote configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    pub term_months: u32,
    pub working_scale: u32,
    pub rate_decimal_places: u32,
    pub money_decimal_places: u32,
    pub solver: SolverConfig,
}

/// settings for the rate estimation root finder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// annual rate used to seed the iteration
    pub initial_annual_rate: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

/// accepted range for requested loan amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAmountLimits {
    pub minimum: u64,
    pub maximum: u64,
    pub increment: u64,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuoteConfig {
    /// 36 month term, 10 digit working precision, rate to 1dp, money to 2dp
    pub fn standard() -> Self {
        Self {
            term_months: DEFAULT_TERM_MONTHS,
            working_scale: DEFAULT_WORKING_SCALE,
            rate_decimal_places: 1,
            money_decimal_places: 2,
            solver: SolverConfig::default(),
        }
    }

    pub fn with_term_months(mut self, term_months: u32) -> Self {
        self.term_months = term_months;
        self
    }

    pub fn with_working_scale(mut self, scale: u32) -> Self {
        self.working_scale = scale;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.term_months == 0 {
            return Err(QuoteError::InvalidConfiguration {
                message: "term must be at least one month".to_string(),
            });
        }

        // rust_decimal carries at most 28 fractional digits
        if self.working_scale == 0 || self.working_scale > 28 {
            return Err(QuoteError::InvalidConfiguration {
                message: format!("working scale {} outside 1..=28", self.working_scale),
            });
        }

        if self.money_decimal_places > self.working_scale || self.rate_decimal_places > self.working_scale {
            return Err(QuoteError::InvalidConfiguration {
                message: "output precision cannot exceed working precision".to_string(),
            });
        }

        self.solver.validate()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_annual_rate: 0.10,
            tolerance: 1e-8,
            max_iterations: 100,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_initial_annual_rate(mut self, rate: f64) -> Self {
        self.initial_annual_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(QuoteError::InvalidConfiguration {
                message: format!("solver tolerance must be positive, got {}", self.tolerance),
            });
        }

        if self.max_iterations == 0 {
            return Err(QuoteError::InvalidConfiguration {
                message: "solver needs at least one iteration".to_string(),
            });
        }

        if !(self.initial_annual_rate.is_finite() && self.initial_annual_rate > 0.0) {
            return Err(QuoteError::InvalidConfiguration {
                message: format!("initial annual rate must be positive, got {}", self.initial_annual_rate),
            });
        }

        Ok(())
    }
}

impl Default for LoanAmountLimits {
    fn default() -> Self {
        Self::standard()
    }
}

impl LoanAmountLimits {
    /// any 100 increment between 1000 and 15000 inclusive
    pub fn standard() -> Self {
        Self {
            minimum: 1_000,
            maximum: 15_000,
            increment: 100,
        }
    }

    pub fn contains(&self, amount: u64) -> bool {
        self.increment > 0 && amount >= self.minimum && amount <= self.maximum && amount % self.increment == 0
    }

    pub fn validate(&self) -> Result<()> {
        if self.increment == 0 {
            return Err(QuoteError::InvalidConfiguration {
                message: "loan amount increment must be positive".to_string(),
            });
        }

        if self.minimum > self.maximum {
            return Err(QuoteError::InvalidConfiguration {
                message: format!("minimum {} exceeds maximum {}", self.minimum, self.maximum),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_config() {
        let config = QuoteConfig::standard();
        assert_eq!(config.term_months, 36);
        assert_eq!(config.working_scale, 10);
        assert_eq!(config.rate_decimal_places, 1);
        assert_eq!(config.money_decimal_places, 2);
        assert_eq!(config.solver.max_iterations, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(QuoteConfig::standard().with_term_months(0).validate().is_err());
        assert!(QuoteConfig::standard().with_working_scale(0).validate().is_err());
        assert!(QuoteConfig::standard().with_working_scale(29).validate().is_err());
        assert!(QuoteConfig::standard()
            .with_solver(SolverConfig::default().with_max_iterations(0))
            .validate()
            .is_err());
        assert!(SolverConfig::new(0.0, 10).validate().is_err());
        assert!(SolverConfig::new(f64::NAN, 10).validate().is_err());
    }

    #[test]
    fn test_loan_amount_limits() {
        let limits = LoanAmountLimits::standard();
        assert!(limits.contains(1_000));
        assert!(limits.contains(1_100));
        assert!(limits.contains(15_000));
        assert!(!limits.contains(900));
        assert!(!limits.contains(1_050));
        assert!(!limits.contains(15_100));
        assert!(!limits.contains(0));

        let broken = LoanAmountLimits { minimum: 10, maximum: 5, increment: 1 };
        assert!(broken.validate().is_err());
        let broken = LoanAmountLimits { minimum: 0, maximum: 5, increment: 0 };
        assert!(broken.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = QuoteConfig::standard().with_term_months(24);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: QuoteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
