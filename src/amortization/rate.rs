use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::debug;

use crate::amortization::newton::newton_raphson_bracketed;
use crate::config::SolverConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{QuoteError, Result};

/// Estimate the annual rate implied by a monthly payment.
///
/// Solves for the monthly growth multiplier `m = 1 + r` in
///
/// ```text
/// f(m) = (P + A)·m^n − P·m^(n+1) − A = 0
/// ```
///
/// `f(1)` is zero for every loan, so the iteration runs on
/// `g(m) = f(m) / (1 − m) = A·(1 + m + … + m^(n−1)) − P·m^n`, which keeps the
/// same positive root without the spurious one at `m = 1`. That root lies
/// between a zero rate (`m = 1`) and the interest-only rate (`m = 1 + A/P`).
///
/// Returns `12 · (m − 1)`.
pub fn approximate_annual_rate(
    principal: Money,
    periods: u32,
    monthly_payment: Money,
    solver: &SolverConfig,
) -> Result<Rate> {
    if periods == 0 {
        return Err(QuoteError::invalid_argument("number of payment periods must be positive"));
    }

    if !principal.is_positive() {
        return Err(QuoteError::invalid_argument(format!("principal must be positive: {}", principal)));
    }

    if !monthly_payment.is_positive() {
        return Err(QuoteError::invalid_argument(format!(
            "monthly payment must be positive: {}",
            monthly_payment
        )));
    }

    let tolerance = Decimal::from_f64(solver.tolerance)
        .ok_or_else(|| QuoteError::calculation("solver tolerance not representable as a decimal"))?;

    // what is left unpaid after n payments with no interest at all
    let repaid = monthly_payment.times(periods).ok_or_else(|| {
        QuoteError::calculation(format!("{} over {} periods overflows", monthly_payment, periods))
    })?;
    let shortfall = principal - repaid;

    if shortfall.as_decimal() > tolerance {
        return Err(QuoteError::invalid_argument(format!(
            "monthly payment {} cannot repay principal {} over {} periods",
            monthly_payment, principal, periods
        )));
    }

    if shortfall.abs().as_decimal() <= tolerance {
        return Ok(Rate::ZERO);
    }

    let p = to_f64(principal)?;
    let a = to_f64(monthly_payment)?;

    let g = |m: f64| {
        let mut annuity = 0.0;
        let mut power = 1.0;
        for _ in 0..periods {
            annuity += power;
            power *= m;
        }
        a * annuity - p * power
    };

    let dg = |m: f64| {
        let mut annuity = 0.0;
        let mut power = 1.0;
        for k in 1..periods {
            annuity += k as f64 * power;
            power *= m;
        }
        a * annuity - periods as f64 * p * power
    };

    let initial_guess = 1.0 + solver.initial_annual_rate / 12.0;
    let bounds = (1.0, 1.0 + a / p);

    let result = newton_raphson_bracketed(g, dg, initial_guess, bounds, solver)?;

    debug!(
        multiplier = result.root,
        iterations = result.iterations,
        residual = result.residual,
        "estimated monthly growth multiplier"
    );

    let annual = 12.0 * (result.root - 1.0);
    Decimal::from_f64(annual)
        .map(Rate::from_decimal)
        .ok_or_else(|| QuoteError::calculation(format!("estimated rate {} not representable", annual)))
}

fn to_f64(value: Money) -> Result<f64> {
    value
        .as_decimal()
        .to_f64()
        .ok_or_else(|| QuoteError::calculation(format!("{} not representable as f64", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::repayment::monthly_repayment;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn estimate(principal: &str, periods: u32, payment: &str) -> Result<f64> {
        approximate_annual_rate(
            Money::from_str_exact(principal).unwrap(),
            periods,
            Money::from_str_exact(payment).unwrap(),
            &SolverConfig::default(),
        )
        .map(|rate| rate.as_decimal().to_f64().unwrap())
    }

    #[test]
    fn test_annual_interest_rate() {
        assert_abs_diff_eq!(estimate("1000", 36, "30.78").unwrap(), 0.06787, epsilon = 0.0001);
        assert_abs_diff_eq!(estimate("1000", 36, "500").unwrap(), 6.0, epsilon = 0.0001);
        assert_abs_diff_eq!(estimate("1000", 36, "27.78").unwrap(), 0.001, epsilon = 0.001);
    }

    #[test]
    fn test_blended_market_payment() {
        // 480 at 6.9% plus 520 at 7.1%
        let rate = estimate("1000", 36, "30.8789462853").unwrap();
        assert_abs_diff_eq!(rate, 0.07004, epsilon = 0.00001);
    }

    #[test]
    fn test_unit_principal() {
        assert_abs_diff_eq!(estimate("1", 36, "0.05").unwrap(), 0.4321, epsilon = 0.0001);
    }

    #[test]
    fn test_single_period() {
        assert_abs_diff_eq!(estimate("1000", 1, "1005").unwrap(), 0.06, epsilon = 0.0001);
    }

    #[test]
    fn test_very_high_rates() {
        assert_abs_diff_eq!(estimate("1000", 36, "833.33").unwrap(), 10.0, epsilon = 0.001);
        assert_abs_diff_eq!(estimate("1000", 36, "1000").unwrap(), 12.0, epsilon = 0.001);
    }

    #[test]
    fn test_zero_rate_payment() {
        assert_eq!(estimate("3600", 36, "100").unwrap(), 0.0);
        // rounding residue of a straight line payment still reads as zero
        assert_eq!(estimate("1000", 36, "27.7777777778").unwrap(), 0.0);
    }

    #[test]
    fn test_non_positive_principal() {
        assert!(matches!(estimate("-1000", 36, "27.78"), Err(QuoteError::InvalidArgument { .. })));
        assert!(matches!(estimate("-1", 36, "27.78"), Err(QuoteError::InvalidArgument { .. })));
        assert!(matches!(estimate("0", 36, "27.78"), Err(QuoteError::InvalidArgument { .. })));
    }

    #[test]
    fn test_monthly_payment_too_small() {
        assert!(matches!(estimate("1000", 36, "27.77"), Err(QuoteError::InvalidArgument { .. })));
        assert!(matches!(estimate("1000", 36, "-27.78"), Err(QuoteError::InvalidArgument { .. })));
        assert!(matches!(estimate("1000", 36, "0"), Err(QuoteError::InvalidArgument { .. })));
    }

    #[test]
    fn test_invalid_term() {
        assert!(matches!(estimate("1000", 0, "27.78"), Err(QuoteError::InvalidArgument { .. })));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let solver = SolverConfig::new(1e-20, 2);
        let result = approximate_annual_rate(
            Money::from_major(1_000),
            36,
            Money::from_str_exact("500").unwrap(),
            &solver,
        );
        assert!(matches!(result, Err(QuoteError::NumericDivergence { iterations: 2, .. })));
    }

    #[test]
    fn test_seed_outside_bracket() {
        // a 10% seed lies above the interest-only bound of a 1% loan
        let payment = monthly_repayment(Money::from_major(1_000), Rate::from_percentage(1), 360, 10).unwrap();
        let rate = approximate_annual_rate(Money::from_major(1_000), 360, payment, &SolverConfig::default()).unwrap();
        assert_abs_diff_eq!(rate.as_decimal().to_f64().unwrap(), 0.01, epsilon = 0.0001);
    }

    #[test]
    fn test_seed_does_not_change_root() {
        let payment = Money::from_str_exact("30.8789462853").unwrap();
        for seed in [0.01, 0.07, 0.5, 3.0] {
            let solver = SolverConfig::default().with_initial_annual_rate(seed);
            let rate = approximate_annual_rate(Money::from_major(1_000), 36, payment, &solver).unwrap();
            assert_abs_diff_eq!(rate.as_decimal().to_f64().unwrap(), 0.07004, epsilon = 0.00001);
        }
    }

    proptest! {
        #[test]
        fn prop_repayment_round_trip(
            principal in 1i64..1_000_000,
            bps in 10u32..30_000,
            periods in prop::sample::select(vec![1u32, 12, 24, 36, 60, 120]),
        ) {
            let rate = Rate::from_bps(bps);
            let payment = monthly_repayment(Money::from_major(principal), rate, periods, 10).unwrap();
            let estimated = approximate_annual_rate(Money::from_major(principal), periods, payment, &SolverConfig::default()).unwrap();

            let error = (estimated.as_decimal() - rate.as_decimal()).abs();
            prop_assert!(error < Decimal::new(1, 3), "rate {} estimated as {}", rate, estimated);
        }
    }
}
