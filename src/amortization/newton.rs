//! Newton-Raphson root finding, safeguarded by a bracket.

use tracing::trace;

use crate::config::SolverConfig;
use crate::errors::{QuoteError, Result};

/// outcome of a converged iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    pub root: f64,
    pub iterations: u32,
    /// function value at the root
    pub residual: f64,
}

/// Newton-Raphson iteration `x <- x - f(x) / f'(x)` kept inside `bounds`.
///
/// `f` must change sign across `bounds`. Each evaluation narrows the bracket,
/// and a Newton step that would leave it (or a vanishing derivative) is
/// replaced by bisection. Converges when `|f(x)| <= tolerance` or the step
/// shrinks below tolerance; gives up with `NumericDivergence` after
/// `max_iterations`.
pub fn newton_raphson_bracketed<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> Result<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = bounds;
    let f_lo = f(lo);
    let f_hi = f(hi);

    if !f_lo.is_finite() || !f_hi.is_finite() {
        return Err(QuoteError::NumericDivergence {
            iterations: 0,
            residual: f64::NAN,
        });
    }

    // orient the bracket so that f(lo) > 0 > f(hi) holds for updates below
    let rising = f_lo < f_hi;

    let mut x = if initial_guess > lo.min(hi) && initial_guess < lo.max(hi) {
        initial_guess
    } else {
        (lo + hi) / 2.0
    };
    let mut fx = f(x);

    for iteration in 0..config.max_iterations {
        if !fx.is_finite() {
            return Err(QuoteError::NumericDivergence {
                iterations: iteration,
                residual: fx,
            });
        }

        if fx.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if (fx > 0.0) != rising {
            lo = x;
        } else {
            hi = x;
        }

        let dfx = df(x);
        let newton = x - fx / dfx;
        let next = if dfx != 0.0 && newton.is_finite() && within(newton, lo, hi) {
            newton
        } else {
            (lo + hi) / 2.0
        };

        trace!(iteration, x, fx, dfx, next, "newton step");

        let step = next - x;
        x = next;
        fx = f(x);

        if step.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(QuoteError::NumericDivergence {
        iterations: config.max_iterations,
        residual: fx.abs(),
    })
}

fn within(x: f64, a: f64, b: f64) -> bool {
    x > a.min(b) && x < a.max(b)
}
