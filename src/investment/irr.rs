//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on the NPV function with a bisection fallback. Both loops are
//! bounded by `IrrConfig::max_iterations`.
//!
//! Sequences with several sign changes can have several IRRs. The solver returns
//! the first root it finds: the one Newton-Raphson reaches from the guess, or,
//! if Newton fails, the one bisection isolates in the search bracket.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::npv::{npv_and_derivative, npv_at_rate};
use crate::error::{FinanceError, FinanceResult};
use crate::validation::{check_cash_flows, check_rate};

/// Default initial guess for the periodic rate
pub const DEFAULT_GUESS: f64 = 0.1;

/// Default tolerance on the absolute NPV at the root
///
/// When the iterate stops moving before reaching it, a residual up to the
/// tolerance times the total absolute cash flow is accepted instead.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Default iteration cap for each solver phase
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Lower end of the bisection bracket (-99% per period)
const BRACKET_LOW: f64 = -0.99;

/// Initial upper end of the bisection bracket (1000% per period)
const BRACKET_HIGH: f64 = 10.0;

/// Upper ends beyond this are not searched
const BRACKET_HIGH_LIMIT: f64 = 1e6;

/// Newton steps below this, relative to `max(|rate|, 1)`, mean the iterate has stopped moving
const STEP_TOLERANCE: f64 = 1e-14;

/// Solver settings for [`internal_rate_of_return_with`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrConfig {
    /// Starting periodic rate for Newton-Raphson
    pub guess: f64,
    /// Convergence threshold on |NPV|
    pub tolerance: f64,
    /// Maximum iterations per solver phase
    pub max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            guess: DEFAULT_GUESS,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IrrConfig {
    pub fn with_guess(mut self, guess: f64) -> Self {
        self.guess = guess;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// IRR of `cash_flows` with the default solver settings
///
/// # Returns
/// * Periodic rate `r` such that `net_present_value(cash_flows, r) ≈ 0`
pub fn internal_rate_of_return(cash_flows: &[f64]) -> FinanceResult<f64> {
    internal_rate_of_return_with(cash_flows, &IrrConfig::default())
}

/// IRR of `cash_flows` with explicit solver settings
///
/// # Errors
/// * `InvalidCashFlowLayout` - empty sequence
/// * `NoSignChange` - no strictly positive or no strictly negative flow
/// * `InvalidRate` - guess at or below -100%
/// * `Convergence` - neither Newton-Raphson nor bisection reached tolerance
pub fn internal_rate_of_return_with(cash_flows: &[f64], config: &IrrConfig) -> FinanceResult<f64> {
    check_cash_flows(cash_flows)?;
    check_rate(config.guess)?;

    // At least one sign change is required for IRR to exist
    let has_positive = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_negative = cash_flows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return Err(FinanceError::NoSignChange);
    }

    match newton_raphson(cash_flows, config) {
        Some(rate) => Ok(rate),
        None => {
            warn!(
                "IRR: Newton-Raphson did not converge from guess {}, falling back to bisection",
                config.guess
            );
            bisection(cash_flows, config)
        }
    }
}

fn newton_raphson(cash_flows: &[f64], config: &IrrConfig) -> Option<f64> {
    let floor = rounding_floor(cash_flows, config.tolerance);
    let mut rate = config.guess;

    for iteration in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);
        trace!("IRR newton iteration {}: rate={} npv={:e}", iteration, rate, npv);

        if npv.abs() < config.tolerance {
            debug!("IRR converged by Newton-Raphson in {} iterations: {}", iteration, rate);
            return Some(rate);
        }

        if !dnpv.is_finite() || dnpv.abs() < 1e-20 {
            // Flat NPV, Newton cannot make progress
            return None;
        }

        let mut new_rate = rate - npv / dnpv;

        // Stay inside the domain rate > -1 by moving halfway to the boundary
        if !new_rate.is_finite() || new_rate <= -1.0 {
            new_rate = (rate - 1.0) / 2.0;
        }

        if (new_rate - rate).abs() < STEP_TOLERANCE * rate.abs().max(1.0) {
            // Iterate stopped moving; accept it if NPV is down at rounding level
            let residual = npv_at_rate(cash_flows, new_rate).abs();
            if residual <= floor {
                debug!(
                    "IRR settled by Newton-Raphson in {} iterations: {} (|npv| {:e})",
                    iteration, new_rate, residual
                );
                return Some(new_rate);
            }
            return None;
        }

        rate = new_rate;
    }

    None
}

fn bisection(cash_flows: &[f64], config: &IrrConfig) -> FinanceResult<f64> {
    let floor = rounding_floor(cash_flows, config.tolerance);
    let mut low = BRACKET_LOW;
    let mut high = BRACKET_HIGH;
    let mut npv_low = npv_at_rate(cash_flows, low);
    let mut npv_high = npv_at_rate(cash_flows, high);

    // Widen the upper end until the bracket holds a sign change
    while npv_low * npv_high > 0.0 && high < BRACKET_HIGH_LIMIT {
        high *= 2.0;
        npv_high = npv_at_rate(cash_flows, high);
    }

    if npv_low * npv_high > 0.0 {
        return Err(FinanceError::convergence(0, npv_low.abs().min(npv_high.abs())));
    }

    let mut residual = npv_low.abs().min(npv_high.abs());
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cash_flows, mid);
        residual = npv_mid.abs();

        if residual < config.tolerance {
            debug!("IRR converged by bisection in {} iterations: {}", iterations, mid);
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }

        if high - low <= f64::EPSILON * mid.abs().max(1.0) {
            // Bracket cannot shrink further in floating point
            if residual <= floor {
                debug!(
                    "IRR settled by bisection in {} iterations: {} (|npv| {:e})",
                    iterations, mid, residual
                );
                return Ok(mid);
            }
            break;
        }
    }

    Err(FinanceError::convergence(iterations, residual))
}

/// Smallest |NPV| distinguishable from zero for these flows
///
/// Each discounted term carries rounding error proportional to its size, so for
/// large amounts an absolute tolerance is unreachable. The floor scales the
/// tolerance by the total absolute cash flow.
fn rounding_floor(cash_flows: &[f64], tolerance: f64) -> f64 {
    let scale: f64 = cash_flows.iter().map(|cf| cf.abs()).sum();
    tolerance * scale.max(1.0)
}
