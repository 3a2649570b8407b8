//! Payback period calculations
//!
//! The payback period is the number of periods until the cumulative cash flow
//! turns non-negative, interpolated linearly inside the period where it crosses.

use crate::error::{FinanceError, FinanceResult};
use crate::validation::{check_cash_flows, check_rate};

/// Periods until the cumulative undiscounted cash flow becomes non-negative
///
/// Returns 0 when the first flow is already non-negative.
pub fn payback_period(cash_flows: &[f64]) -> FinanceResult<f64> {
    check_cash_flows(cash_flows)?;
    cumulative_crossing(cash_flows.iter().copied())
}

/// Periods until the cumulative discounted cash flow becomes non-negative
pub fn discounted_payback_period(cash_flows: &[f64], rate: f64) -> FinanceResult<f64> {
    check_rate(rate)?;
    check_cash_flows(cash_flows)?;

    let discounted = cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32));

    cumulative_crossing(discounted)
}

fn cumulative_crossing(flows: impl Iterator<Item = f64>) -> FinanceResult<f64> {
    let mut cumulative = 0.0;

    for (t, cf) in flows.enumerate() {
        let previous = cumulative;
        cumulative += cf;

        if cumulative >= 0.0 {
            if t == 0 {
                return Ok(0.0);
            }
            // cf > 0 here since previous < 0 <= cumulative
            return Ok((t - 1) as f64 + (-previous) / cf);
        }
    }

    Err(FinanceError::NoPayback)
}
