//! Net present value and related discounting metrics

use rayon::prelude::*;

use crate::error::{FinanceError, FinanceResult};
use crate::validation::{check_cash_flows, check_rate};

/// Net present value of `cash_flows` at a constant periodic `rate`
///
/// Index `t` is discounted by `(1 + rate)^t`, so the first flow is undiscounted.
/// An empty sequence has an NPV of zero.
pub fn net_present_value(cash_flows: &[f64], rate: f64) -> FinanceResult<f64> {
    check_rate(rate)?;
    Ok(npv_at_rate(cash_flows, rate))
}

/// Net present value with a possibly different rate in each period
///
/// The discount factor to period `t` is the product of `1 + rates[i]` for
/// `i = 1..=t`; `rates[0]` applies to no flow and is ignored.
pub fn net_present_value_with_rates(cash_flows: &[f64], rates: &[f64]) -> FinanceResult<f64> {
    if cash_flows.len() != rates.len() {
        return Err(FinanceError::invalid_layout(format!(
            "{} cash flows but {} rates; lengths must match",
            cash_flows.len(),
            rates.len()
        )));
    }

    let mut npv = 0.0;
    let mut discount_factor = 1.0;

    for (t, (&cf, &rate)) in cash_flows.iter().zip(rates).enumerate() {
        if t > 0 {
            discount_factor *= 1.0 + check_rate(rate)?;
        }
        npv += cf / discount_factor;
    }

    Ok(npv)
}

/// Present value of inflows after period 0 per unit of the initial outflow
///
/// Requires the conventional layout where `cash_flows[0]` is the investment.
pub fn profitability_index(cash_flows: &[f64], rate: f64) -> FinanceResult<f64> {
    check_rate(rate)?;
    check_cash_flows(cash_flows)?;

    let initial = cash_flows[0];
    if initial >= 0.0 {
        return Err(FinanceError::invalid_layout(
            "profitability index needs an initial outflow (negative first cash flow)",
        ));
    }

    let pv_future: f64 = cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum();

    Ok(pv_future / initial.abs())
}

/// NPV evaluated at each rate of a grid, in parallel
///
/// Returns `(rate, npv)` pairs in the order of `rates`.
pub fn npv_profile(cash_flows: &[f64], rates: &[f64]) -> FinanceResult<Vec<(f64, f64)>> {
    rates
        .par_iter()
        .map(|&rate| net_present_value(cash_flows, rate).map(|npv| (rate, npv)))
        .collect()
}

/// NPV at a rate already known to be valid
pub(crate) fn npv_at_rate(cash_flows: &[f64], rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// NPV and its derivative with respect to rate
pub(crate) fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (discount * (1.0 + rate));
        }
    }

    (npv, dnpv)
}
