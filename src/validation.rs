//! Domain guards shared by every calculation module

use crate::error::{FinanceError, FinanceResult};

/// Rates with absolute value below this are treated as zero in annuity formulas
pub const ZERO_RATE_EPSILON: f64 = 1e-10;

/// Require a finite periodic rate strictly greater than -1
pub fn check_rate(rate: f64) -> FinanceResult<f64> {
    if !rate.is_finite() {
        return Err(FinanceError::invalid_rate(rate, "rate must be finite"));
    }
    if rate <= -1.0 {
        return Err(FinanceError::invalid_rate(
            rate,
            "rate must be greater than -1 (growth factor 1 + rate must be positive)",
        ));
    }
    Ok(rate)
}

/// Require a finite rate of any sign (continuously compounded rates)
pub fn check_finite_rate(rate: f64) -> FinanceResult<f64> {
    if !rate.is_finite() {
        return Err(FinanceError::invalid_rate(rate, "rate must be finite"));
    }
    Ok(rate)
}

/// Require a growth base `1 + something` derived from a rate to be positive
pub fn check_growth_base(rate: f64, base: f64) -> FinanceResult<f64> {
    if !base.is_finite() || base <= 0.0 {
        return Err(FinanceError::invalid_rate(
            rate,
            "implied growth base must be positive",
        ));
    }
    Ok(base)
}

/// Require a finite, non-negative period count
pub fn check_non_negative_periods(periods: f64) -> FinanceResult<f64> {
    if !periods.is_finite() || periods < 0.0 {
        return Err(FinanceError::invalid_period(
            periods,
            "period count must be finite and non-negative",
        ));
    }
    Ok(periods)
}

/// Require a finite, strictly positive period count or frequency
pub fn check_positive_periods(periods: f64) -> FinanceResult<f64> {
    if !periods.is_finite() || periods <= 0.0 {
        return Err(FinanceError::invalid_period(
            periods,
            "period count must be finite and positive",
        ));
    }
    Ok(periods)
}

/// Require a non-empty cash flow sequence
pub fn check_cash_flows(cash_flows: &[f64]) -> FinanceResult<&[f64]> {
    if cash_flows.is_empty() {
        return Err(FinanceError::invalid_layout("cash flow sequence is empty"));
    }
    Ok(cash_flows)
}
