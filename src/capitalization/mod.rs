//! Capitalization regimes
//!
//! Growth and discount of a single amount under:
//! - **Simple** (linear) interest: factor `1 + r·n`
//! - **Compound** (exponential) interest: factor `(1 + r)^n`
//! - **Continuous** compounding: factor `e^(r·n)`
//!
//! Period counts may be fractional; use [`Term`](crate::Term) to convert a term
//! in days over a day basis into periods.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinanceError, FinanceResult};
use crate::validation::{
    check_finite_rate, check_non_negative_periods, check_positive_periods, check_rate,
};

/// Rule governing how interest accrues over multiple periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Linear accrual on the original principal
    #[serde(alias = "lin", alias = "linear")]
    Simple,
    /// Exponential accrual, interest earns interest
    #[default]
    #[serde(alias = "exp", alias = "exponential")]
    Compound,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Simple => write!(f, "simple"),
            Regime::Compound => write!(f, "compound"),
        }
    }
}

impl FromStr for Regime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" | "lin" | "linear" => Ok(Regime::Simple),
            "compound" | "exp" | "exponential" => Ok(Regime::Compound),
            other => Err(format!("Unknown capitalization regime: {}", other)),
        }
    }
}

/// Growth factor of one unit over `periods` at `rate`
///
/// A simple-regime factor can reach zero or go negative for negative rates held
/// long enough; a negative factor is rejected, zero is returned as-is.
pub fn capitalization_factor(rate: f64, periods: f64, regime: Regime) -> FinanceResult<f64> {
    check_rate(rate)?;
    check_non_negative_periods(periods)?;

    let factor = match regime {
        Regime::Simple => 1.0 + rate * periods,
        Regime::Compound => (1.0 + rate).powf(periods),
    };

    if factor < 0.0 {
        return Err(FinanceError::invalid_rate(
            rate,
            "simple interest over this many periods implies negative growth",
        ));
    }

    Ok(factor)
}

/// Future value of `principal` after `periods`
pub fn future_value(principal: f64, rate: f64, periods: f64, regime: Regime) -> FinanceResult<f64> {
    Ok(principal * capitalization_factor(rate, periods, regime)?)
}

/// Present value of `future_amount` due after `periods`
pub fn present_value(
    future_amount: f64,
    rate: f64,
    periods: f64,
    regime: Regime,
) -> FinanceResult<f64> {
    let factor = capitalization_factor(rate, periods, regime)?;
    if factor == 0.0 {
        return Err(FinanceError::division_by_zero("present_value", factor));
    }
    Ok(future_amount / factor)
}

/// Future value under continuous compounding: `principal × e^(rate·periods)`
pub fn continuous_future_value(principal: f64, rate: f64, periods: f64) -> FinanceResult<f64> {
    check_finite_rate(rate)?;
    check_non_negative_periods(periods)?;
    Ok(principal * (rate * periods).exp())
}

/// Present value under continuous discounting: `amount / e^(rate·periods)`
pub fn continuous_present_value(amount: f64, rate: f64, periods: f64) -> FinanceResult<f64> {
    check_finite_rate(rate)?;
    check_non_negative_periods(periods)?;
    Ok(amount * (-rate * periods).exp())
}

/// Rate per period that grows `present` into `future` over `periods`
///
/// Simple: `((F/P) - 1) / n`. Compound: `(F/P)^(1/n) - 1`.
pub fn effective_transaction_rate(
    future: f64,
    present: f64,
    periods: f64,
    regime: Regime,
) -> FinanceResult<f64> {
    let ratio = transaction_ratio("effective_transaction_rate", future, present, periods)?;

    match regime {
        Regime::Simple => Ok((ratio - 1.0) / periods),
        Regime::Compound => {
            if ratio <= 0.0 {
                return Err(FinanceError::invalid_rate(
                    ratio - 1.0,
                    "future and present amounts must share a sign under compounding",
                ));
            }
            Ok(ratio.powf(1.0 / periods) - 1.0)
        }
    }
}

/// Continuously compounded rate per period implied by `present` and `future`: `ln(F/P) / n`
pub fn continuous_transaction_rate(future: f64, present: f64, periods: f64) -> FinanceResult<f64> {
    let ratio = transaction_ratio("continuous_transaction_rate", future, present, periods)?;
    if ratio <= 0.0 {
        return Err(FinanceError::invalid_rate(
            ratio - 1.0,
            "future and present amounts must share a sign under continuous compounding",
        ));
    }
    Ok(ratio.ln() / periods)
}

fn transaction_ratio(
    operation: &'static str,
    future: f64,
    present: f64,
    periods: f64,
) -> FinanceResult<f64> {
    check_positive_periods(periods)?;
    if present == 0.0 {
        return Err(FinanceError::division_by_zero(operation, present));
    }
    Ok(future / present)
}
