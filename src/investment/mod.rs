//! Investment evaluation methods
//!
//! Metrics over a cash flow sequence where index `t` is period `t` (starting at
//! 0) and the sign gives direction (negative = outflow, positive = inflow):
//! - Net present value, at a constant rate or period-varying rates
//! - Internal rate of return
//! - Payback and discounted payback period
//! - Profitability index

mod irr;
pub mod loader;
mod npv;
mod payback;

pub use irr::{
    internal_rate_of_return, internal_rate_of_return_with, IrrConfig, DEFAULT_GUESS,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use loader::{load_cash_flows, load_cash_flows_from_reader, LoadError};
pub use npv::{net_present_value, net_present_value_with_rates, npv_profile, profitability_index};
pub use payback::{discounted_payback_period, payback_period};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// All metrics for one cash flow sequence at one discount rate
///
/// Metrics that do not exist for the given layout are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    pub discount_rate: f64,
    pub periods: usize,
    pub net_present_value: f64,
    pub internal_rate_of_return: Option<f64>,
    pub payback_period: Option<f64>,
    pub discounted_payback_period: Option<f64>,
    pub profitability_index: Option<f64>,
}

/// Evaluate `cash_flows` at `rate` with every metric
///
/// A metric that is undefined for this sequence (no sign change, no payback,
/// no leading outflow) is reported as `None`. Other errors, such as an invalid
/// rate or an IRR solver failure, fail the whole evaluation.
pub fn evaluate(cash_flows: &[f64], rate: f64) -> FinanceResult<InvestmentSummary> {
    let npv = net_present_value(cash_flows, rate)?;

    Ok(InvestmentSummary {
        discount_rate: rate,
        periods: cash_flows.len(),
        net_present_value: npv,
        internal_rate_of_return: optional_metric("IRR", internal_rate_of_return(cash_flows))?,
        payback_period: optional_metric("payback period", payback_period(cash_flows))?,
        discounted_payback_period: optional_metric(
            "discounted payback period",
            discounted_payback_period(cash_flows, rate),
        )?,
        profitability_index: optional_metric(
            "profitability index",
            profitability_index(cash_flows, rate),
        )?,
    })
}

fn optional_metric(name: &str, result: FinanceResult<f64>) -> FinanceResult<Option<f64>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(
            err @ (FinanceError::NoSignChange
            | FinanceError::NoPayback
            | FinanceError::InvalidCashFlowLayout { .. }),
        ) => {
            debug!("{} not available: {}", name, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
