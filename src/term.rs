//! Day-count terms
//!
//! Rates are quoted per period of a fixed number of days (the day basis); a term
//! expressed in days is converted to a real number of those periods.

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::validation::{check_non_negative_periods, check_positive_periods};

/// Common day bases
pub mod day_basis {
    pub const DAILY: f64 = 1.0;
    pub const BUSINESS_MONTH: f64 = 21.0;
    pub const MONTHLY: f64 = 30.0;
    pub const QUARTERLY: f64 = 90.0;
    pub const BUSINESS_YEAR: f64 = 252.0;
    pub const YEARLY: f64 = 360.0;
    pub const ACTUAL_YEAR: f64 = 365.0;
}

/// A term in days measured against the day length of one rate period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Length of the term in days
    pub days: f64,
    /// Number of days in one rate period (30 for a monthly rate, 360 for a yearly rate)
    pub day_basis: f64,
}

impl Term {
    pub fn new(days: f64, day_basis: f64) -> FinanceResult<Self> {
        check_non_negative_periods(days)?;
        check_positive_periods(day_basis).map_err(|_| {
            FinanceError::invalid_period(day_basis, "day basis must be finite and positive")
        })?;
        Ok(Self { days, day_basis })
    }

    /// A term counted directly in rate periods
    pub fn in_periods(periods: f64) -> FinanceResult<Self> {
        Self::new(periods, day_basis::DAILY)
    }

    /// Number of rate periods covered by the term (may be fractional)
    pub fn period_count(&self) -> f64 {
        self.days / self.day_basis
    }
}
