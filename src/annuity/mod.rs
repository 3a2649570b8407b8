//! Uniform payments series (level annuities)
//!
//! Present and future value of `n` equal payments at a constant periodic rate,
//! paid either at the end of each period (ordinary, deferred) or at the start
//! (due, advance). The inverse solves give the installment that finances a
//! present value or accumulates to a future value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FinanceError, FinanceResult};
use crate::validation::{check_positive_periods, check_rate, ZERO_RATE_EPSILON};

/// When payments fall within each period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentTiming {
    /// End of period
    #[default]
    #[serde(alias = "end", alias = "deferred")]
    Ordinary,
    /// Start of period
    #[serde(alias = "begin", alias = "advance")]
    Due,
}

impl fmt::Display for PaymentTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentTiming::Ordinary => write!(f, "ordinary"),
            PaymentTiming::Due => write!(f, "due"),
        }
    }
}

impl FromStr for PaymentTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ordinary" | "end" | "deferred" => Ok(PaymentTiming::Ordinary),
            "due" | "begin" | "advance" => Ok(PaymentTiming::Due),
            other => Err(format!("Unknown payment timing: {}", other)),
        }
    }
}

fn check_series(rate: f64, n: f64) -> FinanceResult<()> {
    check_rate(rate)?;
    check_positive_periods(n)?;
    Ok(())
}

/// Present value of one unit paid per period for `n` periods
pub fn present_value_factor(rate: f64, n: f64, timing: PaymentTiming) -> FinanceResult<f64> {
    check_series(rate, n)?;

    let ordinary = if rate.abs() < ZERO_RATE_EPSILON {
        n
    } else {
        (1.0 - (1.0 + rate).powf(-n)) / rate
    };

    Ok(match timing {
        PaymentTiming::Ordinary => ordinary,
        PaymentTiming::Due => ordinary * (1.0 + rate),
    })
}

/// Future value of one unit paid per period for `n` periods
pub fn future_value_factor(rate: f64, n: f64, timing: PaymentTiming) -> FinanceResult<f64> {
    check_series(rate, n)?;

    let ordinary = if rate.abs() < ZERO_RATE_EPSILON {
        n
    } else {
        ((1.0 + rate).powf(n) - 1.0) / rate
    };

    Ok(match timing {
        PaymentTiming::Ordinary => ordinary,
        PaymentTiming::Due => ordinary * (1.0 + rate),
    })
}

/// `payment × (1 - (1+r)^-n) / r`, or `payment × n` at a zero rate
pub fn present_value_ordinary(payment: f64, rate: f64, n: f64) -> FinanceResult<f64> {
    Ok(payment * present_value_factor(rate, n, PaymentTiming::Ordinary)?)
}

/// Ordinary present value shifted one period earlier
pub fn present_value_due(payment: f64, rate: f64, n: f64) -> FinanceResult<f64> {
    Ok(payment * present_value_factor(rate, n, PaymentTiming::Due)?)
}

/// `payment × ((1+r)^n - 1) / r`, or `payment × n` at a zero rate
pub fn future_value_ordinary(payment: f64, rate: f64, n: f64) -> FinanceResult<f64> {
    Ok(payment * future_value_factor(rate, n, PaymentTiming::Ordinary)?)
}

/// Ordinary future value with each payment earning one extra period
pub fn future_value_due(payment: f64, rate: f64, n: f64) -> FinanceResult<f64> {
    Ok(payment * future_value_factor(rate, n, PaymentTiming::Due)?)
}

/// Level payment whose present value is `pv`
pub fn payment_from_present_value(
    pv: f64,
    rate: f64,
    n: f64,
    timing: PaymentTiming,
) -> FinanceResult<f64> {
    let factor = present_value_factor(rate, n, timing)?;
    if factor == 0.0 {
        return Err(FinanceError::division_by_zero("payment_from_present_value", factor));
    }
    Ok(pv / factor)
}

/// Level payment that accumulates to `fv` after `n` periods
pub fn payment_from_future_value(
    fv: f64,
    rate: f64,
    n: f64,
    timing: PaymentTiming,
) -> FinanceResult<f64> {
    let factor = future_value_factor(rate, n, timing)?;
    if factor == 0.0 {
        return Err(FinanceError::division_by_zero("payment_from_future_value", factor));
    }
    Ok(fv / factor)
}

/// Installment per unit of financed principal
pub fn financing_coefficient(rate: f64, n: f64, timing: PaymentTiming) -> FinanceResult<f64> {
    payment_from_present_value(1.0, rate, n, timing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{day_basis, Term};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_present_value_ordinary() {
        let pv = present_value_ordinary(100.0, 0.02, 12.0).unwrap();
        assert_abs_diff_eq!(pv, 1_057.53, epsilon = 0.005);

        // 180 days of monthly payments
        let n = Term::new(180.0, day_basis::MONTHLY).unwrap().period_count();
        let pv = present_value_ordinary(3_000.0, 0.05, n).unwrap();
        assert_abs_diff_eq!(pv, 15_227.08, epsilon = 0.005);
    }

    #[test]
    fn test_present_value_due() {
        let pv = present_value_due(100.0, 0.02, 12.0).unwrap();
        assert_abs_diff_eq!(pv, 1_078.68, epsilon = 0.005);

        let n = Term::new(120.0, day_basis::MONTHLY).unwrap().period_count();
        let pv = present_value_due(200.0, 0.07, n).unwrap();
        assert_abs_diff_eq!(pv, 724.86, epsilon = 0.005);
    }

    #[test]
    fn test_future_value_and_inverse() {
        let n = Term::new(5_400.0, day_basis::MONTHLY).unwrap().period_count();
        let fv = future_value_ordinary(500.0, 0.01, n).unwrap();
        assert_abs_diff_eq!(fv, 249_790.10, epsilon = 0.005);

        let payment =
            payment_from_future_value(249_790.10, 0.01, n, PaymentTiming::Ordinary).unwrap();
        assert_abs_diff_eq!(payment, 500.00, epsilon = 0.005);
    }

    #[test]
    fn test_installments() {
        let ordinary =
            payment_from_present_value(1_000.0, 0.02, 12.0, PaymentTiming::Ordinary).unwrap();
        assert_abs_diff_eq!(ordinary, 94.56, epsilon = 0.005);

        let due = payment_from_present_value(1_000.0, 0.02, 12.0, PaymentTiming::Due).unwrap();
        assert_abs_diff_eq!(due, 92.71, epsilon = 0.005);

        let n = Term::new(150.0, day_basis::MONTHLY).unwrap().period_count();
        let due = payment_from_present_value(2_000.0, 0.08, n, PaymentTiming::Due).unwrap();
        assert_abs_diff_eq!(due, 463.81, epsilon = 0.005);
    }

    #[test]
    fn test_financing_coefficient() {
        let n = Term::new(360.0, day_basis::MONTHLY).unwrap().period_count();
        let coef = financing_coefficient(0.045, n, PaymentTiming::Ordinary).unwrap();
        assert_abs_diff_eq!(coef * 14_000.0, 1_535.33, epsilon = 0.005);
        assert_abs_diff_eq!(coef, 0.11, epsilon = 0.005);

        let coef = financing_coefficient(0.08, 6.0, PaymentTiming::Ordinary).unwrap();
        assert_abs_diff_eq!(coef, 0.22, epsilon = 0.005);
    }

    #[test]
    fn test_future_value_equals_compounded_present_value() {
        for &(rate, n) in &[(0.01, 12.0), (0.07, 30.0), (-0.03, 5.0), (0.25, 2.5)] {
            let pv = present_value_ordinary(250.0, rate, n).unwrap();
            let fv = future_value_ordinary(250.0, rate, n).unwrap();
            assert_relative_eq!(fv, pv * (1.0_f64 + rate).powf(n), max_relative = 1e-12);

            let pv_due = present_value_due(250.0, rate, n).unwrap();
            let fv_due = future_value_due(250.0, rate, n).unwrap();
            assert_relative_eq!(fv_due, pv_due * (1.0_f64 + rate).powf(n), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_rate_limit() {
        assert_relative_eq!(present_value_ordinary(100.0, 0.0, 12.0).unwrap(), 1_200.0);
        assert_relative_eq!(future_value_ordinary(100.0, 0.0, 12.0).unwrap(), 1_200.0);
        assert_relative_eq!(present_value_due(100.0, 0.0, 12.0).unwrap(), 1_200.0);

        // Approaches payment × n continuously
        let pv = present_value_ordinary(100.0, 1e-7, 12.0).unwrap();
        let fv = future_value_ordinary(100.0, 1e-7, 12.0).unwrap();
        assert_abs_diff_eq!(pv, 1_200.0, epsilon = 1e-2);
        assert_abs_diff_eq!(fv, 1_200.0, epsilon = 1e-2);
    }

    #[test]
    fn test_invalid_series() {
        assert!(matches!(
            present_value_ordinary(100.0, 0.05, 0.0),
            Err(FinanceError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            future_value_due(100.0, -1.0, 10.0),
            Err(FinanceError::InvalidRate { .. })
        ));
        assert!(matches!(
            payment_from_present_value(1_000.0, 0.05, -3.0, PaymentTiming::Due),
            Err(FinanceError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_timing_parsing() {
        assert_eq!("advance".parse::<PaymentTiming>().unwrap(), PaymentTiming::Due);
        assert_eq!("END".parse::<PaymentTiming>().unwrap(), PaymentTiming::Ordinary);
        assert!("monthly".parse::<PaymentTiming>().is_err());
    }
}
