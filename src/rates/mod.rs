//! Equivalent rates
//!
//! Conversions between rate conventions that produce the same growth over a
//! common time base:
//! - nominal annual rate compounded `m` times per year ⇄ effective annual rate
//! - periodic rate over one period length ⇄ periodic rate over another
//! - discrete ⇄ continuously compounded rates
//! - day-count based conversion under either capitalization regime

use crate::capitalization::Regime;
use crate::error::FinanceResult;
use crate::validation::{check_finite_rate, check_growth_base, check_positive_periods, check_rate};

/// Effective annual rate of a nominal rate compounded `m` times per year: `(1 + j/m)^m - 1`
pub fn effective_from_nominal(
    nominal_rate: f64,
    compounding_periods_per_year: f64,
) -> FinanceResult<f64> {
    let m = check_positive_periods(compounding_periods_per_year)?;
    check_finite_rate(nominal_rate)?;
    let base = check_growth_base(nominal_rate, 1.0 + nominal_rate / m)?;
    Ok(base.powf(m) - 1.0)
}

/// Nominal annual rate compounded `m` times per year with the given effective rate
///
/// `m × ((1 + i)^(1/m) - 1)`
pub fn nominal_from_effective(
    effective_rate: f64,
    compounding_periods_per_year: f64,
) -> FinanceResult<f64> {
    let m = check_positive_periods(compounding_periods_per_year)?;
    check_rate(effective_rate)?;
    Ok(m * ((1.0 + effective_rate).powf(1.0 / m) - 1.0))
}

/// Rate per `1/to` year equivalent to `rate` per `1/from` year
///
/// `(1 + rate)^(from/to) - 1`; a monthly rate converts to annual with `from = 12, to = 1`.
pub fn equivalent_rate(
    rate: f64,
    from_periods_per_year: f64,
    to_periods_per_year: f64,
) -> FinanceResult<f64> {
    let from = check_positive_periods(from_periods_per_year)?;
    let to = check_positive_periods(to_periods_per_year)?;
    check_rate(rate)?;

    if from == to {
        return Ok(rate);
    }

    Ok((1.0 + rate).powf(from / to) - 1.0)
}

/// Convert a rate quoted per `from_days` into a rate per `to_days`
///
/// Simple regime scales proportionally (`rate × to/from`); compound regime
/// keeps growth equal (`(1 + rate)^(to/from) - 1`).
pub fn equivalent_rate_for_days(
    rate: f64,
    from_days: f64,
    to_days: f64,
    regime: Regime,
) -> FinanceResult<f64> {
    let from = check_positive_periods(from_days)?;
    let to = check_positive_periods(to_days)?;
    check_rate(rate)?;

    if from == to {
        return Ok(rate);
    }

    let ratio = to / from;
    match regime {
        Regime::Simple => Ok(rate * ratio),
        Regime::Compound => Ok((1.0 + rate).powf(ratio) - 1.0),
    }
}

/// Continuous rate equivalent to a nominal rate compounded `m` times per year: `m × ln(1 + j/m)`
pub fn continuous_from_periodic(rate: f64, periods_per_year: f64) -> FinanceResult<f64> {
    let m = check_positive_periods(periods_per_year)?;
    check_finite_rate(rate)?;
    let base = check_growth_base(rate, 1.0 + rate / m)?;
    Ok(m * base.ln())
}

/// Nominal rate compounded `m` times per year equal to a continuous rate: `m × (e^(δ/m) - 1)`
pub fn periodic_from_continuous(continuous_rate: f64, periods_per_year: f64) -> FinanceResult<f64> {
    let m = check_positive_periods(periods_per_year)?;
    check_finite_rate(continuous_rate)?;
    Ok(m * (continuous_rate / m).exp_m1())
}

/// Force of interest of an effective annual rate: `ln(1 + i)`
pub fn continuous_from_effective(effective_rate: f64) -> FinanceResult<f64> {
    check_rate(effective_rate)?;
    Ok(effective_rate.ln_1p())
}

/// Effective annual rate of a continuously compounded rate: `e^δ - 1`
pub fn effective_from_continuous(continuous_rate: f64) -> FinanceResult<f64> {
    check_finite_rate(continuous_rate)?;
    Ok(continuous_rate.exp_m1())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinanceError;
    use crate::term::day_basis;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_effective_from_nominal_monthly() {
        let eff = effective_from_nominal(0.12, 12.0).unwrap();
        assert_abs_diff_eq!(eff, 0.126825, epsilon = 1e-6);
    }

    #[test]
    fn test_nominal_effective_round_trip() {
        for &m in &[1.0, 2.0, 4.0, 12.0, 365.0] {
            let eff = effective_from_nominal(0.08, m).unwrap();
            let nominal = nominal_from_effective(eff, m).unwrap();
            assert_relative_eq!(nominal, 0.08, max_relative = 1e-10);
        }
        // Annual compounding: nominal equals effective
        assert_relative_eq!(effective_from_nominal(0.07, 1.0).unwrap(), 0.07, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_frequency() {
        assert!(matches!(
            effective_from_nominal(0.12, 0.0),
            Err(FinanceError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            nominal_from_effective(0.12, -4.0),
            Err(FinanceError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            continuous_from_periodic(0.05, 0.0),
            Err(FinanceError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_invalid_growth_base() {
        // 1 + (-24%)/12 > 0, but 1 + (-1300%)/12 < 0
        assert!(effective_from_nominal(-0.24, 12.0).is_ok());
        assert!(matches!(
            effective_from_nominal(-13.0, 12.0),
            Err(FinanceError::InvalidRate { .. })
        ));
        assert!(matches!(
            nominal_from_effective(-1.0, 12.0),
            Err(FinanceError::InvalidRate { .. })
        ));
        assert!(matches!(
            continuous_from_periodic(-12.0, 12.0),
            Err(FinanceError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_equivalent_rate() {
        // 1% monthly is 12.68% annually
        let annual = equivalent_rate(0.01, 12.0, 1.0).unwrap();
        assert_abs_diff_eq!(annual, 0.126825, epsilon = 1e-6);

        let monthly = equivalent_rate(annual, 1.0, 12.0).unwrap();
        assert_relative_eq!(monthly, 0.01, max_relative = 1e-12);
    }

    #[test]
    fn test_equivalent_rate_identity() {
        for &m in &[1.0, 4.0, 12.0, 252.0] {
            for &rate in &[0.1, 0.0375, -0.2, 3.0] {
                assert_eq!(equivalent_rate(rate, m, m).unwrap(), rate);
            }
        }
    }

    #[test]
    fn test_equivalent_rate_for_days_simple() {
        use day_basis::{DAILY, MONTHLY, QUARTERLY, YEARLY};
        let simple = |rate, from, to| {
            equivalent_rate_for_days(rate, from, to, Regime::Simple).unwrap()
        };

        assert_abs_diff_eq!(simple(0.21, YEARLY, QUARTERLY), 0.0525, epsilon = 1e-12);
        assert_abs_diff_eq!(simple(0.36, YEARLY, MONTHLY), 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(simple(0.00053, DAILY, YEARLY), 0.1908, epsilon = 1e-12);
    }

    #[test]
    fn test_equivalent_rate_for_days_compound() {
        use day_basis::{DAILY, MONTHLY, QUARTERLY, YEARLY};
        let compound = |rate, from, to| {
            equivalent_rate_for_days(rate, from, to, Regime::Compound).unwrap()
        };

        assert_abs_diff_eq!(compound(0.03, MONTHLY, YEARLY), 0.4258, epsilon = 1e-4);
        assert_abs_diff_eq!(compound(0.30, YEARLY, QUARTERLY), 0.0678, epsilon = 5e-5);
        assert_abs_diff_eq!(compound(0.04, MONTHLY, DAILY), 0.0013, epsilon = 5e-5);
    }

    #[test]
    fn test_continuous_conversions() {
        let delta = continuous_from_periodic(0.12, 12.0).unwrap();
        assert_relative_eq!(delta, 12.0 * (1.01_f64).ln(), max_relative = 1e-12);

        let back = periodic_from_continuous(delta, 12.0).unwrap();
        assert_relative_eq!(back, 0.12, max_relative = 1e-12);

        // Both routes through the effective rate agree
        let eff = effective_from_nominal(0.12, 12.0).unwrap();
        assert_relative_eq!(continuous_from_effective(eff).unwrap(), delta, max_relative = 1e-12);
        assert_relative_eq!(effective_from_continuous(delta).unwrap(), eff, max_relative = 1e-12);
    }

    #[test]
    fn test_continuous_limit() {
        // Very frequent compounding approaches the continuous rate
        let delta = continuous_from_effective(0.10).unwrap();
        let frequent_nominal = nominal_from_effective(0.10, 1e6).unwrap();
        assert_abs_diff_eq!(frequent_nominal, delta, epsilon = 1e-6);
    }
}
