//! Cross-module properties of the public API

use approx::{assert_abs_diff_eq, assert_relative_eq};
use financial_calc::investment::{
    internal_rate_of_return, net_present_value, payback_period, profitability_index,
};
use financial_calc::{annuity, capitalization, rates, FinanceError, PaymentTiming, Regime};

#[test]
fn present_value_undoes_future_value() {
    for regime in [Regime::Simple, Regime::Compound] {
        for &(rate, periods) in &[(0.05, 3.0), (0.015, 24.0), (0.2, 0.5)] {
            let fv = capitalization::future_value(1_000.0, rate, periods, regime).unwrap();
            let pv = capitalization::present_value(fv, rate, periods, regime).unwrap();
            assert_relative_eq!(pv, 1_000.0, max_relative = 1e-10);
        }
    }
}

#[test]
fn annuity_future_value_is_compounded_present_value() {
    let (payment, rate, n) = (250.0, 0.012, 36.0);
    for timing in [PaymentTiming::Ordinary, PaymentTiming::Due] {
        let pv_factor = annuity::present_value_factor(rate, n, timing).unwrap();
        let fv_factor = annuity::future_value_factor(rate, n, timing).unwrap();
        assert_relative_eq!(
            payment * fv_factor,
            payment * pv_factor * (1.0_f64 + rate).powf(n),
            max_relative = 1e-10
        );
    }
}

#[test]
fn annuity_near_zero_rate_approaches_payment_times_periods() {
    let pv = annuity::present_value_ordinary(100.0, 1e-9, 12.0).unwrap();
    assert_abs_diff_eq!(pv, 1_200.0, epsilon = 1e-3);

    let pv = annuity::present_value_ordinary(100.0, 0.0, 12.0).unwrap();
    assert_abs_diff_eq!(pv, 1_200.0, epsilon = 1e-9);
}

#[test]
fn npv_vanishes_at_irr() {
    let flows = [-5_000.0, 1_200.0, 1_500.0, 1_800.0, 2_100.0];
    let irr = internal_rate_of_return(&flows).unwrap();
    let npv = net_present_value(&flows, irr).unwrap();
    assert_abs_diff_eq!(npv, 0.0, epsilon = 1e-4);
}

#[test]
fn irr_requires_sign_change() {
    assert_eq!(
        internal_rate_of_return(&[100.0, 50.0, 25.0]),
        Err(FinanceError::NoSignChange)
    );
}

#[test]
fn nominal_twelve_percent_monthly_is_effective_12_68() {
    let eff = rates::effective_from_nominal(0.12, 12.0).unwrap();
    assert_abs_diff_eq!(eff, 0.126825, epsilon = 1e-6);
}

#[test]
fn payback_interpolates_within_period() {
    let payback = payback_period(&[-1_000.0, 300.0, 300.0, 300.0, 300.0]).unwrap();
    assert_abs_diff_eq!(payback, 3.333, epsilon = 1e-3);
}

#[test]
fn profitability_index_needs_leading_outflow() {
    assert!(matches!(
        profitability_index(&[1_000.0, 300.0], 0.1),
        Err(FinanceError::InvalidCashFlowLayout { .. })
    ));
}

#[test]
fn equivalent_rate_same_frequency_is_identity() {
    assert_eq!(rates::equivalent_rate(0.0425, 4.0, 4.0).unwrap(), 0.0425);
}
