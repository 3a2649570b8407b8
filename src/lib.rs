//! Financial Calc - textbook financial mathematics as pure functions
//!
//! This library provides:
//! - Capitalization regimes (simple, compound and continuous growth and discount)
//! - Uniform payments series (ordinary and due annuities, installment solves)
//! - Investment evaluation (NPV, IRR, payback, profitability index)
//! - Equivalent rates (nominal, effective, periodic and continuous conversions)
//!
//! Rates are decimal fractions per period (0.05 for 5%) and must be greater
//! than -1. Every calculation returns a [`FinanceResult`].

pub mod annuity;
pub mod capitalization;
pub mod error;
pub mod investment;
pub mod rates;
pub mod term;
mod validation;

// Re-export commonly used types
pub use annuity::PaymentTiming;
pub use capitalization::Regime;
pub use error::{FinanceError, FinanceResult};
pub use investment::{evaluate, InvestmentSummary, IrrConfig};
pub use term::Term;
