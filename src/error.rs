//! Error types for financial calculations

use thiserror::Error;

/// Result type returned by every calculation in this crate
pub type FinanceResult<T> = Result<T, FinanceError>;

/// Errors raised when inputs are outside a formula's domain or a solver fails
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// Rate is at or below -100%, or otherwise implies a non-positive growth base
    #[error("Invalid rate {rate}: {reason}")]
    InvalidRate { rate: f64, reason: &'static str },

    /// Period count or compounding frequency is out of range or not finite
    #[error("Invalid period count {periods}: {reason}")]
    InvalidPeriod { periods: f64, reason: &'static str },

    /// Cash flows never change sign, so no internal rate of return exists
    #[error("Cash flows have no sign change; internal rate of return is undefined")]
    NoSignChange,

    /// Iterative solver ran out of iterations before reaching tolerance
    #[error("Solver did not converge after {iterations} iterations (residual: {residual:.2e})")]
    Convergence { iterations: u32, residual: f64 },

    /// Cumulative cash flow never becomes non-negative
    #[error("Cumulative cash flow never becomes non-negative; investment does not pay back")]
    NoPayback,

    /// Cash flow sequence does not have the shape the metric needs
    #[error("Invalid cash flow layout: {reason}")]
    InvalidCashFlowLayout { reason: String },

    /// A formula denominator evaluated to zero
    #[error("Degenerate factor in {operation}: denominator is {value:.2e}")]
    DivisionByZero { operation: &'static str, value: f64 },
}

impl FinanceError {
    pub fn invalid_rate(rate: f64, reason: &'static str) -> Self {
        Self::InvalidRate { rate, reason }
    }

    pub fn invalid_period(periods: f64, reason: &'static str) -> Self {
        Self::InvalidPeriod { periods, reason }
    }

    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlowLayout {
            reason: reason.into(),
        }
    }

    pub fn convergence(iterations: u32, residual: f64) -> Self {
        Self::Convergence {
            iterations,
            residual,
        }
    }

    pub fn division_by_zero(operation: &'static str, value: f64) -> Self {
        Self::DivisionByZero { operation, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::convergence(1000, 3.5e-4);
        assert!(err.to_string().contains("1000 iterations"));

        let err = FinanceError::invalid_rate(-1.5, "rate must be greater than -1");
        assert!(err.to_string().contains("-1.5"));

        let err = FinanceError::invalid_layout("first cash flow must be an outflow");
        assert!(err.to_string().contains("first cash flow"));
    }
}
