//! Validation failures reported before any computation

use serde::Serialize;

/// Input rejected by the engine. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// WACC does not strictly exceed the terminal growth rate
    #[error("WACC must exceed terminal growth rate (wacc {wacc}%, terminal growth {terminal_growth_rate}%)")]
    InvalidRate { wacc: f64, terminal_growth_rate: f64 },

    /// Shares outstanding is zero or negative
    #[error("shares outstanding must be positive (got {shares_outstanding})")]
    InvalidShares { shares_outstanding: f64 },
}

impl ValidationError {
    /// Message shown verbatim to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidRate { .. } => {
                "WACC must be greater than the Terminal Growth Rate to calculate Terminal Value."
            }
            ValidationError::InvalidShares { .. } => "Shares Outstanding must be a positive number.",
        }
    }
}
