//! Valuation inputs supplied by the caller
//!
//! Growth and discount rates are carried as percents (12.0 = 12%). The only
//! place they become fractions is [`ValuationInput::rates`].

pub mod loader;

pub use loader::{load_inputs, load_inputs_from_reader, load_input_json, parse_amount, parse_years};

use serde::{Deserialize, Serialize};

/// Caller-supplied assumptions for a single valuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    /// Display label only, no computational effect
    pub company_name: String,

    /// Baseline free cash flow (currency units, e.g. crores)
    #[serde(rename = "currentFCF")]
    pub current_fcf: f64,

    /// Annual FCF growth during the projection window (percent)
    pub growth_rate: f64,

    /// Number of discrete forecast periods
    pub projection_years: u32,

    /// Weighted average cost of capital (percent)
    pub wacc: f64,

    /// Perpetual growth after the projection window (percent)
    pub terminal_growth_rate: f64,

    /// Total debt, subtracted from enterprise value
    pub debt: f64,

    /// Cash and equivalents, added to enterprise value
    pub cash: f64,

    /// Divisor for per-share value, must be > 0
    pub shares_outstanding: f64,
}

/// Rates converted from percent to fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub growth: f64,
    pub wacc: f64,
    pub terminal_growth: f64,
}

impl ValuationInput {
    /// Sample company used as the starting point of a new session
    pub fn example() -> Self {
        Self {
            company_name: "Example Ltd.".to_string(),
            current_fcf: 1000.0,
            growth_rate: 15.0,
            projection_years: 5,
            wacc: 12.0,
            terminal_growth_rate: 5.0,
            debt: 5000.0,
            cash: 2000.0,
            shares_outstanding: 100.0,
        }
    }

    /// Cleared form: everything zero except a 5 year window
    pub fn blank() -> Self {
        Self {
            company_name: String::new(),
            current_fcf: 0.0,
            growth_rate: 0.0,
            projection_years: 5,
            wacc: 0.0,
            terminal_growth_rate: 0.0,
            debt: 0.0,
            cash: 0.0,
            shares_outstanding: 0.0,
        }
    }

    /// Convert the percent inputs to fractional rates
    pub fn rates(&self) -> Rates {
        Rates {
            growth: self.growth_rate / 100.0,
            wacc: self.wacc / 100.0,
            terminal_growth: self.terminal_growth_rate / 100.0,
        }
    }

    /// Net debt (debt minus cash)
    pub fn net_debt(&self) -> f64 {
        self.debt - self.cash
    }
}

impl Default for ValuationInput {
    fn default() -> Self {
        Self::example()
    }
}
