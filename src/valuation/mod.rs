//! Valuation engine: projected cash flows, terminal value and per-share value

mod engine;
mod cashflows;
mod error;

pub use engine::{ValuationEngine, compute};
pub use cashflows::{ProjectedCashFlow, ValuationResult, ValuationSummary};
pub use error::ValidationError;
