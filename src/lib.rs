//! DCF Valuation - Discounted cash flow engine for intrinsic value per share
//!
//! This library provides:
//! - Year-by-year free cash flow projection and discounting
//! - Gordon-growth terminal value
//! - Enterprise, equity and per-share value
//! - A caller-side session state machine (edit / submit / reset)
//! - Batch valuation and en-IN currency reporting

pub mod inputs;
pub mod valuation;
pub mod session;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use inputs::{ValuationInput, Rates};
pub use valuation::{compute, ValuationEngine, ValuationResult, ProjectedCashFlow, ValidationError};
pub use session::{ValuationSession, SessionState};
pub use scenario::{ValuationRunner, BatchOutcome, BatchResult};
