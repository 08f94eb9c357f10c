//! Batch runner for valuing many companies in one pass
//!
//! Each company is valued independently; a validation failure for one row is
//! recorded on its outcome and the batch carries on.

use crate::inputs::ValuationInput;
use crate::valuation::{ValidationError, ValuationEngine, ValuationResult};
use serde::Serialize;

/// Outcome of valuing one company in a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub company_name: String,
    #[serde(flatten)]
    pub outcome: BatchResult,
}

/// Serializable wrapper around the engine result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchResult {
    Valued(ValuationResult),
    Rejected(ValidationError),
}

impl BatchOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, BatchResult::Valued(_))
    }

    pub fn result(&self) -> Option<&ValuationResult> {
        match &self.outcome {
            BatchResult::Valued(result) => Some(result),
            BatchResult::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match &self.outcome {
            BatchResult::Valued(_) => None,
            BatchResult::Rejected(err) => Some(err),
        }
    }
}

/// Runs the valuation engine over single inputs or whole batches
///
/// # Example
/// ```
/// use dcf_valuation::{ValuationInput, ValuationRunner};
///
/// let runner = ValuationRunner::new();
/// let outcomes = runner.run_batch(&[ValuationInput::example()]);
/// assert!(outcomes[0].is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValuationRunner {
    engine: ValuationEngine,
}

impl ValuationRunner {
    pub fn new() -> Self {
        Self { engine: ValuationEngine::new() }
    }

    /// Value a single company
    pub fn run(&self, input: &ValuationInput) -> BatchOutcome {
        let outcome = match self.engine.value(input) {
            Ok(result) => BatchResult::Valued(result),
            Err(err) => BatchResult::Rejected(err),
        };
        BatchOutcome {
            company_name: input.company_name.clone(),
            outcome,
        }
    }

    /// Value every company, preserving input order
    pub fn run_batch(&self, inputs: &[ValuationInput]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = inputs.iter().map(|input| self.run(input)).collect();

        let rejected = outcomes.iter().filter(|o| !o.is_valid()).count();
        if rejected > 0 {
            log::warn!("{} of {} valuations rejected", rejected, outcomes.len());
        } else {
            log::info!("Valued {} companies", outcomes.len());
        }

        outcomes
    }
}
