//! Caller-side valuation session
//!
//! Owns the editable input plus the outcome of the last submit. Any edit
//! discards that outcome; results are only produced on explicit submit.

use crate::inputs::ValuationInput;
use crate::valuation::{compute, ValidationError, ValuationResult};

/// Where the session is between edits and submits
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Input changed since the last submit (or never submitted)
    Editing,
    /// Last submit succeeded
    Computed(ValuationResult),
    /// Last submit failed validation
    Invalid(ValidationError),
}

/// Input + state for one interactive valuation
#[derive(Debug, Clone)]
pub struct ValuationSession {
    input: ValuationInput,
    state: SessionState,
}

impl ValuationSession {
    /// Start editing the given input
    pub fn new(input: ValuationInput) -> Self {
        Self {
            input,
            state: SessionState::Editing,
        }
    }

    /// Change one or more fields; drops any prior result or error
    pub fn edit<F: FnOnce(&mut ValuationInput)>(&mut self, change: F) {
        change(&mut self.input);
        self.state = SessionState::Editing;
    }

    /// Run the engine on the current input
    pub fn submit(&mut self) -> &SessionState {
        self.state = match compute(&self.input) {
            Ok(result) => SessionState::Computed(result),
            Err(err) => SessionState::Invalid(err),
        };
        &self.state
    }

    /// Clear the form back to blank values
    pub fn reset(&mut self) {
        self.input = ValuationInput::blank();
        self.state = SessionState::Editing;
    }

    pub fn input(&self) -> &ValuationInput {
        &self.input
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn result(&self) -> Option<&ValuationResult> {
        match &self.state {
            SessionState::Computed(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match &self.state {
            SessionState::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl Default for ValuationSession {
    fn default() -> Self {
        Self::new(ValuationInput::example())
    }
}
