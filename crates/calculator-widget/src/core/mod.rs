//! Framework-independent calculator core
//!
//! Holds the expression evaluator, the calculation list and the commit
//! logic. Nothing in here knows about elements or events.

pub mod evaluator;
pub mod history;
pub mod state;

pub use evaluator::{calculate, format_number, Evaluator};
pub use history::{Calculations, HistoryRow};
pub use state::{CalculatorState, INVALID_OPERATION};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Empty (or whitespace-only) expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// The expression engine rejected the input
    #[error("Invalid expression: {0}")]
    Evaluation(String),
    /// The expression evaluated to NaN
    #[error("Result is not a number")]
    NotANumber,
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON configuration
    #[error("Invalid calculator configuration: {0}")]
    Json(#[from] serde_json::Error),
}
