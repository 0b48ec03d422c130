//! Widget state and the commit operation

use tracing::{debug, warn};

use crate::core::evaluator::{format_number, Evaluator};
use crate::core::history::Calculations;
use crate::core::CalcResult;

/// Text shown in place of the current entry when evaluation fails
pub const INVALID_OPERATION: &str = "Invalid operation";

/// Calculation list plus the "replaced" display flag
#[derive(Debug, Clone)]
pub struct CalculatorState {
    calculations: Calculations,
    replaced: bool,
    carry_result: bool,
    pushed_rows: usize,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a state whose commits carry the result into the new current entry
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculations: Calculations::new(),
            replaced: false,
            carry_result: true,
            pushed_rows: 0,
        }
    }

    /// Sets whether a successful commit starts the next entry with the result
    #[must_use]
    pub fn with_carry_result(mut self, carry_result: bool) -> Self {
        self.carry_result = carry_result;
        self
    }

    /// Bounds the number of committed rows
    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.calculations = self.calculations.with_max_history(max_history);
        self
    }

    /// The calculation list
    #[must_use]
    pub fn calculations(&self) -> &Calculations {
        &self.calculations
    }

    /// The in-progress entry
    #[must_use]
    pub fn current_value(&self) -> &str {
        self.calculations.current_value()
    }

    /// True while the current entry holds the error indicator
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        self.replaced
    }

    /// Whether commits carry the result forward
    #[must_use]
    pub fn carries_result(&self) -> bool {
        self.carry_result
    }

    /// Number of rows committed so far, evicted ones included
    #[must_use]
    pub fn pushed_rows(&self) -> usize {
        self.pushed_rows
    }

    /// Commits the current entry and starts a new one
    pub fn push_calculation(&mut self, new_current: impl Into<String>) {
        self.calculations.push_calculation(new_current);
        self.pushed_rows += 1;
        self.replaced = false;
    }

    /// Replaces the text of the current entry
    pub fn replace_current_value(&mut self, new_current: impl Into<String>) {
        self.calculations.replace_current_value(new_current);
        self.replaced = false;
    }

    /// Appends text to the current entry
    pub fn push_current_value(&mut self, value: &str) {
        self.calculations.push_current_value(value);
        self.replaced = false;
    }

    /// Removes the last character of the current entry
    pub fn backspace(&mut self) {
        self.calculations.backspace();
        self.replaced = false;
    }

    /// Replaces the whole list (an empty vector becomes `[""]`)
    pub fn set_calculations(&mut self, entries: Vec<String>) {
        self.calculations.set_calculations(entries);
        self.replaced = false;
    }

    /// Drops every committed entry
    pub fn clear_history(&mut self) {
        self.calculations.clear_history();
        self.replaced = false;
    }

    /// Evaluates the current entry
    ///
    /// On success the entry becomes a history row and the new current entry
    /// holds the formatted result (or nothing, without `carry_result`). On
    /// failure the current entry is overwritten with [`INVALID_OPERATION`]
    /// and the history does not advance.
    pub fn commit(&mut self, evaluator: &Evaluator) -> CalcResult<f64> {
        match evaluator.evaluate_str(self.current_value()) {
            Ok(value) => {
                let next = if self.carry_result {
                    format_number(value)
                } else {
                    String::new()
                };
                debug!(
                    input = self.current_value(),
                    result = value,
                    "committed calculation"
                );
                self.push_calculation(next);
                Ok(value)
            }
            Err(err) => {
                warn!(input = self.current_value(), error = %err, "evaluation failed");
                self.calculations.replace_current_value(INVALID_OPERATION);
                self.replaced = true;
                Err(err)
            }
        }
    }
}
