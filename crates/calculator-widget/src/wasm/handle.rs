//! Capability handed to custom button actions

use crate::core::{CalcResult, CalculatorState, Evaluator};

/// Borrowed view of the widget state with its mutators
///
/// Lives only for the duration of a click callback. Reads always reflect the
/// state as modified by earlier calls on the same handle.
#[derive(Debug)]
pub struct CalculatorHandle<'a> {
    state: &'a mut CalculatorState,
    evaluator: &'a Evaluator,
}

impl<'a> CalculatorHandle<'a> {
    /// Creates a handle over the given state
    pub fn new(state: &'a mut CalculatorState, evaluator: &'a Evaluator) -> Self {
        Self { state, evaluator }
    }

    /// All expressions, committed first, current last
    #[must_use]
    pub fn calculations(&self) -> &[String] {
        self.state.calculations().entries()
    }

    /// The in-progress expression
    #[must_use]
    pub fn current_value(&self) -> &str {
        self.state.current_value()
    }

    /// True while the current entry holds the error indicator
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        self.state.is_replaced()
    }

    /// Replaces the whole list; an empty vector becomes `[""]`
    pub fn set_calculations(&mut self, entries: Vec<String>) {
        self.state.set_calculations(entries);
    }

    /// Commits the current entry and starts a new one
    pub fn push_calculation(&mut self, new_current: impl Into<String>) {
        self.state.push_calculation(new_current);
    }

    /// Replaces the current entry
    pub fn replace_current_value(&mut self, new_current: impl Into<String>) {
        self.state.replace_current_value(new_current);
    }

    /// Appends to the current entry
    pub fn push_current_value(&mut self, value: &str) {
        self.state.push_current_value(value);
    }

    /// Removes the last character of the current entry
    pub fn backspace(&mut self) {
        self.state.backspace();
    }

    /// Drops every committed entry
    pub fn clear_history(&mut self) {
        self.state.clear_history();
    }

    /// Evaluates and commits the current entry, as pressing Enter does
    pub fn evaluate_current(&mut self) -> CalcResult<f64> {
        self.state.commit(self.evaluator)
    }

    /// Evaluates an arbitrary expression without touching the state
    pub fn evaluate(&self, expr: &str) -> CalcResult<f64> {
        self.evaluator.evaluate_str(expr)
    }
}
