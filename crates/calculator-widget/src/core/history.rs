//! Calculation list
//!
//! An ordered list of expression strings whose last element is the current,
//! uncommitted entry. Every earlier element is a committed expression shown
//! as a history row. The list is never empty.

use crate::core::evaluator::{format_number, Evaluator};

/// One committed expression, evaluated for display
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    /// Position among the committed expressions (0 = oldest)
    pub index: usize,
    /// The committed expression text
    pub input: String,
    /// The expression re-evaluated now (NaN when it no longer evaluates)
    pub output: f64,
}

impl HistoryRow {
    /// Returns the output formatted for display
    #[must_use]
    pub fn output_text(&self) -> String {
        format_number(self.output)
    }

    /// Returns a formatted display string
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.input, self.output_text())
    }
}

/// Ordered, never-empty list of expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculations {
    entries: Vec<String>,
    /// Maximum number of committed rows kept (None = unbounded)
    max_history: Option<usize>,
}

impl Default for Calculations {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculations {
    /// Creates a list holding a single empty current entry
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![String::new()],
            max_history: None,
        }
    }

    /// Creates a list from existing entries
    ///
    /// An empty vector becomes a single empty current entry.
    #[must_use]
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut calculations = Self::new();
        calculations.set_calculations(entries);
        calculations
    }

    /// Bounds the number of committed rows, dropping the oldest
    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self.enforce_bound();
        self
    }

    /// Returns the committed-row bound, if any
    #[must_use]
    pub fn max_history(&self) -> Option<usize> {
        self.max_history
    }

    /// All entries, committed first, current last
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The in-progress entry
    #[must_use]
    pub fn current_value(&self) -> &str {
        self.entries.last().map_or("", String::as_str)
    }

    /// The committed entries (everything but the current one)
    #[must_use]
    pub fn committed(&self) -> &[String] {
        &self.entries[..self.entries.len() - 1]
    }

    /// Total number of entries, including the current one
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of committed entries
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.entries.len() - 1
    }

    /// Commits the current entry and starts a new one holding `new_current`
    pub fn push_calculation(&mut self, new_current: impl Into<String>) {
        self.entries.push(new_current.into());
        self.enforce_bound();
    }

    /// Replaces the text of the current entry
    pub fn replace_current_value(&mut self, new_current: impl Into<String>) {
        if let Some(current) = self.entries.last_mut() {
            *current = new_current.into();
        }
    }

    /// Appends text to the current entry
    pub fn push_current_value(&mut self, value: &str) {
        if let Some(current) = self.entries.last_mut() {
            current.push_str(value);
        }
    }

    /// Removes the last character of the current entry
    pub fn backspace(&mut self) {
        if let Some(current) = self.entries.last_mut() {
            current.pop();
        }
    }

    /// Replaces the whole list; an empty vector becomes `[""]`
    pub fn set_calculations(&mut self, entries: Vec<String>) {
        self.entries = entries;
        if self.entries.is_empty() {
            self.entries.push(String::new());
        }
        self.enforce_bound();
    }

    /// Drops every committed entry, keeping the current one
    pub fn clear_history(&mut self) {
        let current = self.entries.pop().unwrap_or_default();
        self.entries.clear();
        self.entries.push(current);
    }

    /// Evaluates the committed entries into display rows (oldest first)
    #[must_use]
    pub fn rows(&self, evaluator: &Evaluator) -> Vec<HistoryRow> {
        self.committed()
            .iter()
            .enumerate()
            .map(|(index, input)| HistoryRow {
                index,
                input: input.clone(),
                output: evaluator.evaluate_str(input).unwrap_or(f64::NAN),
            })
            .collect()
    }

    fn enforce_bound(&mut self) {
        if let Some(max) = self.max_history {
            let committed = self.committed_len();
            if committed > max {
                self.entries.drain(..committed - max);
            }
        }
    }
}
