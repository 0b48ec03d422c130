//! Button layout
//!
//! A layout is a table of rows of [`CalculatorButton`] descriptors. Rows may
//! differ in length; the last button of a short row stretches over the
//! remaining grid columns.
//!
//! Standard layout:
//! ```text
//! [ C ] [ ⌫ ] [ ^ ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [ ( ] [ ) ] [ 0 ] [ . ]
//! [          =          ]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::handle::CalculatorHandle;
use crate::core::ConfigError;

/// Custom button action, invoked with a handle on the widget state
pub type ButtonCallback = Rc<dyn Fn(&mut CalculatorHandle<'_>)>;

/// Named actions that can be configured without code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinAction {
    /// Empty the current entry
    Clear,
    /// Remove the last character of the current entry
    Backspace,
    /// Commit the current entry
    Evaluate,
    /// Drop every committed history row
    ClearHistory,
}

impl BuiltinAction {
    /// Applies the action through a handle
    pub fn apply(self, handle: &mut CalculatorHandle<'_>) {
        match self {
            Self::Clear => handle.replace_current_value(""),
            Self::Backspace => handle.backspace(),
            Self::Evaluate => {
                // the failure is already shown in the input field
                let _ = handle.evaluate_current();
            }
            Self::ClearHistory => handle.clear_history(),
        }
    }
}

/// A single button descriptor
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CalculatorButton {
    /// Text appended to the current entry when clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Display content (falls back to `value`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub children: String,
    /// Tooltip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Extra CSS class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Named action run on click
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<BuiltinAction>,
    /// Custom action run on click, before `action` and `value`
    #[serde(skip)]
    pub on_click: Option<ButtonCallback>,
}

impl fmt::Debug for CalculatorButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorButton")
            .field("value", &self.value)
            .field("children", &self.children)
            .field("title", &self.title)
            .field("class_name", &self.class_name)
            .field("action", &self.action)
            .field("on_click", &self.on_click.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl CalculatorButton {
    /// Creates a button that appends `value`
    #[must_use]
    pub fn value(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            ..Self::default()
        }
    }

    /// Creates a button running a built-in action
    #[must_use]
    pub fn action(label: &str, action: BuiltinAction) -> Self {
        Self {
            children: label.to_string(),
            action: Some(action),
            ..Self::default()
        }
    }

    /// Creates a button running a custom callback
    #[must_use]
    pub fn custom(label: &str, on_click: impl Fn(&mut CalculatorHandle<'_>) + 'static) -> Self {
        Self {
            children: label.to_string(),
            on_click: Some(Rc::new(on_click)),
            ..Self::default()
        }
    }

    /// Sets the display content
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.children = label.to_string();
        self
    }

    /// Sets the tooltip
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Sets the CSS class
    #[must_use]
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Sets a custom callback
    #[must_use]
    pub fn with_on_click(mut self, on_click: impl Fn(&mut CalculatorHandle<'_>) + 'static) -> Self {
        self.on_click = Some(Rc::new(on_click));
        self
    }

    /// The text shown on the button
    #[must_use]
    pub fn label(&self) -> &str {
        if self.children.is_empty() {
            self.value.as_deref().unwrap_or_default()
        } else {
            &self.children
        }
    }

    /// Identity of the button within a layout: value, then class, then label
    #[must_use]
    pub fn key(&self) -> &str {
        self.value
            .as_deref()
            .filter(|v| !v.is_empty())
            .or(self.class_name.as_deref())
            .unwrap_or_else(|| self.label())
    }

    /// Runs the click behavior: callback, built-in action, then value
    pub fn click(&self, handle: &mut CalculatorHandle<'_>) {
        if let Some(on_click) = &self.on_click {
            on_click(handle);
        }
        if let Some(action) = self.action {
            action.apply(handle);
        }
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            handle.push_current_value(value);
        }
    }
}

/// Two-dimensional table of buttons
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonLayout {
    rows: Vec<Vec<CalculatorButton>>,
}

impl ButtonLayout {
    /// Creates a layout from rows
    #[must_use]
    pub fn new(rows: Vec<Vec<CalculatorButton>>) -> Self {
        Self { rows }
    }

    /// The standard calculator layout
    #[must_use]
    pub fn basic() -> Self {
        let digit = |d: &str| CalculatorButton::value(d).with_class("Digit");
        let operator = |v: &str, label: &str, title: &str| {
            CalculatorButton::value(v)
                .with_label(label)
                .with_title(title)
                .with_class("Operator")
        };

        Self::new(vec![
            vec![
                CalculatorButton::action("C", BuiltinAction::Clear)
                    .with_title("Clear")
                    .with_class("Clear"),
                CalculatorButton::action("⌫", BuiltinAction::Backspace)
                    .with_title("Backspace")
                    .with_class("Backspace"),
                operator("^", "^", "Power"),
                operator("/", "÷", "Divide"),
            ],
            vec![digit("7"), digit("8"), digit("9"), operator("*", "×", "Multiply")],
            vec![digit("4"), digit("5"), digit("6"), operator("-", "-", "Subtract")],
            vec![digit("1"), digit("2"), digit("3"), operator("+", "+", "Add")],
            vec![
                CalculatorButton::value("(").with_title("Open parenthesis"),
                CalculatorButton::value(")").with_title("Close parenthesis"),
                digit("0"),
                CalculatorButton::value(".").with_title("Decimal point"),
            ],
            vec![CalculatorButton::action("=", BuiltinAction::Evaluate)
                .with_title("Evaluate")
                .with_class("Equals")],
        ])
    }

    /// Loads a layout from a JSON array of rows
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The rows of the layout
    #[must_use]
    pub fn rows(&self) -> &[Vec<CalculatorButton>] {
        &self.rows
    }

    /// Total number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Width of the grid: the length of the longest row
    #[must_use]
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&CalculatorButton> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Number of grid columns the button at (row, col) spans
    ///
    /// The last button of a row absorbs the columns the row is short by.
    #[must_use]
    pub fn column_span(&self, row: usize, col: usize) -> Option<usize> {
        let cells = self.rows.get(row)?;
        if col >= cells.len() {
            return None;
        }
        if col + 1 == cells.len() {
            Some(self.max_columns() - cells.len() + 1)
        } else {
            Some(1)
        }
    }

    /// Finds the position of the first button with the given key
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<(usize, usize)> {
        self.position(|button| button.key() == key)
    }

    /// Finds the position of the first button with the given label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<(usize, usize)> {
        self.position(|button| button.label() == label)
    }

    fn position(&self, pred: impl Fn(&CalculatorButton) -> bool) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, cells)| {
            cells.iter().position(&pred).map(|c| (r, c))
        })
    }

    /// Returns keys used by more than one button, logging each
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for button in self.rows.iter().flatten() {
            let key = button.key();
            if !seen.insert(key) && !duplicates.iter().any(|d: &String| d == key) {
                warn!(key, "duplicate button key in layout");
                duplicates.push(key.to_string());
            }
        }
        duplicates
    }
}
