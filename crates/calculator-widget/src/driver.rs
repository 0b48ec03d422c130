//! Unified calculator driver
//!
//! Behavior checks are written once against [`CalculatorDriver`] and run
//! against every way of operating the widget: the direct widget API
//! ([`Calculator`]) and the DOM-event path ([`crate::wasm::DomDriver`]).

use crate::core::{CalcResult, INVALID_OPERATION};
use crate::wasm::Calculator;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use calculator_widget::driver::{verify_basic_arithmetic, CalculatorDriver};
/// use calculator_widget::wasm::{Calculator, DomDriver};
///
/// verify_basic_arithmetic(&mut Calculator::default());
/// verify_basic_arithmetic(&mut DomDriver::new());
/// ```
pub trait CalculatorDriver {
    /// Types an expression into the input field and presses Enter
    fn enter_expression(&mut self, expr: &str) -> CalcResult<f64>;

    /// Text currently shown in the input field
    fn get_input(&self) -> String;

    /// Clicks the first button with the given label
    fn press_button(&mut self, label: &str) -> bool;

    /// Clicks a history row
    fn recall_history(&mut self, index: usize) -> bool;

    /// True while the input field shows the error indicator
    fn is_replaced(&self) -> bool;

    /// Resets to a single empty entry
    fn clear(&mut self);

    /// History rows, oldest first
    fn get_history(&self) -> Vec<HistoryItem>;
}

/// A history row as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The committed expression
    pub expression: String,
    /// Its formatted output
    pub result: String,
}

impl HistoryItem {
    /// Creates an item
    #[must_use]
    pub fn new(expression: &str, result: &str) -> Self {
        Self {
            expression: expression.to_string(),
            result: result.to_string(),
        }
    }
}

impl CalculatorDriver for Calculator {
    fn enter_expression(&mut self, expr: &str) -> CalcResult<f64> {
        self.change_input(expr);
        self.commit()
    }

    fn get_input(&self) -> String {
        self.current_value().to_string()
    }

    fn press_button(&mut self, label: &str) -> bool {
        self.click_button_by_label(label)
    }

    fn recall_history(&mut self, index: usize) -> bool {
        self.click_history(index)
    }

    fn is_replaced(&self) -> bool {
        Calculator::is_replaced(self)
    }

    fn clear(&mut self) {
        self.handle().set_calculations(Vec::new());
    }

    fn get_history(&self) -> Vec<HistoryItem> {
        self.history_rows()
            .into_iter()
            .map(|row| HistoryItem {
                result: row.output_text(),
                expression: row.input,
            })
            .collect()
    }
}

// ===== Unified specifications =====
// These work with ANY CalculatorDriver configured with the standard layout
// and result carrying enabled.

/// Valid expressions evaluate and their result becomes the next entry
#[allow(clippy::float_cmp)]
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("2 + 3", 5.0, "5"),
        ("10 - 4", 6.0, "6"),
        ("6 * 7", 42.0, "42"),
        ("20 / 8", 2.5, "2.5"),
        ("2 + 3 * 4", 14.0, "14"),
        ("(2 + 3) * 4", 20.0, "20"),
        ("2 ^ 10", 1024.0, "1024"),
    ];
    for (expr, value, shown) in cases {
        driver.clear();
        assert_eq!(driver.enter_expression(expr), Ok(value), "{expr}");
        assert_eq!(driver.get_input(), shown, "{expr}");
        assert!(!driver.is_replaced());
    }
    driver.clear();
}

/// Invalid expressions show the indicator and do not advance history
pub fn verify_error_indicator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter_expression("1 + 1").ok();
    let before = driver.get_history();

    for garbage in ["1 +", "(2", "", "foo(1)"] {
        assert!(driver.enter_expression(garbage).is_err(), "{garbage:?}");
        assert_eq!(driver.get_input(), INVALID_OPERATION);
        assert!(driver.is_replaced());
        assert_eq!(driver.get_history(), before);
    }

    // the entry stays editable
    assert!(driver.press_button("C"));
    assert!(!driver.is_replaced());
    assert_eq!(driver.get_input(), "");
    driver.clear();
}

/// Successive commits keep earlier rows untouched
pub fn verify_history_preserved<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter_expression("1 + 1").ok();
    driver.enter_expression("2 * 3").ok();
    driver.enter_expression("10 / 4").ok();

    assert_eq!(
        driver.get_history(),
        vec![
            HistoryItem::new("1 + 1", "2"),
            HistoryItem::new("2 * 3", "6"),
            HistoryItem::new("10 / 4", "2.5"),
        ]
    );
    assert_eq!(driver.get_input(), "2.5");
    driver.clear();
}

/// Button presses build and commit an expression
pub fn verify_button_input<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    for label in ["7", "×", "(", "4", "+", "2", ")"] {
        assert!(driver.press_button(label), "{label}");
    }
    assert_eq!(driver.get_input(), "7*(4+2)");

    assert!(driver.press_button("⌫"));
    assert_eq!(driver.get_input(), "7*(4+2");
    assert!(driver.press_button(")"));

    assert!(driver.press_button("="));
    assert_eq!(driver.get_input(), "42");
    assert_eq!(driver.get_history(), vec![HistoryItem::new("7*(4+2)", "42")]);

    assert!(!driver.press_button("no such button"));
    driver.clear();
}

/// Clicking a history row recalls its output
pub fn verify_history_recall<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.enter_expression("3 * 3").ok();
    driver.enter_expression("1 / 4").ok();
    assert!(driver.press_button("C"));

    assert!(driver.recall_history(0));
    assert_eq!(driver.get_input(), "9");
    assert!(driver.recall_history(1));
    assert_eq!(driver.get_input(), "0.25");
    assert!(!driver.recall_history(2));
    assert_eq!(driver.get_history().len(), 2);
    driver.clear();
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_error_indicator(driver);
    verify_history_preserved(driver);
    verify_button_input(driver);
    verify_history_recall(driver);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_basic_arithmetic() {
        verify_basic_arithmetic(&mut Calculator::default());
    }

    #[test]
    fn test_calculator_error_indicator() {
        verify_error_indicator(&mut Calculator::default());
    }

    #[test]
    fn test_calculator_history_preserved() {
        verify_history_preserved(&mut Calculator::default());
    }

    #[test]
    fn test_calculator_button_input() {
        verify_button_input(&mut Calculator::default());
    }

    #[test]
    fn test_calculator_history_recall() {
        verify_history_recall(&mut Calculator::default());
    }

    #[test]
    fn test_calculator_full_specification() {
        run_full_specification(&mut Calculator::default());
    }

    #[test]
    fn test_clear_resets_to_single_entry() {
        let mut calc = Calculator::default();
        calc.enter_expression("1 + 1").ok();
        calc.clear();
        assert_eq!(calc.calculations(), &[String::new()]);
        assert!(calc.get_history().is_empty());
    }

    #[test]
    fn test_history_item_new() {
        let item = HistoryItem::new("1+1", "2");
        assert_eq!(item.expression, "1+1");
        assert_eq!(item.clone(), item);
    }
}
