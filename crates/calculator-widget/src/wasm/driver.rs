//! DOM driver
//!
//! Operates the widget through [`DomEvent`]s targeted at rendered element ids,
//! the way a browser user would, and keeps a [`MockDom`] in sync with every
//! render. Only `clear` (a reset between checks) goes through the handle.

use super::calculator::Calculator;
use super::dom::{DomEvent, MockDom};
use super::props::CalculatorProps;
use crate::core::CalcResult;
use crate::driver::{CalculatorDriver, HistoryItem};

/// Calculator plus the mock DOM it renders into
#[derive(Debug)]
pub struct DomDriver {
    calculator: Calculator,
    dom: MockDom,
}

impl Default for DomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomDriver {
    /// Mounts a calculator with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_calculator(Calculator::default())
    }

    /// Mounts a calculator with the given configuration
    #[must_use]
    pub fn with_props(props: CalculatorProps) -> Self {
        Self::with_calculator(Calculator::new(props))
    }

    /// Mounts an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: Calculator) -> Self {
        let mut driver = Self {
            calculator,
            dom: MockDom::new(),
        };
        driver.sync_dom();
        driver
    }

    /// The driven calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The mock DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Sends an event to both the DOM and the widget, then re-renders
    pub fn dispatch(&mut self, event: DomEvent) -> bool {
        let handled = self.calculator.dispatch(&event);
        self.dom.dispatch_event(event);
        self.sync_dom();
        handled
    }

    /// Focuses the input field and replaces its text
    pub fn type_input(&mut self, text: &str) {
        let input_id = self.calculator.input_id();
        self.dispatch(DomEvent::focus(&input_id));
        self.dispatch(DomEvent::input(&input_id, text));
    }

    /// Presses Enter in the input field
    pub fn press_enter(&mut self) -> bool {
        let input_id = self.calculator.input_id();
        self.dispatch(DomEvent::key_down(&input_id, "Enter"))
    }

    /// Presses any key in the input field
    pub fn press_key(&mut self, key: &str) -> bool {
        let input_id = self.calculator.input_id();
        self.dispatch(DomEvent::key_down(&input_id, key))
    }

    /// Clicks the rendered button carrying the given label
    pub fn click_button_labelled(&mut self, label: &str) -> bool {
        match self.calculator.layout().find_by_label(label) {
            Some((row, col)) => {
                let id = self.calculator.button_id(row, col);
                self.click(&id)
            }
            None => false,
        }
    }

    /// Clicks a rendered history row
    pub fn click_history(&mut self, index: usize) -> bool {
        let id = self.calculator.history_item_id(index);
        if self.dom.get_element(&id).is_none() {
            return false;
        }
        self.click(&id)
    }

    /// Clicks the widget's root element
    pub fn click_root(&mut self) -> bool {
        let id = self.calculator.id().to_string();
        self.click(&id)
    }

    /// Clicks an element by id
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dispatch(DomEvent::click(element_id))
    }

    /// Re-renders the widget into the DOM
    pub fn sync_dom(&mut self) {
        self.dom.mount(self.calculator.render());
        if self.calculator.is_input_focused() {
            let input_id = self.calculator.input_id();
            self.dom.set_focus(Some(input_id.as_str()));
        }
    }

    /// `value` attribute of the rendered input field
    #[must_use]
    pub fn input_element_value(&self) -> Option<&str> {
        self.dom
            .get_element(&self.calculator.input_id())?
            .get_attr("value")
    }

    /// Rendered history rows as `input = output`
    #[must_use]
    pub fn history_items_text(&self) -> Vec<String> {
        let mut items = Vec::new();
        let mut i = 0;
        while let Some(item) = self.dom.get_element(&self.calculator.history_item_id(i)) {
            let text: Vec<&str> = item
                .children
                .iter()
                .map(|span| span.text_content.as_str())
                .collect();
            items.push(text.join(" "));
            i += 1;
        }
        items
    }

    /// `data-haschanged` attribute of the rendered root
    #[must_use]
    pub fn root_has_changed(&self) -> bool {
        self.dom
            .get_element(self.calculator.id())
            .and_then(|root| root.get_attr("data-haschanged"))
            == Some("true")
    }
}

impl CalculatorDriver for DomDriver {
    fn enter_expression(&mut self, expr: &str) -> CalcResult<f64> {
        self.type_input(expr);
        self.press_enter();
        // the page only shows the outcome; the value comes from the same text
        self.calculator.evaluator().evaluate_str(expr)
    }

    fn get_input(&self) -> String {
        self.input_element_value().unwrap_or_default().to_string()
    }

    fn press_button(&mut self, label: &str) -> bool {
        self.click_button_labelled(label)
    }

    fn recall_history(&mut self, index: usize) -> bool {
        self.click_history(index)
    }

    fn is_replaced(&self) -> bool {
        self.root_has_changed()
    }

    fn clear(&mut self) {
        self.calculator.handle().set_calculations(Vec::new());
        self.sync_dom();
    }

    fn get_history(&self) -> Vec<HistoryItem> {
        let mut items = Vec::new();
        let mut i = 0;
        while let Some(item) = self.dom.get_element(&self.calculator.history_item_id(i)) {
            let span_text = |class: &str| {
                item.find_by_class(class)
                    .first()
                    .map(|span| span.text_content.clone())
                    .unwrap_or_default()
            };
            items.push(HistoryItem {
                expression: span_text("Input"),
                result: span_text("Output"),
            });
            i += 1;
        }
        items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::core::INVALID_OPERATION;
    use crate::driver::{
        run_full_specification, verify_basic_arithmetic, verify_button_input,
        verify_error_indicator, verify_history_preserved, verify_history_recall,
    };

    // ===== Construction =====

    #[test]
    fn test_driver_new_renders() {
        let driver = DomDriver::new();
        assert_eq!(driver.input_element_value(), Some(""));
        assert!(driver.dom().get_element("calculator-buttons").is_some());
        assert!(driver.history_items_text().is_empty());
    }

    #[test]
    fn test_driver_with_props() {
        let driver = DomDriver::with_props(CalculatorProps::new().with_id("calc"));
        assert!(driver.dom().get_element("calc-input").is_some());
        assert!(driver.dom().get_element("calculator-input").is_none());
    }

    #[test]
    fn test_driver_debug() {
        let debug = format!("{:?}", DomDriver::default());
        assert!(debug.contains("DomDriver"));
    }

    // ===== Event simulation =====

    #[test]
    fn test_type_input_updates_element() {
        let mut driver = DomDriver::new();
        driver.type_input("1 + 2");
        assert_eq!(driver.input_element_value(), Some("1 + 2"));
        assert_eq!(driver.dom().focused_element(), Some("calculator-input"));
    }

    #[test]
    fn test_press_enter_commits() {
        let mut driver = DomDriver::new();
        driver.type_input("4 * 4");
        assert!(driver.press_enter());
        assert_eq!(driver.input_element_value(), Some("16"));
        assert_eq!(driver.history_items_text(), vec!["4 * 4 = 16".to_string()]);
    }

    #[test]
    fn test_press_other_key_not_consumed() {
        let mut driver = DomDriver::new();
        driver.type_input("4");
        assert!(!driver.press_key("Escape"));
        assert_eq!(driver.input_element_value(), Some("4"));
    }

    #[test]
    fn test_error_sets_haschanged() {
        let mut driver = DomDriver::new();
        driver.type_input("4 *");
        driver.press_enter();
        assert!(driver.root_has_changed());
        assert_eq!(driver.input_element_value(), Some(INVALID_OPERATION));

        driver.type_input("4 * 2");
        assert!(!driver.root_has_changed());
    }

    #[test]
    fn test_click_buttons() {
        let mut driver = DomDriver::new();
        assert!(driver.click_button_labelled("9"));
        assert!(driver.click_button_labelled("÷"));
        assert!(driver.click_button_labelled("3"));
        assert_eq!(driver.input_element_value(), Some("9/3"));
        assert!(driver.click_button_labelled("="));
        assert_eq!(driver.input_element_value(), Some("3"));
        assert!(!driver.click_button_labelled("missing"));
    }

    #[test]
    fn test_click_history_row() {
        let mut driver = DomDriver::new();
        driver.enter_expression("5 + 5").unwrap();
        driver.type_input("");
        assert!(driver.click_history(0));
        assert_eq!(driver.input_element_value(), Some("10"));
        assert!(!driver.click_history(1));
    }

    #[test]
    fn test_click_root_focuses_input() {
        let mut driver = DomDriver::new();
        assert!(driver.dom().focused_element().is_none());
        assert!(driver.click_root());
        assert_eq!(driver.dom().focused_element(), Some("calculator-input"));
        let input = driver.dom().get_element("calculator-input").unwrap();
        assert_eq!(input.get_attr("data-focused"), Some("true"));
    }

    #[test]
    fn test_click_pane_bubbles_to_root() {
        let mut driver = DomDriver::new();
        assert!(driver.click("calculator-history"));
        assert!(driver.calculator().is_input_focused());
    }

    #[test]
    fn test_click_foreign_element_ignored() {
        let mut driver = DomDriver::new();
        assert!(!driver.click("elsewhere"));
        assert!(!driver.calculator().is_input_focused());
    }

    #[test]
    fn test_events_recorded() {
        let mut driver = DomDriver::new();
        driver.type_input("1");
        driver.press_enter();
        assert_eq!(driver.dom().event_history().len(), 3);
        assert_eq!(
            driver.dom().event_history()[2],
            DomEvent::key_down("calculator-input", "Enter")
        );
    }

    #[test]
    fn test_enter_expression_goes_through_dispatch() {
        let mut driver = DomDriver::new();
        assert_eq!(driver.enter_expression("3 * 5"), Ok(15.0));
        assert_eq!(
            driver.dom().event_history(),
            &[
                DomEvent::focus("calculator-input"),
                DomEvent::input("calculator-input", "3 * 5"),
                DomEvent::key_down("calculator-input", "Enter"),
            ]
        );
        assert_eq!(driver.input_element_value(), Some("15"));
        assert_eq!(driver.history_items_text(), vec!["3 * 5 = 15".to_string()]);

        assert!(driver.enter_expression("3 *").is_err());
        assert!(driver.root_has_changed());
        assert_eq!(driver.history_items_text().len(), 1);
    }

    #[test]
    fn test_enter_expression_returns_value() {
        let mut driver = DomDriver::new();
        assert_eq!(driver.enter_expression("2 ^ 3"), Ok(8.0));
        assert!(driver.enter_expression("2 ^").is_err());
        assert_eq!(driver.get_history(), vec![HistoryItem::new("2 ^ 3", "8")]);
    }

    // ===== Unified specifications =====

    #[test]
    fn test_unified_basic_arithmetic() {
        verify_basic_arithmetic(&mut DomDriver::new());
    }

    #[test]
    fn test_unified_error_indicator() {
        verify_error_indicator(&mut DomDriver::new());
    }

    #[test]
    fn test_unified_history_preserved() {
        verify_history_preserved(&mut DomDriver::new());
    }

    #[test]
    fn test_unified_button_input() {
        verify_button_input(&mut DomDriver::new());
    }

    #[test]
    fn test_unified_history_recall() {
        verify_history_recall(&mut DomDriver::new());
    }

    #[test]
    fn test_full_specification() {
        run_full_specification(&mut DomDriver::new());
    }
}
