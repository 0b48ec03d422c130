//! Browser bindings
//!
//! The host page renders [`BrowserCalculator::render_html`] into a container,
//! forwards DOM events by element id and re-renders after each handled event.

// compiled only with the `wasm` feature, see mod.rs

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::calculator::Calculator;
use super::dom::DomEvent;
use super::props::CalculatorProps;
use super::style::DEFAULT_STYLESHEET;

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    calculator: Calculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts a calculator with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();
        Self {
            calculator: Calculator::default(),
        }
    }

    /// Mounts a calculator from a JSON configuration
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(config: &str) -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();
        let props =
            CalculatorProps::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            calculator: Calculator::new(props),
        })
    }

    /// Key pressed in the input field; true when consumed
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.calculator.key_down(key)
    }

    /// The input field's text changed
    pub fn input(&mut self, value: &str) {
        self.calculator.change_input(value);
    }

    /// Clicks the button at (row, col)
    #[wasm_bindgen(js_name = clickButton)]
    pub fn click_button(&mut self, row: usize, col: usize) -> bool {
        self.calculator.click_button(row, col)
    }

    /// Clicks a history row
    #[wasm_bindgen(js_name = clickHistory)]
    pub fn click_history(&mut self, index: usize) -> bool {
        self.calculator.click_history(index)
    }

    /// Routes a click on any element inside the widget
    #[wasm_bindgen(js_name = dispatchClick)]
    pub fn dispatch_click(&mut self, element_id: &str) -> bool {
        self.calculator.dispatch(&DomEvent::click(element_id))
    }

    /// The widget as HTML
    #[wasm_bindgen(js_name = renderHtml)]
    pub fn render_html(&self) -> String {
        self.calculator.to_html()
    }

    /// The in-progress expression
    #[wasm_bindgen(getter, js_name = currentValue)]
    pub fn current_value(&self) -> String {
        self.calculator.current_value().to_string()
    }

    /// Id of the input field, for focusing it after a render
    #[wasm_bindgen(getter, js_name = inputId)]
    pub fn input_id(&self) -> String {
        self.calculator.input_id()
    }

    /// Id of the history pane, for scrolling it
    #[wasm_bindgen(getter, js_name = historyPaneId)]
    pub fn history_pane_id(&self) -> String {
        self.calculator.history_pane_id()
    }

    /// All expressions as a JSON array, current last
    #[wasm_bindgen(js_name = calculationsJson)]
    pub fn calculations_json(&self) -> String {
        serde_json::to_string(self.calculator.calculations()).unwrap_or_else(|_| "[]".to_string())
    }

    /// True once after the history grew; scroll the history pane down
    #[wasm_bindgen(js_name = takeScrollRequest)]
    pub fn take_scroll_request(&mut self) -> bool {
        self.calculator.take_scroll_request()
    }

    /// The default stylesheet
    pub fn stylesheet() -> String {
        DEFAULT_STYLESHEET.to_string()
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initializes the module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"calculator-widget initialized".into());
}
