//! Calculator widget
//!
//! Owns the calculation state, reacts to UI events and renders itself into a
//! [`DomElement`] tree:
//!
//! ```text
//! div.Calculator#<id> [data-haschanged]
//! ├── div.HistoryPane       one button.HistoryItem per committed row
//! │                         (span.Input, span.sep "=", span.Output)
//! ├── input.InputPane       the current entry
//! └── div.ButtonPane        grid of buttons from the layout
//! ```
//!
//! Element ids are derived from the root id (`calculator` when unset):
//! `<id>-input`, `<id>-history-<n>`, `<id>-button-<row>-<col>`.

use tracing::debug;

use super::buttons::ButtonLayout;
use super::dom::{DomElement, DomEvent};
use super::handle::CalculatorHandle;
use super::props::CalculatorProps;
use crate::core::{format_number, CalcResult, CalculatorState, Evaluator, HistoryRow};

/// Class always present on the root element
pub const ROOT_CLASS: &str = "Calculator";

/// Root id used when none is configured
pub const DEFAULT_ID: &str = "calculator";

/// The calculator widget
#[derive(Debug)]
pub struct Calculator {
    id: String,
    class_name: Option<String>,
    layout: ButtonLayout,
    evaluator: Evaluator,
    state: CalculatorState,
    input_focused: bool,
    seen_rows: usize,
    seen_pushes: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(CalculatorProps::default())
    }
}

impl Calculator {
    /// Mounts a calculator with the given configuration
    #[must_use]
    pub fn new(props: CalculatorProps) -> Self {
        let layout = props.buttons.unwrap_or_else(ButtonLayout::basic);
        layout.duplicate_keys();

        let mut state = CalculatorState::new().with_carry_result(props.carry_result);
        if let Some(max) = props.max_history {
            state = state.with_max_history(max);
        }

        Self {
            id: props.id.unwrap_or_else(|| DEFAULT_ID.to_string()),
            class_name: props.class_name,
            layout,
            evaluator: Evaluator::new(),
            state,
            input_focused: false,
            seen_rows: 0,
            seen_pushes: 0,
        }
    }

    /// Replaces the expression evaluator
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    // ===== State access =====

    /// A handle on the state, as passed to custom button actions
    pub fn handle(&mut self) -> CalculatorHandle<'_> {
        CalculatorHandle::new(&mut self.state, &self.evaluator)
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

    /// Committed expressions with their evaluated outputs
    #[must_use]
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.state.calculations().rows(&self.evaluator)
    }

    /// True while the current entry holds the error indicator
    #[must_use]
    pub fn is_replaced(&self) -> bool {
        self.state.is_replaced()
    }

    /// The button table
    #[must_use]
    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    /// The expression evaluator
    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Root element id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root class list: `Calculator` plus the configured class
    #[must_use]
    pub fn class_name(&self) -> String {
        match &self.class_name {
            Some(extra) if !extra.trim().is_empty() => format!("{ROOT_CLASS} {extra}"),
            _ => ROOT_CLASS.to_string(),
        }
    }

    /// Whether the input field holds focus
    #[must_use]
    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    // ===== Element ids =====

    /// Id of the input field
    #[must_use]
    pub fn input_id(&self) -> String {
        format!("{}-input", self.id)
    }

    /// Id of the history pane
    #[must_use]
    pub fn history_pane_id(&self) -> String {
        format!("{}-history", self.id)
    }

    /// Id of the history row at `index`
    #[must_use]
    pub fn history_item_id(&self, index: usize) -> String {
        format!("{}-history-{index}", self.id)
    }

    /// Id of the button pane
    #[must_use]
    pub fn button_pane_id(&self) -> String {
        format!("{}-buttons", self.id)
    }

    /// Id of the button at (row, col)
    #[must_use]
    pub fn button_id(&self, row: usize, col: usize) -> String {
        format!("{}-button-{row}-{col}", self.id)
    }

    // ===== Event handlers =====

    /// Evaluates and commits the current entry
    pub fn commit(&mut self) -> CalcResult<f64> {
        self.state.commit(&self.evaluator)
    }

    /// Key pressed in the input field; returns true when the key was consumed
    ///
    /// Only Enter is handled (it commits). Everything else is left to the
    /// input field, whose changes arrive through [`Calculator::change_input`].
    pub fn key_down(&mut self, key: &str) -> bool {
        if key != "Enter" {
            return false;
        }
        // the failure is already shown in the input field
        let _ = self.commit();
        true
    }

    /// The input field's text changed
    pub fn change_input(&mut self, value: &str) {
        self.state.replace_current_value(value);
    }

    /// Clicks the button at (row, col); false when there is none
    pub fn click_button(&mut self, row: usize, col: usize) -> bool {
        let Some(button) = self.layout.get(row, col) else {
            return false;
        };
        let mut handle = CalculatorHandle::new(&mut self.state, &self.evaluator);
        button.click(&mut handle);
        self.input_focused = true;
        true
    }

    /// Clicks the first button with the given key
    pub fn click_button_by_key(&mut self, key: &str) -> bool {
        match self.layout.find_by_key(key) {
            Some((row, col)) => self.click_button(row, col),
            None => false,
        }
    }

    /// Clicks the first button with the given label
    pub fn click_button_by_label(&mut self, label: &str) -> bool {
        match self.layout.find_by_label(label) {
            Some((row, col)) => self.click_button(row, col),
            None => false,
        }
    }

    /// Clicks a history row: its output replaces the current entry
    pub fn click_history(&mut self, index: usize) -> bool {
        let Some(input) = self.state.calculations().committed().get(index) else {
            return false;
        };
        let output = self.evaluator.evaluate_str(input).unwrap_or(f64::NAN);
        self.state.replace_current_value(format_number(output));
        self.input_focused = true;
        true
    }

    /// Clicks anywhere on the widget: focuses the input field
    pub fn click_root(&mut self) {
        self.input_focused = true;
    }

    /// Routes an event by target id; returns true when it was handled
    pub fn dispatch(&mut self, event: &DomEvent) -> bool {
        debug!(element = event.target(), ?event, "calculator event");
        let input_id = self.input_id();
        match event {
            DomEvent::Click { element_id } => {
                if *element_id == self.id {
                    self.click_root();
                    true
                } else if let Some((row, col)) = self.parse_button_id(element_id) {
                    self.click_button(row, col)
                } else if let Some(index) = self.parse_history_id(element_id) {
                    self.click_history(index)
                } else if element_id
                    .strip_prefix(&self.id)
                    .is_some_and(|rest| rest.starts_with('-'))
                {
                    // clicks inside the widget bubble to the root
                    self.click_root();
                    true
                } else {
                    false
                }
            }
            DomEvent::Input { element_id, value } if *element_id == input_id => {
                self.change_input(value);
                true
            }
            DomEvent::KeyDown { element_id, key } if *element_id == input_id => {
                self.key_down(key)
            }
            DomEvent::Focus { element_id } if *element_id == input_id => {
                self.input_focused = true;
                true
            }
            DomEvent::Blur { element_id } if *element_id == input_id => {
                self.input_focused = false;
                true
            }
            _ => false,
        }
    }

    fn parse_button_id(&self, element_id: &str) -> Option<(usize, usize)> {
        let rest = element_id.strip_prefix(&self.id)?.strip_prefix("-button-")?;
        let (row, col) = rest.split_once('-')?;
        Some((row.parse().ok()?, col.parse().ok()?))
    }

    fn parse_history_id(&self, element_id: &str) -> Option<usize> {
        element_id
            .strip_prefix(&self.id)?
            .strip_prefix("-history-")?
            .parse()
            .ok()
    }

    /// True once each time a row was added at the bottom of the history
    ///
    /// Fires on every commit, including those that evict the oldest row of a
    /// bounded history, and when the list is replaced by a longer one. The
    /// host scrolls the history pane to its bottom when this fires.
    pub fn take_scroll_request(&mut self) -> bool {
        let rows = self.state.calculations().committed_len();
        let pushes = self.state.pushed_rows();
        let grew = rows > self.seen_rows || pushes > self.seen_pushes;
        self.seen_rows = rows;
        self.seen_pushes = pushes;
        grew
    }

    // ===== Rendering =====

    /// Renders the widget
    #[must_use]
    pub fn render(&self) -> DomElement {
        DomElement::new("div")
            .with_id(&self.id)
            .with_class(&self.class_name())
            .with_attr("data-haschanged", &self.is_replaced().to_string())
            .with_child(self.render_history())
            .with_child(self.render_input())
            .with_child(self.render_buttons())
    }

    /// Renders the widget to HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render().to_html()
    }

    fn render_history(&self) -> DomElement {
        let items = self.history_rows().into_iter().map(|row| {
            DomElement::new("button")
                .with_id(&self.history_item_id(row.index))
                .with_class("HistoryItem")
                .with_attr("type", "button")
                .with_attr("tabindex", "-1")
                .with_child(DomElement::new("span").with_class("Input").with_text(&row.input))
                .with_child(DomElement::new("span").with_class("sep").with_text("="))
                .with_child(
                    DomElement::new("span")
                        .with_class("Output")
                        .with_text(&row.output_text()),
                )
        });

        DomElement::new("div")
            .with_id(&self.history_pane_id())
            .with_class("HistoryPane")
            .with_children(items)
    }

    fn render_input(&self) -> DomElement {
        let input = DomElement::new("input")
            .with_id(&self.input_id())
            .with_class("InputPane")
            .with_attr("type", "text")
            .with_attr("value", self.current_value());
        if self.input_focused {
            input.with_attr("data-focused", "true")
        } else {
            input
        }
    }

    fn render_buttons(&self) -> DomElement {
        let mut pane = DomElement::new("div")
            .with_id(&self.button_pane_id())
            .with_class("ButtonPane")
            .with_attr(
                "style",
                &format!(
                    "grid-template-columns: repeat({}, 1fr)",
                    self.layout.max_columns()
                ),
            );

        for (row, cells) in self.layout.rows().iter().enumerate() {
            for (col, button) in cells.iter().enumerate() {
                let span = self.layout.column_span(row, col).unwrap_or(1);
                let mut element = DomElement::new("button")
                    .with_id(&self.button_id(row, col))
                    .with_attr("type", "button")
                    .with_attr("tabindex", "-1")
                    .with_attr("data-key", button.key())
                    .with_attr(
                        "style",
                        &format!("grid-column-start: auto; grid-column-end: span {span}"),
                    )
                    .with_text(button.label());
                if let Some(class) = &button.class_name {
                    element = element.with_class(class);
                }
                if let Some(title) = &button.title {
                    element = element.with_attr("title", title);
                }
                pane.children.push(element);
            }
        }
        pane
    }
}
