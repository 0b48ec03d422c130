//! Calculator Widget
//!
//! An embeddable calculator: a scrolling history of committed expressions,
//! an editable input line and a configurable grid of buttons. Expressions
//! are evaluated by `fasteval`; a failed evaluation shows an error indicator
//! in the input line instead of advancing the history.
//!
//! The widget renders into a plain element tree ([`wasm::DomElement`]) and
//! is driven by events, so it runs natively against a mock DOM and in the
//! browser through the `wasm` feature.
//!
//! # Example
//!
//! ```rust
//! use calculator_widget::prelude::*;
//!
//! let mut calc = Calculator::new(CalculatorProps::new().with_id("calc"));
//!
//! calc.change_input("42 * (3 + 7)");
//! assert!(calc.key_down("Enter"));
//! assert_eq!(calc.calculations(), &["42 * (3 + 7)".to_string(), "420".to_string()]);
//!
//! calc.change_input("1 +");
//! calc.key_down("Enter");
//! assert_eq!(calc.current_value(), INVALID_OPERATION);
//! assert!(calc.is_replaced());
//!
//! // the failure sentinel
//! assert!(calculate("1 +").is_nan());
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

/// Widget frontend - always available
/// (the mock DOM lets it run without browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::{
        calculate, format_number, CalcError, CalcResult, Calculations, CalculatorState,
        ConfigError, Evaluator, HistoryRow, INVALID_OPERATION,
    };
    pub use crate::driver::{CalculatorDriver, HistoryItem};
    pub use crate::wasm::{
        BuiltinAction, ButtonLayout, Calculator, CalculatorButton, CalculatorHandle,
        CalculatorProps, DomDriver, DomElement, DomEvent, MockDom,
    };

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
}
