//! Widget frontend
//!
//! The widget renders into a [`DomElement`] tree and consumes [`DomEvent`]s,
//! so the whole UI runs and is tested natively against [`MockDom`]. The
//! `wasm` feature adds [`BrowserCalculator`], the wasm-bindgen entry point.

#[cfg(feature = "wasm")]
mod browser;
mod buttons;
mod calculator;
mod dom;
mod driver;
mod handle;
mod props;
mod style;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use buttons::{BuiltinAction, ButtonCallback, ButtonLayout, CalculatorButton};
pub use calculator::{Calculator, DEFAULT_ID, ROOT_CLASS};
pub use dom::{escape_html, DomElement, DomEvent, MockDom};
pub use driver::DomDriver;
pub use handle::CalculatorHandle;
pub use props::CalculatorProps;
pub use style::DEFAULT_STYLESHEET;
