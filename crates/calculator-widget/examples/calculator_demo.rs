//! Calculator Widget Demo
//!
//! Drives the widget through mock DOM events and prints what a user would
//! see after each step.
//!
//! Run with: RUST_LOG=debug cargo run --example calculator_demo

use calculator_widget::driver::{run_full_specification, CalculatorDriver};
use calculator_widget::wasm::{CalculatorProps, DomDriver};
use tracing_subscriber::EnvFilter;

fn show(driver: &DomDriver) {
    for row in driver.history_items_text() {
        println!("   │ {row}");
    }
    let marker = if driver.root_has_changed() { "  (error)" } else { "" };
    println!(
        "   └ [{}]{marker}",
        driver.input_element_value().unwrap_or_default()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Calculator Widget Demo - Mock DOM");
    println!("=================================");
    println!();

    let mut driver = DomDriver::with_props(CalculatorProps::new().with_id("demo"));

    println!("1. Type '42 * (3 + 7)' and press Enter");
    driver.type_input("42 * (3 + 7)");
    driver.press_enter();
    show(&driver);

    println!("\n2. Click ÷ 4 =");
    for label in ["÷", "4", "="] {
        driver.click_button_labelled(label);
    }
    show(&driver);

    println!("\n3. Type '10 *' and press Enter");
    driver.type_input("10 *");
    driver.press_enter();
    show(&driver);

    println!("\n4. Click the first history row");
    driver.click_history(0);
    show(&driver);

    println!("\n5. Rendered HTML");
    println!("{}", driver.dom().to_html());

    println!("\n6. Unified specification on a fresh driver");
    let mut fresh = DomDriver::new();
    run_full_specification(&mut fresh);
    println!("   all checks passed, {} rows left", fresh.get_history().len());
}
