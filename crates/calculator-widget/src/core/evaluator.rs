//! Expression evaluation through `fasteval`
//!
//! Parsing and arithmetic are left to the expression engine. This module
//! only supplies the namespace (constants and a few extra functions) and
//! maps engine failures onto [`CalcError`].

use std::collections::BTreeMap;

use crate::core::{CalcError, CalcResult};

/// Expression evaluator
///
/// Wraps `fasteval::ez_eval` with a namespace of named constants. Unknown
/// names are reported by the engine as undefined and surface as
/// [`CalcError::Evaluation`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    constants: BTreeMap<String, f64>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the standard constants (`pi`, `e`, `tau`, `phi`)
    ///
    /// `Infinity` is also defined so that formatted infinite results can be
    /// evaluated again.
    #[must_use]
    pub fn new() -> Self {
        let mut constants = BTreeMap::new();
        constants.insert("pi".to_string(), std::f64::consts::PI);
        constants.insert("e".to_string(), std::f64::consts::E);
        constants.insert("tau".to_string(), std::f64::consts::TAU);
        constants.insert("phi".to_string(), 1.618_033_988_749_895);
        constants.insert("Infinity".to_string(), f64::INFINITY);
        Self { constants }
    }

    /// Adds or overrides a named constant
    #[must_use]
    pub fn with_constant(mut self, name: &str, value: f64) -> Self {
        self.constants.insert(name.to_string(), value);
        self
    }

    /// Looks up a constant by name
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Evaluates an expression string
    ///
    /// Infinite results are returned as values; only NaN is rejected.
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let expr = input.trim();
        if expr.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let mut namespace =
            |name: &str, args: Vec<f64>| -> Option<f64> { self.resolve(name, &args) };

        let value = fasteval::ez_eval(expr, &mut namespace)
            .map_err(|e| CalcError::Evaluation(format!("{e:?}")))?;

        if value.is_nan() {
            return Err(CalcError::NotANumber);
        }
        Ok(value)
    }

    /// Resolves a variable or a function the engine has no builtin for
    fn resolve(&self, name: &str, args: &[f64]) -> Option<f64> {
        match (name, args) {
            (_, []) => self.constant(name),
            ("sqrt", [x]) => Some(x.sqrt()),
            ("cbrt", [x]) => Some(x.cbrt()),
            ("exp", [x]) => Some(x.exp()),
            ("ln", [x]) => Some(x.ln()),
            ("log2", [x]) => Some(x.log2()),
            ("hypot", [x, y]) => Some(x.hypot(*y)),
            _ => None,
        }
    }
}

/// Evaluates `input`, returning `f64::NAN` on any failure
///
/// This is the sentinel boundary the widget relies on: it never panics and
/// never reports an error other than through the returned NaN.
#[must_use]
pub fn calculate(input: &str) -> f64 {
    Evaluator::new().evaluate_str(input).unwrap_or(f64::NAN)
}

/// Formats a number the way it is shown in the input field and history
///
/// Uses the shortest round-trip representation, switching to exponent
/// notation outside `[1e-6, 1e21)`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    // ===== Arithmetic =====

    #[test]
    fn test_evaluate_all_operations() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("10 + 5"), Ok(15.0));
        assert_eq!(eval.evaluate_str("10 - 3"), Ok(7.0));
        assert_eq!(eval.evaluate_str("6 * 7"), Ok(42.0));
        assert_eq!(eval.evaluate_str("20 / 4"), Ok(5.0));
        assert_eq!(eval.evaluate_str("17 % 5"), Ok(2.0));
        assert_eq!(eval.evaluate_str("2 ^ 10"), Ok(1024.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(eval.evaluate_str("42 * (3 + 7)"), Ok(420.0));
    }

    #[test]
    fn test_evaluate_unary_minus() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("-5 + 10"), Ok(5.0));
    }

    #[test]
    fn test_evaluate_surrounding_whitespace() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("   1 + 1  "), Ok(2.0));
    }

    #[test]
    fn test_evaluate_constants() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("pi"), Ok(std::f64::consts::PI));
        assert_eq!(eval.evaluate_str("2 * e"), Ok(2.0 * std::f64::consts::E));
        assert_eq!(eval.evaluate_str("tau / 2"), Ok(std::f64::consts::PI));
    }

    #[test]
    fn test_evaluate_custom_constant() {
        let eval = Evaluator::new().with_constant("answer", 42.0);
        assert_eq!(eval.evaluate_str("answer / 2"), Ok(21.0));
        assert_eq!(eval.constant("answer"), Some(42.0));
    }

    #[test]
    fn test_evaluate_extra_functions() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("sqrt(16)"), Ok(4.0));
        assert_eq!(eval.evaluate_str("cbrt(27)"), Ok(3.0));
        assert_eq!(eval.evaluate_str("log2(8)"), Ok(3.0));
        assert_eq!(eval.evaluate_str("hypot(3, 4)"), Ok(5.0));
        assert_eq!(eval.evaluate_str("ln(1)"), Ok(0.0));
    }

    #[test]
    fn test_evaluate_division_by_zero_is_infinite() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("1 / 0"), Ok(f64::INFINITY));
    }

    // ===== Failures =====

    #[test]
    fn test_evaluate_empty() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str(""), Err(CalcError::EmptyExpression));
        assert_eq!(eval.evaluate_str("   "), Err(CalcError::EmptyExpression));
    }

    #[test]
    fn test_evaluate_garbage() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("2 +"),
            Err(CalcError::Evaluation(_))
        ));
        assert!(matches!(
            eval.evaluate_str("hello world"),
            Err(CalcError::Evaluation(_))
        ));
        assert!(matches!(
            eval.evaluate_str("((1)"),
            Err(CalcError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluate_formatted_infinity() {
        let eval = Evaluator::new();
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(eval.evaluate_str(&format_number(value)), Ok(value));
        }
        assert_eq!(eval.evaluate_str("Infinity + 1"), Ok(f64::INFINITY));
        assert_eq!(eval.evaluate_str("1 / Infinity"), Ok(0.0));
        assert_eq!(eval.evaluate_str("Infinity - Infinity"), Err(CalcError::NotANumber));
    }

    #[test]
    fn test_evaluate_unknown_function_arity() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("sqrt(1, 2)"),
            Err(CalcError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluate_nan_rejected() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("0 / 0"), Err(CalcError::NotANumber));
        assert_eq!(eval.evaluate_str("sqrt(-1)"), Err(CalcError::NotANumber));
    }

    // ===== Sentinel wrapper =====

    #[test]
    fn test_calculate_valid() {
        assert_eq!(calculate("6 * 7"), 42.0);
    }

    #[test]
    fn test_calculate_sentinel() {
        assert!(calculate("").is_nan());
        assert!(calculate("Invalid operation").is_nan());
        assert!(calculate("1 + + ").is_nan());
    }

    // ===== format_number =====

    #[test]
    fn test_format_number_integer() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-5.0), "-5");
    }

    #[test]
    fn test_format_number_decimal() {
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123_456.0), "123456");
    }

    #[test]
    fn test_format_number_reparses() {
        let eval = Evaluator::new();
        for value in [42.0, 3.5, -0.25, 1024.5] {
            let text = format_number(value);
            assert_eq!(eval.evaluate_str(&text), Ok(value), "{text}");
        }
    }
}
