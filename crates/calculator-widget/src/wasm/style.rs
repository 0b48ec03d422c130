//! Default stylesheet for the rendered widget

/// CSS matching the class names emitted by [`super::Calculator::render`]
pub const DEFAULT_STYLESHEET: &str = r#".Calculator {
    display: flex;
    flex-direction: column;
    font-family: monospace;
    border: 1px solid #ccc;
    border-radius: 4px;
    overflow: hidden;
}

.Calculator .HistoryPane {
    flex: 1 1 auto;
    max-height: 12em;
    overflow-y: auto;
    display: flex;
    flex-direction: column;
}

.Calculator .HistoryItem {
    display: flex;
    justify-content: space-between;
    gap: 0.5em;
    padding: 0.25em 0.5em;
    border: none;
    background: none;
    font: inherit;
    text-align: left;
    cursor: pointer;
}

.Calculator .HistoryItem:hover {
    background: #f0f0f0;
}

.Calculator .HistoryItem .sep {
    color: #999;
}

.Calculator .HistoryItem .Output {
    font-weight: bold;
}

.Calculator .InputPane {
    padding: 0.5em;
    border: none;
    border-top: 1px solid #ccc;
    border-bottom: 1px solid #ccc;
    font: inherit;
    font-size: 1.25em;
    text-align: right;
}

.Calculator[data-haschanged="true"] .InputPane {
    color: #c00;
}

.Calculator .ButtonPane {
    display: grid;
    gap: 1px;
    background: #ccc;
}

.Calculator .ButtonPane button {
    padding: 0.75em 0;
    border: none;
    background: #fff;
    font: inherit;
    cursor: pointer;
}

.Calculator .ButtonPane .Operator {
    background: #f5f5f5;
}

.Calculator .ButtonPane .Equals {
    background: #e8f0fe;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wasm::Calculator;

    #[test]
    fn test_stylesheet_covers_rendered_classes() {
        let root = Calculator::default().render();
        for class in ["Calculator", "HistoryPane", "InputPane", "ButtonPane"] {
            assert!(!root.find_by_class(class).is_empty(), "{class} not rendered");
            assert!(DEFAULT_STYLESHEET.contains(&format!(".{class}")));
        }
        assert!(DEFAULT_STYLESHEET.contains(".HistoryItem"));
    }

    #[test]
    fn test_stylesheet_marks_error_state() {
        assert!(DEFAULT_STYLESHEET.contains(r#"[data-haschanged="true"]"#));
    }

    #[test]
    fn test_stylesheet_braces_balanced() {
        let open = DEFAULT_STYLESHEET.matches('{').count();
        let close = DEFAULT_STYLESHEET.matches('}').count();
        assert_eq!(open, close);
    }
}
