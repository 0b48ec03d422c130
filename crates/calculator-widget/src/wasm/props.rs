//! Widget configuration

use serde::{Deserialize, Serialize};

use super::buttons::ButtonLayout;
use crate::core::ConfigError;

/// Configuration accepted when mounting a calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorProps {
    /// Extra CSS class added to the root element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Root element id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Button table (the standard layout when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<ButtonLayout>,
    /// Start the next entry with the result of a successful commit
    pub carry_result: bool,
    /// Maximum number of history rows kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history: Option<usize>,
}

impl Default for CalculatorProps {
    fn default() -> Self {
        Self {
            class_name: None,
            id: None,
            buttons: None,
            carry_result: true,
            max_history: None,
        }
    }
}

impl CalculatorProps {
    /// Default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the extra CSS class
    #[must_use]
    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Sets the root element id
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the button table
    #[must_use]
    pub fn with_buttons(mut self, buttons: ButtonLayout) -> Self {
        self.buttons = Some(buttons);
        self
    }

    /// Sets whether commits carry the result forward
    #[must_use]
    pub fn with_carry_result(mut self, carry_result: bool) -> Self {
        self.carry_result = carry_result;
        self
    }

    /// Bounds the history
    #[must_use]
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.max_history = Some(max_history);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_props_default() {
        let props = CalculatorProps::default();
        assert!(props.class_name.is_none());
        assert!(props.id.is_none());
        assert!(props.buttons.is_none());
        assert!(props.carry_result);
        assert!(props.max_history.is_none());
    }

    #[test]
    fn test_props_builder() {
        let props = CalculatorProps::new()
            .with_class_name("dark")
            .with_id("calc")
            .with_carry_result(false)
            .with_max_history(10)
            .with_buttons(ButtonLayout::default());
        assert_eq!(props.class_name.as_deref(), Some("dark"));
        assert_eq!(props.id.as_deref(), Some("calc"));
        assert!(!props.carry_result);
        assert_eq!(props.max_history, Some(10));
        assert!(props.buttons.is_some());
    }

    #[test]
    fn test_props_from_json_partial() {
        let props = CalculatorProps::from_json(r#"{"id": "calc"}"#).unwrap();
        assert_eq!(props.id.as_deref(), Some("calc"));
        assert!(props.carry_result);
    }

    #[test]
    fn test_props_from_json_full() {
        let json = r#"{
            "class_name": "dark",
            "id": "calc",
            "buttons": [[{"value": "1"}, {"value": "2"}]],
            "carry_result": false,
            "max_history": 5
        }"#;
        let props = CalculatorProps::from_json(json).unwrap();
        assert_eq!(props.buttons.unwrap().button_count(), 2);
        assert!(!props.carry_result);
        assert_eq!(props.max_history, Some(5));
    }

    #[test]
    fn test_props_from_json_invalid() {
        assert!(CalculatorProps::from_json(r#"{"max_history": "lots"}"#).is_err());
    }

    #[test]
    fn test_props_serialize_default() {
        let json = serde_json::to_string(&CalculatorProps::default()).unwrap();
        assert_eq!(json, r#"{"carry_result":true}"#);
    }
}
