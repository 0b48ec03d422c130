//! Element tree and events
//!
//! The widget renders into [`DomElement`] trees and reacts to [`DomEvent`]s.
//! [`MockDom`] mounts a rendered tree for lookup by id, so the widget can be
//! exercised without a browser.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Represents a DOM element
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes (sorted for stable output)
    pub attributes: BTreeMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

/// Elements serialized without a closing tag
const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class (whitespace-separated lists are split)
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Adds several child elements
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = DomElement>) -> Self {
        self.children.extend(children);
        self
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Finds a descendant (or self) by ID
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DomElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Collects descendants (and self) carrying a class, in document order
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&DomElement> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a DomElement>) {
        if self.has_class(class) {
            found.push(self);
        }
        for child in &self.children {
            child.collect_by_class(class, found);
        }
    }

    /// Serializes the element to HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.id.is_empty() {
            let _ = write!(out, " id=\"{}\"", escape_html(&self.id));
        }
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_html(&self.classes.join(" ")));
        }
        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape_html(value));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        out.push_str(&escape_html(&self.text_content));
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Escapes text for use in HTML content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Key down event
    KeyDown {
        /// The ID of the element holding focus
        element_id: String,
        /// The key that was pressed (`KeyboardEvent.key`)
        key: String,
    },
    /// Focus event on an element
    Focus {
        /// The ID of the focused element
        element_id: String,
    },
    /// Blur event (element lost focus)
    Blur {
        /// The ID of the element that lost focus
        element_id: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key down event
    #[must_use]
    pub fn key_down(element_id: &str, key: &str) -> Self {
        Self::KeyDown {
            element_id: element_id.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates a focus event
    #[must_use]
    pub fn focus(element_id: &str) -> Self {
        Self::Focus {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a blur event
    #[must_use]
    pub fn blur(element_id: &str) -> Self {
        Self::Blur {
            element_id: element_id.to_string(),
        }
    }

    /// The ID of the element the event targets
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Click { element_id }
            | Self::Input { element_id, .. }
            | Self::KeyDown { element_id, .. }
            | Self::Focus { element_id }
            | Self::Blur { element_id } => element_id,
        }
    }
}

/// Mock DOM holding a mounted element tree
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    /// Elements by ID for quick lookup
    elements: HashMap<String, DomElement>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Focused element ID
    focused_element: Option<String>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
            focused_element: None,
        }
    }

    /// Replaces the mounted tree, re-indexing every element with an ID
    pub fn mount(&mut self, root: DomElement) {
        self.elements.clear();
        Self::index(&root, &mut self.elements);
        self.root = root;
    }

    fn index(element: &DomElement, elements: &mut HashMap<String, DomElement>) {
        if !element.id.is_empty() {
            elements.insert(element.id.clone(), element.clone());
        }
        for child in &element.children {
            Self::index(child, elements);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Records an event and applies its focus effects
    pub fn dispatch_event(&mut self, event: DomEvent) {
        match &event {
            DomEvent::Focus { element_id } => {
                self.focused_element = Some(element_id.clone());
            }
            DomEvent::Blur { element_id } => {
                if self.focused_element.as_deref() == Some(element_id.as_str()) {
                    self.focused_element = None;
                }
            }
            _ => {}
        }
        self.event_history.push(event);
    }

    /// Moves focus to an element without recording an event
    pub fn set_focus(&mut self, element_id: Option<&str>) {
        self.focused_element = element_id.map(str::to_string);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Gets the currently focused element ID
    #[must_use]
    pub fn focused_element(&self) -> Option<&str> {
        self.focused_element.as_deref()
    }

    /// Serializes the mounted tree to HTML
    #[must_use]
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}
