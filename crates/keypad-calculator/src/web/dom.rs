//! Mock DOM for the calculator form
//!
//! Enough of the document model to exercise the form binding without a
//! browser: elements with ids, attributes and text, plus an event log.

use std::collections::HashMap;

use crate::keypad::Keypad;

/// Element id of the calculator form
pub const FORM_ID: &str = "calculator";
/// Element id of the output element
pub const OUTPUT_ID: &str = "calc-output";
/// Element id of the history list
pub const HISTORY_ID: &str = "calc-history";

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
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

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Finds this element or a descendant by id, depth first
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&DomElement> {
        if !self.id.is_empty() && self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        if !self.id.is_empty() && self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

/// DOM events the calculator form reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click on a button
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press anywhere in the form
    KeyPress {
        /// The key that was pressed
        key: String,
    },
    /// Form submission
    Submit,
    /// Form reset
    Reset,
}

impl DomEvent {
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM holding the calculator form
///
/// `root` is the only copy of the tree; lookups and updates by id walk it.
#[derive(Debug, Default)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    event_history: Vec<DomEvent>,
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the calculator form: output, history list, and one fieldset
    /// per keypad group
    #[must_use]
    pub fn calculator_form(keypad: &Keypad) -> Self {
        let output = DomElement::new("output")
            .with_id(OUTPUT_ID)
            .with_attr("for", FORM_ID)
            .with_text("0");
        let history = DomElement::new("ul")
            .with_id(HISTORY_ID)
            .with_class("history-list");

        let mut form = DomElement::new("form")
            .with_id(FORM_ID)
            .with_class("calculator")
            .with_child(output)
            .with_child(history);

        for name in ["numbers", "modifiers", "operators", "controls"] {
            let mut fieldset = DomElement::new("fieldset").with_attr("name", name);
            for btn in keypad.fieldset(name) {
                let button = DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_attr("type", "button")
                    .with_attr("value", &btn.action.button_value())
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col));
                fieldset = fieldset.with_child(button);
            }
            form = form.with_child(fieldset);
        }

        Self {
            root: form,
            event_history: Vec::new(),
        }
    }

    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.root.find(id)
    }

    /// Records an event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.root.find_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.get_element(id).map(|e| e.text_content.as_str())
    }

    /// Replaces the children of an element
    pub fn replace_children(&mut self, parent_id: &str, children: Vec<DomElement>) {
        if let Some(parent) = self.root.find_mut(parent_id) {
            parent.children = children;
        }
    }
}
