//! Calculator form binding
//!
//! Routes form events to the accumulator and renders the result back into
//! the output element. Errors go back to the caller and the output keeps
//! its last good value.

use tracing::debug;

use super::dom::{DomElement, DomEvent, MockDom, HISTORY_ID, OUTPUT_ID};
use crate::config::AccumulatorConfig;
use crate::core::{Accumulator, CalcError, CalcResult};
use crate::keypad::{Keypad, KeypadAction};

/// An accumulator wired to a calculator form
#[derive(Debug)]
pub struct CalculatorForm {
    acc: Accumulator,
    keypad: Keypad,
    dom: MockDom,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorForm {
    /// Creates a form with default accumulator settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&AccumulatorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: &AccumulatorConfig) -> Self {
        let keypad = Keypad::new();
        Self {
            acc: Accumulator::with_config(config),
            dom: MockDom::calculator_form(&keypad),
            keypad,
        }
    }

    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Text currently shown by the output element
    #[must_use]
    pub fn output_text(&self) -> &str {
        self.dom.get_element_text(OUTPUT_ID).unwrap_or_default()
    }

    /// Handles one form event
    pub fn handle_event(&mut self, event: DomEvent) -> CalcResult<()> {
        self.dom.dispatch_event(event.clone());
        match event {
            DomEvent::Click { element_id } => {
                let action = self.action_for(&element_id)?;
                self.perform(action)
            }
            DomEvent::KeyPress { key } => {
                let action =
                    KeypadAction::from_key(&key).ok_or_else(|| CalcError::UnknownKey(key))?;
                self.perform(action)
            }
            // the form never navigates
            DomEvent::Submit => Ok(()),
            DomEvent::Reset => {
                self.clear();
                Ok(())
            }
        }
    }

    /// Resets the form the way its reset control does
    pub fn reset(&mut self) {
        self.dom.dispatch_event(DomEvent::Reset);
        self.clear();
    }

    /// Clicks a button by id
    pub fn click(&mut self, element_id: &str) -> CalcResult<()> {
        self.handle_event(DomEvent::click(element_id))
    }

    /// Resolves a clicked element to its action through the button's
    /// `value` attribute, the way the page reads it
    fn action_for(&self, element_id: &str) -> CalcResult<KeypadAction> {
        let button = self
            .keypad
            .find_by_id(element_id)
            .ok_or_else(|| CalcError::UnknownKey(element_id.to_string()))?;
        let value = self
            .dom
            .get_element(element_id)
            .and_then(|e| e.get_attr("value"))
            .unwrap_or_default();

        match button.action {
            KeypadAction::Digit(_) => Ok(KeypadAction::Digit(value.parse()?)),
            KeypadAction::Operator(_) => Ok(KeypadAction::Operator(value.parse()?)),
            other => Ok(other),
        }
    }

    fn perform(&mut self, action: KeypadAction) -> CalcResult<()> {
        action.apply(&mut self.acc)?;
        self.render();
        debug!(%action, output = self.output_text(), "form updated");
        Ok(())
    }

    fn clear(&mut self) {
        self.acc.reset();
        self.render();
        debug!(output = self.output_text(), "form reset");
    }

    fn render(&mut self) {
        let text = self.acc.display_text();
        self.dom.set_element_text(OUTPUT_ID, &text);

        let items = self
            .acc
            .history()
            .iter_rev()
            .enumerate()
            .map(|(i, entry)| {
                DomElement::new("li")
                    .with_id(&format!("history-{i}"))
                    .with_text(&entry.display())
            })
            .collect();
        self.dom.replace_children(HISTORY_ID, items);
    }
}
