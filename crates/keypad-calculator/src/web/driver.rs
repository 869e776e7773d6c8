//! Form driver
//!
//! Runs the unified driver scenarios through button clicks on the form.

use super::dom::DomEvent;
use super::form::CalculatorForm;
use crate::core::CalcResult;
use crate::driver::{CalculatorDriver, HistoryItem};
use crate::keypad::KeypadAction;

/// Drives a [`CalculatorForm`] by clicking its buttons
#[derive(Debug, Default)]
pub struct FormDriver {
    form: CalculatorForm,
}

impl FormDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing form
    #[must_use]
    pub fn with_form(form: CalculatorForm) -> Self {
        Self { form }
    }

    #[must_use]
    pub fn form(&self) -> &CalculatorForm {
        &self.form
    }
}

impl CalculatorDriver for FormDriver {
    fn press(&mut self, action: KeypadAction) -> CalcResult<()> {
        match action {
            KeypadAction::Clear => self.form.handle_event(DomEvent::Reset),
            other => self.form.click(&other.element_id()),
        }
    }

    fn display(&self) -> String {
        self.form.output_text().to_string()
    }

    fn expression(&self) -> String {
        self.form.accumulator().expression()
    }

    fn reset(&mut self) {
        self.form.reset();
    }

    fn history(&self) -> Vec<HistoryItem> {
        HistoryItem::from_accumulator(self.form.accumulator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccumulatorConfig, SignToggle};
    use crate::driver::*;

    #[test]
    fn test_form_driver_clicks_buttons() {
        let mut driver = FormDriver::new();
        driver.press_keys("12+").unwrap();
        let clicks: Vec<_> = driver
            .form()
            .dom()
            .event_history()
            .iter()
            .filter_map(|e| match e {
                DomEvent::Click { element_id } => Some(element_id.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(clicks, vec!["btn-1", "btn-2", "btn-add"]);
    }

    #[test]
    fn test_clear_key_dispatches_reset() {
        let mut driver = FormDriver::new();
        driver.press_keys("5c").unwrap();
        assert_eq!(driver.display(), "0");
        assert_eq!(
            driver.form().dom().event_history().last(),
            Some(&DomEvent::Reset)
        );
    }

    #[test]
    fn test_reset_clears_pending_operation() {
        let mut driver = FormDriver::new();
        driver.press_keys("8/2").unwrap();
        driver.reset();
        assert_eq!(driver.display(), "0");
        assert_eq!(driver.expression(), "");
        assert_eq!(
            driver.form().dom().event_history().last(),
            Some(&DomEvent::Reset)
        );
        driver.press_keys("3+4=").unwrap();
        assert_eq!(driver.display(), "7");
    }

    #[test]
    fn test_with_form_config() {
        let config = AccumulatorConfig::new().with_sign_toggle(SignToggle::ForceNegative);
        let mut driver = FormDriver::with_form(CalculatorForm::with_config(&config));
        driver.press_keys("5~~").unwrap();
        assert_eq!(driver.display(), "5");
    }

    // ===== Unified Scenarios =====

    #[test]
    fn test_unified_left_to_right() {
        verify_left_to_right(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_chaining() {
        verify_chaining(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_decimal_entry() {
        verify_decimal_entry(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_reset() {
        verify_reset(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_repeated_equals() {
        verify_repeated_equals(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_input_rejection() {
        verify_input_rejection(&mut FormDriver::new());
    }

    #[test]
    fn test_unified_history() {
        verify_history(&mut FormDriver::new());
    }

    #[test]
    fn test_full_scenario_suite() {
        run_full_specification(&mut FormDriver::new());
    }
}
