//! Unified Calculator Driver
//!
//! Button-press scenarios are written once against [`CalculatorDriver`] and
//! run against every front end: the bare accumulator and the form binding.

use crate::core::{format_number, Accumulator, CalcError, CalcResult};
use crate::keypad::KeypadAction;

/// Abstract driver trait for calculator interactions
///
/// # Example
///
/// ```rust
/// use keypad_calculator::driver::{CalculatorDriver, HeadlessDriver};
///
/// let mut driver = HeadlessDriver::new();
/// driver.press_keys("2+3*4=").unwrap();
/// assert_eq!(driver.display(), "20");
/// ```
pub trait CalculatorDriver {
    /// Presses one keypad button
    fn press(&mut self, action: KeypadAction) -> CalcResult<()>;

    /// Gets the text the display shows
    fn display(&self) -> String;

    /// Gets the pending expression
    fn expression(&self) -> String;

    /// Resets the calculator
    fn reset(&mut self);

    /// Gets history entries (newest first)
    fn history(&self) -> Vec<HistoryItem>;

    /// Presses every key of a key string, stopping at the first error
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        for action in KeypadAction::parse_keys(keys)? {
            self.press(action)?;
        }
        Ok(())
    }
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The result as a string
    pub result: String,
}

impl HistoryItem {
    pub(crate) fn from_accumulator(acc: &Accumulator) -> Vec<Self> {
        acc.history()
            .iter_rev()
            .map(|entry| Self {
                expression: entry.expression.clone(),
                result: format_number(entry.result),
            })
            .collect()
    }
}

/// Drives an [`Accumulator`] directly, with no display layer
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    acc: Accumulator,
}

impl HeadlessDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing accumulator
    #[must_use]
    pub fn with_accumulator(acc: Accumulator) -> Self {
        Self { acc }
    }

    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.acc
    }
}

impl CalculatorDriver for HeadlessDriver {
    fn press(&mut self, action: KeypadAction) -> CalcResult<()> {
        action.apply(&mut self.acc).map(|_| ())
    }

    fn display(&self) -> String {
        self.acc.display_text()
    }

    fn expression(&self) -> String {
        self.acc.expression()
    }

    fn reset(&mut self) {
        self.acc.reset();
    }

    fn history(&self) -> Vec<HistoryItem> {
        HistoryItem::from_accumulator(&self.acc)
    }
}

// ===== Unified Scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies strict left-to-right evaluation
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("2+3*4=").unwrap();
    assert_eq!(driver.display(), "20");

    driver.reset();
    driver.press_keys("10-4/2=").unwrap();
    assert_eq!(driver.display(), "3");
}

/// Verifies running totals while chaining operators
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("5+3+").unwrap();
    assert_eq!(driver.display(), "8");
    assert_eq!(driver.expression(), "5 + 3 +");
    driver.press_keys("2=").unwrap();
    assert_eq!(driver.display(), "10");
}

/// Verifies fractional entry and float-noise correction
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("12.05").unwrap();
    assert_eq!(driver.display(), "12.05");

    driver.reset();
    driver.press_keys("0.1+0.2=").unwrap();
    assert_eq!(driver.display(), "0.3");
}

/// Verifies that reset leaves no residue
pub fn verify_reset<D: CalculatorDriver>(driver: &mut D) {
    driver.press_keys("9.9~*").unwrap();
    driver.reset();
    assert_eq!(driver.display(), "0");
    driver.press_keys("7").unwrap();
    assert_eq!(driver.display(), "7");
}

/// Verifies that `=` after a result keeps the result
pub fn verify_repeated_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("6*7=").unwrap();
    driver.press_keys("=").unwrap();
    driver.press_keys("=").unwrap();
    assert_eq!(driver.display(), "42");
}

/// Verifies error propagation
pub fn verify_input_rejection<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("12").unwrap();
    assert!(matches!(
        driver.press_keys("%"),
        Err(CalcError::UnknownKey(_))
    ));
    assert_eq!(driver.display(), "12");

    let result = driver.press_keys("/0=");
    assert!(matches!(result, Err(CalcError::NonFiniteResult(_))));
    driver.reset();
}

/// Verifies history ordering
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_keys("1+1=").unwrap();
    driver.press_keys("2+2=").unwrap();

    let history = driver.history();
    assert!(history.len() >= 2);
    assert_eq!(history[0].expression, "2 + 2");
    assert_eq!(history[0].result, "4");
}

/// Complete verification suite
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_left_to_right(driver);
    verify_chaining(driver);
    verify_decimal_entry(driver);
    verify_reset(driver);
    verify_repeated_equals(driver);
    verify_input_rejection(driver);
    verify_history(driver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;

    #[test]
    fn test_headless_press() {
        let mut driver = HeadlessDriver::new();
        driver
            .press(KeypadAction::Operator(Operator::Add))
            .unwrap();
        assert_eq!(driver.display(), "0");
    }

    #[test]
    fn test_headless_with_accumulator() {
        let mut acc = Accumulator::new();
        acc.enter_digit(4).unwrap();
        let driver = HeadlessDriver::with_accumulator(acc);
        assert_eq!(driver.display(), "4");
        assert_eq!(driver.accumulator().current_value(), 4.0);
    }

    #[test]
    fn test_press_keys_stops_at_first_error() {
        let mut driver = HeadlessDriver::new();
        let result = driver.press_keys("1/0=5");
        assert!(result.is_err());
        // the trailing 5 was never pressed
        assert_eq!(driver.expression(), "1 / 0");
    }

    #[test]
    fn test_unified_left_to_right() {
        verify_left_to_right(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_chaining() {
        verify_chaining(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_decimal_entry() {
        verify_decimal_entry(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_reset() {
        verify_reset(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_repeated_equals() {
        verify_repeated_equals(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_input_rejection() {
        verify_input_rejection(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_unified_history() {
        verify_history(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_full_scenario_suite() {
        run_full_specification(&mut HeadlessDriver::new());
    }

    #[test]
    fn test_history_item_clone() {
        let item = HistoryItem {
            expression: "6 * 7".into(),
            result: "42".into(),
        };
        assert_eq!(item.clone(), item);
    }
}
