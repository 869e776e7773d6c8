//! Keypad Calculator - left-to-right expression accumulator
//!
//! Models a button-driven calculator: digits build the current operand,
//! operators close it and fold the sequence strictly left to right, with no
//! operator precedence. `2 + 3 * 4 =` shows `20`.
//!
//! # Guarantees
//!
//! - **Transactional presses**: a rejected press leaves the state untouched
//! - **Checked arithmetic**: every step is validated before it is committed
//! - **Float-noise correction**: `0.1 + 0.2 =` shows `0.3`
//! - **One scenario suite**: the same driver tests run against every front end
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut acc = Accumulator::new();
//! acc.enter_digit(2).unwrap();
//! acc.apply_operator(Operator::Add).unwrap();
//! acc.enter_digit(3).unwrap();
//! assert_eq!(acc.apply_operator(Operator::Multiply).unwrap(), 5.0);
//! acc.enter_digit(4).unwrap();
//! assert_eq!(acc.apply_operator(Operator::Equals).unwrap(), 20.0);
//!
//! // Rejected input changes nothing
//! assert!(acc.enter_digit(12).is_err());
//! assert_eq!(acc.display_text(), "20");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;

/// Web form front end over a mock DOM
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AccumulatorConfig, SignToggle};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        format_number, Accumulator, CalcError, CalcResult, Digit, Operator, Phase,
        ResultValidator, Sign, Snapshot, Token,
    };
    pub use crate::driver::{CalculatorDriver, HeadlessDriver, HistoryItem};
    pub use crate::keypad::{Keypad, KeypadAction, KeypadButton};
    pub use crate::web::{CalculatorForm, DomEvent, FormDriver, MockDom};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut acc = Accumulator::new();
        acc.enter_digit(7).unwrap();
        assert_eq!(acc.display(), 7.0);
    }

    #[test]
    fn test_no_precedence() {
        let mut driver = HeadlessDriver::new();
        driver.press_keys("1+2*3=").unwrap();
        assert_eq!(driver.display(), "9");
    }

    #[test]
    fn test_history_tracking() {
        let mut history = History::new();
        history.record("10 / 2", 5.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().display(), "10 / 2 = 5");
    }

    #[test]
    fn test_magnitude_bound_from_config() {
        let config = AccumulatorConfig::new().with_max_magnitude(50.0);
        let mut acc = Accumulator::with_config(&config);
        acc.enter_digit(9).unwrap();
        acc.apply_operator(Operator::Multiply).unwrap();
        acc.enter_digit(9).unwrap();
        assert!(matches!(
            acc.apply_operator(Operator::Equals),
            Err(CalcError::MagnitudeExceeded(_))
        ));
        assert_eq!(acc.display_text(), "9");
    }

    #[test]
    fn test_error_kinds() {
        let mut acc = Accumulator::new();
        assert_eq!(
            acc.enter_digit("x").unwrap_err().kind(),
            "invalid_digit_input"
        );
        assert_eq!(acc.apply_symbol("%").unwrap_err().kind(), "invalid_operator");
    }

    #[test]
    fn test_form_and_headless_agree() {
        let mut headless = HeadlessDriver::new();
        let mut form = FormDriver::new();
        for keys in ["12.5*2-", "3=", "~"] {
            headless.press_keys(keys).unwrap();
            form.press_keys(keys).unwrap();
            assert_eq!(headless.display(), form.display());
            assert_eq!(headless.expression(), form.expression());
        }
    }
}
