//! The operand currently being typed
//!
//! The value itself lives in the accumulator's sequence; this tracks how
//! the next digit lands on it.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Digit};

/// Sign applied to newly entered digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Digits are added
    #[default]
    Positive,
    /// Digits are subtracted
    Negative,
}

impl Sign {
    /// Returns `1.0` or `-1.0`
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// Sign of `value`, counting `-0` as negative
    #[must_use]
    pub fn of(value: f64) -> Self {
        if value.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

/// Decimal mode, fractional digit count and sign of the current operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumericEntry {
    /// Whether the decimal point has been pressed for this operand
    pub decimal_mode: bool,
    /// Number of fractional digits entered so far
    pub decimal_places: u32,
    /// Sign applied to new digits
    pub sign: Sign,
}

impl NumericEntry {
    /// Creates an entry in integer mode with a positive sign
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables decimal mode. Later digits become fractional.
    pub fn enter_decimal_point(&mut self) {
        self.decimal_mode = true;
    }

    /// Lands `digit` on `current` and returns the new operand value.
    ///
    /// With `overwrite` set the current value is discarded first. The result
    /// is rounded to the number of fractional digits entered, so binary float
    /// noise never builds up across presses.
    pub fn push_digit(&mut self, current: f64, digit: Digit, overwrite: bool) -> CalcResult<f64> {
        let places = self.decimal_places + u32::from(self.decimal_mode);
        let shift = if self.decimal_mode { 1.0 } else { 10.0 };
        let base = if overwrite { 0.0 } else { current * shift };

        let scale = 10f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
        let value = base + digit.as_f64() / scale * self.sign.factor();
        let value = round_to_places(value, places)?;

        self.decimal_places = places;
        Ok(value)
    }
}

/// Rounds to a fixed number of fractional digits via fixed-point formatting
fn round_to_places(value: f64, places: u32) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::NonFiniteResult(format!(
            "digit entry produced {value}"
        )));
    }
    let places = places as usize;
    format!("{value:.places$}")
        .parse::<f64>()
        .map_err(|e| CalcError::NonFiniteResult(e.to_string()))
}
