//! Core accumulator module
//!
//! The expression accumulator turns button presses into a running value:
//! - Digit entry grows the current operand
//! - Operator entry closes the operand and reduces the sequence left-to-right
//! - Every arithmetic step is checked before it is committed

pub mod accumulator;
mod digit;
mod entry;
pub mod history;
mod operations;

pub use accumulator::{Accumulator, Phase, Snapshot, Token};
pub use digit::Digit;
pub use entry::{NumericEntry, Sign};
pub use operations::Operator;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Digit input was non-numeric, out of range, or not an integer
    #[error("Invalid digit input: {0}")]
    InvalidDigitInput(String),
    /// Operator value is not one of the supported operators
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),
    /// A sequence slot holds the wrong kind of token
    #[error("Malformed sequence entry at index {index}: expected {expected}")]
    MalformedSequenceEntry {
        /// Position in the token sequence
        index: usize,
        /// What the slot should have held
        expected: &'static str,
    },
    /// An arithmetic step or digit accumulation produced NaN or infinity
    #[error("Non-finite result: {0}")]
    NonFiniteResult(String),
    /// Result exceeds the configured magnitude bound
    #[error("Result {0} exceeds maximum magnitude")]
    MagnitudeExceeded(f64),
    /// Key string contained something no keypad button produces
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl CalcError {
    /// Short machine-readable name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDigitInput(_) => "invalid_digit_input",
            Self::InvalidOperator(_) => "invalid_operator",
            Self::MalformedSequenceEntry { .. } => "malformed_sequence_entry",
            Self::NonFiniteResult(_) => "non_finite_result",
            Self::MagnitudeExceeded(_) => "magnitude_exceeded",
            Self::UnknownKey(_) => "unknown_key",
        }
    }
}

/// Checks each arithmetic step before it reaches the sequence.
///
/// NaN and infinity are always rejected; values larger than
/// `max_magnitude` are rejected as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultValidator {
    /// Maximum allowed result magnitude
    pub max_magnitude: f64,
}

impl Default for ResultValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultValidator {
    /// Default bound: any finite value passes
    pub const DEFAULT_MAX_MAGNITUDE: f64 = f64::MAX;

    /// Creates a validator that only rejects non-finite values
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_magnitude: Self::DEFAULT_MAX_MAGNITUDE,
        }
    }

    /// Creates a validator with a custom magnitude bound
    #[must_use]
    pub const fn with_max_magnitude(max_magnitude: f64) -> Self {
        Self { max_magnitude }
    }

    /// Validates a step result. `context` names the step in the error.
    pub fn validate(&self, value: f64, context: impl FnOnce() -> String) -> CalcResult<f64> {
        if !value.is_finite() {
            return Err(CalcError::NonFiniteResult(context()));
        }
        if value.abs() > self.max_magnitude {
            return Err(CalcError::MagnitudeExceeded(value));
        }
        Ok(value)
    }
}

/// Formats a number for display (removes trailing zeros)
///
/// Magnitudes too small for ten decimals fall back to exponent form, so a
/// nonzero value never shows as `0`.
#[must_use]
pub fn format_number(n: f64) -> String {
    // -0 shows as 0
    let n = if n == 0.0 { 0.0 } else { n };
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else if n.fract() == 0.0 {
        format!("{n}")
    } else {
        let s = format!("{:.10}", n);
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s.trim_start_matches('-') == "0" {
            format!("{n:e}")
        } else {
            s.to_string()
        }
    }
}
