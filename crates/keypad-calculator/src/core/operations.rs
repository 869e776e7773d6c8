//! Operators supported by the keypad
//!
//! Membership is an enum variant check; evaluation is a direct match on the
//! variant, so every supported operator has exactly one arithmetic path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CalcError;

/// Type-safe operator enum - compile-time guarantee of valid operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Equals (=), collapses the sequence into its result
    Equals,
}

impl Operator {
    /// All supported operators, in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Equals,
    ];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equals => "=",
        }
    }

    /// Returns the button value name (`add`, `subtract`, ...)
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Equals => "equals",
        }
    }

    /// Returns true if evaluating this operator collapses the sequence
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self, Self::Equals)
    }

    /// Applies the operator to two operands.
    ///
    /// Returns `None` for a final operator, which has no right operand.
    #[must_use]
    pub fn apply(&self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Self::Add => Some(lhs + rhs),
            Self::Subtract => Some(lhs - rhs),
            Self::Multiply => Some(lhs * rhs),
            Self::Divide => Some(lhs / rhs),
            Self::Equals => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|op| op.symbol() == trimmed || op.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CalcError::InvalidOperator(s.to_string()))
    }
}

impl TryFrom<&str> for Operator {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<char> for Operator {
    type Error = CalcError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        value.encode_utf8(&mut buf).parse()
    }
}
