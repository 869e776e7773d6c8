//! Validated keypad digit

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CalcError;

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Every digit, `0` through `9`
    pub const ALL: [Self; 10] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a digit, or `None` when out of range
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the digit value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the digit as an `f64`
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| CalcError::InvalidDigitInput(value.to_string()))
    }
}

impl TryFrom<i64> for Digit {
    type Error = CalcError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| CalcError::InvalidDigitInput(value.to_string()))
    }
}

impl TryFrom<i32> for Digit {
    type Error = CalcError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<f64> for Digit {
    type Error = CalcError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() || value.fract() != 0.0 || !(0.0..=9.0).contains(&value) {
            return Err(CalcError::InvalidDigitInput(value.to_string()));
        }
        Ok(Self(value as u8))
    }
}

impl FromStr for Digit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| CalcError::InvalidDigitInput(s.to_string()))?;
        Self::try_from(value)
    }
}

impl TryFrom<&str> for Digit {
    type Error = CalcError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_digits_valid() {
        for d in 0u8..=9 {
            assert_eq!(Digit::try_from(d).map(Digit::value), Ok(d));
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Digit::try_from(10u8).is_err());
        assert!(Digit::try_from(10).is_err());
        assert!(Digit::try_from(-1).is_err());
        assert!(Digit::try_from(i64::MAX).is_err());
    }

    #[test]
    fn test_non_integer_rejected() {
        assert_eq!(
            Digit::try_from(1.5),
            Err(CalcError::InvalidDigitInput("1.5".into()))
        );
        assert!(Digit::try_from(f64::NAN).is_err());
        assert!(Digit::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_integral_float_accepted() {
        assert_eq!(Digit::try_from(7.0).map(Digit::value), Ok(7));
    }

    #[test]
    fn test_parse_from_button_value() {
        assert_eq!("3".parse::<Digit>().map(Digit::value), Ok(3));
        assert_eq!(Digit::try_from(" 9 ").map(Digit::value), Ok(9));
        assert!(matches!(
            "seven".parse::<Digit>(),
            Err(CalcError::InvalidDigitInput(_))
        ));
        assert!("".parse::<Digit>().is_err());
    }

    #[test]
    fn test_serde_round_trip_and_rejection() {
        let d: Digit = serde_json::from_str("4").unwrap();
        assert_eq!(d.value(), 4);
        assert_eq!(serde_json::to_string(&d).unwrap(), "4");
        assert!(serde_json::from_str::<Digit>("12").is_err());
    }
}
