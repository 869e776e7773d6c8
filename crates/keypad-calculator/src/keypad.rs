//! Calculator keypad
//!
//! Button actions, the button grid, and keyboard mapping shared by every
//! front end.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Accumulator, CalcError, CalcResult, Digit, Operator};

/// Actions that keypad buttons can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum KeypadAction {
    /// Enter a digit (0-9)
    Digit(Digit),
    /// Start the fractional part
    Decimal,
    /// Negate the current operand
    ToggleSign,
    /// Apply an operator (including `=`)
    Operator(Operator),
    /// Reset the calculator
    Clear,
}

impl KeypadAction {
    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::ToggleSign => "±".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Clear => "C".to_string(),
        }
    }

    /// Returns the form `value` attribute of the button
    #[must_use]
    pub fn button_value(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => "decimal".to_string(),
            Self::ToggleSign => "positive-negative".to_string(),
            Self::Operator(op) => op.name().to_string(),
            Self::Clear => "reset".to_string(),
        }
    }

    /// Returns the fieldset the button belongs to
    #[must_use]
    pub const fn fieldset(&self) -> &'static str {
        match self {
            Self::Digit(_) => "numbers",
            Self::Decimal | Self::ToggleSign => "modifiers",
            Self::Operator(_) => "operators",
            Self::Clear => "controls",
        }
    }

    /// Returns the element id of the button
    #[must_use]
    pub fn element_id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Decimal => "btn-decimal".to_string(),
            Self::ToggleSign => "btn-sign".to_string(),
            Self::Operator(op) => format!("btn-{}", op.name()),
            Self::Clear => "btn-clear".to_string(),
        }
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "." | "," => Some(Self::Decimal),
            "~" | "±" | "n" | "N" => Some(Self::ToggleSign),
            "Enter" => Some(Self::Operator(Operator::Equals)),
            "Escape" | "c" | "C" => Some(Self::Clear),
            _ => key
                .parse::<Digit>()
                .ok()
                .filter(|_| key.len() == 1)
                .map(Self::Digit)
                .or_else(|| key.parse::<Operator>().ok().map(Self::Operator)),
        }
    }

    /// Splits a key string such as `"12+3.5="` into actions.
    ///
    /// Whitespace separates nothing and is skipped.
    pub fn parse_keys(keys: &str) -> CalcResult<Vec<Self>> {
        keys.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| {
                let mut buf = [0u8; 4];
                let key = c.encode_utf8(&mut buf);
                Self::from_key(key).ok_or_else(|| CalcError::UnknownKey(key.to_string()))
            })
            .collect()
    }

    /// Performs the action and returns the value the display should show
    pub fn apply(self, acc: &mut Accumulator) -> CalcResult<f64> {
        match self {
            Self::Digit(d) => acc.enter_digit(d.value()),
            Self::Decimal => {
                acc.enter_decimal_point();
                Ok(acc.display())
            }
            Self::ToggleSign => Ok(acc.toggle_sign()),
            Self::Operator(op) => acc.apply_operator(op),
            Self::Clear => {
                acc.reset();
                Ok(acc.display())
            }
        }
    }
}

impl fmt::Display for KeypadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The action this button performs
    pub action: KeypadAction,
    /// The element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        Self {
            id: action.element_id(),
            action,
            row,
            col,
        }
    }
}

/// Keypad layout
/// ```text
/// [ 7 ] [ 8 ] [ 9 ] [ / ]
/// [ 4 ] [ 5 ] [ 6 ] [ * ]
/// [ 1 ] [ 2 ] [ 3 ] [ - ]
/// [ 0 ] [ . ] [ ± ] [ + ]
/// [ C ]             [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: usize| Some(KeypadAction::Digit(Digit::ALL[d]));
        let op = |op: Operator| Some(KeypadAction::Operator(op));
        let layout = [
            [digit(7), digit(8), digit(9), op(Operator::Divide)],
            [digit(4), digit(5), digit(6), op(Operator::Multiply)],
            [digit(1), digit(2), digit(3), op(Operator::Subtract)],
            [
                digit(0),
                Some(KeypadAction::Decimal),
                Some(KeypadAction::ToggleSign),
                op(Operator::Add),
            ],
            [Some(KeypadAction::Clear), None, None, op(Operator::Equals)],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .filter_map(move |(col, cell)| cell.map(|a| KeypadButton::new(a, row, col)))
            })
            .collect();

        Self {
            buttons,
            rows: layout.len(),
            cols: 4,
        }
    }

    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets the button at a grid cell, if the cell holds one
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button performing `action`
    #[must_use]
    pub fn find_by_action(&self, action: KeypadAction) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// Buttons of one fieldset, in grid order
    pub fn fieldset<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a KeypadButton> + 'a {
        self.buttons
            .iter()
            .filter(move |b| b.action.fieldset() == name)
    }
}
