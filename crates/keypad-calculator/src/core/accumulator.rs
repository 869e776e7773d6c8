//! Expression accumulator
//!
//! Holds the token sequence `number (operator number)*` and mutates it one
//! button press at a time. Operators reduce the sequence strictly
//! left-to-right; there is no precedence.
//!
//! Every mutating call validates first and commits second, so a rejected
//! press leaves the accumulator exactly as it was.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{AccumulatorConfig, SignToggle};
use crate::core::history::History;
use crate::core::{
    format_number, CalcError, CalcResult, Digit, NumericEntry, Operator, ResultValidator, Sign,
};

/// One slot of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Token {
    /// An operand
    Number(f64),
    /// An operator between two operands
    Operator(Operator),
    /// An operand slot nothing has been typed into yet; reduces as `0`
    Pending,
}

impl Token {
    /// Value of an operand slot at `index`
    fn operand(self, index: usize) -> CalcResult<f64> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Pending => Ok(0.0),
            Self::Operator(_) => Err(CalcError::MalformedSequenceEntry {
                index,
                expected: "number",
            }),
        }
    }

    fn render(self) -> String {
        match self {
            Self::Number(value) => format_number(value),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Pending => "0".to_string(),
        }
    }
}

/// Where the accumulator is in its input cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Fresh state, waiting for the first digit
    #[default]
    Idle,
    /// Digits or a decimal point are being entered
    Accumulating,
    /// A non-final operator was applied; the sequence is open
    OperatorEntered,
    /// `=` was applied; the next digit starts a new operand
    ResultDisplayed,
}

/// Serializable view of what the display layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Numeric display value
    pub display: f64,
    /// Display value as rendered text
    pub display_text: String,
    /// Sequence rendered as text
    pub expression: String,
    /// Current phase
    pub phase: Phase,
}

/// Reduces `tokens` left-to-right: `((n0 op1 n1) op2 n2) ...`.
///
/// Each step passes through `validator` and then has binary float noise
/// removed, so `0.1 + 0.2` comes out as `0.3` while exact operands such as
/// `1234567890123456` keep every digit.
pub fn reduce(tokens: &[Token], validator: &ResultValidator) -> CalcResult<f64> {
    let (first, rest) = tokens
        .split_first()
        .ok_or(CalcError::MalformedSequenceEntry {
            index: 0,
            expected: "number",
        })?;
    let mut result = first.operand(0)?;

    for (pair, chunk) in rest.chunks(2).enumerate() {
        let index = 1 + pair * 2;
        let op = match chunk[0] {
            Token::Operator(op) => op,
            _ => {
                return Err(CalcError::MalformedSequenceEntry {
                    index,
                    expected: "operator",
                })
            }
        };
        let rhs = chunk
            .get(1)
            .ok_or(CalcError::MalformedSequenceEntry {
                index: index + 1,
                expected: "number",
            })?
            .operand(index + 1)?;
        let raw = op
            .apply(result, rhs)
            .ok_or(CalcError::MalformedSequenceEntry {
                index,
                expected: "non-final operator",
            })?;
        let lhs = result;
        let checked = validator.validate(raw, || {
            format!("{} {} {}", format_number(lhs), op, format_number(rhs))
        })?;
        result = strip_noise(op, lhs, rhs, checked)?;
    }

    Ok(result)
}

/// Removes float noise from one step's result.
///
/// Sums, differences and products of decimal operands have a known number
/// of fractional digits, so the result is rounded to exactly that many.
/// Quotients are only snapped to 15 significant digits when that moves the
/// value by a few ULPs at most.
fn strip_noise(op: Operator, lhs: f64, rhs: f64, value: f64) -> CalcResult<f64> {
    match op {
        Operator::Add | Operator::Subtract => {
            round_fixed(value, fraction_digits(lhs).max(fraction_digits(rhs)))
        }
        Operator::Multiply => round_fixed(value, fraction_digits(lhs) + fraction_digits(rhs)),
        Operator::Divide | Operator::Equals => Ok(snap_significant(value)),
    }
}

/// Fractional digits in the shortest decimal form of `value`
fn fraction_digits(value: f64) -> usize {
    let text = value.abs().to_string();
    text.split_once('.').map_or(0, |(_, frac)| frac.len())
}

fn round_fixed(value: f64, places: usize) -> CalcResult<f64> {
    format!("{value:.places$}")
        .parse::<f64>()
        .map_err(|e| CalcError::NonFiniteResult(e.to_string()))
}

fn snap_significant(value: f64) -> f64 {
    if value.fract() == 0.0 {
        return value;
    }
    let snapped = format!("{value:.14e}").parse::<f64>().unwrap_or(value);
    if (snapped - value).abs() <= NOISE_ULPS * f64::EPSILON * value.abs() {
        snapped
    } else {
        value
    }
}

/// How far, in units of relative epsilon, a quotient may move when snapped
const NOISE_ULPS: f64 = 4.0;

fn rejected(err: CalcError) -> CalcError {
    warn!(kind = err.kind(), error = %err, "input rejected");
    err
}

/// The calculator state, owned by whoever handles button presses
#[derive(Debug, Clone)]
pub struct Accumulator {
    sequence: Vec<Token>,
    entry: NumericEntry,
    overwrite: bool,
    phase: Phase,
    display: f64,
    sign_toggle: SignToggle,
    validator: ResultValidator,
    history: History,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an accumulator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&AccumulatorConfig::default())
    }

    /// Creates an accumulator from a configuration
    #[must_use]
    pub fn with_config(config: &AccumulatorConfig) -> Self {
        Self {
            sequence: vec![Token::Pending],
            entry: NumericEntry::new(),
            overwrite: false,
            phase: Phase::Idle,
            display: 0.0,
            sign_toggle: config.sign_toggle,
            validator: config.validator(),
            history: History::with_capacity(config.history_capacity),
        }
    }

    /// Enters one digit into the current operand and returns its new value.
    ///
    /// Accepts anything convertible into a [`Digit`], so raw button values
    /// (`7`, `7.0`, `"7"`) are validated here.
    pub fn enter_digit<D>(&mut self, digit: D) -> CalcResult<f64>
    where
        D: TryInto<Digit, Error = CalcError>,
    {
        let digit = digit.try_into().map_err(rejected)?;
        let current = self.current_operand().map_err(rejected)?;

        let mut entry = self.entry;
        let value = entry
            .push_digit(current, digit, self.overwrite)
            .and_then(|v| self.validator.validate(v, || format!("digit entry {v}")))
            .map_err(rejected)?;

        let bound = self.bound();
        self.sequence[bound] = Token::Number(value);
        self.entry = entry;
        self.overwrite = false;
        self.phase = Phase::Accumulating;
        self.display = value;

        debug!(digit = digit.value(), value, "digit entered");
        Ok(value)
    }

    /// Switches the current operand to decimal mode
    pub fn enter_decimal_point(&mut self) {
        if !self.entry.decimal_mode {
            self.entry.enter_decimal_point();
            debug!("decimal mode on");
        }
        self.phase = Phase::Accumulating;
    }

    /// Negates the current operand and returns its new value
    pub fn toggle_sign(&mut self) -> f64 {
        let value = -self.current_value();
        self.entry.sign = match self.sign_toggle {
            SignToggle::Flip => Sign::of(value),
            SignToggle::ForceNegative => Sign::Negative,
        };

        let bound = self.bound();
        self.sequence[bound] = Token::Number(value);
        self.display = value;

        debug!(value, sign = ?self.entry.sign, "sign toggled");
        value
    }

    /// Applies an operator and returns the reduced value.
    ///
    /// A final operator collapses the sequence into its result; any other
    /// operator leaves the sequence open with a fresh operand slot.
    pub fn apply_operator(&mut self, op: Operator) -> CalcResult<f64> {
        let result = reduce(&self.sequence, &self.validator).map_err(rejected)?;

        self.entry = NumericEntry::new();
        self.display = result;

        if op.is_final() {
            if self.sequence.len() > 1 {
                let expression = self.render(true);
                self.history.record(expression, result);
            }
            self.sequence = vec![Token::Number(result)];
            self.overwrite = true;
            self.phase = Phase::ResultDisplayed;
        } else {
            self.sequence.push(Token::Operator(op));
            self.sequence.push(Token::Pending);
            self.overwrite = false;
            self.phase = Phase::OperatorEntered;
        }

        debug!(operator = op.symbol(), result, bound = self.bound(), "operator applied");
        Ok(result)
    }

    /// Parses a raw operator button value (`+`, `add`, ...) and applies it
    pub fn apply_symbol(&mut self, symbol: &str) -> CalcResult<f64> {
        let op = symbol.parse::<Operator>().map_err(rejected)?;
        self.apply_operator(op)
    }

    /// Returns to the initial state. History survives.
    pub fn reset(&mut self) {
        self.sequence = vec![Token::Pending];
        self.entry = NumericEntry::new();
        self.overwrite = false;
        self.phase = Phase::Idle;
        self.display = 0.0;
        debug!("reset");
    }

    /// Value the display should show
    #[must_use]
    pub fn display(&self) -> f64 {
        self.display
    }

    /// Display value rendered as text
    #[must_use]
    pub fn display_text(&self) -> String {
        format_number(self.display)
    }

    /// Value of the operand being entered
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.current_operand().unwrap_or(0.0)
    }

    fn current_operand(&self) -> CalcResult<f64> {
        let bound = self.bound();
        self.sequence
            .get(bound)
            .copied()
            .unwrap_or(Token::Pending)
            .operand(bound)
    }

    #[must_use]
    pub fn sequence(&self) -> &[Token] {
        &self.sequence
    }

    /// Index of the current operand
    #[must_use]
    pub fn bound(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the next digit replaces the current operand
    #[must_use]
    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    #[must_use]
    pub fn is_decimal_mode(&self) -> bool {
        self.entry.decimal_mode
    }

    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        self.entry.decimal_places
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.entry.sign
    }

    /// The sequence as text, e.g. `2 + 3 *` while the last slot is empty
    #[must_use]
    pub fn expression(&self) -> String {
        self.render(false)
    }

    fn render(&self, show_trailing_pending: bool) -> String {
        let last = self.bound();
        self.sequence
            .iter()
            .enumerate()
            .filter(|(i, t)| show_trailing_pending || *i != last || **t != Token::Pending)
            .map(|(_, t)| t.render())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Serializable view of the display state
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display,
            display_text: self.display_text(),
            expression: self.expression(),
            phase: self.phase,
        }
    }
}
