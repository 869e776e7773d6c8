//! Accumulator configuration

use serde::{Deserialize, Serialize};

use crate::core::history::History;
use crate::core::ResultValidator;

/// How the sign-toggle button treats the sign state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignToggle {
    /// Each press flips the sign; a second press restores it
    #[default]
    Flip,
    /// Each press forces the sign negative while still negating the value
    ForceNegative,
}

/// Accumulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulatorConfig {
    /// Sign-toggle policy
    pub sign_toggle: SignToggle,
    /// Maximum number of history entries kept
    pub history_capacity: usize,
    /// Largest magnitude an arithmetic step may produce
    pub max_magnitude: f64,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            sign_toggle: SignToggle::Flip,
            history_capacity: History::DEFAULT_CAPACITY,
            max_magnitude: ResultValidator::DEFAULT_MAX_MAGNITUDE,
        }
    }
}

impl AccumulatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sign-toggle policy
    #[must_use]
    pub const fn with_sign_toggle(mut self, sign_toggle: SignToggle) -> Self {
        self.sign_toggle = sign_toggle;
        self
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set magnitude bound
    #[must_use]
    pub const fn with_max_magnitude(mut self, max_magnitude: f64) -> Self {
        self.max_magnitude = max_magnitude;
        self
    }

    /// Validator built from the magnitude bound
    #[must_use]
    pub const fn validator(&self) -> ResultValidator {
        ResultValidator::with_max_magnitude(self.max_magnitude)
    }
}
