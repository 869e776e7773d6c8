//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use keypad_calculator::config::SignToggle;
use std::path::PathBuf;

use crate::config::OutputFormat;

/// Keypad: a left-to-right calculator driven by button keys
#[derive(Parser, Debug)]
#[command(name = "keypad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sign-toggle behavior
    #[arg(long, global = true)]
    pub sign_toggle: Option<SignToggleArg>,

    /// Output format
    #[arg(long, global = true)]
    pub format: Option<FormatArg>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys and print the display
    ///
    /// Keys: digits, `.` decimal point, `~` sign toggle, `+ - * /`
    /// operators, `=` result, `c` clear. Whitespace is ignored.
    Press(PressArgs),

    /// Read key lines from stdin, printing the display after each
    Repl(ReplArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Also print the expression and the calculation history
    #[arg(long)]
    pub history: bool,

    /// Key strings, pressed in order
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Print the expression and history after each line
    #[arg(long)]
    pub history: bool,
}

/// Sign-toggle argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignToggleArg {
    /// Each press flips the sign
    Flip,
    /// Each press forces the sign negative
    ForceNegative,
}

impl From<SignToggleArg> for SignToggle {
    fn from(arg: SignToggleArg) -> Self {
        match arg {
            SignToggleArg::Flip => Self::Flip,
            SignToggleArg::ForceNegative => Self::ForceNegative,
        }
    }
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}
