//! Keypad CLI Library
//!
//! Command-line front end for the keypad calculator: one-shot key strings,
//! an interactive line loop, and YAML configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod runner;

pub use commands::{Cli, Commands, FormatArg, PressArgs, ReplArgs, SignToggleArg};
pub use config::{CliConfig, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use runner::{run_press, run_repl, Report, Session};
