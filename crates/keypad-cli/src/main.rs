//! Keypad CLI: a left-to-right calculator driven by button keys
//!
//! ## Usage
//!
//! ```bash
//! keypad press "2+3*4="             # prints 20
//! keypad press --history 1+1= 2*3=  # result, expression and history
//! keypad --format json press 0.1+0.2=
//! keypad repl                       # one key string per line
//! keypad --config keypad.yaml config
//! ```

use clap::Parser;
use keypad_cli::{
    logging, run_press, run_repl, Cli, CliConfig, CliResult, Commands, OutputFormat, Verbosity,
};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    logging::init(config.verbosity, config.format);

    match cli.command {
        Commands::Press(args) => {
            let output = run_press(&config, &args.keys, args.history)?;
            println!("{output}");
            Ok(())
        }
        Commands::Repl(args) => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            let mut stderr = std::io::stderr();
            run_repl(&config, stdin.lock(), &mut stdout, &mut stderr, args.history)?;
            stdout.flush()?;
            Ok(())
        }
        Commands::Config => {
            match config.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
                OutputFormat::Text => print!("{}", config.to_yaml()?),
            }
            Ok(())
        }
    }
}

/// File values first, then command-line flags on top
fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::new(),
    };

    if cli.quiet {
        config.verbosity = Verbosity::Quiet;
    } else if cli.verbose > 0 {
        config.verbosity = Verbosity::from_count(cli.verbose);
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(sign_toggle) = cli.sign_toggle {
        config.calculator.sign_toggle = sign_toggle.into();
    }

    Ok(config)
}
