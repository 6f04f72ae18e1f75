//! Blockdef CLI - Command-line interface for block definition validation
//!
//! This is the main entry point for the Blockdef CLI application, providing
//! commands for validating and inspecting block definitions, exporting the
//! definition JSON Schema and managing configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    let exit_code = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => {
            let use_color = cli.use_color() && config.output.color;
            control::set_override(use_color);

            // The guard flushes file logging and must outlive the command
            let guard = match init_logging(&cli, &config) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("Failed to initialize logging: {}", e);
                    None
                }
            };

            let code = match run(cli, &config) {
                Ok(()) => 0,
                Err(e) => report_error(&e, use_color),
            };
            drop(guard);
            code
        }
        Err(e) => report_error(&e, cli.use_color()),
    };

    process::exit(exit_code);
}

fn report_error(error: &Error, use_color: bool) -> i32 {
    eprintln!("{}", error::format_error(error, use_color));
    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }
    error.exit_code()
}

/// Main application logic
#[instrument(skip_all)]
fn run(cli: Cli, config: &Config) -> Result<()> {
    let timer = Timer::new("cli_execution");
    let _entered = timer.span().clone().entered();

    let format = cli.output.unwrap_or(config.output.format);
    let mut output = OutputWriter::new(
        format,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Executing command"
    );

    let result = match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, config, &mut output),
        Commands::Inspect(args) => handlers::handle_inspect(args, config, &mut output),
        Commands::Schema(args) => handlers::handle_schema(args, &mut output),
        Commands::Config(args) => {
            handlers::handle_config(args, config, cli.config.as_deref(), &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args),
    };

    timer.finish();
    result
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    let mut logging_config =
        LoggingConfig::resolve(&config.logging, cli.verbosity_level(), cli.quiet)?;

    // Apply environment overrides
    logging_config.merge_with_env();

    logging::init_logging(&logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["blockdef", "-vv", "validate", "blocks.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["blockdef", "--quiet", "validate", "blocks.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["blockdef", "inspect", "blocks.json", "--index", "2"]);
        assert!(matches!(cli.command, Commands::Inspect(ref args) if args.index == Some(2)));
    }

    #[test]
    fn test_run_schema_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        let cli = Cli::parse_from([
            "blockdef",
            "--quiet",
            "schema",
            "--save-to",
            path.to_str().unwrap(),
        ]);

        run(cli, &Config::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_report_error_exit_code() {
        let error = Error::ValidationFailed { failed: 2, total: 5 };
        assert_eq!(report_error(&error, false), 2);
    }
}
