//! Argument definitions for the `blockdef` binary
//!
//! Everything is declared with clap's derive API; global flags apply to
//! every subcommand.

use blockdef_schemas::ValidationMode;
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Blockdef CLI - Validate and inspect JSON block definitions
///
/// Checks block definitions for block-based programming editors against
/// the definition schema and reports every broken constraint.
#[derive(Parser, Debug)]
#[command(
    name = "blockdef",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// More log output; repeat for debug (-vv) and trace (-vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print failures and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file to use instead of the discovered one
    #[arg(short, long, global = true, env = "BLOCKDEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: from config, else human]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Never colour the output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands of `blockdef`
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate block definition files (a single definition or an array)
    Validate(ValidateArgs),

    /// Validate one definition and print its typed structure
    Inspect(InspectArgs),

    /// Print the JSON Schema of the definition format
    Schema(SchemaArgs),

    /// Create, show or locate the configuration file
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

/// `blockdef validate`
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Definition files (JSON or YAML); `-` reads standard input
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Validation mode [default: from config, else strict]
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Definition file (JSON or YAML); `-` reads standard input
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Which definition to inspect when the file holds an array
    #[arg(long)]
    pub index: Option<usize>,

    /// Validation mode [default: from config, else strict]
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Write the schema to a file instead of stdout
    #[arg(long = "save-to", value_name = "OUTPUT_FILE")]
    pub save_to: Option<PathBuf>,
}

/// `blockdef config`
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// `blockdef config` actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Print the effective configuration
    Show(ConfigShowArgs),

    /// Print which configuration file is in effect
    Path,
}

/// `blockdef config init`
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Initialize user config instead of project config (.blockdef.toml)
    #[arg(long)]
    pub user: bool,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

/// `blockdef config show`
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Rendering of the configuration
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Formats `config show` can render
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

/// `blockdef completions`
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// How results are printed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Coloured text for terminals
    #[default]
    Human,
    /// Single-line JSON
    Json,
    Yaml,
    /// Indented JSON
    JsonPretty,
}

/// Validation mode as accepted on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Every check; warnings fail the definition
    Strict,
    /// Every check; warnings are reported only
    Partial,
    /// Structural checks only
    Basic,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Verbosity after `--quiet` is applied
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Colour only when stdout is a terminal and `--no-color` is absent
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => ValidationMode::Strict,
            ModeArg::Partial => ValidationMode::Partial,
            ModeArg::Basic => ValidationMode::Basic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["blockdef", "-vv", "validate", "blocks.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["blockdef", "--quiet", "validate", "blocks.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from([
            "blockdef",
            "validate",
            "a.json",
            "b.yaml",
            "--mode",
            "partial",
            "--fail-fast",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
        assert_eq!(args.mode.map(ValidationMode::from), Some(ValidationMode::Partial));
        assert!(args.fail_fast);
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["blockdef", "validate"]).is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        let cli = Cli::parse_from(["blockdef", "-o", "json-pretty", "schema"]);
        assert_eq!(cli.output, Some(OutputFormat::JsonPretty));
    }
}
