//! CLI errors and their process exit codes

use blockdef_schemas::LoaderError;
use std::io;
use std::path::PathBuf;

/// Result of a CLI operation
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a subcommand can fail with
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a file or stream failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be turned into a value tree
    #[error("{0}")]
    Loader(#[from] LoaderError),

    /// One or more definitions broke the schema
    #[error("{failed} of {total} definition(s) failed validation")]
    ValidationFailed { failed: usize, total: usize },

    /// A named input does not exist
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration file or a setting in it is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Flags that parse but do not make sense together
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// Rendering or reading JSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering or reading YAML failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Anything else, with a message
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Process exit code; validation failures get their own code
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::ValidationFailed { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::Loader(_) => 4,
            Self::Config(_) => 5,
            Self::InvalidArgs(_) => 6,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Other { .. } => 99,
        }
    }

    /// Whether a `--help` hint should follow the message
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidArgs(_))
    }
}

/// Render an error for stderr
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
