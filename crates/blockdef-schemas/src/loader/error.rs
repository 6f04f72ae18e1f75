//! Error types for document loading
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures that stop a file from becoming a value tree at all
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File content is not UTF-8
    #[error("File '{path}' is not valid UTF-8: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// Content that parses in no supported format
    #[error("Could not parse '{path}' as JSON or YAML")]
    Unparseable { path: PathBuf },

    /// Writing a value back out failed
    #[error("Failed to serialize document: {reason}")]
    SerializeError { reason: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: &Path, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: &Path, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: &Path, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: &Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::IoError { path, .. }
            | Self::EncodingError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::Unparseable { path } => Some(path),
            Self::SerializeError { .. } => None,
        }
    }

    /// Whether the file exists but its content is malformed
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EncodingError { .. }
                | Self::YamlParseError { .. }
                | Self::JsonParseError { .. }
                | Self::Unparseable { .. }
        )
    }
}
