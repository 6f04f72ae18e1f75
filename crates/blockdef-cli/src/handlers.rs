//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod inspect;
mod schema;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use inspect::handle_inspect;
pub use schema::handle_schema;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use blockdef_schemas::loader::{load_document, DocumentParser};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Path argument that reads standard input
pub const STDIN_PATH: &str = "-";

/// Name shown for a path argument in reports
pub fn display_name(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Read one definition document from a file or standard input
pub fn read_document(path: &Path) -> Result<Value> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        let (value, format) =
            DocumentParser::new().parse_with_fallback(&content, Path::new("<stdin>"))?;
        debug!(format = ?format, bytes = content.len(), "read definitions from stdin");
        return Ok(value);
    }

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(load_document(path)?)
}
