//! Loading block definition documents from disk
//!
//! Files are turned into value trees only; whether a tree is a valid
//! definition is decided by [`crate::validation`].
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use blockdef_schemas::loader::load_definitions;
//! use blockdef_schemas::validation::{validate_blocks_batch, ValidationConfig};
//! use std::path::Path;
//!
//! let documents = load_definitions(Path::new("blocks.yaml"))?;
//! let definitions = validate_blocks_batch(&documents, &ValidationConfig::strict())?;
//! println!("Loaded {} blocks", definitions.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load one file as a single value tree
pub fn load_document(path: &Path) -> LoaderResult<Value> {
    DocumentParser::new().parse_file(path)
}

/// Load a file holding one definition or an array of them
///
/// A top-level array yields one document per element; anything else
/// yields a single document.
pub fn load_definitions(path: &Path) -> LoaderResult<Vec<Value>> {
    let documents = split_documents(load_document(path)?);
    debug!(path = %path.display(), documents = documents.len(), "loaded definitions");
    Ok(documents)
}

/// Split a parsed tree into definition documents
pub fn split_documents(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}
