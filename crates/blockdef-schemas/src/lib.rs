//! Blockdef Schemas - schema model and validator for JSON block definitions
//!
//! Block-based editors describe each block's appearance and connections with a
//! small JSON document. This crate provides:
//! - **Schema Model**: the definition format as static constraint tables
//! - **Validator**: every broken constraint reported with a path, kind and severity
//! - **Typed Model**: an immutable [`BlockDefinition`] for accepted documents
//! - **Contracts**: code generator and mutator shapes a host must supply
//!
//! ## Quick Start
//!
//! ```rust
//! use blockdef_schemas::{validate, ViolationKind};
//! use serde_json::json;
//!
//! let definition = validate(&json!({
//!     "type": "controls_repeat",
//!     "message0": "repeat %1 times",
//!     "args0": [{"type": "field_number", "name": "TIMES", "value": 10, "min": 0}],
//!     "message1": "do %1",
//!     "args1": [{"type": "input_statement", "name": "DO"}],
//!     "previousStatement": null,
//!     "nextStatement": null
//! }))
//! .unwrap();
//! assert_eq!(definition.block_type(), "controls_repeat");
//!
//! let errors = validate(&json!({"type": "broken", "message0": "%2"})).unwrap_err();
//! assert_eq!(errors.violations[0].kind, ViolationKind::PlaceholderOutOfRange(2));
//! ```
//!
//! ## Validation Modes
//!
//! - **Basic**: structural checks only (kinds, presence, enums, discriminant)
//! - **Partial**: every check, warnings are reported without blocking acceptance
//! - **Strict**: every check, warnings block acceptance
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

pub mod contract;
pub mod loader;
pub mod model;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use contract::{BoundGenerator, CodeGenerator, ContractError, GeneratedCode, GeneratorSignature, MutatorMixin};
pub use loader::{load_definitions, LoaderError, LoaderResult};
pub use model::{ArgumentKind, ArgumentSpec, BlockDefinition, BlockKind, ConnectionCheck};
pub use schema::SchemaModel;
pub use validation::{
    validate, validate_blocks_batch, validate_report, SchemaValidator, Severity,
    ValidationConfig, ValidationContext, ValidationErrors, ValidationMode, ValidationReport,
    ValidationResult, Violation, ViolationKind,
};
