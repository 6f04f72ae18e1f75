//! Validation of block definition documents
//!
//! Every constraint of the schema model is checked at runtime and every
//! broken constraint is reported, in a stable order, rather than stopping at
//! the first one. Three modes are supported:
//!
//! - **Strict**: every check, warnings block acceptance (what [`validate`] uses)
//! - **Partial**: every check, warnings are reported but the definition is accepted
//! - **Basic**: structural checks only (kinds, presence, enums, discriminant)
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

mod arguments;
pub mod base;
pub mod block;
pub mod error;
mod fields;

// Re-export commonly used types
pub use base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
pub use block::{validate_report, BlockDefinitionValidator, ValidationReport};
pub use error::{
    FieldPath, PathSegment, Severity, ValidationErrors, ValidationResult, Violation,
    ViolationKind,
};

use crate::model::BlockDefinition;
use serde_json::Value;
use tracing::{debug, info_span};

/// Validate one block definition in strict mode
///
/// # Examples
///
/// ```rust
/// use blockdef_schemas::validation::validate;
/// use serde_json::json;
///
/// let definition = validate(&json!({
///     "type": "math_add",
///     "message0": "%1 + %2",
///     "args0": [
///         {"type": "field_number", "name": "A"},
///         {"type": "field_number", "name": "B"}
///     ],
///     "output": "Number"
/// }))
/// .unwrap();
///
/// assert!(definition.is_value_block());
/// assert_eq!(definition.arguments().count(), 2);
/// ```
pub fn validate(input: &Value) -> ValidationResult<BlockDefinition> {
    BlockDefinitionValidator::new().validate(input)
}

/// Validation configuration for batch operations
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Validation mode to use
    pub mode: ValidationMode,
    /// Whether to stop after the first failing document
    pub fail_fast: bool,
    /// Maximum number of violations to collect (0 = unlimited)
    pub max_errors: usize,
    /// Names accepted in `extensions`, when restricted
    pub known_extensions: Option<Vec<String>>,
    /// Names accepted in `mutator`, when restricted
    pub known_mutators: Option<Vec<String>>,
}

impl ValidationConfig {
    /// Create a configuration for strict validation
    pub fn strict() -> Self {
        Self::with_mode(ValidationMode::Strict)
    }

    /// Create a configuration for partial validation (development mode)
    pub fn partial() -> Self {
        Self::with_mode(ValidationMode::Partial)
    }

    /// Create a configuration for basic validation
    pub fn basic() -> Self {
        Self::with_mode(ValidationMode::Basic)
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of violations to collect
    pub fn with_max_errors(mut self, max: usize) -> Self {
        self.max_errors = max;
        self
    }

    pub fn with_known_extensions(mut self, names: Vec<String>) -> Self {
        self.known_extensions = Some(names);
        self
    }

    pub fn with_known_mutators(mut self, names: Vec<String>) -> Self {
        self.known_mutators = Some(names);
        self
    }

    /// Root context carrying this configuration
    pub fn context(&self) -> ValidationContext {
        let mut context = ValidationContext::new(self.mode);
        if let Some(names) = &self.known_extensions {
            context = context.with_known_extensions(names.iter().cloned());
        }
        if let Some(names) = &self.known_mutators {
            context = context.with_known_mutators(names.iter().cloned());
        }
        context
    }
}

/// Batch validation for an array of block definitions.
///
/// Violation paths are prefixed with the document's position (`$[2].message0`).
/// Returns the accepted definitions in input order when none failed, and
/// every violation collected so far otherwise. Warnings of documents accepted
/// in partial mode are dropped on success. Reaching `max_errors` before the
/// last document counts as a failure.
pub fn validate_blocks_batch(
    blocks: &[Value],
    config: &ValidationConfig,
) -> Result<Vec<BlockDefinition>, ValidationErrors> {
    let _span = info_span!("validate_batch", documents = blocks.len(), mode = %config.mode).entered();

    let context = config.context();
    let mut definitions = Vec::with_capacity(blocks.len());
    let mut errors = ValidationErrors::new();
    let mut any_failed = false;

    for (i, block) in blocks.iter().enumerate() {
        let report = validate_report(block, &context.child_index(i));
        let failed = !report.is_valid();
        any_failed |= failed;
        if let Some(definition) = report.definition {
            definitions.push(definition);
        }
        errors.extend(report.violations);

        if config.max_errors > 0 && errors.len() >= config.max_errors {
            errors.violations.truncate(config.max_errors);
            // Documents left unchecked make the batch incomplete
            any_failed |= i + 1 < blocks.len();
            break;
        }
        if failed && config.fail_fast {
            break;
        }
    }

    debug!(
        accepted = definitions.len(),
        violations = errors.len(),
        "batch validation finished"
    );

    if any_failed {
        Err(errors)
    } else {
        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_block(name: &str) -> Value {
        json!({
            "type": name,
            "message0": "%1",
            "args0": [{"type": "field_checkbox", "name": "ON", "checked": true}],
            "previousStatement": null,
            "nextStatement": null
        })
    }

    #[test]
    fn test_validation_config_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.mode, ValidationMode::Strict);
        assert!(!config.fail_fast);
        assert_eq!(config.max_errors, 0);
        assert!(config.known_mutators.is_none());
    }

    #[test]
    fn test_validation_config_builders() {
        let strict = ValidationConfig::strict().with_fail_fast().with_max_errors(5);
        assert_eq!(strict.mode, ValidationMode::Strict);
        assert!(strict.fail_fast);
        assert_eq!(strict.max_errors, 5);

        let partial = ValidationConfig::partial()
            .with_known_mutators(vec!["controls_if_mutator".into()]);
        assert_eq!(partial.mode, ValidationMode::Partial);
        assert!(partial
            .context()
            .known_mutators()
            .is_some_and(|names| names.contains("controls_if_mutator")));

        assert_eq!(ValidationConfig::basic().mode, ValidationMode::Basic);
    }

    #[test]
    fn test_batch_all_valid() {
        let blocks = vec![valid_block("a"), valid_block("b")];
        let definitions = validate_blocks_batch(&blocks, &ValidationConfig::strict()).unwrap();
        let types: Vec<_> = definitions.iter().map(|d| d.block_type()).collect();
        assert_eq!(types, vec!["a", "b"]);
    }

    #[test]
    fn test_batch_paths_are_prefixed() {
        let blocks = vec![valid_block("a"), json!({"type": "b", "message0": "%1"})];
        let errors = validate_blocks_batch(&blocks, &ValidationConfig::strict()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations[0].path, "$[1].message0");
        assert_eq!(errors.violations[0].kind, ViolationKind::PlaceholderOutOfRange(1));
    }

    #[test]
    fn test_batch_fail_fast() {
        let blocks = vec![json!(1), json!(2), valid_block("c")];
        let all = validate_blocks_batch(&blocks, &ValidationConfig::strict()).unwrap_err();
        assert_eq!(all.len(), 2);

        let first = validate_blocks_batch(&blocks, &ValidationConfig::strict().with_fail_fast())
            .unwrap_err();
        assert_eq!(first.len(), 1);
        assert_eq!(first.violations[0].path, "$[0]");
    }

    #[test]
    fn test_batch_max_errors() {
        let blocks = vec![json!(1), json!(2), json!(3)];
        let errors = validate_blocks_batch(&blocks, &ValidationConfig::strict().with_max_errors(2))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_batch_max_errors_on_warnings_is_not_success() {
        let noisy = json!({"type": "a", "extra": 1});
        let blocks = vec![noisy.clone(), noisy, json!({"type": "c"})];

        let errors = validate_blocks_batch(&blocks, &ValidationConfig::partial().with_max_errors(1))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.violations[0].severity, Severity::Warning);
        assert_eq!(errors.violations[0].path, "$[0].extra");

        let all = validate_blocks_batch(&blocks, &ValidationConfig::partial().with_max_errors(2))
            .unwrap_err();
        assert_eq!(all.len(), 2);

        let definitions =
            validate_blocks_batch(&blocks, &ValidationConfig::partial().with_max_errors(3)).unwrap();
        assert_eq!(definitions.len(), 3);
    }

    #[test]
    fn test_batch_partial_accepts_warnings() {
        let mut block = valid_block("a");
        block["extra"] = json!(true);
        let definitions = validate_blocks_batch(&[block], &ValidationConfig::partial()).unwrap();
        assert_eq!(definitions.len(), 1);
    }
}
