//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{FieldPath, Violation, ViolationKind, ValidationErrors, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Validation mode for different use cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Every check; warnings block acceptance
    #[default]
    Strict,
    /// Every check; warnings are reported but do not block acceptance
    Partial,
    /// Structural checks only
    Basic,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Partial => "partial",
            ValidationMode::Basic => "basic",
        }
    }

    /// Whether cross-field and argument predicates run
    pub fn checks_predicates(&self) -> bool {
        !matches!(self, ValidationMode::Basic)
    }

    /// Whether warnings block acceptance
    pub fn warnings_block(&self) -> bool {
        matches!(self, ValidationMode::Strict)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "partial" => Ok(ValidationMode::Partial),
            "basic" => Ok(ValidationMode::Basic),
            other => Err(format!(
                "unknown validation mode '{}', expected strict, partial or basic",
                other
            )),
        }
    }
}

/// Validation context for passing additional information
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: FieldPath,
    /// Validation mode
    pub mode: ValidationMode,
    known_extensions: Option<Arc<BTreeSet<String>>>,
    known_mutators: Option<Arc<BTreeSet<String>>>,
}

impl ValidationContext {
    /// Create a new validation context rooted at `$`
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Create a child context with updated path
    pub fn child<K: Into<String>>(&self, key: K) -> Self {
        Self {
            path: self.path.key(key),
            ..self.clone()
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: self.path.index(index),
            ..self.clone()
        }
    }

    /// Restrict `extensions` entries to these names
    pub fn with_known_extensions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_extensions = Some(Arc::new(names.into_iter().map(Into::into).collect()));
        self
    }

    /// Restrict the `mutator` reference to these names
    pub fn with_known_mutators<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_mutators = Some(Arc::new(names.into_iter().map(Into::into).collect()));
        self
    }

    pub fn known_extensions(&self) -> Option<&BTreeSet<String>> {
        self.known_extensions.as_deref()
    }

    pub fn known_mutators(&self) -> Option<&BTreeSet<String>> {
        self.known_mutators.as_deref()
    }

    /// Violation at the current path
    pub fn violation<D: Into<String>>(&self, kind: ViolationKind, detail: D) -> Violation {
        Violation::new(self.path.clone(), kind, detail)
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;
    /// What a successful validation produces
    type Output;

    /// Validate with every rule, warnings included
    fn validate(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        let context = ValidationContext::new(ValidationMode::Strict);
        self.validate_with_context(input, &context)
    }

    /// Validate with specific context and mode
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> ValidationResult<Self::Output>;

    /// Validate in partial mode (for development)
    fn validate_partial(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        let context = ValidationContext::new(ValidationMode::Partial);
        self.validate_with_context(input, &context)
    }

    /// Validate basic schema compliance only
    fn validate_basic(&self, input: &Self::Input) -> ValidationResult<Self::Output> {
        let context = ValidationContext::new(ValidationMode::Basic);
        self.validate_with_context(input, &context)
    }

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        match self.validate(input) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }
}

/// Helper functions for common validation patterns
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Validate that a string is one of allowed values
    pub fn validate_enum_value(
        value: &str,
        allowed_values: &[&str],
        field_name: &str,
        context: &ValidationContext,
    ) -> Result<(), Violation> {
        if allowed_values.contains(&value) {
            Ok(())
        } else {
            Err(context.violation(
                ViolationKind::InvalidEnumValue,
                format!(
                    "'{}' is not a valid {}, expected one of: {}",
                    value,
                    field_name,
                    allowed_values.join(", ")
                ),
            ))
        }
    }

    /// Validate that a name belongs to a registry, when one is supplied
    pub fn validate_registered(
        value: &str,
        registry: Option<&BTreeSet<String>>,
        what: &str,
        context: &ValidationContext,
    ) -> Result<(), Violation> {
        match registry {
            Some(names) if !names.contains(value) => Err(context.violation(
                ViolationKind::InvalidEnumValue,
                format!("{} '{}' is not registered", what, value),
            )),
            _ => Ok(()),
        }
    }

    /// Validate array is non-empty
    pub fn validate_non_empty_array(
        array: &[Value],
        field_name: &str,
        context: &ValidationContext,
    ) -> Result<(), Violation> {
        if array.is_empty() {
            Err(context.violation(
                ViolationKind::RangeViolation,
                format!("{} must have at least one entry", field_name),
            ))
        } else {
            Ok(())
        }
    }

    /// Validate that a field is absent when another is present
    pub fn validate_conditional_absence(
        condition: bool,
        present: bool,
        field_name: &str,
        other_name: &str,
        context: &ValidationContext,
    ) -> Result<(), Violation> {
        if condition && present {
            Err(context.violation(
                ViolationKind::MutuallyExclusiveFields,
                format!("{} cannot be combined with {}", field_name, other_name),
            ))
        } else {
            Ok(())
        }
    }

    /// Positions of entries whose key already appeared earlier, paired
    /// with the position of the first occurrence
    pub fn find_duplicates<'a, I>(keys: I) -> Vec<(usize, usize)>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut first_seen: Vec<(&str, usize)> = Vec::new();
        let mut duplicates = Vec::new();
        for (position, key) in keys.into_iter().enumerate() {
            let Some(key) = key else { continue };
            match first_seen.iter().find(|(seen, _)| *seen == key) {
                Some((_, first)) => duplicates.push((position, *first)),
                None => first_seen.push((key, position)),
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_context_child() {
        let context = ValidationContext::new(ValidationMode::Strict);
        let child = context.child("args0");
        assert_eq!(child.path, "$.args0");

        let grandchild = child.child_index(1).child("options");
        assert_eq!(grandchild.path, "$.args0[1].options");
        assert_eq!(grandchild.mode, ValidationMode::Strict);
    }

    #[test]
    fn test_registries_carried_to_children() {
        let context = ValidationContext::new(ValidationMode::Partial)
            .with_known_extensions(["parent_tooltip_when_inline"])
            .with_known_mutators(vec!["controls_if_mutator".to_string()]);
        let child = context.child("extensions").child_index(0);
        assert!(child
            .known_extensions()
            .is_some_and(|names| names.contains("parent_tooltip_when_inline")));
        assert_eq!(child.known_mutators().map(BTreeSet::len), Some(1));
        assert!(ValidationContext::default().known_extensions().is_none());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Partial".parse::<ValidationMode>(), Ok(ValidationMode::Partial));
        assert!("lenient".parse::<ValidationMode>().is_err());
        assert_eq!(ValidationMode::default(), ValidationMode::Strict);
        assert!(!ValidationMode::Basic.checks_predicates());
        assert!(ValidationMode::Strict.warnings_block());
    }

    #[test]
    fn test_validate_enum_value() {
        let context = ValidationContext::new(ValidationMode::Strict).child("lastDummyAlign0");
        let allowed = &["LEFT", "CENTER", "RIGHT"];
        assert!(ValidationHelpers::validate_enum_value("LEFT", allowed, "alignment", &context).is_ok());

        let violation =
            ValidationHelpers::validate_enum_value("MIDDLE", allowed, "alignment", &context)
                .unwrap_err();
        assert_eq!(violation.kind, ViolationKind::InvalidEnumValue);
        assert_eq!(violation.path, "$.lastDummyAlign0");
    }

    #[test]
    fn test_validate_registered() {
        let context = ValidationContext::new(ValidationMode::Strict).child("mutator");
        let names: BTreeSet<String> = ["known".to_string()].into_iter().collect();
        assert!(ValidationHelpers::validate_registered("known", Some(&names), "mutator", &context).is_ok());
        assert!(ValidationHelpers::validate_registered("other", Some(&names), "mutator", &context).is_err());
        assert!(ValidationHelpers::validate_registered("other", None, "mutator", &context).is_ok());
    }

    #[test]
    fn test_find_duplicates() {
        let keys = [Some("A"), Some("B"), None, Some("A"), Some("A")];
        assert_eq!(ValidationHelpers::find_duplicates(keys), vec![(3, 0), (4, 0)]);
    }
}
