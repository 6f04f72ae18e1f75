//! Violation types produced by block definition validation
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// One step of a path from the document root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of a violation, rendered as `$`, `$.message0`, `$.args0[1].options`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root, `$`
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key<K: Into<String>>(&self, key: K) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How much a violation matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Machine-readable classification of a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A value has the wrong fundamental JSON kind
    StructuralMismatch,
    MissingRequiredField,
    MutuallyExclusiveFields,
    /// `%k` with `k` outside `1..=args.len()`. A `k` too large for `usize`
    /// is reported as `usize::MAX`.
    PlaceholderOutOfRange(usize),
    /// `%k` appears more than once
    DuplicatePlaceholder(usize),
    /// Argument `k` (1-based) is never referenced by the message
    UnreferencedArgument(usize),
    RangeViolation,
    InvalidEnumValue,
    DuplicateName,
    NonUniqueOption,
    /// A key the schema does not recognise
    UnknownField,
    /// A setting that has no effect where it is placed
    UnusedConfiguration,
}

impl ViolationKind {
    /// Stable snake_case identifier
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::StructuralMismatch => "structural_mismatch",
            ViolationKind::MissingRequiredField => "missing_required_field",
            ViolationKind::MutuallyExclusiveFields => "mutually_exclusive_fields",
            ViolationKind::PlaceholderOutOfRange(_) => "placeholder_out_of_range",
            ViolationKind::DuplicatePlaceholder(_) => "duplicate_placeholder",
            ViolationKind::UnreferencedArgument(_) => "unreferenced_argument",
            ViolationKind::RangeViolation => "range_violation",
            ViolationKind::InvalidEnumValue => "invalid_enum_value",
            ViolationKind::DuplicateName => "duplicate_name",
            ViolationKind::NonUniqueOption => "non_unique_option",
            ViolationKind::UnknownField => "unknown_field",
            ViolationKind::UnusedConfiguration => "unused_configuration",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            ViolationKind::UnknownField | ViolationKind::UnusedConfiguration => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::PlaceholderOutOfRange(k)
            | ViolationKind::DuplicatePlaceholder(k)
            | ViolationKind::UnreferencedArgument(k) => write!(f, "{}({})", self.code(), k),
            _ => f.write_str(self.code()),
        }
    }
}

/// A single broken constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// Human-readable explanation
    pub detail: String,
    pub severity: Severity,
}

impl Violation {
    /// Create a violation with the kind's default severity
    pub fn new<D: Into<String>>(path: FieldPath, kind: ViolationKind, detail: D) -> Self {
        Self {
            path,
            severity: kind.default_severity(),
            kind,
            detail: detail.into(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn warning<D: Into<String>>(path: FieldPath, kind: ViolationKind, detail: D) -> Self {
        Self::new(path, kind, detail).with_severity(Severity::Warning)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at '{}': {}: {}",
            self.severity, self.path, self.kind, self.detail
        )
    }
}

/// Ordered list of violations found in one or more documents
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
pub struct ValidationErrors {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.len() {
            0 => write!(f, "No violations"),
            1 => write!(f, "{}", self.violations[0]),
            n => {
                write!(f, "{} violations:", n)?;
                for (i, violation) in self.violations.iter().enumerate() {
                    write!(f, "\n{}. {}", i + 1, violation)?;
                }
                Ok(())
            }
        }
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Record a violation with the kind's default severity
    pub fn report<D: Into<String>>(&mut self, path: FieldPath, kind: ViolationKind, detail: D) {
        self.add(Violation::new(path, kind, detail));
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.violations.extend(other.violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Error-severity violations
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Warning-severity violations
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(Violation::is_error)
    }

    /// Violations of a given kind
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Promote every warning to an error
    pub fn promote_warnings(&mut self) {
        for violation in &mut self.violations {
            violation.severity = Severity::Error;
        }
    }

    /// `Ok` if empty, `Err` otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let root = FieldPath::root();
        assert_eq!(root.to_string(), "$");
        assert!(root.is_root());

        let path = root.key("args0").index(1).key("options");
        assert_eq!(path.to_string(), "$.args0[1].options");
        assert_eq!(path, "$.args0[1].options");
        assert_eq!(FieldPath::root().index(2).key("type").to_string(), "$[2].type");
    }

    #[test]
    fn test_default_severity() {
        assert_eq!(ViolationKind::UnknownField.default_severity(), Severity::Warning);
        assert_eq!(
            ViolationKind::PlaceholderOutOfRange(3).default_severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::new(
            FieldPath::root().key("message0"),
            ViolationKind::PlaceholderOutOfRange(3),
            "%3 refers past the 2 arguments of args0",
        );
        assert_eq!(
            violation.to_string(),
            "error at '$.message0': placeholder_out_of_range(3): %3 refers past the 2 arguments of args0"
        );
    }

    #[test]
    fn test_violation_serialization() {
        let violation = Violation::new(
            FieldPath::root().key("message0"),
            ViolationKind::DuplicatePlaceholder(1),
            "repeated",
        );
        let value = serde_json::to_value(&violation).unwrap();
        assert_eq!(value["path"], "$.message0");
        assert_eq!(value["kind"], "duplicate_placeholder");
        assert_eq!(value["index"], 1);
        assert_eq!(value["severity"], "error");

        let plain = Violation::new(FieldPath::root(), ViolationKind::DuplicateName, "dup");
        let value = serde_json::to_value(&plain).unwrap();
        assert_eq!(value["kind"], "duplicate_name");
        assert!(value.get("index").is_none());
    }

    #[test]
    fn test_errors_and_warnings() {
        let mut errors = ValidationErrors::new();
        errors.report(FieldPath::root(), ViolationKind::UnknownField, "extra");
        assert!(!errors.has_errors());
        assert_eq!(errors.warnings().count(), 1);

        errors.promote_warnings();
        assert!(errors.has_errors());
        assert_eq!(errors.errors().count(), 1);
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
