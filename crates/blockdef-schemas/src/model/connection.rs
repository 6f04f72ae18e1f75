//! Connection type constraints
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// The set of type names a connection point accepts.
///
/// Type names are opaque identifiers compared by string equality. There is no
/// subtyping: `AnyOf` is a plain OR over its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    /// `null` in the document: any type connects
    Any,
    /// A single type name
    Single(String),
    /// An ordered list of type names, any one of which may match
    AnyOf(Vec<String>),
}

impl ConnectionCheck {
    /// Check whether a value carrying `type_name` may connect here
    pub fn accepts(&self, type_name: &str) -> bool {
        match self {
            ConnectionCheck::Any => true,
            ConnectionCheck::Single(name) => name == type_name,
            ConnectionCheck::AnyOf(names) => names.iter().any(|n| n == type_name),
        }
    }

    /// Check whether two connection points are compatible.
    ///
    /// Either side being `Any` is compatible; otherwise the two sets must share
    /// at least one type name.
    pub fn accepts_check(&self, other: &ConnectionCheck) -> bool {
        match (self, other) {
            (ConnectionCheck::Any, _) | (_, ConnectionCheck::Any) => true,
            _ => self.type_names().iter().any(|name| other.accepts(name)),
        }
    }

    /// The type names this constraint lists (empty for `Any`)
    pub fn type_names(&self) -> &[String] {
        match self {
            ConnectionCheck::Any => &[],
            ConnectionCheck::Single(name) => std::slice::from_ref(name),
            ConnectionCheck::AnyOf(names) => names,
        }
    }

    /// Whether this constraint restricts the accepted types
    pub fn is_restricted(&self) -> bool {
        !matches!(self, ConnectionCheck::Any)
    }

    /// Build from a document value whose shape has already been checked.
    ///
    /// Returns `None` when the value is not `null`, a string or a list of strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(ConnectionCheck::Any),
            Value::String(name) => Some(ConnectionCheck::Single(name.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(ConnectionCheck::AnyOf),
            _ => None,
        }
    }

    /// Render back into the document shape
    pub fn to_value(&self) -> Value {
        match self {
            ConnectionCheck::Any => Value::Null,
            ConnectionCheck::Single(name) => Value::String(name.clone()),
            ConnectionCheck::AnyOf(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl fmt::Display for ConnectionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionCheck::Any => write!(f, "any"),
            ConnectionCheck::Single(name) => write!(f, "{}", name),
            ConnectionCheck::AnyOf(names) => write!(f, "{}", names.join(" | ")),
        }
    }
}

impl Serialize for ConnectionCheck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts() {
        assert!(ConnectionCheck::Any.accepts("Number"));
        assert!(ConnectionCheck::Single("Number".into()).accepts("Number"));
        assert!(!ConnectionCheck::Single("Number".into()).accepts("String"));

        let either = ConnectionCheck::AnyOf(vec!["Number".into(), "String".into()]);
        assert!(either.accepts("String"));
        assert!(!either.accepts("Boolean"));
    }

    #[test]
    fn test_accepts_check() {
        let number = ConnectionCheck::Single("Number".into());
        let text = ConnectionCheck::Single("String".into());
        let either = ConnectionCheck::AnyOf(vec!["Number".into(), "String".into()]);

        assert!(number.accepts_check(&either));
        assert!(either.accepts_check(&text));
        assert!(!number.accepts_check(&text));
        assert!(ConnectionCheck::Any.accepts_check(&text));
        assert!(!ConnectionCheck::AnyOf(vec![]).accepts_check(&number));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(ConnectionCheck::from_value(&json!(null)), Some(ConnectionCheck::Any));
        assert_eq!(
            ConnectionCheck::from_value(&json!("Array")),
            Some(ConnectionCheck::Single("Array".into()))
        );
        assert_eq!(
            ConnectionCheck::from_value(&json!(["Array", "String"])),
            Some(ConnectionCheck::AnyOf(vec!["Array".into(), "String".into()]))
        );
        assert_eq!(ConnectionCheck::from_value(&json!(["Array", 3])), None);
        assert_eq!(ConnectionCheck::from_value(&json!(true)), None);
    }

    #[test]
    fn test_display() {
        let either = ConnectionCheck::AnyOf(vec!["Number".into(), "String".into()]);
        assert_eq!(either.to_string(), "Number | String");
        assert_eq!(ConnectionCheck::Any.to_string(), "any");
    }
}
