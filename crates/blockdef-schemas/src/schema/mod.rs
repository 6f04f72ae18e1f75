//! Schema model: the legal shapes of a block definition
//!
//! The model is plain data. Each root variant and each argument kind has a
//! [`VariantSchema`] listing its keys with their expected [`ValueKind`],
//! whether they are required, and any auxiliary [`Predicate`]s. The validator
//! walks these tables; the JSON Schema export renders them.
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

pub mod json_schema;
mod tables;

use crate::model::{ArgumentKind, MAX_SLOT_INDEX};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Fundamental JSON shape expected for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    Number,
    /// A list whose every entry is a string
    StringList,
    /// `null`, a type name, or a list of type names
    ConnectionCheck,
    /// A list of argument objects
    ArgumentList,
    /// A list of `[label, value]` pairs
    DropdownOptions,
    /// One of a fixed set of strings
    Align,
    /// A hue number or a colour string
    Colour,
    Any,
}

impl ValueKind {
    /// Check the fundamental shape of `value`. Element-level shapes of lists
    /// of objects are checked separately by the validator.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::String | ValueKind::Align => value.is_string(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Number => value.is_number(),
            ValueKind::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            ValueKind::ConnectionCheck => match value {
                Value::Null | Value::String(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            ValueKind::ArgumentList | ValueKind::DropdownOptions => value.is_array(),
            ValueKind::Colour => value.is_string() || value.is_number(),
            ValueKind::Any => true,
        }
    }

    /// Short description used in violation details
    pub fn describe(&self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Bool => "a boolean",
            ValueKind::Number => "a number",
            ValueKind::StringList => "a list of strings",
            ValueKind::ConnectionCheck => "null, a type name or a list of type names",
            ValueKind::ArgumentList => "a list of arguments",
            ValueKind::DropdownOptions => "a list of [label, value] pairs",
            ValueKind::Align => "an alignment string",
            ValueKind::Colour => "a hue number or a colour string",
            ValueKind::Any => "any value",
        }
    }
}

/// Name the JSON kind of a value for violation details
pub fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Whether a key must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Auxiliary constraints beyond the fundamental shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The list has at least one entry
    NonEmpty,
    /// Dropdown option values (second pair element) are unique
    UniqueOptionValues,
    /// The number is zero or positive
    NonNegative,
    /// A hue lies within `0..=360`
    HueInRange,
    /// A connection check list does not repeat a type name
    UniqueTypeNames,
    /// The string is one of the listed values
    OneOf(&'static [&'static str]),
    /// Variant level: `min <= max` when both are set
    MinNotAboveMax,
    /// Variant level: `min <= value <= max` for whichever bounds are set
    ValueWithinBounds,
    /// Variant level: `defaultType` appears in a restricted `variableTypes`
    DefaultTypeAllowed,
}

/// One row of a constraint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConstraint {
    pub key: &'static str,
    pub kind: ValueKind,
    pub presence: Presence,
    pub predicates: &'static [Predicate],
}

impl FieldConstraint {
    pub const fn required(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Required,
            predicates: &[],
        }
    }

    pub const fn optional(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            presence: Presence::Optional,
            predicates: &[],
        }
    }

    pub const fn with(mut self, predicates: &'static [Predicate]) -> Self {
        self.predicates = predicates;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

/// Constraint table for one variant of a tagged union
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSchema {
    pub discriminant: &'static str,
    pub fields: &'static [FieldConstraint],
    /// Predicates spanning several keys
    pub predicates: &'static [Predicate],
    /// Unlisted keys are carried through instead of flagged
    pub opaque: bool,
}

impl VariantSchema {
    pub fn field(&self, key: &str) -> Option<&'static FieldConstraint> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> {
        self.fields
            .iter()
            .filter(|field| field.is_required())
            .map(|field| field.key)
    }
}

/// Key names of one message slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotKeys {
    pub index: u8,
    pub message: &'static FieldConstraint,
    pub args: &'static FieldConstraint,
    pub align: &'static FieldConstraint,
}

/// Read-only view over every constraint table
#[derive(Debug)]
pub struct SchemaModel {
    root_fields: Vec<&'static FieldConstraint>,
}

static MODEL: OnceLock<SchemaModel> = OnceLock::new();

impl SchemaModel {
    /// The process-wide model, built on first use
    pub fn get() -> &'static SchemaModel {
        MODEL.get_or_init(|| {
            let slots = &tables::SLOT_FIELDS;
            let mut root_fields: Vec<&'static FieldConstraint> = vec![&tables::BLOCK_TYPE];
            root_fields.extend(slots.iter().map(|slot| &slot[0]));
            root_fields.extend(slots.iter().map(|slot| &slot[1]));
            root_fields.extend(slots.iter().map(|slot| &slot[2]));
            root_fields.extend(tables::BLOCK_COMMON.iter());
            root_fields.extend(tables::VALUE_BLOCK.fields.iter());
            root_fields.extend(tables::STATEMENT_BLOCK.fields.iter());
            SchemaModel { root_fields }
        })
    }

    /// Every recognised top-level key in declaration order: `type`, the
    /// message, args and alignment keys of each slot, the shared settings,
    /// then the connection keys of both root variants
    pub fn root_fields(&self) -> &[&'static FieldConstraint] {
        &self.root_fields
    }

    pub fn root_field(&self, key: &str) -> Option<&'static FieldConstraint> {
        self.root_fields.iter().copied().find(|field| field.key == key)
    }

    pub fn is_root_key(&self, key: &str) -> bool {
        self.root_field(key).is_some()
    }

    pub fn value_block(&self) -> &'static VariantSchema {
        &tables::VALUE_BLOCK
    }

    pub fn statement_block(&self) -> &'static VariantSchema {
        &tables::STATEMENT_BLOCK
    }

    pub fn slot_keys(&self, index: u8) -> Option<SlotKeys> {
        if index > MAX_SLOT_INDEX {
            return None;
        }
        let slot = &tables::SLOT_FIELDS[usize::from(index)];
        Some(SlotKeys {
            index,
            message: &slot[0],
            args: &slot[1],
            align: &slot[2],
        })
    }

    pub fn slots(&self) -> impl Iterator<Item = SlotKeys> + '_ {
        (0..=MAX_SLOT_INDEX).filter_map(|index| self.slot_keys(index))
    }

    /// The `type` key shared by every argument
    pub fn argument_discriminant(&self) -> &'static FieldConstraint {
        &tables::ARGUMENT_TYPE
    }

    /// The `name` key shared by every argument
    pub fn argument_name(&self) -> &'static FieldConstraint {
        &tables::ARGUMENT_NAME
    }

    /// Constraint table of an argument kind
    pub fn argument(&self, kind: ArgumentKind) -> &'static VariantSchema {
        tables::argument_schema(kind)
    }

    /// Resolve an argument `type` discriminant to its table
    pub fn argument_by_discriminant(
        &self,
        discriminant: &str,
    ) -> Option<(ArgumentKind, &'static VariantSchema)> {
        ArgumentKind::from_discriminant(discriminant).map(|kind| (kind, self.argument(kind)))
    }

    /// Discriminant test for the value-block variant
    pub fn is_value_block(&self, object: &Map<String, Value>) -> bool {
        self.value_block()
            .fields
            .iter()
            .any(|field| object.contains_key(field.key))
    }

    /// Discriminant test for the statement-block variant
    pub fn is_statement_block(&self, object: &Map<String, Value>) -> bool {
        self.statement_block()
            .fields
            .iter()
            .any(|field| object.contains_key(field.key))
    }
}
