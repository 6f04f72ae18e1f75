//! JSON Schema export of the schema model
//!
//! Renders the constraint tables as a draft 2020-12 JSON Schema document so
//! editors and external tooling can offer completion and shape checking. The
//! export is structural: placeholder correspondence, name uniqueness and the
//! other cross-field invariants are only enforced by the validator.
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use super::{FieldConstraint, Predicate, SchemaModel, ValueKind, VariantSchema};
use crate::model::ArgumentKind;
use serde_json::{json, Map, Value};

pub const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Export the process-wide model
pub fn export() -> Value {
    export_model(SchemaModel::get())
}

pub fn export_model(model: &SchemaModel) -> Value {
    let mut properties = Map::new();
    for field in model.root_fields() {
        properties.insert(field.key.to_string(), field_schema(field));
    }

    let value_keys: Vec<_> = model.value_block().fields.iter().map(|f| f.key).collect();
    let exclusive: Vec<Value> = model
        .statement_block()
        .fields
        .iter()
        .flat_map(|statement| {
            value_keys
                .iter()
                .map(move |value| json!({ "not": { "required": [value, statement.key] } }))
        })
        .collect();

    let mut defs = Map::new();
    defs.insert("connectionCheck".into(), connection_check_schema());
    defs.insert("dropdownOption".into(), dropdown_option_schema());
    defs.insert(
        "argument".into(),
        json!({
            "oneOf": ArgumentKind::ALL
                .iter()
                .map(|kind| json!({ "$ref": format!("#/$defs/{}", kind.as_str()) }))
                .collect::<Vec<_>>()
        }),
    );
    for kind in ArgumentKind::ALL {
        defs.insert(kind.as_str().to_string(), variant_schema(model.argument(kind)));
    }

    json!({
        "$schema": DRAFT,
        "title": "Block definition",
        "description": "Declarative definition of one kind of editor block",
        "type": "object",
        "required": ["type"],
        "properties": properties,
        "allOf": exclusive,
        "$defs": defs,
    })
}

fn variant_schema(variant: &VariantSchema) -> Value {
    let mut properties = Map::new();
    properties.insert("type".into(), json!({ "const": variant.discriminant }));
    for field in variant.fields {
        properties.insert(field.key.to_string(), field_schema(field));
    }

    let mut required = vec!["type"];
    required.extend(variant.required_keys());

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn field_schema(field: &FieldConstraint) -> Value {
    let mut schema = kind_schema(field.kind);
    if let Value::Object(map) = &mut schema {
        for predicate in field.predicates {
            match predicate {
                Predicate::NonEmpty => {
                    map.insert("minItems".into(), json!(1));
                }
                Predicate::NonNegative => {
                    map.insert("minimum".into(), json!(0));
                }
                Predicate::OneOf(values) => {
                    map.insert("enum".into(), json!(values));
                }
                // Cross-element and cross-field predicates have no
                // structural rendering
                _ => {}
            }
        }
    }
    schema
}

fn kind_schema(kind: ValueKind) -> Value {
    match kind {
        ValueKind::String | ValueKind::Align => json!({ "type": "string" }),
        ValueKind::Bool => json!({ "type": "boolean" }),
        ValueKind::Number => json!({ "type": "number" }),
        ValueKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
        ValueKind::ConnectionCheck => json!({ "$ref": "#/$defs/connectionCheck" }),
        ValueKind::ArgumentList => {
            json!({ "type": "array", "items": { "$ref": "#/$defs/argument" } })
        }
        ValueKind::DropdownOptions => {
            json!({ "type": "array", "items": { "$ref": "#/$defs/dropdownOption" } })
        }
        ValueKind::Colour => json!({ "type": ["string", "number"] }),
        ValueKind::Any => json!({}),
    }
}

fn connection_check_schema() -> Value {
    json!({
        "oneOf": [
            { "type": "null" },
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    })
}

fn dropdown_option_schema() -> Value {
    json!({
        "type": "array",
        "prefixItems": [
            {
                "anyOf": [
                    { "type": "string" },
                    {
                        "type": "object",
                        "properties": {
                            "src": { "type": "string" },
                            "width": { "type": "number" },
                            "height": { "type": "number" },
                            "alt": { "type": "string" }
                        },
                        "required": ["src", "width", "height"]
                    }
                ]
            },
            { "type": "string" }
        ],
        "minItems": 2,
        "maxItems": 2
    })
}
