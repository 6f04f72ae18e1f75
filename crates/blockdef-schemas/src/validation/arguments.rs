//! Per-argument validation, dispatched on the `type` discriminant
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::model::{
    ArgumentKind, ArgumentSpec, DropdownOption, FieldDetail, FieldSpec, InputKind, InputSpec,
    NumberBounds,
};
use crate::schema::{describe_value, SchemaModel, VariantSchema};
use crate::validation::base::ValidationContext;
use crate::validation::error::{ValidationErrors, ViolationKind};
use crate::validation::fields::{check_fields, check_unknown_keys, check_variant_predicates, CheckedFields};
use serde_json::{Map, Value};

/// What the slot-level checks need to know about one argument, however
/// broken the rest of it is
#[derive(Debug, Default)]
pub(crate) struct CheckedArgument<'a> {
    pub name: Option<&'a str>,
    pub kind: Option<ArgumentKind>,
    /// Present only when the argument itself raised no errors
    pub spec: Option<ArgumentSpec>,
}

/// Validate one entry of an `args_i` list
pub(crate) fn check_argument<'a>(
    value: &'a Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> CheckedArgument<'a> {
    let Some(object) = value.as_object() else {
        errors.add(context.violation(
            ViolationKind::StructuralMismatch,
            format!("an argument must be an object, found {}", describe_value(value)),
        ));
        return CheckedArgument::default();
    };

    let errors_before = errors.errors().count();
    let model = SchemaModel::get();

    let Some((kind, schema)) = resolve_kind(object, model, context, errors) else {
        // Still report a missing or malformed name
        let checked = check_fields(object, [*model.argument_name()], context, errors);
        return CheckedArgument {
            name: checked.str("name"),
            ..CheckedArgument::default()
        };
    };

    let checked = check_fields(object, schema.fields.iter().copied(), context, errors);
    if !schema.opaque {
        check_unknown_keys(
            object,
            |key| key == "type" || schema.field(key).is_some(),
            context,
            errors,
        );
    }
    if context.mode.checks_predicates() {
        check_variant_predicates(schema, &checked, context, errors);
    }

    let clean = errors.errors().count() == errors_before;
    CheckedArgument {
        name: checked.str("name"),
        kind: Some(kind),
        spec: if clean {
            build_argument(kind, object, &checked)
        } else {
            None
        },
    }
}

fn resolve_kind(
    object: &Map<String, Value>,
    model: &SchemaModel,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<(ArgumentKind, &'static VariantSchema)> {
    let type_context = context.child("type");
    let discriminant = model.argument_discriminant();

    match object.get(discriminant.key) {
        None => {
            errors.add(type_context.violation(
                ViolationKind::MissingRequiredField,
                "argument 'type' is required",
            ));
            None
        }
        Some(Value::String(name)) => {
            let resolved = model.argument_by_discriminant(name);
            if resolved.is_none() {
                errors.add(type_context.violation(
                    ViolationKind::InvalidEnumValue,
                    format!("unknown argument type '{}'", name),
                ));
            }
            resolved
        }
        Some(other) => {
            errors.add(type_context.violation(
                ViolationKind::StructuralMismatch,
                format!(
                    "argument 'type' must be {}, found {}",
                    discriminant.kind.describe(),
                    describe_value(other)
                ),
            ));
            None
        }
    }
}

fn build_argument(
    kind: ArgumentKind,
    object: &Map<String, Value>,
    checked: &CheckedFields<'_>,
) -> Option<ArgumentSpec> {
    let name = checked.string("name")?;

    if let Some(input_kind) = InputKind::from_argument_kind(kind) {
        return Some(ArgumentSpec::Input(InputSpec {
            kind: input_kind,
            name,
            check: checked.check("check"),
        }));
    }

    let detail = match kind {
        ArgumentKind::FieldCheckbox => FieldDetail::Checkbox {
            checked: checked.bool("checked"),
        },
        ArgumentKind::FieldDropdown => FieldDetail::Dropdown {
            options: checked
                .array("options")?
                .iter()
                .map(DropdownOption::from_value)
                .collect::<Option<Vec<_>>>()?,
        },
        ArgumentKind::FieldNumber => FieldDetail::Number(NumberBounds {
            value: checked.f64("value"),
            min: checked.f64("min"),
            max: checked.f64("max"),
            precision: checked.f64("precision"),
        }),
        ArgumentKind::FieldInput => FieldDetail::TextInput {
            text: checked.string("text")?,
        },
        ArgumentKind::FieldVariable => FieldDetail::Variable {
            variable: checked.string("variable")?,
            variable_types: checked.check("variableTypes")?,
            default_type: checked.string("defaultType")?,
        },
        opaque => FieldDetail::Opaque {
            kind: opaque,
            properties: object
                .iter()
                .filter(|(key, _)| !matches!(key.as_str(), "type" | "name" | "colour"))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        },
    };

    Some(ArgumentSpec::Field(FieldSpec {
        name,
        colour: checked.string("colour"),
        detail,
    }))
}
