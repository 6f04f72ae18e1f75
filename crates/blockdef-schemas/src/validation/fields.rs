//! Table-driven checking of one JSON object
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::model::{ConnectionCheck, DropdownOption};
use crate::schema::{describe_value, FieldConstraint, Predicate, ValueKind, VariantSchema};
use crate::validation::base::{ValidationContext, ValidationHelpers};
use crate::validation::error::{ValidationErrors, Violation, ViolationKind};
use serde_json::{Map, Value};

/// Values of the keys that passed their kind check
#[derive(Debug, Default)]
pub(crate) struct CheckedFields<'a> {
    values: Vec<(&'static str, &'a Value)>,
}

impl<'a> CheckedFields<'a> {
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn string(&self, key: &str) -> Option<String> {
        self.str(key).map(str::to_string)
    }

    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn check(&self, key: &str) -> Option<ConnectionCheck> {
        self.get(key).and_then(ConnectionCheck::from_value)
    }
}

/// Check presence and kind of each constrained key, then its predicates.
///
/// Keys are visited in table order. Unknown keys are left to the caller.
pub(crate) fn check_fields<'a, I>(
    object: &'a Map<String, Value>,
    fields: I,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> CheckedFields<'a>
where
    I: IntoIterator<Item = FieldConstraint>,
{
    let mut checked = CheckedFields::default();

    for field in fields {
        let field_context = context.child(field.key);
        let Some(value) = object.get(field.key) else {
            if field.is_required() {
                errors.add(field_context.violation(
                    ViolationKind::MissingRequiredField,
                    format!("'{}' is required", field.key),
                ));
            }
            continue;
        };

        if !field.kind.matches(value) {
            errors.add(field_context.violation(
                ViolationKind::StructuralMismatch,
                format!(
                    "'{}' must be {}, found {}",
                    field.key,
                    field.kind.describe(),
                    describe_value(value)
                ),
            ));
            continue;
        }

        if field.kind == ValueKind::DropdownOptions {
            let unique = context.mode.checks_predicates()
                && field.predicates.contains(&Predicate::UniqueOptionValues);
            check_options(value, unique, &field_context, errors);
        }

        for predicate in field.predicates {
            // Basic mode keeps enum membership and drops the rest
            if !context.mode.checks_predicates() && !matches!(predicate, Predicate::OneOf(_)) {
                continue;
            }
            if let Some(violation) = apply_field_predicate(*predicate, field, value, &field_context)
            {
                errors.add(violation);
            }
            if *predicate == Predicate::UniqueTypeNames {
                report_duplicate_type_names(value, &field_context, errors);
            }
        }

        checked.values.push((field.key, value));
    }

    checked
}

/// Flag keys of `object` that `is_known` rejects
pub(crate) fn check_unknown_keys<F>(
    object: &Map<String, Value>,
    is_known: F,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) where
    F: Fn(&str) -> bool,
{
    for key in object.keys().filter(|key| !is_known(key)) {
        errors.add(context.child(key.as_str()).violation(
            ViolationKind::UnknownField,
            format!("'{}' is not a recognised key", key),
        ));
    }
}

/// Apply the predicates spanning several keys of a variant
pub(crate) fn check_variant_predicates(
    variant: &VariantSchema,
    checked: &CheckedFields<'_>,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    for predicate in variant.predicates {
        match predicate {
            Predicate::MinNotAboveMax => {
                if let (Some(min), Some(max)) = (checked.f64("min"), checked.f64("max")) {
                    if min > max {
                        errors.add(context.violation(
                            ViolationKind::RangeViolation,
                            format!("min {} is greater than max {}", min, max),
                        ));
                    }
                }
            }
            Predicate::ValueWithinBounds => {
                let Some(value) = checked.f64("value") else { continue };
                if let Some(min) = checked.f64("min").filter(|min| value < *min) {
                    errors.add(context.violation(
                        ViolationKind::RangeViolation,
                        format!("value {} is below min {}", value, min),
                    ));
                }
                if let Some(max) = checked.f64("max").filter(|max| value > *max) {
                    errors.add(context.violation(
                        ViolationKind::RangeViolation,
                        format!("value {} is above max {}", value, max),
                    ));
                }
            }
            Predicate::DefaultTypeAllowed => {
                let (Some(default_type), Some(types)) =
                    (checked.str("defaultType"), checked.check("variableTypes"))
                else {
                    continue;
                };
                if types.is_restricted() && !types.accepts(default_type) {
                    errors.add(context.child("defaultType").violation(
                        ViolationKind::InvalidEnumValue,
                        format!(
                            "default type '{}' is not one of the variable types ({})",
                            default_type, types
                        ),
                    ));
                }
            }
            _ => {}
        }
    }
}

/// Shape and uniqueness of dropdown options, reported in array order
fn check_options(
    value: &Value,
    unique: bool,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    let Some(options) = value.as_array() else { return };
    let mut first_seen: Vec<(&str, usize)> = Vec::new();

    for (position, option) in options.iter().enumerate() {
        let option_context = context.child_index(position);
        if DropdownOption::from_value(option).is_none() {
            errors.add(option_context.violation(
                ViolationKind::StructuralMismatch,
                format!(
                    "an option must be a [label, value] pair with a string value, found {}",
                    describe_value(option)
                ),
            ));
        }

        if !unique {
            continue;
        }
        let Some(key) = option.as_array().and_then(|pair| pair.get(1)).and_then(Value::as_str)
        else {
            continue;
        };
        match first_seen.iter().find(|(seen, _)| *seen == key) {
            Some((_, first)) => errors.add(option_context.violation(
                ViolationKind::NonUniqueOption,
                format!("option value repeats option {}", first),
            )),
            None => first_seen.push((key, position)),
        }
    }
}

fn apply_field_predicate(
    predicate: Predicate,
    field: FieldConstraint,
    value: &Value,
    context: &ValidationContext,
) -> Option<Violation> {
    match predicate {
        Predicate::NonEmpty => value
            .as_array()
            .and_then(|items| ValidationHelpers::validate_non_empty_array(items, field.key, context).err()),
        Predicate::NonNegative => value.as_f64().filter(|n| *n < 0.0).map(|n| {
            context.violation(
                ViolationKind::RangeViolation,
                format!("{} must not be negative, found {}", field.key, n),
            )
        }),
        Predicate::HueInRange => value
            .as_f64()
            .filter(|hue| !(0.0..=360.0).contains(hue))
            .map(|hue| {
                context.violation(
                    ViolationKind::RangeViolation,
                    format!("hue {} is outside 0..=360", hue),
                )
            }),
        Predicate::OneOf(allowed) => value.as_str().and_then(|s| {
            ValidationHelpers::validate_enum_value(s, allowed, field.key, context).err()
        }),
        Predicate::UniqueTypeNames => value
            .as_array()
            .filter(|names| names.is_empty())
            .map(|_| {
                Violation::warning(
                    context.path.clone(),
                    ViolationKind::RangeViolation,
                    format!("an empty '{}' list accepts no type", field.key),
                )
            }),
        _ => None,
    }
}

fn report_duplicate_type_names(
    value: &Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    let Some(names) = value.as_array() else { return };
    for (position, first) in ValidationHelpers::find_duplicates(names.iter().map(Value::as_str)) {
        errors.add(Violation::warning(
            context.child_index(position).path,
            ViolationKind::NonUniqueOption,
            format!("type name repeats entry {}", first),
        ));
    }
}
