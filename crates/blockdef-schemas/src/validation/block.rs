//! Block definition validation
//!
//! Walks a document against the schema model and, when nothing blocks
//! acceptance, assembles the typed [`BlockDefinition`].
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::model::{
    template, Align, ArgumentKind, ArgumentSpec, BlockDefinition, BlockKind, Colour, MessageSlot,
};
use crate::schema::{describe_value, Presence, SchemaModel, SlotKeys};
use crate::validation::arguments::{check_argument, CheckedArgument};
use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
use crate::validation::error::{ValidationErrors, ValidationResult, Violation, ViolationKind};
use crate::validation::fields::{check_fields, check_unknown_keys, CheckedFields};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Outcome of validating one document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Set when no violation blocks acceptance under the report's mode
    pub definition: Option<BlockDefinition>,
    pub violations: ValidationErrors,
    pub mode: ValidationMode,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.definition.is_some()
    }

    pub fn into_result(self) -> ValidationResult<BlockDefinition> {
        match self.definition {
            Some(definition) => Ok(definition),
            None => Err(self.violations),
        }
    }
}

/// Validator for block definition documents
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockDefinitionValidator;

impl BlockDefinitionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate and keep the violations even when the definition is accepted
    pub fn validate_report(&self, input: &Value, context: &ValidationContext) -> ValidationReport {
        validate_report(input, context)
    }
}

impl SchemaValidator for BlockDefinitionValidator {
    type Input = Value;
    type Output = BlockDefinition;

    fn validate_with_context(
        &self,
        input: &Value,
        context: &ValidationContext,
    ) -> ValidationResult<BlockDefinition> {
        validate_report(input, context).into_result()
    }
}

/// Validate one block definition document
pub fn validate_report(input: &Value, context: &ValidationContext) -> ValidationReport {
    let mut errors = ValidationErrors::new();

    let definition = match input.as_object() {
        Some(object) => check_block(object, context, &mut errors),
        None => {
            errors.add(context.violation(
                ViolationKind::StructuralMismatch,
                format!("a block definition must be an object, found {}", describe_value(input)),
            ));
            None
        }
    };

    if context.mode.warnings_block() {
        errors.promote_warnings();
    }
    let definition = definition.filter(|_| !errors.has_errors());

    debug!(
        path = %context.path,
        block_type = input.get("type").and_then(|v| v.as_str()).unwrap_or("<unknown>"),
        mode = %context.mode,
        violations = errors.len(),
        accepted = definition.is_some(),
        "validated block definition"
    );

    ValidationReport {
        definition,
        violations: errors,
        mode: context.mode,
    }
}

/// Which root variant the document is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Value,
    Statement,
}

fn check_block(
    object: &Map<String, Value>,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<BlockDefinition> {
    let model = SchemaModel::get();

    let has_output = model.is_value_block(object);
    let has_statement = model.is_statement_block(object);
    if let Err(violation) = ValidationHelpers::validate_conditional_absence(
        has_output,
        has_statement,
        "output",
        "previousStatement or nextStatement",
        context,
    ) {
        errors.add(violation);
    }
    let resolved = if has_output && !has_statement {
        Resolved::Value
    } else {
        Resolved::Statement
    };
    trace!(?resolved, "resolved block variant");

    // Connection keys of the other variant stay kind-checked but optional
    let value_keys = model.value_block();
    let fields = model.root_fields().iter().map(|field| {
        let mut field = **field;
        if resolved == Resolved::Statement && value_keys.field(field.key).is_some() {
            field.presence = Presence::Optional;
        }
        field
    });
    let checked = check_fields(object, fields, context, errors);
    check_unknown_keys(object, |key| model.is_root_key(key), context, errors);
    check_root_predicates(&checked, context, errors);

    let mut slots = Vec::new();
    let mut slots_complete = true;
    for keys in model.slots() {
        match check_slot(keys, &checked, context, errors) {
            SlotOutcome::Absent => {}
            SlotOutcome::Built(slot) => slots.push(slot),
            SlotOutcome::Broken => slots_complete = false,
        }
    }

    if !slots_complete || errors.has_errors() {
        return None;
    }
    build_definition(resolved, &checked, slots)
}

fn check_root_predicates(
    checked: &CheckedFields<'_>,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    if context.mode.checks_predicates() && checked.contains("style") && checked.contains("colour") {
        errors.add(Violation::warning(
            context.path.clone(),
            ViolationKind::MutuallyExclusiveFields,
            "'colour' is ignored when 'style' is set",
        ));
    }

    if let Some(extensions) = checked.array("extensions") {
        let extensions_context = context.child("extensions");
        for (position, name) in extensions.iter().enumerate() {
            let Some(name) = name.as_str() else { continue };
            if let Err(violation) = ValidationHelpers::validate_registered(
                name,
                context.known_extensions(),
                "extension",
                &extensions_context.child_index(position),
            ) {
                errors.add(violation);
            }
        }
    }

    if let Some(mutator) = checked.str("mutator") {
        if let Err(violation) = ValidationHelpers::validate_registered(
            mutator,
            context.known_mutators(),
            "mutator",
            &context.child("mutator"),
        ) {
            errors.add(violation);
        }
    }
}

enum SlotOutcome {
    Absent,
    Built(MessageSlot),
    Broken,
}

fn check_slot(
    keys: SlotKeys,
    checked: &CheckedFields<'_>,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> SlotOutcome {
    let message = checked.str(keys.message.key);
    let args_context = context.child(keys.args.key);
    let errors_before = errors.errors().count();

    let mut arguments: Vec<CheckedArgument<'_>> = Vec::new();
    if let Some(entries) = checked.array(keys.args.key) {
        for (position, entry) in entries.iter().enumerate() {
            arguments.push(check_argument(entry, &args_context.child_index(position), errors));
        }
    }

    let Some(message) = message else {
        for key in [keys.args.key, keys.align.key] {
            if checked.contains(key) {
                errors.add(context.child(key).violation(
                    ViolationKind::UnusedConfiguration,
                    format!("'{}' has no effect without '{}'", key, keys.message.key),
                ));
            }
        }
        return SlotOutcome::Absent;
    };

    let tokens = template::tokenize(message);
    if context.mode.checks_predicates() {
        check_argument_names(&arguments, &args_context, errors);
        check_placeholders(&tokens, &arguments, keys, context, errors);

        if checked.contains(keys.align.key) {
            let is_input = |index: usize| {
                index
                    .checked_sub(1)
                    .and_then(|i| arguments.get(i))
                    .and_then(|argument| argument.kind)
                    .map(|kind: ArgumentKind| kind.is_input())
            };
            if !template::implies_trailing_dummy(&tokens, is_input) {
                errors.add(context.child(keys.align.key).violation(
                    ViolationKind::UnusedConfiguration,
                    format!(
                        "'{}' has no effect: '{}' does not end with a field or text",
                        keys.align.key, keys.message.key
                    ),
                ));
            }
        }
    }

    if errors.errors().count() != errors_before {
        return SlotOutcome::Broken;
    }
    let Some(args) = arguments
        .into_iter()
        .map(|argument| argument.spec)
        .collect::<Option<Vec<ArgumentSpec>>>()
    else {
        return SlotOutcome::Broken;
    };

    SlotOutcome::Built(MessageSlot {
        index: keys.index,
        message: message.to_string(),
        args,
        last_dummy_align: checked.str(keys.align.key).and_then(Align::parse),
    })
}

fn check_argument_names(
    arguments: &[CheckedArgument<'_>],
    args_context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    let names = arguments.iter().map(|argument| argument.name);
    for (position, first) in ValidationHelpers::find_duplicates(names) {
        let name = arguments[position].name.unwrap_or_default();
        errors.add(args_context.child_index(position).child("name").violation(
            ViolationKind::DuplicateName,
            format!("name '{}' is already used by argument {}", name, first + 1),
        ));
    }
}

fn check_placeholders(
    tokens: &[template::Token],
    arguments: &[CheckedArgument<'_>],
    keys: SlotKeys,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) {
    let count = arguments.len();
    let message_context = context.child(keys.message.key);
    let mut references = vec![0usize; count];
    let mut reported_duplicates = Vec::new();

    for token in tokens {
        let (index, written) = match token {
            template::Token::Placeholder(index) => (*index, index.to_string()),
            template::Token::OversizedPlaceholder(digits) => (usize::MAX, digits.clone()),
            _ => continue,
        };
        if index == 0 || index > count {
            errors.add(message_context.violation(
                ViolationKind::PlaceholderOutOfRange(index),
                format!(
                    "%{} is outside 1..={}, '{}' has {} argument(s)",
                    written, count, keys.args.key, count
                ),
            ));
            continue;
        }

        references[index - 1] += 1;
        if references[index - 1] > 1 && !reported_duplicates.contains(&index) {
            reported_duplicates.push(index);
            errors.add(message_context.violation(
                ViolationKind::DuplicatePlaceholder(index),
                format!("%{} appears more than once", index),
            ));
        }
    }

    let args_context = context.child(keys.args.key);
    for (position, _) in references.iter().enumerate().filter(|(_, n)| **n == 0) {
        let name = arguments[position].name.unwrap_or("<unnamed>");
        errors.add(args_context.child_index(position).violation(
            ViolationKind::UnreferencedArgument(position + 1),
            format!(
                "argument '{}' is never referenced, '{}' lacks %{}",
                name,
                keys.message.key,
                position + 1
            ),
        ));
    }
}

fn build_definition(
    resolved: Resolved,
    checked: &CheckedFields<'_>,
    slots: Vec<MessageSlot>,
) -> Option<BlockDefinition> {
    let kind = match resolved {
        Resolved::Value => BlockKind::Value {
            output: checked.check("output")?,
        },
        Resolved::Statement => BlockKind::Statement {
            previous: checked.check("previousStatement"),
            next: checked.check("nextStatement"),
        },
    };

    let colour = checked.get("colour").and_then(|colour| match colour {
        Value::Number(hue) => hue.as_f64().map(Colour::Hue),
        Value::String(reference) => Some(Colour::Reference(reference.clone())),
        _ => None,
    });

    let extensions = checked.array("extensions").map(|names| {
        names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    });

    Some(BlockDefinition {
        block_type: checked.string("type")?,
        kind,
        slots,
        inputs_inline: checked.bool("inputsInline"),
        help_url: checked.string("helpUrl"),
        style: checked.string("style"),
        colour,
        tooltip: checked.string("tooltip"),
        extensions,
        mutator: checked.string("mutator"),
    })
}
