//! Constraint tables
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use super::{FieldConstraint, Predicate, ValueKind, VariantSchema};
use crate::model::{Align, ArgumentKind};

pub(super) static BLOCK_TYPE: FieldConstraint = FieldConstraint::required("type", ValueKind::String);

const ALIGN: &[Predicate] = &[Predicate::OneOf(&Align::ALLOWED)];
const CHECK: &[Predicate] = &[Predicate::UniqueTypeNames];

const fn slot(
    message: &'static str,
    args: &'static str,
    align: &'static str,
) -> [FieldConstraint; 3] {
    [
        FieldConstraint::optional(message, ValueKind::String),
        FieldConstraint::optional(args, ValueKind::ArgumentList),
        FieldConstraint::optional(align, ValueKind::Align).with(ALIGN),
    ]
}

/// `message_i`, `args_i`, `lastDummyAlign_i` for every slot index
pub(super) static SLOT_FIELDS: [[FieldConstraint; 3]; 10] = [
    slot("message0", "args0", "lastDummyAlign0"),
    slot("message1", "args1", "lastDummyAlign1"),
    slot("message2", "args2", "lastDummyAlign2"),
    slot("message3", "args3", "lastDummyAlign3"),
    slot("message4", "args4", "lastDummyAlign4"),
    slot("message5", "args5", "lastDummyAlign5"),
    slot("message6", "args6", "lastDummyAlign6"),
    slot("message7", "args7", "lastDummyAlign7"),
    slot("message8", "args8", "lastDummyAlign8"),
    slot("message9", "args9", "lastDummyAlign9"),
];

/// Settings shared by both root variants
pub(super) static BLOCK_COMMON: [FieldConstraint; 7] = [
    FieldConstraint::optional("inputsInline", ValueKind::Bool),
    FieldConstraint::optional("helpUrl", ValueKind::String),
    FieldConstraint::optional("style", ValueKind::String),
    FieldConstraint::optional("colour", ValueKind::Colour).with(&[Predicate::HueInRange]),
    FieldConstraint::optional("tooltip", ValueKind::String),
    FieldConstraint::optional("extensions", ValueKind::StringList),
    FieldConstraint::optional("mutator", ValueKind::String),
];

pub(super) static VALUE_BLOCK: VariantSchema = VariantSchema {
    discriminant: "value",
    fields: &[FieldConstraint::required("output", ValueKind::ConnectionCheck).with(CHECK)],
    predicates: &[],
    opaque: false,
};

pub(super) static STATEMENT_BLOCK: VariantSchema = VariantSchema {
    discriminant: "statement",
    fields: &[
        FieldConstraint::optional("previousStatement", ValueKind::ConnectionCheck).with(CHECK),
        FieldConstraint::optional("nextStatement", ValueKind::ConnectionCheck).with(CHECK),
    ],
    predicates: &[],
    opaque: false,
};

const NAME: FieldConstraint = FieldConstraint::required("name", ValueKind::String);
const FIELD_COLOUR: FieldConstraint = FieldConstraint::optional("colour", ValueKind::String);
const INPUT_CHECK: FieldConstraint =
    FieldConstraint::optional("check", ValueKind::ConnectionCheck).with(CHECK);
pub(super) static ARGUMENT_TYPE: FieldConstraint = FieldConstraint::required("type", ValueKind::String);
pub(super) static ARGUMENT_NAME: FieldConstraint = NAME;

const OPAQUE_FIELDS: &[FieldConstraint] = &[NAME, FIELD_COLOUR];
const INPUT_FIELDS: &[FieldConstraint] = &[NAME, INPUT_CHECK];

static FIELD_CHECKBOX: VariantSchema = VariantSchema {
    discriminant: "field_checkbox",
    fields: &[
        NAME,
        FIELD_COLOUR,
        FieldConstraint::optional("checked", ValueKind::Bool),
    ],
    predicates: &[],
    opaque: false,
};

static FIELD_DROPDOWN: VariantSchema = VariantSchema {
    discriminant: "field_dropdown",
    fields: &[
        NAME,
        FIELD_COLOUR,
        FieldConstraint::required("options", ValueKind::DropdownOptions)
            .with(&[Predicate::NonEmpty, Predicate::UniqueOptionValues]),
    ],
    predicates: &[],
    opaque: false,
};

static FIELD_NUMBER: VariantSchema = VariantSchema {
    discriminant: "field_number",
    fields: &[
        NAME,
        FIELD_COLOUR,
        FieldConstraint::optional("value", ValueKind::Number),
        FieldConstraint::optional("min", ValueKind::Number),
        FieldConstraint::optional("max", ValueKind::Number),
        FieldConstraint::optional("precision", ValueKind::Number).with(&[Predicate::NonNegative]),
    ],
    predicates: &[Predicate::MinNotAboveMax, Predicate::ValueWithinBounds],
    opaque: false,
};

static FIELD_INPUT: VariantSchema = VariantSchema {
    discriminant: "field_input",
    fields: &[
        NAME,
        FIELD_COLOUR,
        FieldConstraint::required("text", ValueKind::String),
    ],
    predicates: &[],
    opaque: false,
};

static FIELD_VARIABLE: VariantSchema = VariantSchema {
    discriminant: "field_variable",
    fields: &[
        NAME,
        FIELD_COLOUR,
        FieldConstraint::required("variable", ValueKind::String),
        FieldConstraint::required("variableTypes", ValueKind::ConnectionCheck).with(CHECK),
        FieldConstraint::required("defaultType", ValueKind::String),
    ],
    predicates: &[Predicate::DefaultTypeAllowed],
    opaque: false,
};

const fn opaque(discriminant: &'static str) -> VariantSchema {
    VariantSchema {
        discriminant,
        fields: OPAQUE_FIELDS,
        predicates: &[],
        opaque: true,
    }
}

static FIELD_COLOUR_PICKER: VariantSchema = opaque("field_colour");
static FIELD_ANGLE: VariantSchema = opaque("field_angle");
static FIELD_DATE: VariantSchema = opaque("field_date");
static FIELD_LABEL: VariantSchema = opaque("field_label");
static FIELD_IMAGE: VariantSchema = opaque("field_image");

const fn input(discriminant: &'static str) -> VariantSchema {
    VariantSchema {
        discriminant,
        fields: INPUT_FIELDS,
        predicates: &[],
        opaque: false,
    }
}

static INPUT_VALUE: VariantSchema = input("input_value");
static INPUT_STATEMENT: VariantSchema = input("input_statement");
static INPUT_DUMMY: VariantSchema = input("input_dummy");

pub(super) fn argument_schema(kind: ArgumentKind) -> &'static VariantSchema {
    match kind {
        ArgumentKind::FieldCheckbox => &FIELD_CHECKBOX,
        ArgumentKind::FieldDropdown => &FIELD_DROPDOWN,
        ArgumentKind::FieldNumber => &FIELD_NUMBER,
        ArgumentKind::FieldInput => &FIELD_INPUT,
        ArgumentKind::FieldVariable => &FIELD_VARIABLE,
        ArgumentKind::FieldColour => &FIELD_COLOUR_PICKER,
        ArgumentKind::FieldAngle => &FIELD_ANGLE,
        ArgumentKind::FieldDate => &FIELD_DATE,
        ArgumentKind::FieldLabel => &FIELD_LABEL,
        ArgumentKind::FieldImage => &FIELD_IMAGE,
        ArgumentKind::InputValue => &INPUT_VALUE,
        ArgumentKind::InputStatement => &INPUT_STATEMENT,
        ArgumentKind::InputDummy => &INPUT_DUMMY,
    }
}
