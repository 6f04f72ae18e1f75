//! Argument specifications: the fields and inputs referenced by a message slot
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::model::connection::ConnectionCheck;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Discriminant of an argument, the value of its `type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgumentKind {
    FieldCheckbox,
    FieldDropdown,
    FieldNumber,
    FieldInput,
    FieldVariable,
    FieldColour,
    FieldAngle,
    FieldDate,
    FieldLabel,
    FieldImage,
    InputValue,
    InputStatement,
    InputDummy,
}

impl ArgumentKind {
    /// Every argument kind, in table order
    pub const ALL: [ArgumentKind; 13] = [
        ArgumentKind::FieldCheckbox,
        ArgumentKind::FieldDropdown,
        ArgumentKind::FieldNumber,
        ArgumentKind::FieldInput,
        ArgumentKind::FieldVariable,
        ArgumentKind::FieldColour,
        ArgumentKind::FieldAngle,
        ArgumentKind::FieldDate,
        ArgumentKind::FieldLabel,
        ArgumentKind::FieldImage,
        ArgumentKind::InputValue,
        ArgumentKind::InputStatement,
        ArgumentKind::InputDummy,
    ];

    /// Resolve a `type` discriminant
    pub fn from_discriminant(discriminant: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == discriminant)
    }

    /// The `type` discriminant for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgumentKind::FieldCheckbox => "field_checkbox",
            ArgumentKind::FieldDropdown => "field_dropdown",
            ArgumentKind::FieldNumber => "field_number",
            ArgumentKind::FieldInput => "field_input",
            ArgumentKind::FieldVariable => "field_variable",
            ArgumentKind::FieldColour => "field_colour",
            ArgumentKind::FieldAngle => "field_angle",
            ArgumentKind::FieldDate => "field_date",
            ArgumentKind::FieldLabel => "field_label",
            ArgumentKind::FieldImage => "field_image",
            ArgumentKind::InputValue => "input_value",
            ArgumentKind::InputStatement => "input_statement",
            ArgumentKind::InputDummy => "input_dummy",
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(
            self,
            ArgumentKind::InputValue | ArgumentKind::InputStatement | ArgumentKind::InputDummy
        )
    }

    pub fn is_field(&self) -> bool {
        !self.is_input()
    }

    /// Field kinds carried through without further validation
    pub fn is_opaque(&self) -> bool {
        matches!(
            self,
            ArgumentKind::FieldColour
                | ArgumentKind::FieldAngle
                | ArgumentKind::FieldDate
                | ArgumentKind::FieldLabel
                | ArgumentKind::FieldImage
        )
    }
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated entry of an `args_i` list
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentSpec {
    Field(FieldSpec),
    Input(InputSpec),
}

impl ArgumentSpec {
    /// The stable key used to read the value back from a live block
    pub fn name(&self) -> &str {
        match self {
            ArgumentSpec::Field(field) => &field.name,
            ArgumentSpec::Input(input) => &input.name,
        }
    }

    pub fn kind(&self) -> ArgumentKind {
        match self {
            ArgumentSpec::Field(field) => field.kind(),
            ArgumentSpec::Input(input) => input.kind.argument_kind(),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, ArgumentSpec::Input(_))
    }

    /// Render back into the document shape
    pub fn to_value(&self) -> Value {
        match self {
            ArgumentSpec::Field(field) => field.to_value(),
            ArgumentSpec::Input(input) => input.to_value(),
        }
    }
}

impl Serialize for ArgumentSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// A field argument: an editable or decorative element embedded in a block row
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub colour: Option<String>,
    pub detail: FieldDetail,
}

/// Kind-specific data of a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDetail {
    Checkbox {
        checked: Option<bool>,
    },
    Dropdown {
        options: Vec<DropdownOption>,
    },
    Number(NumberBounds),
    TextInput {
        text: String,
    },
    Variable {
        variable: String,
        variable_types: ConnectionCheck,
        default_type: String,
    },
    /// Colour, angle, date, label and image fields. Every key other than
    /// `type`, `name` and `colour` is kept verbatim.
    Opaque {
        kind: ArgumentKind,
        properties: Map<String, Value>,
    },
}

impl FieldSpec {
    pub fn kind(&self) -> ArgumentKind {
        match &self.detail {
            FieldDetail::Checkbox { .. } => ArgumentKind::FieldCheckbox,
            FieldDetail::Dropdown { .. } => ArgumentKind::FieldDropdown,
            FieldDetail::Number(_) => ArgumentKind::FieldNumber,
            FieldDetail::TextInput { .. } => ArgumentKind::FieldInput,
            FieldDetail::Variable { .. } => ArgumentKind::FieldVariable,
            FieldDetail::Opaque { kind, .. } => *kind,
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(self.kind().as_str()));
        map.insert("name".into(), json!(self.name));
        if let Some(colour) = &self.colour {
            map.insert("colour".into(), json!(colour));
        }

        match &self.detail {
            FieldDetail::Checkbox { checked } => {
                if let Some(checked) = checked {
                    map.insert("checked".into(), json!(checked));
                }
            }
            FieldDetail::Dropdown { options } => {
                let options = options.iter().map(DropdownOption::to_value).collect();
                map.insert("options".into(), Value::Array(options));
            }
            FieldDetail::Number(bounds) => {
                let entries = [
                    ("value", bounds.value),
                    ("min", bounds.min),
                    ("max", bounds.max),
                    ("precision", bounds.precision),
                ];
                for (key, number) in entries {
                    if let Some(number) = number {
                        map.insert(key.into(), json!(number));
                    }
                }
            }
            FieldDetail::TextInput { text } => {
                map.insert("text".into(), json!(text));
            }
            FieldDetail::Variable {
                variable,
                variable_types,
                default_type,
            } => {
                map.insert("variable".into(), json!(variable));
                map.insert("variableTypes".into(), variable_types.to_value());
                map.insert("defaultType".into(), json!(default_type));
            }
            FieldDetail::Opaque { properties, .. } => {
                for (key, value) in properties {
                    map.insert(key.clone(), value.clone());
                }
            }
        }

        Value::Object(map)
    }
}

/// Numeric settings of a `field_number`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub value: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub precision: Option<f64>,
}

impl NumberBounds {
    /// Clamp a candidate value into `[min, max]`
    pub fn clamp(&self, candidate: f64) -> f64 {
        let lower = self.min.map_or(candidate, |min| candidate.max(min));
        self.max.map_or(lower, |max| lower.min(max))
    }
}

/// One entry of a dropdown: what the user sees and what the block stores
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOption {
    pub label: DropdownLabel,
    pub value: String,
}

impl DropdownOption {
    /// Parse a `[label, value]` pair. Returns `None` for any other shape.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value.as_array()?.as_slice() {
            [label, value] => Some(Self {
                label: DropdownLabel::from_value(label)?,
                value: value.as_str()?.to_string(),
            }),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        json!([self.label.to_value(), self.value])
    }
}

/// Display part of a dropdown option
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownLabel {
    Text(String),
    Image {
        src: String,
        width: f64,
        height: f64,
        alt: Option<String>,
    },
}

impl DropdownLabel {
    /// A string, or an image object with `src`, `width` and `height`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(DropdownLabel::Text(text.clone())),
            Value::Object(image) => Some(DropdownLabel::Image {
                src: image.get("src")?.as_str()?.to_string(),
                width: image.get("width")?.as_f64()?,
                height: image.get("height")?.as_f64()?,
                alt: match image.get("alt") {
                    None => None,
                    Some(alt) => Some(alt.as_str()?.to_string()),
                },
            }),
            _ => None,
        }
    }

    /// Text shown for the option; the alt text of an image
    pub fn text(&self) -> &str {
        match self {
            DropdownLabel::Text(text) => text,
            DropdownLabel::Image { alt, src, .. } => alt.as_deref().unwrap_or(src),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            DropdownLabel::Text(text) => json!(text),
            DropdownLabel::Image {
                src,
                width,
                height,
                alt,
            } => {
                let mut image = json!({ "src": src, "width": width, "height": height });
                if let Some(alt) = alt {
                    image["alt"] = json!(alt);
                }
                image
            }
        }
    }
}

/// The three input row kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Accepts a value-producing block
    Value,
    /// Accepts a stack of statement blocks
    Statement,
    /// A row with no connection, used to group fields
    Dummy,
}

impl InputKind {
    pub fn argument_kind(&self) -> ArgumentKind {
        match self {
            InputKind::Value => ArgumentKind::InputValue,
            InputKind::Statement => ArgumentKind::InputStatement,
            InputKind::Dummy => ArgumentKind::InputDummy,
        }
    }

    pub fn from_argument_kind(kind: ArgumentKind) -> Option<Self> {
        match kind {
            ArgumentKind::InputValue => Some(InputKind::Value),
            ArgumentKind::InputStatement => Some(InputKind::Statement),
            ArgumentKind::InputDummy => Some(InputKind::Dummy),
            _ => None,
        }
    }
}

/// An input argument
#[derive(Debug, Clone, PartialEq)]
pub struct InputSpec {
    pub kind: InputKind,
    pub name: String,
    /// `None` when absent; `Some(ConnectionCheck::Any)` when explicitly `null`
    pub check: Option<ConnectionCheck>,
}

impl InputSpec {
    /// Whether a block whose output is `output` may plug into this input
    pub fn accepts(&self, output: &ConnectionCheck) -> bool {
        match &self.check {
            None => true,
            Some(check) => check.accepts_check(output),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(self.kind.argument_kind().as_str()));
        map.insert("name".into(), json!(self.name));
        if let Some(check) = &self.check {
            map.insert("check".into(), check.to_value());
        }
        Value::Object(map)
    }
}
