//! Validated block definitions
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::contract::GeneratorSignature;
use crate::model::argument::ArgumentSpec;
use crate::model::connection::ConnectionCheck;
use crate::model::template::{self, Token};
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// Highest message slot index (slots are `0..=MAX_SLOT_INDEX`)
pub const MAX_SLOT_INDEX: u8 = 9;

/// Alignment of the implicit trailing dummy input of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub const ALLOWED: [&'static str; 3] = ["LEFT", "CENTER", "RIGHT"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LEFT" => Some(Align::Left),
            "CENTER" => Some(Align::Center),
            "RIGHT" => Some(Align::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "LEFT",
            Align::Center => "CENTER",
            Align::Right => "RIGHT",
        }
    }
}

/// Block colour: a hue in degrees or a colour string (hex code, message reference)
#[derive(Debug, Clone, PartialEq)]
pub enum Colour {
    Hue(f64),
    Reference(String),
}

impl Colour {
    pub fn to_value(&self) -> Value {
        match self {
            Colour::Hue(hue) => json!(hue),
            Colour::Reference(reference) => json!(reference),
        }
    }
}

/// Which of the two root variants a definition is
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    /// Produces a value through its `output` connection
    Value { output: ConnectionCheck },
    /// Stacks vertically; either connection may be absent
    Statement {
        previous: Option<ConnectionCheck>,
        next: Option<ConnectionCheck>,
    },
}

impl BlockKind {
    pub fn is_value(&self) -> bool {
        matches!(self, BlockKind::Value { .. })
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Value { .. } => f.write_str("value"),
            BlockKind::Statement { .. } => f.write_str("statement"),
        }
    }
}

/// One `(message_i, args_i, lastDummyAlign_i)` group
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSlot {
    pub index: u8,
    pub message: String,
    pub args: Vec<ArgumentSpec>,
    pub last_dummy_align: Option<Align>,
}

impl MessageSlot {
    pub fn tokens(&self) -> Vec<Token> {
        template::tokenize(&self.message)
    }

    /// Arguments in the order the message references them
    pub fn arguments_in_message_order(&self) -> Vec<&ArgumentSpec> {
        template::placeholders(&self.tokens())
            .filter_map(|index| index.checked_sub(1).and_then(|i| self.args.get(i)))
            .collect()
    }

    /// Whether the editor appends a dummy input after the last argument
    pub fn has_implicit_dummy(&self) -> bool {
        template::implies_trailing_dummy(&self.tokens(), |index| {
            index
                .checked_sub(1)
                .and_then(|i| self.args.get(i))
                .map(ArgumentSpec::is_input)
        })
    }
}

/// A block definition that passed validation.
///
/// Instances are only produced by the validator and cannot be modified.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDefinition {
    pub(crate) block_type: String,
    pub(crate) kind: BlockKind,
    pub(crate) slots: Vec<MessageSlot>,
    pub(crate) inputs_inline: Option<bool>,
    pub(crate) help_url: Option<String>,
    pub(crate) style: Option<String>,
    pub(crate) colour: Option<Colour>,
    pub(crate) tooltip: Option<String>,
    pub(crate) extensions: Option<Vec<String>>,
    pub(crate) mutator: Option<String>,
}

impl BlockDefinition {
    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn is_value_block(&self) -> bool {
        self.kind.is_value()
    }

    /// The output check of a value block
    pub fn output(&self) -> Option<&ConnectionCheck> {
        match &self.kind {
            BlockKind::Value { output } => Some(output),
            BlockKind::Statement { .. } => None,
        }
    }

    pub fn previous_statement(&self) -> Option<&ConnectionCheck> {
        match &self.kind {
            BlockKind::Statement { previous, .. } => previous.as_ref(),
            BlockKind::Value { .. } => None,
        }
    }

    pub fn next_statement(&self) -> Option<&ConnectionCheck> {
        match &self.kind {
            BlockKind::Statement { next, .. } => next.as_ref(),
            BlockKind::Value { .. } => None,
        }
    }

    /// Populated slots ordered by index
    pub fn slots(&self) -> &[MessageSlot] {
        &self.slots
    }

    pub fn slot(&self, index: u8) -> Option<&MessageSlot> {
        self.slots.iter().find(|slot| slot.index == index)
    }

    /// Every argument of every slot, in slot then list order
    pub fn arguments(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.slots.iter().flat_map(|slot| slot.args.iter())
    }

    /// First argument carrying `name`
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments().find(|arg| arg.name() == name)
    }

    pub fn inputs_inline(&self) -> Option<bool> {
        self.inputs_inline
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn colour(&self) -> Option<&Colour> {
        self.colour.as_ref()
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    pub fn extensions(&self) -> &[String] {
        self.extensions.as_deref().unwrap_or_default()
    }

    /// Name of the mutator this block references, resolved by the editor
    pub fn mutator(&self) -> Option<&str> {
        self.mutator.as_deref()
    }

    /// Which generator callback shape this block requires
    pub fn generator_signature(&self) -> GeneratorSignature {
        GeneratorSignature::for_kind(&self.kind)
    }

    /// Render back into the JSON document format
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), json!(self.block_type));

        for slot in &self.slots {
            map.insert(format!("message{}", slot.index), json!(slot.message));
            if !slot.args.is_empty() {
                let args = slot.args.iter().map(ArgumentSpec::to_value).collect();
                map.insert(format!("args{}", slot.index), Value::Array(args));
            }
            if let Some(align) = slot.last_dummy_align {
                map.insert(
                    format!("lastDummyAlign{}", slot.index),
                    json!(align.as_str()),
                );
            }
        }

        if let Some(inline) = self.inputs_inline {
            map.insert("inputsInline".into(), json!(inline));
        }
        let strings = [
            ("helpUrl", &self.help_url),
            ("style", &self.style),
            ("tooltip", &self.tooltip),
            ("mutator", &self.mutator),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                map.insert(key.into(), json!(value));
            }
        }
        if let Some(colour) = &self.colour {
            map.insert("colour".into(), colour.to_value());
        }
        if let Some(extensions) = &self.extensions {
            map.insert("extensions".into(), json!(extensions));
        }

        match &self.kind {
            BlockKind::Value { output } => {
                map.insert("output".into(), output.to_value());
            }
            BlockKind::Statement { previous, next } => {
                if let Some(previous) = previous {
                    map.insert("previousStatement".into(), previous.to_value());
                }
                if let Some(next) = next {
                    map.insert("nextStatement".into(), next.to_value());
                }
            }
        }

        Value::Object(map)
    }
}

impl Serialize for BlockDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::argument::{FieldDetail, FieldSpec, InputKind, InputSpec, NumberBounds};

    fn number(name: &str) -> ArgumentSpec {
        ArgumentSpec::Field(FieldSpec {
            name: name.into(),
            colour: None,
            detail: FieldDetail::Number(NumberBounds::default()),
        })
    }

    fn value_input(name: &str) -> ArgumentSpec {
        ArgumentSpec::Input(InputSpec {
            kind: InputKind::Value,
            name: name.into(),
            check: None,
        })
    }

    fn slot(message: &str, args: Vec<ArgumentSpec>) -> MessageSlot {
        MessageSlot {
            index: 0,
            message: message.into(),
            args,
            last_dummy_align: None,
        }
    }

    #[test]
    fn test_align_parse() {
        assert_eq!(Align::parse("CENTER"), Some(Align::Center));
        assert_eq!(Align::parse("CENTRE"), None);
        assert_eq!(Align::Right.as_str(), "RIGHT");
    }

    #[test]
    fn test_slot_message_order() {
        let slot = slot("%2 minus %1", vec![number("A"), number("B")]);
        let names: Vec<_> = slot.arguments_in_message_order().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_slot_implicit_dummy() {
        assert!(slot("%1 + %2", vec![number("A"), number("B")]).has_implicit_dummy());
        assert!(!slot("print %1", vec![value_input("TEXT")]).has_implicit_dummy());
    }

    #[test]
    fn test_to_value_statement_block() {
        let definition = BlockDefinition {
            block_type: "text_print".into(),
            kind: BlockKind::Statement {
                previous: Some(ConnectionCheck::Any),
                next: None,
            },
            slots: vec![slot("print %1", vec![value_input("TEXT")])],
            inputs_inline: None,
            help_url: None,
            style: None,
            colour: Some(Colour::Hue(160.0)),
            tooltip: None,
            extensions: None,
            mutator: None,
        };

        assert_eq!(
            definition.to_value(),
            json!({
                "type": "text_print",
                "message0": "print %1",
                "args0": [{"type": "input_value", "name": "TEXT"}],
                "colour": 160.0,
                "previousStatement": null
            })
        );
        assert_eq!(definition.previous_statement(), Some(&ConnectionCheck::Any));
        assert_eq!(definition.next_statement(), None);
        assert!(definition.extensions().is_empty());
    }
}
