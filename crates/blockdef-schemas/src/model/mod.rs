//! Strongly typed block definitions produced by the validator
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

pub mod argument;
pub mod block;
pub mod connection;
pub mod template;

pub use argument::{
    ArgumentKind, ArgumentSpec, DropdownLabel, DropdownOption, FieldDetail, FieldSpec, InputKind,
    InputSpec, NumberBounds,
};
pub use block::{Align, BlockDefinition, BlockKind, Colour, MessageSlot, MAX_SLOT_INDEX};
pub use connection::ConnectionCheck;
pub use template::Token;
