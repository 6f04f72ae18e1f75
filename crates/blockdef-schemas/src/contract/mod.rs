//! Contracts for behaviour supplied outside this crate
//!
//! A validated definition certifies its connection shape; these types let a
//! code-generation host pick the matching callback signature and let mutator
//! implementations plug in without the core knowing their payload format.
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

pub mod codegen;
pub mod mutator;

pub use codegen::{BoundGenerator, CodeGenerator, ContractError, GeneratedCode, GeneratorSignature};
pub use mutator::{mutator_names, MutatorMixin};
