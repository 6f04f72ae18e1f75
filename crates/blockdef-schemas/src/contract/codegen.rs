//! Code generator callback shapes
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use crate::model::{BlockDefinition, BlockKind};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Callback shape a block's generator must have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorSignature {
    /// Returns source text and its operator precedence
    ValueWithPrecedence,
    /// Returns source text alone
    StatementOnly,
}

impl GeneratorSignature {
    pub fn for_kind(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::Value { .. } => GeneratorSignature::ValueWithPrecedence,
            BlockKind::Statement { .. } => GeneratorSignature::StatementOnly,
        }
    }
}

impl fmt::Display for GeneratorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorSignature::ValueWithPrecedence => f.write_str("(code, precedence)"),
            GeneratorSignature::StatementOnly => f.write_str("code"),
        }
    }
}

/// Output of a generator call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedCode {
    Value { code: String, precedence: u32 },
    Statement(String),
}

impl GeneratedCode {
    pub fn code(&self) -> &str {
        match self {
            GeneratedCode::Value { code, .. } | GeneratedCode::Statement(code) => code,
        }
    }

    pub fn precedence(&self) -> Option<u32> {
        match self {
            GeneratedCode::Value { precedence, .. } => Some(*precedence),
            GeneratedCode::Statement(_) => None,
        }
    }
}

type ValueFn<B> = dyn Fn(&B) -> (String, u32) + Send + Sync;
type StatementFn<B> = dyn Fn(&B) -> String + Send + Sync;

/// A user-supplied generator for live block instances of type `B`
pub enum CodeGenerator<B> {
    Value(Box<ValueFn<B>>),
    Statement(Box<StatementFn<B>>),
}

impl<B> CodeGenerator<B> {
    pub fn value<F>(generate: F) -> Self
    where
        F: Fn(&B) -> (String, u32) + Send + Sync + 'static,
    {
        CodeGenerator::Value(Box::new(generate))
    }

    pub fn statement<F>(generate: F) -> Self
    where
        F: Fn(&B) -> String + Send + Sync + 'static,
    {
        CodeGenerator::Statement(Box::new(generate))
    }

    pub fn signature(&self) -> GeneratorSignature {
        match self {
            CodeGenerator::Value(_) => GeneratorSignature::ValueWithPrecedence,
            CodeGenerator::Statement(_) => GeneratorSignature::StatementOnly,
        }
    }
}

impl<B> fmt::Debug for CodeGenerator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodeGenerator").field(&self.signature()).finish()
    }
}

/// Errors raised when pairing a generator with a block
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("Block '{block_type}' needs a generator returning {expected}, got one returning {actual}")]
    SignatureMismatch {
        block_type: String,
        expected: GeneratorSignature,
        actual: GeneratorSignature,
    },
}

/// A generator checked against the block it serves
pub struct BoundGenerator<B> {
    block_type: String,
    generator: CodeGenerator<B>,
}

impl<B> fmt::Debug for BoundGenerator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundGenerator")
            .field("block_type", &self.block_type)
            .field("generator", &self.generator)
            .finish()
    }
}

impl<B> BoundGenerator<B> {
    /// Pair `generator` with `definition`, rejecting a mismatched shape
    pub fn bind(
        definition: &BlockDefinition,
        generator: CodeGenerator<B>,
    ) -> Result<Self, ContractError> {
        let expected = definition.generator_signature();
        let actual = generator.signature();
        if expected != actual {
            return Err(ContractError::SignatureMismatch {
                block_type: definition.block_type().to_string(),
                expected,
                actual,
            });
        }
        Ok(Self {
            block_type: definition.block_type().to_string(),
            generator,
        })
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn signature(&self) -> GeneratorSignature {
        self.generator.signature()
    }

    pub fn generate(&self, block: &B) -> GeneratedCode {
        match &self.generator {
            CodeGenerator::Value(generate) => {
                let (code, precedence) = generate(block);
                GeneratedCode::Value { code, precedence }
            }
            CodeGenerator::Statement(generate) => GeneratedCode::Statement(generate(block)),
        }
    }
}
