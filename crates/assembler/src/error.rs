//! Error types for the CSPC assembler and disassembler.

use cspc_common::{DecodeError, PoolError};
use thiserror::Error;

/// Errors produced while assembling text into a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// `DEF` was the last token of the input.
    #[error("line {line}: DEF without a function name")]
    MissingFunctionName { line: usize },

    /// The input ended inside a function body.
    #[error("line {line}: function '{name}' has no ENDDEF")]
    UnterminatedFunction { name: String, line: usize },

    /// `DEF` appeared inside another function body.
    #[error("line {line}: DEF inside function '{name}' (nested functions are not supported)")]
    NestedFunction { name: String, line: usize },

    /// A digit sequence does not fit in a signed 64-bit integer.
    #[error("line {line}: integer literal '{token}' out of range")]
    IntegerOutOfRange { line: usize, token: String },
}

/// Errors produced while listing an instruction stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisasmError {
    /// A slot in opcode position holds an unknown number.
    #[error("address {at}: {source}")]
    Decode { at: usize, source: DecodeError },

    /// An operand slot indexes past the end of its pool.
    #[error("address {at}: {source}")]
    Pool { at: usize, source: PoolError },

    /// The stream ends where an operand slot was expected.
    #[error("address {at}: {opcode} is missing its operand")]
    MissingOperand { at: usize, opcode: &'static str },
}
