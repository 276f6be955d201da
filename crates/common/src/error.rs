//! Errors shared by the assembler, disassembler and interpreter.

use crate::program::PoolKind;
use crate::value::ValueKind;
use thiserror::Error;

/// Errors that occur while decoding an instruction slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The slot holds a number that is not in the opcode table.
    #[error("no such opcode: {0}")]
    UnknownOpcode(usize),
}

/// A pool index that does not name an entry of its pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pool} pool index {index} out of range (length {len})")]
pub struct PoolError {
    /// The pool that was indexed.
    pub pool: PoolKind,
    /// The offending index.
    pub index: usize,
    /// Length of the pool at the time of the lookup.
    pub len: usize,
}

/// Errors produced by value-level arithmetic and comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// An operator was applied to a value of the wrong kind.
    #[error("{op} expects {expected}, found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    /// Integer division or modulo by zero.
    #[error("integer division by zero")]
    DivisionByZero,
}
