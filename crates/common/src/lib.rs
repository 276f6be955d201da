//! CSPC common types and instruction encoding.
//!
//! This crate provides the data structures shared by the assembler and
//! the interpreter:
//!
//! - [`Opcode`] — the 25-entry instruction table
//! - [`Value`] — tagged runtime values and their integer arithmetic
//! - [`CodeBox`] — one function's instruction stream and constant pools
//! - [`Program`] — all functions of an assembled file, by name
//! - [`DecodeError`], [`PoolError`], [`ValueError`] — shared failures

pub mod error;
pub mod opcode;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, PoolError, ValueError};
pub use opcode::{Opcode, ALL_OPCODES};
pub use program::{CodeBox, PoolKind, Program, ENTRY_POINT};
pub use value::{BinaryOp, Value, ValueKind};
