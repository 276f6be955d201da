//! Runtime errors for the CSPC VM.
//!
//! Every error raised while the program counter is valid carries the
//! address (`at`) of the instruction that failed.

use cspc_common::{DecodeError, PoolError, ValueKind};
use thiserror::Error;

/// Errors that abort an interpreter run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The program has no function called `main`.
    #[error("program has no 'main' function")]
    MissingMain,

    /// A slot in opcode position is not in the opcode table.
    #[error("{source} at instruction {at}")]
    Decode { at: usize, source: DecodeError },

    /// Pop on an empty stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// Push beyond the configured stack depth.
    #[error("stack overflow (limit {limit}) at instruction {at}")]
    StackOverflow { at: usize, limit: usize },

    /// An operand had the wrong kind.
    #[error("{op} expects {expected}, found {found} at instruction {at}")]
    TypeMismatch {
        at: usize,
        op: &'static str,
        expected: ValueKind,
        found: ValueKind,
    },

    /// DIV or MOD with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// LOAD_GLOBAL of a name that was never stored.
    #[error("undefined global '{name}' at instruction {at}")]
    UndefinedGlobal { at: usize, name: String },

    /// An operand slot indexes past the end of its pool.
    #[error("{source} at instruction {at}")]
    Pool { at: usize, source: PoolError },

    /// The stream ends where an operand slot was expected.
    #[error("{opcode} is missing its operand at instruction {at}")]
    MissingOperand { at: usize, opcode: &'static str },

    /// A jump resolved to a negative address.
    #[error("jump target {target} out of range at instruction {at}")]
    JumpOutOfRange { at: usize, target: i64 },

    /// A reserved function opcode was dispatched.
    #[error("{opcode} is not supported at instruction {at}")]
    Unsupported { at: usize, opcode: &'static str },

    /// The configured step limit was reached.
    #[error("step limit {limit} exceeded at instruction {at}")]
    StepLimitExceeded { at: usize, limit: u64 },

    /// Writing program output failed.
    #[error("output error at instruction {at}: {message}")]
    Output { at: usize, message: String },
}
