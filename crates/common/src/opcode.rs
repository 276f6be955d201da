//! The CSPC instruction set.
//!
//! Opcodes are the numbers 0 to 24. An instruction is one slot (the
//! opcode) or two slots (the opcode followed by an index into one of the
//! constant pools). [`Opcode::operand`] tells which.

use crate::error::DecodeError;
use crate::program::PoolKind;

/// Identifies the operation to perform.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Integer arithmetic
    /// Pop right, pop left, push `left + right`.
    Add = 0,
    /// Pop right, pop left, push `left - right`.
    Minus = 1,
    /// Pop right, pop left, push `left * right`.
    Times = 2,
    /// Pop right, pop left, push the floored quotient.
    Div = 3,
    /// Pop right, pop left, push the floored remainder.
    Mod = 4,

    // Integer comparison
    /// Pop right, pop left, push `Boolean(left > right)`.
    Gt = 5,
    /// Pop right, pop left, push `Boolean(left < right)`.
    Lt = 6,
    /// Pop right, pop left, push `Boolean(left == right)`.
    Eq = 7,
    /// Pop right, pop left, push `Boolean(left != right)`.
    Neq = 8,
    /// Pop right, pop left, push `Boolean(left >= right)`.
    Geq = 9,
    /// Pop right, pop left, push `Boolean(left <= right)`.
    Leq = 10,

    // I/O
    /// Pop a value and print it without a newline.
    PrintItem = 11,
    /// Print a newline.
    PrintNewline = 12,

    // Globals
    /// Pop a name, pop an integer, bind the name in the store.
    Store = 13,
    /// Push the stored integer named by a string-pool entry.
    LoadGlobal = 14,
    /// Push an integer-pool entry.
    LoadConst = 15,
    /// Push a string-pool entry.
    LoadName = 16,

    // Control flow
    /// Move forward by an integer-pool delta, counted from the operand slot.
    JumpForward = 17,
    /// Pop a boolean; jump to an integer-pool target if it is true.
    PopJumpIfTrue = 18,
    /// Pop a boolean; jump to an integer-pool target if it is false.
    PopJumpIfFalse = 19,
    /// Jump to an integer-pool target.
    JumpAbsolute = 20,

    // Functions (reserved; not executed)
    CallFunction = 21,
    LoadArg = 22,
    MakeFunction = 23,
    /// Stack no-op: pop and push back the top value.
    Return = 24,
}

/// All opcodes, in code order.
pub const ALL_OPCODES: [Opcode; 25] = [
    Opcode::Add,
    Opcode::Minus,
    Opcode::Times,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Gt,
    Opcode::Lt,
    Opcode::Eq,
    Opcode::Neq,
    Opcode::Geq,
    Opcode::Leq,
    Opcode::PrintItem,
    Opcode::PrintNewline,
    Opcode::Store,
    Opcode::LoadGlobal,
    Opcode::LoadConst,
    Opcode::LoadName,
    Opcode::JumpForward,
    Opcode::PopJumpIfTrue,
    Opcode::PopJumpIfFalse,
    Opcode::JumpAbsolute,
    Opcode::CallFunction,
    Opcode::LoadArg,
    Opcode::MakeFunction,
    Opcode::Return,
];

impl TryFrom<usize> for Opcode {
    type Error = DecodeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        ALL_OPCODES
            .get(value)
            .copied()
            .ok_or(DecodeError::UnknownOpcode(value))
    }
}

impl From<Opcode> for usize {
    fn from(op: Opcode) -> usize {
        op as u8 as usize
    }
}

impl Opcode {
    /// Look up an opcode by its exact (case-sensitive) mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Opcode> {
        ALL_OPCODES.iter().find(|op| op.mnemonic() == name).copied()
    }

    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Minus => "MINUS",
            Opcode::Times => "TIMES",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Gt => "GT",
            Opcode::Lt => "LT",
            Opcode::Eq => "EQ",
            Opcode::Neq => "NEQ",
            Opcode::Geq => "GEQ",
            Opcode::Leq => "LEQ",
            Opcode::PrintItem => "PRINT_ITEM",
            Opcode::PrintNewline => "PRINT_NEWLINE",
            Opcode::Store => "STORE",
            Opcode::LoadGlobal => "LOAD_GLOBAL",
            Opcode::LoadConst => "LOAD_CONST",
            Opcode::LoadName => "LOAD_NAME",
            Opcode::JumpForward => "JUMP_FORWARD",
            Opcode::PopJumpIfTrue => "POP_JUMP_IF_TRUE",
            Opcode::PopJumpIfFalse => "POP_JUMP_IF_FALSE",
            Opcode::JumpAbsolute => "JUMP_ABSOLUTE",
            Opcode::CallFunction => "CALL_FUNCTION",
            Opcode::LoadArg => "LOAD_ARG",
            Opcode::MakeFunction => "MAKE_FUNCTION",
            Opcode::Return => "RETURN",
        }
    }

    /// The pool indexed by this opcode's operand slot, or `None` if the
    /// opcode occupies a single slot.
    pub fn operand(&self) -> Option<PoolKind> {
        match self {
            Opcode::LoadGlobal
            | Opcode::LoadName
            | Opcode::CallFunction
            | Opcode::LoadArg => Some(PoolKind::Strings),

            Opcode::LoadConst
            | Opcode::JumpForward
            | Opcode::PopJumpIfTrue
            | Opcode::PopJumpIfFalse
            | Opcode::JumpAbsolute
            | Opcode::Return => Some(PoolKind::Integers),

            Opcode::Add
            | Opcode::Minus
            | Opcode::Times
            | Opcode::Div
            | Opcode::Mod
            | Opcode::Gt
            | Opcode::Lt
            | Opcode::Eq
            | Opcode::Neq
            | Opcode::Geq
            | Opcode::Leq
            | Opcode::PrintItem
            | Opcode::PrintNewline
            | Opcode::Store
            | Opcode::MakeFunction => None,
        }
    }

    /// Number of instruction slots this opcode occupies.
    pub fn width(&self) -> usize {
        if self.operand().is_some() {
            2
        } else {
            1
        }
    }
}
