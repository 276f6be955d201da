//! Runtime value representation for the CSPC VM.
//!
//! Values are what live on the operand stack. Arithmetic and comparison
//! are defined on integers only; every other pairing is a
//! [`ValueError::TypeMismatch`].

use std::fmt;

use crate::error::ValueError;
use crate::opcode::Opcode;

/// A value on the operand stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i64),
    String(String),
    Boolean(bool),
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    String,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "Integer",
            ValueKind::String => "String",
            ValueKind::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

/// Literal textual form, as written by `PRINT_ITEM`. Strings are not quoted
/// and booleans use their source spelling.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
        }
    }
}

/// A two-operand integer instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Minus,
    Times,
    Div,
    Mod,
    Gt,
    Lt,
    Eq,
    Neq,
    Geq,
    Leq,
}

impl BinaryOp {
    /// Returns the binary operation executed by `op`, if it is one.
    pub fn from_opcode(op: Opcode) -> Option<BinaryOp> {
        match op {
            Opcode::Add => Some(BinaryOp::Add),
            Opcode::Minus => Some(BinaryOp::Minus),
            Opcode::Times => Some(BinaryOp::Times),
            Opcode::Div => Some(BinaryOp::Div),
            Opcode::Mod => Some(BinaryOp::Mod),
            Opcode::Gt => Some(BinaryOp::Gt),
            Opcode::Lt => Some(BinaryOp::Lt),
            Opcode::Eq => Some(BinaryOp::Eq),
            Opcode::Neq => Some(BinaryOp::Neq),
            Opcode::Geq => Some(BinaryOp::Geq),
            Opcode::Leq => Some(BinaryOp::Leq),
            _ => None,
        }
    }

    /// The mnemonic of the instruction that performs this operation.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Minus => "MINUS",
            BinaryOp::Times => "TIMES",
            BinaryOp::Div => "DIV",
            BinaryOp::Mod => "MOD",
            BinaryOp::Gt => "GT",
            BinaryOp::Lt => "LT",
            BinaryOp::Eq => "EQ",
            BinaryOp::Neq => "NEQ",
            BinaryOp::Geq => "GEQ",
            BinaryOp::Leq => "LEQ",
        }
    }

    /// True for the six comparisons, which produce a boolean.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Gt
                | BinaryOp::Lt
                | BinaryOp::Eq
                | BinaryOp::Neq
                | BinaryOp::Geq
                | BinaryOp::Leq
        )
    }
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Apply `op` with `self` as the left operand and `rhs` as the right.
    ///
    /// Arithmetic wraps on overflow. `DIV` and `MOD` round towards negative
    /// infinity, so the remainder takes the sign of the divisor.
    pub fn binary(self, op: BinaryOp, rhs: Value) -> Result<Value, ValueError> {
        let (l, r) = match (self, rhs) {
            (Value::Integer(l), Value::Integer(r)) => (l, r),
            (Value::Integer(_), other) | (other, _) => {
                return Err(ValueError::TypeMismatch {
                    op: op.mnemonic(),
                    expected: ValueKind::Integer,
                    found: other.kind(),
                })
            }
        };

        let result = match op {
            BinaryOp::Add => Value::Integer(l.wrapping_add(r)),
            BinaryOp::Minus => Value::Integer(l.wrapping_sub(r)),
            BinaryOp::Times => Value::Integer(l.wrapping_mul(r)),
            BinaryOp::Div => Value::Integer(floor_div(l, r)?),
            BinaryOp::Mod => Value::Integer(floor_mod(l, r)?),
            BinaryOp::Gt => Value::Boolean(l > r),
            BinaryOp::Lt => Value::Boolean(l < r),
            BinaryOp::Eq => Value::Boolean(l == r),
            BinaryOp::Neq => Value::Boolean(l != r),
            BinaryOp::Geq => Value::Boolean(l >= r),
            BinaryOp::Leq => Value::Boolean(l <= r),
        };
        Ok(result)
    }
}

fn floor_div(l: i64, r: i64) -> Result<i64, ValueError> {
    if r == 0 {
        return Err(ValueError::DivisionByZero);
    }
    let q = l.wrapping_div(r);
    if l.wrapping_rem(r) != 0 && ((l < 0) != (r < 0)) {
        Ok(q.wrapping_sub(1))
    } else {
        Ok(q)
    }
}

fn floor_mod(l: i64, r: i64) -> Result<i64, ValueError> {
    if r == 0 {
        return Err(ValueError::DivisionByZero);
    }
    let m = l.wrapping_rem(r);
    if m != 0 && ((m < 0) != (r < 0)) {
        Ok(m + r)
    } else {
        Ok(m)
    }
}
