//! Main execution loop and opcode dispatch for the CSPC VM.

use std::io::Write;

use crate::error::RuntimeError;
use crate::machine::{Halted, VM};
use cspc_common::{BinaryOp, Opcode, PoolError, Value, ValueError};
use log::trace;

impl<'a, W: Write> VM<'a, W> {
    /// Run until the program counter leaves the instruction stream.
    pub fn execute(mut self) -> Result<Halted, RuntimeError> {
        while self.pc < self.code.len() {
            if let Some(limit) = self.config.step_limit {
                if self.steps >= limit {
                    return Err(RuntimeError::StepLimitExceeded { at: self.pc, limit });
                }
            }
            self.trace_step();

            let op = self.fetch()?;
            trace!("{:>4}: {}", self.pc, op.mnemonic());
            self.pc = self.dispatch(op)?;
            self.steps += 1;
        }

        self.trace_halt();
        self.out.flush().map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        })?;

        Ok(Halted {
            stack: self.stack,
            store: self.store,
        })
    }

    /// Execute the instruction at `self.pc` and return the address of the
    /// next instruction to examine.
    fn dispatch(&mut self, op: Opcode) -> Result<usize, RuntimeError> {
        let at = self.pc;
        let code = self.code;

        match op {
            // Integer arithmetic
            Opcode::Add => self.exec_binary(BinaryOp::Add)?,
            Opcode::Minus => self.exec_binary(BinaryOp::Minus)?,
            Opcode::Times => self.exec_binary(BinaryOp::Times)?,
            Opcode::Div => self.exec_binary(BinaryOp::Div)?,
            Opcode::Mod => self.exec_binary(BinaryOp::Mod)?,

            // Integer comparison
            Opcode::Gt => self.exec_binary(BinaryOp::Gt)?,
            Opcode::Lt => self.exec_binary(BinaryOp::Lt)?,
            Opcode::Eq => self.exec_binary(BinaryOp::Eq)?,
            Opcode::Neq => self.exec_binary(BinaryOp::Neq)?,
            Opcode::Geq => self.exec_binary(BinaryOp::Geq)?,
            Opcode::Leq => self.exec_binary(BinaryOp::Leq)?,

            // I/O
            Opcode::PrintItem => {
                let value = self.pop()?;
                self.emit(format_args!("{value}"))?;
            }
            Opcode::PrintNewline => self.emit(format_args!("\n"))?,

            // Globals
            Opcode::Store => {
                let name = self.pop_string(op)?;
                let literal = self.pop_integer(op)?;
                self.store.set(name, literal);
            }
            Opcode::LoadGlobal => {
                let index = self.operand(op)?;
                let name = code.string(index).map_err(|e| self.pool_error(e))?;
                let value = self
                    .store
                    .get(name)
                    .ok_or_else(|| RuntimeError::UndefinedGlobal {
                        at,
                        name: name.to_string(),
                    })?;
                self.push(Value::Integer(value))?;
                return Ok(at + 2);
            }
            Opcode::LoadConst => {
                let value = self.integer_operand(op)?;
                self.push(Value::Integer(value))?;
                return Ok(at + 2);
            }
            Opcode::LoadName => {
                let index = self.operand(op)?;
                let name = code.string(index).map_err(|e| self.pool_error(e))?;
                self.push(Value::String(name.to_string()))?;
                return Ok(at + 2);
            }

            // Control flow
            Opcode::JumpForward => {
                let delta = self.integer_operand(op)?;
                return self.jump_target((at as i64 + 1).saturating_add(delta));
            }
            Opcode::PopJumpIfTrue | Opcode::PopJumpIfFalse => {
                let target = self.integer_operand(op)?;
                let condition = self.pop_boolean(op)?;
                if condition == (op == Opcode::PopJumpIfTrue) {
                    return self.jump_target(target);
                }
                return Ok(at + 2);
            }
            Opcode::JumpAbsolute => {
                let target = self.integer_operand(op)?;
                return self.jump_target(target);
            }

            // Functions
            Opcode::Return => {
                let value = self.pop()?;
                self.push(value)?;
                return Ok(at + 2);
            }
            Opcode::CallFunction | Opcode::LoadArg | Opcode::MakeFunction => {
                return Err(RuntimeError::Unsupported {
                    at,
                    opcode: op.mnemonic(),
                });
            }
        }

        Ok(at + 1)
    }

    /// Pop right, then left; push `left <op> right`.
    fn exec_binary(&mut self, op: BinaryOp) -> Result<(), RuntimeError> {
        let right = self.pop()?;
        let left = self.pop()?;

        let result = left.binary(op, right).map_err(|e| match e {
            ValueError::TypeMismatch {
                op,
                expected,
                found,
            } => RuntimeError::TypeMismatch {
                at: self.pc,
                op,
                expected,
                found,
            },
            ValueError::DivisionByZero => RuntimeError::DivisionByZero { at: self.pc },
        })?;

        self.push(result)
    }

    /// Resolve the integer-pool operand of the instruction at `self.pc`.
    fn integer_operand(&self, op: Opcode) -> Result<i64, RuntimeError> {
        let index = self.operand(op)?;
        self.code.integer(index).map_err(|e| self.pool_error(e))
    }

    fn jump_target(&self, target: i64) -> Result<usize, RuntimeError> {
        usize::try_from(target).map_err(|_| RuntimeError::JumpOutOfRange {
            at: self.pc,
            target,
        })
    }

    fn pool_error(&self, source: PoolError) -> RuntimeError {
        RuntimeError::Pool {
            at: self.pc,
            source,
        }
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) -> Result<(), RuntimeError> {
        self.out.write_fmt(args).map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        })
    }
}
