//! VM state management: operand stack, global store, program counter.

use std::io::Write;

use crate::config::VmConfig;
use crate::error::RuntimeError;
use crate::store::Store;
use crate::trace::{Snapshot, Tracer};
use cspc_common::{CodeBox, Opcode, Value, ValueKind};

/// Final state of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Halted {
    /// Operand stack, bottom first.
    pub stack: Vec<Value>,
    pub store: Store,
}

/// The CSPC virtual machine, executing one code box.
pub struct VM<'a, W: Write> {
    /// The instruction stream and pools being executed.
    pub(crate) code: &'a CodeBox,
    /// Operand stack.
    pub(crate) stack: Vec<Value>,
    /// Global store.
    pub(crate) store: Store,
    /// Address of the next instruction.
    pub(crate) pc: usize,
    /// Instructions dispatched so far.
    pub(crate) steps: u64,
    pub(crate) config: VmConfig,
    /// Destination of PRINT_ITEM / PRINT_NEWLINE.
    pub(crate) out: W,
    pub(crate) tracer: Option<&'a mut dyn Tracer>,
}

impl<'a, W: Write> VM<'a, W> {
    /// Create a VM that prints to `out`.
    pub fn new(code: &'a CodeBox, out: W) -> Self {
        Self {
            code,
            stack: Vec::new(),
            store: Store::new(),
            pc: 0,
            steps: 0,
            config: VmConfig::default(),
            out,
            tracer: None,
        }
    }

    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    /// Report a snapshot to `tracer` before every instruction.
    pub fn with_tracer(mut self, tracer: &'a mut dyn Tracer) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Push a value onto the stack, checking the configured depth.
    pub(crate) fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
        if let Some(limit) = self.config.max_stack_depth {
            if self.stack.len() >= limit {
                return Err(RuntimeError::StackOverflow { at: self.pc, limit });
            }
        }
        self.stack.push(value);
        Ok(())
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.pc })
    }

    pub(crate) fn pop_integer(&mut self, op: Opcode) -> Result<i64, RuntimeError> {
        match self.pop()? {
            Value::Integer(n) => Ok(n),
            other => Err(self.mismatch(op, ValueKind::Integer, &other)),
        }
    }

    pub(crate) fn pop_string(&mut self, op: Opcode) -> Result<String, RuntimeError> {
        match self.pop()? {
            Value::String(s) => Ok(s),
            other => Err(self.mismatch(op, ValueKind::String, &other)),
        }
    }

    pub(crate) fn pop_boolean(&mut self, op: Opcode) -> Result<bool, RuntimeError> {
        match self.pop()? {
            Value::Boolean(b) => Ok(b),
            other => Err(self.mismatch(op, ValueKind::Boolean, &other)),
        }
    }

    fn mismatch(&self, op: Opcode, expected: ValueKind, found: &Value) -> RuntimeError {
        RuntimeError::TypeMismatch {
            at: self.pc,
            op: op.mnemonic(),
            expected,
            found: found.kind(),
        }
    }

    /// Decode the opcode at the current pc.
    pub(crate) fn fetch(&self) -> Result<Opcode, RuntimeError> {
        Opcode::try_from(self.code.bytecode[self.pc])
            .map_err(|source| RuntimeError::Decode { at: self.pc, source })
    }

    /// Read the operand slot of the instruction at the current pc.
    pub(crate) fn operand(&self, op: Opcode) -> Result<usize, RuntimeError> {
        self.code
            .bytecode
            .get(self.pc + 1)
            .copied()
            .ok_or(RuntimeError::MissingOperand {
                at: self.pc,
                opcode: op.mnemonic(),
            })
    }

    pub(crate) fn trace_step(&mut self) {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.step(&Snapshot {
                pc: self.pc,
                len: self.code.len(),
                stack: &self.stack,
                store: &self.store,
            });
        }
    }

    pub(crate) fn trace_halt(&mut self) {
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.halt(&Snapshot {
                pc: self.pc,
                len: self.code.len(),
                stack: &self.stack,
                store: &self.store,
            });
        }
    }

    /// Current operand stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn pc(&self) -> usize {
        self.pc
    }
}
