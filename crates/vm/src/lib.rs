//! CSPC virtual machine — executes the `main` function of an assembled
//! program.
//!
//! The VM is a stack machine with:
//! - an operand stack of tagged [`Value`]s
//! - a global [`Store`] of name → integer bindings
//! - a program counter into one flat instruction stream
//!
//! # Usage
//!
//! ```
//! use cspc_assembler::assemble;
//! use cspc_common::Value;
//! use cspc_vm::VM;
//!
//! let program = assemble("DEF main LOAD_CONST 4 LOAD_CONST 5 TIMES ENDDEF").unwrap();
//! let mut out = Vec::new();
//! let halted = VM::new(program.main().unwrap(), &mut out).execute().unwrap();
//! assert_eq!(halted.stack, vec![Value::Integer(20)]);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod store;
pub mod trace;

pub use config::VmConfig;
pub use error::RuntimeError;
pub use machine::{Halted, VM};
pub use store::Store;
pub use trace::{LogTracer, RecordingTracer, Snapshot, Tracer};

use std::io;

use cspc_common::{Program, Value};

/// Execute `main`, printing to stdout, with no limits and no tracing.
///
/// # Errors
///
/// Returns [`RuntimeError::MissingMain`] if the program has no `main`,
/// otherwise the first error raised during execution.
pub fn run(program: &Program) -> Result<Halted, RuntimeError> {
    run_with(program, io::stdout(), VmConfig::default(), None)
}

/// Execute `main` with an explicit output, configuration and tracer.
pub fn run_with<W: io::Write>(
    program: &Program,
    out: W,
    config: VmConfig,
    tracer: Option<&mut dyn Tracer>,
) -> Result<Halted, RuntimeError> {
    let code = program.main().ok_or(RuntimeError::MissingMain)?;
    let vm = VM::new(code, out).with_config(config);
    match tracer {
        Some(tracer) => vm.with_tracer(tracer).execute(),
        None => vm.execute(),
    }
}

/// Convenience for tests and tools: run `main` and capture what it prints.
pub fn run_captured(program: &Program) -> Result<(Halted, String), RuntimeError> {
    let mut out = Vec::new();
    let halted = run_with(program, &mut out, VmConfig::default(), None)?;
    Ok((halted, String::from_utf8_lossy(&out).into_owned()))
}

/// Render a stack the way the trace does: `[1, x, True]`.
pub fn format_stack(stack: &[Value]) -> String {
    let items: Vec<String> = stack.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspc_common::CodeBox;

    #[test]
    fn missing_main() {
        let mut program = Program::new();
        program.insert("other", CodeBox::default());
        assert_eq!(run_captured(&program), Err(RuntimeError::MissingMain));
    }

    #[test]
    fn format_stack_renders_literals() {
        let stack = vec![
            Value::Integer(1),
            Value::String("x".into()),
            Value::Boolean(true),
        ];
        assert_eq!(format_stack(&stack), "[1, x, True]");
    }
}
