//! Disassembler: code box → human-readable listing.
//!
//! Every instruction gets one line with its address and mnemonic. Operand
//! slots are shown as the pool index followed by the literal it resolves
//! to. The three pools are dumped after the code.

use std::fmt::Write;

use crate::error::DisasmError;
use cspc_common::{CodeBox, Opcode, PoolKind, Program, Value};

/// List one function.
pub fn disassemble(code: &CodeBox) -> Result<String, DisasmError> {
    let mut out = String::from("CODE\n");
    let mut pc = 0;

    while pc < code.len() {
        let at = pc;
        let op = Opcode::try_from(code.bytecode[pc])
            .map_err(|source| DisasmError::Decode { at, source })?;

        match op.operand() {
            None => {
                let _ = writeln!(out, "{at}:\t{}", op.mnemonic());
            }
            Some(pool) => {
                pc += 1;
                let index = *code.bytecode.get(pc).ok_or(DisasmError::MissingOperand {
                    at,
                    opcode: op.mnemonic(),
                })?;
                let literal = resolve(code, pool, index)
                    .map_err(|source| DisasmError::Pool { at, source })?;
                let _ = writeln!(out, "{at}:\t{} {index}\t({literal})", op.mnemonic());
            }
        }
        pc += 1;
    }

    out.push('\n');
    out.push_str("DATA:\n");
    let _ = writeln!(out, "\tIntegers: {:?}", code.integers);
    let _ = writeln!(out, "\tStrings: {:?}", code.strings);
    let _ = writeln!(out, "\tBools: {:?}", code.booleans);
    Ok(out)
}

/// List every function of a program, each wrapped in `DEF`/`ENDDEF`.
pub fn disassemble_program(program: &Program) -> Result<String, DisasmError> {
    let mut out = String::new();
    for (name, code) in program.functions() {
        let _ = writeln!(out, "DEF {name}");
        out.push_str(&disassemble(code)?);
        out.push_str("ENDDEF\n");
    }
    Ok(out)
}

fn resolve(code: &CodeBox, pool: PoolKind, index: usize) -> Result<String, cspc_common::PoolError> {
    match pool {
        PoolKind::Integers => code.integer(index).map(|n| n.to_string()),
        PoolKind::Strings => code.string(index).map(str::to_string),
        PoolKind::Booleans => code.boolean(index).map(|b| Value::Boolean(b).to_string()),
    }
}
