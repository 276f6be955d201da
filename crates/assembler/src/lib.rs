//! CSPC assembler: mnemonic text → [`Program`], and back to a listing.
//!
//! # Usage
//!
//! ```
//! use cspc_assembler::{assemble, disassemble};
//!
//! let program = assemble("DEF main LOAD_CONST 10 LOAD_CONST 20 ADD ENDDEF").unwrap();
//! let main = program.main().unwrap();
//! assert_eq!(main.bytecode, vec![15, 0, 15, 1, 0]);
//! assert_eq!(main.integers, vec![10, 20]);
//!
//! let listing = disassemble(main).unwrap();
//! assert!(listing.contains("0:\tLOAD_CONST 0\t(10)"));
//! ```
//!
//! # Source format
//!
//! Lines whose trimmed text starts with `#` are comments. Everything else
//! is split on whitespace into one token stream. Functions are delimited by
//! `DEF <name>` and `ENDDEF`; tokens outside a function are ignored.
//! Inside a function each token becomes one slot: opcode names become
//! their code, and literals are appended to the integer, boolean or string
//! pool with the new pool index as the slot value.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::{AsmError, DisasmError};

use cspc_common::{CodeBox, Program};

/// Assemble source text into a program.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let tokens = lexer::tokenize(text);
    parser::parse(&tokens)
}

/// List one function's instructions and pools.
pub fn disassemble(code: &CodeBox) -> Result<String, DisasmError> {
    disassembler::disassemble(code)
}

/// List every function of a program.
pub fn disassemble_program(program: &Program) -> Result<String, DisasmError> {
    disassembler::disassemble_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cspc_common::Opcode;

    #[test]
    fn assemble_minimal() {
        let program = assemble("DEF main PRINT_NEWLINE ENDDEF").unwrap();
        let main = program.main().unwrap();
        assert_eq!(main.bytecode, vec![usize::from(Opcode::PrintNewline)]);
        assert!(main.integers.is_empty());
    }

    #[test]
    fn assemble_with_comments() {
        let text = "\
# A comment
DEF main
    # another
    LOAD_CONST 1
    PRINT_ITEM
ENDDEF
";
        let program = assemble(text).unwrap();
        assert_eq!(program.main().unwrap().bytecode, vec![15, 0, 11]);
    }

    #[test]
    fn assemble_empty_text() {
        assert!(assemble("").unwrap().is_empty());
    }

    #[test]
    fn listing_of_assembled_program() {
        let program = assemble("DEF main LOAD_NAME x ENDDEF").unwrap();
        let text = disassemble_program(&program).unwrap();
        assert!(text.contains("0:\tLOAD_NAME 0\t(x)"));
    }
}
