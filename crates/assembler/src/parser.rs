//! Pool builder: tokens → one [`CodeBox`] per `DEF … ENDDEF` block.

use crate::error::AsmError;
use crate::lexer::Token;
use cspc_common::{CodeBox, Opcode, Program};
use log::debug;

const DEF: &str = "DEF";
const ENDDEF: &str = "ENDDEF";

/// What a single token inside a function body denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Word<'a> {
    Op(Opcode),
    Integer(i64),
    Boolean(bool),
    Str(&'a str),
}

/// Classify one body token. Opcode names win over literals, digit runs
/// are integers, `True`/`False` are booleans, anything else is a string.
pub(crate) fn classify<'a>(token: &Token<'a>) -> Result<Word<'a>, AsmError> {
    let text = token.text;

    if let Some(op) = Opcode::from_mnemonic(text) {
        return Ok(Word::Op(op));
    }

    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        let value = text.parse::<i64>().map_err(|_| AsmError::IntegerOutOfRange {
            line: token.line,
            token: text.to_string(),
        })?;
        return Ok(Word::Integer(value));
    }

    match text {
        "True" => Ok(Word::Boolean(true)),
        "False" => Ok(Word::Boolean(false)),
        _ => Ok(Word::Str(text)),
    }
}

/// Build a program from the flat token sequence.
///
/// Tokens outside `DEF … ENDDEF` are ignored.
pub(crate) fn parse(tokens: &[Token<'_>]) -> Result<Program, AsmError> {
    let mut program = Program::new();
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if token.text != DEF {
            continue;
        }

        let name = iter
            .next()
            .ok_or(AsmError::MissingFunctionName { line: token.line })?
            .text;
        let mut code = CodeBox::default();

        loop {
            let body = iter.next().ok_or_else(|| AsmError::UnterminatedFunction {
                name: name.to_string(),
                line: token.line,
            })?;

            match body.text {
                ENDDEF => break,
                DEF => {
                    return Err(AsmError::NestedFunction {
                        name: name.to_string(),
                        line: body.line,
                    })
                }
                _ => {}
            }

            let slot = match classify(body)? {
                Word::Op(op) => usize::from(op),
                Word::Integer(n) => code.push_integer(n),
                Word::Boolean(b) => code.push_boolean(b),
                Word::Str(s) => code.push_string(s),
            };
            code.bytecode.push(slot);
        }

        debug!(
            "assembled '{name}': {} slots, {} integers, {} strings, {} booleans",
            code.len(),
            code.integers.len(),
            code.strings.len(),
            code.booleans.len()
        );
        program.insert(name, code);
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn tok(text: &str) -> Token<'_> {
        Token { text, line: 1 }
    }

    #[test]
    fn classify_opcode() {
        assert_eq!(classify(&tok("LOAD_CONST")), Ok(Word::Op(Opcode::LoadConst)));
    }

    #[test]
    fn classify_integer() {
        assert_eq!(classify(&tok("0")), Ok(Word::Integer(0)));
        assert_eq!(classify(&tok("007")), Ok(Word::Integer(7)));
    }

    #[test]
    fn classify_signed_text_is_string() {
        assert_eq!(classify(&tok("-5")), Ok(Word::Str("-5")));
        assert_eq!(classify(&tok("+5")), Ok(Word::Str("+5")));
        assert_eq!(classify(&tok("1x")), Ok(Word::Str("1x")));
    }

    #[test]
    fn classify_booleans() {
        assert_eq!(classify(&tok("True")), Ok(Word::Boolean(true)));
        assert_eq!(classify(&tok("False")), Ok(Word::Boolean(false)));
        assert_eq!(classify(&tok("true")), Ok(Word::Str("true")));
    }

    #[test]
    fn classify_lowercase_mnemonic_is_string() {
        assert_eq!(classify(&tok("add")), Ok(Word::Str("add")));
    }

    #[test]
    fn classify_huge_integer() {
        assert_eq!(
            classify(&Token {
                text: "92233720368547758070",
                line: 9
            }),
            Err(AsmError::IntegerOutOfRange {
                line: 9,
                token: "92233720368547758070".to_string(),
            })
        );
    }

    #[test]
    fn parse_ignores_tokens_outside_blocks() {
        let program = parse(&tokenize("ADD 5 DEF main ADD ENDDEF MINUS")).unwrap();
        assert_eq!(program.len(), 1);
        assert_eq!(program.main().unwrap().bytecode, vec![0]);
    }

    #[test]
    fn parse_empty_body() {
        let program = parse(&tokenize("DEF main ENDDEF")).unwrap();
        assert!(program.main().unwrap().is_empty());
    }

    #[test]
    fn parse_missing_name() {
        assert_eq!(
            parse(&tokenize("\nDEF")),
            Err(AsmError::MissingFunctionName { line: 2 })
        );
    }

    #[test]
    fn parse_unterminated() {
        assert_eq!(
            parse(&tokenize("DEF main\nADD")),
            Err(AsmError::UnterminatedFunction {
                name: "main".to_string(),
                line: 1,
            })
        );
    }

    #[test]
    fn parse_nested() {
        assert_eq!(
            parse(&tokenize("DEF main\nDEF inner ENDDEF\nENDDEF")),
            Err(AsmError::NestedFunction {
                name: "main".to_string(),
                line: 2,
            })
        );
    }
}
