//! Assembled program representation.
//!
//! A [`Program`] maps function names to [`CodeBox`]es. Each code box owns
//! a flat instruction stream and the three constant pools its operand
//! slots index into.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::PoolError;

/// Name of the function the interpreter executes.
pub const ENTRY_POINT: &str = "main";

/// Identifies one of the three constant pools of a [`CodeBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Integers,
    Strings,
    Booleans,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolKind::Integers => "integer",
            PoolKind::Strings => "string",
            PoolKind::Booleans => "boolean",
        };
        f.write_str(name)
    }
}

/// One assembled function: instruction stream plus constant pools.
///
/// Pools are append-only and never deduplicated, so every literal in the
/// source owns exactly one pool slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBox {
    /// Opcodes and pool indices, interleaved.
    pub bytecode: Vec<usize>,
    pub integers: Vec<i64>,
    pub strings: Vec<String>,
    pub booleans: Vec<bool>,
}

impl CodeBox {
    /// Create a code box from its parts.
    pub fn new(
        bytecode: Vec<usize>,
        integers: Vec<i64>,
        strings: Vec<String>,
        booleans: Vec<bool>,
    ) -> Self {
        Self {
            bytecode,
            integers,
            strings,
            booleans,
        }
    }

    /// Append an integer literal, returning its pool index.
    pub fn push_integer(&mut self, value: i64) -> usize {
        self.integers.push(value);
        self.integers.len() - 1
    }

    /// Append a string literal, returning its pool index.
    pub fn push_string(&mut self, value: impl Into<String>) -> usize {
        self.strings.push(value.into());
        self.strings.len() - 1
    }

    /// Append a boolean literal, returning its pool index.
    pub fn push_boolean(&mut self, value: bool) -> usize {
        self.booleans.push(value);
        self.booleans.len() - 1
    }

    pub fn integer(&self, index: usize) -> Result<i64, PoolError> {
        self.integers
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(PoolKind::Integers, index))
    }

    pub fn string(&self, index: usize) -> Result<&str, PoolError> {
        self.strings
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.out_of_range(PoolKind::Strings, index))
    }

    pub fn boolean(&self, index: usize) -> Result<bool, PoolError> {
        self.booleans
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(PoolKind::Booleans, index))
    }

    /// Number of instruction slots.
    pub fn len(&self) -> usize {
        self.bytecode.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytecode.is_empty()
    }

    /// Length of the given pool.
    pub fn pool_len(&self, pool: PoolKind) -> usize {
        match pool {
            PoolKind::Integers => self.integers.len(),
            PoolKind::Strings => self.strings.len(),
            PoolKind::Booleans => self.booleans.len(),
        }
    }

    fn out_of_range(&self, pool: PoolKind, index: usize) -> PoolError {
        PoolError {
            pool,
            index,
            len: self.pool_len(pool),
        }
    }
}

/// A whole assembled file: one [`CodeBox`] per `DEF`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    functions: BTreeMap<String, CodeBox>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function, replacing any earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, code: CodeBox) -> Option<CodeBox> {
        self.functions.insert(name.into(), code)
    }

    pub fn get(&self, name: &str) -> Option<&CodeBox> {
        self.functions.get(name)
    }

    /// The function the interpreter runs, if defined.
    pub fn main(&self) -> Option<&CodeBox> {
        self.get(ENTRY_POINT)
    }

    /// Function names in sorted order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// `(name, code)` pairs in name order.
    pub fn functions(&self) -> impl Iterator<Item = (&str, &CodeBox)> {
        self.functions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromIterator<(String, CodeBox)> for Program {
    fn from_iter<I: IntoIterator<Item = (String, CodeBox)>>(iter: I) -> Self {
        Self {
            functions: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_do_not_deduplicate() {
        let mut code = CodeBox::default();
        assert_eq!(code.push_integer(7), 0);
        assert_eq!(code.push_integer(7), 1);
        assert_eq!(code.push_string("x"), 0);
        assert_eq!(code.push_string("x"), 1);
        assert_eq!(code.push_boolean(true), 0);
        assert_eq!(code.integers, vec![7, 7]);
        assert_eq!(code.strings, vec!["x", "x"]);
    }

    #[test]
    fn pool_lookup() {
        let code = CodeBox::new(vec![], vec![10, 20], vec!["n".into()], vec![false]);
        assert_eq!(code.integer(1), Ok(20));
        assert_eq!(code.string(0), Ok("n"));
        assert_eq!(code.boolean(0), Ok(false));
    }

    #[test]
    fn pool_lookup_out_of_range() {
        let code = CodeBox::new(vec![], vec![10], vec![], vec![]);
        assert_eq!(
            code.integer(3),
            Err(PoolError {
                pool: PoolKind::Integers,
                index: 3,
                len: 1,
            })
        );
        assert_eq!(
            code.string(0),
            Err(PoolError {
                pool: PoolKind::Strings,
                index: 0,
                len: 0,
            })
        );
        assert!(code.boolean(0).is_err());
    }

    #[test]
    fn program_lookup() {
        let mut program = Program::new();
        assert!(program.is_empty());
        assert!(program.main().is_none());

        program.insert("main", CodeBox::new(vec![12], vec![], vec![], vec![]));
        program.insert("helper", CodeBox::default());
        assert_eq!(program.len(), 2);
        assert_eq!(program.main().map(CodeBox::len), Some(1));
        assert_eq!(
            program.function_names().collect::<Vec<_>>(),
            vec!["helper", "main"]
        );
    }

    #[test]
    fn redefinition_replaces() {
        let mut program = Program::new();
        program.insert("main", CodeBox::new(vec![0], vec![], vec![], vec![]));
        let old = program.insert("main", CodeBox::new(vec![1], vec![], vec![], vec![]));
        assert_eq!(old.map(|c| c.bytecode), Some(vec![0]));
        assert_eq!(program.main().map(|c| c.bytecode.clone()), Some(vec![1]));
    }
}
