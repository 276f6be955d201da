//! Tokenizer for CSPC bytecode text.

/// A whitespace-delimited word and the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub text: &'a str,
    /// 1-based source line.
    pub line: usize,
}

/// Split source text into one flat token sequence.
///
/// A line whose trimmed form starts with `#` is a comment and contributes
/// nothing. Line boundaries are otherwise insignificant.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }
        tokens.extend(trimmed.split_whitespace().map(|word| Token {
            text: word,
            line: idx + 1,
        }));
    }

    tokens
}
