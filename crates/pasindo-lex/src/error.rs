//! Lexical error kinds (spec §7).
//!
//! A `LexicalError` is non-fatal: the lexer records one and keeps scanning
//! (spec §4.2's "one error per unmatched character, non-fatal"). The host
//! (`pasindo-drv`) decides whether to abort after scanning finishes.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexicalError {
    #[error("[LexicalError] unexpected character '{ch}' @ {line}:{column}")]
    UnexpectedChar { ch: char, line: u32, column: u32 },

    #[error("[LexicalError] unterminated string literal @ {line}:{column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("failed to read DFA rules file '{path}': {source}")]
    RulesIo { path: String, source: String },

    #[error("failed to parse DFA rules file '{path}': {source}")]
    RulesParse { path: String, source: String },
}

impl LexicalError {
    pub fn line(&self) -> Option<u32> {
        match self {
            LexicalError::UnexpectedChar { line, .. } => Some(*line),
            LexicalError::UnterminatedString { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub fn column(&self) -> Option<u32> {
        match self {
            LexicalError::UnexpectedChar { column, .. } => Some(*column),
            LexicalError::UnterminatedString { column, .. } => Some(*column),
            _ => None,
        }
    }
}
