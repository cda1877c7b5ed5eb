//! `SemanticError` (spec §7): undeclared identifier, redeclaration, type
//! mismatch, wrong argument count/type, malformed AST. Fatal - the analyzer
//! aborts at the first one. Message shape follows
//! `original_source/src/common/errors.py`'s `[Kind] message` convention,
//! extended with an optional ` @ line:column` suffix the way
//! `pasindo-lex::LexicalError`/`pasindo-par::SyntaxParseError` already do,
//! since spec §7 says all three error kinds carry a location "when
//! available".

use thiserror::Error;

fn loc_suffix(line: Option<u32>, column: Option<u32>) -> String {
    match (line, column) {
        (Some(l), Some(c)) => format!(" @ {l}:{c}"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("[SemanticError] undeclared identifier '{name}'{}", loc_suffix(*line, *column))]
    Undeclared {
        name: String,
        line: Option<u32>,
        column: Option<u32>,
    },

    #[error("[SemanticError] '{name}' is already declared in this scope{}", loc_suffix(*line, *column))]
    Redeclared {
        name: String,
        line: Option<u32>,
        column: Option<u32>,
    },

    #[error("[SemanticError] {detail}{}", loc_suffix(*line, *column))]
    TypeMismatch {
        detail: String,
        line: Option<u32>,
        column: Option<u32>,
    },

    #[error(
        "[SemanticError] '{name}' expects {expected} argument(s), but got {got}{}",
        loc_suffix(*line, *column)
    )]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
        line: Option<u32>,
        column: Option<u32>,
    },

    #[error("[SemanticError] malformed parse tree: {detail}")]
    MalformedNode { detail: String },
}

impl SemanticError {
    pub fn line(&self) -> Option<u32> {
        match self {
            SemanticError::Undeclared { line, .. }
            | SemanticError::Redeclared { line, .. }
            | SemanticError::TypeMismatch { line, .. }
            | SemanticError::ArityMismatch { line, .. } => *line,
            SemanticError::MalformedNode { .. } => None,
        }
    }

    pub fn column(&self) -> Option<u32> {
        match self {
            SemanticError::Undeclared { column, .. }
            | SemanticError::Redeclared { column, .. }
            | SemanticError::TypeMismatch { column, .. }
            | SemanticError::ArityMismatch { column, .. } => *column,
            SemanticError::MalformedNode { .. } => None,
        }
    }
}
