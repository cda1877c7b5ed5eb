//! Driver-level errors (spec §6, §7).
//!
//! Every compiler error eventually crosses a phase boundary as a value
//! (spec §7's "errors are values during collection and are raised at a
//! single well-defined boundary"); this is that boundary for the CLI host.
//! `pasindo-lex`/`pasindo-par`/`pasindo-sem` each define their own
//! `thiserror` error enum for their own pass; this one is hand-written,
//! the way the teacher's own driver-level `CompileError` is, since its job
//! is purely to render spec §6's banner/location/message shape around
//! whichever phase error it wraps.

use std::fmt;
use std::path::PathBuf;

use pasindo_lex::LexicalError;
use pasindo_par::SyntaxParseError;
use pasindo_sem::SemanticError;
use pasindo_util::diagnostic::Handler;
use pasindo_util::Span;

#[derive(Debug)]
pub enum DriverError {
    /// Wrong argument count (spec §6).
    Usage,
    /// Argument didn't end in `.pas` (spec §6).
    InvalidExtension { path: PathBuf },
    /// The source file couldn't be read.
    Io { path: PathBuf, source: std::io::Error },
    /// One or more lexical errors; scanning still ran to completion.
    Lexical(Vec<LexicalError>),
    Syntax(SyntaxParseError),
    Semantic(SemanticError),
}

fn write_location(f: &mut fmt::Formatter<'_>, line: Option<u32>, column: Option<u32>) -> fmt::Result {
    if let (Some(l), Some(c)) = (line, column) {
        writeln!(f, "Line {l}, Column {c}")?;
    }
    Ok(())
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Usage => write!(f, "usage: pasindoc <path-to-file.pas>"),
            DriverError::InvalidExtension { path } => {
                write!(f, "expected a '.pas' source file, got '{}'", path.display())
            }
            DriverError::Io { path, source } => {
                write!(f, "could not read '{}': {source}", path.display())
            }
            DriverError::Lexical(errors) => {
                writeln!(f, "Lexical error")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write_location(f, e.line(), e.column())?;
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            DriverError::Syntax(e) => {
                writeln!(f, "Syntax error")?;
                write_location(f, Some(e.line()), Some(e.column()))?;
                write!(f, "{e}")
            }
            DriverError::Semantic(e) => {
                writeln!(f, "Semantic error")?;
                write_location(f, e.line(), e.column())?;
                write!(f, "{e}")
            }
        }
    }
}

impl std::error::Error for DriverError {}

impl From<SyntaxParseError> for DriverError {
    fn from(e: SyntaxParseError) -> Self {
        DriverError::Syntax(e)
    }
}

impl From<SemanticError> for DriverError {
    fn from(e: SemanticError) -> Self {
        DriverError::Semantic(e)
    }
}

fn span_at(line: Option<u32>, column: Option<u32>) -> Span {
    match (line, column) {
        (Some(l), Some(c)) => Span::point(l, c),
        _ => Span::DUMMY,
    }
}

impl DriverError {
    /// Reports every error this value carries through `handler` (spec §7's
    /// "errors are values during collection, raised at a single
    /// well-defined boundary" applied one level up: the phase that raised
    /// them already finished, so the driver's job is purely to hand each
    /// one to the handler for counting/collection before rendering the
    /// same text via `Display`).
    pub fn report(&self, handler: &Handler) {
        match self {
            DriverError::Usage | DriverError::InvalidExtension { .. } | DriverError::Io { .. } => {
                handler.build_error(Span::DUMMY, self.to_string()).emit(handler);
            }
            DriverError::Lexical(errors) => {
                for e in errors {
                    handler.build_error(span_at(e.line(), e.column()), e.to_string()).emit(handler);
                }
            }
            DriverError::Syntax(e) => {
                handler.build_error(span_at(Some(e.line()), Some(e.column())), e.to_string()).emit(handler);
            }
            DriverError::Semantic(e) => {
                handler.build_error(span_at(e.line(), e.column()), e.to_string()).emit(handler);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_banner_includes_location() {
        let inner = SyntaxParseError::UnexpectedEof {
            expected_kind: pasindo_lex::TokenKind::Dot,
            expected_value: None,
            line: 3,
            column: 1,
        };
        let rendered = DriverError::from(inner).to_string();
        assert!(rendered.starts_with("Syntax error\n"));
        assert!(rendered.contains("Line 3, Column 1"));
    }

    #[test]
    fn usage_error_has_no_location() {
        assert_eq!(DriverError::Usage.to_string(), "usage: pasindoc <path-to-file.pas>");
    }

    #[test]
    fn invalid_extension_names_the_offending_path() {
        let err = DriverError::InvalidExtension { path: PathBuf::from("notes.txt") };
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn report_records_one_diagnostic_with_the_error_s_location() {
        let inner = SyntaxParseError::UnexpectedEof {
            expected_kind: pasindo_lex::TokenKind::Dot,
            expected_value: None,
            line: 3,
            column: 1,
        };
        let err = DriverError::from(inner);
        let handler = Handler::new();
        err.report(&handler);

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        let diags = handler.diagnostics();
        assert_eq!(diags[0].span.line, 3);
        assert_eq!(diags[0].span.column, 1);
    }

    #[test]
    fn report_records_every_collected_lexical_error() {
        let errors = vec![
            pasindo_lex::LexicalError::UnexpectedChar { ch: '$', line: 1, column: 1 },
            pasindo_lex::LexicalError::UnexpectedChar { ch: '@', line: 2, column: 5 },
        ];
        let handler = Handler::new();
        DriverError::Lexical(errors).report(&handler);
        assert_eq!(handler.error_count(), 2);
    }
}
