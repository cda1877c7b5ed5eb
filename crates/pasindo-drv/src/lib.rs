//! pasindo-drv - Compiler Driver
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! The host that wires the three phases together (spec §2, §5, §6):
//!
//! ```text
//! source string --[pasindo-lex]--> tokens --[pasindo-par]--> parse tree
//!     --[pasindo-sem::AstBuilder]--> AST --[pasindo-sem::SemanticAnalyzer]-->
//!     decorated AST + symbol tables
//! ```
//!
//! There is exactly one entry point, [`run`], and it owns every phase
//! transition: it never hands a `Result` back to the caller for anything
//! other than the final driver-level failure ([`error::DriverError`]).
//! Each phase runs to completion before the next one starts (spec §5: "no
//! parallel threads, no tasks, no suspension points"; "strictly
//! producer-to-consumer per phase").
//!
//! ============================================================================
//! COMMAND LINE INTERFACE
//! ============================================================================
//!
//! ```text
//! pasindoc <path-to-file.pas>
//! ```
//!
//! One required positional argument (spec §6). Any other argument count,
//! or a path not ending in `.pas`, is a usage error (exit 1, no pipeline
//! phase even runs). On success the symbol tables and decorated AST are
//! printed and the process exits 0; on a lexical/syntax/semantic failure
//! a phase banner, the `Line L, Column C` location (when known), and the
//! message are printed to stderr and the process exits 1.
//!
//! ============================================================================
//! ERROR HANDLING
//! ============================================================================
//!
//! Each phase already classifies its own failures (`LexicalError`,
//! `SyntaxParseError`, `SemanticError`); this crate's only job at the
//! error boundary is to wrap whichever one fired in [`error::DriverError`],
//! hand it to the process's [`pasindo_util::diagnostic::Handler`] via
//! [`error::DriverError::report`], and let its `Display` render spec §6's
//! banner shape. `anyhow` is used only for the outermost plumbing in
//! [`main`] - reading the source file and reporting a context message on
//! I/O failure - consistent with how the rest of this codebase reserves
//! `thiserror` for classified, structurally-matched errors and reaches for
//! `anyhow` only at a binary's outermost edge.

pub mod error;
pub mod print;

use std::path::Path;

use pasindo_lex::{default_rules, tokenize};
use pasindo_par::{Node, Parser, ParserMode};
use pasindo_sem::ast::Program;
use pasindo_sem::{AstBuilder, SemanticAnalyzer, SymbolTables};

pub use error::DriverError;

/// Parses argv (excluding the program name) into a validated source path
/// (spec §6: "one required positional argument").
pub fn parse_args(args: &[String]) -> Result<&Path, DriverError> {
    let [path] = args else {
        return Err(DriverError::Usage);
    };
    let path = Path::new(path);
    if path.extension().and_then(|e| e.to_str()) != Some("pas") {
        return Err(DriverError::InvalidExtension { path: path.to_path_buf() });
    }
    Ok(path)
}

/// Runs the lexer and parser over `source`, returning the raw parse tree.
///
/// Lexical errors are collected and surfaced as a single [`DriverError`]
/// once scanning finishes (spec §4.2's "one error per unmatched
/// character, non-fatal" means the lexer keeps going; the host is what
/// decides to abort after the fact, per spec §7's error policy). The
/// parser always runs in [`ParserMode::Strict`] here, so the first syntax
/// mismatch raises immediately rather than collecting a diagnostic list.
pub fn parse(source: &str) -> Result<Node, DriverError> {
    let rules = default_rules();
    let (tokens, lex_errors) = tokenize(source, &rules);
    if !lex_errors.is_empty() {
        return Err(DriverError::Lexical(lex_errors));
    }

    let tree = Parser::new(&tokens, ParserMode::Strict).parse_program()?;
    Ok(tree)
}

/// Lowers a parse tree to a decorated [`Program`] plus its symbol tables
/// (spec §4.4, §4.6).
pub fn analyze(tree: &Node) -> Result<(Program, SymbolTables), DriverError> {
    let program = AstBuilder::build(tree)?;
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(&program)?;
    Ok((program, analyzer.tables))
}

/// Runs the full pipeline over already-loaded `source` and prints the
/// success-path output (spec §6). Returns the phase error on failure;
/// the caller is responsible for formatting and the process exit code.
pub fn compile(source: &str) -> Result<(), DriverError> {
    let tree = parse(source)?;
    let (program, tables) = analyze(&tree)?;
    println!("===== SYMBOL TABLES =====");
    print::print_symbol_tables(&tables);
    println!();
    println!("===== DECORATED AST =====");
    print::print_decorated_ast(&program);
    Ok(())
}
