//! pasindo-sem - AST, Symbol Tables, and the Semantic Analyzer
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! The third and last compiler phase (spec §5): lowers a `pasindo-par::Node`
//! parse tree into a strongly typed [`ast`], then walks it once to populate
//! the Wirth-style [`symtab::SymbolTables`] (TAB/BTAB/ATAB) and decorate
//! every node with its resolved type, symbol, and scope level.
//!
//! - [`ast`] - the decorated AST types (`Program`, `Block`, `Stmt`, `Expr`, ...).
//! - [`types`] - `TypeKind`, the closed set of primitive/reference type tags.
//! - [`symtab`] - the TAB/BTAB/ATAB arenas and their scope-chain operations.
//! - [`builder`] - lowers a parse tree into `ast` (`AstBuilder`).
//! - [`analyzer`] - the tree walk that fills in the tables and decorations
//!   (`SemanticAnalyzer`).
//! - [`error`] - `SemanticError`, the fatal error this phase can raise.
//!
//! Typical use, mirroring the three-phase pipeline `pasindo-drv` drives:
//!
//! ```
//! use pasindo_lex::{default_rules, tokenize};
//! use pasindo_par::{Parser, ParserMode};
//! use pasindo_sem::{AstBuilder, SemanticAnalyzer};
//!
//! let rules = default_rules();
//! let (tokens, lex_errors) = tokenize("program p; mulai selesai.", &rules);
//! assert!(lex_errors.is_empty());
//!
//! let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
//! let program = AstBuilder::build(&tree).unwrap();
//!
//! let mut analyzer = SemanticAnalyzer::new();
//! analyzer.analyze(&program).unwrap();
//! ```

pub mod analyzer;
pub mod ast;
pub mod builder;
pub mod error;
pub mod symtab;
pub mod types;

pub use analyzer::SemanticAnalyzer;
pub use builder::AstBuilder;
pub use error::SemanticError;
pub use symtab::{ATabEntry, ATabIdx, BTabEntry, BTabIdx, ObjKind, RedeclaredError, SymbolTables, TabEntry, TabIdx};
pub use types::TypeKind;
