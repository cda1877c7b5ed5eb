//! pasindo-par - Recursive-Descent Parser
//!
//! Consumes the token stream from `pasindo-lex` and produces the parse
//! tree described by spec §3/§4.3: a loosely typed [`Node`] tree shaped by
//! the grammar in that section, not yet the strongly typed AST that
//! `pasindo-sem::AstBuilder` builds from it afterward. Keeping the two
//! representations separate means a malformed, partial tree from
//! [`ParserMode::Diagnostic`] never has to satisfy the AST's invariants.
//!
//! # Example
//!
//! ```
//! use pasindo_lex::{default_rules, tokenize};
//! use pasindo_par::{Parser, ParserMode};
//!
//! let rules = default_rules();
//! let (tokens, lex_errors) = tokenize("program p;\nmulai selesai.", &rules);
//! assert!(lex_errors.is_empty());
//!
//! let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
//! assert_eq!(tree.label, "<program>");
//! ```

pub mod error;
pub mod node;
pub mod parser;

#[cfg(test)]
mod edge_cases;

pub use error::SyntaxParseError;
pub use node::Node;
pub use parser::{Parser, ParserMode};
