//! The parse tree - a heterogeneous labelled tree (spec §3).
//!
//! `Node` is deliberately loosely typed: the parser's job is only to
//! recognize the grammar's shape, not to commit to the strongly typed AST
//! that `pasindo-sem::AstBuilder` builds from it afterward. Keeping the two
//! representations separate lets diagnostic-mode parsing hand back a
//! partial, possibly malformed tree without the AST's invariants getting in
//! the way (spec §9, "Parse tree as a heterogeneous labelled tree").

use std::fmt;

use pasindo_lex::Token;

/// One node of the parse tree.
///
/// A node either **is a leaf** carrying the token it was built from, or
/// **is an inner node** whose `children` are ordered by source position and
/// whose `token` is `None`. `label` names the grammar non-terminal for
/// inner nodes (conventionally wrapped in angle brackets, e.g.
/// `<expression>`) or the token-kind name for leaves (e.g. `IDENTIFIER`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub token: Option<Token>,
    pub children: Vec<Node>,
}

impl Node {
    /// Builds a leaf node directly from a token; `label` is the token's
    /// kind name so parse-tree dumps read `IDENTIFIER(x)` rather than a
    /// redundant `<identifier>` wrapper.
    pub fn leaf(token: Token) -> Self {
        Node {
            label: token.kind.name().to_string(),
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Builds an inner node labelling a grammar non-terminal.
    pub fn inner(label: impl Into<String>, children: Vec<Node>) -> Self {
        Node {
            label: label.into(),
            token: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.token.is_some()
    }

    /// The first leaf token reachable under this node, used to report a
    /// location for nodes that don't carry one directly.
    pub fn first_token(&self) -> Option<&Token> {
        if let Some(tok) = &self.token {
            return Some(tok);
        }
        self.children.iter().find_map(Node::first_token)
    }

    /// Returns the first direct child whose label equals `label`.
    pub fn child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.label == label)
    }

    /// Returns every direct child whose label equals `label`, in order.
    pub fn children_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Node> {
        self.children.iter().filter(move |c| c.label == label)
    }

    /// Box-drawing pretty-printer, mirroring
    /// `original_source/src/common/node.py`'s `print_tree`: `└── ` for the
    /// last child at a level, `├── ` otherwise, `│   `/`    ` prefixes
    /// threading the vertical guide down through ancestors.
    pub fn print_tree(&self, f: &mut fmt::Formatter<'_>, prefix: &str, is_last: bool) -> fmt::Result {
        let connector = if is_last { "└── " } else { "├── " };
        match &self.token {
            Some(tok) => writeln!(f, "{prefix}{connector}{}({})", self.label, tok.value)?,
            None => writeln!(f, "{prefix}{connector}{}", self.label)?,
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.print_tree(f, &child_prefix, i + 1 == count)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(tok) => writeln!(f, "{}({})", self.label, tok.value)?,
            None => writeln!(f, "{}", self.label)?,
        }
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.print_tree(f, "", i + 1 == count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasindo_lex::TokenKind;

    fn tok(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value, 1, 1)
    }

    #[test]
    fn leaf_label_is_the_token_kind_name() {
        let node = Node::leaf(tok(TokenKind::Identifier, "x"));
        assert_eq!(node.label, "IDENTIFIER");
        assert!(node.is_leaf());
    }

    #[test]
    fn child_lookup_finds_first_match_by_label() {
        let inner = Node::inner(
            "<expression>",
            vec![Node::leaf(tok(TokenKind::Number, "1"))],
        );
        assert!(inner.child("NUMBER").is_some());
        assert!(inner.child("IDENTIFIER").is_none());
    }

    #[test]
    fn first_token_descends_to_the_first_leaf() {
        let inner = Node::inner(
            "<statement>",
            vec![Node::inner(
                "<expression>",
                vec![Node::leaf(tok(TokenKind::Number, "42"))],
            )],
        );
        assert_eq!(inner.first_token().unwrap().value, "42");
    }

    #[test]
    fn print_tree_uses_box_drawing_connectors() {
        let tree = Node::inner(
            "<program>",
            vec![
                Node::leaf(tok(TokenKind::Keyword, "program")),
                Node::leaf(tok(TokenKind::Identifier, "hello")),
            ],
        );
        let rendered = tree.to_string();
        assert!(rendered.contains("├── KEYWORD(program)"));
        assert!(rendered.contains("└── IDENTIFIER(hello)"));
    }
}
