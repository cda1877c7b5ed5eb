//! Edge case tests for pasindo-lex

#[cfg(test)]
mod tests {
    use crate::{default_rules, tokenize, TokenKind};

    // ==================== EMPTY / WHITESPACE-ONLY INPUT ====================

    /// EDGE CASE: empty source produces no tokens and no errors
    #[test]
    fn test_edge_empty_source() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("", &rules);
        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    /// EDGE CASE: a source that is only whitespace is fully dropped
    #[test]
    fn test_edge_whitespace_only_source() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("   \n\t\n  ", &rules);
        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    /// EDGE CASE: a comment that spans the entire source is dropped
    #[test]
    fn test_edge_comment_only_source() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("{ nothing but a comment here }", &rules);
        assert!(tokens.is_empty());
        assert!(errors.is_empty());
    }

    // ==================== MAXIMAL MUNCH BOUNDARIES ====================

    /// EDGE CASE: `:` not followed by `=` is its own token, not a prefix of ASSIGN_OPERATOR
    #[test]
    fn test_edge_bare_colon() {
        let rules = default_rules();
        let (tokens, errors) = tokenize(":", &rules);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Colon);
    }

    /// EDGE CASE: a single trailing dot (program terminator) does not start a range
    #[test]
    fn test_edge_trailing_dot_is_not_a_range() {
        let rules = default_rules();
        let (tokens, errors) = tokenize(".", &rules);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Dot);
    }

    /// EDGE CASE: three dots is a range operator followed by a dot, left to right
    #[test]
    fn test_edge_three_dots() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("...", &rules);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::RangeOperator);
        assert_eq!(tokens[1].kind, TokenKind::Dot);
    }

    /// EDGE CASE: an integer immediately followed by a range, no ambiguity with real numbers
    #[test]
    fn test_edge_integer_then_range_no_space() {
        let rules = default_rules();
        let (tokens, _) = tokenize("10..20", &rules);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].value, "10");
        assert_eq!(tokens[1].kind, TokenKind::RangeOperator);
        assert_eq!(tokens[2].value, "20");
    }

    // ==================== IDENTIFIER / KEYWORD BOUNDARIES ====================

    /// EDGE CASE: an identifier with a keyword as a prefix is still one identifier
    #[test]
    fn test_edge_identifier_with_keyword_prefix() {
        let rules = default_rules();
        let (tokens, _) = tokenize("mulainya", &rules);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "mulainya");
    }

    /// EDGE CASE: keyword matching is case-insensitive on the lexeme
    #[test]
    fn test_edge_keyword_case_insensitive() {
        let rules = default_rules();
        let (tokens, _) = tokenize("MULAI Mulai mulai", &rules);
        assert_eq!(tokens.len(), 3);
        for t in &tokens {
            assert_eq!(t.kind, TokenKind::Keyword);
        }
    }

    /// EDGE CASE: a leading underscore is a valid identifier start
    #[test]
    fn test_edge_leading_underscore_identifier() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("_temp", &rules);
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "_temp");
    }

    // ==================== STRING / CHAR LITERAL BOUNDARIES ====================

    /// EDGE CASE: a string literal made entirely of an escaped quote
    #[test]
    fn test_edge_string_of_only_escaped_quotes() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("''''", &rules);
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[0].value, "'");
    }

    /// EDGE CASE: adjacent string literals tokenize independently
    #[test]
    fn test_edge_adjacent_string_literals() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("'a''b'", &rules);
        // `''` inside a still-open string is an escape, so this is ONE string
        // literal spelling the two-character content `a'b`, not two literals.
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, "a'b");
    }

    // ==================== ERROR RECOVERY ====================

    /// EDGE CASE: multiple unrecognized characters are all reported, scanning never stalls
    #[test]
    fn test_edge_multiple_unrecognized_characters() {
        let rules = default_rules();
        let (_, errors) = tokenize("x # y $ z", &rules);
        assert_eq!(errors.len(), 2);
    }

    /// EDGE CASE: an unterminated string at end of file is reported once, and
    /// swallows the rest of the source as unclosed content rather than
    /// tokenizing `selesai.` as a second statement
    #[test]
    fn test_edge_unterminated_string_at_eof() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("mulai x := 'a selesai.", &rules);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], crate::LexicalError::UnterminatedString { .. }));
        assert!(!tokens.iter().any(|t| t.value == "selesai"));
    }
}
