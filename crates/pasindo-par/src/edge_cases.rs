//! Edge case tests for pasindo-par

#[cfg(test)]
mod tests {
    use pasindo_lex::{default_rules, tokenize, Token, TokenKind};

    use crate::{Parser, ParserMode, SyntaxParseError};

    fn tokens_for(src: &str) -> Vec<Token> {
        let rules = default_rules();
        let (tokens, errors) = tokenize(src, &rules);
        assert!(errors.is_empty(), "unexpected lex errors for {src:?}: {errors:?}");
        tokens
    }

    // ==================== GRAMMAR BOUNDARIES ====================

    /// EDGE CASE: a program with only a header and an empty body is legal
    #[test]
    fn test_edge_minimal_program_with_no_declarations() {
        let tokens = tokens_for("program p;\nmulai selesai.");
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let decls = &tree.children[1];
        assert_eq!(decls.label, "<declaration-part>");
        assert!(decls.children.is_empty());
    }

    /// EDGE CASE: declarations of every kind can interleave in any order
    #[test]
    fn test_edge_interleaved_declaration_kinds() {
        let tokens = tokens_for(
            "program p;\nkonstanta pi = 3;\nvariabel x: integer;\ntipe t = integer;\nmulai selesai.",
        );
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let decls = &tree.children[1];
        assert_eq!(decls.children.len(), 3);
        assert_eq!(decls.children[0].label, "<const-decl>");
        assert_eq!(decls.children[1].label, "<var-decl>");
        assert_eq!(decls.children[2].label, "<type-decl>");
    }

    /// EDGE CASE: a nested procedure declaration parses its own nested block
    #[test]
    fn test_edge_nested_procedure_declaration() {
        let tokens = tokens_for(
            "program p;\nprosedur q;\nmulai selesai;\nmulai q() selesai.",
        );
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let decls = &tree.children[1];
        assert_eq!(decls.children[0].label, "<procedure-decl>");
    }

    /// EDGE CASE: formal parameters with multiple semicolon-separated groups
    #[test]
    fn test_edge_multiple_formal_param_groups() {
        let tokens = tokens_for(
            "program p;\nprosedur q(a, b: integer; c: real);\nmulai selesai;\nmulai q(1, 2, 3.0) selesai.",
        );
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let proc_decl = &tree.children[1].children[0];
        let params = proc_decl.child("<formal-params>").unwrap();
        // '(' a,b:integer ';' c:real ')' => 2 param-groups among the children
        let groups: Vec<_> = params.children_labelled("<param-group>").collect();
        assert_eq!(groups.len(), 2);
    }

    // ==================== EXPRESSION PRECEDENCE ====================

    /// EDGE CASE: multiplication binds tighter than addition, left-associative
    #[test]
    fn test_edge_mul_binds_tighter_than_add() {
        let tokens = tokens_for("program p;\nvariabel x: integer;\nmulai x := 2 + 3 * 4 selesai.");
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let assign = &tree.children[2].children[1];
        let expr = &assign.children[2];
        let simple = &expr.children[0];
        // "2 + 3 * 4" as a simple-expr: [term(2), '+', term(3 * 4)]
        assert_eq!(simple.children.len(), 3);
        let rhs_term = &simple.children[2];
        assert_eq!(rhs_term.label, "<term>");
        assert_eq!(rhs_term.children.len(), 3);
    }

    /// EDGE CASE: a parenthesized sub-expression groups regardless of
    /// operator precedence
    #[test]
    fn test_edge_parenthesized_expression_overrides_precedence() {
        let tokens = tokens_for("program p;\nvariabel x: integer;\nmulai x := (2 + 3) * 4 selesai.");
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let assign = &tree.children[2].children[1];
        let expr = &assign.children[2];
        let simple = &expr.children[0];
        let term = &simple.children[0];
        assert_eq!(term.children.len(), 3); // factor(...) '*' factor(4)
        let paren_factor = &term.children[0];
        assert_eq!(paren_factor.children[0].token.as_ref().unwrap().kind, TokenKind::LParenthesis);
    }

    /// EDGE CASE: unary minus on a simple-expr is distinct from binary minus
    #[test]
    fn test_edge_leading_unary_minus() {
        let tokens = tokens_for("program p;\nvariabel x: integer;\nmulai x := -5 selesai.");
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let assign = &tree.children[2].children[1];
        let expr = &assign.children[2];
        let simple = &expr.children[0];
        assert_eq!(simple.children[0].token.as_ref().unwrap().value, "-");
    }

    /// EDGE CASE: `tidak` (logical not) nests over another `tidak`
    #[test]
    fn test_edge_doubled_negation() {
        let tokens = tokens_for("program p;\nvariabel b: boolean;\nmulai b := tidak tidak b selesai.");
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let assign = &tree.children[2].children[1];
        let expr = &assign.children[2];
        let factor = &expr.children[0].children[0].children[0];
        assert_eq!(factor.children[0].token.as_ref().unwrap().value, "tidak");
        assert_eq!(factor.children[1].children[0].token.as_ref().unwrap().value, "tidak");
    }

    // ==================== ERROR POLICY ====================

    /// EDGE CASE: strict mode raises immediately and never records a
    /// second error
    #[test]
    fn test_edge_strict_mode_stops_at_first_mismatch() {
        let tokens = tokens_for("program p\nmulai selesai.");
        let mut parser = Parser::new(&tokens, ParserMode::Strict);
        let result = parser.parse_program();
        assert!(result.is_err());
        assert_eq!(parser.errors().len(), 1);
    }

    /// EDGE CASE: an array declaration round-trips through the parse tree
    #[test]
    fn test_edge_array_type_declaration() {
        let tokens = tokens_for(
            "program p;\ntipe v = larik[1..5] dari integer;\nvariabel a: v;\nmulai selesai.",
        );
        let tree = Parser::new(&tokens, ParserMode::Strict).parse_program().unwrap();
        let type_decl = &tree.children[1].children[0];
        assert_eq!(type_decl.label, "<type-decl>");
        let array_type = &type_decl.children[1].children[2].children[0];
        assert_eq!(array_type.label, "<array-type>");
    }

    /// EDGE CASE: end of input mid-expression is an `UnexpectedEof`, not a
    /// `TokenUnexpectedError`
    #[test]
    fn test_edge_unexpected_eof_mid_expression() {
        let tokens = tokens_for("program p;\nvariabel x: integer;\nmulai x :=");
        let result = Parser::new(&tokens, ParserMode::Strict).parse_program();
        assert!(matches!(result, Err(SyntaxParseError::UnexpectedEof { .. })));
    }
}
