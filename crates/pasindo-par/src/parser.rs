//! Recursive-descent parser (spec §4.3).
//!
//! One function per grammar non-terminal in §4.3's production list, each
//! consuming tokens directly off `self.tokens[self.pos..]` and assembling a
//! [`Node`]. No backtracking: every disambiguation the grammar needs
//! (assignment vs. procedure call, `factor`'s `IDENT` vs. `IDENT '(' ... ')'`)
//! is a single token of lookahead past the identifier, exactly as spec §4.3
//! describes it.

use pasindo_lex::{Token, TokenKind};

use crate::error::SyntaxParseError;
use crate::node::Node;

/// Selects the parser's behavior on a grammar mismatch (spec §4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserMode {
    /// Raise on the first mismatch — hosted compilation.
    Strict,
    /// Log the mismatch, synchronize, and keep going — tooling.
    Diagnostic,
}

/// Tokens that may open a new declaration or statement; `synchronize`
/// stops consuming as soon as one of these is current, per spec §7's
/// "next synchronization token (a semicolon, or a block-opening keyword)".
const SYNC_KEYWORDS: &[&str] = &[
    "konstanta", "tipe", "variabel", "prosedur", "fungsi", "mulai", "jika", "selama", "untuk",
    "selesai",
];

pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    mode: ParserMode,
    errors: Vec<SyntaxParseError>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token], mode: ParserMode) -> Self {
        Parser {
            tokens,
            pos: 0,
            mode,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[SyntaxParseError] {
        &self.errors
    }

    pub fn mode(&self) -> ParserMode {
        self.mode
    }

    // ==================== token-stream primitives ====================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn checks(&self, kind: TokenKind, value: Option<&str>) -> bool {
        match self.peek() {
            Some(tok) => tok.kind == kind && value.map_or(true, |v| tok.value_eq_ignore_case(v)),
            None => false,
        }
    }

    fn make_mismatch(&self, expected_kind: TokenKind, expected_value: Option<&str>) -> SyntaxParseError {
        match self.peek() {
            Some(tok) => SyntaxParseError::TokenUnexpectedError {
                expected_kind,
                expected_value: expected_value.map(str::to_string),
                got_kind: tok.kind,
                got_value: tok.value.clone(),
                line: tok.line,
                column: tok.column,
            },
            None => {
                let (line, column) = self
                    .tokens
                    .last()
                    .map(|t| (t.line, t.column))
                    .unwrap_or((1, 1));
                SyntaxParseError::UnexpectedEof {
                    expected_kind,
                    expected_value: expected_value.map(str::to_string),
                    line,
                    column,
                }
            }
        }
    }

    /// Consumes the current token if it matches `kind` and (case-
    /// insensitively) `value`; otherwise records and returns the mismatch.
    /// This is spec §4.3's `match(kind, value?)` utility.
    fn expect(&mut self, kind: TokenKind, value: Option<&str>) -> Result<Token, SyntaxParseError> {
        if self.checks(kind, value) {
            Ok(self.advance().expect("checked present above"))
        } else {
            let err = self.make_mismatch(kind, value);
            self.errors.push(err.clone());
            Err(err)
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Token, SyntaxParseError> {
        self.expect(TokenKind::Keyword, Some(keyword))
    }

    fn expect_ident(&mut self) -> Result<Token, SyntaxParseError> {
        self.expect(TokenKind::Identifier, None)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.checks(TokenKind::Keyword, Some(keyword))
    }

    fn at_kind(&self, kind: TokenKind) -> bool {
        self.checks(kind, None)
    }

    /// Skips tokens until a synchronization point: stops right *before* a
    /// `;` or a block/decl-opening keyword (leaving it for the enclosing
    /// loop's own delimiter handling to consume), or reaches end of input.
    /// Only meaningful in diagnostic mode.
    fn synchronize(&mut self) {
        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Semicolon {
                return;
            }
            if tok.kind == TokenKind::Keyword && SYNC_KEYWORDS.iter().any(|k| tok.value_eq_ignore_case(k)) {
                return;
            }
            self.advance();
        }
    }

    /// Runs `parse_one` as the body of a "zero or more" loop item. On
    /// success the item is appended; on failure, strict mode propagates the
    /// error immediately, diagnostic mode records an `<error>` placeholder
    /// and synchronizes before the loop's next iteration.
    fn recover_in_loop(
        &mut self,
        items: &mut Vec<Node>,
        parse_one: impl FnOnce(&mut Self) -> Result<Node, SyntaxParseError>,
    ) -> Result<(), SyntaxParseError> {
        match parse_one(self) {
            Ok(node) => {
                items.push(node);
                Ok(())
            }
            Err(e) => {
                if self.mode == ParserMode::Strict {
                    return Err(e);
                }
                self.synchronize();
                items.push(Node::inner("<error>", Vec::new()));
                Ok(())
            }
        }
    }

    // ==================== program ====================

    /// `program ::= program-header declaration-part compound-statement '.'`
    pub fn parse_program(&mut self) -> Result<Node, SyntaxParseError> {
        let header = self.parse_program_header()?;
        let decls = self.parse_declaration_part()?;
        let body = self.parse_compound_stmt()?;
        let dot = self.expect(TokenKind::Dot, None)?;

        Ok(Node::inner(
            "<program>",
            vec![header, decls, body, Node::leaf(dot)],
        ))
    }

    /// `program-header ::= 'program' IDENT ';'`
    fn parse_program_header(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("program")?;
        let name = self.expect_ident()?;
        let semi = self.expect(TokenKind::Semicolon, None)?;
        Ok(Node::inner(
            "<program-header>",
            vec![Node::leaf(kw), Node::leaf(name), Node::leaf(semi)],
        ))
    }

    /// `declaration-part ::= { const-decl | type-decl | var-decl | subprogram-decl }`
    fn parse_declaration_part(&mut self) -> Result<Node, SyntaxParseError> {
        let mut items = Vec::new();
        loop {
            if self.at_keyword("konstanta") {
                self.recover_in_loop(&mut items, Self::parse_const_decl)?;
            } else if self.at_keyword("tipe") {
                self.recover_in_loop(&mut items, Self::parse_type_decl)?;
            } else if self.at_keyword("variabel") {
                self.recover_in_loop(&mut items, Self::parse_var_decl)?;
            } else if self.at_keyword("prosedur") || self.at_keyword("fungsi") {
                self.recover_in_loop(&mut items, Self::parse_subprogram_decl)?;
            } else {
                break;
            }
        }
        Ok(Node::inner("<declaration-part>", items))
    }

    /// `const-decl ::= 'konstanta' ( IDENT '=' expression ';' )+`
    fn parse_const_decl(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("konstanta")?;
        let mut children = vec![Node::leaf(kw)];
        loop {
            let name = self.expect_ident()?;
            let eq = self.expect(TokenKind::RelationalOperator, Some("="))?;
            let value = self.parse_expression()?;
            let semi = self.expect(TokenKind::Semicolon, None)?;
            children.push(Node::inner(
                "<const-assign>",
                vec![Node::leaf(name), Node::leaf(eq), value, Node::leaf(semi)],
            ));
            if !self.at_kind(TokenKind::Identifier) {
                break;
            }
        }
        Ok(Node::inner("<const-decl>", children))
    }

    /// `type-decl ::= 'tipe' ( IDENT '=' type ';' )+`
    fn parse_type_decl(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("tipe")?;
        let mut children = vec![Node::leaf(kw)];
        loop {
            let name = self.expect_ident()?;
            let eq = self.expect(TokenKind::RelationalOperator, Some("="))?;
            let ty = self.parse_type()?;
            let semi = self.expect(TokenKind::Semicolon, None)?;
            children.push(Node::inner(
                "<type-assign>",
                vec![Node::leaf(name), Node::leaf(eq), ty, Node::leaf(semi)],
            ));
            if !self.at_kind(TokenKind::Identifier) {
                break;
            }
        }
        Ok(Node::inner("<type-decl>", children))
    }

    /// `var-decl ::= 'variabel' ( ident-list ':' type ';' )+`
    fn parse_var_decl(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("variabel")?;
        let mut children = vec![Node::leaf(kw)];
        loop {
            let idents = self.parse_ident_list()?;
            let colon = self.expect(TokenKind::Colon, None)?;
            let ty = self.parse_type()?;
            let semi = self.expect(TokenKind::Semicolon, None)?;
            children.push(Node::inner(
                "<var-group>",
                vec![idents, Node::leaf(colon), ty, Node::leaf(semi)],
            ));
            if !self.at_kind(TokenKind::Identifier) {
                break;
            }
        }
        Ok(Node::inner("<var-decl>", children))
    }

    /// `subprogram-decl ::= procedure-decl | function-decl`
    fn parse_subprogram_decl(&mut self) -> Result<Node, SyntaxParseError> {
        if self.at_keyword("prosedur") {
            self.parse_procedure_decl()
        } else {
            self.parse_function_decl()
        }
    }

    /// `procedure-decl ::= 'prosedur' IDENT [formal-params] ';' block ';'`
    fn parse_procedure_decl(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("prosedur")?;
        let name = self.expect_ident()?;
        let mut children = vec![Node::leaf(kw), Node::leaf(name)];
        if self.at_kind(TokenKind::LParenthesis) {
            children.push(self.parse_formal_params()?);
        }
        children.push(Node::leaf(self.expect(TokenKind::Semicolon, None)?));
        children.push(self.parse_block()?);
        children.push(Node::leaf(self.expect(TokenKind::Semicolon, None)?));
        Ok(Node::inner("<procedure-decl>", children))
    }

    /// `function-decl ::= 'fungsi' IDENT [formal-params] ':' type ';' block ';'`
    fn parse_function_decl(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("fungsi")?;
        let name = self.expect_ident()?;
        let mut children = vec![Node::leaf(kw), Node::leaf(name)];
        if self.at_kind(TokenKind::LParenthesis) {
            children.push(self.parse_formal_params()?);
        }
        children.push(Node::leaf(self.expect(TokenKind::Colon, None)?));
        children.push(self.parse_type()?);
        children.push(Node::leaf(self.expect(TokenKind::Semicolon, None)?));
        children.push(self.parse_block()?);
        children.push(Node::leaf(self.expect(TokenKind::Semicolon, None)?));
        Ok(Node::inner("<function-decl>", children))
    }

    /// `block ::= declaration-part compound-statement`
    fn parse_block(&mut self) -> Result<Node, SyntaxParseError> {
        let decls = self.parse_declaration_part()?;
        let body = self.parse_compound_stmt()?;
        Ok(Node::inner("<block>", vec![decls, body]))
    }

    /// `formal-params ::= '(' param-group { ';' param-group } ')'`
    fn parse_formal_params(&mut self) -> Result<Node, SyntaxParseError> {
        let lparen = self.expect(TokenKind::LParenthesis, None)?;
        let mut children = vec![Node::leaf(lparen)];
        children.push(self.parse_param_group()?);
        while self.at_kind(TokenKind::Semicolon) {
            children.push(Node::leaf(self.advance().expect("checked present above")));
            children.push(self.parse_param_group()?);
        }
        children.push(Node::leaf(self.expect(TokenKind::RParenthesis, None)?));
        Ok(Node::inner("<formal-params>", children))
    }

    /// `param-group ::= ident-list ':' type`
    fn parse_param_group(&mut self) -> Result<Node, SyntaxParseError> {
        let idents = self.parse_ident_list()?;
        let colon = self.expect(TokenKind::Colon, None)?;
        let ty = self.parse_type()?;
        Ok(Node::inner(
            "<param-group>",
            vec![idents, Node::leaf(colon), ty],
        ))
    }

    /// `ident-list ::= IDENT { ',' IDENT }`
    fn parse_ident_list(&mut self) -> Result<Node, SyntaxParseError> {
        let mut children = vec![Node::leaf(self.expect_ident()?)];
        while self.at_kind(TokenKind::Comma) {
            children.push(Node::leaf(self.advance().expect("checked present above")));
            children.push(Node::leaf(self.expect_ident()?));
        }
        Ok(Node::inner("<ident-list>", children))
    }

    /// `type ::= 'integer' | 'real' | 'boolean' | 'char' | IDENT | array-type`
    fn parse_type(&mut self) -> Result<Node, SyntaxParseError> {
        const PRIMITIVES: &[&str] = &["integer", "real", "boolean", "char"];
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Keyword && PRIMITIVES.iter().any(|p| tok.value_eq_ignore_case(p)) {
                let tok = self.advance().expect("checked present above");
                return Ok(Node::inner("<type>", vec![Node::leaf(tok)]));
            }
            if tok.kind == TokenKind::Keyword && tok.value_eq_ignore_case("larik") {
                return Ok(Node::inner("<type>", vec![self.parse_array_type()?]));
            }
            if tok.kind == TokenKind::Identifier {
                let tok = self.advance().expect("checked present above");
                return Ok(Node::inner("<type>", vec![Node::leaf(tok)]));
            }
        }
        let err = self.make_mismatch(TokenKind::Identifier, None);
        self.errors.push(err.clone());
        Err(err)
    }

    /// `array-type ::= 'larik' '[' range ']' 'dari' type`
    fn parse_array_type(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("larik")?;
        let lbracket = self.expect(TokenKind::LBracket, None)?;
        let range = self.parse_range()?;
        let rbracket = self.expect(TokenKind::RBracket, None)?;
        let dari = self.expect_keyword("dari")?;
        let elem = self.parse_type()?;
        Ok(Node::inner(
            "<array-type>",
            vec![
                Node::leaf(kw),
                Node::leaf(lbracket),
                range,
                Node::leaf(rbracket),
                Node::leaf(dari),
                elem,
            ],
        ))
    }

    /// `range ::= expression '..' expression`
    fn parse_range(&mut self) -> Result<Node, SyntaxParseError> {
        let lower = self.parse_expression()?;
        let dots = self.expect(TokenKind::RangeOperator, None)?;
        let upper = self.parse_expression()?;
        Ok(Node::inner("<range>", vec![lower, Node::leaf(dots), upper]))
    }

    // ==================== statements ====================

    /// `compound-stmt ::= 'mulai' [ statement { ';' statement } [';'] ] 'selesai'`
    fn parse_compound_stmt(&mut self) -> Result<Node, SyntaxParseError> {
        let begin = self.expect_keyword("mulai")?;
        let mut children = vec![Node::leaf(begin)];

        if !self.at_keyword("selesai") {
            self.recover_in_loop(&mut children, Self::parse_statement)?;
            while self.at_kind(TokenKind::Semicolon) {
                children.push(Node::leaf(self.advance().expect("checked present above")));
                if self.at_keyword("selesai") {
                    break;
                }
                self.recover_in_loop(&mut children, Self::parse_statement)?;
            }
        }

        let end = self.expect_keyword("selesai")?;
        children.push(Node::leaf(end));
        Ok(Node::inner("<compound-stmt>", children))
    }

    /// `statement ::= compound-stmt | if-stmt | while-stmt | for-stmt | assignment-stmt | proc-call`
    fn parse_statement(&mut self) -> Result<Node, SyntaxParseError> {
        if self.at_keyword("mulai") {
            return self.parse_compound_stmt();
        }
        if self.at_keyword("jika") {
            return self.parse_if_stmt();
        }
        if self.at_keyword("selama") {
            return self.parse_while_stmt();
        }
        if self.at_keyword("untuk") {
            return self.parse_for_stmt();
        }
        if self.at_kind(TokenKind::Identifier) {
            // Disambiguation (spec §4.3): assignment if next token is `:=`,
            // otherwise a procedure/function call.
            if matches!(self.tokens.get(self.pos + 1), Some(t) if t.kind == TokenKind::AssignOperator)
            {
                return self.parse_assignment_stmt();
            }
            return self.parse_proc_call();
        }
        let err = self.make_mismatch(TokenKind::Identifier, None);
        self.errors.push(err.clone());
        Err(err)
    }

    /// `if-stmt ::= 'jika' expression 'maka' statement [ 'selain_itu' statement ]`
    fn parse_if_stmt(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("jika")?;
        let cond = self.parse_expression()?;
        let maka = self.expect_keyword("maka")?;
        let then_branch = self.parse_statement()?;
        let mut children = vec![Node::leaf(kw), cond, Node::leaf(maka), then_branch];
        if self.at_keyword("selain_itu") {
            children.push(Node::leaf(self.advance().expect("checked present above")));
            children.push(self.parse_statement()?);
        }
        Ok(Node::inner("<if-stmt>", children))
    }

    /// `while-stmt ::= 'selama' expression 'lakukan' statement`
    fn parse_while_stmt(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("selama")?;
        let cond = self.parse_expression()?;
        let lakukan = self.expect_keyword("lakukan")?;
        let body = self.parse_statement()?;
        Ok(Node::inner(
            "<while-stmt>",
            vec![Node::leaf(kw), cond, Node::leaf(lakukan), body],
        ))
    }

    /// `for-stmt ::= 'untuk' IDENT ':=' expression ('ke'|'turun_ke') expression 'lakukan' statement`
    fn parse_for_stmt(&mut self) -> Result<Node, SyntaxParseError> {
        let kw = self.expect_keyword("untuk")?;
        let var = self.expect_ident()?;
        let assign = self.expect(TokenKind::AssignOperator, None)?;
        let from = self.parse_expression()?;

        let direction = if self.at_keyword("turun_ke") {
            self.advance().expect("checked present above")
        } else {
            self.expect_keyword("ke")?
        };

        let to = self.parse_expression()?;
        let lakukan = self.expect_keyword("lakukan")?;
        let body = self.parse_statement()?;

        Ok(Node::inner(
            "<for-stmt>",
            vec![
                Node::leaf(kw),
                Node::leaf(var),
                Node::leaf(assign),
                from,
                Node::leaf(direction),
                to,
                Node::leaf(lakukan),
                body,
            ],
        ))
    }

    /// `assignment-stmt ::= IDENT ':=' expression`, with an optional
    /// `'[' expression ']'` index between the identifier and `:=` for an
    /// array-element target (spec §4.4: `IDENT '[' expr ']'` on the left of
    /// `:=` becomes an array access target).
    fn parse_assignment_stmt(&mut self) -> Result<Node, SyntaxParseError> {
        let name = self.expect_ident()?;
        let mut children = vec![Node::leaf(name)];
        if self.at_kind(TokenKind::LBracket) {
            let lbracket = self.advance().expect("checked present above");
            let index = self.parse_expression()?;
            let rbracket = self.expect(TokenKind::RBracket, None)?;
            children.push(Node::inner(
                "<index>",
                vec![Node::leaf(lbracket), index, Node::leaf(rbracket)],
            ));
        }
        let assign = self.expect(TokenKind::AssignOperator, None)?;
        let value = self.parse_expression()?;
        children.push(Node::leaf(assign));
        children.push(value);
        Ok(Node::inner("<assignment-stmt>", children))
    }

    /// `proc-call ::= IDENT '(' [ param-list ] ')'`
    fn parse_proc_call(&mut self) -> Result<Node, SyntaxParseError> {
        let name = self.expect_ident()?;
        let mut children = vec![Node::leaf(name)];
        if self.at_kind(TokenKind::LParenthesis) {
            children.push(Node::leaf(self.advance().expect("checked present above")));
            if !self.at_kind(TokenKind::RParenthesis) {
                children.push(self.parse_param_list()?);
            }
            children.push(Node::leaf(self.expect(TokenKind::RParenthesis, None)?));
        }
        Ok(Node::inner("<proc-call>", children))
    }

    /// `param-list ::= expression { ',' expression }`
    fn parse_param_list(&mut self) -> Result<Node, SyntaxParseError> {
        let mut children = vec![self.parse_expression()?];
        while self.at_kind(TokenKind::Comma) {
            children.push(Node::leaf(self.advance().expect("checked present above")));
            children.push(self.parse_expression()?);
        }
        Ok(Node::inner("<param-list>", children))
    }

    // ==================== expressions ====================

    /// `expression ::= simple-expr [ rel-op simple-expr ]`
    fn parse_expression(&mut self) -> Result<Node, SyntaxParseError> {
        let lhs = self.parse_simple_expr()?;
        if self.is_rel_op() {
            let op = self.advance().expect("checked present above");
            let rhs = self.parse_simple_expr()?;
            return Ok(Node::inner(
                "<expression>",
                vec![lhs, Node::leaf(op), rhs],
            ));
        }
        Ok(Node::inner("<expression>", vec![lhs]))
    }

    fn is_rel_op(&self) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::RelationalOperator)
    }

    /// `simple-expr ::= [ '+' | '-' ] term { add-op term }`
    fn parse_simple_expr(&mut self) -> Result<Node, SyntaxParseError> {
        let mut children = Vec::new();
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::ArithmeticOperator && (tok.value == "+" || tok.value == "-") {
                children.push(Node::leaf(self.advance().expect("checked present above")));
            }
        }
        children.push(self.parse_term()?);

        while self.is_add_op() {
            let op = self.advance().expect("checked present above");
            children.push(Node::leaf(op));
            children.push(self.parse_term()?);
        }
        Ok(Node::inner("<simple-expr>", children))
    }

    /// `add-op ::= '+' | '-' | 'atau'`
    fn is_add_op(&self) -> bool {
        match self.peek() {
            Some(t) if t.kind == TokenKind::ArithmeticOperator => t.value == "+" || t.value == "-",
            Some(t) if t.kind == TokenKind::LogicalOperator => t.value_eq_ignore_case("atau"),
            _ => false,
        }
    }

    /// `term ::= factor { mul-op factor }`
    fn parse_term(&mut self) -> Result<Node, SyntaxParseError> {
        let mut children = vec![self.parse_factor()?];
        while self.is_mul_op() {
            let op = self.advance().expect("checked present above");
            children.push(Node::leaf(op));
            children.push(self.parse_factor()?);
        }
        Ok(Node::inner("<term>", children))
    }

    /// `mul-op ::= '*' | '/' | 'bagi' | 'mod' | 'dan'`
    ///
    /// `bagi`/`mod` are rewritten to `ArithmeticOperator` by the lexer
    /// (they require INTS on both sides, spec §4.6), while `dan` is
    /// rewritten to `LogicalOperator` — see `resources/dfa_rules.json`'s
    /// `WORD_ARITHMETIC`/`WORD_LOGICAL` split.
    fn is_mul_op(&self) -> bool {
        match self.peek() {
            Some(t) if t.kind == TokenKind::ArithmeticOperator => {
                matches!(t.value.as_str(), "*" | "/")
                    || t.value_eq_ignore_case("mod")
                    || t.value_eq_ignore_case("bagi")
            }
            Some(t) if t.kind == TokenKind::LogicalOperator => t.value_eq_ignore_case("dan"),
            _ => false,
        }
    }

    /// `factor ::= NUMBER | STRING | CHAR | IDENT | IDENT '(' [param-list] ')' | '(' expression ')' | 'tidak' factor`
    fn parse_factor(&mut self) -> Result<Node, SyntaxParseError> {
        let Some(tok) = self.peek().cloned() else {
            let err = self.make_mismatch(TokenKind::Number, None);
            self.errors.push(err.clone());
            return Err(err);
        };

        match tok.kind {
            TokenKind::Number | TokenKind::StringLiteral | TokenKind::CharLiteral => {
                self.advance();
                Ok(Node::inner("<factor>", vec![Node::leaf(tok)]))
            }
            TokenKind::Identifier => {
                self.advance();
                if self.at_kind(TokenKind::LParenthesis) {
                    let lparen = self.advance().expect("checked present above");
                    let mut children = vec![Node::leaf(tok), Node::leaf(lparen)];
                    if !self.at_kind(TokenKind::RParenthesis) {
                        children.push(self.parse_param_list()?);
                    }
                    children.push(Node::leaf(self.expect(TokenKind::RParenthesis, None)?));
                    Ok(Node::inner("<factor>", children))
                } else if self.at_kind(TokenKind::LBracket) {
                    let lbracket = self.advance().expect("checked present above");
                    let index = self.parse_expression()?;
                    let rbracket = self.expect(TokenKind::RBracket, None)?;
                    Ok(Node::inner(
                        "<factor>",
                        vec![Node::leaf(tok), Node::leaf(lbracket), index, Node::leaf(rbracket)],
                    ))
                } else {
                    Ok(Node::inner("<factor>", vec![Node::leaf(tok)]))
                }
            }
            TokenKind::LParenthesis => {
                self.advance();
                let inner = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParenthesis, None)?;
                Ok(Node::inner(
                    "<factor>",
                    vec![Node::leaf(tok), inner, Node::leaf(rparen)],
                ))
            }
            TokenKind::LogicalOperator if tok.value_eq_ignore_case("tidak") => {
                self.advance();
                let operand = self.parse_factor()?;
                Ok(Node::inner("<factor>", vec![Node::leaf(tok), operand]))
            }
            _ => {
                let err = self.make_mismatch(TokenKind::Number, None);
                self.errors.push(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasindo_lex::{default_rules, tokenize};

    fn parse(src: &str) -> Result<Node, SyntaxParseError> {
        let rules = default_rules();
        let (tokens, errors) = tokenize(src, &rules);
        assert!(errors.is_empty(), "lexing {src:?} produced errors: {errors:?}");
        Parser::new(&tokens, ParserMode::Strict).parse_program()
    }

    #[test]
    fn parses_the_minimal_hello_program() {
        let tree = parse("program hello;\nvariabel x: integer;\nmulai x := 2 + 3 * 4 selesai.").unwrap();
        assert_eq!(tree.label, "<program>");
        assert_eq!(tree.children.len(), 4);
    }

    #[test]
    fn empty_compound_statement_is_legal() {
        let tree = parse("program p;\nmulai selesai.").unwrap();
        let body = &tree.children[2];
        assert_eq!(body.label, "<compound-stmt>");
        // just the `mulai` and `selesai` keyword leaves, no statements.
        assert_eq!(body.children.len(), 2);
    }

    #[test]
    fn trailing_semicolon_before_end_is_legal() {
        let tree = parse("program p;\nvariabel x: integer;\nmulai x := 1; selesai.").unwrap();
        assert!(tree.children[2].label == "<compound-stmt>");
    }

    #[test]
    fn for_loop_captures_downto_direction_token() {
        let tree = parse(
            "program p;\nvariabel i: integer;\nmulai untuk i := 10 turun_ke 1 lakukan i := i selesai.",
        )
        .unwrap();
        let body = &tree.children[2];
        let for_stmt = &body.children[1];
        assert_eq!(for_stmt.label, "<for-stmt>");
        assert_eq!(for_stmt.children[4].token.as_ref().unwrap().value, "turun_ke");
    }

    #[test]
    fn assignment_vs_call_disambiguation() {
        let tree = parse("program p;\nvariabel x: integer;\nmulai x := 1; escreve(x) selesai.").unwrap();
        let body = &tree.children[2];
        let assign = &body.children[1];
        let call = &body.children[3];
        assert_eq!(assign.label, "<assignment-stmt>");
        assert_eq!(call.label, "<proc-call>");
    }

    #[test]
    fn reserved_word_as_identifier_is_a_syntax_error() {
        let rules = default_rules();
        let (tokens, errs) = tokenize("program mod;", &rules);
        assert!(errs.is_empty());
        let result = Parser::new(&tokens, ParserMode::Strict).parse_program();
        assert!(matches!(result, Err(SyntaxParseError::TokenUnexpectedError { .. })));
    }

    #[test]
    fn diagnostic_mode_recovers_past_a_bad_statement() {
        let rules = default_rules();
        let (tokens, errs) = tokenize(
            "program p;\nvariabel x: integer;\nmulai := 1; x := 2 selesai.",
            &rules,
        );
        assert!(errs.is_empty());
        let mut parser = Parser::new(&tokens, ParserMode::Diagnostic);
        let tree = parser.parse_program().unwrap();
        assert!(!parser.errors().is_empty());
        let body = &tree.children[2];
        assert_eq!(body.children[1].label, "<error>");
    }
}
