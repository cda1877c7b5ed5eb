//! The maximal-munch tokenizer driver (spec §4.2).
//!
//! [`Lexer`] owns the source text, the DFA rules, and a cursor; it has no
//! grammar knowledge of its own. At each step it replays the DFA from
//! `rules.initial_state` over the remaining input, remembering the furthest
//! position at which the DFA was in a final state, then commits to that
//! position — the classic "longest match wins, backtrack to it" tokenizer
//! shape, grounded directly on `original_source/src/lexer.py`.

use pasindo_util::Span;

use crate::dfa::DfaRules;
use crate::error::LexicalError;
use crate::token::{Token, TokenKind};

/// Drives the DFA over a source string, one token at a time.
pub struct Lexer<'a> {
    source: &'a [char],
    rules: &'a DfaRules,
    pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(chars: &'a [char], rules: &'a DfaRules) -> Self {
        Lexer {
            source: chars,
            rules,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.source.get(pos).copied()
    }

    fn advance_one(&mut self) {
        if let Some(c) = self.peek_at(self.pos) {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_to(&mut self, target: usize) {
        while self.pos < target {
            self.advance_one();
        }
    }

    /// Scans the next token, or `None` at end of input.
    ///
    /// Returns `Ok(None)` both at end of input and after a dropped
    /// (whitespace/comment) token or a recovered lexical error — callers
    /// should keep calling until `self.at_end()` to drain the stream, same
    /// as the original's `tokenize` loop.
    fn next_token_raw(&mut self) -> Result<Option<Token>, LexicalError> {
        if self.at_end() {
            return Ok(None);
        }

        let start_pos = self.pos;
        let start_line = self.line;
        let start_col = self.column;

        let mut state = self.rules.initial_state.as_str();
        let mut cursor = self.pos;

        let mut last_final: Option<(&str, usize)> = None;

        while let Some(c) = self.peek_at(cursor) {
            match self.rules.step(state, c) {
                Some(next) => {
                    state = next;
                    cursor += 1;
                    if self.rules.final_state(state).is_some() {
                        last_final = Some((state, cursor));
                    }
                }
                None => break,
            }
        }

        let Some((final_state, final_pos)) = last_final else {
            let bad_char = self.source[start_pos];
            self.advance_one();
            if bad_char == '\'' {
                return Err(LexicalError::UnterminatedString {
                    line: start_line,
                    column: start_col,
                });
            }
            return Err(LexicalError::UnexpectedChar {
                ch: bad_char,
                line: start_line,
                column: start_col,
            });
        };

        let lexeme: String = self.source[start_pos..final_pos].iter().collect();
        self.advance_to(final_pos);

        Ok(self.finalize(lexeme, final_state, start_line, start_col))
    }

    fn finalize(&self, lexeme: String, final_state: &str, line: u32, column: u32) -> Option<Token> {
        let info = self.rules.final_state(final_state)?;

        if info.ignore {
            return None;
        }

        let mut kind = TokenKind::from_rule_name(&info.token)?;
        let mut value = lexeme;

        if matches!(kind, TokenKind::Identifier) {
            let lower = value.to_ascii_lowercase();
            if self.rules.keywords.iter().any(|k| k == &lower) {
                kind = TokenKind::Keyword;
            } else if self.rules.word_arithmetic.iter().any(|k| k == &lower) {
                kind = TokenKind::ArithmeticOperator;
            } else if self.rules.word_logical.iter().any(|k| k == &lower) {
                kind = TokenKind::LogicalOperator;
            }
        }

        if matches!(kind, TokenKind::StringLiteral | TokenKind::CharLiteral) {
            // Strip the surrounding quotes and collapse `''` to `'`, per
            // spec §7's "String-literal normalization" boundary.
            let inner = &value[1..value.len() - 1];
            value = inner.replace("''", "'");
        }

        Some(Token::new(kind, value, line, column))
    }

    /// Scans the entire source, collecting every non-ignored token and every
    /// recovered lexical error. Lexical errors are non-fatal (spec §7): the
    /// scan continues past them so a caller sees every problem in one pass.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexicalError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while !self.at_end() {
            match self.next_token_raw() {
                Ok(Some(tok)) => tokens.push(tok),
                Ok(None) => {}
                Err(e) => errors.push(e),
            }
        }

        (tokens, errors)
    }
}

/// Tokenizes `source` against `rules`, returning every token and lexical
/// error found. This is the entry point `pasindo-drv` calls.
pub fn tokenize(source: &str, rules: &DfaRules) -> (Vec<Token>, Vec<LexicalError>) {
    let chars: Vec<char> = source.chars().collect();
    let lexer = Lexer::new(&chars, rules);
    lexer.tokenize()
}

/// Converts a token's line/column into a point [`Span`] for diagnostics.
///
/// `pasindo-lex` tracks position as line/column pairs (matching the
/// original's cursor), not byte offsets into a `SourceMap`; `pasindo-par`/
/// `pasindo-sem` want [`Span`]s for diagnostics, so this is the seam
/// between the two conventions.
pub fn token_span(token: &Token) -> Span {
    Span::point(token.line, token.column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::default_rules;

    fn toks(src: &str) -> Vec<Token> {
        let rules = default_rules();
        tokenize(src, &rules).0
    }

    #[test]
    fn tokenizes_hello_world_program() {
        let rules = default_rules();
        let (tokens, errors) =
            tokenize("program hello;\nvariabel x: integer;\nmulai x := 2 + 3 * 4 selesai.", &rules);
        assert!(errors.is_empty());
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,     // program
                TokenKind::Identifier,  // hello
                TokenKind::Semicolon,
                TokenKind::Keyword,     // variabel
                TokenKind::Identifier,  // x
                TokenKind::Colon,
                TokenKind::Keyword,     // integer
                TokenKind::Semicolon,
                TokenKind::Keyword,     // mulai
                TokenKind::Identifier,  // x
                TokenKind::AssignOperator,
                TokenKind::Number,      // 2
                TokenKind::ArithmeticOperator, // +
                TokenKind::Number,      // 3
                TokenKind::ArithmeticOperator, // *
                TokenKind::Number,      // 4
                TokenKind::Keyword,     // selesai
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn reserved_word_rewrite_classifies_mod_as_arithmetic_operator() {
        let tokens = toks("mod");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::ArithmeticOperator);
        assert_eq!(tokens[0].value, "mod");
    }

    #[test]
    fn word_logical_operators_classify_correctly() {
        let tokens = toks("dan atau tidak");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::LogicalOperator; 3]);
    }

    #[test]
    fn range_operator_splits_from_decimal_number() {
        let tokens = toks("1..5");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].value, "1");
        assert_eq!(tokens[1].kind, TokenKind::RangeOperator);
        assert_eq!(tokens[1].value, "..");
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].value, "5");
    }

    #[test]
    fn real_number_keeps_its_decimal_point() {
        let tokens = toks("3.14");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].value, "3.14");
    }

    #[test]
    fn string_literal_normalizes_doubled_quotes() {
        let tokens = toks("'it''s'");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].value, "it's");
    }

    #[test]
    fn single_char_literal_is_distinguished_from_string() {
        let tokens = toks("'a'");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[0].value, "a");
    }

    #[test]
    fn relational_operators_maximal_munch() {
        let tokens = toks("< <= <> > >= =");
        let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, vec!["<", "<=", "<>", ">", ">=", "="]);
    }

    #[test]
    fn brace_comments_are_dropped() {
        let tokens = toks("{ this is ignored }\nx");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "x");
    }

    #[test]
    fn unrecognized_character_is_reported_and_scanning_continues() {
        let rules = default_rules();
        let (tokens, errors) = tokenize("x @ y", &rules);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], LexicalError::UnexpectedChar { ch: '@', .. }));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let rules = default_rules();
        let (_, errors) = tokenize("'abc", &rules);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], LexicalError::UnterminatedString { .. }));
    }

    #[test]
    fn non_ascii_identifier_is_accepted() {
        let tokens = toks("variabel ketinggian: integer;");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].value, "ketinggian");
    }
}
