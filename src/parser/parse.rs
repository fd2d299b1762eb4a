//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, and the parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: classes, members, parameters and types
//! - `statements`: blocks, `if`, `while`, `return`, local declarations
//! - `expressions`: the precedence ladder, postfix chains and primaries
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Parsing is one-token-lookahead predictive except for the statement that
//! starts with an identifier, which is resolved by a speculative parse that
//! rewinds the cursor with [`Parser::mark`] / [`Parser::reset`]. The first
//! violated expectation aborts the parse; no partial tree is returned.

use crate::parser::ast::*;
use crate::parser::diagnostic::{Diagnostic, Stage};
use crate::parser::lexer::{Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The current token does not satisfy the active rule.
    #[error("{0}")]
    Syntax(Diagnostic),
    /// The token stream broke an invariant the parser relies on.
    #[error("{0}")]
    Internal(Diagnostic),
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            ParseError::Syntax(diag) | ParseError::Internal(diag) => diag,
        }
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        match self {
            ParseError::Syntax(diag) | ParseError::Internal(diag) => diag,
        }
    }
}

/// Tokenize and parse `source` in one go. Unknown tokens are not gated here;
/// they simply fail the grammar where they appear.
pub fn parse(source: &str) -> Result<AstNode, ParseError> {
    Parser::from_source(source)?.parse_program()
}

/// Parse an already tokenized source. Comment tokens are ignored.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens)?.parse_program()
}

/// Deepest nesting of statements and parenthesized, prefixed or chained
/// assignment expressions the parser accepts. Past this the parse fails with
/// a syntax error instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Cursor position saved before a speculative parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark(usize);

/// Recursive descent parser for the class language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Recursive rules currently open; see [`MAX_NESTING_DEPTH`].
    pub(crate) depth: usize,
}

impl Parser {
    /// Build a parser over `tokens`, dropping comments. The stream must end
    /// with exactly one `End` token.
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        let tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();

        let end_count = tokens.iter().filter(|t| t.kind == TokenKind::End).count();
        match tokens.last() {
            Some(last) if last.kind == TokenKind::End && end_count == 1 => {}
            Some(last) => {
                return Err(ParseError::Internal(Diagnostic::at_token(
                    Stage::Internal,
                    last,
                    "Token stream must end with a single end marker",
                )));
            }
            None => {
                let end = Token::new(TokenKind::End, "", SourceLocation::new(0, 1, 1));
                return Err(ParseError::Internal(Diagnostic::at_token(
                    Stage::Internal,
                    &end,
                    "Token stream is empty",
                )));
            }
        }

        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
        })
    }

    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        Self::new(lexer.tokenize())
    }

    /// Parse the entire program: zero or more class declarations
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let mut classes = Vec::new();

        while !self.is_at_end() {
            classes.push(self.parse_class_declaration()?);
        }

        debug!(classes = classes.len(), "parsed program");
        Ok(AstNode::new(NodeKind::Program, classes, location))
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.peek().is(kind, lexeme)
    }

    pub(crate) fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_delimiter(&self, lexeme: &str) -> bool {
        self.check(TokenKind::Delimiter, lexeme)
    }

    pub(crate) fn check_keyword(&self, lexeme: &str) -> bool {
        self.check(TokenKind::Keyword, lexeme)
    }

    pub(crate) fn check_operator(&self, lexeme: &str) -> bool {
        self.check(TokenKind::Operator, lexeme)
    }

    /// Operator at the cursor if it is one of `ops`.
    pub(crate) fn check_operator_in(&self, ops: &[&str]) -> Option<String> {
        let token = self.peek();
        (token.kind == TokenKind::Operator && ops.contains(&token.lexeme.as_str()))
            .then(|| token.lexeme.clone())
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind, lexeme: &str) -> bool {
        if self.check(kind, lexeme) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token. The cursor never moves past `End`.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::End
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        let index = (self.position + n).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark(self.position)
    }

    pub(crate) fn reset(&mut self, mark: Mark) {
        self.position = mark.0;
    }

    /// Run a recursive rule one nesting level deeper.
    ///
    /// Fails at the current token once [`MAX_NESTING_DEPTH`] levels are open.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            debug!(depth = self.depth, line = self.peek().line(), "nesting limit reached");
            return Err(self.error("Nesting too deep"));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Syntax error at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.peek(), message)
    }

    pub(crate) fn error_at(&self, token: &Token, message: impl Into<String>) -> ParseError {
        ParseError::Syntax(Diagnostic::at_token(Stage::Syntax, token, message))
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        lexeme: &str,
        ctx: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind, lexeme) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected '{lexeme}' {ctx}")))
        }
    }

    pub(crate) fn expect_delimiter(&mut self, lexeme: &str, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Delimiter, lexeme, ctx)
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_delimiter("(", ctx)
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_delimiter(")", ctx)
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_delimiter("{", ctx)
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_delimiter("}", ctx)
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_delimiter(";", ctx)
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Token, ParseError> {
        if self.check_kind(TokenKind::Identifier) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected identifier {ctx}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_program() {
        let program = parse("  // nothing here\n").unwrap();

        assert_eq!(program.kind, NodeKind::Program);
        assert!(program.children.is_empty());
    }

    #[test]
    fn test_parse_simple_class() {
        let program = parse("class A { int x; }").unwrap();

        assert_eq!(program.children.len(), 1);
        let class = &program.children[0];
        assert_eq!(class.kind, NodeKind::ClassDecl);
        assert_eq!(class.value(), Some("A"));
        assert_eq!(class.children.len(), 1);
    }

    #[test]
    fn test_comments_do_not_affect_lookahead() {
        let source = "class // head\n A { // body\n int // type\n x; }";
        let with_comments = parse(source).unwrap();
        let without = parse("class A { int x; }").unwrap();

        assert_eq!(with_comments.to_string(), without.to_string());
    }

    #[test]
    fn test_missing_end_is_internal_error() {
        let tokens = vec![Token::new(
            TokenKind::Keyword,
            "class",
            SourceLocation::new(0, 1, 1),
        )];

        match Parser::new(tokens) {
            Err(ParseError::Internal(diag)) => assert_eq!(diag.stage, Stage::Internal),
            _ => panic!("Expected internal error"),
        }
        assert!(matches!(Parser::new(Vec::new()), Err(ParseError::Internal(_))));
    }

    #[test]
    fn test_cursor_stays_on_end() {
        let mut parser = Parser::from_source("").unwrap();

        assert_eq!(parser.advance().kind, TokenKind::End);
        assert_eq!(parser.advance().kind, TokenKind::End);
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_nested_restores_depth() {
        let mut parser = Parser::from_source("x").unwrap();

        let inner = parser.nested(|p| p.nested(|p| Ok(p.depth))).unwrap();
        assert_eq!(inner, 2);
        assert_eq!(parser.depth, 0);

        let err = parser
            .nested(|p| Err::<(), _>(p.error("Expected type")))
            .unwrap_err();
        assert_eq!(err.diagnostic().message, "Expected type");
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_nested_fails_at_limit() {
        let mut parser = Parser::from_source("x").unwrap();
        parser.depth = MAX_NESTING_DEPTH;

        let err = parser.nested(|_| Ok(())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "[Row 1, Col 1]: Nesting too deep (found 'x', kind Identifier)"
        );
    }

    #[test]
    fn test_top_level_must_be_class() {
        let err = parse("int x;").unwrap_err();

        assert_eq!(
            err.to_string(),
            "[Row 1, Col 1]: Expected 'class' at top level (found 'int', kind Keyword)"
        );
    }
}
