//! Lexer (tokenizer) for class-language source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Lexing never fails: anything that matches no token category comes
//! out as an [`TokenKind::Unknown`] token, and the caller decides whether that
//! blocks parsing. The stream always ends with exactly one
//! [`TokenKind::End`] token whose lexeme is empty.
//!
//! At each position, after skipping whitespace, the scanners are tried in
//! this order: string literal, `//` comment, number, word, operator or
//! delimiter, and finally a one-character `Unknown`.

use super::ast::SourceLocation;
use super::grammar;
use crate::config::{AnalyzerConfig, CommentStyle};
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Operator,
    Delimiter,
    Keyword,
    Identifier,
    Number,
    String,
    Comment,
    Unknown,
    End,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Operator => "Operator",
            TokenKind::Delimiter => "Delimiter",
            TokenKind::Keyword => "Keyword",
            TokenKind::Identifier => "Identifier",
            TokenKind::Number => "Number",
            TokenKind::String => "String",
            TokenKind::Comment => "Comment",
            TokenKind::Unknown => "Unknown",
            TokenKind::End => "End",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, positioned slice of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    #[serde(flatten)]
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn offset(&self) -> usize {
        self.location.offset
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    pub fn is_unknown(&self) -> bool {
        self.kind == TokenKind::Unknown
    }

    /// `true` if this token has the given kind and exact lexeme.
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::End => write!(f, "end of input"),
            kind => write!(f, "{} '{}'", kind.name().to_lowercase(), self.lexeme),
        }
    }
}

/// Tokenize `source` with the default configuration.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Lexer for class-language source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    comment_style: CommentStyle,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self::with_config(input, &AnalyzerConfig::default())
    }

    pub fn with_config(input: &str, config: &AnalyzerConfig) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            comment_style: config.comment_style,
        }
    }

    /// Tokenize the entire input
    ///
    /// Every iteration consumes at least one character, so this terminates in
    /// time linear in the input length.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::End, "", self.current_location()));
                break;
            }

            let token = self.next_token();
            trace!(kind = %token.kind, lexeme = %token.lexeme, line = token.line(), column = token.column(), "token");
            tokens.push(token);
        }

        debug!(
            count = tokens.len(),
            unknown = tokens.iter().filter(|t| t.is_unknown()).count(),
            "tokenized source"
        );
        tokens
    }

    /// Scan one token starting at the current (non-whitespace) character.
    fn next_token(&mut self) -> Token {
        let start = self.position;
        let loc = self.current_location();
        let ch = self.input[start];

        match ch {
            '"' => self.string_literal(start, loc),
            '/' if self.peek_ahead(1) == Some('/') => self.comment(start, loc),
            '0'..='9' => self.number_literal(start, loc),
            'a'..='z' | 'A'..='Z' => self.identifier_or_keyword(start, loc),
            _ => self.operator_or_delimiter(start, loc),
        }
    }

    /// Parse string literal, up to and including the closing quote
    fn string_literal(&mut self, start: usize, loc: SourceLocation) -> Token {
        self.advance(); // opening quote
        let mut closed = false;

        while let Some(ch) = self.advance() {
            if ch == '"' {
                closed = true;
                break;
            }
        }

        let lexeme = self.lexeme_from(start);
        if closed && grammar::is_string(&lexeme) {
            Token::new(TokenKind::String, lexeme, loc)
        } else {
            Token::new(TokenKind::Unknown, lexeme, loc)
        }
    }

    /// Parse a `//` comment according to the configured style
    fn comment(&mut self, start: usize, loc: SourceLocation) -> Token {
        self.advance();
        self.advance();

        match self.comment_style {
            CommentStyle::RestOfLine => {
                self.skip_line();
                Token::new(TokenKind::Comment, self.lexeme_from(start), loc)
            }
            CommentStyle::Delimited => {
                while let Some(ch) = self.peek() {
                    if ch == '\n' {
                        break;
                    }
                    if ch == '/' && self.peek_ahead(1) == Some('/') {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }

                let lexeme = self.lexeme_from(start);
                if grammar::is_delimited_comment(&lexeme) {
                    Token::new(TokenKind::Comment, lexeme, loc)
                } else {
                    Token::new(TokenKind::Unknown, lexeme, loc)
                }
            }
        }
    }

    /// Parse numeric literal: greedy scan over digits, `e`, `E`, `.`, `+`,
    /// `-`, then validate the captured text as a whole.
    fn number_literal(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self.peek().is_some_and(grammar::is_number_char) {
            self.advance();
        }

        let lexeme = self.lexeme_from(start);
        let kind = if grammar::is_number(&lexeme) {
            TokenKind::Number
        } else {
            TokenKind::Unknown
        };
        Token::new(kind, lexeme, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize, loc: SourceLocation) -> Token {
        while self.peek().is_some_and(|ch| ch.is_ascii_alphanumeric()) {
            self.advance();
        }

        let word = self.lexeme_from(start);
        let kind = if grammar::is_keyword(&word) {
            TokenKind::Keyword
        } else if grammar::is_identifier(&word) {
            TokenKind::Identifier
        } else {
            TokenKind::Unknown
        };
        Token::new(kind, word, loc)
    }

    /// Two-character operators win over one-character operators, which win
    /// over delimiters. Anything else is a one-character unknown token.
    fn operator_or_delimiter(&mut self, start: usize, loc: SourceLocation) -> Token {
        let ch = self.input[start];

        if let Some(op) = self
            .peek_ahead(1)
            .and_then(|next| grammar::two_char_operator(ch, next))
        {
            self.advance();
            self.advance();
            return Token::new(TokenKind::Operator, op, loc);
        }

        self.advance();
        let lexeme = ch.to_string();
        let kind = if grammar::is_operator(&lexeme) {
            TokenKind::Operator
        } else if grammar::is_delimiter(ch) {
            TokenKind::Delimiter
        } else {
            TokenKind::Unknown
        };
        Token::new(kind, lexeme, loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Consume up to, but not including, the next newline.
    fn skip_line(&mut self) {
        while self.peek().is_some_and(|ch| ch != '\n') {
            self.advance();
        }
    }

    fn lexeme_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position, self.line, self.column)
    }
}
