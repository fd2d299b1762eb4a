//! User-facing diagnostics
//!
//! Every failure the front end reports (an unknown token, the first syntax
//! violation, or an internal invariant break) is rendered through
//! [`Diagnostic`] so the output always has the same shape:
//!
//! ```text
//! [Row <line>, Col <column>]: <message> (found '<lexeme>', kind <kind>)
//! ```
//!
//! This is a pure formatting layer; it performs no recovery.

use super::lexer::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Which stage produced the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Lexical,
    Syntax,
    Internal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Lexical => write!(f, "lexical error"),
            Stage::Syntax => write!(f, "syntax error"),
            Stage::Internal => write!(f, "internal error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub lexeme: String,
    pub kind: TokenKind,
}

impl Diagnostic {
    /// Build a diagnostic pointing at `token`.
    pub fn at_token(stage: Stage, token: &Token, message: impl Into<String>) -> Self {
        Diagnostic {
            stage,
            line: token.line(),
            column: token.column(),
            message: message.into(),
            lexeme: token.lexeme.clone(),
            kind: token.kind,
        }
    }

    /// Diagnostic for an `Unknown` token left by the lexer.
    pub fn unknown_token(token: &Token) -> Self {
        let message = if token.lexeme.starts_with('"') && !is_closed_string(&token.lexeme) {
            "Unterminated string literal"
        } else {
            "Unknown token"
        };
        Diagnostic::at_token(Stage::Lexical, token, message)
    }
}

fn is_closed_string(lexeme: &str) -> bool {
    lexeme.len() >= 2 && lexeme.ends_with('"')
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Row {}, Col {}]: {} (found '{}', kind {})",
            self.line, self.column, self.message, self.lexeme, self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::SourceLocation;

    #[test]
    fn test_uniform_format() {
        let token = Token::new(TokenKind::Delimiter, ";", SourceLocation::new(18, 1, 19));
        let diag = Diagnostic::at_token(Stage::Syntax, &token, "Expected a primary expression");

        assert_eq!(
            diag.to_string(),
            "[Row 1, Col 19]: Expected a primary expression (found ';', kind Delimiter)"
        );
    }

    #[test]
    fn test_unknown_token_messages() {
        let stray = Token::new(TokenKind::Unknown, "#", SourceLocation::new(0, 1, 1));
        assert_eq!(Diagnostic::unknown_token(&stray).message, "Unknown token");

        let open = Token::new(TokenKind::Unknown, "\"abc", SourceLocation::new(0, 1, 1));
        assert_eq!(
            Diagnostic::unknown_token(&open).message,
            "Unterminated string literal"
        );
        assert_eq!(Diagnostic::unknown_token(&open).stage, Stage::Lexical);
    }
}
