//! Analysis pipeline
//!
//! Runs the two front-end stages over one document and decides what the
//! caller gets back:
//!
//! 1. Tokenize. This always succeeds and always yields the full token list,
//!    so lexical problems can be shown as a complete table.
//! 2. If any token is `Unknown`, stop with one lexical diagnostic per
//!    unknown token; parsing is not attempted.
//! 3. Otherwise parse and return either the `Program` tree or the single
//!    diagnostic of the first syntax violation.
//!
//! Every call is independent; nothing is cached between runs.

use crate::config::AnalyzerConfig;
use crate::parser::{AstNode, Diagnostic, Lexer, Parser, Token};
use serde::Serialize;
use tracing::{debug, info};

/// What the pipeline concluded about the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The source was empty or whitespace only.
    Empty,
    /// At least one unknown token; parsing was skipped.
    LexicalFailure(Vec<Diagnostic>),
    /// The first syntax violation.
    SyntaxFailure(Diagnostic),
    Parsed(AstNode),
}

/// Tokens plus outcome for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub outcome: Outcome,
}

impl Analysis {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Parsed(_))
    }

    pub fn ast(&self) -> Option<&AstNode> {
        match &self.outcome {
            Outcome::Parsed(ast) => Some(ast),
            _ => None,
        }
    }

    pub fn unknown_tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_unknown())
    }

    /// Diagnostics to show, in source order. Empty on success.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match &self.outcome {
            Outcome::LexicalFailure(diags) => diags.iter().collect(),
            Outcome::SyntaxFailure(diag) => vec![diag],
            Outcome::Empty | Outcome::Parsed(_) => Vec::new(),
        }
    }

    /// One-line summary suitable for a status bar.
    pub fn summary(&self) -> String {
        match &self.outcome {
            Outcome::Empty => "Source is empty".to_string(),
            Outcome::LexicalFailure(diags) => {
                format!("Lexical error: {} unknown token(s)", diags.len())
            }
            Outcome::SyntaxFailure(diag) => format!("Syntax error: {}", diag),
            Outcome::Parsed(ast) => format!(
                "Analysis succeeded: {} token(s), {} class(es)",
                self.tokens.len(),
                ast.children.len()
            ),
        }
    }
}

/// Tokenize, gate on unknown tokens, then parse.
pub fn analyze(source: &str, config: &AnalyzerConfig) -> Analysis {
    let tokens = Lexer::with_config(source, config).tokenize();

    if source.trim().is_empty() {
        debug!("empty source, skipping parse");
        return Analysis {
            tokens,
            outcome: Outcome::Empty,
        };
    }

    let unknown: Vec<Diagnostic> = tokens
        .iter()
        .filter(|t| t.is_unknown())
        .map(Diagnostic::unknown_token)
        .collect();
    if !unknown.is_empty() {
        info!(unknown = unknown.len(), "lexical analysis failed");
        return Analysis {
            tokens,
            outcome: Outcome::LexicalFailure(unknown),
        };
    }

    let outcome = match Parser::new(tokens.clone()).and_then(|mut p| p.parse_program()) {
        Ok(ast) => {
            info!(nodes = ast.node_count(), "analysis succeeded");
            Outcome::Parsed(ast)
        }
        Err(err) => {
            info!(error = %err, "syntax analysis failed");
            Outcome::SyntaxFailure(err.into_diagnostic())
        }
    };

    Analysis { tokens, outcome }
}
