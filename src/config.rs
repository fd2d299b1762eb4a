//! Analyzer configuration
//!
//! The only knob today is how `//` comments are delimited. The grammar tables
//! of the language describe a `//...//` form while every program written in
//! it treats `//` as a rest-of-line comment, so both are supported and the
//! rest-of-line form is the default.

use serde::Serialize;

/// How the lexer delimits a comment that starts with `//`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CommentStyle {
    /// `//` runs to the end of the line (or input).
    #[default]
    RestOfLine,
    /// `//` runs to the next `//` on the same line; an unclosed comment is
    /// reported as an unknown token.
    Delimited,
}

/// Options shared by every stage of one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalyzerConfig {
    pub comment_style: CommentStyle,
}

impl AnalyzerConfig {
    pub fn with_comment_style(mut self, comment_style: CommentStyle) -> Self {
        self.comment_style = comment_style;
        self
    }
}
