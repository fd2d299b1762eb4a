//! Plain-text, CSV and JSON renderings of tokens and trees
//!
//! These are the formats the CLI writes to stdout or to a file. None of
//! them carry styling; the interactive viewer does its own rendering.

use crate::parser::{AstNode, Token};
use serde::Serialize;
use std::fmt::Write;

const CSV_HEADER: &str = "Kind,Value,Offset,Row,Column";

/// One row per token, every field quoted.
///
/// Embedded double quotes are doubled, so lexemes such as string literals
/// and unterminated strings spanning several lines stay in a single field.
pub fn tokens_to_csv(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for token in tokens {
        let fields = [
            token.kind.name().to_string(),
            token.lexeme.clone(),
            token.offset().to_string(),
            token.line().to_string(),
            token.column().to_string(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_quote(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn csv_quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Fixed-width table: kind, lexeme, then `row:column`.
///
/// Newlines and tabs inside a lexeme are shown escaped so each token stays
/// on one line.
pub fn render_token_table(tokens: &[Token]) -> String {
    let lexemes: Vec<String> = tokens.iter().map(|t| display_lexeme(&t.lexeme)).collect();
    let lexeme_width = lexemes
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max("Value".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<width$} {:>6}  Position",
        "Kind",
        "Value",
        "Offset",
        width = lexeme_width
    );

    for (token, lexeme) in tokens.iter().zip(&lexemes) {
        let _ = writeln!(
            out,
            "{:<10} {:<width$} {:>6}  {}:{}",
            token.kind.name(),
            lexeme,
            token.offset(),
            token.line(),
            token.column(),
            width = lexeme_width
        );
    }

    out
}

/// Lexeme as it appears in single-line listings.
pub fn display_lexeme(lexeme: &str) -> String {
    lexeme.replace('\n', "\\n").replace('\t', "\\t").replace('\r', "\\r")
}

/// Indented tree, two spaces per level.
pub fn render_tree(node: &AstNode) -> String {
    node.to_string()
}

/// Pretty-printed JSON for anything the front end produces.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
