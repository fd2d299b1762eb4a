// Property-based tests for the tokenizer and parser
//
// These check invariants over random inputs rather than fixed examples:
// termination and the end marker, offset ordering, lossless round-tripping
// of lexemes plus whitespace, and repeatable results.

use classfront::analysis::analyze;
use classfront::config::{AnalyzerConfig, CommentStyle};
use classfront::parser::{parse, tokenize, Lexer, Token, TokenKind};
use proptest::prelude::*;

/// Rebuild the source from tokens, filling gaps with the original
/// characters and asserting every gap is whitespace.
fn reassemble(source: &str, tokens: &[Token]) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::new();
    let mut cursor = 0;

    for token in tokens {
        let gap: String = chars[cursor..token.offset()].iter().collect();
        assert!(
            gap.chars().all(char::is_whitespace),
            "non-whitespace gap {gap:?} before {token:?}"
        );
        out.push_str(&gap);
        out.push_str(&token.lexeme);
        cursor = token.offset() + token.lexeme.chars().count();
    }

    out
}

/// Fragments of the class language, glued with random whitespace.
fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "class", "A", "B", "{", "}", "int", "bool", "void", "x", "y", "(", ")", "[", "]", ";",
        ",", ".", "=", "==", "+", "-", "*", "<", "&&", "||", "!", "if", "else", "while",
        "return", "true", "false", "42", "3.5", "\"s\"", "public", "static", "// c\n",
    ])
}

fn fragment_soup() -> impl Strategy<Value = String> {
    prop::collection::vec((fragment(), "[ \t\n]{1,2}"), 0..60).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(frag, ws)| format!("{frag}{ws}"))
            .collect()
    })
}

#[test]
fn prop_single_end_marker_last() {
    proptest!(|(source in "\\PC{0,300}")| {
        let tokens = tokenize(&source);

        prop_assert!(!tokens.is_empty());
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::End).count(), 1);
        prop_assert_eq!(tokens.last().map(|t| t.lexeme.as_str()), Some(""));
    });
}

#[test]
fn prop_offsets_non_decreasing() {
    proptest!(|(source in "\\PC{0,300}")| {
        let tokens = tokenize(&source);

        for pair in tokens.windows(2) {
            prop_assert!(pair[0].offset() <= pair[1].offset());
        }
        // Every token but the end marker consumes at least one character.
        prop_assert!(tokens[..tokens.len() - 1].iter().all(|t| !t.lexeme.is_empty()));
    });
}

#[test]
fn prop_round_trip_with_whitespace() {
    proptest!(|(source in "\\PC{0,300}")| {
        let tokens = tokenize(&source);
        prop_assert_eq!(reassemble(&source, &tokens), source);
    });
}

#[test]
fn prop_round_trip_delimited_comments() {
    let config = AnalyzerConfig::default().with_comment_style(CommentStyle::Delimited);
    proptest!(|(source in "([a-z /\n]|//){0,120}")| {
        let tokens = Lexer::with_config(&source, &config).tokenize();
        prop_assert_eq!(reassemble(&source, &tokens), source);
    });
}

#[test]
fn prop_well_formed_numbers_are_single_tokens() {
    proptest!(|(literal in "[0-9]{1,6}(\\.[0-9]{1,4})?([eE][+-]?[0-9]{1,3})?")| {
        let tokens = tokenize(&literal);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::Number);
        prop_assert_eq!(&tokens[0].lexeme, &literal);
    });
}

#[test]
fn prop_quoted_text_is_single_string() {
    proptest!(|(body in "[^\"]{0,40}")| {
        let literal = format!("\"{body}\"");
        let tokens = tokenize(&literal);
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, TokenKind::String);

        let open = format!("\"{body}");
        let tokens = tokenize(&open);
        prop_assert_eq!(tokens[0].kind, TokenKind::Unknown);
    });
}

#[test]
fn prop_parser_never_panics_on_fragments() {
    proptest!(|(source in fragment_soup())| {
        let _ = parse(&source);
    });
}

#[test]
fn prop_analysis_is_idempotent() {
    let config = AnalyzerConfig::default();
    proptest!(|(source in fragment_soup())| {
        prop_assert_eq!(analyze(&source, &config), analyze(&source, &config));
    });
}
