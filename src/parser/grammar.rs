//! Static grammar tables shared by the lexer and the parser
//!
//! Everything in here is immutable data: the keyword set, operator sets split
//! by category, the delimiter set, and the literal-shape validators used by
//! the lexer to decide between a real token and an `Unknown` one.
//!
//! The sets are built lazily on first use and never mutated afterwards, so
//! concurrent tokenizer/parser runs can read them without locking.

use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Reserved words of the language.
pub const KEYWORDS: [&str; 13] = [
    "class", "public", "true", "false", "private", "static", "void", "if", "else", "while",
    "int", "return", "bool",
];

/// Member modifiers accepted (in any order, any number) before a member type.
pub const MODIFIERS: [&str; 3] = ["public", "private", "static"];

/// Two-character operators, tried before the one-character ones.
pub const TWO_CHAR_OPERATORS: [&str; 6] = ["||", "&&", "==", "!=", "<=", ">="];

/// One-character operators.
pub const ONE_CHAR_OPERATORS: [char; 9] = ['=', '+', '-', '*', '/', '%', '<', '>', '!'];

/// One-character delimiters.
pub const DELIMITERS: [char; 10] = ['(', ')', '{', '}', '[', ']', ';', ',', '.', ':'];

/// Operators consumed by each precedence level of the expression grammar,
/// loosest first.
pub const ASSIGNMENT_OPERATOR: &str = "=";
pub const LOGICAL_OR_OPERATORS: [&str; 1] = ["||"];
pub const LOGICAL_AND_OPERATORS: [&str; 1] = ["&&"];
pub const EQUALITY_OPERATORS: [&str; 2] = ["==", "!="];
pub const RELATIONAL_OPERATORS: [&str; 4] = ["<", ">", "<=", ">="];
pub const ADDITIVE_OPERATORS: [&str; 2] = ["+", "-"];
pub const MULTIPLICATIVE_OPERATORS: [&str; 3] = ["*", "/", "%"];
pub const UNARY_OPERATORS: [&str; 2] = ["!", "-"];

/// Characters a numeric lexeme may be scanned from (validated afterwards).
pub const NUMBER_CHARS: [char; 5] = ['e', 'E', '.', '+', '-'];

/// Operator families, one per precedence level that consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Assignment,
    Logical,
    Equality,
    Relational,
    Arithmetic,
}

static KEYWORD_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

static OPERATOR_SET: LazyLock<FxHashSet<String>> = LazyLock::new(|| {
    TWO_CHAR_OPERATORS
        .iter()
        .map(|op| op.to_string())
        .chain(ONE_CHAR_OPERATORS.iter().map(|ch| ch.to_string()))
        .collect()
});

pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word)
}

pub fn is_modifier(word: &str) -> bool {
    MODIFIERS.contains(&word)
}

pub fn is_operator(lexeme: &str) -> bool {
    OPERATOR_SET.contains(lexeme)
}

/// The two-character operator spelled `first` `second`, if any.
pub fn two_char_operator(first: char, second: char) -> Option<&'static str> {
    TWO_CHAR_OPERATORS.iter().copied().find(|op| {
        let mut chars = op.chars();
        chars.next() == Some(first) && chars.next() == Some(second)
    })
}

pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Whether `ch` may continue a numeric lexeme during the greedy scan.
pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || NUMBER_CHARS.contains(&ch)
}

/// Category of an operator lexeme, `None` if it is not an operator.
///
/// `!` is logical (prefix negation); `-` is arithmetic even when used as a
/// prefix.
pub fn operator_category(lexeme: &str) -> Option<OperatorCategory> {
    if lexeme == ASSIGNMENT_OPERATOR {
        Some(OperatorCategory::Assignment)
    } else if in_level(&LOGICAL_OR_OPERATORS, lexeme)
        || in_level(&LOGICAL_AND_OPERATORS, lexeme)
        || lexeme == "!"
    {
        Some(OperatorCategory::Logical)
    } else if in_level(&EQUALITY_OPERATORS, lexeme) {
        Some(OperatorCategory::Equality)
    } else if in_level(&RELATIONAL_OPERATORS, lexeme) {
        Some(OperatorCategory::Relational)
    } else if in_level(&ADDITIVE_OPERATORS, lexeme) || in_level(&MULTIPLICATIVE_OPERATORS, lexeme) {
        Some(OperatorCategory::Arithmetic)
    } else {
        None
    }
}

fn in_level(level: &[&str], lexeme: &str) -> bool {
    level.iter().any(|op| *op == lexeme)
}

/// `[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`, anchored at both ends.
pub fn is_number(lexeme: &str) -> bool {
    let bytes = lexeme.as_bytes();
    let mut i = digit_run(bytes, 0);
    if i == 0 {
        return false;
    }

    if bytes.get(i) == Some(&b'.') {
        let end = digit_run(bytes, i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let end = digit_run(bytes, i);
        if end == i {
            return false;
        }
        i = end;
    }

    i == bytes.len()
}

fn digit_run(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// `[a-zA-Z][a-zA-Z0-9]*`
pub fn is_identifier(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// `"[^"]*"`: opening and closing quote, no quote in between.
pub fn is_string(lexeme: &str) -> bool {
    lexeme.len() >= 2
        && lexeme.starts_with('"')
        && lexeme.ends_with('"')
        && !lexeme[1..lexeme.len() - 1].contains('"')
}

/// `//...//` on a single line.
pub fn is_delimited_comment(lexeme: &str) -> bool {
    lexeme.len() >= 4
        && lexeme.starts_with("//")
        && lexeme.ends_with("//")
        && !lexeme.contains('\n')
}
