//! Class-language front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`grammar`]: Static keyword, operator and delimiter tables
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//! - [`diagnostic`]: Uniform error messages
//!
//! # Supported Language
//!
//! - Classes with fields and methods, optional `public`/`private`/`static`
//! - Types: `int`, `bool`, `void` (return type only), class names for locals,
//!   arrays via `[]` suffixes
//! - Statements: blocks, `if`/`else`, `while`, `return`, local declarations,
//!   expression statements
//! - Expressions: assignment, `|| && == != < > <= >= + - * / %`, prefix
//!   `!`/`-`, calls, indexing, member access
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule.
//! No external parser generator dependencies.

pub mod ast;
pub mod diagnostic;
pub mod grammar;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use ast::{AstNode, NodeKind, SourceLocation};
pub use diagnostic::{Diagnostic, Stage};
pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parse::{parse, parse_tokens, ParseError, Parser, MAX_NESTING_DEPTH};
