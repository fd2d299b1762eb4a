//! # Introduction
//!
//! classfront is the front end for a small class-based language: a lexer
//! that classifies every character of a source document into tokens, and a
//! recursive-descent parser that turns the token stream into an abstract
//! syntax tree or reports the first syntax error with its position.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → (unknown-token gate) → Parser → AST | Diagnostic
//! ```
//!
//! 1. [`parser`] tokenises the source and builds the AST.
//! 2. [`analysis`] runs both stages and stops before parsing when the lexer
//!    produced unknown tokens.
//! 3. [`report`] renders tokens and trees as text tables, CSV and JSON.
//! 4. [`config`] holds the few policy knobs (currently the comment style).
//! 5. [`ui`] is a ratatui token and tree viewer; not part of the stable
//!    library API.
//!
//! ## Language
//!
//! Classes with fields and methods; types `int`, `bool`, `void` (return
//! type only) and arrays of those; `if/else`, `while`, `return`; the usual
//! arithmetic, relational, equality and logical operators; calls, indexing
//! and member access.

pub mod analysis;
pub mod config;
pub mod parser;
pub mod report;
pub mod ui;

pub use analysis::{analyze, Analysis, Outcome};
pub use config::{AnalyzerConfig, CommentStyle};
