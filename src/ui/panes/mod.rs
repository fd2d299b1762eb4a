//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code colored from the token stream, diagnostic lines marked
//! - [`tokens`]: Token table, optionally filtered to unknown tokens
//! - [`ast`]: Indented syntax tree, or the diagnostics when there is none
//! - [`status`]: Status bar with the outcome and keybindings
//!
//! Each pane module exports a `render_*` function that draws into the given
//! area and clamps the scroll offset it is handed.

pub mod ast;
pub mod source;
pub mod status;
pub mod tokens;

// Re-export render functions for convenience
pub use ast::render_ast_pane;
pub use source::{render_source_pane, SourceRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use tokens::render_tokens_pane;

/// Keep `offset` inside `0..=total - visible`.
pub(crate) fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
