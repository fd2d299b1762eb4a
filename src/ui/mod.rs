//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, token filter
//! - **[`panes`]**: render functions for each visible pane (source, tokens,
//!   syntax tree, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source and
//! its [`Analysis`] and call [`App::run`] to start the event loop.
//!
//! [`Analysis`]: crate::analysis::Analysis
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
