//! Main TUI application state and logic

use crate::analysis::Analysis;
use crate::parser::Token;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Ast,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Ast => FocusedPane::Tokens,
        }
    }
}

/// The main application state
pub struct App {
    /// Shown in the status bar
    pub file_name: String,
    pub source: String,
    pub analysis: Analysis,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub ast_scroll: usize,

    /// Token table lists only `Unknown` tokens
    pub unknown_only: bool,

    /// Lines carrying a diagnostic, highlighted in the source pane
    pub error_lines: Vec<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(file_name: String, source: String, analysis: Analysis) -> Self {
        let mut error_lines: Vec<usize> = analysis.diagnostics().iter().map(|d| d.line).collect();
        error_lines.dedup();

        let status_message = analysis.summary();

        App {
            file_name,
            source,
            analysis,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            tokens_scroll: 0,
            ast_scroll: 0,
            unknown_only: false,
            error_lines,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Tokens the table currently shows
    pub fn visible_tokens(&self) -> Vec<&Token> {
        filter_tokens(&self.analysis, self.unknown_only)
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Source on the left, tokens and tree stacked on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        super::panes::render_source_pane(
            frame,
            columns[0],
            super::panes::SourceRenderData {
                source: &self.source,
                tokens: &self.analysis.tokens,
                error_lines: &self.error_lines,
            },
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let tokens = filter_tokens(&self.analysis, self.unknown_only);
        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &tokens,
            self.unknown_only,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            right_rows[1],
            &self.analysis.outcome,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            super::panes::StatusRenderData {
                file_name: &self.file_name,
                message: &self.status_message,
                is_success: self.analysis.is_success(),
                unknown_only: self.unknown_only,
            },
        );
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Ast => &mut self.ast_scroll,
        }
    }

    /// Handle keyboard events
    ///
    /// Scrolling past the end is clamped by the panes on the next render.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(PAGE);
            }
            KeyCode::Home => {
                *self.focused_scroll() = 0;
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                self.unknown_only = !self.unknown_only;
                self.tokens_scroll = 0;
                self.status_message = if self.unknown_only {
                    format!(
                        "Showing {} unknown token(s)",
                        self.analysis.unknown_tokens().count()
                    )
                } else {
                    self.analysis.summary()
                };
            }
            _ => {}
        }
    }
}

fn filter_tokens(analysis: &Analysis, unknown_only: bool) -> Vec<&Token> {
    if unknown_only {
        analysis.unknown_tokens().collect()
    } else {
        analysis.tokens.iter().collect()
    }
}
