//! Source code pane rendering with syntax highlighting
//!
//! Colors come from the lexer's own token stream, so what the pane shows is
//! exactly how the source was classified: an unknown token is drawn in the
//! error style where it sits, and a multi-line token (an unterminated
//! string) keeps its style across lines.
//!
//! Lines that carry a diagnostic get a red line number and a tinted
//! background.

use super::clamp_scroll;
use crate::parser::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source: &'a str,
    pub tokens: &'a [Token],
    /// 1-based lines that carry a diagnostic.
    pub error_lines: &'a [usize],
}

/// Per-character styles for the whole document, indexed by character
/// offset. Whitespace keeps the default style.
fn char_styles(chars: &[char], tokens: &[Token]) -> Vec<Style> {
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.fg); chars.len()];

    for token in tokens {
        let style = DEFAULT_THEME.lexeme_style(token);
        let start = token.offset().min(chars.len());
        let end = (start + token.lexeme.chars().count()).min(chars.len());
        for slot in &mut styles[start..end] {
            *slot = style;
        }
    }

    styles
}

/// Split the document into lines of styled spans, grouping runs of equal
/// style into one span.
pub fn highlight_lines(source: &str, tokens: &[Token]) -> Vec<Line<'static>> {
    let chars: Vec<char> = source.chars().collect();
    let styles = char_styles(&chars, tokens);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for (ch, style) in chars.iter().zip(&styles) {
        if *ch == '\n' {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        if *ch == '\r' {
            continue;
        }
        if *style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = *style;
        // Tabs would break the column alignment of the pane.
        if *ch == '\t' {
            run.push_str("    ");
        } else {
            run.push(*ch);
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if !spans.is_empty() || lines.is_empty() {
        lines.push(Line::from(spans));
    }

    lines
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    let lines = highlight_lines(data.source, data.tokens);
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, mut content_line)| {
            let line_num = idx + 1;
            let is_error = data.error_lines.contains(&line_num);

            let num_style = if is_error {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            if is_error {
                for span in &mut content_line.spans {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
