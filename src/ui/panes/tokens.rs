//! Token table pane

use super::clamp_scroll;
use crate::parser::Token;
use crate::report::display_lexeme;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Render the token table. `unknown_only` only changes the title; the
/// caller has already filtered `tokens`.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[&Token],
    unknown_only: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = if unknown_only {
        format!(" Tokens: unknown only ({}) ", tokens.len())
    } else {
        format!(" Tokens ({}) ", tokens.len())
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Borders (2) plus the header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    clamp_scroll(scroll_offset, tokens.len(), visible_height);

    let rows: Vec<Row> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|token| {
            let style = DEFAULT_THEME.lexeme_style(token);
            Row::new(vec![
                Span::styled(token.kind.name(), style),
                Span::styled(display_lexeme(&token.lexeme), style),
                Span::raw(token.offset().to_string()),
                Span::raw(format!("{}:{}", token.line(), token.column())),
            ])
        })
        .collect();

    let header = Row::new(vec!["Kind", "Value", "Offset", "Row:Col"]).style(
        Style::default()
            .fg(DEFAULT_THEME.type_name)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(10),
        Constraint::Min(8),
        Constraint::Length(6),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
