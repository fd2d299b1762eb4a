//! Syntax tree pane
//!
//! Shows the indented tree on success. On failure the pane lists the
//! diagnostics instead, since no tree exists.

use super::clamp_scroll;
use crate::analysis::Outcome;
use crate::parser::AstNode;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding},
    Frame,
};

/// One line per node, indented two spaces per depth level.
pub fn tree_lines(root: &AstNode) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    push_node(root, 0, &mut lines);
    lines
}

fn push_node(node: &AstNode, depth: usize, lines: &mut Vec<Line<'static>>) {
    let mut spans = vec![
        Span::raw("  ".repeat(depth)),
        Span::styled(
            node.kind.name(),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
    ];
    if let Some(value) = node.value() {
        spans.push(Span::styled(": ", Style::default().fg(DEFAULT_THEME.comment)));
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
    }
    spans.push(Span::styled(
        format!("  {}:{}", node.location.line, node.location.column),
        Style::default().fg(DEFAULT_THEME.comment),
    ));
    lines.push(Line::from(spans));

    for child in &node.children {
        push_node(child, depth + 1, lines);
    }
}

fn outcome_lines(outcome: &Outcome) -> Vec<Line<'static>> {
    let error_style = Style::default()
        .fg(DEFAULT_THEME.error)
        .add_modifier(Modifier::BOLD);

    match outcome {
        Outcome::Parsed(ast) => tree_lines(ast),
        Outcome::Empty => vec![Line::styled(
            "(empty source)",
            Style::default().fg(DEFAULT_THEME.comment),
        )],
        Outcome::LexicalFailure(diags) => {
            let mut lines = vec![Line::styled(
                "Parsing skipped: the source has unknown tokens",
                error_style,
            )];
            lines.extend(
                diags
                    .iter()
                    .map(|d| Line::styled(d.to_string(), Style::default().fg(DEFAULT_THEME.error))),
            );
            lines
        }
        Outcome::SyntaxFailure(diag) => vec![
            Line::styled("Syntax error", error_style),
            Line::styled(diag.to_string(), Style::default().fg(DEFAULT_THEME.error)),
        ],
    }
}

/// Render the syntax tree pane
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    outcome: &Outcome,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border_style(is_focused))
        .padding(Padding::new(1, 0, 0, 0));

    let lines = outcome_lines(outcome);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(ListItem::new)
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tree_lines_indent_by_depth() {
        let ast = parse("class A { int x; }").unwrap();
        let lines: Vec<String> = tree_lines(&ast).iter().map(text).collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Program"));
        assert!(lines[1].starts_with("  ClassDecl: A"));
        assert!(lines[3].starts_with("      Type: int  1:11"));
    }

    #[test]
    fn test_failure_lists_diagnostics() {
        let analysis = crate::analysis::analyze("class A { # }", &Default::default());
        let lines: Vec<String> = outcome_lines(&analysis.outcome).iter().map(text).collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Unknown token"));
    }
}
