use crate::parser::grammar::{self, OperatorCategory};
use crate::parser::{Token, TokenKind};
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub identifier: Color,
    pub type_name: Color, // Cyan for type names
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    identifier: Color::Rgb(205, 214, 244),
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal for type names
};

impl Theme {
    /// Foreground style for a token of the given kind.
    pub fn token_style(&self, kind: TokenKind) -> Style {
        match kind {
            TokenKind::Keyword => Style::default().fg(self.keyword).add_modifier(Modifier::BOLD),
            TokenKind::Identifier => Style::default().fg(self.identifier),
            TokenKind::Number => Style::default().fg(self.number),
            TokenKind::String => Style::default().fg(self.string),
            TokenKind::Comment => Style::default().fg(self.comment).add_modifier(Modifier::ITALIC),
            TokenKind::Delimiter => Style::default().fg(self.primary),
            TokenKind::Operator => Style::default().fg(self.secondary),
            TokenKind::Unknown => Style::default()
                .fg(self.error)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            TokenKind::End => Style::default().fg(self.comment),
        }
    }

    /// Style for one token; operators are shaded by what they do.
    pub fn lexeme_style(&self, token: &Token) -> Style {
        if token.kind != TokenKind::Operator {
            return self.token_style(token.kind);
        }

        match grammar::operator_category(&token.lexeme) {
            Some(OperatorCategory::Assignment) => {
                Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
            }
            Some(OperatorCategory::Logical) => Style::default().fg(self.keyword),
            Some(OperatorCategory::Equality | OperatorCategory::Relational) => {
                Style::default().fg(self.type_name)
            }
            Some(OperatorCategory::Arithmetic) | None => self.token_style(token.kind),
        }
    }

    pub fn border_style(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;

    #[test]
    fn test_operators_shaded_by_category() {
        let tokens = tokenize("x = a && b < c + 1");
        let styles: Vec<Style> = tokens.iter().map(|t| DEFAULT_THEME.lexeme_style(t)).collect();

        assert_eq!(styles[1].fg, Some(DEFAULT_THEME.fg));
        assert_eq!(styles[3].fg, Some(DEFAULT_THEME.keyword));
        assert_eq!(styles[5].fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(styles[7], DEFAULT_THEME.token_style(TokenKind::Operator));
        assert_eq!(styles[0], DEFAULT_THEME.token_style(TokenKind::Identifier));
    }
}
