//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Blocks: `{ ... }`
//! - Control flow: `if` / `else`, `while`
//! - `return` with an optional value
//! - The empty statement `;`
//! - Local variable declarations: `int x = 42;`, `Point[] ps;`
//! - Expression statements: assignments and calls
//!
//! # Grammar
//!
//! ```text
//! statement  ::= block | if_stmt | while_stmt | return_stmt | ";"
//!              | local_decl | expression ";"
//! block      ::= "{" statement* "}"
//! if_stmt    ::= "if" "(" expression ")" statement ( "else" statement )?
//! while_stmt ::= "while" "(" expression ")" statement
//! return_stmt ::= "return" expression? ";"
//! local_decl ::= local_type identifier array_suffix* ( "=" expression )? ";"
//! local_type ::= ( "int" | "bool" | identifier ) array_suffix*
//! ```
//!
//! A statement that starts with an identifier is either a declaration with a
//! class-typed variable (`Foo x;`, `Foo[] xs;`) or an expression (`x = 5;`,
//! `xs[0] = 1;`). The two share an arbitrarily long `[ ]` prefix, so the
//! parser speculatively reads `identifier ([ ])*` and commits to a
//! declaration only if another identifier follows; otherwise the cursor is
//! restored and the statement is parsed as an expression.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::declarations::TypeSpec;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::debug;

impl Parser {
    /// Parse block: { statements }
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        let open = self.expect_lbrace("to open block")?;

        let mut statements = Vec::new();
        while !self.check_delimiter("}") && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_rbrace("after block")?;

        Ok(AstNode::new(NodeKind::Block, statements, open.location))
    }

    /// Parse a statement, one nesting level below the enclosing one
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Parser::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<AstNode, ParseError> {
        if self.check_delimiter("{") {
            return self.parse_block();
        }

        if self.check_keyword("if") {
            return self.parse_if_statement();
        }

        if self.check_keyword("while") {
            return self.parse_while_statement();
        }

        if self.check_keyword("return") {
            return self.parse_return_statement();
        }

        if self.check_delimiter(";") {
            let token = self.advance();
            return Ok(AstNode::new(NodeKind::EmptyStmt, Vec::new(), token.location));
        }

        if self.check_keyword("int") || self.check_keyword("bool") || self.check_keyword("void") {
            let ty = self.parse_value_type()?;
            return self.parse_local_declaration(ty);
        }

        if self.check_kind(TokenKind::Identifier) {
            if let Some(ty) = self.speculate_class_typed_declaration() {
                return self.parse_local_declaration(ty);
            }
        }

        // Otherwise, it's an expression statement
        let expr = self.parse_expression()?;
        self.expect_semicolon("after expression")?;
        Ok(expr)
    }

    /// Try to read `identifier ([ ])*` followed by an identifier.
    ///
    /// On success the cursor sits on the variable name and the type is
    /// returned. On failure the cursor is restored to where it started and
    /// nothing has been built.
    fn speculate_class_typed_declaration(&mut self) -> Option<TypeSpec> {
        let mark = self.mark();
        let mut ty = TypeSpec::new(self.advance());

        while self.check_delimiter("[") && self.peek_ahead(1).is(TokenKind::Delimiter, "]") {
            self.advance();
            self.advance();
            ty.dims += 1;
        }

        if self.check_kind(TokenKind::Identifier) {
            debug!(type_name = %ty.base.lexeme, line = ty.base.line(), "statement is a local declaration");
            Some(ty)
        } else {
            debug!(line = ty.base.line(), "statement is an expression, rewinding");
            self.reset(mark);
            None
        }
    }

    /// Parse local declaration rest: name []* [= init];
    fn parse_local_declaration(&mut self, mut ty: TypeSpec) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier("for variable name")?;
        ty.dims += self.parse_array_suffixes()?;

        let mut children = vec![ty.into_node()];
        if self.match_token(TokenKind::Operator, "=") {
            children.push(self.parse_expression()?);
        }

        self.expect_semicolon("after variable declaration")?;

        Ok(AstNode::new(NodeKind::VarDeclLocal, children, name.location).with_value(name.lexeme))
    }

    /// Parse if statement; `else` binds to the nearest `if`
    fn parse_if_statement(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.advance();

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let mut children = vec![condition, self.parse_statement()?];

        if self.match_token(TokenKind::Keyword, "else") {
            children.push(self.parse_statement()?);
        }

        Ok(AstNode::new(NodeKind::If, children, keyword.location))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.advance();

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_statement()?;

        Ok(AstNode::new(NodeKind::While, vec![condition, body], keyword.location))
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<AstNode, ParseError> {
        let keyword = self.advance();

        let mut children = Vec::new();
        if !self.check_delimiter(";") {
            children.push(self.parse_expression()?);
        }

        self.expect_semicolon("after return")?;

        Ok(AstNode::new(NodeKind::Return, children, keyword.location))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AstNode, NodeKind};
    use crate::parser::parse::parse;

    /// Parse `body` as the statements of a method and return its block.
    fn method_body(body: &str) -> AstNode {
        let source = format!("class T {{ void m() {{ {body} }} }}");
        let program = parse(&source).unwrap();
        let method = &program.children[0].children[0];
        method.children.last().unwrap().clone()
    }

    fn statement(body: &str) -> AstNode {
        let block = method_body(body);
        assert_eq!(block.children.len(), 1, "expected one statement in {body:?}");
        block.children[0].clone()
    }

    #[test]
    fn test_local_declarations() {
        let decl = statement("int x = 1;");
        assert_eq!(decl.kind, NodeKind::VarDeclLocal);
        assert_eq!(decl.value(), Some("x"));
        assert_eq!(decl.children[0].value(), Some("int"));
        assert_eq!(decl.children[1].kind, NodeKind::Number);

        let arr = statement("bool flags[];");
        assert_eq!(arr.children.len(), 1);
        assert_eq!(arr.children[0].value(), Some("bool[]"));
    }

    #[test]
    fn test_class_typed_local_declaration() {
        let decl = statement("Point p;");
        assert_eq!(decl.kind, NodeKind::VarDeclLocal);
        assert_eq!(decl.value(), Some("p"));
        assert_eq!(decl.children[0].value(), Some("Point"));

        let arr = statement("Point[][] grid = other;");
        assert_eq!(arr.children[0].value(), Some("Point[][]"));
        assert_eq!(arr.children[1].kind, NodeKind::Identifier);
    }

    #[test]
    fn test_identifier_statement_falls_back_to_expression() {
        let assign = statement("x = 5;");
        assert_eq!(assign.kind, NodeKind::Assign);
        assert_eq!(assign.children[0].kind, NodeKind::Identifier);

        let indexed = statement("x[0] = 5;");
        assert_eq!(indexed.kind, NodeKind::Assign);
        let target = &indexed.children[0];
        assert_eq!(target.kind, NodeKind::ArrayAccess);
        assert_eq!(target.children[0].value(), Some("x"));
        assert_eq!(target.children[1].value(), Some("0"));
    }

    #[test]
    fn test_empty_bracket_expression_after_rewind() {
        // `xs[]` looks like a type prefix but no name follows, so the
        // expression parser sees it and reports the missing index.
        let err = parse("class T { void m() { xs[] = 1; } }").unwrap_err();
        assert_eq!(err.diagnostic().message, "Expected a primary expression");
        assert_eq!(err.diagnostic().lexeme, "]");
    }

    #[test]
    fn test_call_statement() {
        let call = statement("print(1, x);");
        assert_eq!(call.kind, NodeKind::Call);
        assert_eq!(call.children.len(), 3);
    }

    #[test]
    fn test_if_else_binds_to_nearest_if() {
        let outer = statement("if (a) if (b) x = 1; else x = 2;");
        assert_eq!(outer.kind, NodeKind::If);
        assert_eq!(outer.children.len(), 2);

        let inner = &outer.children[1];
        assert_eq!(inner.kind, NodeKind::If);
        assert_eq!(inner.children.len(), 3);
    }

    #[test]
    fn test_while_and_return() {
        let body = method_body("while (i < n) { i = i + 1; } return;");
        assert_eq!(body.children[0].kind, NodeKind::While);
        assert_eq!(body.children[0].children[1].kind, NodeKind::Block);
        assert_eq!(body.children[1].kind, NodeKind::Return);
        assert!(body.children[1].children.is_empty());
    }

    #[test]
    fn test_empty_statements() {
        let body = method_body(";;");
        assert_eq!(body.children.len(), 2);
        assert!(body.children.iter().all(|s| s.kind == NodeKind::EmptyStmt));
    }

    #[test]
    fn test_void_local_is_rejected() {
        let err = parse("class T { void m() { void x; } }").unwrap_err();
        assert_eq!(err.diagnostic().lexeme, "void");
        assert_eq!(
            err.diagnostic().message,
            "'void' is only allowed as a method return type"
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("class T { void m() { x = 1 } }").unwrap_err();
        assert_eq!(err.diagnostic().message, "Expected ';' after expression");
        assert_eq!(err.diagnostic().lexeme, "}");
    }

    #[test]
    fn test_nested_blocks_within_limit() {
        let body = format!("{}x = 1;{}", "{".repeat(30), "}".repeat(30));
        let mut node = statement(&body);
        for _ in 1..30 {
            assert_eq!(node.kind, NodeKind::Block);
            node = node.children[0].clone();
        }
        assert_eq!(node.children[0].kind, NodeKind::Assign);
    }

    #[test]
    fn test_deeply_nested_blocks_are_rejected() {
        let source = format!(
            "class T {{ void m() {{ {}{} }} }}",
            "{".repeat(200),
            "}".repeat(200)
        );
        let err = parse(&source).unwrap_err();
        assert_eq!(err.diagnostic().message, "Nesting too deep");
        assert_eq!(err.diagnostic().lexeme, "{");

        let source = format!("class T {{ void m() {{ {}; }} }}", "while (x) ".repeat(200));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.diagnostic().message, "Nesting too deep");
    }
}
