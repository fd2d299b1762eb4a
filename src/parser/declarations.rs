//! Declaration parsing implementation
//!
//! This module handles the declaration layer of a program:
//!
//! - Class declarations: `class Name { members }`
//! - Members: fields and methods, with optional modifiers
//! - Method parameters
//! - Types: `int`, `bool`, `void` (method return type only), array suffixes
//!
//! # Grammar
//!
//! ```text
//! class_decl  ::= "class" identifier "{" member* "}"
//! member      ::= modifier* type identifier ( method_rest | field_rest )
//! modifier    ::= "public" | "private" | "static"
//! method_rest ::= "(" params? ")" block
//! field_rest  ::= array_suffix* ( "=" expression )? ";"
//! params      ::= param ( "," param )*
//! param       ::= type identifier array_suffix*
//! type        ::= ( "int" | "bool" | "void" ) array_suffix*
//! array_suffix ::= "[" "]"
//! ```
//!
//! A member is classified after its name: `(` means method, anything else
//! means field. The modifiers, type and name are shared, so no rewind is
//! needed. Array suffixes may follow the type, the name, or both; every
//! suffix adds one dimension.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::grammar;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

/// A parsed type before it becomes a `Type` node: the base token plus the
/// number of `[]` suffixes seen so far.
#[derive(Debug, Clone)]
pub(crate) struct TypeSpec {
    pub base: Token,
    pub dims: usize,
}

impl TypeSpec {
    pub fn new(base: Token) -> Self {
        TypeSpec { base, dims: 0 }
    }

    pub fn is_void(&self) -> bool {
        self.base.is(TokenKind::Keyword, "void")
    }

    /// `Type` leaf whose value is the base name followed by one `[]` per
    /// dimension, e.g. `int[][]`.
    pub fn into_node(self) -> AstNode {
        let name = format!("{}{}", self.base.lexeme, "[]".repeat(self.dims));
        AstNode::leaf(NodeKind::Type, name, self.base.location)
    }
}

const VOID_MISUSE: &str = "'void' is only allowed as a method return type";
const VOID_ARRAY: &str = "'void' cannot have array dimensions";

impl Parser {
    /// Parse class declaration: class Name { members }
    pub(crate) fn parse_class_declaration(&mut self) -> Result<AstNode, ParseError> {
        let class_token = self.expect_token(TokenKind::Keyword, "class", "at top level")?;
        let name = self.expect_identifier("after 'class'")?;

        self.expect_lbrace("after class name")?;

        let mut members = Vec::new();
        while !self.check_delimiter("}") && !self.is_at_end() {
            members.push(self.parse_member()?);
        }

        self.expect_rbrace("after class members")?;

        Ok(AstNode::new(NodeKind::ClassDecl, members, class_token.location).with_value(name.lexeme))
    }

    /// Parse a field or method declaration
    pub(crate) fn parse_member(&mut self) -> Result<AstNode, ParseError> {
        let mut modifiers = Vec::new();
        while self.check_kind(TokenKind::Keyword) && grammar::is_modifier(&self.peek().lexeme) {
            let token = self.advance();
            modifiers.push(AstNode::leaf(NodeKind::Modifier, token.lexeme, token.location));
        }

        let mut ty = self.parse_type()?;
        let name = self.expect_identifier("for member name")?;

        if self.check_delimiter("(") {
            return self.parse_method_declaration(modifiers, ty, name);
        }

        if ty.is_void() {
            return Err(self.error_at(&ty.base, VOID_MISUSE));
        }

        ty.dims += self.parse_array_suffixes()?;

        let mut children = modifiers;
        children.push(ty.into_node());

        if self.match_token(TokenKind::Operator, "=") {
            children.push(self.parse_expression()?);
        }

        self.expect_semicolon("after field declaration")?;

        Ok(AstNode::new(NodeKind::FieldDecl, children, name.location).with_value(name.lexeme))
    }

    /// Parse method declaration rest: (params) { body }
    fn parse_method_declaration(
        &mut self,
        modifiers: Vec<AstNode>,
        return_type: TypeSpec,
        name: Token,
    ) -> Result<AstNode, ParseError> {
        self.expect_lparen("after method name")?;

        let params = self.parse_parameter_list()?;

        self.expect_rparen("after parameters")?;

        let body = self.parse_block()?;

        let mut children = modifiers;
        children.push(return_type.into_node());
        children.extend(params);
        children.push(body);

        Ok(AstNode::new(NodeKind::MethodDecl, children, name.location).with_value(name.lexeme))
    }

    /// Parse parameter list: type name, type name, ...
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut params = Vec::new();

        if self.check_delimiter(")") {
            return Ok(params);
        }

        loop {
            params.push(self.parse_parameter()?);

            if !self.match_token(TokenKind::Delimiter, ",") {
                break;
            }
        }

        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<AstNode, ParseError> {
        let mut ty = self.parse_value_type()?;
        let name = self.expect_identifier("for parameter name")?;
        ty.dims += self.parse_array_suffixes()?;

        Ok(AstNode::new(NodeKind::Param, vec![ty.into_node()], name.location).with_value(name.lexeme))
    }

    /// Parse type: (int | bool | void) []*
    pub(crate) fn parse_type(&mut self) -> Result<TypeSpec, ParseError> {
        let is_builtin = self.check_keyword("int") || self.check_keyword("bool") || self.check_keyword("void");
        if !is_builtin {
            return Err(self.error("Expected type"));
        }

        let mut ty = TypeSpec::new(self.advance());
        if ty.base.lexeme == "void" && self.check_delimiter("[") {
            return Err(self.error(VOID_ARRAY));
        }
        ty.dims = self.parse_array_suffixes()?;
        Ok(ty)
    }

    /// Parse a type that may hold a value: anything but `void`
    pub(crate) fn parse_value_type(&mut self) -> Result<TypeSpec, ParseError> {
        if self.check_keyword("void") {
            return Err(self.error(VOID_MISUSE));
        }
        self.parse_type()
    }

    /// Parse zero or more `[ ]` pairs, returning how many were seen
    pub(crate) fn parse_array_suffixes(&mut self) -> Result<usize, ParseError> {
        let mut dims = 0;
        while self.match_token(TokenKind::Delimiter, "[") {
            self.expect_delimiter("]", "to close array suffix")?;
            dims += 1;
        }
        Ok(dims)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::NodeKind;
    use crate::parser::parse::parse;

    fn single_member(source: &str) -> crate::parser::ast::AstNode {
        let mut program = parse(source).unwrap();
        let mut class = program.children.remove(0);
        assert_eq!(class.children.len(), 1);
        class.children.remove(0)
    }

    #[test]
    fn test_field_declaration() {
        let field = single_member("class A { int x; }");

        assert_eq!(field.kind, NodeKind::FieldDecl);
        assert_eq!(field.value(), Some("x"));
        assert_eq!(field.children.len(), 1);
        assert_eq!(field.children[0].kind, NodeKind::Type);
        assert_eq!(field.children[0].value(), Some("int"));
    }

    #[test]
    fn test_field_with_initializer_and_modifiers() {
        let field = single_member("class A { private static bool ok = true; }");

        let kinds: Vec<NodeKind> = field.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Modifier,
                NodeKind::Modifier,
                NodeKind::Type,
                NodeKind::Boolean
            ]
        );
        assert_eq!(field.children[1].value(), Some("static"));
    }

    #[test]
    fn test_array_suffix_placements_are_equivalent() {
        let on_type = single_member("class A { int[] xs; }");
        let on_name = single_member("class A { int xs[]; }");

        assert_eq!(on_type.children[0].value(), Some("int[]"));
        assert_eq!(on_name.children[0].value(), Some("int[]"));
    }

    #[test]
    fn test_array_suffixes_merge_dimensions() {
        let both = single_member("class A { int[] grid[]; }");
        let repeated = single_member("class A { bool[][] grid; }");

        assert_eq!(both.children[0].value(), Some("int[][]"));
        assert_eq!(repeated.children[0].value(), Some("bool[][]"));
    }

    #[test]
    fn test_method_declaration() {
        let method = single_member("class A { public void run(int a, bool[] flags) { } }");

        assert_eq!(method.kind, NodeKind::MethodDecl);
        assert_eq!(method.value(), Some("run"));
        let kinds: Vec<NodeKind> = method.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Modifier,
                NodeKind::Type,
                NodeKind::Param,
                NodeKind::Param,
                NodeKind::Block
            ]
        );
        assert_eq!(method.children[1].value(), Some("void"));
        assert_eq!(method.children[3].value(), Some("flags"));
        assert_eq!(method.children[3].children[0].value(), Some("bool[]"));
    }

    #[test]
    fn test_void_field_is_rejected() {
        let err = parse("class A { void x; }").unwrap_err();
        let diag = err.diagnostic();

        assert_eq!((diag.line, diag.column), (1, 11));
        assert_eq!(diag.lexeme, "void");
        assert_eq!(diag.message, "'void' is only allowed as a method return type");
    }

    #[test]
    fn test_void_array_return_is_rejected() {
        let err = parse("class A { void[] m() { } }").unwrap_err();
        assert_eq!(err.diagnostic().message, "'void' cannot have array dimensions");
        assert_eq!(err.diagnostic().lexeme, "[");
        assert_eq!(err.diagnostic().column, 15);
    }

    #[test]
    fn test_void_parameter_is_rejected() {
        let err = parse("class A { int m(void v) { } }").unwrap_err();

        assert_eq!(err.diagnostic().lexeme, "void");
        assert_eq!(err.diagnostic().column, 17);
    }

    #[test]
    fn test_class_typed_field_is_rejected() {
        let err = parse("class A { B b; }").unwrap_err();

        assert_eq!(err.diagnostic().message, "Expected type");
        assert_eq!(err.diagnostic().lexeme, "B");
    }

    #[test]
    fn test_unclosed_class_body() {
        let err = parse("class A { int x;").unwrap_err();

        assert_eq!(err.diagnostic().message, "Expected '}' after class members");
        assert_eq!(err.diagnostic().kind, crate::parser::lexer::TokenKind::End);
    }

    #[test]
    fn test_sized_array_suffix_is_rejected() {
        let err = parse("class A { int xs[5]; }").unwrap_err();

        assert_eq!(err.diagnostic().message, "Expected ']' to close array suffix");
        assert_eq!(err.diagnostic().lexeme, "5");
    }
}
