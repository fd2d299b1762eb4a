//! Expression parsing implementation
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! assignment     ::= logical_or ( "=" assignment )?
//! logical_or     ::= logical_and ( "||" logical_and )*
//! logical_and    ::= equality ( "&&" equality )*
//! equality       ::= relational ( ( "==" | "!=" ) relational )*
//! relational     ::= additive ( ( "<" | ">" | "<=" | ">=" ) additive )*
//! additive       ::= multiplicative ( ( "+" | "-" ) multiplicative )*
//! multiplicative ::= unary ( ( "*" | "/" | "%" ) unary )*
//! unary          ::= ( "!" | "-" ) unary | postfix
//! postfix        ::= primary ( "(" args? ")" | "[" expression "]" | "." identifier )*
//! primary        ::= identifier | number | string | "true" | "false" | "(" expression ")"
//! ```
//!
//! Binary operators are left-associative; assignment and unary prefixes are
//! right-associative. Only identifiers, array accesses and member accesses
//! may appear on the left of `=`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::grammar::{
    ADDITIVE_OPERATORS, ASSIGNMENT_OPERATOR, EQUALITY_OPERATORS, LOGICAL_AND_OPERATORS,
    LOGICAL_OR_OPERATORS, MULTIPLICATIVE_OPERATORS, RELATIONAL_OPERATORS, UNARY_OPERATORS,
};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

type Operand = fn(&mut Parser) -> Result<AstNode, ParseError>;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative)
    ///
    /// Every parenthesized group, index, argument and chained `=` passes
    /// through here, so this is where expression nesting is counted.
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        self.nested(|p| {
            let target = p.parse_logical_or()?;

            if !p.check_operator(ASSIGNMENT_OPERATOR) {
                return Ok(target);
            }

            if !target.kind.is_assignable() {
                return Err(p.error("Invalid assignment target"));
            }

            let eq = p.advance();
            let value = p.parse_assignment()?;

            Ok(AstNode::new(NodeKind::Assign, vec![target, value], eq.location))
        })
    }

    /// Shared loop for the left-associative binary levels
    fn parse_left_associative(&mut self, ops: &[&str], operand: Operand) -> Result<AstNode, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = self.check_operator_in(ops) {
            let token = self.advance();
            let right = operand(self)?;
            left = AstNode::new(NodeKind::Binary, vec![left, right], token.location).with_value(op);
        }

        Ok(left)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&LOGICAL_OR_OPERATORS, Parser::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&LOGICAL_AND_OPERATORS, Parser::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&EQUALITY_OPERATORS, Parser::parse_relational)
    }

    /// Parse relational (< > <= >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&RELATIONAL_OPERATORS, Parser::parse_additive)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&ADDITIVE_OPERATORS, Parser::parse_multiplicative)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_associative(&MULTIPLICATIVE_OPERATORS, Parser::parse_unary)
    }

    /// Parse unary prefix (! -)
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if let Some(op) = self.check_operator_in(&UNARY_OPERATORS) {
            return self.nested(|p| {
                let token = p.advance();
                let operand = p.parse_unary()?;
                Ok(AstNode::new(NodeKind::Unary, vec![operand], token.location).with_value(op))
            });
        }

        self.parse_postfix()
    }

    /// Parse postfix chain: calls, indexing and member access
    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check_delimiter("(") {
                let location = expr.location;
                self.advance();
                let mut children = vec![expr];
                children.extend(self.parse_arguments()?);
                self.expect_rparen("after arguments")?;
                expr = AstNode::new(NodeKind::Call, children, location);
            } else if self.check_delimiter("[") {
                let location = expr.location;
                self.advance();
                let index = self.parse_expression()?;
                self.expect_delimiter("]", "after index")?;
                expr = AstNode::new(NodeKind::ArrayAccess, vec![expr, index], location);
            } else if self.check_delimiter(".") {
                self.advance();
                let member = self.expect_identifier("after '.'")?;
                expr = AstNode::new(NodeKind::MemberAccess, vec![expr], member.location)
                    .with_value(member.lexeme);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parse call arguments: expr, expr, ...
    fn parse_arguments(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.check_delimiter(")") {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(TokenKind::Delimiter, ",") {
                break;
            }
        }

        Ok(args)
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let token = self.peek();

        let kind = match token.kind {
            TokenKind::Number => Some(NodeKind::Number),
            TokenKind::String => Some(NodeKind::String),
            TokenKind::Identifier => Some(NodeKind::Identifier),
            TokenKind::Keyword if token.lexeme == "true" || token.lexeme == "false" => {
                Some(NodeKind::Boolean)
            }
            _ => None,
        };

        if let Some(kind) = kind {
            let token = self.advance();
            return Ok(AstNode::leaf(kind, token.lexeme, token.location));
        }

        if self.match_token(TokenKind::Delimiter, "(") {
            let expr = self.parse_expression()?;
            self.expect_rparen("after parenthesized expression")?;
            return Ok(expr);
        }

        Err(self.error("Expected a primary expression"))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AstNode, NodeKind};
    use crate::parser::parse::{parse, ParseError};

    fn try_expression(expr: &str) -> Result<AstNode, ParseError> {
        let source = format!("class T {{ void m() {{ {expr}; }} }}");
        let mut program = parse(&source)?;
        let mut method = program.children.remove(0).children.remove(0);
        let mut block = method.children.pop().unwrap();
        Ok(block.children.remove(0))
    }

    fn expression(expr: &str) -> AstNode {
        try_expression(expr).unwrap()
    }

    /// Compact s-expression rendering to make shape assertions readable.
    fn sexp(node: &AstNode) -> String {
        let head = match node.value() {
            Some(v) if node.children.is_empty() => return v.to_string(),
            Some(v) => format!("{} {}", node.kind, v),
            None => node.kind.to_string(),
        };
        let args: Vec<String> = node.children.iter().map(sexp).collect();
        format!("({} {})", head, args.join(" "))
    }

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(
            sexp(&expression("a || b && c == d < e + f * g")),
            "(Binary || a (Binary && b (Binary == c (Binary < d (Binary + e (Binary * f g))))))"
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(sexp(&expression("a - b - c")), "(Binary - (Binary - a b) c)");
        assert_eq!(sexp(&expression("a / b % c")), "(Binary % (Binary / a b) c)");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(sexp(&expression("a = b = c")), "(Assign a (Assign b c))");
    }

    #[test]
    fn test_unary_prefixes() {
        assert_eq!(sexp(&expression("!-x")), "(Unary ! (Unary - x))");
        assert_eq!(sexp(&expression("-a * b")), "(Binary * (Unary - a) b)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(sexp(&expression("(a + b) * c")), "(Binary * (Binary + a b) c)");
    }

    #[test]
    fn test_postfix_chains_left() {
        assert_eq!(
            sexp(&expression("a.b(1)[i].c")),
            "(MemberAccess c (ArrayAccess (Call (MemberAccess b a) 1) i))"
        );
        assert_eq!(sexp(&expression("f()")), "(Call f)");
    }

    #[test]
    fn test_literals() {
        let node = expression("s = \"hi\"");
        assert_eq!(node.children[1].kind, NodeKind::String);
        assert_eq!(node.children[1].value(), Some("\"hi\""));

        let node = expression("ok = false");
        assert_eq!(node.children[1].kind, NodeKind::Boolean);

        let node = expression("x = 1.5e-3");
        assert_eq!(node.children[1].kind, NodeKind::Number);
        assert_eq!(node.children[1].value(), Some("1.5e-3"));
    }

    #[test]
    fn test_member_assignment_target() {
        assert_eq!(sexp(&expression("p.x = 3")), "(Assign (MemberAccess x p) 3)");
    }

    #[test]
    fn test_invalid_assignment_targets() {
        for bad in ["5 = x", "f() = 1", "(a + b) = 1", "-a = 1"] {
            let err = try_expression(bad).unwrap_err();
            assert_eq!(err.diagnostic().message, "Invalid assignment target", "{bad}");
            assert_eq!(err.diagnostic().lexeme, "=", "{bad}");
        }
    }

    #[test]
    fn test_missing_primary() {
        let err = try_expression("x = * 2").unwrap_err();
        assert_eq!(err.diagnostic().message, "Expected a primary expression");
        assert_eq!(err.diagnostic().lexeme, "*");
    }

    #[test]
    fn test_unclosed_call() {
        let err = try_expression("f(1, 2").unwrap_err();
        assert_eq!(err.diagnostic().message, "Expected ')' after arguments");
        assert_eq!(err.diagnostic().lexeme, ";");
    }

    #[test]
    fn test_moderate_nesting_is_accepted() {
        let expr = format!("{}x{}", "(".repeat(30), ")".repeat(30));
        assert_eq!(sexp(&expression(&expr)), "x");

        let expr = format!("{}x", "!".repeat(30));
        assert_eq!(expression(&expr).kind, NodeKind::Unary);
    }

    #[test]
    fn test_deep_parentheses_are_rejected() {
        let expr = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let err = try_expression(&expr).unwrap_err();
        assert_eq!(err.diagnostic().message, "Nesting too deep");
        assert_eq!(err.diagnostic().lexeme, "(");
    }

    #[test]
    fn test_deep_prefix_chain_is_rejected() {
        let expr = format!("{}x", "!".repeat(200));
        let err = try_expression(&expr).unwrap_err();
        assert_eq!(err.diagnostic().message, "Nesting too deep");
        assert_eq!(err.diagnostic().lexeme, "!");

        let expr = format!("x{}", " = x".repeat(200));
        let err = try_expression(&expr).unwrap_err();
        assert_eq!(err.diagnostic().message, "Nesting too deep");
    }
}
