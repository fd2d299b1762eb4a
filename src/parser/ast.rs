// AST (Abstract Syntax Tree) definitions for the class language front end

use serde::Serialize;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    /// Character index of the first character (not a byte index).
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Node kinds. The set is closed so every consumer matching on it is checked
/// for exhaustiveness when the grammar grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    Program,
    ClassDecl,
    FieldDecl,
    MethodDecl,
    Modifier,
    Param,
    Type,
    Block,
    If,
    While,
    Return,
    VarDeclLocal,
    EmptyStmt,
    Assign,
    Binary,
    Unary,
    Call,
    MemberAccess,
    ArrayAccess,
    Identifier,
    Number,
    String,
    Boolean,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ClassDecl => "ClassDecl",
            NodeKind::FieldDecl => "FieldDecl",
            NodeKind::MethodDecl => "MethodDecl",
            NodeKind::Modifier => "Modifier",
            NodeKind::Param => "Param",
            NodeKind::Type => "Type",
            NodeKind::Block => "Block",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::Return => "Return",
            NodeKind::VarDeclLocal => "VarDeclLocal",
            NodeKind::EmptyStmt => "EmptyStmt",
            NodeKind::Assign => "Assign",
            NodeKind::Binary => "Binary",
            NodeKind::Unary => "Unary",
            NodeKind::Call => "Call",
            NodeKind::MemberAccess => "MemberAccess",
            NodeKind::ArrayAccess => "ArrayAccess",
            NodeKind::Identifier => "Identifier",
            NodeKind::Number => "Number",
            NodeKind::String => "String",
            NodeKind::Boolean => "Boolean",
        }
    }

    /// Forms accepted on the left of `=`.
    pub fn is_assignable(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier | NodeKind::ArrayAccess | NodeKind::MemberAccess
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One node of the syntax tree: a kind tag, an optional scalar value (name,
/// literal text or operator symbol) and the owned children in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AstNode {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstNode>,
    pub location: SourceLocation,
}

impl AstNode {
    pub fn new(kind: NodeKind, children: Vec<AstNode>, location: SourceLocation) -> Self {
        AstNode {
            kind,
            value: None,
            children,
            location,
        }
    }

    /// A childless node carrying a value (identifiers, literals, types...).
    pub fn leaf(kind: NodeKind, value: impl Into<String>, location: SourceLocation) -> Self {
        AstNode {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
            location,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    /// Children of the given kind, in order.
    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &AstNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Pre-order traversal.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a AstNode),
    {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.kind, width = depth * 2)?;
        if let Some(value) = &self.value {
            write!(f, ": {}", value)?;
        }
        writeln!(f)?;
        for child in &self.children {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the indented tree: `Kind: value` per line, children two spaces
/// deeper than their parent.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
