//! Syntax tree for the host declaration language.
//!
//! The tree is purely syntactic: names are plain strings, types are unresolved
//! references, and attribute arguments are unevaluated expressions. Resolution
//! and constant evaluation live in `frontend::symbols` / `frontend::const_eval`.

/// Byte range into a source unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A syntax node paired with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Identity of a declaration node within one compilation.
///
/// Ids are allocated compilation-wide (see [`NodeIdAllocator`]) so that
/// declared-symbol lookup stays unambiguous across source units.
pub type NodeId = u32;

/// Hands out fresh [`NodeId`]s for every parsed unit of one compilation.
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: NodeId,
}

impl NodeIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self) -> NodeId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    /// Display name used in diagnostics (not a filesystem path).
    pub name: String,
    pub declarations: Vec<Spanned<Declaration>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

/// `namespace a.b { ... }`. Dotted names and physical nesting both allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub path: Vec<String>,
    pub declarations: Vec<Spanned<Declaration>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub id: NodeId,
    pub modifiers: Modifiers,
    pub name: String,
    pub members: Vec<Spanned<Member>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Method(MethodDecl),
    Const(ConstDecl),
}

/// A method declaration, with or without a body.
///
/// Bodies are skipped during parsing; the generator only ever needs the
/// signature, the modifier set, and the attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub id: NodeId,
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub return_type: TypeRef,
    pub name: String,
    pub params: Vec<Param>,
    pub has_body: bool,
}

/// `const string NAME = <expr>;`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub id: NodeId,
    pub modifiers: Modifiers,
    pub ty: TypeRef,
    pub name: String,
    pub value: Spanned<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

/// Unresolved type reference: a builtin keyword or a (possibly dotted) name.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
}

/// `[Name]` or `[Name(args...)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Possibly dotted attribute type name.
    pub name: String,
    pub args: Vec<Spanned<Expr>>,
}

/// Attribute-argument and const-initializer expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Int(i64),
    /// Reference to another declaration (possibly dotted).
    Ref(String),
    /// `a + b`, only meaningful for constant string concatenation.
    Concat(Box<Spanned<Expr>>, Box<Spanned<Expr>>),
    Paren(Box<Spanned<Expr>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    Private,
}

/// Declaration modifiers. Absent accessibility means the host default
/// (private for members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub accessibility: Option<Accessibility>,
    pub is_static: bool,
    pub is_partial: bool,
    pub is_const: bool,
}

impl Modifiers {
    /// Whether the declaration is marked both `static` and `partial`.
    pub fn is_static_partial(&self) -> bool {
        self.is_static && self.is_partial
    }
}
