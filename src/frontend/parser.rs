//! Recursive-descent parser for the host declaration language.
//!
//! Grammar (informal):
//!
//! ```text
//! unit        := declaration*
//! declaration := namespace | class
//! namespace   := "namespace" dotted_name "{" declaration* "}"
//! class       := modifiers "class" IDENT "{" member* "}"
//! member      := attr_list* modifiers type IDENT ( method_tail | const_tail )
//! method_tail := "(" params? ")" ( ";" | block )
//! const_tail  := "=" expr ";"
//! attr_list   := "[" attr ( "," attr )* "]"
//! attr        := dotted_name ( "(" expr ( "," expr )* ")" )?
//! expr        := term ( "+" term )*
//! term        := STRING | INT | dotted_name | "(" expr ")"
//! ```
//!
//! Method bodies are accepted but skipped with balanced-brace scanning; the
//! generator only consumes signatures.

use crate::frontend::ast::{
    Accessibility, Attribute, ConstDecl, Declaration, Expr, Member, MethodDecl, Modifiers, NamespaceDecl,
    NodeIdAllocator, Param, SourceUnit, Span, Spanned, TypeDecl, TypeRef,
};
use crate::frontend::diagnostics::CompileError;
use crate::frontend::lexer::{Token, TokenKind};

pub struct Parser<'t, 'ids> {
    tokens: &'t [Token],
    pos: usize,
    errors: Vec<CompileError>,
    ids: &'ids mut NodeIdAllocator,
}

impl<'t, 'ids> Parser<'t, 'ids> {
    pub fn new(tokens: &'t [Token], ids: &'ids mut NodeIdAllocator) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            ids,
        }
    }

    /// Parse a whole source unit. Reports every error found.
    pub fn parse_unit(mut self, name: &str) -> Result<SourceUnit, Vec<CompileError>> {
        let mut declarations = Vec::new();
        while !self.at(&TokenKind::Eof) {
            match self.parse_declaration() {
                Some(decl) => declarations.push(decl),
                None => self.recover_to_declaration(),
            }
        }
        if self.errors.is_empty() {
            Ok(SourceUnit {
                name: name.to_string(),
                declarations,
            })
        } else {
            Err(self.errors)
        }
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn parse_declaration(&mut self) -> Option<Spanned<Declaration>> {
        let start = self.peek_span();
        if self.eat(&TokenKind::Namespace) {
            let ns = self.parse_namespace()?;
            let span = Span::new(start.start, self.prev_span().end);
            return Some(Spanned::new(Declaration::Namespace(ns), span));
        }
        let modifiers = self.parse_modifiers();
        if self.eat(&TokenKind::Class) {
            let class = self.parse_class(modifiers)?;
            let span = Span::new(start.start, self.prev_span().end);
            return Some(Spanned::new(Declaration::Type(class), span));
        }
        self.error_here("expected `namespace` or `class`");
        None
    }

    fn parse_namespace(&mut self) -> Option<NamespaceDecl> {
        let path = self.parse_dotted_name()?;
        self.expect(&TokenKind::LBrace)?;
        let mut declarations = Vec::new();
        while !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
            match self.parse_declaration() {
                Some(decl) => declarations.push(decl),
                None => self.recover_to_declaration(),
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Some(NamespaceDecl {
            path: path.split('.').map(str::to_string).collect(),
            declarations,
        })
    }

    fn parse_class(&mut self, modifiers: Modifiers) -> Option<TypeDecl> {
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;
        let mut members = Vec::new();
        while !self.at(&TokenKind::RBrace) && !self.at(&TokenKind::Eof) {
            match self.parse_member() {
                Some(member) => members.push(member),
                None => self.recover_to_member(),
            }
        }
        self.expect(&TokenKind::RBrace)?;
        Some(TypeDecl {
            id: self.ids.alloc(),
            modifiers,
            name,
            members,
        })
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn parse_member(&mut self) -> Option<Spanned<Member>> {
        let start = self.peek_span();
        let mut attributes = Vec::new();
        while self.at(&TokenKind::LBracket) {
            attributes.extend(self.parse_attribute_list()?);
        }
        let modifiers = self.parse_modifiers();
        let ty = self.parse_type_ref()?;
        let name = self.expect_ident()?;

        if self.at(&TokenKind::LParen) {
            let method = self.parse_method_tail(attributes, modifiers, ty, name)?;
            let span = Span::new(start.start, self.prev_span().end);
            return Some(Spanned::new(Member::Method(method), span));
        }
        if modifiers.is_const && self.eat(&TokenKind::Eq) {
            if !attributes.is_empty() {
                self.error_here("attributes are not allowed on const members");
            }
            let value = self.parse_expr()?;
            self.expect(&TokenKind::Semi)?;
            let span = Span::new(start.start, self.prev_span().end);
            return Some(Spanned::new(
                Member::Const(ConstDecl {
                    id: self.ids.alloc(),
                    modifiers,
                    ty,
                    name,
                    value,
                }),
                span,
            ));
        }
        self.error_here("expected `(` (method) or `= <constant>;` (const member)");
        None
    }

    fn parse_method_tail(
        &mut self,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
        return_type: TypeRef,
        name: String,
    ) -> Option<MethodDecl> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.at(&TokenKind::RParen) {
            loop {
                let ty = self.parse_type_ref()?;
                let pname = self.expect_ident()?;
                params.push(Param { ty, name: pname });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let has_body = if self.eat(&TokenKind::Semi) {
            false
        } else if self.at(&TokenKind::LBrace) {
            self.skip_balanced_braces();
            true
        } else {
            self.error_here("expected `;` or method body");
            return None;
        };

        Some(MethodDecl {
            id: self.ids.alloc(),
            attributes,
            modifiers,
            return_type,
            name,
            params,
            has_body,
        })
    }

    /// Skip a `{ ... }` body without interpreting its contents.
    fn skip_balanced_braces(&mut self) {
        debug_assert!(self.at(&TokenKind::LBrace));
        let mut depth = 0usize;
        while !self.at(&TokenKind::Eof) {
            if self.at(&TokenKind::LBrace) {
                depth += 1;
            } else if self.at(&TokenKind::RBrace) {
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return;
                }
            }
            self.advance();
        }
        self.error_here("unterminated method body");
    }

    // ------------------------------------------------------------------
    // Attributes and expressions
    // ------------------------------------------------------------------

    fn parse_attribute_list(&mut self) -> Option<Vec<Spanned<Attribute>>> {
        self.expect(&TokenKind::LBracket)?;
        let mut attrs = Vec::new();
        loop {
            let start = self.peek_span();
            let name = self.parse_dotted_name()?;
            let mut args = Vec::new();
            if self.eat(&TokenKind::LParen) {
                if !self.at(&TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RParen)?;
            }
            let span = Span::new(start.start, self.prev_span().end);
            attrs.push(Spanned::new(Attribute { name, args }, span));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Some(attrs)
    }

    fn parse_expr(&mut self) -> Option<Spanned<Expr>> {
        let mut lhs = self.parse_term()?;
        while self.eat(&TokenKind::Plus) {
            let rhs = self.parse_term()?;
            let span = Span::new(lhs.span.start, rhs.span.end);
            lhs = Spanned::new(Expr::Concat(Box::new(lhs), Box::new(rhs)), span);
        }
        Some(lhs)
    }

    fn parse_term(&mut self) -> Option<Spanned<Expr>> {
        let span = self.peek_span();
        match self.peek().clone() {
            TokenKind::Str(s) => {
                self.advance();
                Some(Spanned::new(Expr::Str(s), span))
            }
            TokenKind::Int(i) => {
                self.advance();
                Some(Spanned::new(Expr::Int(i), span))
            }
            TokenKind::Ident(_) => {
                let name = self.parse_dotted_name()?;
                let full = Span::new(span.start, self.prev_span().end);
                Some(Spanned::new(Expr::Ref(name), full))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                let full = Span::new(span.start, self.prev_span().end);
                Some(Spanned::new(Expr::Paren(Box::new(inner)), full))
            }
            _ => {
                self.error_here("expected expression");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Small pieces
    // ------------------------------------------------------------------

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::default();
        loop {
            match self.peek() {
                TokenKind::Public => modifiers.accessibility = Some(Accessibility::Public),
                TokenKind::Internal => modifiers.accessibility = Some(Accessibility::Internal),
                TokenKind::Private => modifiers.accessibility = Some(Accessibility::Private),
                TokenKind::Static => modifiers.is_static = true,
                TokenKind::Partial => modifiers.is_partial = true,
                TokenKind::Const => modifiers.is_const = true,
                _ => return modifiers,
            }
            self.advance();
        }
    }

    fn parse_type_ref(&mut self) -> Option<TypeRef> {
        match self.peek() {
            TokenKind::StringTy => {
                self.advance();
                Some(TypeRef {
                    name: "string".to_string(),
                })
            }
            TokenKind::IntTy => {
                self.advance();
                Some(TypeRef { name: "int".to_string() })
            }
            TokenKind::VoidTy => {
                self.advance();
                Some(TypeRef {
                    name: "void".to_string(),
                })
            }
            TokenKind::Ident(_) => {
                let name = self.parse_dotted_name()?;
                Some(TypeRef { name })
            }
            _ => {
                self.error_here("expected type");
                None
            }
        }
    }

    fn parse_dotted_name(&mut self) -> Option<String> {
        let mut name = self.expect_ident()?;
        while self.eat(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_ident()?);
        }
        Some(name)
    }

    // ------------------------------------------------------------------
    // Token-stream helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Option<()> {
        if self.eat(kind) {
            Some(())
        } else {
            self.error_here(format!("expected {}, found {}", kind.describe(), self.peek().describe()));
            None
        }
    }

    fn expect_ident(&mut self) -> Option<String> {
        if let TokenKind::Ident(name) = self.peek().clone() {
            self.advance();
            Some(name)
        } else {
            self.error_here(format!("expected identifier, found {}", self.peek().describe()));
            None
        }
    }

    fn error_here(&mut self, message: impl Into<String>) {
        self.errors.push(CompileError::syntax(message, self.peek_span()));
    }

    /// After a failed declaration, resynchronize on the next plausible start.
    fn recover_to_declaration(&mut self) {
        while !self.at(&TokenKind::Eof) {
            if matches!(
                self.peek(),
                TokenKind::Namespace | TokenKind::Class | TokenKind::RBrace
            ) {
                if self.at(&TokenKind::RBrace) {
                    self.advance();
                }
                return;
            }
            self.advance();
        }
    }

    /// After a failed member, skip to the next `;` or closing brace.
    fn recover_to_member(&mut self) {
        while !self.at(&TokenKind::Eof) {
            if self.eat(&TokenKind::Semi) {
                return;
            }
            if self.at(&TokenKind::RBrace) {
                return;
            }
            self.advance();
        }
    }
}

/// Parse one unit with a caller-provided id allocator.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token], unit_name: &str, ids: &mut NodeIdAllocator) -> Result<SourceUnit, Vec<CompileError>> {
    Parser::new(tokens, ids).parse_unit(unit_name)
}
