//! Lexer for the host declaration language.
//!
//! Hand-written single-pass scanner. The language is small: keywords,
//! identifiers, string and integer literals, and a handful of punctuation.
//! Line (`//`) and block (`/* */`) comments are skipped.

use crate::frontend::ast::Span;
use crate::frontend::diagnostics::CompileError;

/// Token types for the declaration language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keywords ==========
    Namespace,
    Class,
    Const,
    Static,
    Partial,
    Public,
    Internal,
    Private,
    StringTy, // builtin `string` type keyword
    IntTy,    // builtin `int` type keyword
    VoidTy,   // builtin `void` type keyword

    // ========== Identifiers and Literals ==========
    Ident(String),
    Str(String),
    Int(i64),

    // ========== Punctuation ==========
    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Semi,     // ;
    Comma,    // ,
    Eq,       // =
    Plus,     // +
    Dot,      // .

    Eof,
}

impl TokenKind {
    /// Short human-readable name for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Namespace => "`namespace`",
            TokenKind::Class => "`class`",
            TokenKind::Const => "`const`",
            TokenKind::Static => "`static`",
            TokenKind::Partial => "`partial`",
            TokenKind::Public => "`public`",
            TokenKind::Internal => "`internal`",
            TokenKind::Private => "`private`",
            TokenKind::StringTy => "`string`",
            TokenKind::IntTy => "`int`",
            TokenKind::VoidTy => "`void`",
            TokenKind::Ident(_) => "identifier",
            TokenKind::Str(_) => "string literal",
            TokenKind::Int(_) => "integer literal",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semi => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Eq => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Dot => "`.`",
            TokenKind::Eof => "end of input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

fn keyword(ident: &str) -> Option<TokenKind> {
    match ident {
        "namespace" => Some(TokenKind::Namespace),
        "class" => Some(TokenKind::Class),
        "const" => Some(TokenKind::Const),
        "static" => Some(TokenKind::Static),
        "partial" => Some(TokenKind::Partial),
        "public" => Some(TokenKind::Public),
        "internal" => Some(TokenKind::Internal),
        "private" => Some(TokenKind::Private),
        "string" => Some(TokenKind::StringTy),
        "int" => Some(TokenKind::IntTy),
        "void" => Some(TokenKind::VoidTy),
        _ => None,
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Single-source lexer. Byte offsets in spans index into the original text.
pub struct Lexer<'src> {
    source: &'src str,
    chars: std::iter::Peekable<std::str::CharIndices<'src>>,
    errors: Vec<CompileError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole input. Returns every error found, not just the first.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        let mut tokens = Vec::new();
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '/' => {
                    if !self.skip_comment(pos) {
                        // Lone slash is not part of the language.
                        self.chars.next();
                        self.errors
                            .push(CompileError::syntax("unexpected `/`", Span::new(pos, pos + 1)));
                    }
                }
                '"' => {
                    if let Some(token) = self.lex_string(pos) {
                        tokens.push(token);
                    }
                }
                c if c.is_ascii_digit() => tokens.push(self.lex_number(pos)),
                c if is_ident_start(c) => tokens.push(self.lex_ident(pos)),
                _ => {
                    self.chars.next();
                    if let Some(kind) = punct(c) {
                        tokens.push(Token {
                            kind,
                            span: Span::new(pos, pos + c.len_utf8()),
                        });
                    } else {
                        self.errors.push(CompileError::syntax(
                            format!("unexpected character `{}`", c),
                            Span::new(pos, pos + c.len_utf8()),
                        ));
                    }
                }
            }
        }
        let end = self.source.len();
        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(end, end),
        });

        if self.errors.is_empty() { Ok(tokens) } else { Err(self.errors) }
    }

    /// Skip `//` and `/* */` comments. Returns false if `pos` does not start a comment.
    fn skip_comment(&mut self, pos: usize) -> bool {
        let rest = &self.source[pos..];
        if rest.starts_with("//") {
            for (_, c) in self.chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
            true
        } else if rest.starts_with("/*") {
            self.chars.next();
            self.chars.next();
            let mut prev = '\0';
            let mut closed = false;
            for (_, c) in self.chars.by_ref() {
                if prev == '*' && c == '/' {
                    closed = true;
                    break;
                }
                prev = c;
            }
            if !closed {
                self.errors
                    .push(CompileError::syntax("unterminated block comment", Span::new(pos, pos + 2)));
            }
            true
        } else {
            false
        }
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if is_ident_continue(c) {
                end = pos + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        let text = &self.source[start..end];
        let kind = keyword(text).unwrap_or_else(|| TokenKind::Ident(text.to_string()));
        Token {
            kind,
            span: Span::new(start, end),
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_ascii_digit() || c == '_' {
                end = pos + 1;
                self.chars.next();
            } else {
                break;
            }
        }
        let text: String = self.source[start..end].chars().filter(|c| *c != '_').collect();
        let span = Span::new(start, end);
        match text.parse::<i64>() {
            Ok(value) => Token {
                kind: TokenKind::Int(value),
                span,
            },
            Err(_) => {
                self.errors
                    .push(CompileError::syntax("integer literal out of range", span));
                Token {
                    kind: TokenKind::Int(0),
                    span,
                }
            }
        }
    }

    /// Lex a string literal with escape sequences.
    ///
    /// Supported escapes: `\\`, `\"`, `\n`, `\t`, `\r`, `\0`, `\u{...}`.
    fn lex_string(&mut self, start: usize) -> Option<Token> {
        self.chars.next(); // opening quote
        let mut value = String::new();
        loop {
            let Some((pos, c)) = self.chars.next() else {
                self.errors
                    .push(CompileError::syntax("unterminated string literal", Span::new(start, self.source.len())));
                return None;
            };
            match c {
                '"' => {
                    return Some(Token {
                        kind: TokenKind::Str(value),
                        span: Span::new(start, pos + 1),
                    });
                }
                '\\' => match self.chars.next() {
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, '0')) => value.push('\0'),
                    Some((upos, 'u')) => match self.lex_unicode_escape(upos) {
                        Some(c) => value.push(c),
                        None => return None,
                    },
                    Some((epos, other)) => {
                        self.errors.push(CompileError::syntax(
                            format!("unknown escape `\\{}`", other),
                            Span::new(epos - 1, epos + other.len_utf8()),
                        ));
                    }
                    None => {
                        self.errors
                            .push(CompileError::syntax("unterminated string literal", Span::new(start, self.source.len())));
                        return None;
                    }
                },
                other => value.push(other),
            }
        }
    }

    /// Parse `{XXXX}` after a `\u` escape introducer.
    fn lex_unicode_escape(&mut self, start: usize) -> Option<char> {
        if !matches!(self.chars.next(), Some((_, '{'))) {
            self.errors
                .push(CompileError::syntax("expected `{` after `\\u`", Span::new(start, start + 1)));
            return None;
        }
        let mut digits = String::new();
        loop {
            match self.chars.next() {
                Some((_, '}')) => break,
                Some((_, c)) if c.is_ascii_hexdigit() && digits.len() < 6 => digits.push(c),
                Some((pos, _)) => {
                    self.errors
                        .push(CompileError::syntax("invalid unicode escape", Span::new(start, pos + 1)));
                    return None;
                }
                None => {
                    self.errors
                        .push(CompileError::syntax("unterminated unicode escape", Span::new(start, self.source.len())));
                    return None;
                }
            }
        }
        let scalar = u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32);
        if scalar.is_none() {
            self.errors
                .push(CompileError::syntax("invalid unicode scalar value", Span::new(start, start + digits.len() + 3)));
        }
        scalar
    }
}

fn punct(c: char) -> Option<TokenKind> {
    match c {
        '{' => Some(TokenKind::LBrace),
        '}' => Some(TokenKind::RBrace),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        ';' => Some(TokenKind::Semi),
        ',' => Some(TokenKind::Comma),
        '=' => Some(TokenKind::Eq),
        '+' => Some(TokenKind::Plus),
        '.' => Some(TokenKind::Dot),
        _ => None,
    }
}

/// Convenience function to lex a source string.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_and_idents() {
        let tokens = lex("namespace class const static partial string Banner").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Namespace));
        assert!(matches!(tokens[1].kind, TokenKind::Class));
        assert!(matches!(tokens[2].kind, TokenKind::Const));
        assert!(matches!(tokens[3].kind, TokenKind::Static));
        assert!(matches!(tokens[4].kind, TokenKind::Partial));
        assert!(matches!(tokens[5].kind, TokenKind::StringTy));
        assert!(matches!(tokens[6].kind, TokenKind::Ident(ref s) if s == "Banner"));
    }

    #[test]
    fn punctuation() {
        let tokens = lex("{ } ( ) [ ] ; , = + .").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Semi,
                TokenKind::Comma,
                TokenKind::Eq,
                TokenKind::Plus,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        let tokens = lex(r#""h\u{e9}llo\n" "a\"b" """#).unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Str(ref s) if s == "héllo\n"));
        assert!(matches!(tokens[1].kind, TokenKind::Str(ref s) if s == "a\"b"));
        assert!(matches!(tokens[2].kind, TokenKind::Str(ref s) if s.is_empty()));
    }

    #[test]
    fn non_ascii_passthrough() {
        let tokens = lex("\"héllo wörld\"").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Str(ref s) if s == "héllo wörld"));
    }

    #[test]
    fn comments_skipped() {
        let tokens = lex("class // trailing\n/* block\ncomment */ Banner").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Class));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(ref s) if s == "Banner"));
    }

    #[test]
    fn unterminated_string_is_error() {
        assert!(lex("\"oops").is_err());
    }

    #[test]
    fn numbers() {
        let tokens = lex("42 1_000").unwrap();
        assert!(matches!(tokens[0].kind, TokenKind::Int(42)));
        assert!(matches!(tokens[1].kind, TokenKind::Int(1000)));
    }
}
