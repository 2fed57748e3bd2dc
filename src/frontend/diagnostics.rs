//! Diagnostics for the host-language frontend.
//!
//! Frontend failures (lexing, parsing) are real errors: the generator never
//! runs over a compilation that failed to parse. Generator-side rejections are
//! deliberately *not* errors; see `generator::validate`.

use miette::Diagnostic;
use thiserror::Error;

use crate::frontend::ast::Span;

/// A compile-time error with location information.
///
/// Every frontend error is syntactic: the lexer and parser are the only
/// producers. Resolution failures surface as generator-side rejections, not
/// as errors.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("syntax error: {message}")]
pub struct CompileError {
    pub message: String,
    #[label("{message}")]
    pub span: miette::SourceSpan,
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: span.into(),
        }
    }
}

/// Collection of compile errors from one compilation attempt.
///
/// A compilation reports every error it finds rather than stopping at the
/// first, so callers get all diagnostics in one pass.
#[derive(Debug)]
pub struct CompileErrors(pub Vec<CompileError>);

impl CompileErrors {
    pub fn from_vec(errors: Vec<CompileError>) -> Option<Self> {
        if errors.is_empty() { None } else { Some(Self(errors)) }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompileError> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&CompileError> {
        self.0.first()
    }
}

impl std::fmt::Display for CompileErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.len() == 1 {
            write!(f, "{}", self.0[0])
        } else {
            writeln!(f, "{} compile errors:", self.0.len())?;
            for (i, err) in self.0.iter().enumerate() {
                writeln!(f, "  {}: {}", i + 1, err)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for CompileErrors {}

impl From<CompileError> for CompileErrors {
    fn from(e: CompileError) -> Self {
        CompileErrors(vec![e])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_displays_inline() {
        let errors = CompileErrors::from_vec(vec![CompileError::syntax("expected `{`", Span::new(3, 4))]).unwrap();
        assert_eq!(errors.to_string(), "syntax error: expected `{`");
    }

    #[test]
    fn multiple_errors_display_as_a_numbered_list() {
        let errors = CompileErrors::from_vec(vec![
            CompileError::syntax("expected `{`", Span::new(3, 4)),
            CompileError::syntax("expected expression", Span::new(9, 10)),
        ])
        .unwrap();
        let text = errors.to_string();
        assert!(text.starts_with("2 compile errors:"));
        assert!(text.contains("1: syntax error: expected `{`"));
        assert!(text.contains("2: syntax error: expected expression"));
    }

    #[test]
    fn from_vec_of_nothing_is_none() {
        assert!(CompileErrors::from_vec(Vec::new()).is_none());
    }
}
