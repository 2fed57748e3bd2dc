//! Candidate collection: the syntactic pre-filter of the pipeline.
//!
//! Walks every declaration of the compilation and records method declarations
//! carrying at least one attribute. Purely syntactic by design: the vast
//! majority of declarations have no attributes at all, and filtering them out
//! here avoids paying symbol-resolution cost for them in the validator.

use crate::compilation::Compilation;
use crate::frontend::ast::{Declaration, Member, MethodDecl, Span, Spanned};

/// A method declaration that might be a placeholder. Ephemeral: lives only
/// until the validator resolves or rejects it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'ast> {
    pub method: &'ast MethodDecl,
    /// Span of the member declaration, for rejection reporting.
    pub span: Span,
}

/// Collect candidates across all units in discovery order (unit order, then
/// source order within a unit).
#[tracing::instrument(skip_all)]
pub fn collect_candidates(compilation: &Compilation) -> Vec<Candidate<'_>> {
    let mut candidates = Vec::new();
    for unit in compilation.units() {
        walk(&unit.declarations, &mut candidates);
    }
    candidates
}

fn walk<'ast>(declarations: &'ast [Spanned<Declaration>], out: &mut Vec<Candidate<'ast>>) {
    for decl in declarations {
        match &decl.node {
            Declaration::Namespace(ns) => walk(&ns.declarations, out),
            Declaration::Type(class) => {
                for member in &class.members {
                    if let Member::Method(method) = &member.node {
                        if !method.attributes.is_empty() {
                            out.push(Candidate {
                                method,
                                span: member.span,
                            });
                        }
                    }
                }
            }
        }
    }
}
