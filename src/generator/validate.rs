//! Symbol validation: the structural filter chain of the pipeline.
//!
//! Every check in the chain rejects by omission: a build is never blocked by
//! a malformed placeholder. Rejection reasons are still retained as typed
//! values so tooling and tests can see *why* a candidate was skipped; callers
//! are free to discard them.
//!
//! Chain order matters: the syntactic checks (modifiers, parameter count)
//! come first so that symbol resolution is only paid for plausible
//! candidates, mirroring the collector's cheap-filter-first design.

use thiserror::Error;

use crate::compilation::Compilation;
use crate::frontend::ast::Span;
use crate::frontend::const_eval::{self, ConstValue};
use crate::frontend::symbols::SymbolId;
use crate::generator::collect::Candidate;
use crate::generator::emit;

/// A validated placeholder method, ready for grouping. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMethod {
    pub method: SymbolId,
    pub containing_type: SymbolId,
    /// The constant string payload of the marker attribute.
    pub value: String,
}

/// Why a candidate was skipped. Diagnostic-quality output only; never an
/// error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("method is not declared `static partial`")]
    NotStaticPartial,
    #[error("placeholder methods take no parameters")]
    HasParameters,
    #[error("declaration does not resolve to a method symbol")]
    UnresolvedSymbol,
    #[error("return type is not the builtin `string` type")]
    WrongReturnType,
    #[error("no `Utf8` marker attribute present")]
    MissingMarker,
    #[error("marker attribute argument is not a constant string")]
    NonConstantArgument,
    #[error("name cannot be expressed as a generated Rust identifier")]
    UnmappableName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub method_name: String,
    pub span: Span,
    pub reason: RejectReason,
}

/// Validate one candidate against the semantic model.
pub fn validate(compilation: &Compilation, candidate: &Candidate<'_>) -> Result<ResolvedMethod, Rejection> {
    let method = candidate.method;
    let reject = |reason| Rejection {
        method_name: method.name.clone(),
        span: candidate.span,
        reason,
    };

    // Syntactic checks first; no symbol table access.
    if !method.modifiers.is_static_partial() {
        return Err(reject(RejectReason::NotStaticPartial));
    }
    if !method.params.is_empty() {
        return Err(reject(RejectReason::HasParameters));
    }

    let symbols = compilation.symbols();
    let Some(method_id) = symbols.declared_method(method.id) else {
        return Err(reject(RejectReason::UnresolvedSymbol));
    };
    let Some(symbol) = symbols.method(method_id) else {
        return Err(reject(RejectReason::UnresolvedSymbol));
    };

    // Identity comparison against the well-known `string` symbol, never a
    // name match.
    if symbol.return_type != Some(symbols.builtins().string_ty) {
        return Err(reject(RejectReason::WrongReturnType));
    }

    let marker = compilation.marker_attribute();
    let Some(attr) = symbol
        .attributes
        .iter()
        .find(|attr| attr.attribute_type.is_some() && attr.attribute_type == marker)
    else {
        return Err(reject(RejectReason::MissingMarker));
    };

    let Some(arg) = attr.args.first() else {
        return Err(reject(RejectReason::NonConstantArgument));
    };
    let value = const_eval::eval(symbols, symbol.containing_type, &arg.node);
    let Some(ConstValue::Str(value)) = value else {
        return Err(reject(RejectReason::NonConstantArgument));
    };

    // Names without a raw-identifier form (`crate`, `self`, ...) would abort
    // the whole emission pass; skip the candidate instead.
    let Some(ty) = symbols.type_symbol(symbol.containing_type) else {
        return Err(reject(RejectReason::UnresolvedSymbol));
    };
    if !emit::is_mappable_ident(&symbol.name)
        || !emit::is_mappable_ident(&ty.name)
        || ty.namespace.iter().any(|segment| !emit::is_mappable_ident(segment))
    {
        return Err(reject(RejectReason::UnmappableName));
    }

    Ok(ResolvedMethod {
        method: method_id,
        containing_type: symbol.containing_type,
        value,
    })
}
