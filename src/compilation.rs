//! One host compilation: parsed source units plus the resolved semantic model.
//!
//! This is the boundary the generator consumes: the full syntax-tree set
//! together with symbol resolution and constant evaluation. The marker
//! attribute declaration is injected as the first unit of every compilation,
//! before any user source.

use crate::frontend::ast::{NodeIdAllocator, SourceUnit};
use crate::frontend::diagnostics::CompileErrors;
use crate::frontend::symbols::{SymbolId, SymbolTable};
use crate::frontend::{lexer, parser, resolver};
use crate::generator::marker;

/// A fully parsed and resolved set of host sources.
#[derive(Debug)]
pub struct Compilation {
    units: Vec<SourceUnit>,
    symbols: SymbolTable,
    marker_attribute: Option<SymbolId>,
}

impl Compilation {
    /// Parse and resolve `sources` (pairs of unit name and text).
    ///
    /// All units are lexed and parsed even when earlier ones fail, so the
    /// caller sees every diagnostic in one pass. Resolution only runs on a
    /// fully parsed set.
    #[tracing::instrument(skip_all, fields(source_count = sources.len()))]
    pub fn compile(sources: &[(&str, &str)]) -> Result<Self, CompileErrors> {
        let mut ids = NodeIdAllocator::new();
        let mut errors = Vec::new();
        let mut units = Vec::new();

        let mut all: Vec<(&str, &str)> = Vec::with_capacity(sources.len() + 1);
        all.push((marker::MARKER_UNIT_NAME, marker::MARKER_DECLARATION));
        all.extend_from_slice(sources);

        for (name, text) in all {
            match lexer::lex(text) {
                Ok(tokens) => match parser::parse(&tokens, name, &mut ids) {
                    Ok(unit) => units.push(unit),
                    Err(errs) => errors.extend(errs),
                },
                Err(errs) => errors.extend(errs),
            }
        }
        if let Some(errors) = CompileErrors::from_vec(errors) {
            return Err(errors);
        }

        let symbols = resolver::resolve(&units);
        let marker_attribute = symbols.find_type(marker::MARKER_FQ_NAME);
        Ok(Self {
            units,
            symbols,
            marker_attribute,
        })
    }

    /// Every unit in the compilation, injected fragment first.
    pub fn units(&self) -> &[SourceUnit] {
        &self.units
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The resolved marker attribute type symbol.
    ///
    /// Present in every compilation built through [`Compilation::compile`]
    /// because the declaration fragment is injected unconditionally.
    pub fn marker_attribute(&self) -> Option<SymbolId> {
        self.marker_attribute
    }
}
