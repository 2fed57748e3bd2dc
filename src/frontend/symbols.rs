//! Symbol table for the host declaration language.
//!
//! Tracks types, methods, and const members as interned symbols. Symbol
//! identity is [`SymbolId`] equality, which gives the generator reference
//! semantics: two types sharing a short name are never confused, and the
//! builtin `string` type is one well-known symbol rather than a name match.

use std::collections::HashMap;

use crate::frontend::ast::{Expr, Modifiers, NodeId, Span, Spanned};

/// Unique identifier for symbols; index into the table's symbol vector.
pub type SymbolId = usize;

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

#[derive(Debug, Clone)]
pub enum SymbolKind {
    Builtin(BuiltinType),
    Type(TypeSymbol),
    Method(MethodSymbol),
    Const(ConstSymbol),
}

/// The host language's builtin types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    Str,
    Int,
    Void,
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    /// Dot-separated fully-qualified name, e.g. `assets.web.Banners`.
    pub fq_name: String,
    pub namespace: Vec<String>,
    pub name: String,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone)]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type: SymbolId,
    pub modifiers: Modifiers,
    pub param_count: usize,
    /// Resolved return type symbol; `None` when the written type did not resolve.
    pub return_type: Option<SymbolId>,
    pub attributes: Vec<ResolvedAttribute>,
    pub span: Span,
}

/// An attribute usage with its type reference resolved (or not).
#[derive(Debug, Clone)]
pub struct ResolvedAttribute {
    pub attribute_type: Option<SymbolId>,
    /// Unevaluated argument expressions; folded on demand by `const_eval`.
    pub args: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone)]
pub struct ConstSymbol {
    pub name: String,
    pub containing_type: SymbolId,
    pub ty: Option<SymbolId>,
    pub value: Spanned<Expr>,
}

/// Well-known builtin symbol ids, assigned at table construction.
#[derive(Debug, Clone, Copy)]
pub struct Builtins {
    pub string_ty: SymbolId,
    pub int_ty: SymbolId,
    pub void_ty: SymbolId,
}

/// Symbol table for one compilation.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    types_by_fq: HashMap<String, SymbolId>,
    /// Simple-name index in declaration order; first entry wins ambiguous lookups.
    types_by_simple: HashMap<String, Vec<SymbolId>>,
    types_by_node: HashMap<NodeId, SymbolId>,
    methods_by_node: HashMap<NodeId, SymbolId>,
    consts_by_type: HashMap<(SymbolId, String), SymbolId>,
    builtins: Builtins,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            symbols: Vec::new(),
            types_by_fq: HashMap::new(),
            types_by_simple: HashMap::new(),
            types_by_node: HashMap::new(),
            methods_by_node: HashMap::new(),
            consts_by_type: HashMap::new(),
            builtins: Builtins {
                string_ty: 0,
                int_ty: 0,
                void_ty: 0,
            },
        };
        table.builtins = Builtins {
            string_ty: table.push(Symbol {
                name: "string".to_string(),
                kind: SymbolKind::Builtin(BuiltinType::Str),
            }),
            int_ty: table.push(Symbol {
                name: "int".to_string(),
                kind: SymbolKind::Builtin(BuiltinType::Int),
            }),
            void_ty: table.push(Symbol {
                name: "void".to_string(),
                kind: SymbolKind::Builtin(BuiltinType::Void),
            }),
        };
        table
    }

    fn push(&mut self, symbol: Symbol) -> SymbolId {
        let id = self.symbols.len();
        self.symbols.push(symbol);
        id
    }

    pub fn builtins(&self) -> Builtins {
        self.builtins
    }

    // ------------------------------------------------------------------
    // Definition
    // ------------------------------------------------------------------

    /// Define a type for the declaration node `node`. The first definition of
    /// a fully-qualified name wins; a duplicate returns `Err` with the
    /// existing symbol and leaves `node` undeclared.
    pub fn define_type(&mut self, node: NodeId, symbol: TypeSymbol) -> Result<SymbolId, SymbolId> {
        if let Some(&existing) = self.types_by_fq.get(&symbol.fq_name) {
            return Err(existing);
        }
        let fq = symbol.fq_name.clone();
        let simple = symbol.name.clone();
        let id = self.push(Symbol {
            name: simple.clone(),
            kind: SymbolKind::Type(symbol),
        });
        self.types_by_fq.insert(fq, id);
        self.types_by_simple.entry(simple).or_default().push(id);
        self.types_by_node.insert(node, id);
        Ok(id)
    }

    /// Define a method symbol and associate it with its declaration node.
    pub fn define_method(&mut self, node: NodeId, symbol: MethodSymbol) -> SymbolId {
        let id = self.push(Symbol {
            name: symbol.name.clone(),
            kind: SymbolKind::Method(symbol),
        });
        self.methods_by_node.insert(node, id);
        id
    }

    pub fn define_const(&mut self, symbol: ConstSymbol) -> SymbolId {
        let key = (symbol.containing_type, symbol.name.clone());
        let id = self.push(Symbol {
            name: symbol.name.clone(),
            kind: SymbolKind::Const(symbol),
        });
        // First definition wins, mirroring type handling.
        self.consts_by_type.entry(key).or_insert(id);
        id
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Declared-symbol lookup: syntax node to method symbol.
    ///
    /// Fails for methods of duplicate (skipped) type definitions, which the
    /// generator treats as silent rejection.
    pub fn declared_method(&self, node: NodeId) -> Option<SymbolId> {
        self.methods_by_node.get(&node).copied()
    }

    /// Declared-symbol lookup for a type declaration node.
    ///
    /// `None` for a duplicate definition whose earlier occurrence won.
    pub fn declared_type(&self, node: NodeId) -> Option<SymbolId> {
        self.types_by_node.get(&node).copied()
    }

    pub fn method(&self, id: SymbolId) -> Option<&MethodSymbol> {
        match &self.symbols.get(id)?.kind {
            SymbolKind::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_symbol(&self, id: SymbolId) -> Option<&TypeSymbol> {
        match &self.symbols.get(id)?.kind {
            SymbolKind::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn const_symbol(&self, id: SymbolId) -> Option<&ConstSymbol> {
        match &self.symbols.get(id)?.kind {
            SymbolKind::Const(c) => Some(c),
            _ => None,
        }
    }

    pub fn find_type(&self, fq_name: &str) -> Option<SymbolId> {
        self.types_by_fq.get(fq_name).copied()
    }

    /// Resolve a type name as written at a use site.
    ///
    /// Order: builtin keywords, fully-qualified from the current namespace,
    /// fully-qualified from the root, then first declared type with a matching
    /// simple name. Deterministic because the simple-name index preserves
    /// declaration order.
    pub fn resolve_type_name(&self, name: &str, current_namespace: &[String]) -> Option<SymbolId> {
        match name {
            "string" => return Some(self.builtins.string_ty),
            "int" => return Some(self.builtins.int_ty),
            "void" => return Some(self.builtins.void_ty),
            _ => {}
        }
        if !current_namespace.is_empty() {
            let mut fq = current_namespace.join(".");
            fq.push('.');
            fq.push_str(name);
            if let Some(id) = self.find_type(&fq) {
                return Some(id);
            }
        }
        if let Some(id) = self.find_type(name) {
            return Some(id);
        }
        if !name.contains('.') {
            if let Some(ids) = self.types_by_simple.get(name) {
                return ids.first().copied();
            }
        }
        None
    }

    /// Look up a const member declared on a specific type.
    pub fn const_in_type(&self, containing_type: SymbolId, name: &str) -> Option<SymbolId> {
        self.consts_by_type.get(&(containing_type, name.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
