//! Name resolution: builds the symbol table from parsed source units.
//!
//! Two passes over the declaration tree:
//!
//! 1. declare every type and const member, so use-site resolution never
//!    depends on declaration order;
//! 2. declare every method, resolving return types and attribute type
//!    references against the completed type universe.
//!
//! Duplicate type definitions keep the first occurrence; members of a skipped
//! duplicate are never declared, so their declared-symbol lookup fails and the
//! generator rejects them silently. The host compiler is the one that reports
//! the duplicate itself.

use crate::frontend::ast::{Declaration, Member, NamespaceDecl, SourceUnit, Spanned, TypeDecl};
use crate::frontend::symbols::{ConstSymbol, MethodSymbol, ResolvedAttribute, SymbolId, SymbolTable, TypeSymbol};

/// Build a symbol table for a set of parsed units.
#[tracing::instrument(skip_all, fields(unit_count = units.len()))]
pub fn resolve(units: &[SourceUnit]) -> SymbolTable {
    let mut table = SymbolTable::new();
    let mut namespace = Vec::new();

    for unit in units {
        declare_types(&mut table, &mut namespace, &unit.declarations);
        debug_assert!(namespace.is_empty());
    }
    for unit in units {
        declare_methods(&mut table, &mut namespace, &unit.declarations);
        debug_assert!(namespace.is_empty());
    }
    table
}

fn declare_types(table: &mut SymbolTable, namespace: &mut Vec<String>, decls: &[Spanned<Declaration>]) {
    for decl in decls {
        match &decl.node {
            Declaration::Namespace(ns) => in_namespace(namespace, ns, |namespace| {
                declare_types(table, namespace, &ns.declarations);
            }),
            Declaration::Type(class) => declare_type(table, namespace, class),
        }
    }
}

fn declare_type(table: &mut SymbolTable, namespace: &[String], class: &TypeDecl) {
    let fq_name = qualify(namespace, &class.name);
    let symbol = TypeSymbol {
        fq_name,
        namespace: namespace.to_vec(),
        name: class.name.clone(),
        modifiers: class.modifiers,
    };
    let Ok(type_id) = table.define_type(class.id, symbol) else {
        // Duplicate definition: drop this declaration's members.
        return;
    };
    for member in &class.members {
        if let Member::Const(konst) = &member.node {
            let ty = table.resolve_type_name(&konst.ty.name, namespace);
            table.define_const(ConstSymbol {
                name: konst.name.clone(),
                containing_type: type_id,
                ty,
                value: konst.value.clone(),
            });
        }
    }
}

fn declare_methods(table: &mut SymbolTable, namespace: &mut Vec<String>, decls: &[Spanned<Declaration>]) {
    for decl in decls {
        match &decl.node {
            Declaration::Namespace(ns) => in_namespace(namespace, ns, |namespace| {
                declare_methods(table, namespace, &ns.declarations);
            }),
            Declaration::Type(class) => {
                // Only the surviving definition of a type owns its members.
                let Some(type_id) = table.declared_type(class.id) else {
                    continue;
                };
                for member in &class.members {
                    let Member::Method(method) = &member.node else {
                        continue;
                    };
                    let return_type = table.resolve_type_name(&method.return_type.name, namespace);
                    let attributes = method
                        .attributes
                        .iter()
                        .map(|attr| ResolvedAttribute {
                            attribute_type: resolve_attribute_type(table, namespace, &attr.node.name),
                            args: attr.node.args.clone(),
                        })
                        .collect();
                    table.define_method(
                        method.id,
                        MethodSymbol {
                            name: method.name.clone(),
                            containing_type: type_id,
                            modifiers: method.modifiers,
                            param_count: method.params.len(),
                            return_type,
                            attributes,
                            span: member.span,
                        },
                    );
                }
            }
        }
    }
}

/// Attribute type lookup; dotted names must match a fully-qualified type.
fn resolve_attribute_type(table: &SymbolTable, namespace: &[String], name: &str) -> Option<SymbolId> {
    if name.contains('.') {
        table.find_type(name)
    } else {
        table.resolve_type_name(name, namespace)
    }
}

fn in_namespace(namespace: &mut Vec<String>, ns: &NamespaceDecl, f: impl FnOnce(&mut Vec<String>)) {
    let depth = namespace.len();
    namespace.extend(ns.path.iter().cloned());
    f(namespace);
    namespace.truncate(depth);
}

fn qualify(namespace: &[String], name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace.join("."), name)
    }
}
