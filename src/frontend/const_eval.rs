//! Constant-value evaluation for attribute arguments.
//!
//! Mirrors a compiler's attribute-argument folding: literals fold to
//! themselves, parenthesized expressions fold to their inner value, `+` folds
//! constant string concatenation, and references fold iff they name a `const`
//! member reachable from the use site. Anything else is not a constant and
//! yields `None`; the caller decides what that means (for the generator:
//! silent rejection).

use crate::frontend::ast::Expr;
use crate::frontend::symbols::{ConstSymbol, SymbolId, SymbolTable};

/// Reference chains longer than this are treated as non-constant. Guards
/// against cyclic const definitions.
const MAX_REF_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Str(String),
    Int(i64),
}

/// Evaluate `expr` in the scope of `scope_type` (the type whose member the
/// expression appears on).
pub fn eval(table: &SymbolTable, scope_type: SymbolId, expr: &Expr) -> Option<ConstValue> {
    eval_at_depth(table, scope_type, expr, 0)
}

fn eval_at_depth(table: &SymbolTable, scope_type: SymbolId, expr: &Expr, depth: usize) -> Option<ConstValue> {
    if depth > MAX_REF_DEPTH {
        return None;
    }
    match expr {
        Expr::Str(s) => Some(ConstValue::Str(s.clone())),
        Expr::Int(i) => Some(ConstValue::Int(*i)),
        Expr::Paren(inner) => eval_at_depth(table, scope_type, &inner.node, depth),
        Expr::Concat(lhs, rhs) => {
            let lhs = eval_at_depth(table, scope_type, &lhs.node, depth)?;
            let rhs = eval_at_depth(table, scope_type, &rhs.node, depth)?;
            match (lhs, rhs) {
                (ConstValue::Str(mut a), ConstValue::Str(b)) => {
                    a.push_str(&b);
                    Some(ConstValue::Str(a))
                }
                _ => None,
            }
        }
        Expr::Ref(name) => {
            let konst = resolve_const_ref(table, scope_type, name)?;
            eval_at_depth(table, konst.containing_type, &konst.value.node, depth + 1)
        }
    }
}

/// Resolve a const reference as written at a use site.
///
/// A simple name looks up a const on the scope type itself; a dotted name is
/// `Type.NAME` with the type part resolved like any other type reference.
fn resolve_const_ref<'a>(table: &'a SymbolTable, scope_type: SymbolId, name: &str) -> Option<&'a ConstSymbol> {
    let const_id = match name.rsplit_once('.') {
        None => table.const_in_type(scope_type, name)?,
        Some((type_part, const_name)) => {
            let namespace = table.type_symbol(scope_type).map(|t| t.namespace.clone()).unwrap_or_default();
            let type_id = table.resolve_type_name(type_part, &namespace)?;
            table.const_in_type(type_id, const_name)?
        }
    };
    table.const_symbol(const_id)
}
