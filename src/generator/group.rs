//! Grouping: partition validated methods by containing type.
//!
//! Group order follows first appearance of each type among the validated
//! methods, and methods keep their validation order within a group. Combined
//! with deterministic collection this makes the whole pipeline reproducible
//! for a given compilation.

use std::collections::HashMap;

use crate::frontend::symbols::SymbolId;
use crate::generator::validate::ResolvedMethod;

/// All validated placeholder methods of one containing type. One generated
/// file is emitted per group.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup {
    pub containing_type: SymbolId,
    pub methods: Vec<ResolvedMethod>,
}

/// Partition `methods` into per-type groups, first-seen order.
pub fn group_by_type(methods: Vec<ResolvedMethod>) -> Vec<TypeGroup> {
    let mut groups: Vec<TypeGroup> = Vec::new();
    let mut index_of: HashMap<SymbolId, usize> = HashMap::new();

    for method in methods {
        match index_of.get(&method.containing_type) {
            Some(&idx) => groups[idx].methods.push(method),
            None => {
                index_of.insert(method.containing_type, groups.len());
                groups.push(TypeGroup {
                    containing_type: method.containing_type,
                    methods: vec![method],
                });
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(method: SymbolId, containing_type: SymbolId) -> ResolvedMethod {
        ResolvedMethod {
            method,
            containing_type,
            value: String::new(),
        }
    }

    #[test]
    fn groups_in_first_seen_order() {
        let groups = group_by_type(vec![
            resolved(10, 1),
            resolved(11, 2),
            resolved(12, 1),
            resolved(13, 3),
        ]);
        let order: Vec<SymbolId> = groups.iter().map(|g| g.containing_type).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(groups[0].methods.len(), 2);
        assert_eq!(groups[0].methods[0].method, 10);
        assert_eq!(groups[0].methods[1].method, 12);
    }

    #[test]
    fn every_method_lands_in_exactly_one_group() {
        let input = vec![resolved(1, 7), resolved(2, 7), resolved(3, 8)];
        let groups = group_by_type(input.clone());
        let total: usize = groups.iter().map(|g| g.methods.len()).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_by_type(Vec::new()).is_empty());
    }
}
