//! Walking the global interface graph

use crate::error::InterfaceError;
use rustc_hash::FxHashSet;
use tb_symbols::{SymbolGraph, TypeSymbol};
use tb_types::{Substitution, TypeReference};

/// Every interface reachable from one reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ancestors {
    /// Closed ancestor references, in discovery order; the start reference is not included
    pub closed: Vec<TypeReference>,
    /// Ancestors the graph does not define; their own parents are unknown
    pub unresolved: Vec<TypeReference>,
}

impl Ancestors {
    /// Whether `reference` is among the ancestors
    #[must_use]
    pub fn contains(&self, reference: &TypeReference) -> bool {
        self.closed.contains(reference)
    }
}

/// Read-only view of the interface inheritance graph
#[derive(Debug, Clone, Copy)]
pub struct InterfaceHierarchy<'graph> {
    graph: &'graph SymbolGraph,
}

impl<'graph> InterfaceHierarchy<'graph> {
    /// Hierarchy over `graph`
    #[must_use]
    pub fn new(graph: &'graph SymbolGraph) -> Self {
        Self { graph }
    }

    /// Definition a reference points at, if it is in the graph
    #[must_use]
    pub fn definition(&self, reference: &TypeReference) -> Option<&'graph TypeSymbol> {
        self.graph.resolve(reference)
    }

    /// Check that a reference supplies as many arguments as its definition declares
    ///
    /// Open references (no arguments) are always accepted.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::ArityMismatch`] on disagreement.
    pub fn check_arity(&self, reference: &TypeReference) -> Result<(), InterfaceError> {
        let (Some(definition), TypeReference::Named(named)) = (self.definition(reference), reference)
        else {
            return Ok(());
        };
        if named.type_args.is_empty() || named.type_args.len() == definition.arity() as usize {
            return Ok(());
        }
        Err(InterfaceError::ArityMismatch {
            reference: reference.clone(),
            expected: definition.arity(),
            found: named.type_args.len(),
        })
    }

    /// Transitive ancestors of `start`, with generic arguments closed at every step
    ///
    /// Depth-first over the definitions' interface lists. Each closed reference is
    /// expanded once, so cyclic or repeated inheritance terminates.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::ArityMismatch`] when a reference on the way supplies the
    /// wrong number of type arguments.
    pub fn ancestors(&self, start: &TypeReference) -> Result<Ancestors, InterfaceError> {
        let mut result = Ancestors::default();
        let mut visited = FxHashSet::default();
        visited.insert(start.clone());
        let mut stack = vec![start.clone()];

        while let Some(current) = stack.pop() {
            if current != *start {
                result.closed.push(current.clone());
            }
            let Some(definition) = self.definition(&current) else {
                if current != *start {
                    result.unresolved.push(current);
                }
                continue;
            };
            self.check_arity(&current)?;

            let substitution = match &current {
                TypeReference::Named(named) if !named.type_args.is_empty() => {
                    Substitution::for_arguments(&definition.generic_owner(), &named.type_args)
                }
                _ => Substitution::new(),
            };

            // reversed so the first declared parent is expanded first
            for parent in definition.interfaces.iter().rev() {
                let closed = substitution.apply(parent);
                if visited.insert(closed.clone()) {
                    stack.push(closed);
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_ids::TypeStableId;
    use tb_symbols::{GenericParameterDef, TypeKind};

    fn interface(full_name: &str, parents: Vec<TypeReference>) -> TypeSymbol {
        let mut symbol = TypeSymbol::new(TypeStableId::new("core", full_name), TypeKind::Interface);
        symbol.interfaces = parents;
        symbol
    }

    fn reference(name: &str) -> TypeReference {
        TypeReference::named("core", "Sys", name)
    }

    #[test]
    fn test_transitive_ancestors() {
        let graph = SymbolGraph::builder()
            .with_type(interface("Sys.IA", vec![]))
            .with_type(interface("Sys.IB", vec![reference("IA")]))
            .with_type(interface("Sys.IC", vec![reference("IB")]))
            .build()
            .unwrap();
        let ancestors = InterfaceHierarchy::new(&graph).ancestors(&reference("IC")).unwrap();
        assert_eq!(ancestors.closed, vec![reference("IB"), reference("IA")]);
        assert!(ancestors.unresolved.is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = SymbolGraph::builder()
            .with_type(interface("Sys.IA", vec![reference("IB")]))
            .with_type(interface("Sys.IB", vec![reference("IA")]))
            .build()
            .unwrap();
        let ancestors = InterfaceHierarchy::new(&graph).ancestors(&reference("IA")).unwrap();
        assert_eq!(ancestors.closed, vec![reference("IB")]);
    }

    #[test]
    fn test_generic_arguments_are_closed() {
        let enumerable_id = TypeStableId::new("core", "Sys.IEnumerable`1");
        let owner = tb_types::GenericOwner::Type(enumerable_id.clone());
        let mut enumerable = TypeSymbol::new(enumerable_id, TypeKind::Interface);
        enumerable.generic_parameters = vec![GenericParameterDef::new("T", 0)];
        enumerable.interfaces = vec![TypeReference::generic(
            "core",
            "Sys",
            "IIterable",
            vec![TypeReference::parameter(owner, 0, "T")],
        )];

        let iterable_id = TypeStableId::new("core", "Sys.IIterable`1");
        let mut iterable = TypeSymbol::new(iterable_id, TypeKind::Interface);
        iterable.generic_parameters = vec![GenericParameterDef::new("T", 0)];

        let graph = SymbolGraph::builder()
            .with_type(enumerable)
            .with_type(iterable)
            .build()
            .unwrap();
        let start = TypeReference::generic("core", "Sys", "IEnumerable", vec![reference("String")]);
        let ancestors = InterfaceHierarchy::new(&graph).ancestors(&start).unwrap();
        assert_eq!(ancestors.closed.len(), 1);
        assert_eq!(ancestors.closed[0].to_string(), "Sys.IIterable<Sys.String>");
    }

    #[test]
    fn test_unresolved_parent_recorded() {
        let graph = SymbolGraph::builder()
            .with_type(interface("Sys.IA", vec![reference("IMissing")]))
            .build()
            .unwrap();
        let ancestors = InterfaceHierarchy::new(&graph).ancestors(&reference("IA")).unwrap();
        // still an ancestor, just one whose own parents are unknown
        assert_eq!(ancestors.closed, vec![reference("IMissing")]);
        assert_eq!(ancestors.unresolved, vec![reference("IMissing")]);
    }
}
