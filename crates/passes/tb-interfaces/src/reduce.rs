//! Transitive reduction of a type's direct interface list

use crate::error::InterfaceError;
use crate::hierarchy::{Ancestors, InterfaceHierarchy};
use tb_symbols::TypeSymbol;
use tb_types::TypeReference;

/// Why an interface was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneReason {
    /// Listed more than once
    Duplicate,
    /// Already inherited through another listed interface
    InheritedThrough(TypeReference),
}

/// One dropped interface reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    /// The dropped reference
    pub reference: TypeReference,
    /// Why it was dropped
    pub reason: PruneReason,
}

/// Result of reducing one type's interface list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Remaining interfaces, in declaration order
    pub kept: Vec<TypeReference>,
    /// Dropped interfaces, in declaration order
    pub pruned: Vec<Pruned>,
    /// Direct interfaces the graph does not define
    pub unresolved: Vec<TypeReference>,
}

impl Reduction {
    /// Whether the remaining set cannot be expressed as a single inheritance chain
    #[must_use]
    pub fn is_diamond(&self) -> bool {
        self.kept.len() >= 2
    }
}

/// Reduce `ty`'s direct interface list
///
/// An interface is dropped when another remaining candidate inherits it. Candidates are
/// visited in declaration order against the current remaining set, so two interfaces
/// that inherit each other keep the later one.
///
/// # Errors
///
/// Returns [`InterfaceError::ArityMismatch`] if any reference reachable from the list
/// supplies the wrong number of type arguments.
pub fn reduce(hierarchy: &InterfaceHierarchy<'_>, ty: &TypeSymbol) -> Result<Reduction, InterfaceError> {
    let mut reduction = Reduction::default();

    let mut candidates: Vec<TypeReference> = Vec::with_capacity(ty.interfaces.len());
    for reference in &ty.interfaces {
        hierarchy.check_arity(reference)?;
        if candidates.contains(reference) {
            reduction.pruned.push(Pruned {
                reference: reference.clone(),
                reason: PruneReason::Duplicate,
            });
            continue;
        }
        if hierarchy.definition(reference).is_none() {
            reduction.unresolved.push(reference.clone());
        }
        candidates.push(reference.clone());
    }

    let ancestors = candidates
        .iter()
        .map(|candidate| hierarchy.ancestors(candidate))
        .collect::<Result<Vec<Ancestors>, _>>()?;

    let mut remaining = vec![true; candidates.len()];
    for (idx, candidate) in candidates.iter().enumerate() {
        let inherited_through = candidates.iter().enumerate().find(|&(other, _)| {
            other != idx && remaining[other] && ancestors[other].contains(candidate)
        });
        if let Some((_, through)) = inherited_through {
            remaining[idx] = false;
            reduction.pruned.push(Pruned {
                reference: candidate.clone(),
                reason: PruneReason::InheritedThrough(through.clone()),
            });
        }
    }

    reduction.kept = candidates
        .into_iter()
        .zip(remaining)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect();
    Ok(reduction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_ids::TypeStableId;
    use tb_symbols::{SymbolGraph, TypeKind};

    fn interface(full_name: &str, parents: Vec<TypeReference>) -> TypeSymbol {
        let mut symbol = TypeSymbol::new(TypeStableId::new("core", full_name), TypeKind::Interface);
        symbol.interfaces = parents;
        symbol
    }

    fn reference(name: &str) -> TypeReference {
        TypeReference::named("core", "Sys", name)
    }

    fn class(interfaces: Vec<TypeReference>) -> TypeSymbol {
        let mut symbol = TypeSymbol::new(TypeStableId::new("app", "App.Widget"), TypeKind::Class);
        symbol.interfaces = interfaces;
        symbol
    }

    fn graph() -> SymbolGraph {
        SymbolGraph::builder()
            .with_type(interface("Sys.ICollection", vec![reference("IEnumerable")]))
            .with_type(interface("Sys.IEnumerable", vec![]))
            .with_type(interface("Sys.IList", vec![reference("ICollection")]))
            .with_type(interface("Sys.IDisposable", vec![]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_inherited_interfaces_pruned() {
        let graph = graph();
        let hierarchy = InterfaceHierarchy::new(&graph);
        let widget = class(vec![reference("IEnumerable"), reference("IList"), reference("ICollection")]);

        let reduction = reduce(&hierarchy, &widget).unwrap();
        assert_eq!(reduction.kept, vec![reference("IList")]);
        assert_eq!(reduction.pruned.len(), 2);
        assert_eq!(
            reduction.pruned[0].reason,
            PruneReason::InheritedThrough(reference("IList"))
        );
        assert!(!reduction.is_diamond());
    }

    #[test]
    fn test_duplicates_pruned() {
        let graph = graph();
        let hierarchy = InterfaceHierarchy::new(&graph);
        let widget = class(vec![reference("IDisposable"), reference("IDisposable")]);

        let reduction = reduce(&hierarchy, &widget).unwrap();
        assert_eq!(reduction.kept, vec![reference("IDisposable")]);
        assert_eq!(reduction.pruned[0].reason, PruneReason::Duplicate);
    }

    #[test]
    fn test_unrelated_interfaces_form_diamond() {
        let graph = graph();
        let hierarchy = InterfaceHierarchy::new(&graph);
        let widget = class(vec![reference("IList"), reference("IDisposable")]);

        let reduction = reduce(&hierarchy, &widget).unwrap();
        assert!(reduction.pruned.is_empty());
        assert!(reduction.is_diamond());
    }

    #[test]
    fn test_unresolved_interface_kept() {
        let graph = graph();
        let hierarchy = InterfaceHierarchy::new(&graph);
        let widget = class(vec![reference("IExternal")]);

        let reduction = reduce(&hierarchy, &widget).unwrap();
        assert_eq!(reduction.kept, vec![reference("IExternal")]);
        assert_eq!(reduction.unresolved, vec![reference("IExternal")]);
    }
}
