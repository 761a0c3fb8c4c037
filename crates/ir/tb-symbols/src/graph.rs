//! The symbol graph and its builder

use crate::member::{EmitScope, MemberKind};
use crate::symbol::{IntersectionAlias, NamespaceSymbol, TypeSymbol};
use la_arena::{Arena, Idx};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use std::convert::Infallible;
use tb_ids::{MemberStableId, TypeStableId};
use tb_types::TypeReference;

/// Index of a type in the graph's arena
pub type TypeIdx = Idx<TypeSymbol>;

/// Violations of the loader contract found while building a graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Two types share one identity
    #[error("duplicate type {id}")]
    DuplicateType {
        /// The repeated identity
        id: TypeStableId,
    },

    /// Two members of one type share one identity
    #[error("duplicate member {member} on {owner}")]
    DuplicateMember {
        /// Declaring type
        owner: TypeStableId,
        /// The repeated identity
        member: MemberStableId,
    },

    /// A member's identity names a different declaring type
    #[error("member {member} is listed on {owner} but declared by another type")]
    ForeignMember {
        /// Type listing the member
        owner: TypeStableId,
        /// The member
        member: MemberStableId,
    },

    /// A nested type's declaring type is not in the graph
    #[error("nested type {nested} refers to missing declaring type {declaring}")]
    MissingDeclaringType {
        /// The nested type
        nested: TypeStableId,
        /// The missing declaring type
        declaring: TypeStableId,
    },

    /// A type lists a nested type that is not in the graph
    #[error("{owner} lists missing nested type {nested}")]
    MissingNestedType {
        /// Declaring type
        owner: TypeStableId,
        /// The missing nested type
        nested: TypeStableId,
    },

    /// An alias was recorded for a type that is not in the graph
    #[error("intersection alias recorded for missing type {id}")]
    MissingAliasTarget {
        /// The missing type
        id: TypeStableId,
    },
}

/// Immutable graph of namespaces, types and members
///
/// Types are stored in an arena in a canonical order (namespace name, then identity),
/// so iteration never depends on the order the loader produced them in. All
/// cross-references are identity lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolGraph {
    types: Arena<TypeSymbol>,
    index: FxHashMap<TypeStableId, TypeIdx>,
    namespaces: Vec<NamespaceSymbol>,
}

impl SymbolGraph {
    /// Start building a graph
    #[must_use]
    pub fn builder() -> SymbolGraphBuilder {
        SymbolGraphBuilder::new()
    }

    /// Look up a type by identity
    #[must_use]
    pub fn get(&self, id: &TypeStableId) -> Option<&TypeSymbol> {
        self.index.get(id).map(|&idx| &self.types[idx])
    }

    /// Look up the definition a reference points at
    #[must_use]
    pub fn resolve(&self, reference: &TypeReference) -> Option<&TypeSymbol> {
        reference.stable_id().and_then(|id| self.get(&id))
    }

    /// Whether the graph contains a type
    #[must_use]
    pub fn contains(&self, id: &TypeStableId) -> bool {
        self.index.contains_key(id)
    }

    /// All types in canonical order
    pub fn types(&self) -> impl Iterator<Item = &TypeSymbol> {
        self.types.iter().map(|(_, ty)| ty)
    }

    /// All namespaces, sorted by name
    #[must_use]
    pub fn namespaces(&self) -> &[NamespaceSymbol] {
        &self.namespaces
    }

    /// A namespace by name
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceSymbol> {
        self.namespaces
            .binary_search_by(|namespace| namespace.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.namespaces[idx])
    }

    /// All intersection aliases across namespaces
    pub fn aliases(&self) -> impl Iterator<Item = &IntersectionAlias> {
        self.namespaces
            .iter()
            .flat_map(|namespace| namespace.aliases.iter())
    }

    /// Number of types
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.len() == 0
    }

    /// Number of members across all types
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.types().map(|ty| ty.members.len()).sum()
    }

    /// New graph with every type rewritten by `rewrite`
    ///
    /// The rewrite must keep each type's identity; namespace grouping and aliases are
    /// carried over unchanged.
    #[must_use]
    pub fn map_types(&self, mut rewrite: impl FnMut(&TypeSymbol) -> TypeSymbol) -> Self {
        match self.try_map_types(|ty| Ok::<_, Infallible>(rewrite(ty))) {
            Ok(graph) => graph,
            Err(never) => match never {},
        }
    }

    /// Fallible [`SymbolGraph::map_types`]
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `rewrite`.
    pub fn try_map_types<E>(
        &self,
        mut rewrite: impl FnMut(&TypeSymbol) -> Result<TypeSymbol, E>,
    ) -> Result<Self, E> {
        let mut types = Arena::new();
        let mut index = FxHashMap::default();
        for (_, ty) in self.types.iter() {
            let rewritten = rewrite(ty)?;
            debug_assert_eq!(rewritten.stable_id, ty.stable_id, "rewrites must keep identity");
            let id = rewritten.stable_id.clone();
            let idx = types.alloc(rewritten);
            index.insert(id, idx);
        }
        Ok(Self {
            types,
            index,
            namespaces: self.namespaces.clone(),
        })
    }

    /// New graph with extra types and aliases added
    ///
    /// # Errors
    ///
    /// Returns a [`GraphError`] if the additions break graph consistency, e.g. a
    /// synthesized type reuses an existing identity.
    pub fn extended(
        &self,
        types: Vec<TypeSymbol>,
        aliases: Vec<IntersectionAlias>,
    ) -> Result<Self, GraphError> {
        let mut builder = SymbolGraphBuilder::new();
        for ty in self.types() {
            builder.add_type(ty.clone());
        }
        for alias in self.aliases() {
            builder.add_alias(alias.clone());
        }
        for ty in types {
            builder.add_type(ty);
        }
        for alias in aliases {
            builder.add_alias(alias);
        }
        builder.build()
    }
}

/// Collects loader output and validates it into a [`SymbolGraph`]
#[derive(Debug, Default)]
pub struct SymbolGraphBuilder {
    types: Vec<TypeSymbol>,
    aliases: Vec<IntersectionAlias>,
}

impl SymbolGraphBuilder {
    /// Empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type
    pub fn add_type(&mut self, ty: TypeSymbol) -> &mut Self {
        self.types.push(ty);
        self
    }

    /// Add a type, builder style
    #[must_use]
    pub fn with_type(mut self, ty: TypeSymbol) -> Self {
        self.types.push(ty);
        self
    }

    /// Record an intersection alias
    pub fn add_alias(&mut self, alias: IntersectionAlias) -> &mut Self {
        self.aliases.push(alias);
        self
    }

    /// Validate and freeze the graph
    ///
    /// Types are sorted by identity, static members are moved to the static surface and
    /// static constructors are omitted.
    ///
    /// # Errors
    ///
    /// Returns the first [`GraphError`] found; the loader's output is expected to be
    /// internally consistent before any pass runs.
    pub fn build(self) -> Result<SymbolGraph, GraphError> {
        let Self {
            mut types,
            mut aliases,
        } = self;

        types.sort_by(|left, right| {
            (left.namespace(), &left.stable_id).cmp(&(right.namespace(), &right.stable_id))
        });

        let mut seen = FxHashSet::default();
        for ty in &types {
            if !seen.insert(ty.stable_id.clone()) {
                return Err(GraphError::DuplicateType {
                    id: ty.stable_id.clone(),
                });
            }
        }

        for ty in &mut types {
            validate_members(ty)?;
            normalize_members(ty);
            ty.nested_types.sort();
        }

        for ty in &types {
            if let Some(declaring) = &ty.declaring_type {
                if !seen.contains(declaring) {
                    return Err(GraphError::MissingDeclaringType {
                        nested: ty.stable_id.clone(),
                        declaring: declaring.clone(),
                    });
                }
            }
            if let Some(nested) = ty.nested_types.iter().find(|nested| !seen.contains(*nested)) {
                return Err(GraphError::MissingNestedType {
                    owner: ty.stable_id.clone(),
                    nested: nested.clone(),
                });
            }
        }

        if let Some(alias) = aliases.iter().find(|alias| !seen.contains(&alias.alias_for)) {
            return Err(GraphError::MissingAliasTarget {
                id: alias.alias_for.clone(),
            });
        }
        aliases.sort_by(|left, right| left.alias_for.cmp(&right.alias_for));

        let mut grouped: BTreeMap<String, NamespaceSymbol> = BTreeMap::new();
        let mut arena = Arena::new();
        let mut index = FxHashMap::default();
        for ty in types {
            let namespace = ty.namespace().to_string();
            grouped
                .entry(namespace.clone())
                .or_insert_with(|| NamespaceSymbol {
                    name: namespace,
                    types: Vec::new(),
                    aliases: Vec::new(),
                })
                .types
                .push(ty.stable_id.clone());
            let id = ty.stable_id.clone();
            let idx = arena.alloc(ty);
            index.insert(id, idx);
        }
        for alias in aliases {
            if let Some(namespace) = grouped.get_mut(alias.alias_for.namespace()) {
                namespace.aliases.push(alias);
            }
        }

        Ok(SymbolGraph {
            types: arena,
            index,
            namespaces: grouped.into_values().collect(),
        })
    }
}

fn validate_members(ty: &TypeSymbol) -> Result<(), GraphError> {
    let mut seen = FxHashSet::default();
    for (_, info) in ty.members.infos() {
        if info.stable_id.declaring_type_id() != ty.stable_id {
            return Err(GraphError::ForeignMember {
                owner: ty.stable_id.clone(),
                member: info.stable_id.clone(),
            });
        }
        if !seen.insert(&info.stable_id) {
            return Err(GraphError::DuplicateMember {
                owner: ty.stable_id.clone(),
                member: info.stable_id.clone(),
            });
        }
    }
    Ok(())
}

fn normalize_members(ty: &mut TypeSymbol) {
    let all_static = ty.flags.is_static;
    for (kind, info) in ty.members.infos_mut() {
        if all_static {
            info.is_static = true;
        }
        if !info.is_static {
            continue;
        }
        if kind == MemberKind::Constructor {
            info.emit_scope = EmitScope::Omitted;
        } else if info.emit_scope == EmitScope::ClassSurface {
            info.emit_scope = EmitScope::StaticSurface;
        }
    }
}
