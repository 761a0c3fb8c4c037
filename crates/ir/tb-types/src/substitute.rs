//! Generic parameter substitution

use crate::{GenericOwner, GenericParamKey, GenericParameterRef, NamedType, TypeReference};
use rustc_hash::{FxHashMap, FxHashSet};

/// Mapping from generic parameter identity to a concrete reference
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    map: FxHashMap<GenericParamKey, TypeReference>,
}

impl Substitution {
    /// Empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the parameters of `owner`, by position, to `args`
    #[must_use]
    pub fn for_arguments(owner: &GenericOwner, args: &[TypeReference]) -> Self {
        let map = args
            .iter()
            .enumerate()
            .map(|(position, arg)| {
                (
                    GenericParamKey {
                        owner: owner.clone(),
                        position: position as u32,
                    },
                    arg.clone(),
                )
            })
            .collect();
        Self { map }
    }

    /// Add one mapping
    pub fn insert(&mut self, key: GenericParamKey, replacement: TypeReference) {
        self.map.insert(key, replacement);
    }

    /// Whether nothing is mapped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Rewrite every mapped parameter occurrence in `ty`, producing a new tree
    ///
    /// Unmapped parameters are kept, with their constraints rewritten. Replacements are
    /// inserted as-is and never substituted again. A parameter already being rewritten
    /// further up the same path is left untouched, so constraint cycles terminate.
    #[must_use]
    pub fn apply(&self, ty: &TypeReference) -> TypeReference {
        let mut visiting = FxHashSet::default();
        self.apply_guarded(ty, &mut visiting)
    }

    fn apply_guarded(&self, ty: &TypeReference, visiting: &mut FxHashSet<GenericParamKey>) -> TypeReference {
        if self.map.is_empty() {
            return ty.clone();
        }

        match ty {
            TypeReference::GenericParameter(param) => {
                let key = param.key();
                if let Some(replacement) = self.map.get(&key) {
                    return replacement.clone();
                }
                if !visiting.insert(key.clone()) {
                    return ty.clone();
                }
                let constraints = param
                    .constraints
                    .iter()
                    .map(|constraint| self.apply_guarded(constraint, visiting))
                    .collect();
                visiting.remove(&key);
                TypeReference::GenericParameter(GenericParameterRef {
                    constraints,
                    ..param.clone()
                })
            }
            TypeReference::Named(named) => TypeReference::Named(NamedType {
                type_args: named
                    .type_args
                    .iter()
                    .map(|arg| self.apply_guarded(arg, visiting))
                    .collect(),
                ..named.clone()
            }),
            TypeReference::Array { element, rank } => TypeReference::Array {
                element: Box::new(self.apply_guarded(element, visiting)),
                rank: *rank,
            },
            TypeReference::Pointer { pointee, depth } => TypeReference::Pointer {
                pointee: Box::new(self.apply_guarded(pointee, visiting)),
                depth: *depth,
            },
            TypeReference::ByRef { referenced } => TypeReference::ByRef {
                referenced: Box::new(self.apply_guarded(referenced, visiting)),
            },
            TypeReference::Nested {
                declaring,
                nested_name,
            } => TypeReference::Nested {
                declaring: Box::new(self.apply_guarded(declaring, visiting)),
                nested_name: nested_name.clone(),
            },
        }
    }
}

/// Moves generic parameters from one declaring context to another
///
/// Every occurrence of a parameter of a mapped owner is relabelled with the new owner,
/// including occurrences inside constraints, so nothing keeps pointing at the old
/// context. Positions and names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rehoming {
    owners: FxHashMap<GenericOwner, GenericOwner>,
}

impl Rehoming {
    /// Empty rehoming
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the parameters of `from` onto `to`
    pub fn insert(&mut self, from: GenericOwner, to: GenericOwner) {
        self.owners.insert(from, to);
    }

    /// Relabel every parameter of a mapped owner in `ty`, producing a new tree
    #[must_use]
    pub fn apply(&self, ty: &TypeReference) -> TypeReference {
        match ty {
            TypeReference::GenericParameter(param) => TypeReference::GenericParameter(GenericParameterRef {
                owner: self.owners.get(&param.owner).unwrap_or(&param.owner).clone(),
                position: param.position,
                name: param.name.clone(),
                constraints: param.constraints.iter().map(|constraint| self.apply(constraint)).collect(),
            }),
            TypeReference::Named(named) => TypeReference::Named(NamedType {
                type_args: named.type_args.iter().map(|arg| self.apply(arg)).collect(),
                ..named.clone()
            }),
            TypeReference::Array { element, rank } => TypeReference::Array {
                element: Box::new(self.apply(element)),
                rank: *rank,
            },
            TypeReference::Pointer { pointee, depth } => TypeReference::Pointer {
                pointee: Box::new(self.apply(pointee)),
                depth: *depth,
            },
            TypeReference::ByRef { referenced } => TypeReference::ByRef {
                referenced: Box::new(self.apply(referenced)),
            },
            TypeReference::Nested {
                declaring,
                nested_name,
            } => TypeReference::Nested {
                declaring: Box::new(self.apply(declaring)),
                nested_name: nested_name.clone(),
            },
        }
    }
}
