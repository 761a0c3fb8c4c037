//! Type reference model
//!
//! A [`TypeReference`] is a complete description of one occurrence of a type: enough to
//! print it in the target type system without going back to the source metadata.
//! References are plain owned trees; every transformation builds a new tree.

pub mod substitute;

pub use substitute::{Rehoming, Substitution};

use serde::{Deserialize, Serialize};
use std::fmt;
use tb_ids::{MemberStableId, TypeStableId};

/// A named (possibly closed generic) type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    /// Origin module of the referenced type
    pub module: String,
    /// Namespace of the referenced type
    pub namespace: String,
    /// Simple name without the arity marker
    pub name: String,
    /// Generic arity of the definition
    pub arity: u32,
    /// Generic arguments, empty for open or non-generic references
    #[serde(default)]
    pub type_args: Vec<TypeReference>,
    /// Whether the referenced type is a value type
    #[serde(default)]
    pub is_value_type: bool,
}

impl NamedType {
    /// Source name including the arity marker, e.g. ``List`1``
    #[must_use]
    pub fn source_name(&self) -> String {
        if self.arity == 0 {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.arity)
        }
    }

    /// Fully-qualified source name including the arity marker
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.source_name()
        } else {
            format!("{}.{}", self.namespace, self.source_name())
        }
    }

    /// Identity of the referenced definition
    #[must_use]
    pub fn stable_id(&self) -> TypeStableId {
        TypeStableId::new(self.module.clone(), self.full_name())
    }
}

/// Who declares a generic parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GenericOwner {
    /// A generic type
    Type(TypeStableId),
    /// A generic method
    Method(MemberStableId),
}

/// Identity of a generic parameter: its declaring context and position
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenericParamKey {
    /// Declaring context
    pub owner: GenericOwner,
    /// Zero-based position in the owner's parameter list
    pub position: u32,
}

/// Occurrence of a generic parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenericParameterRef {
    /// Declaring context
    pub owner: GenericOwner,
    /// Zero-based position
    pub position: u32,
    /// Source name, e.g. `T`
    pub name: String,
    /// Constraints; may mention other parameters of the same owner
    #[serde(default)]
    pub constraints: Vec<TypeReference>,
}

impl GenericParameterRef {
    /// Identity of this parameter
    #[must_use]
    pub fn key(&self) -> GenericParamKey {
        GenericParamKey {
            owner: self.owner.clone(),
            position: self.position,
        }
    }
}

/// Any occurrence of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeReference {
    /// Named type, open or closed
    Named(NamedType),
    /// Generic parameter
    GenericParameter(GenericParameterRef),
    /// Array of the given rank
    Array {
        /// Element type
        element: Box<TypeReference>,
        /// Number of dimensions
        rank: u32,
    },
    /// Unmanaged pointer
    Pointer {
        /// Pointee type
        pointee: Box<TypeReference>,
        /// Indirection depth
        depth: u32,
    },
    /// By-reference occurrence (`ref`/`out`/`in` parameters)
    ByRef {
        /// Referenced type
        referenced: Box<TypeReference>,
    },
    /// Nested type reached through its declaring type
    Nested {
        /// Declaring type
        declaring: Box<TypeReference>,
        /// Source name of the nested type
        nested_name: String,
    },
}

impl TypeReference {
    /// Non-generic named reference
    pub fn named(module: impl Into<String>, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(NamedType {
            module: module.into(),
            namespace: namespace.into(),
            name: name.into(),
            arity: 0,
            type_args: Vec::new(),
            is_value_type: false,
        })
    }

    /// Closed generic named reference; the arity is the argument count
    pub fn generic(
        module: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
        type_args: Vec<Self>,
    ) -> Self {
        Self::Named(NamedType {
            module: module.into(),
            namespace: namespace.into(),
            name: name.into(),
            arity: type_args.len() as u32,
            type_args,
            is_value_type: false,
        })
    }

    /// Generic parameter occurrence without constraints
    pub fn parameter(owner: GenericOwner, position: u32, name: impl Into<String>) -> Self {
        Self::GenericParameter(GenericParameterRef {
            owner,
            position,
            name: name.into(),
            constraints: Vec::new(),
        })
    }

    /// Single-dimension array of this type
    #[must_use]
    pub fn array_of(self) -> Self {
        Self::Array {
            element: Box::new(self),
            rank: 1,
        }
    }

    /// By-reference occurrence of this type
    #[must_use]
    pub fn by_ref(self) -> Self {
        Self::ByRef {
            referenced: Box::new(self),
        }
    }

    /// Mark a named reference as a value type
    #[must_use]
    pub fn value_type(mut self) -> Self {
        if let Self::Named(named) = &mut self {
            named.is_value_type = true;
        }
        self
    }

    /// Strip by-ref wrappers
    #[must_use]
    pub fn erase_by_ref(&self) -> &Self {
        let mut current = self;
        while let Self::ByRef { referenced } = current {
            current = referenced;
        }
        current
    }

    /// Whether this occurrence is by-reference
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        matches!(self, Self::ByRef { .. })
    }

    /// Identity of the referenced definition, for named and nested references
    #[must_use]
    pub fn stable_id(&self) -> Option<TypeStableId> {
        match self {
            Self::Named(named) => Some(named.stable_id()),
            Self::Nested {
                declaring,
                nested_name,
            } => declaring.stable_id().map(|outer| {
                TypeStableId::new(outer.module, format!("{}+{nested_name}", outer.full_name))
            }),
            Self::GenericParameter(_)
            | Self::Array { .. }
            | Self::Pointer { .. }
            | Self::ByRef { .. } => None,
        }
    }

    /// Short name used to qualify interface members, without namespace or arity marker
    #[must_use]
    pub fn short_name(&self) -> String {
        match self {
            Self::Named(named) => named.name.clone(),
            Self::Nested { nested_name, .. } => nested_name
                .split_once('`')
                .map_or(nested_name.as_str(), |(name, _)| name)
                .to_string(),
            Self::GenericParameter(param) => param.name.clone(),
            Self::Array { element, .. } | Self::Pointer { pointee: element, .. } => element.short_name(),
            Self::ByRef { referenced } => referenced.short_name(),
        }
    }

    /// Every named definition mentioned by this reference, outermost first
    ///
    /// Constraints of generic parameters are not visited; they belong to the declaration,
    /// not to the occurrence.
    #[must_use]
    pub fn referenced_types(&self) -> Vec<TypeStableId> {
        let mut found = Vec::new();
        self.collect_referenced(&mut found);
        found
    }

    fn collect_referenced(&self, found: &mut Vec<TypeStableId>) {
        match self {
            Self::Named(named) => {
                found.push(named.stable_id());
                for arg in &named.type_args {
                    arg.collect_referenced(found);
                }
            }
            Self::Nested { declaring, .. } => {
                if let Some(id) = self.stable_id() {
                    found.push(id);
                }
                declaring.collect_referenced(found);
            }
            Self::Array { element, .. } | Self::Pointer { pointee: element, .. } => {
                element.collect_referenced(found);
            }
            Self::ByRef { referenced } => referenced.collect_referenced(found),
            Self::GenericParameter(_) => {}
        }
    }
}

/// Canonical form used inside signatures and for return-type comparison
impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => {
                if named.type_args.is_empty() {
                    write!(f, "{}", named.full_name())
                } else {
                    let prefix = if named.namespace.is_empty() {
                        named.name.clone()
                    } else {
                        format!("{}.{}", named.namespace, named.name)
                    };
                    write!(f, "{prefix}<")?;
                    for (idx, arg) in named.type_args.iter().enumerate() {
                        if idx > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ">")
                }
            }
            Self::GenericParameter(param) => match param.owner {
                GenericOwner::Type(_) => write!(f, "!{}", param.position),
                GenericOwner::Method(_) => write!(f, "!!{}", param.position),
            },
            Self::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                write!(f, "{element}[{commas}]")
            }
            Self::Pointer { pointee, depth } => {
                write!(f, "{pointee}{}", "*".repeat((*depth).max(1) as usize))
            }
            Self::ByRef { referenced } => write!(f, "{referenced}&"),
            Self::Nested {
                declaring,
                nested_name,
            } => write!(f, "{declaring}+{nested_name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int32() -> TypeReference {
        TypeReference::named("core", "System", "Int32").value_type()
    }

    #[test]
    fn test_named_identity_includes_arity() {
        let list = TypeReference::generic("core", "System.Collections.Generic", "List", vec![int32()]);
        assert_eq!(
            list.stable_id(),
            Some(TypeStableId::new("core", "System.Collections.Generic.List`1"))
        );
        assert_eq!(list.to_string(), "System.Collections.Generic.List<System.Int32>");
    }

    #[test]
    fn test_nested_identity() {
        let outer = TypeReference::named("core", "System", "Environment");
        let nested = TypeReference::Nested {
            declaring: Box::new(outer),
            nested_name: "SpecialFolder".to_string(),
        };
        assert_eq!(
            nested.stable_id(),
            Some(TypeStableId::new("core", "System.Environment+SpecialFolder"))
        );
        assert_eq!(nested.short_name(), "SpecialFolder");
    }

    #[test]
    fn test_erase_by_ref() {
        let by_ref = int32().by_ref();
        assert!(by_ref.is_by_ref());
        assert_eq!(by_ref.erase_by_ref(), &int32());
        assert_eq!(by_ref.to_string(), "System.Int32&");
    }

    #[test]
    fn test_parameter_display_is_positional() {
        let owner = GenericOwner::Method(MemberStableId::new("core", "System.Linq.Enumerable", "First", "(!!0)"));
        let param = TypeReference::parameter(owner, 0, "TSource");
        assert_eq!(param.to_string(), "!!0");
        assert_eq!(param.clone().array_of().to_string(), "!!0[]");
    }

    #[test]
    fn test_referenced_types_walks_arguments() {
        let dict = TypeReference::generic(
            "core",
            "System.Collections.Generic",
            "Dictionary",
            vec![TypeReference::named("core", "System", "String"), int32().array_of()],
        );
        let found: Vec<String> = dict.referenced_types().iter().map(|id| id.full_name.clone()).collect();
        assert_eq!(
            found,
            [
                "System.Collections.Generic.Dictionary`2",
                "System.String",
                "System.Int32"
            ]
        );
    }
}
