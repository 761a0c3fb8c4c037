//! Type symbols

use crate::member::MemberCollection;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tb_ids::{MemberStableId, TypeStableId};
use tb_types::{GenericOwner, GenericParameterRef, TypeReference};

/// Kind of type, decided once when the graph is built
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Value type
    Struct,
    /// Interface contract
    Interface,
    /// Enumeration
    Enum,
    /// Delegate
    Delegate,
    /// Static class used as a namespace of functions
    StaticNamespace,
}

/// Declared accessibility
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessibility {
    /// Visible everywhere
    #[default]
    Public,
    /// Visible inside the origin module
    Internal,
    /// Visible to derived types
    Protected,
    /// Visible to derived types or inside the origin module
    ProtectedInternal,
    /// Visible to derived types inside the origin module
    PrivateProtected,
    /// Visible to the declaring type only
    Private,
}

impl Accessibility {
    /// Whether the symbol is exported from its module
    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Type flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools, reason = "mirrors the metadata flag set")]
pub struct TypeFlags {
    /// Abstract type
    pub is_abstract: bool,
    /// Sealed type
    pub is_sealed: bool,
    /// Static type
    pub is_static: bool,
    /// Value type
    pub is_value_type: bool,
}

/// Generic parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParameterDef {
    /// Source name
    pub name: String,
    /// Zero-based position
    pub position: u32,
    /// Constraints
    #[serde(default)]
    pub constraints: Vec<TypeReference>,
}

impl GenericParameterDef {
    /// Unconstrained parameter
    pub fn new(name: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            position,
            constraints: Vec::new(),
        }
    }

    /// Occurrence of this parameter declared by `owner`
    #[must_use]
    pub fn reference(&self, owner: GenericOwner) -> TypeReference {
        TypeReference::GenericParameter(GenericParameterRef {
            owner,
            position: self.position,
            name: self.name.clone(),
            constraints: self.constraints.clone(),
        })
    }
}

/// How a type came to be in the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeOrigin {
    /// Produced by the loader
    #[default]
    Loaded,
    /// Created by an analysis pass on behalf of another type
    Synthesized {
        /// The type it was synthesized for
        from: TypeStableId,
    },
}

/// Members of a type reachable only through one interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplicitView {
    /// Interface as referenced by the type
    pub interface: TypeReference,
    /// Identity of the interface definition
    pub interface_id: TypeStableId,
    /// Synthetic identity of the accessor exposing the view on the instance surface
    pub accessor_id: MemberStableId,
    /// Members grouped into the view, sorted by identity
    pub members: Vec<MemberStableId>,
    /// Final name of the accessor, stamped by name application
    #[serde(default)]
    pub accessor_final_name: Option<String>,
}

/// Intersection alias standing in for a type whose interfaces cannot be linearized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionAlias {
    /// Type the alias is named after
    pub alias_for: TypeStableId,
    /// Synthesized `_Base` interface carrying the type's own members
    pub base_interface: TypeStableId,
    /// Interfaces intersected by the alias
    pub members: Vec<TypeReference>,
}

/// A type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Stable identity
    pub stable_id: TypeStableId,
    /// Kind
    pub kind: TypeKind,
    /// Declared accessibility
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Generic parameters
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameterDef>,
    /// Base type
    #[serde(default)]
    pub base_type: Option<TypeReference>,
    /// Directly implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<TypeReference>,
    /// Members
    #[serde(default)]
    pub members: MemberCollection,
    /// Nested types
    #[serde(default)]
    pub nested_types: Vec<TypeStableId>,
    /// Declaring type, for nested types
    #[serde(default)]
    pub declaring_type: Option<TypeStableId>,
    /// Flags
    #[serde(default)]
    pub flags: TypeFlags,
    /// Origin
    #[serde(default)]
    pub origin: TypeOrigin,
    /// Planned explicit-implementation views
    #[serde(default)]
    pub views: Vec<ExplicitView>,
    /// Synthesized `_Base` interface, when the interface set is a diamond
    #[serde(default)]
    pub diamond_base: Option<TypeStableId>,
    /// Final target identifier, stamped by name application
    #[serde(default)]
    pub final_name: Option<String>,
}

impl TypeSymbol {
    /// Empty public type of the given kind
    #[must_use]
    pub fn new(stable_id: TypeStableId, kind: TypeKind) -> Self {
        Self {
            stable_id,
            kind,
            accessibility: Accessibility::Public,
            generic_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            members: MemberCollection::default(),
            nested_types: Vec::new(),
            declaring_type: None,
            flags: TypeFlags {
                is_value_type: matches!(kind, TypeKind::Struct | TypeKind::Enum),
                is_static: matches!(kind, TypeKind::StaticNamespace),
                ..TypeFlags::default()
            },
            origin: TypeOrigin::Loaded,
            views: Vec::new(),
            diamond_base: None,
            final_name: None,
        }
    }

    /// Namespace the type lives in
    #[must_use]
    pub fn namespace(&self) -> &str {
        self.stable_id.namespace()
    }

    /// Source name of the type itself; for nested types the innermost segment
    #[must_use]
    pub fn source_name(&self) -> &str {
        let simple = self.stable_id.simple_name();
        simple.rsplit_once('+').map_or(simple, |(_, inner)| inner)
    }

    /// Generic arity
    #[must_use]
    pub fn arity(&self) -> u32 {
        self.generic_parameters.len() as u32
    }

    /// Whether this type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// Owner key for the type's generic parameters
    #[must_use]
    pub fn generic_owner(&self) -> GenericOwner {
        GenericOwner::Type(self.stable_id.clone())
    }

    /// Whether the type was synthesized by an analysis pass
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        matches!(self.origin, TypeOrigin::Synthesized { .. })
    }
}

/// A namespace and the types it groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSymbol {
    /// Namespace name, empty for the global namespace
    pub name: String,
    /// Types in the namespace, sorted by identity
    pub types: Vec<TypeStableId>,
    /// Intersection aliases recorded by interface analysis, sorted by aliased type
    pub aliases: Vec<IntersectionAlias>,
}
