//! Naming scopes

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tb_ids::TypeStableId;

/// Which side of a type or view a scope covers
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Surface {
    /// Instance members
    #[display("instance")]
    Instance,
    /// Static members
    #[display("static")]
    Static,
}

impl Surface {
    /// Surface for a member's static flag
    #[must_use]
    pub fn of(is_static: bool) -> Self {
        if is_static { Self::Static } else { Self::Instance }
    }

    /// Whether this is the static surface
    #[must_use]
    pub fn is_static(self) -> bool {
        matches!(self, Self::Static)
    }
}

/// A unit of name uniqueness
///
/// Every scope owns an independent name table; two scopes never see each other's
/// names.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RenameScope {
    /// Type names in a namespace; the internal scope sees every type, the public
    /// facade only exported ones
    #[display("ns:{name}:{}", if *is_internal { "internal" } else { "public" })]
    Namespace {
        /// Namespace name, empty for the global namespace
        name: String,
        /// Internal declarations rather than the public facade
        is_internal: bool,
    },

    /// Members on one surface of a type
    #[display("type:{type_id}#{surface}")]
    Type {
        /// The type
        type_id: TypeStableId,
        /// Instance or static surface
        surface: Surface,
    },

    /// Members reachable through one interface of a type
    #[display("view:{type_id}:{interface_id}#{surface}")]
    View {
        /// The type
        type_id: TypeStableId,
        /// The interface viewed through
        interface_id: TypeStableId,
        /// Instance or static surface
        surface: Surface,
    },

    /// Import aliases a namespace uses for types from other namespaces
    #[display("import:{target_namespace}")]
    ImportAlias {
        /// Namespace the aliases are declared in
        target_namespace: String,
    },
}

impl RenameScope {
    /// Internal namespace scope
    pub fn namespace_internal(name: impl Into<String>) -> Self {
        Self::Namespace {
            name: name.into(),
            is_internal: true,
        }
    }

    /// Public facade namespace scope
    pub fn namespace_public(name: impl Into<String>) -> Self {
        Self::Namespace {
            name: name.into(),
            is_internal: false,
        }
    }

    /// Member scope of a type
    #[must_use]
    pub fn type_surface(type_id: &TypeStableId, is_static: bool) -> Self {
        Self::Type {
            type_id: type_id.clone(),
            surface: Surface::of(is_static),
        }
    }

    /// Member scope of a view
    #[must_use]
    pub fn view(type_id: &TypeStableId, interface_id: &TypeStableId, is_static: bool) -> Self {
        Self::View {
            type_id: type_id.clone(),
            interface_id: interface_id.clone(),
            surface: Surface::of(is_static),
        }
    }

    /// Import alias scope of a namespace
    pub fn import_alias(target_namespace: impl Into<String>) -> Self {
        Self::ImportAlias {
            target_namespace: target_namespace.into(),
        }
    }

    /// Canonical string key
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Whether the scope holds static members
    #[must_use]
    pub fn is_static(&self) -> bool {
        match self {
            Self::Type { surface, .. } | Self::View { surface, .. } => surface.is_static(),
            Self::Namespace { .. } | Self::ImportAlias { .. } => false,
        }
    }

    /// Whether this is a view scope
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(self, Self::View { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_keys() {
        let pair = TypeStableId::new("app", "App.Pair");
        let equatable = TypeStableId::new("core", "System.IEquatable`1");

        assert_eq!(RenameScope::namespace_internal("App").key(), "ns:App:internal");
        assert_eq!(RenameScope::namespace_public("App").key(), "ns:App:public");
        assert_eq!(RenameScope::type_surface(&pair, true).key(), "type:app:App.Pair#static");
        assert_eq!(
            RenameScope::view(&pair, &equatable, false).key(),
            "view:app:App.Pair:core:System.IEquatable`1#instance"
        );
        assert_eq!(RenameScope::import_alias("App").key(), "import:App");
    }

    #[test]
    fn test_surfaces_are_distinct_scopes() {
        let pair = TypeStableId::new("app", "App.Pair");
        assert_ne!(
            RenameScope::type_surface(&pair, true),
            RenameScope::type_surface(&pair, false)
        );
        assert!(RenameScope::type_surface(&pair, true).is_static());
    }
}
