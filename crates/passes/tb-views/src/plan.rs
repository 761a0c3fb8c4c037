//! Grouping one type's members into views

use std::collections::BTreeMap;
use tb_ids::{MemberStableId, TypeStableId};
use tb_symbols::{EmitScope, ExplicitView, MemberInfo, TypeSymbol};
use tb_types::{NamedType, TypeReference};

/// Prefix of view accessor names
pub const ACCESSOR_PREFIX: &str = "As_";

/// Views planned for one type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeViews {
    /// Views sorted by interface identity
    pub views: Vec<ExplicitView>,
    /// Members moved to a view, which must become `ViewOnly`
    pub moved: Vec<MemberStableId>,
    /// `ViewOnly` members with no interface to be viewed through
    pub orphans: Vec<MemberStableId>,
}

/// Synthetic identity of the accessor exposing `interface_id` on `ty`
#[must_use]
pub fn accessor_id(ty: &TypeStableId, interface: &TypeReference, interface_id: &TypeStableId) -> MemberStableId {
    MemberStableId::new(
        ty.module.clone(),
        ty.full_name.clone(),
        format!("{ACCESSOR_PREFIX}{}", interface.short_name()),
        format!("view:{interface_id}"),
    )
}

/// Plan the views of one type
///
/// Explicit implementations and `ViewOnly` members that know their interface are
/// grouped per interface. Omitted members never take part.
#[must_use]
pub fn plan_type(ty: &TypeSymbol) -> TypeViews {
    let mut grouped: BTreeMap<TypeStableId, (TypeReference, Vec<MemberStableId>)> = BTreeMap::new();
    let mut planned = TypeViews::default();

    for (_, info) in ty.members.infos() {
        if info.emit_scope == EmitScope::Omitted {
            continue;
        }
        if !info.is_explicit_implementation() && info.emit_scope != EmitScope::ViewOnly {
            continue;
        }
        let Some(interface_id) = info.view_interface() else {
            planned.orphans.push(info.stable_id.clone());
            continue;
        };
        let reference = interface_reference(ty, info, &interface_id);
        grouped
            .entry(interface_id)
            .or_insert_with(|| (reference, Vec::new()))
            .1
            .push(info.stable_id.clone());
        if info.emit_scope != EmitScope::ViewOnly {
            planned.moved.push(info.stable_id.clone());
        }
    }

    planned.views = grouped
        .into_iter()
        .map(|(interface_id, (interface, mut members))| {
            members.sort();
            ExplicitView {
                accessor_id: accessor_id(&ty.stable_id, &interface, &interface_id),
                interface,
                interface_id,
                members,
                accessor_final_name: None,
            }
        })
        .collect();
    planned.orphans.sort();
    planned
}

/// Best reference to the interface a member is viewed through
fn interface_reference(ty: &TypeSymbol, info: &MemberInfo, interface_id: &TypeStableId) -> TypeReference {
    if let Some(explicit) = &info.explicit_interface {
        return explicit.clone();
    }
    ty.interfaces
        .iter()
        .find(|reference| reference.stable_id().as_ref() == Some(interface_id))
        .cloned()
        .unwrap_or_else(|| open_reference(interface_id))
}

/// Open reference built from an identity alone
fn open_reference(id: &TypeStableId) -> TypeReference {
    let simple = id.simple_name();
    let (name, arity) = simple
        .rsplit_once('`')
        .and_then(|(name, arity)| arity.parse::<u32>().ok().map(|arity| (name, arity)))
        .unwrap_or((simple, 0));
    TypeReference::Named(NamedType {
        module: id.module.clone(),
        namespace: id.namespace().to_string(),
        name: name.to_string(),
        arity,
        type_args: Vec::new(),
        is_value_type: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_symbols::{MethodSymbol, Provenance, TypeKind};

    fn method(name: &str, order: u32) -> MethodSymbol {
        MethodSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Store", name, "()"), order),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: TypeReference::named("core", "System", "Void"),
            is_abstract: false,
            is_virtual: false,
        }
    }

    fn store() -> TypeSymbol {
        TypeSymbol::new(TypeStableId::new("app", "App.Store"), TypeKind::Class)
    }

    #[test]
    fn test_explicit_members_grouped_per_interface() {
        let disposable = TypeReference::named("core", "System", "IDisposable");
        let mut ty = store();
        let mut dispose = method("Dispose", 1);
        dispose.info.explicit_interface = Some(disposable.clone());
        let mut close = method("Close", 0);
        close.info.explicit_interface = Some(disposable.clone());
        ty.members.methods = vec![dispose, close, method("Open", 2)];

        let planned = plan_type(&ty);
        assert_eq!(planned.views.len(), 1);
        let view = &planned.views[0];
        assert_eq!(view.interface, disposable);
        assert_eq!(view.accessor_id.member_name, "As_IDisposable");
        let members: Vec<_> = view.members.iter().map(|id| id.member_name.as_str()).collect();
        assert_eq!(members, ["Close", "Dispose"]);
        assert_eq!(planned.moved.len(), 2);
        assert!(planned.orphans.is_empty());
    }

    #[test]
    fn test_demoted_member_uses_source_interface() {
        let mut ty = store();
        ty.interfaces = vec![TypeReference::generic(
            "core",
            "System",
            "IEquatable",
            vec![TypeReference::named("app", "App", "Store")],
        )];
        let mut equals = method("Equals", 0);
        equals.info.emit_scope = EmitScope::ViewOnly;
        equals.info.provenance = Provenance::FromInterface;
        equals.info.source_interface = Some(TypeStableId::new("core", "System.IEquatable`1"));
        ty.members.methods = vec![equals];

        let planned = plan_type(&ty);
        assert_eq!(planned.views.len(), 1);
        assert_eq!(planned.views[0].interface.to_string(), "System.IEquatable<App.Store>");
        assert!(planned.moved.is_empty());
    }

    #[test]
    fn test_orphan_reported() {
        let mut ty = store();
        let mut lost = method("Lost", 0);
        lost.info.emit_scope = EmitScope::ViewOnly;
        ty.members.methods = vec![lost];

        let planned = plan_type(&ty);
        assert!(planned.views.is_empty());
        assert_eq!(planned.orphans.len(), 1);
    }

    #[test]
    fn test_open_reference_from_identity() {
        let reference = open_reference(&TypeStableId::new("core", "System.IComparable`1"));
        assert_eq!(reference.stable_id(), Some(TypeStableId::new("core", "System.IComparable`1")));
        assert_eq!(reference.short_name(), "IComparable");
    }
}
