//! Graph-wide naming
//!
//! Walks a fully analyzed graph, reserves a final name for every type, member, view
//! and import alias through the [`RenameEngine`](tb_rename::RenameEngine), then stamps
//! the committed names onto a new graph. Emitters read names back through
//! [`FinalNames`], which knows which surface each member lives on.

pub mod apply;
pub mod lookup;
pub mod reserve;
pub mod type_names;

pub use apply::apply_names;
pub use lookup::FinalNames;
pub use reserve::{CONSTRUCTOR_GROUP, CONSTRUCTOR_NAME, reserve_names};
pub use type_names::{VIEW_MARKER, member_base_name, type_base_name};

#[cfg(test)]
mod tests {
    use super::*;
    use tb_diagnostics::{DiagnosticCode, Diagnostics};
    use tb_ids::{MemberStableId, StableId, TypeStableId};
    use tb_rename::{RenameConfig, RenameEngine, RenameError, RenameScope};
    use tb_symbols::{
        Accessibility, ConstructorSymbol, EmitScope, MemberInfo, MethodSymbol, Parameter, PropertySymbol,
        SymbolGraph, TypeKind, TypeSymbol,
    };
    use tb_types::TypeReference;
    use tb_views::plan_views;

    fn void() -> TypeReference {
        TypeReference::named("core", "System", "Void")
    }

    fn method(ty: &str, name: &str, signature: &str, order: u32) -> MethodSymbol {
        MethodSymbol {
            info: MemberInfo::new(MemberStableId::new("app", ty, name, signature), order),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: void(),
            is_abstract: false,
            is_virtual: false,
        }
    }

    fn constructor(ty: &str, signature: &str, order: u32) -> ConstructorSymbol {
        ConstructorSymbol {
            info: MemberInfo::new(MemberStableId::new("app", ty, ".ctor", signature), order),
            parameters: Vec::new(),
        }
    }

    fn class(full_name: &str) -> TypeSymbol {
        TypeSymbol::new(TypeStableId::new("app", full_name), TypeKind::Class)
    }

    fn named(graph: &SymbolGraph) -> (SymbolGraph, RenameEngine, Diagnostics) {
        named_with(graph, RenameConfig::default())
    }

    fn named_with(graph: &SymbolGraph, config: RenameConfig) -> (SymbolGraph, RenameEngine, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let planned = plan_views(graph, &mut diagnostics);
        let mut engine = RenameEngine::new(config);
        reserve_names(&planned, &mut engine, &mut diagnostics).unwrap();
        let named = apply_names(&planned, &engine).unwrap();
        (named, engine, diagnostics)
    }

    /// `Store` with a class-surface `Dispose` and an explicit `IDisposable.Dispose`
    fn store() -> SymbolGraph {
        let mut store = class("App.Store");
        let mut explicit = method("App.Store", "System.IDisposable.Dispose", "()", 1);
        explicit.info.explicit_interface = Some(TypeReference::named("core", "System", "IDisposable"));
        store.members.methods = vec![method("App.Store", "Dispose", "()", 0), explicit];
        SymbolGraph::builder().with_type(store).build().unwrap()
    }

    #[test]
    fn test_generic_and_nested_type_names() {
        let mut outer = class("App.Outer");
        outer.nested_types = vec![TypeStableId::new("app", "App.Outer+Inner")];
        let mut inner = class("App.Outer+Inner");
        inner.declaring_type = Some(outer.stable_id.clone());
        let graph = SymbolGraph::builder()
            .with_type(class("App.List`1"))
            .with_type(outer)
            .with_type(inner)
            .build()
            .unwrap();

        let (named, _, _) = named(&graph);
        let name = |full_name: &str| {
            named
                .get(&TypeStableId::new("app", full_name))
                .and_then(|ty| ty.final_name.clone())
                .unwrap()
        };
        assert_eq!(name("App.List`1"), "List_1");
        assert_eq!(name("App.Outer"), "Outer");
        assert_eq!(name("App.Outer+Inner"), "Outer_Inner");
    }

    #[test]
    fn test_only_public_types_reach_the_facade() {
        let mut hidden = class("App.Hidden");
        hidden.accessibility = Accessibility::Internal;
        let graph = SymbolGraph::builder()
            .with_type(hidden)
            .with_type(class("App.Shown"))
            .build()
            .unwrap();

        let (_, engine, _) = named(&graph);
        let public = RenameScope::namespace_public("App");
        let internal = RenameScope::namespace_internal("App");
        let hidden = StableId::Type(TypeStableId::new("app", "App.Hidden"));
        let shown = StableId::Type(TypeStableId::new("app", "App.Shown"));

        assert!(engine.decision(&hidden, &internal).is_some());
        assert!(engine.decision(&hidden, &public).is_none());
        assert_eq!(engine.get_final(&shown, &public).unwrap(), "Shown");
    }

    #[test]
    fn test_view_member_marked_when_class_surface_taken() {
        let (named, engine, _) = named(&store());
        let ty = named.get(&TypeStableId::new("app", "App.Store")).unwrap();

        assert_eq!(ty.members.methods[0].info.final_name.as_deref(), Some("Dispose"));
        assert_eq!(ty.members.methods[1].info.emit_scope, EmitScope::ViewOnly);
        assert_eq!(ty.members.methods[1].info.final_name.as_deref(), Some("Dispose$view"));
        assert_eq!(ty.views[0].accessor_final_name.as_deref(), Some("As_IDisposable"));

        let names = FinalNames::new(&named, &engine);
        assert_eq!(
            names
                .view_accessor(&ty.stable_id, &TypeStableId::new("core", "System.IDisposable"))
                .unwrap(),
            "As_IDisposable"
        );
    }

    #[test]
    fn test_view_member_unmarked_when_override_frees_the_name() {
        let mut config = RenameConfig::default();
        config
            .overrides
            .insert("app:App.Store::Dispose()".to_string(), "Close".to_string());
        let (named, _, _) = named_with(&store(), config);
        let ty = named.get(&TypeStableId::new("app", "App.Store")).unwrap();

        assert_eq!(ty.members.methods[0].info.final_name.as_deref(), Some("Close"));
        assert_eq!(ty.members.methods[1].info.final_name.as_deref(), Some("Dispose"));
    }

    #[test]
    fn test_lookups_refuse_the_wrong_surface() {
        let (named, engine, _) = named(&store());
        let names = FinalNames::new(&named, &engine);
        let class_dispose = MemberStableId::new("app", "App.Store", "Dispose", "()");
        let explicit_dispose = MemberStableId::new("app", "App.Store", "System.IDisposable.Dispose", "()");

        assert_eq!(names.class_member(&class_dispose).unwrap(), "Dispose");
        assert_eq!(names.view_member(&explicit_dispose).unwrap(), "Dispose$view");

        match names.class_member(&explicit_dispose) {
            Err(RenameError::ScopeMismatch { requested, actual, .. }) => {
                assert_eq!(requested, "type:app:App.Store#instance");
                assert!(actual.starts_with("view:"));
            }
            other => panic!("expected ScopeMismatch, got {other:?}"),
        }
        assert!(matches!(
            names.view_member(&class_dispose),
            Err(RenameError::ScopeMismatch { .. })
        ));
    }

    #[test]
    fn test_constructors_and_overloads_share_names() {
        let mut list = class("App.Bag");
        list.members.constructors = vec![constructor("App.Bag", "()", 0), constructor("App.Bag", "(System.Int32)", 1)];
        list.members.methods = vec![
            method("App.Bag", "Add", "(System.Int32)", 2),
            method("App.Bag", "Add", "(System.String)", 3),
            method("App.Bag", "delete", "()", 4),
        ];
        let graph = SymbolGraph::builder().with_type(list).build().unwrap();

        let (named, _, diagnostics) = named(&graph);
        let ty = named.get(&TypeStableId::new("app", "App.Bag")).unwrap();
        let names: Vec<_> = ty
            .members
            .infos()
            .map(|(_, info)| info.final_name.clone().unwrap())
            .collect();

        assert_eq!(names, ["Add", "Add", "delete_", "constructor", "constructor"]);
        assert_eq!(diagnostics.with_code(DiagnosticCode::ReservedWord).count(), 1);
    }

    #[test]
    fn test_import_aliases_yield_to_local_names() {
        let mut panel = class("App.Ui.Panel");
        panel.members.properties.push(PropertySymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Ui.Panel", "Selected", ""), 0),
            property_type: TypeReference::named("app", "App.Model", "Item"),
            index_parameters: Vec::new(),
            has_getter: true,
            has_setter: false,
        });
        let graph = SymbolGraph::builder()
            .with_type(panel)
            .with_type(class("App.Ui.Item"))
            .with_type(class("App.Model.Item"))
            .build()
            .unwrap();

        let (named, engine, _) = named(&graph);
        let names = FinalNames::new(&named, &engine);
        let model_item = TypeStableId::new("app", "App.Model.Item");

        assert_eq!(names.type_name(&model_item).unwrap(), "Item");
        assert_eq!(names.import_name("App.Ui", &TypeStableId::new("app", "App.Ui.Item")).unwrap(), "Item");
        assert_eq!(names.import_name("App.Ui", &model_item).unwrap(), "Item2");
        assert!(matches!(
            names.import_name("App.Model", &model_item),
            Err(RenameError::NoDecision { .. })
        ));
    }

    #[test]
    fn test_omitted_members_stay_unnamed() {
        let mut ty = class("App.Ref");
        let mut by_ref = method("App.Ref", "Read", "(ref System.Int32)", 0);
        by_ref.parameters.push(Parameter::new(
            "value",
            TypeReference::named("core", "System", "Int32").by_ref(),
        ));
        by_ref.info.emit_scope = EmitScope::Omitted;
        ty.members.methods = vec![by_ref];
        let graph = SymbolGraph::builder().with_type(ty).build().unwrap();

        let (named, engine, _) = named(&graph);
        let ty = named.get(&TypeStableId::new("app", "App.Ref")).unwrap();
        assert_eq!(ty.members.methods[0].info.final_name, None);

        let names = FinalNames::new(&named, &engine);
        assert!(matches!(
            names.class_member(&ty.members.methods[0].info.stable_id),
            Err(RenameError::NoDecision { .. })
        ));
    }

    #[test]
    fn test_apply_without_reservation_fails() {
        let engine = RenameEngine::new(RenameConfig::default());
        let err = apply_names(&store(), &engine).unwrap_err();
        assert!(matches!(err, RenameError::NoDecision { .. }));
    }
}
