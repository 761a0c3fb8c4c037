//! Final-name lookups for emitters

use tb_ids::{MemberStableId, StableId, TypeStableId};
use tb_rename::{RenameEngine, RenameError, RenameScope};
use tb_symbols::{EmitScope, ExplicitView, MemberInfo, SymbolGraph, TypeSymbol};

/// Read-only view of the names decided for a graph
///
/// Lookups check the member's emit scope before asking the engine, so an emitter
/// printing the class surface can never pick up a name that lives in a view.
#[derive(Debug, Clone, Copy)]
pub struct FinalNames<'run> {
    graph: &'run SymbolGraph,
    engine: &'run RenameEngine,
}

impl<'run> FinalNames<'run> {
    /// Lookups over `graph` as named by `engine`
    #[must_use]
    pub fn new(graph: &'run SymbolGraph, engine: &'run RenameEngine) -> Self {
        Self { graph, engine }
    }

    /// Final name of a type in its own namespace
    ///
    /// # Errors
    ///
    /// Returns [`RenameError::NoDecision`] if the type was never named.
    pub fn type_name(&self, id: &TypeStableId) -> Result<&'run str, RenameError> {
        self.engine.get_final(
            &StableId::Type(id.clone()),
            &RenameScope::namespace_internal(id.namespace()),
        )
    }

    /// Name under which `id` is imported into `namespace`
    ///
    /// # Errors
    ///
    /// Returns [`RenameError::NoDecision`] if `namespace` never references `id`.
    pub fn import_name(&self, namespace: &str, id: &TypeStableId) -> Result<&'run str, RenameError> {
        self.engine
            .get_final(&StableId::Type(id.clone()), &RenameScope::import_alias(namespace))
    }

    /// Final name of a member on its type's instance or static surface
    ///
    /// # Errors
    ///
    /// - [`RenameError::ScopeMismatch`] if the member only exists inside a view
    /// - [`RenameError::NoDecision`] if the member is unknown or omitted
    pub fn class_member(&self, id: &MemberStableId) -> Result<&'run str, RenameError> {
        let (ty, info) = self.member(id)?;
        let requested = RenameScope::type_surface(&ty.stable_id, info.is_static);
        if info.emit_scope == EmitScope::ViewOnly {
            return Err(RenameError::ScopeMismatch {
                id: id.to_string(),
                requested: requested.key(),
                actual: containing_view(ty, id).map_or_else(
                    || "no view".to_string(),
                    |view| RenameScope::view(&ty.stable_id, &view.interface_id, info.is_static).key(),
                ),
            });
        }
        self.engine.get_final(&StableId::Member(id.clone()), &requested)
    }

    /// Final name of a member inside the view that holds it
    ///
    /// # Errors
    ///
    /// - [`RenameError::ScopeMismatch`] if the member is not view-only
    /// - [`RenameError::NoDecision`] if the member is unknown or belongs to no view
    pub fn view_member(&self, id: &MemberStableId) -> Result<&'run str, RenameError> {
        let (ty, info) = self.member(id)?;
        if info.emit_scope != EmitScope::ViewOnly {
            return Err(RenameError::ScopeMismatch {
                id: id.to_string(),
                requested: "view".to_string(),
                actual: RenameScope::type_surface(&ty.stable_id, info.is_static).key(),
            });
        }
        let Some(view) = containing_view(ty, id) else {
            return Err(self.no_decision(&StableId::Member(id.clone()), "view".to_string()));
        };
        self.engine.get_final(
            &StableId::Member(id.clone()),
            &RenameScope::view(&ty.stable_id, &view.interface_id, info.is_static),
        )
    }

    /// Final name of the accessor exposing `interface` on `ty`
    ///
    /// # Errors
    ///
    /// Returns [`RenameError::NoDecision`] if `ty` has no view for `interface`.
    pub fn view_accessor(&self, ty: &TypeStableId, interface: &TypeStableId) -> Result<&'run str, RenameError> {
        let instance = RenameScope::type_surface(ty, false);
        let view = self
            .graph
            .get(ty)
            .and_then(|symbol| symbol.views.iter().find(|view| &view.interface_id == interface));
        match view {
            Some(view) => self
                .engine
                .get_final(&StableId::Member(view.accessor_id.clone()), &instance),
            None => Err(self.no_decision(&StableId::Type(ty.clone()), format!("{} accessor", instance.key()))),
        }
    }

    fn member(&self, id: &MemberStableId) -> Result<(&'run TypeSymbol, &'run MemberInfo), RenameError> {
        self.graph
            .get(&id.declaring_type_id())
            .and_then(|ty| ty.members.find(id).map(|(_, info)| (ty, info)))
            .ok_or_else(|| self.no_decision(&StableId::Member(id.clone()), "graph".to_string()))
    }

    fn no_decision(&self, id: &StableId, scope: String) -> RenameError {
        RenameError::NoDecision {
            id: id.to_string(),
            scope,
            available: self.engine.scopes_of(id).iter().map(RenameScope::key).collect(),
        }
    }
}

fn containing_view<'ty>(ty: &'ty TypeSymbol, id: &MemberStableId) -> Option<&'ty ExplicitView> {
    ty.views.iter().find(|view| view.members.contains(id))
}
