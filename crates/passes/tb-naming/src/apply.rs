//! Stamping reserved names onto the graph

use rustc_hash::FxHashMap;
use tb_ids::{MemberStableId, StableId, TypeStableId};
use tb_rename::{RenameEngine, RenameError, RenameScope};
use tb_symbols::{EmitScope, MemberInfo, SymbolGraph, TypeSymbol};
use tracing::{debug, instrument};

/// New graph with every reserved final name stamped on its symbol
///
/// Types take their internal namespace name, primary-surface members their type
/// surface name and view members their view name. Omitted members and orphaned
/// view-only members stay unnamed.
///
/// # Errors
///
/// Returns [`RenameError::NoDecision`] for any symbol that should have been reserved
/// but was not; this means [`crate::reserve_names`] did not run on this graph.
#[instrument(skip_all, fields(types = graph.len()))]
pub fn apply_names(graph: &SymbolGraph, engine: &RenameEngine) -> Result<SymbolGraph, RenameError> {
    let named = graph.try_map_types(|ty| name_type(ty, engine))?;
    debug!(members = named.member_count(), "applied names");
    Ok(named)
}

fn name_type(ty: &TypeSymbol, engine: &RenameEngine) -> Result<TypeSymbol, RenameError> {
    let mut named = ty.clone();
    let type_id = StableId::Type(ty.stable_id.clone());
    named.final_name = Some(
        engine
            .get_final(&type_id, &RenameScope::namespace_internal(ty.namespace()))?
            .to_string(),
    );

    let view_of: FxHashMap<&MemberStableId, &TypeStableId> = ty
        .views
        .iter()
        .flat_map(|view| view.members.iter().map(move |member| (member, &view.interface_id)))
        .collect();

    for (_, info) in named.members.infos_mut() {
        let scope = member_scope(&ty.stable_id, info, &view_of);
        info.final_name = match scope {
            Some(scope) => Some(
                engine
                    .get_final(&StableId::Member(info.stable_id.clone()), &scope)?
                    .to_string(),
            ),
            None => None,
        };
    }

    let instance = RenameScope::type_surface(&ty.stable_id, false);
    for view in &mut named.views {
        view.accessor_final_name = Some(
            engine
                .get_final(&StableId::Member(view.accessor_id.clone()), &instance)?
                .to_string(),
        );
    }
    Ok(named)
}

/// Scope a member is named in, if it is named at all
fn member_scope(
    ty: &TypeStableId,
    info: &MemberInfo,
    view_of: &FxHashMap<&MemberStableId, &TypeStableId>,
) -> Option<RenameScope> {
    match info.emit_scope {
        EmitScope::ClassSurface | EmitScope::StaticSurface => Some(RenameScope::type_surface(ty, info.is_static)),
        EmitScope::ViewOnly => view_of
            .get(&info.stable_id)
            .map(|interface| RenameScope::view(ty, interface, info.is_static)),
        EmitScope::Omitted => None,
    }
}
