//! Explicit-implementation view planning
//!
//! Members reachable only through one interface cannot live on the class surface of
//! a structurally typed target. Each such group becomes a view: a separate naming
//! scope exposed on the instance surface through an `As_<Interface>` accessor.

pub mod plan;

pub use plan::{ACCESSOR_PREFIX, TypeViews, accessor_id, plan_type};

use rustc_hash::FxHashMap;
use tb_diagnostics::{DiagnosticCode, Diagnostics};
use tb_ids::TypeStableId;
use tb_symbols::{EmitScope, SymbolGraph, TypeSymbol};
use tracing::{debug, instrument};

/// Plan views for every type in `graph`
///
/// Returns a new graph where grouped members are `ViewOnly` and each type carries its
/// views. Orphaned `ViewOnly` members are reported and left unnamed.
#[must_use]
#[instrument(skip_all, fields(types = graph.len()))]
pub fn plan_views(graph: &SymbolGraph, diagnostics: &mut Diagnostics) -> SymbolGraph {
    let mut plans: FxHashMap<TypeStableId, TypeViews> = FxHashMap::default();

    for ty in graph.types() {
        let planned = plan_type(ty);
        for orphan in &planned.orphans {
            diagnostics.warning(
                DiagnosticCode::ViewOrphan,
                orphan,
                "member is view-only but implements no known interface; it will not be named",
            );
        }
        for view in &planned.views {
            debug!(ty = %ty.stable_id, interface = %view.interface_id, members = view.members.len(), "planned view");
            diagnostics.info(
                DiagnosticCode::ViewPlanned,
                &ty.stable_id,
                format!(
                    "{} member(s) reachable through {} via {}",
                    view.members.len(),
                    view.interface,
                    view.accessor_id.member_name
                ),
            );
        }
        if !planned.views.is_empty() {
            plans.insert(ty.stable_id.clone(), planned);
        }
    }

    graph.map_types(|ty| match plans.get(&ty.stable_id) {
        Some(planned) => apply(ty, planned),
        None => ty.clone(),
    })
}

fn apply(ty: &TypeSymbol, planned: &TypeViews) -> TypeSymbol {
    let mut ty = ty.clone();
    for (_, info) in ty.members.infos_mut() {
        if planned.moved.contains(&info.stable_id) {
            info.emit_scope = EmitScope::ViewOnly;
        }
    }
    ty.views.clone_from(&planned.views);
    ty
}
