//! Overload and return-type conflict resolution
//!
//! The target type system erases parameter modifiers and cannot overload on return
//! type. Members that collapse onto the same erased signature are bucketed here and
//! every bucket is left with at most one primary-surface member per conflict; the rest
//! move to their interface views or are omitted.

pub mod bucket;
pub mod resolve;

pub use bucket::{Candidate, ErasureKey, buckets};
pub use resolve::{ConflictKind, Resolution, resolve_bucket};

use rustc_hash::FxHashMap;
use tb_diagnostics::{DiagnosticCode, Diagnostics};
use tb_ids::{MemberStableId, TypeStableId};
use tb_symbols::{EmitScope, SymbolGraph, TypeSymbol};
use tracing::{debug, instrument};

/// Resolve overload and return-type conflicts across `graph`
///
/// Only emission scopes change. Each conflict appends one diagnostic naming the kept
/// member and the number of demoted ones.
#[must_use]
#[instrument(skip_all, fields(types = graph.len()))]
pub fn resolve_overloads(graph: &SymbolGraph, diagnostics: &mut Diagnostics) -> SymbolGraph {
    let mut demotions: FxHashMap<TypeStableId, FxHashMap<MemberStableId, EmitScope>> = FxHashMap::default();

    for ty in graph.types() {
        for (key, candidates) in buckets(ty) {
            for resolution in resolve_bucket(&key, &candidates) {
                report(&resolution, diagnostics);
                let scope = resolution.demoted_scope();
                let per_type = demotions.entry(ty.stable_id.clone()).or_default();
                for demoted in resolution.demoted {
                    per_type.insert(demoted, scope);
                }
            }
        }
    }

    debug!(types = demotions.len(), "applying overload demotions");
    graph.map_types(|ty| match demotions.get(&ty.stable_id) {
        Some(per_type) => apply(ty, per_type),
        None => ty.clone(),
    })
}

fn apply(ty: &TypeSymbol, demotions: &FxHashMap<MemberStableId, EmitScope>) -> TypeSymbol {
    let mut ty = ty.clone();
    for (_, info) in ty.members.infos_mut() {
        if let Some(&scope) = demotions.get(&info.stable_id) {
            info.emit_scope = scope;
        }
    }
    ty
}

fn report(resolution: &Resolution, diagnostics: &mut Diagnostics) {
    let count = resolution.demoted.len();
    match resolution.kind {
        ConflictKind::ReturnType => diagnostics.info(
            DiagnosticCode::ReturnConflict,
            &resolution.kept,
            format!(
                "{}: kept {} on the class surface, moved {count} member(s) differing by return type to views",
                resolution.key, resolution.kept.signature
            ),
        ),
        ConflictKind::ModifierOnly => diagnostics.info(
            DiagnosticCode::OverloadOmitted,
            &resolution.kept,
            format!(
                "{}: kept {}, omitted {count} overload(s) differing only by parameter modifiers",
                resolution.key, resolution.kept.signature
            ),
        ),
    }
}
