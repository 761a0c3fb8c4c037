//! Built-in consistency checks

use crate::{ConsistencyCheck, ValidationContext};
use rustc_hash::FxHashMap;
use tb_ids::StableId;
use tb_rename::{DecisionSource, RenameScope};
use tb_symbols::{EmitScope, MemberInfo, TypeSymbol};

/// Every type and emitted member carries the name the engine committed for it
pub struct NamesStamped;

impl ConsistencyCheck for NamesStamped {
    fn name(&self) -> &str {
        "names-stamped"
    }

    fn check(&self, ctx: &mut ValidationContext<'_>) {
        let graph = ctx.graph;
        for ty in graph.types() {
            let id = StableId::Type(ty.stable_id.clone());
            let scope = RenameScope::namespace_internal(ty.namespace());
            compare(ctx, self.name(), &id, &scope, ty.final_name.as_deref());

            for (_, info) in ty.members.infos() {
                check_member(ctx, self.name(), ty, info);
            }
        }
    }
}

fn check_member(ctx: &mut ValidationContext<'_>, check: &str, ty: &TypeSymbol, info: &MemberInfo) {
    let id = StableId::Member(info.stable_id.clone());
    match info.emit_scope {
        EmitScope::ClassSurface | EmitScope::StaticSurface => {
            let scope = RenameScope::type_surface(&ty.stable_id, info.is_static);
            compare(ctx, check, &id, &scope, info.final_name.as_deref());
        }
        EmitScope::ViewOnly => {
            let view = ty.views.iter().find(|view| view.members.contains(&info.stable_id));
            if let Some(view) = view {
                let scope = RenameScope::view(&ty.stable_id, &view.interface_id, info.is_static);
                compare(ctx, check, &id, &scope, info.final_name.as_deref());
            }
        }
        EmitScope::Omitted => {
            if let Some(name) = &info.final_name {
                ctx.report(check, &id, format!("omitted member carries the name `{name}`"));
            }
        }
    }
}

fn compare(ctx: &mut ValidationContext<'_>, check: &str, id: &StableId, scope: &RenameScope, stamped: Option<&str>) {
    let committed = ctx
        .engine
        .decision(id, scope)
        .map(|decision| decision.final_name.as_str());
    match (stamped, committed) {
        (None, _) => ctx.report(check, id, format!("no final name stamped for {scope}")),
        (Some(stamped), None) => {
            ctx.report(check, id, format!("`{stamped}` was never reserved in {scope}"));
        }
        (Some(stamped), Some(committed)) if stamped != committed => ctx.report(
            check,
            id,
            format!("stamped `{stamped}` but {scope} committed `{committed}`"),
        ),
        (Some(_), Some(_)) => {}
    }
}

/// No two symbols share a final name in one scope unless they are overloads of one group
pub struct ScopeUniqueness;

impl ConsistencyCheck for ScopeUniqueness {
    fn name(&self) -> &str {
        "scope-uniqueness"
    }

    fn check(&self, ctx: &mut ValidationContext<'_>) {
        let engine = ctx.engine;
        let mut scopes: Vec<&RenameScope> = engine.scopes().collect();
        scopes.sort();

        for scope in scopes {
            let mut holders: FxHashMap<&str, (&StableId, Option<&str>)> = FxHashMap::default();
            for decision in engine.decisions_in(scope) {
                let group = decision.overload_group.as_deref();
                let Some(&(holder, holder_group)) = holders.get(decision.final_name.as_str()) else {
                    holders.insert(&decision.final_name, (&decision.id, group));
                    continue;
                };
                if group.is_none() || group != holder_group {
                    ctx.report(
                        self.name(),
                        &decision.id,
                        format!("`{}` in {scope} is already held by {holder}", decision.final_name),
                    );
                }
            }
        }
    }
}

/// No automatically derived name is a reserved word
pub struct ReservedWordSafety;

impl ConsistencyCheck for ReservedWordSafety {
    fn name(&self) -> &str {
        "reserved-words"
    }

    fn check(&self, ctx: &mut ValidationContext<'_>) {
        let engine = ctx.engine;
        for decision in engine.decisions() {
            if decision.source == DecisionSource::Verbatim {
                continue;
            }
            if engine.reserved_words().contains(&decision.final_name) {
                ctx.report(
                    self.name(),
                    &decision.id,
                    format!("`{}` in {} is a reserved word", decision.final_name, decision.scope),
                );
            }
        }
    }
}

/// Views only hold view-only members, and those members stay off the class surface
pub struct ViewConsistency;

impl ConsistencyCheck for ViewConsistency {
    fn name(&self) -> &str {
        "view-consistency"
    }

    fn check(&self, ctx: &mut ValidationContext<'_>) {
        let graph = ctx.graph;
        let engine = ctx.engine;
        for ty in graph.types() {
            for view in &ty.views {
                if view.accessor_final_name.is_none() {
                    ctx.report(self.name(), &view.accessor_id, "view accessor has no final name");
                }
                for member in &view.members {
                    match ty.members.find(member) {
                        None => ctx.report(self.name(), member, format!("view {} lists an unknown member", view.interface)),
                        Some((_, info)) if info.emit_scope != EmitScope::ViewOnly => ctx.report(
                            self.name(),
                            member,
                            format!("member in view {} is emitted on {}", view.interface, info.emit_scope),
                        ),
                        Some(_) => {}
                    }
                }
            }

            for (_, info) in ty.members.infos() {
                if info.emit_scope != EmitScope::ViewOnly {
                    continue;
                }
                let id = StableId::Member(info.stable_id.clone());
                let class_scope = RenameScope::type_surface(&ty.stable_id, info.is_static);
                if engine.decision(&id, &class_scope).is_some() {
                    ctx.report(self.name(), &id, format!("view-only member is named in {class_scope}"));
                }
            }
        }
    }
}
