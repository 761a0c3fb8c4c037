//! Graph-wide name reservation

use crate::type_names::{VIEW_MARKER, member_base_name, type_base_name};
use std::collections::BTreeSet;
use tb_diagnostics::{DiagnosticCode, Diagnostics};
use tb_ids::{StableId, TypeStableId};
use tb_rename::{NameKind, NameRequest, RenameEngine, RenameError, RenameScope};
use tb_symbols::{MemberInfo, MemberKind, SymbolGraph, TypeSymbol};
use tb_types::TypeReference;
use tracing::{debug, instrument};

/// Overload group shared by every constructor of a type
pub const CONSTRUCTOR_GROUP: &str = "ctor";

/// Final name of every constructor
pub const CONSTRUCTOR_NAME: &str = "constructor";

/// Reserve a final name for every type, member, view and import alias in `graph`
///
/// Namespaces and types are visited in the graph's canonical order and members in
/// (declaration order, identity) order, so the same graph always yields the same
/// names no matter how the loader ordered its output.
///
/// # Errors
///
/// Propagates any [`RenameError`] from the engine; all of them abort the run.
#[instrument(skip_all, fields(types = graph.len()))]
pub fn reserve_names(
    graph: &SymbolGraph,
    engine: &mut RenameEngine,
    diagnostics: &mut Diagnostics,
) -> Result<(), RenameError> {
    let mut reserver = Reserver { engine, diagnostics };

    for namespace in graph.namespaces() {
        for id in &namespace.types {
            if let Some(ty) = graph.get(id) {
                reserver.reserve_type(ty)?;
            }
        }
    }
    for ty in graph.types() {
        reserver.reserve_members(ty)?;
        reserver.reserve_views(ty)?;
    }
    for namespace in graph.namespaces() {
        reserver.reserve_imports(graph, &namespace.name, &namespace.types)?;
    }

    debug!(scopes = reserver.engine.scopes().count(), "reserved names");
    Ok(())
}

struct Reserver<'run> {
    engine: &'run mut RenameEngine,
    diagnostics: &'run mut Diagnostics,
}

impl Reserver<'_> {
    fn reserve(&mut self, request: NameRequest) -> Result<String, RenameError> {
        let id = request.id.clone();
        let scope = request.scope.clone();
        let is_new = self.engine.decision(&id, &scope).is_none();
        let name = self.engine.reserve(request)?;
        if let Some(decision) = self.engine.decision(&id, &scope) {
            if is_new && decision.sanitized {
                self.diagnostics.info(
                    DiagnosticCode::ReservedWord,
                    &id,
                    format!("`{}` is reserved in {}; named `{name}`", decision.requested, decision.scope),
                );
            }
        }
        Ok(name)
    }

    fn reserve_type(&mut self, ty: &TypeSymbol) -> Result<(), RenameError> {
        let base = type_base_name(ty);
        let namespace = ty.namespace();
        self.reserve(
            NameRequest::new(ty.stable_id.clone(), base.clone(), RenameScope::namespace_internal(namespace))
                .reason("type"),
        )?;
        if ty.accessibility.is_public() {
            self.reserve(
                NameRequest::new(ty.stable_id.clone(), base, RenameScope::namespace_public(namespace))
                    .reason("public type"),
            )?;
        }
        Ok(())
    }

    fn reserve_members(&mut self, ty: &TypeSymbol) -> Result<(), RenameError> {
        let mut members: Vec<(MemberKind, &MemberInfo)> = ty
            .members
            .infos()
            .filter(|(_, info)| info.on_primary_surface())
            .collect();
        members.sort_by(|(_, left), (_, right)| {
            (left.declaration_order, &left.stable_id).cmp(&(right.declaration_order, &right.stable_id))
        });

        for (kind, info) in members {
            let scope = RenameScope::type_surface(&ty.stable_id, info.is_static);
            let request = match kind {
                MemberKind::Constructor => NameRequest::new(info.stable_id.clone(), CONSTRUCTOR_NAME, scope)
                    .verbatim()
                    .in_group(CONSTRUCTOR_GROUP),
                MemberKind::Method => NameRequest::new(info.stable_id.clone(), member_base_name(info), scope)
                    .in_group(format!("method:{}", info.name)),
                MemberKind::Property | MemberKind::Field | MemberKind::Event => {
                    NameRequest::new(info.stable_id.clone(), member_base_name(info), scope)
                }
            };
            self.reserve(request.reason(format!("{kind}")).is_static(info.is_static))?;
        }
        Ok(())
    }

    fn reserve_views(&mut self, ty: &TypeSymbol) -> Result<(), RenameError> {
        for view in &ty.views {
            self.reserve(
                NameRequest::new(
                    view.accessor_id.clone(),
                    view.accessor_id.member_name.clone(),
                    RenameScope::type_surface(&ty.stable_id, false),
                )
                .reason("view accessor"),
            )?;

            let short_name = view.interface.short_name();
            for member_id in &view.members {
                let Some((kind, info)) = ty.members.find(member_id) else {
                    continue;
                };
                let natural = member_base_name(info);
                // the member as a standalone class-surface symbol: no group, no qualification
                let class_request = NameRequest::new(
                    member_id.clone(),
                    natural.clone(),
                    RenameScope::type_surface(&ty.stable_id, info.is_static),
                );
                let taken = self.engine.peek(&class_request)? != self.engine.natural_name(&natural, NameKind::Member);
                let base = if taken { format!("{natural}{VIEW_MARKER}") } else { natural };

                let scope = RenameScope::view(&ty.stable_id, &view.interface_id, info.is_static);
                let mut request = NameRequest::new(member_id.clone(), base, scope)
                    .reason(format!("view {kind}"))
                    .is_static(info.is_static);
                if info.is_explicit_implementation() {
                    request = request.qualified_by(short_name.clone());
                }
                if kind == MemberKind::Method {
                    request = request.in_group(format!("method:{}", info.name));
                }
                self.reserve(request)?;
            }
        }
        Ok(())
    }

    fn reserve_imports(
        &mut self,
        graph: &SymbolGraph,
        namespace: &str,
        local_types: &[TypeStableId],
    ) -> Result<(), RenameError> {
        let scope = RenameScope::import_alias(namespace);

        let mut foreign: BTreeSet<TypeStableId> = BTreeSet::new();
        for id in local_types {
            let Some(ty) = graph.get(id) else {
                continue;
            };
            for reference in referenced_types(ty) {
                if reference.namespace() != namespace && graph.contains(&reference) {
                    foreign.insert(reference);
                }
            }
        }
        if foreign.is_empty() {
            return Ok(());
        }

        // local names shadow imports, so they are seeded first
        for id in local_types {
            let local = self
                .engine
                .get_final(&StableId::Type(id.clone()), &RenameScope::namespace_internal(namespace))?
                .to_string();
            self.reserve(
                NameRequest::new(id.clone(), local, scope.clone())
                    .verbatim()
                    .reason("local type"),
            )?;
        }
        for id in foreign {
            let source_namespace = RenameScope::namespace_internal(id.namespace());
            let imported = self
                .engine
                .get_final(&StableId::Type(id.clone()), &source_namespace)?
                .to_string();
            self.reserve(
                NameRequest::new(id, imported, scope.clone())
                    .verbatim()
                    .reason("import alias"),
            )?;
        }
        Ok(())
    }
}

/// Every graph type a type's declaration mentions
fn referenced_types(ty: &TypeSymbol) -> Vec<TypeStableId> {
    let mut references: Vec<&TypeReference> = Vec::new();
    references.extend(ty.base_type.iter());
    references.extend(ty.interfaces.iter());
    for method in &ty.members.methods {
        references.push(&method.return_type);
        references.extend(method.parameters.iter().map(|parameter| &parameter.ty));
    }
    for property in &ty.members.properties {
        references.push(&property.property_type);
        references.extend(property.index_parameters.iter().map(|parameter| &parameter.ty));
    }
    references.extend(ty.members.fields.iter().map(|field| &field.field_type));
    references.extend(ty.members.events.iter().map(|event| &event.handler_type));
    for constructor in &ty.members.constructors {
        references.extend(constructor.parameters.iter().map(|parameter| &parameter.ty));
    }
    references
        .into_iter()
        .flat_map(TypeReference::referenced_types)
        .collect()
}
