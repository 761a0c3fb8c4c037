//! `_Base` interface and intersection alias synthesis

use tb_ids::{MemberStableId, TypeStableId};
use tb_symbols::{
    EmitScope, EventSymbol, GenericParameterDef, IntersectionAlias, MemberCollection, MemberInfo,
    MethodSymbol, Parameter, PropertySymbol, Provenance, TypeKind, TypeOrigin, TypeSymbol,
};
use tb_types::{GenericOwner, Rehoming, TypeReference};

/// Identity of the `_Base` interface synthesized for `ty`
///
/// The suffix goes before the arity marker, so ``Cell`1`` gets ``Cell_Base`1``.
#[must_use]
pub fn base_interface_id(ty: &TypeStableId) -> TypeStableId {
    let full_name = match ty.full_name.rsplit_once('`') {
        Some((head, arity)) if arity.chars().all(|ch| ch.is_ascii_digit()) => {
            format!("{head}_Base`{arity}")
        }
        _ => format!("{}_Base", ty.full_name),
    };
    TypeStableId::new(ty.module.clone(), full_name)
}

/// The `_Base` interface and intersection alias resolving a diamond on `ty`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiamondResolution {
    /// Interface carrying the type's own instance members
    pub base: TypeSymbol,
    /// `Type = IfaceA & IfaceB & ...` over the reduced interface set
    pub alias: IntersectionAlias,
}

/// Synthesize the `_Base` interface and alias for `ty`, whose reduced set is `kept`
///
/// The base interface carries the type's own public instance members: methods,
/// properties and events as they are, fields as properties (read-only when the field
/// is). Every member is re-homed onto the base identity, and every generic parameter
/// of the type or of a method, constraints included, moves onto the base's context.
/// Alias members are sorted by canonical form.
#[must_use]
pub fn synthesize(ty: &TypeSymbol, kept: &[TypeReference]) -> DiamondResolution {
    let base_id = base_interface_id(&ty.stable_id);
    let mut rehoming = Rehoming::new();
    rehoming.insert(ty.generic_owner(), GenericOwner::Type(base_id.clone()));

    let mut members = MemberCollection::default();
    for method in ty.members.methods.iter().filter(|method| carried(&method.info)) {
        let stable_id = method.info.stable_id.rebased(&base_id);
        let mut method_rehoming = rehoming.clone();
        method_rehoming.insert(
            GenericOwner::Method(method.info.stable_id.clone()),
            GenericOwner::Method(stable_id.clone()),
        );
        members.methods.push(MethodSymbol {
            info: rehomed_info(&method.info, stable_id),
            generic_parameters: rehomed_generics(&method.generic_parameters, &method_rehoming),
            parameters: rehomed_parameters(&method.parameters, &method_rehoming),
            return_type: method_rehoming.apply(&method.return_type),
            is_abstract: true,
            is_virtual: false,
        });
    }
    for property in ty.members.properties.iter().filter(|property| carried(&property.info)) {
        let stable_id = property.info.stable_id.rebased(&base_id);
        members.properties.push(PropertySymbol {
            info: rehomed_info(&property.info, stable_id),
            property_type: rehoming.apply(&property.property_type),
            index_parameters: rehomed_parameters(&property.index_parameters, &rehoming),
            has_getter: property.has_getter,
            has_setter: property.has_setter,
        });
    }
    for field in ty.members.fields.iter().filter(|field| carried(&field.info)) {
        let stable_id = field.info.stable_id.rebased(&base_id);
        members.properties.push(PropertySymbol {
            info: rehomed_info(&field.info, stable_id),
            property_type: rehoming.apply(&field.field_type),
            index_parameters: Vec::new(),
            has_getter: true,
            has_setter: !field.is_readonly && !field.is_literal,
        });
    }
    for event in ty.members.events.iter().filter(|event| carried(&event.info)) {
        let stable_id = event.info.stable_id.rebased(&base_id);
        members.events.push(EventSymbol {
            info: rehomed_info(&event.info, stable_id),
            handler_type: rehoming.apply(&event.handler_type),
        });
    }

    let mut base = TypeSymbol::new(base_id.clone(), TypeKind::Interface);
    base.accessibility = ty.accessibility;
    base.generic_parameters = rehomed_generics(&ty.generic_parameters, &rehoming);
    base.declaring_type = ty.declaring_type.clone();
    base.members = members;
    base.origin = TypeOrigin::Synthesized {
        from: ty.stable_id.clone(),
    };

    let mut alias_members = kept.to_vec();
    alias_members.sort_by_cached_key(ToString::to_string);

    DiamondResolution {
        base,
        alias: IntersectionAlias {
            alias_for: ty.stable_id.clone(),
            base_interface: base_id,
            members: alias_members,
        },
    }
}

fn carried(info: &MemberInfo) -> bool {
    info.provenance == Provenance::Original
        && info.emit_scope == EmitScope::ClassSurface
        && !info.is_static
        && !info.is_explicit_implementation()
        && info.accessibility.is_public()
}

fn rehomed_info(info: &MemberInfo, stable_id: MemberStableId) -> MemberInfo {
    MemberInfo {
        stable_id,
        provenance: Provenance::Synthesized,
        final_name: None,
        ..info.clone()
    }
}

fn rehomed_generics(parameters: &[GenericParameterDef], rehoming: &Rehoming) -> Vec<GenericParameterDef> {
    parameters
        .iter()
        .map(|parameter| GenericParameterDef {
            constraints: parameter.constraints.iter().map(|constraint| rehoming.apply(constraint)).collect(),
            ..parameter.clone()
        })
        .collect()
}

fn rehomed_parameters(parameters: &[Parameter], rehoming: &Rehoming) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|parameter| Parameter {
            ty: rehoming.apply(&parameter.ty),
            ..parameter.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_symbols::{ConstructorSymbol, FieldSymbol};
    use tb_types::GenericParameterRef;

    fn reference(name: &str) -> TypeReference {
        TypeReference::named("core", "System", name)
    }

    fn method(owner: &TypeStableId, name: &str, order: u32, return_type: TypeReference) -> MethodSymbol {
        MethodSymbol {
            info: MemberInfo::new(MemberStableId::new("app", owner.full_name.clone(), name, "()"), order),
            generic_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type,
            is_abstract: false,
            is_virtual: false,
        }
    }

    #[test]
    fn test_base_carries_own_instance_members() {
        let id = TypeStableId::new("app", "App.Pair");
        let mut pair = TypeSymbol::new(id.clone(), TypeKind::Struct);
        pair.members.methods.push(method(&id, "Swap", 0, reference("Void")));
        let mut inherited = method(&id, "Equals", 1, reference("Boolean"));
        inherited.info.provenance = Provenance::FromInterface;
        pair.members.methods.push(inherited);
        pair.members.constructors.push(ConstructorSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Pair", ".ctor", "()"), 2),
            parameters: Vec::new(),
        });

        let resolution = synthesize(&pair, &[reference("IFormattable"), reference("IEquatable")]);
        let base = &resolution.base;
        assert_eq!(base.stable_id, TypeStableId::new("app", "App.Pair_Base"));
        assert!(base.is_interface());
        assert!(base.is_synthesized());
        assert_eq!(base.members.len(), 1);
        let swap = &base.members.methods[0];
        assert_eq!(swap.info.stable_id.declaring_type, "App.Pair_Base");
        assert_eq!(swap.info.provenance, Provenance::Synthesized);
        assert!(swap.is_abstract);

        let names: Vec<String> = resolution.alias.members.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["System.IEquatable", "System.IFormattable"]);
        assert_eq!(resolution.alias.base_interface, base.stable_id);
    }

    #[test]
    fn test_generic_parameters_rehomed() {
        let id = TypeStableId::new("app", "App.Cell`1");
        let mut cell = TypeSymbol::new(id.clone(), TypeKind::Class);
        cell.generic_parameters = vec![GenericParameterDef::new("T", 0)];
        let parameter = TypeReference::parameter(cell.generic_owner(), 0, "T");
        cell.members.methods.push(method(&id, "Get", 0, parameter));

        let resolution = synthesize(&cell, &[]);
        let TypeReference::GenericParameter(param) = &resolution.base.members.methods[0].return_type else {
            panic!("expected a generic parameter");
        };
        assert_eq!(
            param.owner,
            GenericOwner::Type(TypeStableId::new("app", "App.Cell_Base`1"))
        );
    }

    #[test]
    fn test_constraints_rehomed() {
        let id = TypeStableId::new("app", "App.Cell`1");
        let base_owner = GenericOwner::Type(TypeStableId::new("app", "App.Cell_Base`1"));
        let mut cell = TypeSymbol::new(id.clone(), TypeKind::Class);
        // T : IComparable<T>
        let comparable = TypeReference::generic(
            "core",
            "System",
            "IComparable",
            vec![TypeReference::parameter(cell.generic_owner(), 0, "T")],
        );
        let mut param = GenericParameterDef::new("T", 0);
        param.constraints.push(comparable);
        cell.generic_parameters = vec![param];
        let constrained = cell.generic_parameters[0].reference(cell.generic_owner());
        cell.members.methods.push(method(&id, "Get", 0, constrained));

        let resolution = synthesize(&cell, &[]);

        let TypeReference::Named(declared) = &resolution.base.generic_parameters[0].constraints[0] else {
            panic!("expected a named constraint");
        };
        let TypeReference::GenericParameter(declared_arg) = &declared.type_args[0] else {
            panic!("expected a generic argument");
        };
        assert_eq!(declared_arg.owner, base_owner);

        let TypeReference::GenericParameter(returned) = &resolution.base.members.methods[0].return_type else {
            panic!("expected a generic parameter");
        };
        assert_eq!(returned.owner, base_owner);
        let TypeReference::Named(returned_constraint) = &returned.constraints[0] else {
            panic!("expected a named constraint");
        };
        let TypeReference::GenericParameter(GenericParameterRef { owner, .. }) = &returned_constraint.type_args[0] else {
            panic!("expected a generic argument");
        };
        assert_eq!(*owner, base_owner);
    }

    #[test]
    fn test_fields_and_events_carried() {
        let id = TypeStableId::new("app", "App.Pair");
        let mut pair = TypeSymbol::new(id, TypeKind::Struct);
        pair.members.fields.push(FieldSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Pair", "Key", ""), 0),
            field_type: reference("String"),
            is_readonly: true,
            is_literal: false,
        });
        pair.members.fields.push(FieldSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Pair", "Count", ""), 1),
            field_type: reference("Int32"),
            is_readonly: false,
            is_literal: false,
        });
        pair.members.events.push(EventSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Pair", "Changed", ""), 2),
            handler_type: reference("EventHandler"),
        });

        let base = synthesize(&pair, &[]).base;
        assert_eq!(base.members.len(), 3);

        let properties: Vec<_> = base
            .members
            .properties
            .iter()
            .map(|property| {
                (
                    property.info.stable_id.member_name.as_str(),
                    property.property_type.to_string(),
                    property.has_setter,
                )
            })
            .collect();
        assert_eq!(
            properties,
            [
                ("Key", "System.String".to_string(), false),
                ("Count", "System.Int32".to_string(), true),
            ]
        );
        assert_eq!(base.members.events.len(), 1);
        assert_eq!(base.members.events[0].info.stable_id.declaring_type, "App.Pair_Base");
        assert_eq!(base.members.events[0].info.provenance, Provenance::Synthesized);
    }
}
