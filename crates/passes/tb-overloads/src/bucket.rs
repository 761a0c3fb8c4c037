//! Erasure buckets

use derive_more::Display;
use indexmap::IndexMap;
use tb_ids::MemberStableId;
use tb_symbols::{MemberInfo, MemberKind, MethodSymbol, Parameter, PropertySymbol, TypeSymbol};

/// What survives of a member signature in the target type system
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{kind} {name}`{generic_arity}({param_count}){}", if *is_static { " static" } else { "" })]
pub struct ErasureKey {
    /// Methods and properties never share a bucket
    pub kind: MemberKind,
    /// Source name
    pub name: String,
    /// Method generic arity
    pub generic_arity: usize,
    /// Parameter count (index parameters for indexers)
    pub param_count: usize,
    /// Static members live on a separate surface
    pub is_static: bool,
}

/// One member taking part in overload resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Member identity
    pub id: MemberStableId,
    /// Canonical return type (property type for properties)
    pub return_type: String,
    /// Canonical parameter types with by-ref wrappers erased
    pub erased_parameters: Vec<String>,
    /// Number of `ref`/`out`/`in` parameters
    pub by_ref_count: usize,
    /// Number of generic constraints
    pub constraint_count: usize,
    /// Explicit interface implementation
    pub is_explicit: bool,
    /// Declaration order, for tie-breaks
    pub declaration_order: u32,
}

impl Candidate {
    fn new(info: &MemberInfo, return_type: String, parameters: &[Parameter], constraint_count: usize) -> Self {
        Self {
            id: info.stable_id.clone(),
            return_type,
            erased_parameters: parameters
                .iter()
                .map(|parameter| parameter.ty.erase_by_ref().to_string())
                .collect(),
            by_ref_count: parameters
                .iter()
                .filter(|parameter| parameter.modifier.is_by_reference() || parameter.ty.is_by_ref())
                .count(),
            constraint_count,
            is_explicit: info.is_explicit_implementation(),
            declaration_order: info.declaration_order,
        }
    }

    fn from_method(method: &MethodSymbol) -> Self {
        Self::new(
            &method.info,
            method.return_type.to_string(),
            &method.parameters,
            method.constraint_count(),
        )
    }

    fn from_property(property: &PropertySymbol) -> Self {
        Self::new(
            &property.info,
            property.property_type.to_string(),
            &property.index_parameters,
            0,
        )
    }
}

/// Bucket a type's primary-surface methods and properties by erasure key
///
/// Members are visited in (declaration order, identity) order, so buckets and their
/// contents come out the same regardless of how the loader listed them.
#[must_use]
pub fn buckets(ty: &TypeSymbol) -> IndexMap<ErasureKey, Vec<Candidate>> {
    let mut entries: Vec<(ErasureKey, Candidate)> = Vec::new();
    for method in ty.members.methods.iter().filter(|method| method.info.on_primary_surface()) {
        let key = ErasureKey {
            kind: MemberKind::Method,
            name: method.info.name.clone(),
            generic_arity: method.generic_parameters.len(),
            param_count: method.parameters.len(),
            is_static: method.info.is_static,
        };
        entries.push((key, Candidate::from_method(method)));
    }
    for property in ty
        .members
        .properties
        .iter()
        .filter(|property| property.info.on_primary_surface())
    {
        let key = ErasureKey {
            kind: MemberKind::Property,
            name: property.info.name.clone(),
            generic_arity: 0,
            param_count: property.index_parameters.len(),
            is_static: property.info.is_static,
        };
        entries.push((key, Candidate::from_property(property)));
    }
    entries.sort_by(|(_, left), (_, right)| {
        (left.declaration_order, &left.id).cmp(&(right.declaration_order, &right.id))
    });

    let mut buckets: IndexMap<ErasureKey, Vec<Candidate>> = IndexMap::new();
    for (key, candidate) in entries {
        buckets.entry(key).or_default().push(candidate);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_ids::TypeStableId;
    use tb_symbols::{ParameterModifier, TypeKind};
    use tb_types::TypeReference;

    fn int32() -> TypeReference {
        TypeReference::named("core", "System", "Int32").value_type()
    }

    fn method(name: &str, signature: &str, order: u32, parameters: Vec<Parameter>) -> MethodSymbol {
        MethodSymbol {
            info: MemberInfo::new(MemberStableId::new("app", "App.Parser", name, signature), order),
            generic_parameters: Vec::new(),
            parameters,
            return_type: int32(),
            is_abstract: false,
            is_virtual: false,
        }
    }

    #[test]
    fn test_buckets_by_name_and_count() {
        let mut parser = TypeSymbol::new(TypeStableId::new("app", "App.Parser"), TypeKind::Class);
        parser.members.methods = vec![
            method("Parse", "(System.String)", 1, vec![Parameter::new("text", int32())]),
            method("Parse", "()", 0, Vec::new()),
            method(
                "Parse",
                "(System.Int32&)",
                2,
                vec![Parameter::new("value", int32().by_ref()).with_modifier(ParameterModifier::Ref)],
            ),
        ];

        let buckets = buckets(&parser);
        assert_eq!(buckets.len(), 2);
        let (first_key, first) = buckets.get_index(0).unwrap();
        assert_eq!(first_key.param_count, 0);
        assert_eq!(first.len(), 1);

        let (_, second) = buckets.get_index(1).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].by_ref_count, 1);
        assert_eq!(second[1].erased_parameters, ["System.Int32"]);
    }

    #[test]
    fn test_key_display() {
        let key = ErasureKey {
            kind: MemberKind::Method,
            name: "Parse".to_string(),
            generic_arity: 1,
            param_count: 2,
            is_static: true,
        };
        assert_eq!(key.to_string(), "Method Parse`1(2) static");
    }
}
