//! Member symbols

use crate::Accessibility;
use crate::symbol::GenericParameterDef;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tb_ids::{MemberStableId, TypeStableId};
use tb_types::TypeReference;

/// Where a member is emitted
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmitScope {
    /// Instance surface of the declaring type
    #[default]
    ClassSurface,
    /// Static surface of the declaring type
    StaticSurface,
    /// Only inside an explicit-implementation view
    ViewOnly,
    /// Not emitted at all
    Omitted,
}

/// How a member came to be on its declaring type
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    /// Declared by the type itself
    #[default]
    Original,
    /// Copied from an implemented interface
    FromInterface,
    /// Created by an analysis pass
    Synthesized,
}

/// Kind of member
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemberKind {
    /// Method
    Method,
    /// Property or indexer
    Property,
    /// Field or constant
    Field,
    /// Event
    Event,
    /// Instance or static constructor
    Constructor,
}

/// Information shared by every kind of member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    /// Stable identity
    pub stable_id: MemberStableId,
    /// Source name
    pub name: String,
    /// Declared accessibility
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Static member
    #[serde(default)]
    pub is_static: bool,
    /// Emission placement; only analysis passes change it
    #[serde(default)]
    pub emit_scope: EmitScope,
    /// Origin of the member
    #[serde(default)]
    pub provenance: Provenance,
    /// Interface this member explicitly implements, as flagged by the loader
    #[serde(default)]
    pub explicit_interface: Option<TypeReference>,
    /// Interface a `FromInterface` member was copied from
    #[serde(default)]
    pub source_interface: Option<TypeStableId>,
    /// Position in the declaring type's metadata, used for stable tie-breaks
    #[serde(default)]
    pub declaration_order: u32,
    /// Final target identifier, stamped by name application
    #[serde(default)]
    pub final_name: Option<String>,
}

impl MemberInfo {
    /// Member info for an original, public, instance member on the class surface
    pub fn new(stable_id: MemberStableId, declaration_order: u32) -> Self {
        let name = stable_id.member_name.clone();
        Self {
            stable_id,
            name,
            accessibility: Accessibility::Public,
            is_static: false,
            emit_scope: EmitScope::ClassSurface,
            provenance: Provenance::Original,
            explicit_interface: None,
            source_interface: None,
            declaration_order,
            final_name: None,
        }
    }

    /// Whether this member is an explicit interface implementation
    #[must_use]
    pub fn is_explicit_implementation(&self) -> bool {
        self.explicit_interface.is_some()
    }

    /// Interface through which the member is reachable when it is not on the primary surface
    #[must_use]
    pub fn view_interface(&self) -> Option<TypeStableId> {
        self.explicit_interface
            .as_ref()
            .and_then(TypeReference::stable_id)
            .or_else(|| self.source_interface.clone())
    }

    /// Whether the member is emitted on one of the type's own surfaces
    #[must_use]
    pub fn on_primary_surface(&self) -> bool {
        matches!(self.emit_scope, EmitScope::ClassSurface | EmitScope::StaticSurface)
    }
}

/// Parameter passing modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterModifier {
    /// By value
    #[default]
    None,
    /// `ref`
    Ref,
    /// `out`
    Out,
    /// `in`
    In,
    /// `params` array
    Params,
}

impl ParameterModifier {
    /// Whether the target system cannot express this modifier
    #[must_use]
    pub fn is_by_reference(self) -> bool {
        matches!(self, Self::Ref | Self::Out | Self::In)
    }
}

/// Method, constructor or indexer parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Source name
    pub name: String,
    /// Parameter type; by-reference parameters carry a `ByRef` reference
    pub ty: TypeReference,
    /// Passing modifier
    #[serde(default)]
    pub modifier: ParameterModifier,
    /// Has a default value
    #[serde(default)]
    pub is_optional: bool,
}

impl Parameter {
    /// By-value parameter
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
            modifier: ParameterModifier::None,
            is_optional: false,
        }
    }

    /// Parameter with a modifier
    #[must_use]
    pub fn with_modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// Method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    /// Shared member info
    pub info: MemberInfo,
    /// Method generic parameters
    #[serde(default)]
    pub generic_parameters: Vec<GenericParameterDef>,
    /// Parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type
    pub return_type: TypeReference,
    /// Abstract method
    #[serde(default)]
    pub is_abstract: bool,
    /// Virtual method
    #[serde(default)]
    pub is_virtual: bool,
}

impl MethodSymbol {
    /// Total number of generic constraints across the method's parameters
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.generic_parameters
            .iter()
            .map(|param| param.constraints.len())
            .sum()
    }
}

/// Property or indexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySymbol {
    /// Shared member info
    pub info: MemberInfo,
    /// Property type
    pub property_type: TypeReference,
    /// Indexer parameters, empty for plain properties
    #[serde(default)]
    pub index_parameters: Vec<Parameter>,
    /// Has a getter
    #[serde(default = "default_true")]
    pub has_getter: bool,
    /// Has a setter
    #[serde(default)]
    pub has_setter: bool,
}

fn default_true() -> bool {
    true
}

/// Field or constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSymbol {
    /// Shared member info
    pub info: MemberInfo,
    /// Field type
    pub field_type: TypeReference,
    /// Read-only field
    #[serde(default)]
    pub is_readonly: bool,
    /// Compile-time constant
    #[serde(default)]
    pub is_literal: bool,
}

/// Event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSymbol {
    /// Shared member info
    pub info: MemberInfo,
    /// Delegate type of the handler
    pub handler_type: TypeReference,
}

/// Constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorSymbol {
    /// Shared member info
    pub info: MemberInfo,
    /// Parameters
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

/// All members of one type, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberCollection {
    /// Methods
    pub methods: Vec<MethodSymbol>,
    /// Properties and indexers
    pub properties: Vec<PropertySymbol>,
    /// Fields
    pub fields: Vec<FieldSymbol>,
    /// Events
    pub events: Vec<EventSymbol>,
    /// Constructors
    pub constructors: Vec<ConstructorSymbol>,
}

impl MemberCollection {
    /// Every member's shared info, tagged with its kind
    pub fn infos(&self) -> impl Iterator<Item = (MemberKind, &MemberInfo)> {
        self.methods
            .iter()
            .map(|method| (MemberKind::Method, &method.info))
            .chain(self.properties.iter().map(|property| (MemberKind::Property, &property.info)))
            .chain(self.fields.iter().map(|field| (MemberKind::Field, &field.info)))
            .chain(self.events.iter().map(|event| (MemberKind::Event, &event.info)))
            .chain(
                self.constructors
                    .iter()
                    .map(|constructor| (MemberKind::Constructor, &constructor.info)),
            )
    }

    /// Mutable access to every member's shared info
    pub fn infos_mut(&mut self) -> impl Iterator<Item = (MemberKind, &mut MemberInfo)> {
        self.methods
            .iter_mut()
            .map(|method| (MemberKind::Method, &mut method.info))
            .chain(
                self.properties
                    .iter_mut()
                    .map(|property| (MemberKind::Property, &mut property.info)),
            )
            .chain(self.fields.iter_mut().map(|field| (MemberKind::Field, &mut field.info)))
            .chain(self.events.iter_mut().map(|event| (MemberKind::Event, &mut event.info)))
            .chain(
                self.constructors
                    .iter_mut()
                    .map(|constructor| (MemberKind::Constructor, &mut constructor.info)),
            )
    }

    /// Find a member by identity
    #[must_use]
    pub fn find(&self, id: &MemberStableId) -> Option<(MemberKind, &MemberInfo)> {
        self.infos().find(|(_, info)| &info.stable_id == id)
    }

    /// Find a member by identity, mutably
    pub fn find_mut(&mut self, id: &MemberStableId) -> Option<&mut MemberInfo> {
        self.infos_mut()
            .find(|(_, info)| &info.stable_id == id)
            .map(|(_, info)| info)
    }

    /// Total number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
            + self.properties.len()
            + self.fields.len()
            + self.events.len()
            + self.constructors.len()
    }

    /// Whether the type declares no members
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
