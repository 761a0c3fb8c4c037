//! Fixture builders for pipeline integration tests

pub mod samples;

use tb_driver::{GraphInput, PipelineConfig, PipelineError, PipelineOutput, run_pipeline};
use tb_ids::{MemberStableId, TypeStableId};
use tb_symbols::{
    Accessibility, ConstructorSymbol, FieldSymbol, GenericParameterDef, GraphError, MemberInfo,
    MethodSymbol, Parameter, PropertySymbol, SymbolGraph, TypeKind, TypeSymbol,
};
use tb_types::TypeReference;

/// Module every fixture type is loaded from unless stated otherwise
pub const APP: &str = "app";

/// Module of the well-known system types
pub const CORE: &str = "core";

/// Reference to a non-generic system type
#[must_use]
pub fn system(name: &str) -> TypeReference {
    TypeReference::named(CORE, "System", name)
}

/// Reference to a non-generic type in the fixture module
#[must_use]
pub fn app(namespace: &str, name: &str) -> TypeReference {
    TypeReference::named(APP, namespace, name)
}

/// Builder for one type
#[derive(Debug, Clone)]
pub struct TypeFixture {
    ty: TypeSymbol,
    next_order: u32,
}

impl TypeFixture {
    /// Type of `kind` named `full_name` in `module`
    #[must_use]
    pub fn new(module: &str, full_name: &str, kind: TypeKind) -> Self {
        Self {
            ty: TypeSymbol::new(TypeStableId::new(module, full_name), kind),
            next_order: 0,
        }
    }

    /// Class in the fixture module
    #[must_use]
    pub fn class(full_name: &str) -> Self {
        Self::new(APP, full_name, TypeKind::Class)
    }

    /// Struct in the fixture module
    #[must_use]
    pub fn structure(full_name: &str) -> Self {
        Self::new(APP, full_name, TypeKind::Struct)
    }

    /// Interface in the fixture module
    #[must_use]
    pub fn interface(full_name: &str) -> Self {
        Self::new(APP, full_name, TypeKind::Interface)
    }

    /// Identity of the type being built
    #[must_use]
    pub fn id(&self) -> &TypeStableId {
        &self.ty.stable_id
    }

    /// Declare generic parameters named `names`
    #[must_use]
    pub fn generic(mut self, names: &[&str]) -> Self {
        self.ty.generic_parameters = names
            .iter()
            .zip(0_u32..)
            .map(|(name, position)| GenericParameterDef::new(*name, position))
            .collect();
        self
    }

    /// Change accessibility
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.ty.accessibility = accessibility;
        self
    }

    /// Add a directly implemented interface
    #[must_use]
    pub fn implements(mut self, interface: TypeReference) -> Self {
        self.ty.interfaces.push(interface);
        self
    }

    /// Add an instance method without parameters
    #[must_use]
    pub fn method(self, name: &str, return_type: TypeReference) -> Self {
        self.method_with(name, Vec::new(), return_type, |_| {})
    }

    /// Add a method with `parameters`; `adjust` may edit its member info
    #[must_use]
    pub fn method_with(
        mut self,
        name: &str,
        parameters: Vec<Parameter>,
        return_type: TypeReference,
        adjust: impl FnOnce(&mut MemberInfo),
    ) -> Self {
        let signature = signature(&parameters);
        let mut info = self.info(name, &signature);
        adjust(&mut info);
        self.ty.members.methods.push(MethodSymbol {
            info,
            generic_parameters: Vec::new(),
            parameters,
            return_type,
            is_abstract: false,
            is_virtual: false,
        });
        self
    }

    /// Add an explicit implementation of `interface`'s method `name`
    #[must_use]
    pub fn explicit_method(self, interface: &TypeReference, name: &str, return_type: TypeReference) -> Self {
        let qualified = format!("{interface}.{name}");
        let interface = interface.clone();
        self.method_with(&qualified, Vec::new(), return_type, move |info| {
            info.explicit_interface = Some(interface);
        })
    }

    /// Add a read-only property; `adjust` may edit its member info
    #[must_use]
    pub fn property_with(mut self, name: &str, property_type: TypeReference, adjust: impl FnOnce(&mut MemberInfo)) -> Self {
        let mut info = self.info(name, &format!(":{property_type}"));
        adjust(&mut info);
        self.ty.members.properties.push(PropertySymbol {
            info,
            property_type,
            index_parameters: Vec::new(),
            has_getter: true,
            has_setter: false,
        });
        self
    }

    /// Add a read-only property
    #[must_use]
    pub fn property(self, name: &str, property_type: TypeReference) -> Self {
        self.property_with(name, property_type, |_| {})
    }

    /// Add an instance field
    #[must_use]
    pub fn field(mut self, name: &str, field_type: TypeReference) -> Self {
        let info = self.info(name, "");
        self.ty.members.fields.push(FieldSymbol {
            info,
            field_type,
            is_readonly: false,
            is_literal: false,
        });
        self
    }

    /// Add an instance constructor
    #[must_use]
    pub fn constructor(mut self, parameters: Vec<Parameter>) -> Self {
        let signature = signature(&parameters);
        let info = self.info(".ctor", &signature);
        self.ty.members.constructors.push(ConstructorSymbol { info, parameters });
        self
    }

    /// The finished type
    #[must_use]
    pub fn build(self) -> TypeSymbol {
        self.ty
    }

    fn info(&mut self, name: &str, signature: &str) -> MemberInfo {
        let id = MemberStableId::new(
            self.ty.stable_id.module.clone(),
            self.ty.stable_id.full_name.clone(),
            name,
            signature,
        );
        let info = MemberInfo::new(id, self.next_order);
        self.next_order += 1;
        info
    }
}

fn signature(parameters: &[Parameter]) -> String {
    let rendered: Vec<String> = parameters
        .iter()
        .map(|parameter| {
            if parameter.modifier.is_by_reference() {
                format!("ref {}", parameter.ty.erase_by_ref())
            } else {
                parameter.ty.to_string()
            }
        })
        .collect();
    format!("({})", rendered.join(","))
}

/// Builder for a whole graph
#[derive(Debug, Clone, Default)]
pub struct GraphFixture {
    types: Vec<TypeSymbol>,
}

impl GraphFixture {
    /// Empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type
    #[must_use]
    pub fn with(mut self, ty: TypeFixture) -> Self {
        self.types.push(ty.build());
        self
    }

    /// Add a system interface with `arity` generic parameters
    #[must_use]
    pub fn with_system_interface(mut self, name: &str, arity: u32) -> Self {
        let full_name = if arity == 0 {
            format!("System.{name}")
        } else {
            format!("System.{name}`{arity}")
        };
        let mut ty = TypeSymbol::new(TypeStableId::new(CORE, full_name), TypeKind::Interface);
        ty.generic_parameters = (0..arity)
            .map(|position| GenericParameterDef::new(format!("T{position}"), position))
            .collect();
        self.types.push(ty);
        self
    }

    /// Types of both fixtures
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.types.extend(other.types);
        self
    }

    /// Same types with the type list and every member list reversed
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut types = self.types.clone();
        types.reverse();
        for ty in &mut types {
            ty.members.methods.reverse();
            ty.members.properties.reverse();
            ty.members.fields.reverse();
            ty.members.events.reverse();
            ty.members.constructors.reverse();
        }
        Self { types }
    }

    /// Loader output for these types
    #[must_use]
    pub fn input(&self) -> GraphInput {
        GraphInput {
            types: self.types.clone(),
        }
    }

    /// Build the graph
    ///
    /// # Errors
    ///
    /// Returns the builder's [`GraphError`] for inconsistent fixtures.
    pub fn build(&self) -> Result<SymbolGraph, GraphError> {
        let mut builder = SymbolGraph::builder();
        for ty in &self.types {
            builder.add_type(ty.clone());
        }
        builder.build()
    }

    /// Build the graph and run the pipeline over it
    ///
    /// # Errors
    ///
    /// Returns any [`PipelineError`], including graph errors.
    pub fn run(&self, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
        let graph = self.input().into_graph()?;
        run_pipeline(&graph, config)
    }
}
