//! Symbol graph
//!
//! The graph is the single source of truth handed from the loader to every analysis
//! pass. It is immutable: passes derive new graphs with [`SymbolGraph::map_types`] and
//! [`SymbolGraph::extended`] and never edit one in place.

pub mod graph;
pub mod member;
pub mod symbol;

pub use graph::{GraphError, SymbolGraph, SymbolGraphBuilder, TypeIdx};
pub use member::{
    ConstructorSymbol, EmitScope, EventSymbol, FieldSymbol, MemberCollection, MemberInfo,
    MemberKind, MethodSymbol, Parameter, ParameterModifier, PropertySymbol, Provenance,
};
pub use symbol::{
    Accessibility, ExplicitView, GenericParameterDef, IntersectionAlias, NamespaceSymbol,
    TypeFlags, TypeKind, TypeOrigin, TypeSymbol,
};
