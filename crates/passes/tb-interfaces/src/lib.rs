//! Interface analysis
//!
//! Reduces every type's direct interface list to its minimal set and resolves the
//! sets that cannot be expressed as a single inheritance chain.
//!
//! # Architecture
//!
//! - **Hierarchy**: depth-first walk of the global interface graph, closing generic
//!   arguments by substitution at every step
//! - **Reduction**: drops duplicates and interfaces already inherited through another
//!   listed interface
//! - **Diamonds**: two or more remaining interfaces get a synthesized `<Type>_Base`
//!   interface and an intersection alias `<Type> = IfaceA & IfaceB`
//!
//! The pass is pure: it returns a new graph and reports every resolution through the
//! diagnostics sink.

pub mod config;
pub mod diamond;
pub mod error;
pub mod hierarchy;
pub mod reduce;

pub use config::InterfaceConfig;
pub use diamond::{DiamondResolution, base_interface_id, synthesize};
pub use error::InterfaceError;
pub use hierarchy::{Ancestors, InterfaceHierarchy};
pub use reduce::{PruneReason, Pruned, Reduction, reduce};

use rustc_hash::FxHashMap;
use tb_diagnostics::{DiagnosticCode, Diagnostics};
use tb_ids::TypeStableId;
use tb_symbols::{SymbolGraph, TypeSymbol};
use tb_types::TypeReference;
use tracing::{debug, instrument, warn};

/// Per-type outcome of the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
struct TypePlan {
    kept: Vec<TypeReference>,
    diamond_base: Option<TypeStableId>,
}

/// Run interface analysis over `graph`
///
/// Types whose interface references disagree with their definitions' arity are left
/// unchanged and reported as `TYPE_SKIPPED`; all other resolutions are reported as
/// info diagnostics.
///
/// # Errors
///
/// Returns [`InterfaceError::Graph`] if the synthesized interfaces cannot be added to
/// the graph.
#[instrument(skip_all, fields(types = graph.len()))]
pub fn analyze_interfaces(
    graph: &SymbolGraph,
    config: &InterfaceConfig,
    diagnostics: &mut Diagnostics,
) -> Result<SymbolGraph, InterfaceError> {
    let hierarchy = InterfaceHierarchy::new(graph);
    let mut plans: FxHashMap<TypeStableId, TypePlan> = FxHashMap::default();
    let mut synthesized = Vec::new();
    let mut aliases = Vec::new();

    for ty in graph.types().filter(|ty| !ty.interfaces.is_empty()) {
        let reduction = match reduce(&hierarchy, ty) {
            Ok(reduction) => reduction,
            Err(error) => {
                warn!(ty = %ty.stable_id, %error, "skipping interface analysis");
                diagnostics.warning(
                    DiagnosticCode::TypeSkipped,
                    &ty.stable_id,
                    format!("interface analysis skipped: {error}"),
                );
                continue;
            }
        };

        report_reduction(ty, &reduction, diagnostics);

        let mut diamond_base = None;
        if reduction.is_diamond() && !ty.is_interface() && config.synthesize_diamonds {
            let base_id = base_interface_id(&ty.stable_id);
            if graph.contains(&base_id) {
                diagnostics.warning(
                    DiagnosticCode::TypeSkipped,
                    &ty.stable_id,
                    format!("cannot synthesize {base_id}: the identity is already taken"),
                );
            } else {
                let resolution = synthesize(ty, &reduction.kept);
                debug!(ty = %ty.stable_id, base = %base_id, "synthesized diamond base");
                diagnostics.info(
                    DiagnosticCode::DiamondSynthesized,
                    &ty.stable_id,
                    format!(
                        "synthesized {} and alias over {} interfaces",
                        base_id.full_name,
                        resolution.alias.members.len()
                    ),
                );
                diamond_base = Some(base_id);
                synthesized.push(resolution.base);
                aliases.push(resolution.alias);
            }
        }

        plans.insert(
            ty.stable_id.clone(),
            TypePlan {
                kept: reduction.kept,
                diamond_base,
            },
        );
    }

    let reduced = graph.map_types(|ty| match plans.get(&ty.stable_id) {
        Some(plan) => TypeSymbol {
            interfaces: plan.kept.clone(),
            diamond_base: plan.diamond_base.clone(),
            ..ty.clone()
        },
        None => ty.clone(),
    });

    if synthesized.is_empty() && aliases.is_empty() {
        return Ok(reduced);
    }
    Ok(reduced.extended(synthesized, aliases)?)
}

fn report_reduction(ty: &TypeSymbol, reduction: &Reduction, diagnostics: &mut Diagnostics) {
    for unresolved in &reduction.unresolved {
        diagnostics.warning(
            DiagnosticCode::InterfaceUnresolved,
            &ty.stable_id,
            format!("interface {unresolved} is not defined in the graph; treated as having no ancestors"),
        );
    }
    for pruned in &reduction.pruned {
        let message = match &pruned.reason {
            PruneReason::Duplicate => format!("dropped duplicate interface {}", pruned.reference),
            PruneReason::InheritedThrough(through) => {
                format!("dropped interface {} inherited through {through}", pruned.reference)
            }
        };
        diagnostics.info(DiagnosticCode::InterfacePruned, &ty.stable_id, message);
    }
}
