//! Pass orchestration

use crate::config::PipelineConfig;
use crate::context::PipelineContext;
use crate::error::PipelineError;
use serde::{Serialize, Serializer};
use tb_diagnostics::{Diagnostic, Severity};
use tb_interfaces::analyze_interfaces;
use tb_naming::{apply_names, reserve_names};
use tb_overloads::resolve_overloads;
use tb_rename::RenameDecision;
use tb_symbols::{IntersectionAlias, SymbolGraph, TypeSymbol};
use tb_validate::validate;
use tb_views::plan_views;
use tracing::{info, instrument};

/// Result of a successful run
#[derive(Debug, Serialize)]
pub struct PipelineOutput {
    /// Analyzed graph with every final name stamped
    #[serde(serialize_with = "serialize_graph")]
    pub graph: SymbolGraph,
    /// Every naming decision, sorted by scope key then final name
    pub decisions: Vec<RenameDecision>,
    /// Every diagnostic, in pass order
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct GraphSnapshot<'graph> {
    types: Vec<&'graph TypeSymbol>,
    aliases: Vec<&'graph IntersectionAlias>,
}

fn serialize_graph<S: Serializer>(graph: &SymbolGraph, serializer: S) -> Result<S::Ok, S::Error> {
    GraphSnapshot {
        types: graph.types().collect(),
        aliases: graph.aliases().collect(),
    }
    .serialize(serializer)
}

/// Run every pass over `graph`
///
/// Passes run strictly in order: interface analysis, overload resolution, view
/// planning, name reservation, name application and the consistency gate. The input
/// graph is never modified.
///
/// # Errors
///
/// - [`PipelineError::Interface`] if synthesized interfaces break the graph
/// - [`PipelineError::Rename`] on any renaming contract violation or suffix exhaustion
/// - [`PipelineError::Validation`] with the violations if the consistency gate fails
#[instrument(skip_all, fields(types = graph.len()))]
pub fn run_pipeline(graph: &SymbolGraph, config: &PipelineConfig) -> Result<PipelineOutput, PipelineError> {
    let mut ctx = PipelineContext::new(config.clone());

    let analyzed = analyze_interfaces(graph, &ctx.config.interfaces, &mut ctx.diagnostics)?;
    let resolved = resolve_overloads(&analyzed, &mut ctx.diagnostics);
    let planned = plan_views(&resolved, &mut ctx.diagnostics);

    reserve_names(&planned, &mut ctx.engine, &mut ctx.diagnostics)?;
    let named = apply_names(&planned, &ctx.engine)?;

    if validate(&named, &ctx.engine, &mut ctx.diagnostics) > 0 {
        let violations = ctx
            .diagnostics
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .cloned()
            .collect();
        return Err(PipelineError::Validation(violations));
    }

    let decisions: Vec<RenameDecision> = ctx.engine.decisions().into_iter().cloned().collect();
    info!(
        types = named.len(),
        decisions = decisions.len(),
        diagnostics = ctx.diagnostics.len(),
        "pipeline finished"
    );
    Ok(PipelineOutput {
        graph: named,
        decisions,
        diagnostics: ctx.diagnostics.into_vec(),
    })
}
