//! Final consistency gate
//!
//! Runs after names are applied and before anything is emitted. Each check inspects the
//! named graph together with the engine's decisions and reports every violation as a
//! `PHASE_VIOLATION` error; callers abort when any were found.

pub mod checks;

pub use checks::{NamesStamped, ReservedWordSafety, ScopeUniqueness, ViewConsistency};

use tb_diagnostics::{DiagnosticCode, Diagnostics};
use tb_rename::RenameEngine;
use tb_symbols::SymbolGraph;
use tracing::{debug, instrument, warn};

/// What a check sees
pub struct ValidationContext<'run> {
    /// Named graph
    pub graph: &'run SymbolGraph,
    /// Engine holding every decision
    pub engine: &'run RenameEngine,
    violations: Diagnostics,
}

impl<'run> ValidationContext<'run> {
    /// Context over `graph` as named by `engine`
    #[must_use]
    pub fn new(graph: &'run SymbolGraph, engine: &'run RenameEngine) -> Self {
        Self {
            graph,
            engine,
            violations: Diagnostics::new(),
        }
    }

    /// Report a violation found by `check`
    pub fn report(&mut self, check: &str, location: impl ToString, message: impl Into<String>) {
        self.violations.error(
            DiagnosticCode::PhaseViolation,
            location,
            format!("[{check}] {}", message.into()),
        );
    }

    /// Violations reported so far
    #[must_use]
    pub fn violations(&self) -> &Diagnostics {
        &self.violations
    }

    /// Take the reported violations
    #[must_use]
    pub fn into_violations(self) -> Diagnostics {
        self.violations
    }
}

/// A single consistency rule
pub trait ConsistencyCheck {
    /// Rule name, prefixed to every violation message
    fn name(&self) -> &str;

    /// Inspect the context and report violations
    fn check(&self, ctx: &mut ValidationContext<'_>);
}

/// Every built-in check
#[must_use]
pub fn default_checks() -> Vec<Box<dyn ConsistencyCheck>> {
    vec![
        Box::new(NamesStamped),
        Box::new(ScopeUniqueness),
        Box::new(ReservedWordSafety),
        Box::new(ViewConsistency),
    ]
}

/// Run every built-in check and append violations to `diagnostics`
///
/// Returns the number of violations found.
#[instrument(skip_all, fields(types = graph.len()))]
pub fn validate(graph: &SymbolGraph, engine: &RenameEngine, diagnostics: &mut Diagnostics) -> usize {
    let mut ctx = ValidationContext::new(graph, engine);
    for check in default_checks() {
        let before = ctx.violations().len();
        check.check(&mut ctx);
        debug!(check = check.name(), violations = ctx.violations().len() - before, "ran check");
    }

    let violations = ctx.into_violations();
    let count = violations.len();
    if count > 0 {
        warn!(count, "consistency gate failed");
    }
    diagnostics.extend(violations);
    count
}
