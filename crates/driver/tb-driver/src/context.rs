//! Per-run state

use crate::config::PipelineConfig;
use tb_diagnostics::Diagnostics;
use tb_rename::RenameEngine;

/// Everything one pipeline run owns
///
/// Nothing here outlives the run; two runs never share a context.
#[derive(Debug)]
pub struct PipelineContext {
    /// Configuration in effect
    pub config: PipelineConfig,
    /// Diagnostics reported so far, in pass order
    pub diagnostics: Diagnostics,
    /// Renaming engine holding every decision
    pub engine: RenameEngine,
}

impl PipelineContext {
    /// Fresh context for a run under `config`
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        let engine = RenameEngine::new(config.rename.clone());
        Self {
            config,
            diagnostics: Diagnostics::new(),
            engine,
        }
    }
}
