//! Loader output as accepted by the pipeline

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use tb_symbols::{SymbolGraph, TypeSymbol};

/// Serialized loader output: every type of every loaded module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphInput {
    /// Types in any order
    pub types: Vec<TypeSymbol>,
}

impl GraphInput {
    /// Build the symbol graph
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Graph`] if the types do not form a consistent graph.
    pub fn into_graph(self) -> Result<SymbolGraph, PipelineError> {
        let mut builder = SymbolGraph::builder();
        for ty in self.types {
            builder.add_type(ty);
        }
        Ok(builder.build()?)
    }
}
