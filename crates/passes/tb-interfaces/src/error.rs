//! Error types for interface analysis

use tb_symbols::GraphError;
use tb_types::TypeReference;

/// Errors raised while analysing interface hierarchies
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterfaceError {
    /// A generic reference supplies the wrong number of arguments
    #[error("{reference} supplies {found} type arguments but the definition declares {expected}")]
    ArityMismatch {
        /// The offending reference
        reference: TypeReference,
        /// Arity of the definition
        expected: u32,
        /// Number of supplied arguments
        found: usize,
    },

    /// Synthesized types could not be added to the graph
    #[error(transparent)]
    Graph(#[from] GraphError),
}
