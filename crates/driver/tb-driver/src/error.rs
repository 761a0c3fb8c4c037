//! Driver errors

use std::io;
use std::path::PathBuf;
use tb_diagnostics::Diagnostic;
use tb_interfaces::InterfaceError;
use tb_rename::RenameError;
use tb_symbols::GraphError;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read config {}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The contents are not a valid configuration
    #[error("invalid config{}", .path.as_ref().map(|path| format!(" {}", path.display())).unwrap_or_default())]
    Parse {
        /// File the text came from, if any
        path: Option<PathBuf>,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// The configuration could not be rendered
    #[error("cannot render config")]
    Render(#[source] toml::ser::Error),
}

/// Errors that abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The loader output is not a consistent graph
    #[error("invalid symbol graph")]
    Graph(#[from] GraphError),

    /// Interface analysis failed
    #[error("interface analysis failed")]
    Interface(#[from] InterfaceError),

    /// The renaming contract was violated
    #[error("naming failed")]
    Rename(#[from] RenameError),

    /// The consistency gate rejected the named graph
    #[error("consistency gate found {} violation(s)", .0.len())]
    Validation(Vec<Diagnostic>),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
