//! Pipeline driver
//!
//! Owns one [`PipelineContext`] per run and moves a symbol graph through every pass in
//! order: interface analysis, overload resolution, view planning, name reservation,
//! name application and the consistency gate.
//!
//! ```rust,ignore
//! use tb_driver::{GraphInput, PipelineConfig, run_pipeline};
//!
//! let graph = serde_json::from_str::<GraphInput>(&json)?.into_graph()?;
//! let output = run_pipeline(&graph, &PipelineConfig::load("typebridge.toml")?)?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod pipeline;

pub use config::PipelineConfig;
pub use context::PipelineContext;
pub use error::{ConfigError, PipelineError};
pub use input::GraphInput;
pub use pipeline::{PipelineOutput, run_pipeline};
