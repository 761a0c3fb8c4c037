//! Run command implementation

use crate::OutputFormat;
use crate::report::{print_diagnostics, print_summary};
use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::fs;
use std::path::Path;
use tb_driver::{GraphInput, PipelineConfig, PipelineError, run_pipeline};
use tracing::info;

pub fn run(graph_path: &Path, config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let config = match config_path {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };

    let contents = fs::read_to_string(graph_path)
        .with_context(|| format!("Failed to read graph file: {}", graph_path.display()))?;
    let input: GraphInput = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse graph file: {}", graph_path.display()))?;
    info!(types = input.types.len(), "loaded graph");

    let graph = input.into_graph().context("Loader output is not a consistent graph")?;
    let output = match run_pipeline(&graph, &config) {
        Ok(output) => output,
        Err(PipelineError::Validation(violations)) => {
            if format == OutputFormat::Text {
                print_diagnostics(&violations);
            } else {
                println!("{}", serde_json::to_string_pretty(&violations)?);
            }
            bail!("Consistency gate found {} violation(s)", violations.len());
        }
        Err(error) => return Err(error).context("Pipeline failed"),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{} {}", "Named".green().bold(), graph_path.display());
            print_diagnostics(&output.diagnostics);
            print_summary(&output);
        }
    }

    Ok(())
}
