//! Check-config command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tb_driver::PipelineConfig;

pub fn check_config(path: &Path) -> Result<()> {
    let config = PipelineConfig::load(path)?;
    println!("{} {}", "Valid:".green().bold(), path.display());
    println!("\n{}", config.to_toml_string()?);
    Ok(())
}
