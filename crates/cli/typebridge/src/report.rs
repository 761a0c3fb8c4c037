//! Text output

use colored::Colorize;
use tb_diagnostics::{Diagnostic, Severity};
use tb_driver::PipelineOutput;

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    println!();
    for diagnostic in diagnostics {
        let level = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".cyan().bold(),
        };
        println!("{level}[{}]: {}", diagnostic.code, diagnostic.message);
        if let Some(location) = &diagnostic.location {
            println!("  --> {location}");
        }
    }
}

pub fn print_summary(output: &PipelineOutput) {
    println!("\n{}", "Types:".bold());
    for ty in output.graph.types() {
        let name = ty.final_name.as_deref().unwrap_or("<unnamed>");
        println!("  {} -> {}", ty.stable_id, name.green());
        for view in &ty.views {
            let accessor = view.accessor_final_name.as_deref().unwrap_or("<unnamed>");
            println!("    {} {} ({} members)", "view".cyan(), accessor, view.members.len());
        }
    }
    for alias in output.graph.aliases() {
        let members: Vec<String> = alias.members.iter().map(ToString::to_string).collect();
        println!("  {} {} = {}", "alias".cyan(), alias.alias_for, members.join(" & "));
    }

    let count = |severity: Severity| {
        output
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    };
    println!(
        "\n{} {} types, {} decisions, {} warnings, {} infos",
        "Summary:".green().bold(),
        output.graph.len(),
        output.decisions.len(),
        count(Severity::Warning),
        count(Severity::Info)
    );
}
