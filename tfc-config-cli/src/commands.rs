//! Command implementations

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tfc_config::{build_server_registry, ConfigLoader, ConfigRegistry, ExportFormat};
use tracing::{debug, info};

use crate::cli::Commands;

/// Run a parsed command, printing its output to stdout
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Schema { format, output } => schema(format, output),
        Commands::Defaults => {
            let registry = load_registry()?;
            print!("{}", render_defaults(&registry));
            Ok(())
        }
        Commands::Check => {
            println!("{}", check()?);
            Ok(())
        }
        Commands::Env { prefix, strict } => {
            print!("{}", env(&prefix, strict)?);
            Ok(())
        }
    }
}

fn load_registry() -> Result<ConfigRegistry> {
    build_server_registry().context("Server configuration declarations are invalid")
}

fn schema(format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let registry = load_registry()?;
    match output {
        Some(path) => {
            registry
                .export_to_file(&path, format)
                .with_context(|| format!("Failed to write schema to {}", path.display()))?;
            info!(path = %path.display(), settings = registry.len(), "Schema written");
        }
        None => print!("{}", registry.export(format)?),
    }
    Ok(())
}

/// `key = default` lines under a header per section
pub fn render_defaults(registry: &ConfigRegistry) -> String {
    let mut out = String::new();
    for section in registry.sections().iter().filter(|s| !s.settings.is_empty()) {
        let _ = writeln!(out, "[{}]", section.path);
        for &i in &section.settings {
            let entry = &registry.entries()[i];
            let _ = writeln!(out, "{} = {}    # {} {}", entry.name, entry.default, entry.kind(), entry.domain);
        }
        out.push('\n');
    }
    out
}

/// Build the registry and summarise it
pub fn check() -> Result<String> {
    let registry = load_registry()?;
    let populated = registry
        .sections()
        .iter()
        .filter(|s| !s.settings.is_empty())
        .count();
    debug!(sections = registry.sections().len(), "Registry check passed");
    Ok(format!(
        "✅ {} settings in {} sections are valid",
        registry.len(),
        populated
    ))
}

/// Apply prefixed environment overrides and describe what changed
pub fn env(prefix: &str, strict: bool) -> Result<String> {
    let registry = load_registry()?;
    let loader = ConfigLoader::with_prefix(prefix);
    let report = loader.apply_env(&registry);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "📋 {} applied, {} clamped, {} rejected",
        report.applied.len(),
        report.clamped.len(),
        report.rejected.len()
    );
    for key in report.applied.iter().chain(report.clamped.iter()) {
        if let Some(value) = registry.current(key) {
            let _ = writeln!(out, "   {} = {}", key, value);
        }
    }
    for rejection in &report.rejected {
        let _ = writeln!(out, "   ❌ {}: {}", rejection.key, rejection.reason);
    }

    if strict {
        report.ensure_clean()?;
    }
    Ok(out)
}
