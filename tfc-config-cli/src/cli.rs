//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tfc_config::ExportFormat;

#[derive(Parser)]
#[command(name = "tfc-config")]
#[command(author, version, about = "Inspect and check the TerraFirmaCraft server configuration")]
pub struct Cli {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export every setting's key, kind, default, domain and documentation
    Schema {
        /// Output format: yaml, json
        #[arg(long, value_name = "FORMAT", default_value = "yaml")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print every setting's default, grouped by section
    Defaults,

    /// Build the registry and report any declaration defect
    Check,

    /// Apply environment overrides to a fresh registry and show the result
    Env {
        /// Environment variable prefix
        #[arg(long, value_name = "PREFIX", default_value = "TFC")]
        prefix: String,

        /// Fail if any value had to be clamped or was rejected
        #[arg(long)]
        strict: bool,
    },
}
