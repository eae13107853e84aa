//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LKB CLI - Resolve, build and enrich gazetteer dictionaries.
#[derive(Debug, Parser)]
#[command(name = "lkb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LKB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the settings fingerprint of a dictionary directory
    Fingerprint(LocationArgs),

    /// Show which feed a dictionary directory resolves to
    Resolve(LocationArgs),

    /// Load a dictionary through its compiled cache
    Build(BuildArgs),

    /// Enrich the annotations of a JSON document
    Enrich(EnrichArgs),
}

/// Arguments naming a dictionary directory.
#[derive(Debug, Parser)]
pub struct LocationArgs {
    /// Directory holding config.ttl and query.txt
    pub directory: PathBuf,
}

/// Arguments for the build command.
#[derive(Debug, Parser)]
pub struct BuildArgs {
    /// Directory holding config.ttl and query.txt
    pub directory: PathBuf,

    /// Cache database (defaults to a file inside the directory)
    #[arg(long)]
    pub cache: Option<PathBuf>,
}

/// Arguments for the enrich command.
#[derive(Debug, Parser)]
pub struct EnrichArgs {
    /// JSON document with annotations
    pub input: PathBuf,

    /// Write the enriched document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
