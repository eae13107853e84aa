//! LKB CLI - Command-line interface for gazetteer dictionary feeds.

use clap::Parser;
use lkb_cli::commands;
use lkb_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> lkb_cli::Result<()> {
    let cli = Cli::parse();

    // Log to stderr; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Fingerprint(args) => commands::execute_fingerprint(args, &formatter)?,
        Command::Resolve(args) => commands::execute_resolve(args, &config, &formatter)?,
        Command::Build(args) => commands::execute_build(args, &config, &formatter)?,
        Command::Enrich(args) => commands::execute_enrich(args, &config, &formatter)?,
    }

    Ok(())
}
