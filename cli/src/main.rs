mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{handle_buildings, handle_catalog, handle_route, load_config, Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let Some(config) = load_config(cli.config.as_deref()) else {
        return Ok(ExitCode::from(2));
    };

    match cli.command {
        Commands::Catalog => handle_catalog(&config),
        Commands::Route { building, origin } => handle_route(&config, &building, origin).await,
        Commands::Buildings => handle_buildings(&config),
    }
}
