//! `insightctl`: drive the Insight search engine from a terminal.
//!
//! Loads configuration the same way an embedding host would, installs the
//! tracing subscriber and runs one engine operation per invocation.

mod cli;
mod commands;
mod host;

use anyhow::Context;
use clap::Parser;
use insight_config::{Config, ConfigLoader, telemetry};
use tracing::warn;

use crate::cli::{Cli, Command, ConfigArgs};

fn load_config(args: &ConfigArgs) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }

    let load = loader.load().context("failed to load configuration")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!(%hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
    Ok(load.config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(err) = telemetry::init_tracing(telemetry::DEFAULT_FILTER) {
        eprintln!("tracing already initialised: {err}");
    }

    match cli.command {
        Command::Url(args) => commands::url::run(&args),
        Command::Search(args) => commands::search::run(&load_config(&cli.config)?, args).await,
        Command::Suggest(args) => commands::suggest::run(&load_config(&cli.config)?, args).await,
        Command::Taxonomy(args) => {
            commands::taxonomy::run(&load_config(&cli.config)?, args).await
        }
    }
}
