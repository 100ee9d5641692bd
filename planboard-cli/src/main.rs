mod cli;
mod commands;
mod config;
mod render;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use planboard::{ApiError, Planboard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use config::CliConfig;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ApiError>() {
                Some(api) if api.field_errors().is_some() => {
                    eprintln!("Please fix the following:\n{}", render::api_error(api));
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::ConfigPath = cli.command {
        return commands::config_path();
    }

    let board = if cli.dev {
        tracing::info!("using in-memory demo data");
        Planboard::dev()
    } else {
        let config = CliConfig::load()?;
        tracing::debug!(api_url = %config.api_url, "config loaded");
        Planboard::http(&config.client_config()?).context("Failed to set up API client")?
    };

    commands::run(board, cli.command).await
}
