//! icsimport CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use icsimport_core::{TracingConfig, init_tracing};

use icsimport_client::cli::{Cli, Command, ConfigAction};
use icsimport_client::commands;
use icsimport_client::commands::import::ImportOverrides;
use icsimport_client::config::ClientConfig;
use icsimport_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tracing_config = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: {}", e);
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

async fn run(command: Command, config: &ClientConfig) -> ClientResult<()> {
    match command {
        Command::Import {
            feed,
            dry_run,
            limit,
            update_existing,
            category,
            store,
        } => {
            let overrides = ImportOverrides {
                dry_run,
                limit,
                update_existing,
                category,
                store,
            };
            commands::import::import(config, &feed, &overrides).await
        }
        Command::Preview { feed, store } => commands::import::preview(config, &feed, store).await,
        Command::Events { feed, limit } => commands::events::list(config, &feed, limit).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(config),
            ConfigAction::Validate => commands::config::validate(config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
