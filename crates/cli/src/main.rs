mod app;
mod cli;
mod commands;
mod config;
mod render;

use std::sync::Arc;

use clap::Parser;

use bookfinder_client::{ReqwestExecutor, SearchClient};
use bookfinder_storage::{FavoritesStore, FilesystemStorage};

use crate::cli::Commands;
use crate::config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load().await?;
    let storage_root = cli
        .storage_path
        .clone()
        .unwrap_or_else(|| config.storage_path());

    // Favorites load once at startup; bad stored state recovers to empty.
    let backend = Arc::new(FilesystemStorage::new(&storage_root));
    let mut favorites = FavoritesStore::open(backend).await;

    let client = SearchClient::new(Arc::new(ReqwestExecutor::new()));

    match cli.command {
        Commands::Search { filters, page } => {
            commands::handle_search_command(
                filters.into_params(),
                page.max(1),
                &client,
                &favorites,
                cli.dry_run,
            )
            .await?;
        }
        Commands::Browse { filters } => {
            commands::handle_browse_command(filters.into_params(), client, favorites).await?;
        }
        Commands::Favorites { command } => {
            commands::handle_favorites_command(command, &mut favorites, cli.dry_run).await?;
        }
        Commands::Config { command } => {
            commands::handle_config_command(command, cli.dry_run).await?;
        }
    }

    Ok(())
}
