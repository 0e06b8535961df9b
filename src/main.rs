mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use cli::{Cli, Commands};
use lh_scraper_lib::infrastructure::{ConfigManager, init_logging_with_config};
use lh_scraper_lib::{LhAdapter, SiteAdapter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let config = manager.load_config()?;
    init_logging_with_config(&config.logging)?;
    info!("Configuration: {}", manager.config_path().display());

    let adapter = LhAdapter::from_config(&config)?;

    let result = run(&adapter, cli.command).await;
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(adapter: &impl SiteAdapter, command: Commands) -> Result<()> {
    match command {
        Commands::Listing { page } => print_json(&adapter.scrape_listing_page(page).await?),
        Commands::Detail { source_id } => print_json(&adapter.scrape_detail(&source_id).await?),
        Commands::Images {
            source_media_id,
            chapter_id,
        } => print_json(&adapter.get_images(&source_media_id, &chapter_id).await?),
        Commands::Changed {
            old_snapshot,
            new_snapshot,
        } => {
            let old = tokio::fs::read_to_string(&old_snapshot)
                .await
                .with_context(|| format!("Failed to read {}", old_snapshot.display()))?;
            let new = tokio::fs::read_to_string(&new_snapshot)
                .await
                .with_context(|| format!("Failed to read {}", new_snapshot.display()))?;
            println!("{}", adapter.should_monitor_change(&old, &new));
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
