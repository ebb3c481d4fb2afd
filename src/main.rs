use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use movietrack::app::{logging, AppContext};
use movietrack::cli::{commands, Cli, Commands};
use movietrack::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?;

    let ctx = AppContext::new(cli.db.clone(), &config)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Search { term, json } => {
            commands::search(&ctx, &term, json).await?;
        }
        Commands::Favorites { json } => {
            commands::list_favorites(&ctx, json)?;
        }
        Commands::Toggle { id, term } => {
            commands::toggle(&ctx, id, term.as_deref()).await?;
        }
        Commands::LastVisited => {
            commands::last_visited(&ctx)?;
        }
        Commands::Tui => {
            movietrack::tui::run(Arc::new(ctx), Arc::new(config)).await?;
        }
    }

    Ok(())
}
