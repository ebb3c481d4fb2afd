pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "movietrack")]
#[command(about = "Search a movie catalog and keep a list of favorites", long_about = None)]
pub struct Cli {
    /// Path to the favorites database
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog, marking favorites
    Search {
        /// Search term
        term: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved favorites
    Favorites {
        /// Print favorites as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle the favorite flag of a movie from a search
    Toggle {
        /// Catalog track id
        id: i64,
        /// Search term the movie appears under (defaults to the startup term)
        #[arg(short, long)]
        term: Option<String>,
    },
    /// Show when the app was last visited
    LastVisited,
    /// Launch the TUI
    Tui,
}
