//! # Movietrack
//!
//! A terminal movie catalog browser with locally saved favorites.
//!
//! ## Architecture
//!
//! ```text
//! Catalog → Normalizer → Repository (merge with Store) → Session → UI
//! ```
//!
//! - [`catalog`]: HTTP client for the remote search endpoint
//! - [`normalizer`]: Converts catalog JSON to unified domain records
//! - [`store`]: SQLite persistence for favorites and preferences
//! - [`repository`]: Merge and toggle logic over catalog and store
//! - [`session`]: Shared display state and the background favorite writer
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Search the catalog
//! movietrack search "star wars"
//!
//! # Save or unsave a movie found under a term
//! movietrack toggle 1234 --term "star wars"
//!
//! # List favorites
//! movietrack favorites
//!
//! # Launch TUI (default)
//! movietrack
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// catalog client, repository and search session.
pub mod app;

/// HTTP access to the movie catalog.
///
/// - [`CatalogClient`](catalog::CatalogClient): Async trait for searching
/// - [`HttpCatalogClient`](catalog::http_client::HttpCatalogClient): reqwest-based implementation
pub mod catalog;

/// Configuration management.
///
/// Loads from `~/.config/movietrack/config.toml`, supporting:
/// - Catalog endpoint, country and media type
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Command-line interface using clap.
///
/// Defines the CLI structure and subcommands:
/// - `search <term> [--json]` - Search the catalog
/// - `favorites [--json]` - List saved favorites
/// - `toggle <id> [--term]` - Toggle a favorite
/// - `last-visited` - Show the last visit time
/// - `tui` - Launch the TUI
pub mod cli;

/// Core domain models.
///
/// - [`MovieRecord`](domain::MovieRecord): One catalog entry with its favorite flag
/// - [`LoadKind`](domain::LoadKind): Startup load or user search
pub mod domain;

/// Catalog response parsing.
///
/// Converts the search endpoint's JSON into [`MovieRecord`](domain::MovieRecord) values.
pub mod normalizer;

/// Search results merged with local favorites.
pub mod repository;

/// Shared search state and favorite persistence in the background.
pub mod session;

/// SQLite persistence layer.
///
/// - [`FavoritesStore`](store::FavoritesStore): Favorite records
/// - [`PreferenceStore`](store::PreferenceStore): Key/value preferences
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation of both
pub mod store;

/// Terminal user interface.
///
/// Two-pane layout built with ratatui:
/// - Movies pane (search results, favorites starred)
/// - Detail pane (genre, price, description, artwork link)
///
/// Keybindings: j/k navigate, Tab cycles panes, / searches,
/// f toggles favorite, o opens artwork, R refreshes, q quits.
pub mod tui;
