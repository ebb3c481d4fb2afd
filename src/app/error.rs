use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieTrackError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {0}")]
    CatalogStatus(u16),

    #[error("Catalog response parsing error: {0}")]
    CatalogParse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Movie not found: {0}")]
    MovieNotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, MovieTrackError>;
