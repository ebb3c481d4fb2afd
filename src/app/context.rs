use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{MovieTrackError, Result};
use crate::catalog::{CatalogClient, HttpCatalogClient};
use crate::config::Config;
use crate::repository::MovieRepository;
use crate::session::{spawn_favorite_writer, SearchSession};
use crate::store::SqliteStore;

/// Wires the store, catalog client, repository and search session together.
///
/// Must be built inside a tokio runtime: the favorite writer task is
/// spawned here.
pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub repository: Arc<MovieRepository>,
    pub session: Arc<SearchSession>,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };
        tracing::debug!("Opening database at {}", db_path.display());

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let client = Arc::new(HttpCatalogClient::new(&config.catalog)?);
        Self::with_parts(store, client, config)
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let client = Arc::new(HttpCatalogClient::new(&config.catalog)?);
        Self::with_parts(store, client, config)
    }

    /// Build a context around an existing store and catalog client.
    pub fn with_parts(
        store: Arc<SqliteStore>,
        client: Arc<dyn CatalogClient + Send + Sync>,
        config: &Config,
    ) -> Result<Self> {
        let repository = Arc::new(MovieRepository::new(client, store.clone()));
        let writer = spawn_favorite_writer(repository.clone());
        let session = Arc::new(SearchSession::new(
            repository.clone(),
            store.clone(),
            writer,
            config.search.default_term.clone(),
        )?);

        Ok(Self {
            store,
            repository,
            session,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MovieTrackError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("movietrack");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("movietrack.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoadKind;
    use crate::repository::testing::{movie, FakeCatalog};
    use crate::store::FavoritesStore;

    #[tokio::test]
    async fn test_in_memory_context_uses_configured_default_term() {
        let mut config = Config::default();
        config.search.default_term = "alien".into();

        let ctx = AppContext::in_memory(&config).unwrap();

        assert_eq!(ctx.session.default_term(), "alien");
        assert_eq!(ctx.session.snapshot().term, "alien");
    }

    #[tokio::test]
    async fn test_context_wires_session_to_store() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let catalog = FakeCatalog::default().with("star", vec![movie(1, "Star Wars")]);
        let ctx = AppContext::with_parts(store, Arc::new(catalog), &Config::default()).unwrap();

        ctx.session.search("star", LoadKind::UserSearch).await.unwrap();
        ctx.session.toggle_favorite(1).unwrap();
        ctx.session.flush().await;

        assert_eq!(ctx.store.get_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_backed_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movietrack.db");

        let ctx = AppContext::new(Some(path.clone()), &Config::default()).unwrap();

        assert!(path.exists());
        assert!(ctx.repository.favorites().unwrap().is_empty());
    }
}
