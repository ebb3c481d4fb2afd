pub mod merge;
pub mod toggle;

use std::sync::Arc;

use crate::app::{MovieTrackError, Result};
use crate::catalog::CatalogClient;
use crate::domain::{LoadKind, MovieRecord};
use crate::store::FavoritesStore;

pub use merge::merge;
pub use toggle::{toggle, StoreOp};

/// Result of a merged search, with the catalog failure if there was one.
///
/// `movies` is always the merged list; a failed catalog search has already
/// been downgraded to zero results.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub movies: Vec<MovieRecord>,
    pub remote_error: Option<String>,
}

pub struct MovieRepository {
    client: Arc<dyn CatalogClient + Send + Sync>,
    store: Arc<dyn FavoritesStore + Send + Sync>,
}

impl MovieRepository {
    pub fn new(
        client: Arc<dyn CatalogClient + Send + Sync>,
        store: Arc<dyn FavoritesStore + Send + Sync>,
    ) -> Self {
        Self { client, store }
    }

    /// Search the catalog and overlay the stored favorites.
    pub async fn get_movies(&self, term: &str, kind: LoadKind) -> Result<Vec<MovieRecord>> {
        Ok(self.search_outcome(term, kind).await?.movies)
    }

    pub async fn search_outcome(&self, term: &str, kind: LoadKind) -> Result<SearchOutcome> {
        let store = self.store.clone();
        let (remote, local) = tokio::join!(
            self.client.search(term),
            tokio::task::spawn_blocking(move || store.get_all())
        );

        let local_favorites =
            local.map_err(|e| MovieTrackError::Task(e.to_string()))??;

        let remote_error = match &remote {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Catalog search for {:?} failed: {}", term, e);
                Some(e.to_string())
            }
        };

        let movies = merge(remote, local_favorites, kind);
        tracing::debug!(
            "Merged {} movies for {:?} ({:?})",
            movies.len(),
            term,
            kind
        );

        Ok(SearchOutcome {
            movies,
            remote_error,
        })
    }

    pub fn favorites(&self) -> Result<Vec<MovieRecord>> {
        self.store.get_all()
    }

    pub fn add_favorite(&self, movie: &MovieRecord) -> Result<()> {
        self.store.upsert(&movie.with_favorite(true))
    }

    pub fn remove_favorite(&self, movie: &MovieRecord) -> Result<()> {
        self.store.delete(movie)
    }

    pub fn apply(&self, op: &StoreOp) -> Result<()> {
        match op {
            StoreOp::Upsert(movie) => self.add_favorite(movie),
            StoreOp::Delete(movie) => self.remove_favorite(movie),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::app::{MovieTrackError, Result};
    use crate::catalog::CatalogClient;
    use crate::domain::MovieRecord;
    use crate::store::{FavoritesStore, SqliteStore};

    /// Catalog client answering from a fixed table, optionally after a delay.
    #[derive(Default)]
    pub struct FakeCatalog {
        responses: Mutex<HashMap<String, (Vec<MovieRecord>, Duration)>>,
        failing: bool,
    }

    impl FakeCatalog {
        pub fn failing() -> Self {
            Self {
                failing: true,
                ..Self::default()
            }
        }

        pub fn with(self, term: &str, movies: Vec<MovieRecord>) -> Self {
            self.with_delay(term, movies, Duration::ZERO)
        }

        pub fn with_delay(self, term: &str, movies: Vec<MovieRecord>, delay: Duration) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(term.to_string(), (movies, delay));
            self
        }
    }

    #[async_trait]
    impl CatalogClient for FakeCatalog {
        async fn search(&self, term: &str) -> Result<Vec<MovieRecord>> {
            if self.failing {
                return Err(MovieTrackError::Other("Network error".into()));
            }
            let entry = self.responses.lock().unwrap().get(term).cloned();
            match entry {
                Some((movies, delay)) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    Ok(movies)
                }
                None => Ok(Vec::new()),
            }
        }
    }

    /// In-memory favorites store whose reads or writes can be made to fail.
    pub struct FlakyStore {
        inner: SqliteStore,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl FlakyStore {
        pub fn new() -> Self {
            Self {
                inner: SqliteStore::in_memory().unwrap(),
                fail_reads: AtomicBool::new(false),
                fail_writes: AtomicBool::new(false),
            }
        }

        pub fn fail_reads(&self, failing: bool) {
            self.fail_reads.store(failing, Ordering::SeqCst);
        }

        pub fn fail_writes(&self, failing: bool) {
            self.fail_writes.store(failing, Ordering::SeqCst);
        }

        pub fn inner(&self) -> &SqliteStore {
            &self.inner
        }

        fn check(flag: &AtomicBool) -> Result<()> {
            if flag.load(Ordering::SeqCst) {
                return Err(MovieTrackError::Other("Disk full".into()));
            }
            Ok(())
        }
    }

    impl FavoritesStore for FlakyStore {
        fn get_all(&self) -> Result<Vec<MovieRecord>> {
            Self::check(&self.fail_reads)?;
            self.inner.get_all()
        }

        fn get(&self, id: i64) -> Result<Option<MovieRecord>> {
            Self::check(&self.fail_reads)?;
            self.inner.get(id)
        }

        fn upsert(&self, record: &MovieRecord) -> Result<()> {
            Self::check(&self.fail_writes)?;
            self.inner.upsert(record)
        }

        fn delete(&self, record: &MovieRecord) -> Result<()> {
            Self::check(&self.fail_writes)?;
            self.inner.delete(record)
        }
    }

    pub fn movie(id: i64, title: &str) -> MovieRecord {
        let mut movie = MovieRecord::new(id, title);
        movie.artwork_url = format!("https://example.com/{}.jpg", id);
        movie.price = 10.0;
        movie.genre = "Action".into();
        movie
    }
}
