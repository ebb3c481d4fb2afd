pub mod writer;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::watch;

use crate::app::Result;
use crate::domain::{LoadKind, MovieRecord};
use crate::repository::{toggle, MovieRepository};
use crate::store::{PreferenceStore, LAST_VISITED_KEY};

pub use writer::{spawn_favorite_writer, FavoriteWriter, FavoriteWriterHandle};

/// Shown when no visit has been recorded yet.
pub const NEVER_VISITED: &str = "Never";

const LAST_VISITED_FORMAT: &str = "%Y-%m-%d %-I:%M:%S %p";

/// Display state for one running app.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub term: String,
    pub movies: Vec<MovieRecord>,
    pub is_loading: bool,
    pub last_visited: String,
    /// Message from the last catalog failure, cleared by the next success.
    pub remote_error: Option<String>,
    /// Message from the last failed favorites read, cleared by the next success.
    pub store_error: Option<String>,
    /// Sequence number of the search response currently shown.
    pub applied_seq: u64,
}

impl SearchState {
    pub fn new(term: impl Into<String>, last_visited: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            movies: Vec::new(),
            is_loading: false,
            last_visited: last_visited.into(),
            remote_error: None,
            store_error: None,
            applied_seq: 0,
        }
    }
}

/// Single writer of the display list.
///
/// Searches and toggles publish a new [`SearchState`] on a watch channel;
/// any number of readers observe it through [`SearchSession::subscribe`].
pub struct SearchSession {
    repository: Arc<MovieRepository>,
    preferences: Arc<dyn PreferenceStore + Send + Sync>,
    writer: FavoriteWriterHandle,
    default_term: String,
    next_seq: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl SearchSession {
    pub fn new(
        repository: Arc<MovieRepository>,
        preferences: Arc<dyn PreferenceStore + Send + Sync>,
        writer: FavoriteWriterHandle,
        default_term: impl Into<String>,
    ) -> Result<Self> {
        let default_term = default_term.into();
        let last_visited = preferences
            .get_preference(LAST_VISITED_KEY)?
            .unwrap_or_else(|| NEVER_VISITED.to_string());
        let (state, _) = watch::channel(SearchState::new(default_term.clone(), last_visited));

        Ok(Self {
            repository,
            preferences,
            writer,
            default_term,
            next_seq: AtomicU64::new(0),
            state,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn default_term(&self) -> &str {
        &self.default_term
    }

    /// Startup search with the default term.
    pub async fn initial_load(&self) -> Result<bool> {
        let term = self.default_term.clone();
        self.search(&term, LoadKind::InitialLoad).await
    }

    /// Run the current term again as a user search.
    pub async fn refresh(&self) -> Result<bool> {
        let term = self.state.borrow().term.clone();
        self.search(&term, LoadKind::UserSearch).await
    }

    /// Search and publish the merged list.
    ///
    /// Returns `Ok(false)` when a newer search was applied first and this
    /// response was discarded.
    pub async fn search(&self, term: &str, kind: LoadKind) -> Result<bool> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.term = term.to_string();
            state.is_loading = true;
        });

        let outcome = self.repository.search_outcome(term, kind).await;

        let mut applied = false;
        self.state.send_if_modified(|state| {
            if seq < state.applied_seq {
                tracing::debug!("Discarding stale response {} for {:?}", seq, term);
                return false;
            }
            applied = true;
            state.applied_seq = seq;
            // Read under the watch lock so a search issued meanwhile keeps the flag set
            state.is_loading = seq < self.next_seq.load(Ordering::SeqCst);
            match &outcome {
                Ok(outcome) => {
                    state.movies = outcome.movies.clone();
                    state.remote_error = outcome.remote_error.clone();
                    state.store_error = None;
                }
                Err(e) => {
                    tracing::error!("Reading favorites for {:?} failed: {}", term, e);
                    state.store_error = Some(e.to_string());
                }
            }
            true
        });

        outcome?;
        Ok(applied)
    }

    /// Flip the favorite flag of a listed movie.
    ///
    /// The display list changes immediately; the store write is queued and
    /// not awaited. Returns the updated record, or `None` if `id` is not in
    /// the current list.
    pub fn toggle_favorite(&self, id: i64) -> Option<MovieRecord> {
        let mut updated = None;
        self.state.send_if_modified(|state| {
            let (movies, op) = toggle(&state.movies, id);
            match op {
                Some(op) => {
                    updated = Some(op.record().clone());
                    state.movies = movies;
                    self.writer.submit(op);
                    true
                }
                None => false,
            }
        });
        updated
    }

    /// Store the current local time as the last visit.
    pub fn record_visit(&self) -> Result<String> {
        let now = Local::now().format(LAST_VISITED_FORMAT).to_string();
        self.preferences.set_preference(LAST_VISITED_KEY, &now)?;
        Ok(now)
    }

    /// Wait for queued favorite writes.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Flush pending writes and stop the writer.
    pub async fn close(&self) {
        self.writer.flush().await;
        self.writer.shutdown();
    }
}
