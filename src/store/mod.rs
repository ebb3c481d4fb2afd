pub mod sqlite;

use crate::app::Result;
use crate::domain::MovieRecord;

pub use sqlite::SqliteStore;

/// Preference key holding the formatted time of the previous visit.
pub const LAST_VISITED_KEY: &str = "last_visited";

/// Keyed record store for favorited movies.
///
/// Every stored record is a favorite, so the store doubles as the
/// favorites list.
pub trait FavoritesStore {
    fn get_all(&self) -> Result<Vec<MovieRecord>>;
    fn get(&self, id: i64) -> Result<Option<MovieRecord>>;
    /// Insert or replace by id. The stored flag is always true.
    fn upsert(&self, record: &MovieRecord) -> Result<()>;
    /// Remove by id. Absent ids are a no-op.
    fn delete(&self, record: &MovieRecord) -> Result<()>;
}

pub trait PreferenceStore {
    fn get_preference(&self, key: &str) -> Result<Option<String>>;
    fn set_preference(&self, key: &str, value: &str) -> Result<()>;
}
