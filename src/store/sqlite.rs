use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{MovieTrackError, Result};
use crate::domain::MovieRecord;
use crate::store::{FavoritesStore, PreferenceStore};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|_| MovieTrackError::Database(rusqlite::Error::InvalidQuery))?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            MovieTrackError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<MovieRecord> {
        Ok(MovieRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            artwork_url: row.get(2)?,
            price: row.get(3)?,
            genre: row.get(4)?,
            description: row.get(5)?,
            is_favorite: row.get::<_, i32>(6)? != 0,
        })
    }
}

impl FavoritesStore for SqliteStore {
    fn get_all(&self) -> Result<Vec<MovieRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, artwork_url, price, genre, description, is_favorite
             FROM movies ORDER BY title, id",
        )?;

        let movies = stmt
            .query_map([], Self::movie_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn get(&self, id: i64) -> Result<Option<MovieRecord>> {
        let conn = self.lock()?;

        let result = conn
            .query_row(
                "SELECT id, title, artwork_url, price, genre, description, is_favorite
                 FROM movies WHERE id = ?1",
                params![id],
                Self::movie_from_row,
            )
            .optional()?;

        Ok(result)
    }

    fn upsert(&self, record: &MovieRecord) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO movies (id, title, artwork_url, price, genre, description, is_favorite)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
             ON CONFLICT(id) DO UPDATE SET
                title = ?2, artwork_url = ?3, price = ?4, genre = ?5,
                description = ?6, is_favorite = 1",
            params![
                record.id,
                record.title,
                record.artwork_url,
                record.price,
                record.genre,
                record.description
            ],
        )?;

        Ok(())
    }

    fn delete(&self, record: &MovieRecord) -> Result<()> {
        let conn = self.lock()?;

        conn.execute("DELETE FROM movies WHERE id = ?1", params![record.id])?;
        Ok(())
    }
}

impl PreferenceStore for SqliteStore {
    fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LAST_VISITED_KEY;

    fn movie(id: i64, title: &str) -> MovieRecord {
        let mut movie = MovieRecord::new(id, title);
        movie.artwork_url = format!("https://example.com/{}.jpg", id);
        movie.price = 12.99;
        movie.genre = "Sci-Fi".into();
        movie.description = "A long time ago".into();
        movie
    }

    #[test]
    fn test_upsert_and_get() {
        let store = SqliteStore::in_memory().unwrap();
        store.upsert(&movie(1, "Star Wars").with_favorite(true)).unwrap();

        let retrieved = store.get(1).unwrap().unwrap();
        assert_eq!(retrieved.title, "Star Wars");
        assert_eq!(retrieved.artwork_url, "https://example.com/1.jpg");
        assert_eq!(retrieved.price, 12.99);
        assert!(retrieved.is_favorite);
    }

    #[test]
    fn test_upsert_forces_favorite_flag() {
        let store = SqliteStore::in_memory().unwrap();
        store.upsert(&movie(2, "Star Trek")).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_favorite);
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let store = SqliteStore::in_memory().unwrap();
        store.upsert(&movie(3, "Old Title")).unwrap();
        store.upsert(&movie(3, "New Title")).unwrap();

        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "New Title");
    }

    #[test]
    fn test_delete() {
        let store = SqliteStore::in_memory().unwrap();
        let record = movie(4, "Stardust");
        store.upsert(&record).unwrap();

        store.delete(&record).unwrap();
        assert!(store.get(4).unwrap().is_none());
        assert!(store.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let store = SqliteStore::in_memory().unwrap();
        store.upsert(&movie(5, "Starman")).unwrap();

        store.delete(&movie(99, "Missing")).unwrap();
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_get_all_ordering() {
        let store = SqliteStore::in_memory().unwrap();
        store.upsert(&movie(10, "Zoolander")).unwrap();
        store.upsert(&movie(11, "Alien")).unwrap();
        store.upsert(&movie(12, "Moon")).unwrap();

        let titles: Vec<_> = store
            .get_all()
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Alien", "Moon", "Zoolander"]);
    }

    #[test]
    fn test_get_nonexistent() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.get(42).unwrap().is_none());
    }

    #[test]
    fn test_preferences() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.get_preference(LAST_VISITED_KEY).unwrap().is_none());

        store
            .set_preference(LAST_VISITED_KEY, "2024-05-01 9:30:00 AM")
            .unwrap();
        store
            .set_preference(LAST_VISITED_KEY, "2024-05-02 1:15:00 PM")
            .unwrap();

        assert_eq!(
            store.get_preference(LAST_VISITED_KEY).unwrap(),
            Some("2024-05-02 1:15:00 PM".to_string())
        );
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movietrack.db");

        {
            let store = SqliteStore::new(&path).unwrap();
            store.upsert(&movie(20, "Interstellar")).unwrap();
        }

        let store = SqliteStore::new(&path).unwrap();
        let all = store.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 20);
    }
}
