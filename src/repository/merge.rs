use std::collections::HashMap;

use crate::app::Result;
use crate::domain::{LoadKind, MovieRecord};

/// Combine a catalog result with the stored favorites into a display list.
///
/// Catalog order always wins and the favorite flag is an overlay taken from
/// `local_favorites`. A failed catalog search counts as zero results. The one
/// exception is an initial load that produced nothing: the favorites become
/// the whole list.
pub fn merge(
    remote: Result<Vec<MovieRecord>>,
    local_favorites: Vec<MovieRecord>,
    kind: LoadKind,
) -> Vec<MovieRecord> {
    let api_movies = remote.unwrap_or_default();

    if api_movies.is_empty() && kind.is_initial() {
        return local_favorites;
    }

    let favorites: HashMap<i64, bool> = local_favorites
        .iter()
        .map(|movie| (movie.id, movie.is_favorite))
        .collect();

    api_movies
        .into_iter()
        .map(|api_movie| MovieRecord {
            is_favorite: favorites.get(&api_movie.id).copied().unwrap_or(false),
            ..api_movie
        })
        .collect()
}
