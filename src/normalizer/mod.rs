use serde::Deserialize;

use crate::app::{MovieTrackError, Result};
use crate::domain::MovieRecord;

/// Catalog search payload as returned by the remote API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    result_count: usize,
    #[serde(default)]
    results: Vec<CatalogTrack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogTrack {
    track_id: Option<i64>,
    track_name: Option<String>,
    artwork_url100: Option<String>,
    track_price: Option<f64>,
    primary_genre_name: Option<String>,
    long_description: Option<String>,
}

impl CatalogTrack {
    fn into_record(self) -> Option<MovieRecord> {
        Some(MovieRecord {
            id: self.track_id?,
            title: self.track_name.unwrap_or_default(),
            artwork_url: self.artwork_url100.unwrap_or_default(),
            price: self.track_price.unwrap_or_default(),
            genre: self.primary_genre_name.unwrap_or_default(),
            description: self.long_description.unwrap_or_default(),
            is_favorite: false,
        })
    }
}

#[derive(Clone)]
pub struct CatalogNormalizer;

impl Default for CatalogNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Decode a search payload into movie records, in catalog order.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<MovieRecord>> {
        let response: SearchResponse = serde_json::from_slice(body)
            .map_err(|e| MovieTrackError::CatalogParse(e.to_string()))?;

        if response.result_count != response.results.len() {
            tracing::debug!(
                "resultCount {} does not match {} results",
                response.result_count,
                response.results.len()
            );
        }

        let movies = response
            .results
            .into_iter()
            .filter_map(|track| {
                let record = track.into_record();
                if record.is_none() {
                    tracing::debug!("Skipping catalog entry without trackId");
                }
                record
            })
            .collect();

        Ok(movies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_maps_fields() {
        let body = br#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "kind": "feature-movie",
                "trackId": 1442460930,
                "trackName": "Star Wars: A New Hope",
                "artworkUrl100": "https://is1-ssl.mzstatic.com/image/100x100bb.jpg",
                "trackPrice": 19.99,
                "primaryGenreName": "Sci-Fi & Fantasy",
                "longDescription": "Luke Skywalker joins forces with a Jedi Knight."
            }]
        }"#;

        let movies = CatalogNormalizer::new().normalize(body).unwrap();
        assert_eq!(movies.len(), 1);

        let movie = &movies[0];
        assert_eq!(movie.id, 1442460930);
        assert_eq!(movie.title, "Star Wars: A New Hope");
        assert_eq!(
            movie.artwork_url,
            "https://is1-ssl.mzstatic.com/image/100x100bb.jpg"
        );
        assert_eq!(movie.price, 19.99);
        assert_eq!(movie.genre, "Sci-Fi & Fantasy");
        assert_eq!(
            movie.description,
            "Luke Skywalker joins forces with a Jedi Knight."
        );
        assert!(!movie.is_favorite);
    }

    #[test]
    fn test_normalize_ignores_payload_favorite_flag() {
        let body = br#"{"resultCount":1,"results":[{"trackId":5,"trackName":"X","isFavorite":true}]}"#;
        let movies = CatalogNormalizer::new().normalize(body).unwrap();
        assert!(!movies[0].is_favorite);
    }

    #[test]
    fn test_normalize_preserves_order() {
        let body = br#"{"resultCount":3,"results":[
            {"trackId":3,"trackName":"C"},
            {"trackId":1,"trackName":"A"},
            {"trackId":2,"trackName":"B"}
        ]}"#;
        let ids: Vec<_> = CatalogNormalizer::new()
            .normalize(body)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_normalize_missing_fields_default() {
        let body = br#"{"resultCount":1,"results":[{"trackId":9}]}"#;
        let movies = CatalogNormalizer::new().normalize(body).unwrap();
        assert_eq!(movies[0].title, "");
        assert_eq!(movies[0].price, 0.0);
        assert_eq!(movies[0].description, "");
    }

    #[test]
    fn test_normalize_skips_entries_without_id() {
        let body = br#"{"resultCount":2,"results":[{"trackName":"No id"},{"trackId":4,"trackName":"Has id"}]}"#;
        let movies = CatalogNormalizer::new().normalize(body).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 4);
    }

    #[test]
    fn test_normalize_empty_results() {
        let body = br#"{"resultCount":0,"results":[]}"#;
        assert!(CatalogNormalizer::new().normalize(body).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_malformed_json() {
        let result = CatalogNormalizer::new().normalize(b"<html>502</html>");
        assert!(matches!(result, Err(MovieTrackError::CatalogParse(_))));
    }
}
